//! Keyboard state shared with scripts.
//!
//! Scripts query keys by raylib key code (`IsKeyPressed`). The Lua bridge
//! cannot reach the raylib handle, so the input system writes the set of
//! currently-held key codes into this snapshot once per frame, before any
//! script runs.

use rustc_hash::FxHashSet;

/// Set of key codes held down this frame.
#[derive(Debug, Default, Clone)]
pub struct KeyboardSnapshot {
    down: FxHashSet<i32>,
}

impl KeyboardSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.down.clear();
    }

    pub fn set_down(&mut self, key_code: i32) {
        self.down.insert(key_code);
    }

    pub fn is_down(&self, key_code: i32) -> bool {
        self.down.contains(&key_code)
    }
}
