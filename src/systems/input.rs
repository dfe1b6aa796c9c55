//! Input systems.
//!
//! [`update_input_state`] polls the raylib keyboard once per frame and
//! rewrites the [`KeyboardSnapshot`] the scripting bridge reads, so
//! `IsKeyPressed` sees a stable view of the keyboard for the whole frame.
//! Key codes are raylib's (which match GLFW's), e.g. 32 = space, 65 = A.

use std::cell::RefCell;
use std::rc::Rc;

use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::resources::input::KeyboardSnapshot;

/// Highest key code worth scanning (raylib's keyboard range ends at
/// `KEY_KB_MENU` = 348).
const MAX_KEY_CODE: i32 = 348;

/// Poll raylib for held keys and rewrite the shared snapshot.
pub fn update_input_state(
    rl: NonSend<raylib::RaylibHandle>,
    snapshot: NonSend<Rc<RefCell<KeyboardSnapshot>>>,
) {
    let mut snapshot = snapshot.borrow_mut();
    snapshot.clear();
    for code in 0..=MAX_KEY_CODE {
        if let Some(key) = key_from_i32(code) {
            if rl.is_key_down(key) {
                snapshot.set_down(code);
            }
        }
    }
}
