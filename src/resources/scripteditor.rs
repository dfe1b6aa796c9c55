//! Engine side of the in-app script editor.
//!
//! The editor widget itself lives in the UI layer; this resource holds what
//! the engine needs from it: the current text buffer and a queue of
//! requested actions. UI code (or a debug shortcut) pushes actions; the
//! editor system drains and applies them once per frame, between script
//! runs, so no action ever lands mid-scan of the sprite list.
//!
//! "Clear" empties only the buffer. It deliberately does not reset the
//! interpreter globals, so a previously loaded `Update` hook keeps running
//! until a new script overwrites it.

use std::io;
use std::path::{Path, PathBuf};

use bevy_ecs::prelude::Resource;

/// Default save target, relative to the project's scripts folder.
pub const DEFAULT_SCRIPT_NAME: &str = "main.lua";

/// A request produced by the editor UI, applied by the editor system.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    /// Empty the editor buffer (interpreter globals untouched).
    Clear,
    /// Write the buffer to `scripts/main.lua` under the asset root.
    Save,
    /// Replace the buffer with a script file's contents.
    LoadFile(PathBuf),
    /// Execute the buffer as top-level code in the live interpreter.
    RunBuffer,
    /// Execute a script file in the live interpreter.
    RunFile(PathBuf),
    /// Remove a sprite by index (shift-erase) and release its texture.
    DeleteSprite(usize),
    /// Point the asset root somewhere else; nothing is reloaded.
    SetProjectRoot(PathBuf),
}

/// Editor buffer plus pending actions.
#[derive(Resource, Debug, Default)]
pub struct ScriptEditor {
    pub text: String,
    actions: Vec<EditorAction>,
}

impl ScriptEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_action(&mut self, action: EditorAction) {
        self.actions.push(action);
    }

    /// Takes the queued actions in submission order.
    pub fn take_actions(&mut self) -> Vec<EditorAction> {
        std::mem::take(&mut self.actions)
    }

    pub fn has_pending_actions(&self) -> bool {
        !self.actions.is_empty()
    }

    /// Writes the buffer to the given path.
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, &self.text)
    }

    /// Replaces the buffer with a file's contents.
    pub fn load_from(&mut self, path: &Path) -> io::Result<()> {
        self.text = std::fs::read_to_string(path)?;
        Ok(())
    }

    /// Lists the `*.lua` files in a scripts folder, sorted by file name.
    /// A missing folder is just an empty listing.
    pub fn list_scripts(scripts_dir: &Path) -> Vec<PathBuf> {
        let mut scripts: Vec<PathBuf> = match std::fs::read_dir(scripts_dir) {
            Ok(entries) => entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| {
                    path.is_file() && path.extension().is_some_and(|ext| ext == "lua")
                })
                .collect(),
            Err(_) => Vec::new(),
        };
        scripts.sort();
        scripts
    }
}
