//! Editor action processing.
//!
//! UI code (or the debug shortcuts below) queues [`EditorAction`]s on the
//! [`ScriptEditor`] resource; [`process_editor_actions`] drains the queue
//! once per frame, after script dispatch. Sprite deletion therefore never
//! happens while a script or collision scan is iterating the sprite list.

use std::cell::RefCell;
use std::rc::Rc;

use bevy_ecs::prelude::*;
use log::{error, info, warn};
use raylib::prelude::*;

use crate::resources::assetfolder::AssetFolder;
use crate::resources::debugmode::DebugMode;
use crate::resources::lua_runtime::ScriptRuntime;
use crate::resources::scenestore::SceneStore;
use crate::resources::scripteditor::{DEFAULT_SCRIPT_NAME, EditorAction, ScriptEditor};
use crate::resources::texturestore::TextureStore;

/// Apply every queued editor action, in submission order.
pub fn process_editor_actions(
    mut editor: ResMut<ScriptEditor>,
    runtime: NonSend<ScriptRuntime>,
    scene: NonSend<Rc<RefCell<SceneStore>>>,
    textures: NonSend<Rc<RefCell<TextureStore>>>,
    assets: NonSend<Rc<RefCell<AssetFolder>>>,
) {
    for action in editor.take_actions() {
        match action {
            EditorAction::Clear => {
                // Buffer only. Interpreter globals stay as the last run
                // left them.
                editor.text.clear();
            }
            EditorAction::Save => {
                let path = assets
                    .borrow()
                    .scripts_dir()
                    .join(DEFAULT_SCRIPT_NAME);
                match editor.save_to(&path) {
                    Ok(()) => info!("saved script to {}", path.display()),
                    Err(e) => error!("failed to save script {}: {}", path.display(), e),
                }
            }
            EditorAction::LoadFile(path) => match editor.load_from(&path) {
                Ok(()) => info!("loaded script {}", path.display()),
                Err(e) => error!("failed to open script {}: {}", path.display(), e),
            },
            EditorAction::RunBuffer => {
                if let Err(e) = runtime.exec_source(&editor.text) {
                    error!(target: "lua", "{}", e);
                }
            }
            EditorAction::RunFile(path) => {
                if let Err(e) = runtime.run_script(&path) {
                    error!(target: "lua", "{}", e);
                }
            }
            EditorAction::DeleteSprite(index) => {
                let removed = scene.borrow_mut().remove(index);
                match removed {
                    Some(sprite) => textures.borrow_mut().release(sprite.texture),
                    None => warn!("delete ignored: no sprite at index {}", index),
                }
            }
            EditorAction::SetProjectRoot(root) => {
                info!("project root set to {}", root.display());
                assets.borrow_mut().set_root(root);
            }
        }
    }
}

/// Keyboard fallbacks for the editor actions while no UI panel is wired:
/// F5 runs the buffer, F2 saves it, F11 toggles the debug overlay.
pub fn editor_shortcuts(
    rl: NonSend<raylib::RaylibHandle>,
    mut editor: ResMut<ScriptEditor>,
    mut debug: ResMut<DebugMode>,
) {
    if rl.is_key_pressed(KeyboardKey::KEY_F5) {
        editor.push_action(EditorAction::RunBuffer);
    }
    if rl.is_key_pressed(KeyboardKey::KEY_F2) {
        editor.push_action(EditorAction::Save);
    }
    if rl.is_key_pressed(KeyboardKey::KEY_F11) {
        debug.enabled = !debug.enabled;
    }
}
