//! Long-lived engine state.
//!
//! This module groups the data injected into the world and shared with the
//! scripting bridge. The stores the bridge mutates (scene, textures,
//! animations, input, asset root) are `Rc<RefCell<...>>` non-send handles;
//! the rest are plain resources.
//!
//! Overview
//! - `animationstore` – frame-list animations addressed by index
//! - `assetfolder` – mutable project root for relative path resolution
//! - `debugmode` – toggle for the debug overlay
//! - `gameconfig` – INI-backed window and project settings
//! - `input` – per-frame keyboard snapshot shared with scripts
//! - `lua_runtime` – the Lua interpreter and the scripting ABI
//! - `scenestore` – the canonical index-addressed sprite list
//! - `scripteditor` – editor buffer and queued editor actions
//! - `texturestore` – refcounted texture handles, decode + lazy GPU upload
//! - `worldtime` – simulation time and delta
pub mod animationstore;
pub mod assetfolder;
pub mod debugmode;
pub mod gameconfig;
pub mod input;
pub mod lua_runtime;
pub mod scenestore;
pub mod scripteditor;
pub mod texturestore;
pub mod worldtime;
