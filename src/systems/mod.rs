//! Engine systems.
//!
//! The per-frame work, run in a chained schedule so ordering is explicit:
//! input snapshot first, then script dispatch, then editor actions, then
//! rendering.
//!
//! Submodules overview
//! - [`input`] – poll the keyboard into the snapshot scripts read
//! - [`script`] – drive the script `Update` hook and frame coroutine
//! - [`editor`] – apply queued editor actions and debug shortcuts
//! - [`render`] – upload pending textures and draw the scene
//! - [`time`] – advance the simulation clock

pub mod editor;
pub mod input;
pub mod render;
pub mod script;
pub mod time;
