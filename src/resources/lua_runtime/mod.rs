//! Lua scripting runtime.
//!
//! This module is the single translation layer between native engine state
//! and the embedded Lua interpreter. It owns the `mlua::Lua` instance,
//! registers every engine-exposed function into the Lua global namespace,
//! and drives the per-frame `Update` hook and `MoveCoroutine` coroutine.
//!
//! The module is split into focused submodules:
//!
//! - [`context`] - shared store handles visible to native-function closures
//! - [`bindings`] - the native functions and their parameter descriptors
//! - [`coroutine`] - the per-tick coroutine resume state machine
//! - [`runtime`] - the [`ScriptRuntime`] owner and frame dispatch
//!
//! # Calling convention
//!
//! Every native takes positional arguments with explicit coercion. A call
//! with the wrong arity or argument types raises a regular Lua error the
//! script can `pcall`. A call that is well-typed but semantically invalid
//! (an out-of-range sprite or animation index, a texture that fails to
//! decode) never raises; it returns that function's sentinel value instead
//! (`false`, `-1`, an empty table, or `nil`), so scripts branch on return
//! values without needing error handling:
//!
//! ```lua
//! if LoadTexture("textures/ball.png", 100, 100, 64, 64) then
//!     local hit = FindCollision(0)
//!     if hit >= 0 then
//!         ResolveCollision(0, hit)
//!     end
//! end
//! ```

mod bindings;
mod context;
mod coroutine;
mod runtime;

pub use bindings::{FnSpec, ParamSpec};
pub use context::EngineCtx;
pub use coroutine::ResumeOutcome;
pub use runtime::{FRAME_COROUTINE, ScriptRuntime, UPDATE_HOOK};
