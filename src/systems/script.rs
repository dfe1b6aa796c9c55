//! Per-frame script dispatch.
//!
//! This is the interpreter lifecycle manager's tick: once per frame, after
//! input and before rendering, hand the delta to the script runtime. The
//! runtime calls the script's `Update` hook and resumes `MoveCoroutine`;
//! script errors are logged inside and never reach this system.

use bevy_ecs::prelude::*;

use crate::resources::lua_runtime::ScriptRuntime;
use crate::resources::worldtime::WorldTime;

pub fn script_frame_system(runtime: NonSend<ScriptRuntime>, time: Res<WorldTime>) {
    runtime.dispatch_frame(time.delta);
}
