//! Interpreter ownership and per-frame dispatch.

use std::path::Path;

use log::error;
use mlua::prelude::*;

use super::bindings::{self, FnSpec};
use super::context::EngineCtx;
use super::coroutine::{self, ResumeOutcome};

/// Global looked up each frame and called with the delta time.
pub const UPDATE_HOOK: &str = "Update";
/// Global looked up each frame and resumed when it holds a coroutine.
pub const FRAME_COROUTINE: &str = "MoveCoroutine";

/// Owner of the Lua interpreter.
///
/// One instance per engine run. Creating it loads the Lua standard library,
/// attaches the shared [`EngineCtx`] as app-data and registers the whole
/// scripting ABI into the global namespace, exactly once. Dropping it
/// destroys the interpreter and with it every script-held reference.
///
/// Loading another script later mutates globals in place; there is no
/// re-initialization. This is a `NonSend` resource: the Lua state is not
/// thread-safe and lives on the main thread with everything else.
pub struct ScriptRuntime {
    lua: Lua,
    ctx: EngineCtx,
    specs: Vec<FnSpec>,
}

impl ScriptRuntime {
    /// Creates the interpreter and registers the engine ABI.
    ///
    /// # Errors
    ///
    /// Returns an error if Lua initialization or ABI registration fails.
    pub fn new(ctx: EngineCtx) -> LuaResult<Self> {
        let lua = Lua::new();

        // Let `require` find project scripts.
        let scripts_dir = ctx.assets.borrow().scripts_dir();
        let package: LuaTable = lua.globals().get("package")?;
        let path: String = package.get("path")?;
        package.set(
            "path",
            format!("{}/?.lua;{}", scripts_dir.display(), path),
        )?;

        lua.set_app_data(ctx.clone());
        let specs = bindings::register_native_functions(&lua)?;

        Ok(Self { lua, ctx, specs })
    }

    /// The shared store handles this runtime reads and writes.
    pub fn ctx(&self) -> &EngineCtx {
        &self.ctx
    }

    /// Descriptors of every registered native, in registration order.
    pub fn native_specs(&self) -> &[FnSpec] {
        &self.specs
    }

    /// Returns a reference to the underlying Lua state.
    pub fn lua(&self) -> &Lua {
        &self.lua
    }

    /// Loads and executes a Lua script from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the script has
    /// syntax/runtime errors.
    pub fn run_script(&self, path: &Path) -> LuaResult<()> {
        let script = std::fs::read_to_string(path)
            .map_err(|e| LuaError::ExternalError(std::sync::Arc::new(e)))?;
        self.lua
            .load(&script)
            .set_name(path.to_string_lossy())
            .exec()
    }

    /// Compiles and executes source text as top-level code in the live
    /// global namespace (the editor's Run Script action). Globals defined
    /// earlier — including `Update` and `MoveCoroutine` — can be redefined
    /// or shadowed freely.
    ///
    /// # Errors
    ///
    /// Returns an error on syntax or runtime errors in the source.
    pub fn exec_source(&self, source: &str) -> LuaResult<()> {
        self.lua.load(source).set_name("editor").exec()
    }

    /// One frame of script execution: call the `Update` hook, then resume
    /// the frame coroutine. Script errors are logged and consumed; the
    /// frame always continues.
    pub fn dispatch_frame(&self, delta_time: f32) {
        self.call_update_hook(delta_time);
        self.resume_frame_coroutine();
    }

    fn call_update_hook(&self, delta_time: f32) {
        let Ok(value) = self.lua.globals().get::<LuaValue>(UPDATE_HOOK) else {
            return;
        };
        if let LuaValue::Function(update) = value {
            if let Err(e) = update.call::<()>(delta_time) {
                error!(target: "lua", "{} error: {}", UPDATE_HOOK, e);
            }
        }
    }

    fn resume_frame_coroutine(&self) {
        let Ok(value) = self.lua.globals().get::<LuaValue>(FRAME_COROUTINE) else {
            return;
        };
        if let ResumeOutcome::Faulted(e) = coroutine::resume_once(&value) {
            error!(target: "lua", "{} error: {}", FRAME_COROUTINE, e);
        }
    }
}
