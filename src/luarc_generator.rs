//! Generator for `.luarc.json` — Lua Language Server configuration.
//!
//! Produces a `.luarc.json` that declares every engine global (the native
//! functions plus the `Update`/`MoveCoroutine` hooks) and points the
//! language server at the generated stubs file.

use std::path::Path;

use crate::resources::lua_runtime::{FRAME_COROUTINE, ScriptRuntime, UPDATE_HOOK};

/// Generate `.luarc.json` content from the runtime's registered natives.
pub fn generate_luarc(runtime: &ScriptRuntime, stubs_filename: &str) -> Result<String, String> {
    let mut globals: Vec<&str> = runtime.native_specs().iter().map(|spec| spec.name).collect();
    globals.push(UPDATE_HOOK);
    globals.push(FRAME_COROUTINE);

    let content = serde_json::json!({
        "$schema": "https://raw.githubusercontent.com/LuaLS/vscode-lua/master/setting/schema.json",
        "runtime.version": "LuaJIT",
        "diagnostics.globals": globals,
        "workspace.library": [stubs_filename],
        "completion.autoRequire": false
    });

    serde_json::to_string_pretty(&content)
        .map_err(|e| format!("Failed to serialize .luarc.json: {e}"))
}

/// Write the generated `.luarc.json` content to a file.
pub fn write_luarc(path: &Path, content: &str) -> Result<(), String> {
    std::fs::write(path, content)
        .map_err(|e| format!("Failed to write {}: {e}", path.display()))
}
