//! Lua stub generator for EmmyLua / lua-language-server.
//!
//! Emits a deterministic stub file with `---@param` / `---@return`
//! annotations for every native function the bridge registers, straight
//! from the [`FnSpec`] descriptors, so the stubs always match the ABI the
//! running engine actually exposes.

use std::fmt::Write as FmtWrite;
use std::path::Path;

use crate::resources::lua_runtime::{FRAME_COROUTINE, ScriptRuntime, UPDATE_HOOK};

/// Generate the stub file content from the runtime's registered natives.
pub fn generate_stubs(runtime: &ScriptRuntime) -> String {
    let mut out = String::new();
    out.push_str("---@meta\n\n");
    out.push_str("-- QEngine scripting API.\n");
    out.push_str("-- Generated with `qengine --create-lua-stubs`; do not edit by hand.\n");
    out.push_str("--\n");
    let _ = writeln!(
        out,
        "-- Define a global `{}(dt)` function and it is called every frame;",
        UPDATE_HOOK
    );
    let _ = writeln!(
        out,
        "-- assign a coroutine to the global `{}` and it is resumed once per frame.",
        FRAME_COROUTINE
    );
    out.push('\n');

    for spec in runtime.native_specs() {
        let _ = writeln!(out, "---{}", spec.description);
        for param in spec.params {
            let (name, ty) = match param.ty.strip_suffix('?') {
                Some(base) => (format!("{}?", param.name), base),
                None => (param.name.to_string(), param.ty),
            };
            let _ = writeln!(out, "---@param {} {}", name, ty);
        }
        if let Some(returns) = spec.returns {
            let _ = writeln!(out, "---@return {}", returns);
        }
        let names: Vec<&str> = spec.params.iter().map(|p| p.name).collect();
        let _ = writeln!(out, "function {}({}) end\n", spec.name, names.join(", "));
    }

    out
}

/// Write the generated stub content to a file.
pub fn write_stubs(path: &Path, content: &str) -> Result<(), String> {
    std::fs::write(path, content)
        .map_err(|e| format!("Failed to write {}: {e}", path.display()))
}
