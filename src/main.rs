//! QEngine main entry point.
//!
//! A minimal 2D sprite engine written in Rust using:
//! - **raylib** for windowing, graphics and input
//! - **bevy_ecs** for world state and the frame schedule
//! - **mlua + LuaJIT** for game logic scripting
//!
//! Scripts drive the scene through global native functions (`LoadTexture`,
//! `MoveTexture`, `CheckCollision`, ...); the engine calls the script's
//! `Update(dt)` every frame and resumes the `MoveCoroutine` coroutine once
//! per frame.
//!
//! # Main Loop
//!
//! 1. Load `config.ini`, open the raylib window, build the shared stores
//!    and the Lua runtime
//! 2. Auto-run `<assets>/scripts/main.lua` when present
//! 3. Each frame: snapshot input, dispatch scripts, apply editor actions,
//!    render the sprite list
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- [ASSET_FOLDER]
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod collision;
mod luarc_generator;
mod resources;
mod stub_generator;
mod systems;

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;

use crate::resources::assetfolder::AssetFolder;
use crate::resources::debugmode::DebugMode;
use crate::resources::gameconfig::GameConfig;
use crate::resources::lua_runtime::{EngineCtx, ScriptRuntime};
use crate::resources::scripteditor::ScriptEditor;
use crate::resources::worldtime::WorldTime;
use crate::systems::editor::{editor_shortcuts, process_editor_actions};
use crate::systems::input::update_input_state;
use crate::systems::render::render_system;
use crate::systems::script::script_frame_system;
use crate::systems::time::update_world_time;

/// QEngine 2D
#[derive(Parser)]
#[command(version, about = "QEngine - a minimal Lua-scripted 2D sprite engine")]
struct Cli {
    /// Project asset folder (overrides the configured one).
    asset_folder: Option<PathBuf>,

    /// Generate Lua LSP stubs for the scripting ABI and exit.
    /// Optionally provide a path (default: assets/scripts/qengine.lua).
    #[arg(long, value_name = "PATH")]
    create_lua_stubs: Option<Option<PathBuf>>,

    /// Generate .luarc.json for the Lua Language Server and exit.
    /// Optionally provide a path (default: assets/scripts/.luarc.json).
    #[arg(long, value_name = "PATH")]
    create_luarc: Option<Option<PathBuf>>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Early-exit: generate Lua stubs and quit (no window needed)
    if let Some(maybe_path) = cli.create_lua_stubs {
        let path = maybe_path.unwrap_or_else(|| PathBuf::from("assets/scripts/qengine.lua"));
        let runtime = ScriptRuntime::new(EngineCtx::default())
            .expect("Failed to create script runtime for stub generation");
        let content = stub_generator::generate_stubs(&runtime);
        if let Err(e) = stub_generator::write_stubs(&path, &content) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Lua stubs written to {}", path.display());
        return;
    }

    // Early-exit: generate .luarc.json and quit (no window needed)
    if let Some(maybe_path) = cli.create_luarc {
        let path = maybe_path.unwrap_or_else(|| PathBuf::from("assets/scripts/.luarc.json"));
        let runtime = ScriptRuntime::new(EngineCtx::default())
            .expect("Failed to create script runtime for .luarc.json generation");
        match luarc_generator::generate_luarc(&runtime, "qengine.lua") {
            Ok(content) => {
                if let Err(e) = luarc_generator::write_luarc(&path, &content) {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
                println!(".luarc.json written to {}", path.display());
            }
            Err(e) => {
                eprintln!("Error generating .luarc.json: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    // --------------- Configuration ---------------
    let mut config = GameConfig::new();
    config.load_from_file().ok(); // ignore errors, use defaults
    if let Some(folder) = cli.asset_folder {
        config.asset_folder = folder;
    }
    log::info!("asset folder: {}", config.asset_folder.display());

    // --------------- Raylib window ---------------
    let (mut rl, thread) = raylib::init()
        .size(config.window_width as i32, config.window_height as i32)
        .resizable()
        .title("QEngine - 2D Game Engine")
        .build();
    rl.set_target_fps(config.target_fps);
    // Disable ESC to exit
    rl.set_exit_key(None);

    // --------------- Shared stores + Lua runtime ---------------
    let ctx = EngineCtx::new(AssetFolder::new(config.asset_folder.clone()));
    let runtime = ScriptRuntime::new(ctx.clone()).expect("Failed to create script runtime");

    // Auto-run the project's entry script when present.
    let main_script = ctx.assets.borrow().scripts_dir().join("main.lua");
    if main_script.is_file() {
        if let Err(e) = runtime.run_script(&main_script) {
            log::error!(target: "lua", "failed to run {}: {}", main_script.display(), e);
        }
    } else {
        log::info!("no entry script at {}", main_script.display());
    }

    // --------------- World + schedule ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(DebugMode::default());
    world.insert_resource(ScriptEditor::new());
    world.insert_non_send_resource(ctx.scene.clone());
    world.insert_non_send_resource(ctx.textures.clone());
    world.insert_non_send_resource(ctx.animations.clone());
    world.insert_non_send_resource(ctx.input.clone());
    world.insert_non_send_resource(ctx.assets.clone());
    world.insert_non_send_resource(runtime);
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    let mut update = Schedule::default();
    update.add_systems(
        (
            update_input_state,
            editor_shortcuts,
            script_frame_system,
            process_editor_actions,
            render_system,
        )
            .chain(),
    );
    update
        .initialize(&mut world)
        .expect("Failed to initialize schedule");

    log::info!("all systems initialized, entering main loop");

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers();
    }

    // --------------- Shutdown ---------------
    // Release every texture still referenced by animations and sprites so
    // GPU memory goes with the window, then let the runtime drop the
    // interpreter.
    ctx.animations.borrow_mut().clear(&mut ctx.textures.borrow_mut());
    for sprite in ctx.scene.borrow_mut().drain_all() {
        ctx.textures.borrow_mut().release(sprite.texture);
    }
    log::info!("engine shut down");
}
