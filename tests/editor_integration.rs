//! Editor flow integration tests: save/load/list, running the buffer, and
//! sprite deletion through the action queue.

use std::cell::RefCell;
use std::rc::Rc;

use bevy_ecs::prelude::*;
use raylib::prelude::{Color, Image};
use tempfile::TempDir;

use qengine::resources::assetfolder::AssetFolder;
use qengine::resources::lua_runtime::{EngineCtx, ScriptRuntime};
use qengine::resources::scenestore::SceneStore;
use qengine::resources::scripteditor::{EditorAction, ScriptEditor};
use qengine::resources::texturestore::TextureStore;
use qengine::systems::editor::process_editor_actions;

fn make_project() -> (TempDir, EngineCtx, ScriptRuntime) {
    let dir = TempDir::new().expect("temp project dir");
    std::fs::create_dir_all(dir.path().join("textures")).unwrap();
    let image = Image::gen_image_color(4, 4, Color::RED);
    assert!(image.export_image(dir.path().join("textures/dot.png").to_str().unwrap()));

    let ctx = EngineCtx::new(AssetFolder::new(dir.path()));
    let runtime = ScriptRuntime::new(ctx.clone()).expect("script runtime");
    (dir, ctx, runtime)
}

fn editor_world(ctx: &EngineCtx, runtime: ScriptRuntime) -> (World, Schedule) {
    let mut world = World::new();
    world.insert_resource(ScriptEditor::new());
    world.insert_non_send_resource(ctx.scene.clone());
    world.insert_non_send_resource(ctx.textures.clone());
    world.insert_non_send_resource(ctx.assets.clone());
    world.insert_non_send_resource(runtime);

    let mut schedule = Schedule::default();
    schedule.add_systems(process_editor_actions);
    (world, schedule)
}

#[test]
fn save_list_load_round_trip() {
    let (dir, ctx, runtime) = make_project();
    let (mut world, mut schedule) = editor_world(&ctx, runtime);

    {
        let mut editor = world.resource_mut::<ScriptEditor>();
        editor.text = "-- my script\n".to_string();
        editor.push_action(EditorAction::Save);
    }
    schedule.run(&mut world);

    let saved = dir.path().join("scripts").join("main.lua");
    assert_eq!(std::fs::read_to_string(&saved).unwrap(), "-- my script\n");

    // The scripts folder listing picks up .lua files only.
    std::fs::write(dir.path().join("scripts").join("notes.txt"), "x").unwrap();
    std::fs::write(dir.path().join("scripts").join("extra.lua"), "y = 1").unwrap();
    let scripts = ScriptEditor::list_scripts(&ctx.assets.borrow().scripts_dir());
    let names: Vec<String> = scripts
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["extra.lua", "main.lua"]);

    {
        let mut editor = world.resource_mut::<ScriptEditor>();
        editor.push_action(EditorAction::LoadFile(scripts[0].clone()));
    }
    schedule.run(&mut world);
    assert_eq!(world.resource::<ScriptEditor>().text, "y = 1");
}

#[test]
fn clear_empties_the_buffer_but_not_the_interpreter() {
    let (_dir, ctx, runtime) = make_project();
    runtime.exec_source("persistent = 7").unwrap();
    let (mut world, mut schedule) = editor_world(&ctx, runtime);

    {
        let mut editor = world.resource_mut::<ScriptEditor>();
        editor.text = "persistent = 0".to_string();
        editor.push_action(EditorAction::Clear);
    }
    schedule.run(&mut world);

    assert!(world.resource::<ScriptEditor>().text.is_empty());
    let runtime = world.non_send_resource::<ScriptRuntime>();
    let persistent: i64 = runtime.lua().globals().get("persistent").unwrap();
    assert_eq!(persistent, 7);
}

#[test]
fn run_buffer_executes_in_the_shared_namespace() {
    let (_dir, ctx, runtime) = make_project();
    runtime.exec_source("base = 10").unwrap();
    let (mut world, mut schedule) = editor_world(&ctx, runtime);

    {
        let mut editor = world.resource_mut::<ScriptEditor>();
        editor.text = "derived = base + 5".to_string();
        editor.push_action(EditorAction::RunBuffer);
    }
    schedule.run(&mut world);

    let runtime = world.non_send_resource::<ScriptRuntime>();
    let derived: i64 = runtime.lua().globals().get("derived").unwrap();
    assert_eq!(derived, 15);
}

#[test]
fn run_buffer_errors_are_logged_not_fatal() {
    let (_dir, ctx, runtime) = make_project();
    let (mut world, mut schedule) = editor_world(&ctx, runtime);

    {
        let mut editor = world.resource_mut::<ScriptEditor>();
        editor.text = "this is not lua(".to_string();
        editor.push_action(EditorAction::RunBuffer);
        editor.push_action(EditorAction::RunFile("/no/such/file.lua".into()));
    }
    schedule.run(&mut world);
}

#[test]
fn delete_sprite_shifts_indices_and_releases_the_texture() {
    let (_dir, ctx, runtime) = make_project();
    runtime
        .exec_source(
            r#"
            LoadTexture("textures/dot.png", 1, 0, 8, 8)
            LoadTexture("textures/dot.png", 2, 0, 8, 8)
            "#,
        )
        .unwrap();
    let first_texture = ctx.scene.borrow().get(0).unwrap().texture;
    let (mut world, mut schedule) = editor_world(&ctx, runtime);

    {
        let mut editor = world.resource_mut::<ScriptEditor>();
        editor.push_action(EditorAction::DeleteSprite(0));
        // Stale second delete: after the shift there is no index 1 anymore.
        editor.push_action(EditorAction::DeleteSprite(1));
    }
    schedule.run(&mut world);

    let scene = world.non_send_resource::<Rc<RefCell<SceneStore>>>().borrow();
    assert_eq!(scene.len(), 1);
    assert_eq!(scene.get(0).unwrap().pos.x, 2.0);

    let textures = world.non_send_resource::<Rc<RefCell<TextureStore>>>().borrow();
    assert!(!textures.contains(first_texture));
    assert!(textures.contains(scene.get(0).unwrap().texture));
}

#[test]
fn set_project_root_redirects_future_loads_only() {
    let (dir, ctx, runtime) = make_project();
    runtime
        .exec_source(r#"first = LoadTexture("textures/dot.png")"#)
        .unwrap();
    let (mut world, mut schedule) = editor_world(&ctx, runtime);

    let other = dir.path().join("elsewhere");
    std::fs::create_dir_all(&other).unwrap();
    {
        let mut editor = world.resource_mut::<ScriptEditor>();
        editor.push_action(EditorAction::SetProjectRoot(other.clone()));
    }
    schedule.run(&mut world);

    assert_eq!(ctx.assets.borrow().root(), other.as_path());
    // The sprite loaded under the old root is untouched.
    assert_eq!(ctx.scene.borrow().len(), 1);

    // New loads resolve against the new root, where the texture is absent.
    let runtime = world.non_send_resource::<ScriptRuntime>();
    runtime
        .exec_source(r#"second = LoadTexture("textures/dot.png")"#)
        .unwrap();
    let second: bool = runtime.lua().globals().get("second").unwrap();
    assert!(!second);
}
