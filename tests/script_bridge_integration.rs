//! Integration tests for the scripting bridge: the sentinel-vs-error
//! calling contract, per-frame dispatch, and the coroutine lifecycle.

use mlua::Value;
use raylib::prelude::{Color, Image};
use tempfile::TempDir;

use qengine::resources::assetfolder::AssetFolder;
use qengine::resources::lua_runtime::{EngineCtx, ScriptRuntime};
use qengine::resources::texturestore::TextureId;

/// A project folder containing one decodable texture at
/// `textures/block.png`, plus a runtime rooted at it.
fn project_runtime() -> (TempDir, ScriptRuntime) {
    let dir = TempDir::new().expect("temp project dir");
    std::fs::create_dir_all(dir.path().join("textures")).unwrap();
    let image = Image::gen_image_color(8, 8, Color::BLUE);
    assert!(image.export_image(dir.path().join("textures/block.png").to_str().unwrap()));

    let ctx = EngineCtx::new(AssetFolder::new(dir.path()));
    let runtime = ScriptRuntime::new(ctx).expect("script runtime");
    (dir, runtime)
}

fn get_bool(runtime: &ScriptRuntime, name: &str) -> bool {
    runtime.lua().globals().get(name).unwrap()
}

fn get_i64(runtime: &ScriptRuntime, name: &str) -> i64 {
    runtime.lua().globals().get(name).unwrap()
}

fn get_f64(runtime: &ScriptRuntime, name: &str) -> f64 {
    runtime.lua().globals().get(name).unwrap()
}

// ---------- sprite API ----------

#[test]
fn load_texture_appends_a_sprite() {
    let (_dir, runtime) = project_runtime();

    runtime
        .exec_source(r#"ok = LoadTexture("textures/block.png", 10, 20, 32, 48)"#)
        .unwrap();

    assert!(get_bool(&runtime, "ok"));
    let scene = runtime.ctx().scene.borrow();
    assert_eq!(scene.len(), 1);
    let sprite = scene.get(0).unwrap();
    assert_eq!((sprite.pos.x, sprite.pos.y), (10.0, 20.0));
    assert_eq!((sprite.width, sprite.height), (32.0, 48.0));
    assert!(runtime.ctx().textures.borrow().contains(sprite.texture));
}

#[test]
fn load_texture_defaults_position_and_size() {
    let (_dir, runtime) = project_runtime();
    runtime
        .exec_source(r#"ok = LoadTexture("textures/block.png")"#)
        .unwrap();
    assert!(get_bool(&runtime, "ok"));
    let scene = runtime.ctx().scene.borrow();
    let sprite = scene.get(0).unwrap();
    assert_eq!((sprite.pos.x, sprite.pos.y), (0.0, 0.0));
    assert_eq!((sprite.width, sprite.height), (128.0, 128.0));
}

#[test]
fn load_texture_missing_file_is_a_false_sentinel() {
    let (_dir, runtime) = project_runtime();
    runtime
        .exec_source(r#"ok = LoadTexture("textures/nope.png")"#)
        .unwrap();
    assert!(!get_bool(&runtime, "ok"));
    assert!(runtime.ctx().scene.borrow().is_empty());
}

#[test]
fn sprite_mutators_return_false_on_stale_indices() {
    let (_dir, runtime) = project_runtime();
    runtime
        .exec_source(
            r#"
            moved = MoveTexture(0, 1, 1)
            resized = SetSpriteSize(0, 1, 1)
            negative = MoveTexture(-1, 1, 1)
            changed = ChangeTexture(3, "textures/block.png")
            "#,
        )
        .unwrap();
    assert!(!get_bool(&runtime, "moved"));
    assert!(!get_bool(&runtime, "resized"));
    assert!(!get_bool(&runtime, "negative"));
    assert!(!get_bool(&runtime, "changed"));
}

#[test]
fn wrong_argument_types_raise_catchable_errors() {
    let (_dir, runtime) = project_runtime();

    // From the host side: a malformed call fails the whole chunk.
    assert!(runtime.exec_source("MoveTexture({}, 1, 2)").is_err());
    assert!(runtime.exec_source("LoadTexture(nil)").is_err());

    // From the script side: pcall recovers, distinct from the sentinel path.
    runtime
        .exec_source(
            r#"
            ok_arity = pcall(function() return CheckCollision(0) end)
            ok_type = pcall(function() return SetSpriteSize({}, 1, 1) end)
            sentinel = CheckCollision(0, 1)
            "#,
        )
        .unwrap();
    assert!(!get_bool(&runtime, "ok_arity"));
    assert!(!get_bool(&runtime, "ok_type"));
    assert!(!get_bool(&runtime, "sentinel"));
}

#[test]
fn get_sprite_position_returns_pair_or_nil() {
    let (_dir, runtime) = project_runtime();
    runtime
        .exec_source(
            r#"
            LoadTexture("textures/block.png", 10, 20)
            local p = GetSpritePosition(0)
            px, py = p[1], p[2]
            missing = GetSpritePosition(7)
            "#,
        )
        .unwrap();
    assert_eq!(get_f64(&runtime, "px"), 10.0);
    assert_eq!(get_f64(&runtime, "py"), 20.0);
    assert_eq!(
        runtime.lua().globals().get::<Value>("missing").unwrap(),
        Value::Nil
    );
}

#[test]
fn change_texture_releases_the_replaced_handle() {
    let (_dir, runtime) = project_runtime();
    runtime
        .exec_source(r#"LoadTexture("textures/block.png")"#)
        .unwrap();
    let old = runtime.ctx().scene.borrow().get(0).unwrap().texture;

    runtime
        .exec_source(r#"ok = ChangeTexture(0, "textures/block.png")"#)
        .unwrap();
    assert!(get_bool(&runtime, "ok"));

    let ctx = runtime.ctx();
    let new = ctx.scene.borrow().get(0).unwrap().texture;
    assert_ne!(old, new);
    assert!(!ctx.textures.borrow().contains(old));
    assert!(ctx.textures.borrow().contains(new));
}

#[test]
fn set_sprite_texture_by_handle() {
    let (_dir, runtime) = project_runtime();
    runtime
        .exec_source(
            r#"
            LoadTexture("textures/block.png")
            anim = CreateAnimation(true)
            AddAnimationFrame(anim, "textures/block.png", 0.5)
            handle = GetAnimationTexture(anim)
            ok = SetSpriteTexture(0, handle)
            unknown = SetSpriteTexture(0, 9999)
            bad_sprite = SetSpriteTexture(42, handle)
            "#,
        )
        .unwrap();
    assert!(get_bool(&runtime, "ok"));
    assert!(!get_bool(&runtime, "unknown"));
    assert!(!get_bool(&runtime, "bad_sprite"));

    let handle = get_i64(&runtime, "handle") as u32;
    let sprite_texture = runtime.ctx().scene.borrow().get(0).unwrap().texture;
    assert_eq!(sprite_texture, TextureId(handle));
}

// ---------- input ----------

#[test]
fn is_key_pressed_reads_the_frame_snapshot() {
    let (_dir, runtime) = project_runtime();
    runtime.ctx().input.borrow_mut().set_down(32);

    runtime
        .exec_source("space = IsKeyPressed(32) a = IsKeyPressed(65)")
        .unwrap();
    assert!(get_bool(&runtime, "space"));
    assert!(!get_bool(&runtime, "a"));
}

// ---------- collision ----------

/// Three sprites: 0 and 1 overlap, 2 overlaps 1 only, 3 is far away.
fn collision_scene(runtime: &ScriptRuntime) {
    runtime
        .exec_source(
            r#"
            LoadTexture("textures/block.png", 0, 0, 10, 10)
            LoadTexture("textures/block.png", 5, 0, 10, 10)
            LoadTexture("textures/block.png", 14, 0, 10, 10)
            LoadTexture("textures/block.png", 500, 500, 10, 10)
            "#,
        )
        .unwrap();
}

#[test]
fn collision_queries_from_scripts() {
    let (_dir, runtime) = project_runtime();
    collision_scene(&runtime);

    runtime
        .exec_source(
            r#"
            ab = CheckCollision(0, 1)
            ba = CheckCollision(1, 0)
            far = CheckCollision(0, 3)
            bad = CheckCollision(0, 99)
            first = FindCollision(1)
            lonely = FindCollision(3)
            invalid = FindCollision(50)
            "#,
        )
        .unwrap();

    assert!(get_bool(&runtime, "ab"));
    assert!(get_bool(&runtime, "ba"));
    assert!(!get_bool(&runtime, "far"));
    assert!(!get_bool(&runtime, "bad"));
    assert_eq!(get_i64(&runtime, "first"), 0);
    assert_eq!(get_i64(&runtime, "lonely"), -1);
    assert_eq!(get_i64(&runtime, "invalid"), -1);
}

#[test]
fn find_all_collisions_is_ascending_and_skips_self() {
    let (_dir, runtime) = project_runtime();
    collision_scene(&runtime);

    runtime
        .exec_source(
            r#"
            local hits = FindAllCollisions(1)
            n = #hits
            h1, h2 = hits[1], hits[2]
            empty = #FindAllCollisions(99)
            "#,
        )
        .unwrap();

    assert_eq!(get_i64(&runtime, "n"), 2);
    assert_eq!(get_i64(&runtime, "h1"), 0);
    assert_eq!(get_i64(&runtime, "h2"), 2);
    assert_eq!(get_i64(&runtime, "empty"), 0);
}

#[test]
fn point_in_sprite_is_edge_inclusive() {
    let (_dir, runtime) = project_runtime();
    collision_scene(&runtime);

    runtime
        .exec_source(
            r#"
            corner = PointInSprite(0, 0, 0)
            edge = PointInSprite(10, 5, 0)
            outside = PointInSprite(11, 5, 0)
            bad = PointInSprite(0, 0, 99)
            "#,
        )
        .unwrap();
    assert!(get_bool(&runtime, "corner"));
    assert!(get_bool(&runtime, "edge"));
    assert!(!get_bool(&runtime, "outside"));
    assert!(!get_bool(&runtime, "bad"));
}

#[test]
fn resolve_collision_separates_overlapping_sprites() {
    let (_dir, runtime) = project_runtime();
    runtime
        .exec_source(
            r#"
            LoadTexture("textures/block.png", 0, 0, 1, 1)
            LoadTexture("textures/block.png", 0.5, 0, 1, 1)
            resolved = ResolveCollision(0, 1)
            still = CheckCollision(0, 1)
            again = ResolveCollision(0, 1)
            bad = ResolveCollision(0, 42)
            "#,
        )
        .unwrap();

    assert!(get_bool(&runtime, "resolved"));
    assert!(!get_bool(&runtime, "still"));
    // Already separated, so the second resolve has nothing to do.
    assert!(!get_bool(&runtime, "again"));
    assert!(!get_bool(&runtime, "bad"));

    // The correction was split evenly between the two bodies.
    let scene = runtime.ctx().scene.borrow();
    assert_eq!(scene.get(0).unwrap().pos.x, -0.25);
    assert_eq!(scene.get(1).unwrap().pos.x, 0.75);
}

// ---------- animation ----------

#[test]
fn animation_lifecycle_from_scripts() {
    let (_dir, runtime) = project_runtime();
    runtime
        .exec_source(
            r#"
            anim = CreateAnimation(false)
            ok = AddAnimationFrame(anim, "textures/block.png", 1.0)
            PlayAnimation(anim)
            before = IsAnimationFinished(anim)
            UpdateAnimation(anim, 1.0)
            after = IsAnimationFinished(anim)
            tex = GetAnimationTexture(anim)
            "#,
        )
        .unwrap();

    assert_eq!(get_i64(&runtime, "anim"), 0);
    assert!(get_bool(&runtime, "ok"));
    assert!(!get_bool(&runtime, "before"));
    assert!(get_bool(&runtime, "after"));
    assert!(get_i64(&runtime, "tex") > 0);
}

#[test]
fn animation_sentinels_on_stale_indices() {
    let (_dir, runtime) = project_runtime();
    runtime
        .exec_source(
            r#"
            added = AddAnimationFrame(9, "textures/block.png", 1.0)
            missing_tex = AddAnimationFrame(CreateAnimation(true), "textures/nope.png", 1.0)
            finished = IsAnimationFinished(9)
            tex = GetAnimationTexture(9)
            -- the no-return operations must not raise either
            UpdateAnimation(9, 1.0)
            PlayAnimation(9)
            PauseAnimation(9)
            StopAnimation(9)
            ResetAnimation(9)
            "#,
        )
        .unwrap();
    assert!(!get_bool(&runtime, "added"));
    assert!(!get_bool(&runtime, "missing_tex"));
    assert!(get_bool(&runtime, "finished"));
    assert_eq!(get_i64(&runtime, "tex"), 0);
}

#[test]
fn set_sprite_animation_swaps_and_rebalances_references() {
    let (_dir, runtime) = project_runtime();
    runtime
        .exec_source(
            r#"
            LoadTexture("textures/block.png")
            anim = CreateAnimation(true)
            AddAnimationFrame(anim, "textures/block.png", 0.5)
            "#,
        )
        .unwrap();
    let old = runtime.ctx().scene.borrow().get(0).unwrap().texture;

    runtime
        .exec_source(
            r#"
            ok = SetSpriteAnimation(0, anim)
            empty_anim = SetSpriteAnimation(0, CreateAnimation(true))
            bad_sprite = SetSpriteAnimation(50, anim)
            "#,
        )
        .unwrap();
    assert!(get_bool(&runtime, "ok"));
    assert!(!get_bool(&runtime, "empty_anim"));
    assert!(!get_bool(&runtime, "bad_sprite"));

    let ctx = runtime.ctx();
    let new = ctx.scene.borrow().get(0).unwrap().texture;
    assert_ne!(old, new);
    // The sprite's original texture had its only reference released; the
    // animation's frame texture is now shared by frame + sprite.
    assert!(!ctx.textures.borrow().contains(old));
    assert!(ctx.textures.borrow().contains(new));
}

// ---------- per-frame dispatch ----------

#[test]
fn update_hook_receives_the_delta_each_frame() {
    let (_dir, runtime) = project_runtime();
    runtime
        .exec_source("total = 0 function Update(dt) total = total + dt end")
        .unwrap();

    runtime.dispatch_frame(0.5);
    runtime.dispatch_frame(0.25);

    assert_eq!(get_f64(&runtime, "total"), 0.75);
}

#[test]
fn update_hook_errors_do_not_crash_the_frame() {
    let (_dir, runtime) = project_runtime();
    runtime
        .exec_source("function Update(dt) error('boom') end")
        .unwrap();
    runtime.dispatch_frame(0.1);
    runtime.dispatch_frame(0.1);

    // A non-function Update is skipped silently.
    runtime.exec_source("Update = 5").unwrap();
    runtime.dispatch_frame(0.1);
}

#[test]
fn missing_hooks_are_fine() {
    let (_dir, runtime) = project_runtime();
    runtime.dispatch_frame(0.1);
}

#[test]
fn frame_coroutine_is_resumed_once_per_tick() {
    let (_dir, runtime) = project_runtime();
    runtime
        .exec_source(
            r#"
            steps = 0
            MoveCoroutine = coroutine.create(function()
                for i = 1, 3 do
                    steps = i
                    coroutine.yield()
                end
            end)
            "#,
        )
        .unwrap();

    runtime.dispatch_frame(0.1);
    assert_eq!(get_i64(&runtime, "steps"), 1);
    runtime.dispatch_frame(0.1);
    assert_eq!(get_i64(&runtime, "steps"), 2);

    for _ in 0..3 {
        runtime.dispatch_frame(0.1);
    }
    assert_eq!(get_i64(&runtime, "steps"), 3);

    runtime
        .exec_source("status = coroutine.status(MoveCoroutine)")
        .unwrap();
    let status: String = runtime.lua().globals().get("status").unwrap();
    assert_eq!(status, "dead");
}

#[test]
fn faulted_coroutine_is_terminal_and_never_restarted() {
    let (_dir, runtime) = project_runtime();
    runtime
        .exec_source(
            r#"
            runs = 0
            MoveCoroutine = coroutine.create(function()
                runs = runs + 1
                error('bad step')
            end)
            "#,
        )
        .unwrap();

    for _ in 0..4 {
        runtime.dispatch_frame(0.1);
    }
    assert_eq!(get_i64(&runtime, "runs"), 1);
}

#[test]
fn a_non_thread_move_coroutine_is_ignored() {
    let (_dir, runtime) = project_runtime();
    runtime.exec_source("MoveCoroutine = 42").unwrap();
    runtime.dispatch_frame(0.1);
}

#[test]
fn editor_run_can_redefine_the_live_hooks() {
    let (_dir, runtime) = project_runtime();
    runtime
        .exec_source("mode = '' function Update(dt) mode = 'first' end")
        .unwrap();
    runtime.dispatch_frame(0.1);
    let mode: String = runtime.lua().globals().get("mode").unwrap();
    assert_eq!(mode, "first");

    // The Run Script action compiles into the same globals, so the
    // replacement takes effect on the next frame.
    runtime
        .exec_source("function Update(dt) mode = 'second' end")
        .unwrap();
    runtime.dispatch_frame(0.1);
    let mode: String = runtime.lua().globals().get("mode").unwrap();
    assert_eq!(mode, "second");
}

#[test]
fn run_script_executes_files_and_reports_errors() {
    let (dir, runtime) = project_runtime();
    let good = dir.path().join("scripts").join("good.lua");
    std::fs::create_dir_all(good.parent().unwrap()).unwrap();
    std::fs::write(&good, "loaded_marker = 99").unwrap();

    runtime.run_script(&good).unwrap();
    assert_eq!(get_i64(&runtime, "loaded_marker"), 99);

    assert!(runtime.run_script(dir.path().join("scripts/absent.lua").as_path()).is_err());

    let broken = dir.path().join("scripts").join("broken.lua");
    std::fs::write(&broken, "this is not lua(").unwrap();
    assert!(runtime.run_script(&broken).is_err());
}
