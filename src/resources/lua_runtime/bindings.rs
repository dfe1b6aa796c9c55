//! Native functions exposed to scripts.
//!
//! Every function is registered once, by name, into the Lua global
//! namespace. The typed closure signature performs the argument coercion
//! and arity checking: a malformed call raises a regular (catchable) Lua
//! error before the body runs. A well-typed call with a semantically
//! invalid argument — above all a stale sprite index — never raises; it
//! returns the function's sentinel (`false`, `-1`, empty table, `nil`).
//! That asymmetry is the binding contract scripts rely on.
//!
//! Each registration carries a [`FnSpec`] descriptor (name, parameters,
//! return) declared next to the closure. The descriptors feed the stub and
//! `.luarc.json` generators, so the documented signature and the registered
//! one cannot drift apart silently.

use mlua::prelude::*;

use super::context::EngineCtx;
use crate::collision;
use crate::resources::scenestore::Sprite;
use crate::resources::texturestore::TextureId;

/// One positional parameter of a native function.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    /// Lua-facing type: `integer`, `number`, `string`, `boolean`, plus a
    /// trailing `?` for optional parameters.
    pub ty: &'static str,
}

/// Descriptor of one registered native function.
#[derive(Debug, Clone, Copy)]
pub struct FnSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
    pub returns: Option<&'static str>,
}

/// Fetches the shared engine context from Lua app-data.
fn ctx(lua: &Lua) -> LuaResult<mlua::AppDataRef<'_, EngineCtx>> {
    lua.app_data_ref::<EngineCtx>()
        .ok_or_else(|| LuaError::runtime("engine context not attached"))
}

/// Script indices arrive as Lua integers; anything negative is simply an
/// invalid index and takes the sentinel path.
fn to_index(raw: i64) -> Option<usize> {
    usize::try_from(raw).ok()
}

/// Registers one native plus its descriptor.
macro_rules! native {
    ($lua:expr, $specs:expr, $name:literal, $desc:literal,
     [ $( ($pname:literal, $pty:literal) ),* $(,)? ], $ret:expr, $func:expr) => {
        $lua.globals().set($name, $lua.create_function($func)?)?;
        $specs.push(FnSpec {
            name: $name,
            description: $desc,
            params: &[ $( ParamSpec { name: $pname, ty: $pty } ),* ],
            returns: $ret,
        });
    };
}

/// Binds the whole scripting ABI into the interpreter's globals.
/// Called exactly once, from `ScriptRuntime::new`.
pub(super) fn register_native_functions(lua: &Lua) -> LuaResult<Vec<FnSpec>> {
    let mut specs: Vec<FnSpec> = Vec::new();

    register_sprite_api(lua, &mut specs)?;
    register_input_api(lua, &mut specs)?;
    register_collision_api(lua, &mut specs)?;
    register_animation_api(lua, &mut specs)?;

    Ok(specs)
}

fn register_sprite_api(lua: &Lua, specs: &mut Vec<FnSpec>) -> LuaResult<()> {
    native!(lua, specs, "LoadTexture",
        "Loads a texture and appends a new sprite using it. Returns false when the file cannot be decoded.",
        [("path", "string"), ("x", "number?"), ("y", "number?"),
         ("width", "number?"), ("height", "number?")],
        Some("boolean"),
        |lua, (path, x, y, width, height): (String, Option<f32>, Option<f32>, Option<f32>, Option<f32>)| {
            let ctx = ctx(lua)?;
            let full_path = ctx.assets.borrow().resolve(&path);
            let Some(texture) = ctx.textures.borrow_mut().load(&full_path) else {
                return Ok(false);
            };
            ctx.scene.borrow_mut().add(Sprite::new(
                texture,
                x.unwrap_or(0.0),
                y.unwrap_or(0.0),
                width.unwrap_or(128.0),
                height.unwrap_or(128.0),
            ));
            Ok(true)
        });

    native!(lua, specs, "MoveTexture",
        "Moves the sprite at the given index. Returns false on an invalid index.",
        [("index", "integer"), ("x", "number"), ("y", "number")],
        Some("boolean"),
        |lua, (index, x, y): (i64, f32, f32)| {
            let ctx = ctx(lua)?;
            let moved = to_index(index)
                .map(|i| ctx.scene.borrow_mut().set_position(i, x, y))
                .unwrap_or(false);
            Ok(moved)
        });

    native!(lua, specs, "SetSpriteSize",
        "Resizes the sprite at the given index. Returns false on an invalid index.",
        [("index", "integer"), ("width", "number"), ("height", "number")],
        Some("boolean"),
        |lua, (index, width, height): (i64, f32, f32)| {
            let ctx = ctx(lua)?;
            let resized = to_index(index)
                .map(|i| ctx.scene.borrow_mut().set_size(i, width, height))
                .unwrap_or(false);
            Ok(resized)
        });

    native!(lua, specs, "ChangeTexture",
        "Loads a texture file and swaps it onto the sprite, releasing the old one. Returns false on an invalid index or decode failure.",
        [("index", "integer"), ("path", "string")],
        Some("boolean"),
        |lua, (index, path): (i64, String)| {
            let ctx = ctx(lua)?;
            let Some(i) = to_index(index).filter(|&i| ctx.scene.borrow().get(i).is_some()) else {
                return Ok(false);
            };
            let full_path = ctx.assets.borrow().resolve(&path);
            let Some(texture) = ctx.textures.borrow_mut().load(&full_path) else {
                return Ok(false);
            };
            let old = ctx.scene.borrow_mut().replace_texture(i, texture);
            if let Some(old) = old {
                ctx.textures.borrow_mut().release(old);
            }
            Ok(true)
        });

    native!(lua, specs, "SetSpriteTexture",
        "Points the sprite at an already-loaded texture handle, releasing the old one. Returns false on an invalid index or unknown handle.",
        [("index", "integer"), ("textureId", "integer")],
        Some("boolean"),
        |lua, (index, texture_id): (i64, i64)| {
            let ctx = ctx(lua)?;
            let Some(i) = to_index(index).filter(|&i| ctx.scene.borrow().get(i).is_some()) else {
                return Ok(false);
            };
            let Ok(raw) = u32::try_from(texture_id) else {
                return Ok(false);
            };
            let texture = TextureId(raw);
            if !ctx.textures.borrow_mut().retain(texture) {
                return Ok(false);
            }
            let old = ctx.scene.borrow_mut().replace_texture(i, texture);
            if let Some(old) = old {
                ctx.textures.borrow_mut().release(old);
            }
            Ok(true)
        });

    native!(lua, specs, "GetSpritePosition",
        "Returns the sprite's position as a {x, y} pair, or nil on an invalid index.",
        [("index", "integer")],
        Some("table?"),
        |lua, index: i64| {
            let position = {
                let ctx = ctx(lua)?;
                let scene = ctx.scene.borrow();
                to_index(index)
                    .and_then(|i| scene.get(i))
                    .map(|sprite| (sprite.pos.x, sprite.pos.y))
            };
            match position {
                Some((x, y)) => Ok(Some(lua.create_sequence_from([x, y])?)),
                None => Ok(None),
            }
        });

    Ok(())
}

fn register_input_api(lua: &Lua, specs: &mut Vec<FnSpec>) -> LuaResult<()> {
    native!(lua, specs, "IsKeyPressed",
        "True while the given key code is held down.",
        [("keyCode", "integer")],
        Some("boolean"),
        |lua, key_code: i64| {
            let ctx = ctx(lua)?;
            let down = i32::try_from(key_code)
                .map(|code| ctx.input.borrow().is_down(code))
                .unwrap_or(false);
            Ok(down)
        });

    Ok(())
}

fn register_collision_api(lua: &Lua, specs: &mut Vec<FnSpec>) -> LuaResult<()> {
    native!(lua, specs, "CheckCollision",
        "True when the two sprites' rectangles overlap. False on any invalid index.",
        [("indexA", "integer"), ("indexB", "integer")],
        Some("boolean"),
        |lua, (index_a, index_b): (i64, i64)| {
            let ctx = ctx(lua)?;
            let scene = ctx.scene.borrow();
            let colliding = match (
                to_index(index_a).and_then(|i| scene.get(i)),
                to_index(index_b).and_then(|i| scene.get(i)),
            ) {
                (Some(a), Some(b)) => collision::check_collision(a, b),
                _ => false,
            };
            Ok(colliding)
        });

    native!(lua, specs, "FindCollision",
        "Index of the first sprite colliding with the given one, or -1.",
        [("index", "integer")],
        Some("integer"),
        |lua, index: i64| {
            let ctx = ctx(lua)?;
            let scene = ctx.scene.borrow();
            let Some(i) = to_index(index).filter(|&i| i < scene.len()) else {
                return Ok(-1);
            };
            let hit = collision::find_first_collision(&scene.sprites()[i], scene.sprites(), Some(i));
            Ok(hit.map(|h| h as i64).unwrap_or(-1))
        });

    native!(lua, specs, "FindAllCollisions",
        "Array of every sprite index colliding with the given one, ascending. Empty on an invalid index.",
        [("index", "integer")],
        Some("integer[]"),
        |lua, index: i64| {
            let hits: Vec<i64> = {
                let ctx = ctx(lua)?;
                let scene = ctx.scene.borrow();
                match to_index(index).filter(|&i| i < scene.len()) {
                    Some(i) => {
                        collision::find_all_collisions(&scene.sprites()[i], scene.sprites(), Some(i))
                            .into_iter()
                            .map(|h| h as i64)
                            .collect()
                    }
                    None => Vec::new(),
                }
            };
            lua.create_sequence_from(hits)
        });

    native!(lua, specs, "PointInSprite",
        "True when the point lies inside the sprite's rectangle (edges inclusive).",
        [("x", "number"), ("y", "number"), ("index", "integer")],
        Some("boolean"),
        |lua, (x, y, index): (f32, f32, i64)| {
            let ctx = ctx(lua)?;
            let scene = ctx.scene.borrow();
            let inside = to_index(index)
                .and_then(|i| scene.get(i))
                .map(|sprite| collision::point_in_sprite(x, y, sprite))
                .unwrap_or(false);
            Ok(inside)
        });

    native!(lua, specs, "ResolveCollision",
        "Pushes two overlapping sprites apart along the axis of least overlap, splitting the correction evenly. Returns true when a collision was resolved.",
        [("indexA", "integer"), ("indexB", "integer")],
        Some("boolean"),
        |lua, (index_a, index_b): (i64, i64)| {
            let ctx = ctx(lua)?;
            let mut scene = ctx.scene.borrow_mut();
            let (Some(a), Some(b)) = (to_index(index_a), to_index(index_b)) else {
                return Ok(false);
            };
            if a == b || a >= scene.len() || b >= scene.len() {
                return Ok(false);
            }
            let Some(info) = collision::collision_info(&scene.sprites()[a], &scene.sprites()[b])
            else {
                return Ok(false);
            };
            let sprites = scene.sprites_mut();
            let (low, high) = (a.min(b), a.max(b));
            let (left, right) = sprites.split_at_mut(high);
            let (sprite_a, sprite_b) = if a < b {
                (&mut left[low], &mut right[0])
            } else {
                (&mut right[0], &mut left[low])
            };
            collision::resolve_collision(sprite_a, sprite_b, &info);
            Ok(true)
        });

    Ok(())
}

fn register_animation_api(lua: &Lua, specs: &mut Vec<FnSpec>) -> LuaResult<()> {
    native!(lua, specs, "CreateAnimation",
        "Creates an empty animation and returns its index.",
        [("looped", "boolean")],
        Some("integer"),
        |lua, looped: bool| {
            let ctx = ctx(lua)?;
            Ok(ctx.animations.borrow_mut().create(looped) as i64)
        });

    native!(lua, specs, "AddAnimationFrame",
        "Loads a texture and appends it as a frame. Returns false on an invalid animation index or decode failure.",
        [("animIndex", "integer"), ("path", "string"), ("duration", "number")],
        Some("boolean"),
        |lua, (anim_index, path, duration): (i64, String, f32)| {
            let ctx = ctx(lua)?;
            let Some(i) = to_index(anim_index).filter(|&i| ctx.animations.borrow().get(i).is_some())
            else {
                return Ok(false);
            };
            let full_path = ctx.assets.borrow().resolve(&path);
            let Some(texture) = ctx.textures.borrow_mut().load(&full_path) else {
                return Ok(false);
            };
            Ok(ctx.animations.borrow_mut().add_frame(i, texture, duration))
        });

    native!(lua, specs, "UpdateAnimation",
        "Advances the animation by the given delta. No-op on an invalid index.",
        [("animIndex", "integer"), ("deltaTime", "number")],
        None,
        |lua, (anim_index, delta_time): (i64, f32)| {
            let ctx = ctx(lua)?;
            if let Some(i) = to_index(anim_index) {
                ctx.animations.borrow_mut().update(i, delta_time);
            }
            Ok(())
        });

    native!(lua, specs, "PlayAnimation",
        "Starts or resumes playback. No-op on an invalid index.",
        [("animIndex", "integer")],
        None,
        |lua, anim_index: i64| {
            let ctx = ctx(lua)?;
            if let Some(i) = to_index(anim_index) {
                ctx.animations.borrow_mut().play(i);
            }
            Ok(())
        });

    native!(lua, specs, "PauseAnimation",
        "Halts playback, keeping the current frame. No-op on an invalid index.",
        [("animIndex", "integer")],
        None,
        |lua, anim_index: i64| {
            let ctx = ctx(lua)?;
            if let Some(i) = to_index(anim_index) {
                ctx.animations.borrow_mut().pause(i);
            }
            Ok(())
        });

    native!(lua, specs, "StopAnimation",
        "Halts playback and rewinds to the first frame. No-op on an invalid index.",
        [("animIndex", "integer")],
        None,
        |lua, anim_index: i64| {
            let ctx = ctx(lua)?;
            if let Some(i) = to_index(anim_index) {
                ctx.animations.borrow_mut().stop(i);
            }
            Ok(())
        });

    native!(lua, specs, "ResetAnimation",
        "Rewinds to the first frame without changing the playback state. No-op on an invalid index.",
        [("animIndex", "integer")],
        None,
        |lua, anim_index: i64| {
            let ctx = ctx(lua)?;
            if let Some(i) = to_index(anim_index) {
                ctx.animations.borrow_mut().reset(i);
            }
            Ok(())
        });

    native!(lua, specs, "GetAnimationTexture",
        "Texture handle of the animation's current frame, or 0.",
        [("animIndex", "integer")],
        Some("integer"),
        |lua, anim_index: i64| {
            let ctx = ctx(lua)?;
            let texture = to_index(anim_index)
                .map(|i| ctx.animations.borrow().current_texture(i))
                .unwrap_or(TextureId::INVALID);
            Ok(texture.0 as i64)
        });

    native!(lua, specs, "IsAnimationFinished",
        "True when a non-looping animation has played through. Also true on an invalid index.",
        [("animIndex", "integer")],
        Some("boolean"),
        |lua, anim_index: i64| {
            let ctx = ctx(lua)?;
            let finished = to_index(anim_index)
                .map(|i| ctx.animations.borrow().is_finished(i))
                .unwrap_or(true);
            Ok(finished)
        });

    native!(lua, specs, "SetSpriteAnimation",
        "Points the sprite at the animation's current frame texture. Returns false on an invalid sprite index or an animation with no frames.",
        [("spriteIndex", "integer"), ("animIndex", "integer")],
        Some("boolean"),
        |lua, (sprite_index, anim_index): (i64, i64)| {
            let ctx = ctx(lua)?;
            let Some(i) =
                to_index(sprite_index).filter(|&i| ctx.scene.borrow().get(i).is_some())
            else {
                return Ok(false);
            };
            let texture = to_index(anim_index)
                .map(|a| ctx.animations.borrow().current_texture(a))
                .unwrap_or(TextureId::INVALID);
            if !texture.is_valid() {
                return Ok(false);
            }
            if !ctx.textures.borrow_mut().retain(texture) {
                return Ok(false);
            }
            let old = ctx.scene.borrow_mut().replace_texture(i, texture);
            if let Some(old) = old {
                ctx.textures.borrow_mut().release(old);
            }
            Ok(true)
        });

    Ok(())
}
