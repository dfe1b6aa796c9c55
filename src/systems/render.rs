//! Scene rendering.
//!
//! Exclusive system: needs the raylib handle and thread together, so it
//! pulls the thread out of the world for the duration of the frame. Pending
//! texture uploads happen here because this is the only place with GPU
//! access; after that every sprite draws as a textured rectangle scaled to
//! its size, in index order.

use std::cell::RefCell;
use std::rc::Rc;

use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::collision;
use crate::resources::debugmode::DebugMode;
use crate::resources::scenestore::SceneStore;
use crate::resources::texturestore::TextureStore;

pub fn render_system(world: &mut World) {
    let thread = world
        .remove_non_send_resource::<RaylibThread>()
        .expect("raylib thread not in world");
    {
        let scene = world
            .non_send_resource::<Rc<RefCell<SceneStore>>>()
            .clone();
        let textures = world
            .non_send_resource::<Rc<RefCell<TextureStore>>>()
            .clone();
        let debug_enabled = world.resource::<DebugMode>().enabled;

        let mut rl = world.non_send_resource_mut::<RaylibHandle>();
        textures.borrow_mut().upload_pending(&mut rl, &thread);

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::new(51, 51, 51, 255));

        let scene = scene.borrow();
        let textures = textures.borrow();
        for sprite in scene.sprites() {
            if let Some(texture) = textures.gpu_texture(sprite.texture) {
                let src = Rectangle::new(0.0, 0.0, texture.width as f32, texture.height as f32);
                let dest = Rectangle::new(sprite.pos.x, sprite.pos.y, sprite.width, sprite.height);
                d.draw_texture_pro(texture, src, dest, Vector2::zero(), 0.0, Color::WHITE);
            }
        }

        if debug_enabled {
            for info in collision::all_collisions(scene.sprites()) {
                for index in [info.sprite_a, info.sprite_b] {
                    let s = &scene.sprites()[index];
                    d.draw_rectangle_lines(
                        s.pos.x as i32,
                        s.pos.y as i32,
                        s.width as i32,
                        s.height as i32,
                        Color::RED,
                    );
                }
            }
            let fps = d.get_fps();
            let text = format!(
                "sprites: {} | textures: {} | FPS: {}",
                scene.len(),
                textures.len(),
                fps
            );
            d.draw_text(&text, 10, 10, 10, Color::GREEN);
        }
    }
    world.insert_non_send_resource(thread);
}
