//! Canonical sprite list.
//!
//! The scene is an ordered, index-addressed collection of sprites. The index
//! is the only identity scripts ever see, so every index-taking operation
//! validates bounds and reports an invalid index as `None` instead of
//! panicking. Removal uses shift-erase (`Vec::remove`): every index greater
//! than the removed one shifts down by one and any stale copy a script kept
//! now points at a different sprite (or past the end).

use raylib::prelude::Vector2;

use crate::resources::texturestore::TextureId;

/// A drawable rectangle: a texture handle, a world position and a size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub texture: TextureId,
    pub pos: Vector2,
    pub width: f32,
    pub height: f32,
}

impl Sprite {
    pub fn new(texture: TextureId, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            texture,
            pos: Vector2::new(x, y),
            width,
            height,
        }
    }
}

/// Owner of the canonical sprite array.
#[derive(Default)]
pub struct SceneStore {
    sprites: Vec<Sprite>,
}

impl SceneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sprite and returns its index.
    pub fn add(&mut self, sprite: Sprite) -> usize {
        self.sprites.push(sprite);
        self.sprites.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Sprite> {
        self.sprites.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Sprite> {
        self.sprites.get_mut(index)
    }

    /// Shift-erase removal. Returns the removed sprite so the caller can
    /// release its texture reference; indices above `index` are invalidated.
    pub fn remove(&mut self, index: usize) -> Option<Sprite> {
        if index < self.sprites.len() {
            Some(self.sprites.remove(index))
        } else {
            None
        }
    }

    pub fn set_position(&mut self, index: usize, x: f32, y: f32) -> bool {
        match self.sprites.get_mut(index) {
            Some(sprite) => {
                sprite.pos = Vector2::new(x, y);
                true
            }
            None => false,
        }
    }

    pub fn set_size(&mut self, index: usize, width: f32, height: f32) -> bool {
        match self.sprites.get_mut(index) {
            Some(sprite) => {
                sprite.width = width;
                sprite.height = height;
                true
            }
            None => false,
        }
    }

    /// Swaps in a new texture handle and returns the old one so the caller
    /// can release it.
    pub fn replace_texture(&mut self, index: usize, texture: TextureId) -> Option<TextureId> {
        self.sprites.get_mut(index).map(|sprite| {
            let old = sprite.texture;
            sprite.texture = texture;
            old
        })
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Slice view for collision scans and rendering.
    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    pub fn sprites_mut(&mut self) -> &mut [Sprite] {
        &mut self.sprites
    }

    /// Empties the scene, handing back the sprites so their textures can be
    /// released.
    pub fn drain_all(&mut self) -> Vec<Sprite> {
        std::mem::take(&mut self.sprites)
    }
}
