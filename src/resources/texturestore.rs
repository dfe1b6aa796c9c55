//! Reference-counted texture registry.
//!
//! Textures are decoded from disk into CPU-side [`Image`]s as soon as a
//! script or editor action loads them, so failures surface synchronously at
//! the call site. GPU upload is deferred to the render pass, which is the
//! only place a [`RaylibHandle`] is available.
//!
//! A handle is retained once per referencing sprite or animation frame and
//! released when that referencer is deleted, replaced or cleared. GPU memory
//! is not garbage-collected, so a handle whose count reaches zero is
//! unloaded immediately.

use std::path::Path;

use log::{error, warn};
use raylib::prelude::*;
use rustc_hash::FxHashMap;

/// Opaque texture handle. `0` is reserved as the invalid handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

impl TextureId {
    pub const INVALID: TextureId = TextureId(0);

    pub fn is_valid(&self) -> bool {
        self.0 != 0
    }
}

struct TextureEntry {
    image: Image,
    refs: u32,
    gpu: Option<Texture2D>,
    upload_failed: bool,
}

/// Store of every live texture, keyed by handle.
pub struct TextureStore {
    entries: FxHashMap<u32, TextureEntry>,
    next_id: u32,
}

impl Default for TextureStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureStore {
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
            next_id: 1,
        }
    }

    /// Decodes an image file and registers it with a reference count of one.
    /// Returns `None` when the file is missing or not decodable.
    pub fn load(&mut self, path: &Path) -> Option<TextureId> {
        match Image::load_image(&path.to_string_lossy()) {
            Ok(image) => Some(self.insert(image)),
            Err(e) => {
                warn!("failed to load texture {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Registers an already-decoded image with a reference count of one.
    pub fn insert(&mut self, image: Image) -> TextureId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(
            id,
            TextureEntry {
                image,
                refs: 1,
                gpu: None,
                upload_failed: false,
            },
        );
        TextureId(id)
    }

    /// Adds a reference for another sprite/frame now sharing this handle.
    pub fn retain(&mut self, id: TextureId) -> bool {
        match self.entries.get_mut(&id.0) {
            Some(entry) => {
                entry.refs += 1;
                true
            }
            None => false,
        }
    }

    /// Drops one reference; unloads the texture when no referencer remains.
    pub fn release(&mut self, id: TextureId) {
        if let Some(entry) = self.entries.get_mut(&id.0) {
            entry.refs -= 1;
            if entry.refs == 0 {
                self.entries.remove(&id.0);
            }
        }
    }

    pub fn contains(&self, id: TextureId) -> bool {
        self.entries.contains_key(&id.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn ref_count(&self, id: TextureId) -> Option<u32> {
        self.entries.get(&id.0).map(|entry| entry.refs)
    }

    /// Uploads every not-yet-uploaded image to the GPU. Called once per
    /// frame from the render system, before drawing starts.
    pub fn upload_pending(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) {
        for (id, entry) in self.entries.iter_mut() {
            if entry.gpu.is_some() || entry.upload_failed {
                continue;
            }
            match rl.load_texture_from_image(thread, &entry.image) {
                Ok(texture) => entry.gpu = Some(texture),
                Err(e) => {
                    error!("failed to upload texture {}: {}", id, e);
                    entry.upload_failed = true;
                }
            }
        }
    }

    /// GPU texture for drawing, if this handle is live and uploaded.
    pub fn gpu_texture(&self, id: TextureId) -> Option<&Texture2D> {
        self.entries.get(&id.0).and_then(|entry| entry.gpu.as_ref())
    }
}
