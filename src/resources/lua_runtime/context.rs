//! Shared engine state reachable from Lua closures.
//!
//! Native functions run inside the interpreter, where no `World` access is
//! possible, so the stores they touch are shared `Rc<RefCell<...>>` handles.
//! One clone of the context lives in Lua app-data for the closures; the
//! frame loop holds the other clones as non-send resources. Everything is
//! single-threaded, and every native completes synchronously within the Lua
//! call that invoked it, so a borrow never outlives its call.

use std::cell::RefCell;
use std::rc::Rc;

use crate::resources::animationstore::AnimationStore;
use crate::resources::assetfolder::AssetFolder;
use crate::resources::input::KeyboardSnapshot;
use crate::resources::scenestore::SceneStore;
use crate::resources::texturestore::TextureStore;

/// Handles to the stores the script bridge reads and writes.
#[derive(Clone)]
pub struct EngineCtx {
    pub scene: Rc<RefCell<SceneStore>>,
    pub textures: Rc<RefCell<TextureStore>>,
    pub animations: Rc<RefCell<AnimationStore>>,
    pub input: Rc<RefCell<KeyboardSnapshot>>,
    pub assets: Rc<RefCell<AssetFolder>>,
}

impl EngineCtx {
    /// Fresh stores with the given project asset root.
    pub fn new(assets: AssetFolder) -> Self {
        Self {
            scene: Rc::new(RefCell::new(SceneStore::new())),
            textures: Rc::new(RefCell::new(TextureStore::new())),
            animations: Rc::new(RefCell::new(AnimationStore::new())),
            input: Rc::new(RefCell::new(KeyboardSnapshot::new())),
            assets: Rc::new(RefCell::new(assets)),
        }
    }
}

impl Default for EngineCtx {
    fn default() -> Self {
        Self::new(AssetFolder::default())
    }
}
