//! Project asset root.
//!
//! Every relative texture and script path is resolved against this single
//! mutable root. Changing the root at runtime affects future loads only;
//! already-loaded resources are not touched.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct AssetFolder {
    root: PathBuf,
}

impl AssetFolder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn set_root(&mut self, root: impl Into<PathBuf>) {
        self.root = root.into();
    }

    /// Joins a project-relative path onto the root. Absolute paths pass
    /// through unchanged (`PathBuf::join` semantics).
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    /// Directory holding the project's Lua scripts.
    pub fn scripts_dir(&self) -> PathBuf {
        self.root.join("scripts")
    }
}

impl Default for AssetFolder {
    fn default() -> Self {
        Self::new("./assets")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_relative_to_root() {
        let assets = AssetFolder::new("/proj");
        assert_eq!(
            assets.resolve("textures/ball.png"),
            PathBuf::from("/proj/textures/ball.png")
        );
        assert_eq!(assets.scripts_dir(), PathBuf::from("/proj/scripts"));
    }

    #[test]
    fn set_root_changes_future_resolution() {
        let mut assets = AssetFolder::new("/a");
        assets.set_root("/b");
        assert_eq!(assets.resolve("x.lua"), PathBuf::from("/b/x.lua"));
    }
}
