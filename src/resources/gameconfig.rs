//! Engine configuration resource.
//!
//! Settings loaded from an INI file, with safe defaults so the engine
//! always starts even without one.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! target_fps = 120
//!
//! [project]
//! asset_folder = ./assets
//! ```

use bevy_ecs::prelude::Resource;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 120;
const DEFAULT_ASSET_FOLDER: &str = "./assets";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Window and project settings.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Initial project asset root (overridable from the command line).
    pub asset_folder: PathBuf,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            asset_folder: PathBuf::from(DEFAULT_ASSET_FOLDER),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Load values from the configuration file, keeping defaults for any
    /// missing or unparsable key.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut ini = Ini::new();
        ini.load(self.config_path.to_string_lossy().as_ref())?;

        if let Ok(Some(width)) = ini.getuint("window", "width") {
            self.window_width = width as u32;
        }
        if let Ok(Some(height)) = ini.getuint("window", "height") {
            self.window_height = height as u32;
        }
        if let Ok(Some(fps)) = ini.getuint("window", "target_fps") {
            self.target_fps = fps as u32;
        }
        if let Some(folder) = ini.get("project", "asset_folder") {
            self.asset_folder = PathBuf::from(folder);
        }

        info!(
            "config loaded from {}: {}x{} @ {} fps, assets at {}",
            self.config_path.display(),
            self.window_width,
            self.window_height,
            self.target_fps,
            self.asset_folder.display()
        );
        Ok(())
    }
}
