use bevy_ecs::prelude::Resource;

/// Debug overlay toggle (F11).
#[derive(Resource, Default)]
pub struct DebugMode {
    pub enabled: bool,
}
