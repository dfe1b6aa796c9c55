use bevy_ecs::prelude::Resource;

/// Simulation clock: last frame's delta plus totals.
#[derive(Resource, Clone, Copy, Default)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub frame_count: u64,
}
