use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Feed the frame delta into [`WorldTime`]. Called from the main loop
/// before the schedule runs.
pub fn update_world_time(world: &mut World, delta: f32) {
    let mut time = world.resource_mut::<WorldTime>();
    time.delta = delta;
    time.elapsed += delta;
    time.frame_count += 1;
}
