use bevy::prelude::*;

/// Setup camera for 2D rendering
///
/// The camera stays at the origin with unit scale; pan and zoom are applied
/// by [`crate::viewport::Viewport`] when bodies are placed, so one world unit
/// is one screen pixel here.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
    info!("camera spawned");
}
