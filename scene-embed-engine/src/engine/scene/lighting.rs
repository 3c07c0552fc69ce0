use bevy::prelude::*;

use constants::viewer::{AMBIENT_BRIGHTNESS, FILL_LIGHT_LUX, KEY_LIGHT_LUX};

/// Fixed lighting rig. Survives model swaps.
#[derive(Component)]
pub struct SceneLight;

pub fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: KEY_LIGHT_LUX,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(-5.0, 3.0, -7.0).looking_at(Vec3::ZERO, Vec3::Y),
        SceneLight,
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: FILL_LIGHT_LUX,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(-5.0, 3.0, 7.0).looking_at(Vec3::ZERO, Vec3::Y),
        SceneLight,
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });
}
