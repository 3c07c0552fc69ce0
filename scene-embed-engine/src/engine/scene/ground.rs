use bevy::prelude::*;

use constants::viewer::{GROUND_PLANE_SIZE, GROUND_PLANE_Y};

/// Persistent scene furniture, exempt from model clearing.
#[derive(Component)]
pub struct Ground;

pub fn spawn_ground(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) {
    let mesh = meshes.add(
        Plane3d::default()
            .mesh()
            .size(GROUND_PLANE_SIZE, GROUND_PLANE_SIZE),
    );
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        ..default()
    });
    commands.spawn((
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::from_xyz(0.0, GROUND_PLANE_Y, 0.0),
        Name::new("ground"),
        Ground,
    ));
}
