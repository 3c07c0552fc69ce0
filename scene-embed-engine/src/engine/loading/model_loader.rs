use bevy::asset::{LoadState, RecursiveDependencyLoadState};
use bevy::gltf::{Gltf, GltfMesh};
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;

use crate::engine::assets::model_config::{
    apply_camera_override, placement_transform, select_model_config,
};
use crate::engine::assets::model_source::{ModelFetchStats, descriptor_asset_path};
use crate::engine::camera::orbit_camera::OrbitController;
use crate::engine::core::app_state::{ActiveModel, ModelSwapRequest, ViewerState};
use crate::engine::loading::manifest_loader::ManifestLoader;
use crate::rpc::host_rpc::HostRpcInterface;

/// Root of the currently displayed model. Everything under it is despawned
/// on a model swap; lighting and the ground stay.
#[derive(Component)]
pub struct ModelRoot;

/// Select the placement entry and request the descriptor once the manifest
/// has resolved.
pub fn start_descriptor_load(
    mut active: ResMut<ActiveModel>,
    manifest: Res<ManifestLoader>,
    asset_server: Res<AssetServer>,
    stats: Res<ModelFetchStats>,
) {
    if active.gltf.is_some() || !manifest.resolved {
        return;
    }

    active.config = manifest
        .entries
        .as_deref()
        .and_then(|entries| select_model_config(entries, &active.id))
        .cloned();

    stats.reset();
    let path = descriptor_asset_path(&active.id);
    info!("loading model {} from {path}", active.id);
    active.gltf = Some(asset_server.load(path));
}

/// Poll the in-flight descriptor. Success spawns the configured model and
/// enters `Ready`; failure surfaces the reload affordance.
pub fn finish_model_load(
    mut commands: Commands,
    active: Res<ActiveModel>,
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    gltf_meshes: Res<Assets<GltfMesh>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut orbit: ResMut<OrbitController>,
    mut camera: Query<&mut Transform, With<Camera3d>>,
    mut next_state: ResMut<NextState<ViewerState>>,
    mut rpc: ResMut<HostRpcInterface>,
) {
    let Some(handle) = active.gltf.clone() else {
        return;
    };

    let failure = match asset_server.load_state(&handle) {
        LoadState::Failed(err) => Some(err.to_string()),
        _ => match asset_server.recursive_dependency_load_state(&handle) {
            RecursiveDependencyLoadState::Failed(err) => Some(err.to_string()),
            RecursiveDependencyLoadState::Loaded => None,
            _ => return,
        },
    };

    if let Some(reason) = failure {
        error!("model {} failed to load: {reason}", active.id);
        rpc.send_notification(
            "load_failed",
            serde_json::json!({ "id": active.id, "reason": reason }),
        );
        next_state.set(ViewerState::Failed);
        return;
    }

    let Some(gltf) = gltfs.get(&handle) else {
        return;
    };
    let Some(scene) = gltf
        .default_scene
        .clone()
        .or_else(|| gltf.scenes.first().cloned())
    else {
        error!("model {} descriptor has no scene", active.id);
        rpc.send_notification(
            "load_failed",
            serde_json::json!({ "id": active.id, "reason": "descriptor has no scene" }),
        );
        next_state.set(ViewerState::Failed);
        return;
    };

    smooth_mesh_normals(gltf, &gltf_meshes, &mut meshes);

    let transform = placement_transform(active.config.as_ref());
    commands.spawn((SceneRoot(scene), transform, ModelRoot));

    if let Some(camera_config) = active.config.as_ref().and_then(|c| c.camera.as_ref()) {
        if let Ok(mut camera_transform) = camera.single_mut() {
            apply_camera_override(camera_config, &mut camera_transform);
            orbit.resync_from(&camera_transform);
        }
    }

    info!("model {} ready", active.id);
    rpc.send_notification("model_ready", serde_json::json!({ "id": active.id }));
    next_state.set(ViewerState::Ready);
}

/// Recompute smooth vertex normals for every triangle-list primitive so flat
/// authored normals do not survive into the lit scene.
fn smooth_mesh_normals(gltf: &Gltf, gltf_meshes: &Assets<GltfMesh>, meshes: &mut Assets<Mesh>) {
    for mesh_handle in &gltf.meshes {
        let Some(gltf_mesh) = gltf_meshes.get(mesh_handle) else {
            continue;
        };
        for primitive in &gltf_mesh.primitives {
            let Some(mesh) = meshes.get_mut(&primitive.mesh) else {
                continue;
            };
            if mesh.primitive_topology() == PrimitiveTopology::TriangleList
                && mesh.attribute(Mesh::ATTRIBUTE_POSITION).is_some()
            {
                mesh.compute_smooth_normals();
            }
        }
    }
}

/// Apply the latest requested id. With a live session the current model
/// content is despawned and the load re-enters `LoadingModel`; before the
/// session exists the new id is absorbed into the initial load.
pub fn handle_swap_requests(
    mut requests: EventReader<ModelSwapRequest>,
    mut commands: Commands,
    mut active: ResMut<ActiveModel>,
    roots: Query<Entity, With<ModelRoot>>,
    stats: Res<ModelFetchStats>,
    state: Res<State<ViewerState>>,
    mut next_state: ResMut<NextState<ViewerState>>,
) {
    let Some(request) = requests.read().last().cloned() else {
        return;
    };
    if request.id == active.id {
        return;
    }

    active.id = request.id;
    // Dropping the handle abandons a superseded in-flight load; its
    // completion is never observed.
    active.gltf = None;
    active.config = None;

    if *state.get() == ViewerState::Initializing {
        return;
    }

    for entity in &roots {
        commands.entity(entity).despawn();
    }
    stats.reset();
    next_state.set(ViewerState::LoadingModel);
}
