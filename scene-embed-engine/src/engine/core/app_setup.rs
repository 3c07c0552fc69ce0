use bevy::asset::AssetMetaCheck;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::render::RenderPlugin;
use bevy::render::settings::{PowerPreference, RenderCreation, WgpuSettings};
use bevy_common_assets::json::JsonAssetPlugin;

use crate::bridge::camera_bridge::CameraBridgePlugin;
use crate::engine::assets::model_config::PlacementManifest;
use crate::engine::assets::model_source::{MODEL_SOURCE, ModelFetchStats, model_asset_source};
use crate::engine::camera::orbit_camera::{OrbitController, orbit_camera_controller};
use crate::engine::core::app_state::{
    ActiveModel, ModelSwapRequest, ViewerState, begin_initial_load,
};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::manifest_loader::{ManifestLoader, resolve_manifest, start_manifest_load};
use crate::engine::loading::model_loader::{
    finish_model_load, handle_swap_requests, start_descriptor_load,
};
use crate::engine::scene::ground::spawn_ground;
use crate::engine::scene::lighting::spawn_lighting;
use crate::engine::ui::overlay::{
    clear_reload_affordance, hide_loading_overlay, reload_on_click, show_loading_overlay,
    show_reload_affordance, spawn_loading_overlay, update_load_progress,
};
use crate::rpc::host_rpc::HostRpcPlugin;

use constants::camera::{
    FAR_PLANE, FIELD_OF_VIEW_DEG, INITIAL_CAMERA_POSITION, INITIAL_CAMERA_ROTATION_DEG, NEAR_PLANE,
};
use constants::viewer::LOG_FILTER;

pub fn create_app() -> App {
    let mut app = App::new();
    let fetch_stats = ModelFetchStats::default();

    // The source must exist before the asset plugin initialises.
    app.register_asset_source(MODEL_SOURCE, model_asset_source(fetch_stats.clone()));

    app.add_plugins(create_default_plugins())
        .init_state::<ViewerState>()
        // Registers the placement manifest as a loadable JSON asset type.
        .add_plugins(JsonAssetPlugin::<PlacementManifest>::new(&["manifest.json"]))
        .add_plugins(HostRpcPlugin)
        .add_plugins(CameraBridgePlugin)
        .insert_resource(ClearColor(Color::WHITE))
        .insert_resource(fetch_stats)
        .init_resource::<ActiveModel>()
        .init_resource::<ManifestLoader>()
        .init_resource::<OrbitController>()
        .add_event::<ModelSwapRequest>();

    app.add_systems(Startup, (setup_session, start_manifest_load).chain())
        .add_systems(
            Update,
            begin_initial_load.run_if(in_state(ViewerState::Initializing)),
        )
        .add_systems(
            Update,
            (
                resolve_manifest,
                start_descriptor_load,
                update_load_progress,
                finish_model_load,
            )
                .chain()
                .run_if(in_state(ViewerState::LoadingModel)),
        )
        .add_systems(Update, handle_swap_requests)
        .add_systems(
            Update,
            orbit_camera_controller.run_if(not(in_state(ViewerState::Initializing))),
        )
        .add_systems(OnEnter(ViewerState::LoadingModel), show_loading_overlay)
        .add_systems(OnEnter(ViewerState::Ready), hide_loading_overlay)
        .add_systems(OnEnter(ViewerState::Failed), show_reload_affordance)
        .add_systems(OnExit(ViewerState::Failed), clear_reload_affordance)
        .add_systems(Update, reload_on_click.run_if(in_state(ViewerState::Failed)));

    app
}

/// Build the rendering session: camera, lighting rig, ground, overlay.
fn setup_session(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    spawn_viewer_camera(&mut commands);
    spawn_lighting(&mut commands);
    spawn_ground(&mut commands, &mut meshes, &mut materials);
    spawn_loading_overlay(&mut commands);
}

fn spawn_viewer_camera(commands: &mut Commands) {
    let [rx, ry, rz] = INITIAL_CAMERA_ROTATION_DEG;
    let rotation = Quat::from_euler(
        EulerRot::XYZ,
        rx.to_radians(),
        ry.to_radians(),
        rz.to_radians(),
    );

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: FIELD_OF_VIEW_DEG.to_radians(),
            near: NEAR_PLANE,
            far: FAR_PLANE,
            ..default()
        }),
        Msaa::Sample4,
        Tonemapping::AcesFitted,
        Transform::from_translation(INITIAL_CAMERA_POSITION).with_rotation(rotation),
    ));
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let render_config = RenderPlugin {
        render_creation: RenderCreation::Automatic(WgpuSettings {
            power_preference: PowerPreference::HighPerformance,
            ..default()
        }),
        ..default()
    };

    let log_config = LogPlugin {
        filter: LOG_FILTER.to_string(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(render_config)
        .set(log_config)
}
