use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::engine::assets::model_config::{ModelConfig, PlacementManifest};
use constants::model::PLACEMENT_MANIFEST_PATH;

/// Placement manifest fetch state. Resolution is terminal either way: a
/// failed or empty manifest resolves to no entries and placement falls back
/// to the built-in defaults.
#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<PlacementManifest>>,
    pub resolved: bool,
    pub entries: Option<Vec<ModelConfig>>,
}

/// Kick off the manifest fetch alongside session setup.
pub fn start_manifest_load(mut loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    loader.handle = Some(asset_server.load(PLACEMENT_MANIFEST_PATH));
}

pub fn resolve_manifest(
    mut loader: ResMut<ManifestLoader>,
    manifests: Res<Assets<PlacementManifest>>,
    asset_server: Res<AssetServer>,
) {
    if loader.resolved {
        return;
    }
    let Some(handle) = loader.handle.clone() else {
        return;
    };

    match asset_server.get_load_state(&handle) {
        Some(LoadState::Loaded) => {
            if let Some(manifest) = manifests.get(&handle) {
                if manifest.0.is_empty() {
                    warn!("placement manifest is empty, using built-in placement");
                } else {
                    loader.entries = Some(manifest.0.clone());
                }
            }
            loader.resolved = true;
        }
        Some(LoadState::Failed(_)) => {
            warn!("placement manifest unavailable, using built-in placement");
            loader.resolved = true;
        }
        _ => {}
    }
}
