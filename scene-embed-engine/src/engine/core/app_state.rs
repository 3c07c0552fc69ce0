use bevy::gltf::Gltf;
use bevy::prelude::*;

use crate::engine::assets::model_config::ModelConfig;
use constants::model::DEFAULT_MODEL_ID;

/// Per-mount lifecycle. A fresh mount starts a fresh process, so there is no
/// re-entry into `Initializing`; model swaps bounce between `LoadingModel`
/// and `Ready`.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum ViewerState {
    #[default]
    Initializing,
    LoadingModel,
    Ready,
    Failed,
}

/// Sent when the host element's `id` attribute changes.
#[derive(Event, Debug, Clone)]
pub struct ModelSwapRequest {
    pub id: String,
}

/// The requested model and its in-flight load. Replacing `gltf` abandons a
/// superseded load: its completion is simply never observed.
#[derive(Resource)]
pub struct ActiveModel {
    pub id: String,
    pub gltf: Option<Handle<Gltf>>,
    pub config: Option<ModelConfig>,
}

impl Default for ActiveModel {
    fn default() -> Self {
        Self {
            id: DEFAULT_MODEL_ID.to_string(),
            gltf: None,
            config: None,
        }
    }
}

/// The session is fully spawned after the startup schedule, so the first
/// update begins loading the requested model.
pub fn begin_initial_load(mut next_state: ResMut<NextState<ViewerState>>) {
    next_state.set(ViewerState::LoadingModel);
}
