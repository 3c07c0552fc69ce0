use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::core::app_state::ViewerState;
use constants::camera::{CAMERA_EVENT_MIN_INTERVAL, FIELD_OF_VIEW_DEG};

#[cfg(target_arch = "wasm32")]
use constants::camera::CAMERA_EVENT_NAME;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapshotVec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Vec3> for SnapshotVec3 {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

/// Detached copy of the live camera: position, XYZ euler rotation in
/// radians, field of view in degrees. Receivers can mutate their copy
/// freely; the live camera is untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraSnapshot {
    pub position: SnapshotVec3,
    pub rotation: SnapshotVec3,
    pub fov: f32,
}

/// In-app publication point for camera snapshots. External widgets get the
/// same payload through the document event.
#[derive(Event, Debug, Clone, Copy)]
pub struct CameraUpdated(pub CameraSnapshot);

#[derive(Resource, Default)]
pub struct CameraFeed {
    pub latest: Option<CameraSnapshot>,
    last_emit: f32,
}

impl CameraFeed {
    /// At most one emission per interval; the very first is always allowed.
    pub fn should_emit(&mut self, now: f32) -> bool {
        if self.latest.is_some() && now - self.last_emit < CAMERA_EVENT_MIN_INTERVAL {
            return false;
        }
        self.last_emit = now;
        true
    }
}

pub struct CameraBridgePlugin;

impl Plugin for CameraBridgePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraFeed>()
            .add_event::<CameraUpdated>()
            .add_systems(
                Update,
                publish_camera_updates.run_if(not(in_state(ViewerState::Initializing))),
            );
    }
}

/// Copy the live camera into a snapshot on a throttled cadence and publish
/// it in-app and as a document-level event.
pub fn publish_camera_updates(
    mut feed: ResMut<CameraFeed>,
    camera: Query<(&Transform, &Projection), With<Camera3d>>,
    time: Res<Time>,
    mut events: EventWriter<CameraUpdated>,
) {
    let Ok((transform, projection)) = camera.single() else {
        return;
    };
    if !feed.should_emit(time.elapsed_secs()) {
        return;
    }

    let (rx, ry, rz) = transform.rotation.to_euler(EulerRot::XYZ);
    let fov = match projection {
        Projection::Perspective(perspective) => perspective.fov.to_degrees(),
        _ => FIELD_OF_VIEW_DEG,
    };
    let snapshot = CameraSnapshot {
        position: transform.translation.into(),
        rotation: SnapshotVec3 {
            x: rx,
            y: ry,
            z: rz,
        },
        fov,
    };

    feed.latest = Some(snapshot);
    events.write(CameraUpdated(snapshot));
    dispatch_document_event(&snapshot);
}

/// Document-scoped CustomEvent for the indicator widget. The detail is a
/// parsed copy of the snapshot, never a live reference.
fn dispatch_document_event(snapshot: &CameraSnapshot) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Ok(json) = serde_json::to_string(snapshot) else {
            return;
        };
        let Ok(detail) = js_sys::JSON::parse(&json) else {
            return;
        };
        let init = web_sys::CustomEventInit::new();
        init.set_detail(&detail);
        if let Ok(event) = web_sys::CustomEvent::new_with_event_init_dict(CAMERA_EVENT_NAME, &init)
        {
            let _ = document.dispatch_event(&event);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = snapshot;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> CameraSnapshot {
        CameraSnapshot {
            position: SnapshotVec3 {
                x: 0.86,
                y: 2.52,
                z: 9.69,
            },
            rotation: SnapshotVec3 {
                x: -0.25,
                y: 0.09,
                z: 0.02,
            },
            fov: 10.0,
        }
    }

    #[test]
    fn test_emissions_are_throttled_to_the_interval() {
        let mut feed = CameraFeed::default();

        assert!(feed.should_emit(0.0));
        feed.latest = Some(snapshot());
        assert!(!feed.should_emit(0.05));
        assert!(!feed.should_emit(0.099));
        assert!(feed.should_emit(0.11));
        assert!(!feed.should_emit(0.15));
        assert!(feed.should_emit(0.25));
    }

    #[test]
    fn test_mutating_a_snapshot_copy_leaves_the_source() {
        let source = snapshot();
        let mut copy = source;
        copy.position.x = 999.0;
        copy.fov = 1.0;

        assert_eq!(source.position.x, 0.86);
        assert_eq!(source.fov, 10.0);
    }

    #[test]
    fn test_snapshots_serialize_to_the_event_contract() {
        let value = serde_json::to_value(snapshot()).unwrap();
        assert!(value["position"]["x"].is_number());
        assert!(value["rotation"]["z"].is_number());
        assert_eq!(value["fov"], 10.0);
    }
}
