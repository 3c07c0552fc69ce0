use bevy::asset::Asset;
use bevy::math::{EulerRot, Quat, Vec3};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use constants::model::{
    DEFAULT_MODEL_SCALE, DEFAULT_MODEL_X, DEFAULT_MODEL_Y_NO_CONFIG, DEFAULT_MODEL_Y_WITH_CONFIG,
    DEFAULT_MODEL_YAW, DEFAULT_MODEL_Z,
};

/// Placement manifest as a loadable asset. Mirrors the hosted JSON array
/// exactly: one entry per model id, each with optional placement and camera
/// overrides.
#[derive(Asset, TypePath, Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlacementManifest(pub Vec<ModelConfig>);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelPlacement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraPlacement>,
}

/// Root transform overrides. Rotation is XYZ euler in radians.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelPlacement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<[f32; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<[f32; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<ScaleSpec>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScaleSpec {
    Uniform(f32),
    PerAxis([f32; 3]),
}

/// Camera overrides. Rotation is XYZ euler in degrees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraPlacement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<[f32; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<[f32; 3]>,
}

/// Pick the manifest entry for a requested model id: exact integer match,
/// else the first entry, else none.
pub fn select_model_config<'a>(
    entries: &'a [ModelConfig],
    model_id: &str,
) -> Option<&'a ModelConfig> {
    model_id
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|id| entries.iter().find(|entry| entry.id == id))
        .or_else(|| entries.first())
}

/// Root transform for a loaded model. A `model` block applies its fields
/// over an identity transform; otherwise the built-in placement applies,
/// with the vertical offset depending on whether any manifest entry was
/// found at all.
pub fn placement_transform(config: Option<&ModelConfig>) -> Transform {
    if let Some(placement) = config.and_then(|c| c.model.as_ref()) {
        let mut transform = Transform::IDENTITY;
        if let Some([x, y, z]) = placement.position {
            transform.translation = Vec3::new(x, y, z);
        }
        if let Some([x, y, z]) = placement.rotation {
            transform.rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
        }
        match placement.scale {
            Some(ScaleSpec::Uniform(s)) => transform.scale = Vec3::splat(s),
            Some(ScaleSpec::PerAxis([x, y, z])) => transform.scale = Vec3::new(x, y, z),
            None => {}
        }
        transform
    } else {
        let y = if config.is_some() {
            DEFAULT_MODEL_Y_WITH_CONFIG
        } else {
            DEFAULT_MODEL_Y_NO_CONFIG
        };
        Transform {
            translation: Vec3::new(DEFAULT_MODEL_X, y, DEFAULT_MODEL_Z),
            rotation: Quat::from_euler(EulerRot::XYZ, 0.0, DEFAULT_MODEL_YAW, 0.0),
            scale: Vec3::splat(DEFAULT_MODEL_SCALE),
        }
    }
}

/// Apply a configured camera override to the live camera transform,
/// converting the euler degrees to radians.
pub fn apply_camera_override(config: &CameraPlacement, transform: &mut Transform) {
    if let Some([x, y, z]) = config.position {
        transform.translation = Vec3::new(x, y, z);
    }
    if let Some([x, y, z]) = config.rotation {
        transform.rotation = Quat::from_euler(
            EulerRot::XYZ,
            x.to_radians(),
            y.to_radians(),
            z.to_radians(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64) -> ModelConfig {
        ModelConfig {
            id,
            model: None,
            camera: None,
        }
    }

    #[test]
    fn test_selection_prefers_the_exact_id() {
        let entries = vec![entry(1), entry(2), entry(3)];
        assert_eq!(select_model_config(&entries, "2").unwrap().id, 2);
    }

    #[test]
    fn test_selection_falls_back_to_the_first_entry() {
        let entries = vec![entry(5), entry(6)];
        assert_eq!(select_model_config(&entries, "42").unwrap().id, 5);
        assert_eq!(select_model_config(&entries, "not-a-number").unwrap().id, 5);
    }

    #[test]
    fn test_selection_of_an_empty_manifest_is_none() {
        assert!(select_model_config(&[], "1").is_none());
    }

    #[test]
    fn test_configured_position_and_uniform_scale_apply() {
        let config: ModelConfig = serde_json::from_str(
            r#"{"id": 2, "model": {"position": [1.0, 2.0, 3.0], "scale": 2.0}}"#,
        )
        .unwrap();

        let transform = placement_transform(Some(&config));
        assert_eq!(transform.translation, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(transform.scale, Vec3::splat(2.0));
        assert_eq!(transform.rotation, Quat::IDENTITY);
    }

    #[test]
    fn test_per_axis_scale_applies() {
        let config: ModelConfig =
            serde_json::from_str(r#"{"id": 4, "model": {"scale": [1.0, 2.0, 3.0]}}"#).unwrap();

        let transform = placement_transform(Some(&config));
        assert_eq!(transform.scale, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(transform.translation, Vec3::ZERO);
    }

    #[test]
    fn test_defaults_with_a_config_entry_use_the_deeper_offset() {
        let transform = placement_transform(Some(&entry(1)));
        assert_eq!(transform.scale, Vec3::splat(DEFAULT_MODEL_SCALE));
        assert_eq!(
            transform.translation,
            Vec3::new(DEFAULT_MODEL_X, DEFAULT_MODEL_Y_WITH_CONFIG, DEFAULT_MODEL_Z)
        );
        let expected = Quat::from_euler(EulerRot::XYZ, 0.0, DEFAULT_MODEL_YAW, 0.0);
        assert!(transform.rotation.angle_between(expected) < 1e-5);
    }

    #[test]
    fn test_defaults_without_any_config_use_the_shallow_offset() {
        let transform = placement_transform(None);
        assert_eq!(
            transform.translation,
            Vec3::new(DEFAULT_MODEL_X, DEFAULT_MODEL_Y_NO_CONFIG, DEFAULT_MODEL_Z)
        );
        let expected = Quat::from_euler(EulerRot::XYZ, 0.0, DEFAULT_MODEL_YAW, 0.0);
        assert!(transform.rotation.angle_between(expected) < 1e-5);
    }

    #[test]
    fn test_camera_override_converts_degrees_to_radians() {
        let config: CameraPlacement = serde_json::from_str(
            r#"{"position": [0.0, 1.0, 5.0], "rotation": [-90.0, 0.0, 0.0]}"#,
        )
        .unwrap();

        let mut transform = Transform::IDENTITY;
        apply_camera_override(&config, &mut transform);
        assert_eq!(transform.translation, Vec3::new(0.0, 1.0, 5.0));
        let expected = Quat::from_euler(EulerRot::XYZ, -std::f32::consts::FRAC_PI_2, 0.0, 0.0);
        assert!(transform.rotation.angle_between(expected) < 1e-5);
    }

    #[test]
    fn test_partial_camera_override_leaves_missing_fields() {
        let config: CameraPlacement =
            serde_json::from_str(r#"{"position": [2.0, 2.0, 2.0]}"#).unwrap();

        let mut transform = Transform::from_xyz(9.0, 9.0, 9.0);
        let before = transform.rotation;
        apply_camera_override(&config, &mut transform);
        assert_eq!(transform.translation, Vec3::splat(2.0));
        assert_eq!(transform.rotation, before);
    }
}
