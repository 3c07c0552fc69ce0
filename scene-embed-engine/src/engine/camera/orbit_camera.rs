use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::engine::core::window_config::set_canvas_cursor;
use constants::camera::{
    INITIAL_CAMERA_POSITION, MAX_AZIMUTH, MAX_POLAR, MIN_AZIMUTH, MIN_POLAR, ORBIT_SMOOTHING,
    ORBIT_TARGET, ROTATE_SPEED,
};

/// Orbit state around a fixed target, restricted to a narrow angular window
/// with no pan or zoom. Azimuth is measured around +Y from +Z, polar down
/// from +Y.
#[derive(Resource)]
pub struct OrbitController {
    pub target: Vec3,
    pub radius: f32,
    pub azimuth: f32,
    pub polar: f32,
    smoothed_azimuth: f32,
    smoothed_polar: f32,
    pub is_grabbing: bool,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::from_pose(INITIAL_CAMERA_POSITION, ORBIT_TARGET)
    }
}

impl OrbitController {
    /// Derive orbit angles from a camera position, clamped into the allowed
    /// window.
    pub fn from_pose(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let radius = offset.length().max(f32::EPSILON);
        let azimuth = offset.x.atan2(offset.z).clamp(MIN_AZIMUTH, MAX_AZIMUTH);
        let polar = (offset.y / radius)
            .clamp(-1.0, 1.0)
            .acos()
            .clamp(MIN_POLAR, MAX_POLAR);
        Self {
            target,
            radius,
            azimuth,
            polar,
            smoothed_azimuth: azimuth,
            smoothed_polar: polar,
            is_grabbing: false,
        }
    }

    /// Re-adopt the camera's pose, e.g. after a configured camera override.
    pub fn resync_from(&mut self, camera: &Transform) {
        let grabbing = self.is_grabbing;
        *self = Self::from_pose(camera.translation, self.target);
        self.is_grabbing = grabbing;
    }

    pub fn rotate_by(&mut self, delta_azimuth: f32, delta_polar: f32) {
        self.azimuth = (self.azimuth + delta_azimuth).clamp(MIN_AZIMUTH, MAX_AZIMUTH);
        self.polar = (self.polar + delta_polar).clamp(MIN_POLAR, MAX_POLAR);
    }

    /// Advance the damped angles toward their targets and return the camera
    /// position they describe.
    pub fn damped_position(&mut self, delta_secs: f32) -> Vec3 {
        let t = (ORBIT_SMOOTHING * delta_secs).min(1.0);
        self.smoothed_azimuth += (self.azimuth - self.smoothed_azimuth) * t;
        self.smoothed_polar += (self.polar - self.smoothed_polar) * t;
        self.target + self.offset(self.smoothed_azimuth, self.smoothed_polar)
    }

    fn offset(&self, azimuth: f32, polar: f32) -> Vec3 {
        Vec3::new(
            self.radius * polar.sin() * azimuth.sin(),
            self.radius * polar.cos(),
            self.radius * polar.sin() * azimuth.cos(),
        )
    }
}

/// Pointer-driven orbit with grab-cursor feedback. Left drag and touch drag
/// orbit; wheel and secondary buttons are deliberately ignored.
pub fn orbit_camera_controller(
    mut orbit: ResMut<OrbitController>,
    mut camera: Query<&mut Transform, With<Camera3d>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    mut mouse_motion: EventReader<MouseMotion>,
    windows: Query<&Window, With<PrimaryWindow>>,
    time: Res<Time>,
) {
    let Ok(mut camera_transform) = camera.single_mut() else {
        return;
    };

    let grabbing = mouse_button.pressed(MouseButton::Left) || touches.iter().next().is_some();
    if grabbing != orbit.is_grabbing {
        orbit.is_grabbing = grabbing;
        set_canvas_cursor(grabbing);
    }

    let mut drag = Vec2::ZERO;
    if mouse_button.pressed(MouseButton::Left) {
        drag += mouse_motion.read().map(|motion| motion.delta).sum::<Vec2>();
    } else {
        mouse_motion.clear();
    }
    for touch in touches.iter() {
        drag += touch.delta();
    }

    if drag != Vec2::ZERO {
        let height = windows
            .single()
            .map(|window| window.height())
            .unwrap_or(720.0)
            .max(1.0);
        let angle_per_pixel = ROTATE_SPEED * std::f32::consts::TAU / height;
        orbit.rotate_by(-drag.x * angle_per_pixel, -drag.y * angle_per_pixel);
    }

    let position = orbit.damped_position(time.delta_secs());
    camera_transform.translation = position;
    let target = orbit.target;
    camera_transform.look_at(target, Vec3::Y);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_roundtrip_reconstructs_the_position() {
        let mut orbit = OrbitController::from_pose(INITIAL_CAMERA_POSITION, ORBIT_TARGET);
        // A long step converges the damped angles onto their targets.
        let position = orbit.damped_position(10.0);
        assert!((position - INITIAL_CAMERA_POSITION).length() < 1e-3);
    }

    #[test]
    fn test_rotation_clamps_to_the_angular_window() {
        let mut orbit = OrbitController::default();
        orbit.rotate_by(10.0, 10.0);
        assert_eq!(orbit.azimuth, MAX_AZIMUTH);
        assert_eq!(orbit.polar, MAX_POLAR);

        orbit.rotate_by(-20.0, -20.0);
        assert_eq!(orbit.azimuth, MIN_AZIMUTH);
        assert_eq!(orbit.polar, MIN_POLAR);
    }

    #[test]
    fn test_resync_adopts_an_overridden_camera_pose() {
        let mut orbit = OrbitController::default();
        orbit.is_grabbing = true;

        let override_pose = Transform::from_xyz(0.5, 2.0, 8.0);
        orbit.resync_from(&override_pose);

        assert!(orbit.is_grabbing);
        let expected_radius = override_pose.translation.length();
        assert!((orbit.radius - expected_radius).abs() < 1e-4);
    }

    #[test]
    fn test_initial_pose_sits_inside_the_window() {
        let orbit = OrbitController::default();
        assert!(orbit.azimuth > MIN_AZIMUTH && orbit.azimuth < MAX_AZIMUTH);
        assert!(orbit.polar > MIN_POLAR && orbit.polar < MAX_POLAR);
    }
}
