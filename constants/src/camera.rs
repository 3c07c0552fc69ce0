use bevy::math::Vec3;

pub const FIELD_OF_VIEW_DEG: f32 = 10.0;
pub const NEAR_PLANE: f32 = 0.5;
pub const FAR_PLANE: f32 = 1000.0;

pub const INITIAL_CAMERA_POSITION: Vec3 = Vec3::new(0.86, 2.52, 9.69);
/// XYZ euler, degrees. Overridden by the orbit controller on the first frame.
pub const INITIAL_CAMERA_ROTATION_DEG: [f32; 3] = [-14.60, 4.93, 1.28];

pub const ORBIT_TARGET: Vec3 = Vec3::ZERO;
pub const MIN_AZIMUTH: f32 = -0.52;
pub const MAX_AZIMUTH: f32 = 0.39;
pub const MIN_POLAR: f32 = 1.12;
pub const MAX_POLAR: f32 = 1.44;
pub const ROTATE_SPEED: f32 = 0.5;
/// Per-second approach rate of the damped orbit angles.
pub const ORBIT_SMOOTHING: f32 = 12.0;

pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Document-level event carrying camera snapshots for the indicator widget.
pub const CAMERA_EVENT_NAME: &str = "camera-update";
/// Minimum seconds between two camera snapshot emissions.
pub const CAMERA_EVENT_MIN_INTERVAL: f32 = 0.1;
