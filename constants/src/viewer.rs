use bevy::color::Color;

pub const ELEMENT_TAG: &str = "scene-3d";
/// Canvas the host glue places inside the element's shadow DOM.
pub const CANVAS_SELECTOR: &str = "#scene-3d-canvas";

/// Default diagnostic filter. `RUST_LOG` overrides it without code changes.
pub const LOG_FILTER: &str = "info,wgpu=error,naga=warn";

pub const KEY_LIGHT_LUX: f32 = 5_000.0;
pub const FILL_LIGHT_LUX: f32 = 1_000.0;
pub const AMBIENT_BRIGHTNESS: f32 = 300.0;

pub const GROUND_PLANE_SIZE: f32 = 40.0;
pub const GROUND_PLANE_Y: f32 = -0.55;

pub const OVERLAY_TEXT_COLOR: Color = Color::srgb(0.4, 0.4, 0.4);
pub const PROGRESS_TRACK_COLOR: Color = Color::srgb(0.933, 0.933, 0.933);
pub const PROGRESS_FILL_COLOR: Color = Color::srgb(0.4, 0.4, 0.4);
pub const RELOAD_BUTTON_COLOR: Color = Color::BLACK;
pub const RELOAD_LABEL_COLOR: Color = Color::WHITE;
