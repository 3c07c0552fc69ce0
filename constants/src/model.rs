/// Storage host serving per-model directories. Only JSON-suffixed names are
/// servable there, hence the `_bin.json` sibling convention.
pub const MODEL_BASE_URL: &str = "https://assets.scene-embed.dev/models";

/// Placement manifest served alongside the hosting page's assets.
pub const PLACEMENT_MANIFEST_PATH: &str = "models.manifest.json";

pub const DEFAULT_MODEL_ID: &str = "1";

pub const DEFAULT_MODEL_SCALE: f32 = 0.6;
pub const DEFAULT_MODEL_X: f32 = -0.35;
pub const DEFAULT_MODEL_Z: f32 = 1.0;
/// Vertical default offset when a manifest entry exists but has no model block.
pub const DEFAULT_MODEL_Y_WITH_CONFIG: f32 = -1.0;
/// Vertical default offset when no manifest entry applies at all.
pub const DEFAULT_MODEL_Y_NO_CONFIG: f32 = -0.55;
pub const DEFAULT_MODEL_YAW: f32 = std::f32::consts::PI * 3.0 - 0.1;

/// Descriptor size assumed when the transfer total is unknown.
pub const PROGRESS_BASELINE_BYTES: u64 = 1_000_000;
pub const PROGRESS_ESTIMATE_CAP: f32 = 0.99;

pub const BIN_EXTENSION: &str = ".bin";
pub const BIN_SIBLING_SUFFIX: &str = "_bin.json";
