/// Pinned version of the host support package served from the CDNs below.
pub const HOST_PACKAGE_VERSION: &str = "1.4.2";

/// CDN origins serving the host support package, in fallback priority order.
pub const CDN_SOURCES: [&str; 2] = [
    "https://cdn.jsdelivr.net/npm/scene-embed-host@1.4.2",
    "https://unpkg.com/scene-embed-host@1.4.2",
];

/// Primary bundle: defines the `<scene-3d>` element glue and shadow-DOM canvas.
pub const HOST_BUNDLE_PATH: &str = "/dist/scene-embed-host.min.js";

/// Auxiliary widget scripts loaded in parallel after the primary bundle.
pub const CAMERA_INDICATOR_PATH: &str = "/dist/widgets/camera-indicator.min.js";
pub const BRAND_BADGE_PATH: &str = "/dist/widgets/brand-badge.min.js";

/// Global installed by the host bundle once it has executed.
pub const HOST_GLOBAL_SYMBOL: &str = "SceneEmbedHost";
/// Registration hook on the host global that defines the custom element.
pub const REGISTER_ELEMENT_FN: &str = "registerElement";

pub const SCRIPT_DB_NAME: &str = "scene-embed-cache";
pub const SCRIPT_STORE_NAME: &str = "scripts";

pub const MAX_FETCH_RETRIES: u32 = 2;
pub const RETRY_DELAY_MS: u32 = 1000;

pub const CAPABILITY_TIMEOUT_MS: u32 = 10_000;
pub const CAPABILITY_POLL_INTERVAL_MS: u32 = 100;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origins_pin_the_package_version() {
        for origin in CDN_SOURCES {
            assert!(origin.contains(HOST_PACKAGE_VERSION));
            assert!(!origin.ends_with('/'));
        }
        assert!(HOST_BUNDLE_PATH.starts_with('/'));
    }
}
