//! Resilient dependency bootstrap for the embedded viewer.
//!
//! Runs once per page load, before the engine app exists: pulls the host
//! support bundle and its companion widget scripts from an ordered list of
//! CDN origins (cache-first, bounded retries, origin fallback), verifies the
//! bundle installed its global, and only then asks it to define the
//! `<scene-3d>` element. Any failure leaves the element undefined so
//! instance markup on the page stays inert.

/// Bootstrap error taxonomy: retryable fetch failures vs terminal aborts.
pub mod error;

/// Cache-first multi-origin script loading with bounded fixed-delay retries.
pub mod loader;

/// Fixed-interval polling for the host bundle's global capability symbol.
pub mod readiness;

/// IndexedDB persistence for fetched script text.
#[cfg(target_arch = "wasm32")]
pub mod script_cache;

/// Browser fetch/injection/probe implementations of the bootstrap seams.
#[cfg(target_arch = "wasm32")]
pub mod web;

/// Ordered one-shot bootstrap: primary bundle, capability check, widget
/// scripts in parallel, element registration.
#[cfg(target_arch = "wasm32")]
pub async fn load_dependencies() -> Result<(), error::BootError> {
    use constants::cdn::{
        BRAND_BADGE_PATH, CAMERA_INDICATOR_PATH, CAPABILITY_POLL_INTERVAL_MS,
        CAPABILITY_TIMEOUT_MS, CDN_SOURCES, HOST_BUNDLE_PATH, HOST_GLOBAL_SYMBOL,
    };
    use js_sys::Array;
    use wasm_bindgen::JsValue;
    use wasm_bindgen_futures::{JsFuture, future_to_promise};

    let store = script_cache::IndexedDbStore::open().await;
    let loader = loader::ResourceLoader::new(
        CDN_SOURCES.iter().map(|s| s.to_string()).collect(),
        web::WebScriptFetch,
        store,
    );

    let bundle = loader.load_resource(HOST_BUNDLE_PATH).await?;
    web::inject_script(&bundle)?;

    readiness::await_capability(
        || web::capability_present(HOST_GLOBAL_SYMBOL),
        async |ms| web::sleep_ms(ms).await,
        CAPABILITY_TIMEOUT_MS,
        CAPABILITY_POLL_INTERVAL_MS,
    )
    .await?;

    let widgets = Array::new();
    for path in [CAMERA_INDICATOR_PATH, BRAND_BADGE_PATH] {
        let loader = loader.clone();
        widgets.push(&future_to_promise(async move {
            let content = loader
                .load_resource(path)
                .await
                .map_err(|_| JsValue::from_str(path))?;
            web::inject_script(&content).map_err(|_| JsValue::from_str(path))?;
            Ok(JsValue::NULL)
        }));
    }
    JsFuture::from(js_sys::Promise::all(&widgets))
        .await
        .map_err(|err| error::BootError::AllSourcesExhausted {
            path: err.as_string().unwrap_or_default(),
        })?;

    web::register_host_element()?;
    Ok(())
}
