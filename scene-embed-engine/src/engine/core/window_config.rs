use bevy::prelude::*;
use bevy::window::PresentMode;

/// Bind the engine to the host glue's shadow-DOM canvas on web targets,
/// capping the device pixel ratio the renderer honours.
pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        use bevy::window::WindowResolution;
        use constants::camera::MAX_PIXEL_RATIO;
        use constants::viewer::CANVAS_SELECTOR;

        let mut window = Window {
            canvas: Some(CANVAS_SELECTOR.into()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            present_mode: PresentMode::AutoVsync,
            ..default()
        };
        if let Some(web_window) = web_sys::window() {
            let ratio = (web_window.device_pixel_ratio() as f32).min(MAX_PIXEL_RATIO);
            window.resolution = WindowResolution::default().with_scale_factor_override(ratio);
        }
        window
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}

/// Toggle the host canvas between the grab and grabbing cursors.
pub fn set_canvas_cursor(grabbing: bool) {
    #[cfg(target_arch = "wasm32")]
    {
        use constants::viewer::CANVAS_SELECTOR;
        use wasm_bindgen::JsCast;

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Ok(Some(element)) = document.query_selector(CANVAS_SELECTOR) else {
            return;
        };
        let Some(element) = element.dyn_ref::<web_sys::HtmlElement>() else {
            return;
        };
        let _ = element
            .style()
            .set_property("cursor", if grabbing { "grabbing" } else { "grab" });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = grabbing;
    }
}
