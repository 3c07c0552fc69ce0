/// Embeddable 3D model viewer engine entry point.
mod boot;
mod bridge;
mod engine;
mod rpc;

use engine::core::app_setup::create_app;

fn main() {
    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen_futures::spawn_local(async {
            match boot::load_dependencies().await {
                Ok(()) => {
                    create_app().run();
                }
                Err(err) => {
                    web_sys::console::error_1(
                        &format!("viewer bootstrap failed: {err}").into(),
                    );
                }
            }
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_app().run();
    }
}
