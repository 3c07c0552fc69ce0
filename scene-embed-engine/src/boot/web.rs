//! Browser implementations of the bootstrap seams: fetch, retry sleep,
//! script injection, and host capability probing.

use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::boot::error::{BootError, FetchError};
use crate::boot::loader::ScriptFetch;
use constants::cdn::{HOST_GLOBAL_SYMBOL, REGISTER_ELEMENT_FN};

#[derive(Clone, Copy)]
pub struct WebScriptFetch;

impl ScriptFetch for WebScriptFetch {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let transport_err = || FetchError {
            url: url.to_string(),
            status: None,
        };

        let window = web_sys::window().ok_or_else(transport_err)?;
        let response = JsFuture::from(window.fetch_with_str(url))
            .await
            .map_err(|_| transport_err())?;
        let response: Response = response.dyn_into().map_err(|_| transport_err())?;

        if !response.ok() {
            return Err(FetchError {
                url: url.to_string(),
                status: Some(response.status()),
            });
        }

        let text_promise = response.text().map_err(|_| transport_err())?;
        let text = JsFuture::from(text_promise)
            .await
            .map_err(|_| transport_err())?;
        text.as_string().ok_or_else(transport_err)
    }

    async fn sleep(&self, ms: u32) {
        sleep_ms(ms).await;
    }
}

/// Awaitable `setTimeout`.
pub async fn sleep_ms(ms: u32) {
    let promise = Promise::new(&mut |resolve, _reject| {
        if let Some(window) = web_sys::window() {
            let _ = window
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms as i32);
        }
    });
    let _ = JsFuture::from(promise).await;
}

/// Run fetched script text in the page's global scope so it can install its
/// globals.
pub fn inject_script(content: &str) -> Result<(), BootError> {
    let failed = |reason: &str| BootError::InjectionFailed {
        reason: reason.to_string(),
    };

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| failed("no document"))?;
    let element = document
        .create_element("script")
        .map_err(|_| failed("script element creation rejected"))?;
    element.set_text_content(Some(content));
    let head = document.head().ok_or_else(|| failed("no document head"))?;
    head.append_child(&element)
        .map_err(|_| failed("append to head rejected"))?;
    Ok(())
}

/// True once the named global exists on `window`.
pub fn capability_present(symbol: &str) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    Reflect::get(&window, &JsValue::from_str(symbol))
        .map(|value| !value.is_undefined() && !value.is_null())
        .unwrap_or(false)
}

/// Ask the loaded host bundle to define the custom element.
pub fn register_host_element() -> Result<(), BootError> {
    let failed = |reason: &str| BootError::RegistrationFailed {
        reason: reason.to_string(),
    };

    let window = web_sys::window().ok_or_else(|| failed("no window"))?;
    let host = Reflect::get(&window, &JsValue::from_str(HOST_GLOBAL_SYMBOL))
        .map_err(|_| failed("host global missing"))?;
    let register = Reflect::get(&host, &JsValue::from_str(REGISTER_ELEMENT_FN))
        .map_err(|_| failed("registration hook missing"))?;
    let register: Function = register
        .dyn_into()
        .map_err(|_| failed("registration hook is not callable"))?;
    register.call0(&host).map_err(|_| failed("registration hook threw"))?;
    Ok(())
}
