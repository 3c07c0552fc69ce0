//! IndexedDB-backed persistent script cache.
//!
//! One object store keyed by resource URL, records `{url, content, timestamp}`.
//! Entries are overwritten on re-fetch and never expired. Every backing-store
//! failure degrades to a miss (or an unsuccessful write) so the loader falls
//! through to the network path transparently.

use bevy::log::warn;
use js_sys::{Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    IdbDatabase, IdbObjectStoreParameters, IdbOpenDbRequest, IdbRequest, IdbTransactionMode,
};

use crate::boot::loader::ScriptStore;
use constants::cdn::{SCRIPT_DB_NAME, SCRIPT_STORE_NAME};

#[derive(Clone)]
pub struct IndexedDbStore {
    db: Option<IdbDatabase>,
}

impl IndexedDbStore {
    /// Open (or create) the cache database. Never fails: open errors yield a
    /// store that is permanently empty. Await this once and share the handle
    /// so early concurrent callers cannot race store creation.
    pub async fn open() -> Self {
        match open_database().await {
            Ok(db) => Self { db: Some(db) },
            Err(err) => {
                warn!("script cache unavailable, continuing without: {err:?}");
                Self { db: None }
            }
        }
    }
}

impl ScriptStore for IndexedDbStore {
    async fn get(&self, url: &str) -> Option<String> {
        let db = self.db.as_ref()?;
        match read_entry(db, url).await {
            Ok(content) => content,
            Err(err) => {
                warn!("script cache read failed for {url}: {err:?}");
                None
            }
        }
    }

    async fn put(&self, url: &str, content: &str) -> bool {
        let Some(db) = self.db.as_ref() else {
            return false;
        };
        match write_entry(db, url, content).await {
            Ok(()) => true,
            Err(err) => {
                warn!("script cache write failed for {url}: {err:?}");
                false
            }
        }
    }
}

async fn open_database() -> Result<IdbDatabase, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let factory = window
        .indexed_db()?
        .ok_or_else(|| JsValue::from_str("indexedDB unsupported"))?;
    let request = factory.open_with_u32(SCRIPT_DB_NAME, 1)?;

    let upgrade = Closure::<dyn FnMut(web_sys::IdbVersionChangeEvent)>::new(
        |event: web_sys::IdbVersionChangeEvent| {
            let Some(target) = event.target() else {
                return;
            };
            let request: IdbOpenDbRequest = target.unchecked_into();
            let Ok(result) = request.result() else {
                return;
            };
            let db: IdbDatabase = result.unchecked_into();
            if !db.object_store_names().contains(SCRIPT_STORE_NAME) {
                let params = IdbObjectStoreParameters::new();
                params.set_key_path(&JsValue::from_str("url"));
                let _ = db.create_object_store_with_optional_parameters(SCRIPT_STORE_NAME, &params);
            }
        },
    );
    request.set_onupgradeneeded(Some(upgrade.as_ref().unchecked_ref()));
    upgrade.forget();

    await_request(&request).await?;
    let db: IdbDatabase = request.result()?.unchecked_into();
    Ok(db)
}

async fn read_entry(db: &IdbDatabase, url: &str) -> Result<Option<String>, JsValue> {
    let transaction = db.transaction_with_str(SCRIPT_STORE_NAME)?;
    let store = transaction.object_store(SCRIPT_STORE_NAME)?;
    let request = store.get(&JsValue::from_str(url))?;
    await_request(&request).await?;

    let result = request.result()?;
    if result.is_undefined() || result.is_null() {
        return Ok(None);
    }
    let content = Reflect::get(&result, &JsValue::from_str("content"))?;
    Ok(content.as_string())
}

async fn write_entry(db: &IdbDatabase, url: &str, content: &str) -> Result<(), JsValue> {
    let transaction =
        db.transaction_with_str_and_mode(SCRIPT_STORE_NAME, IdbTransactionMode::Readwrite)?;
    let store = transaction.object_store(SCRIPT_STORE_NAME)?;

    let record = js_sys::Object::new();
    Reflect::set(&record, &JsValue::from_str("url"), &JsValue::from_str(url))?;
    Reflect::set(
        &record,
        &JsValue::from_str("content"),
        &JsValue::from_str(content),
    )?;
    Reflect::set(
        &record,
        &JsValue::from_str("timestamp"),
        &js_sys::Date::now().into(),
    )?;

    let request = store.put(&record)?;
    await_request(&request).await?;
    Ok(())
}

/// Bridge an IDB request's success/error callbacks into a future.
async fn await_request(request: &IdbRequest) -> Result<(), JsValue> {
    let promise = Promise::new(&mut |resolve, reject| {
        let on_success = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
            let _ = resolve.call0(&JsValue::NULL);
        });
        let on_error = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
            let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("idb request failed"));
        });
        request.set_onsuccess(Some(on_success.as_ref().unchecked_ref()));
        request.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        // Ownership moves to the JS GC with the request.
        on_success.forget();
        on_error.forget();
    });
    JsFuture::from(promise).await?;
    Ok(())
}
