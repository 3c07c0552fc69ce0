use bevy::log::warn;

use crate::boot::error::{BootError, FetchError};
use constants::cdn::{MAX_FETCH_RETRIES, RETRY_DELAY_MS};

/// Network access seam. The wasm implementation wraps `window.fetch`.
pub trait ScriptFetch {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
    /// Pause between retry attempts.
    async fn sleep(&self, ms: u32);
}

/// Persistent cache seam. Both operations degrade rather than fail: a broken
/// backing store reads as a miss and reports an unsuccessful write.
pub trait ScriptStore {
    async fn get(&self, url: &str) -> Option<String>;
    async fn put(&self, url: &str, content: &str) -> bool;
}

/// Fetches scripts from an ordered list of CDN origins, cache-first, with
/// bounded fixed-delay retries per origin and fallback across origins.
#[derive(Clone)]
pub struct ResourceLoader<F, S> {
    origins: Vec<String>,
    fetcher: F,
    store: S,
}

impl<F: ScriptFetch, S: ScriptStore> ResourceLoader<F, S> {
    pub fn new(origins: Vec<String>, fetcher: F, store: S) -> Self {
        Self {
            origins,
            fetcher,
            store,
        }
    }

    pub async fn load_resource(&self, path: &str) -> Result<String, BootError> {
        self.load_resource_with(path, MAX_FETCH_RETRIES, RETRY_DELAY_MS)
            .await
    }

    /// Resolve `path` against each origin in priority order. A cache hit
    /// short-circuits without touching the network; a network success is
    /// persisted before it is returned for execution.
    pub async fn load_resource_with(
        &self,
        path: &str,
        max_retries: u32,
        retry_delay_ms: u32,
    ) -> Result<String, BootError> {
        for origin in &self.origins {
            let url = format!("{origin}{path}");

            if let Some(content) = self.store.get(&url).await {
                return Ok(content);
            }

            if let Some(content) = self
                .fetch_with_retries(&url, max_retries, retry_delay_ms)
                .await
            {
                return Ok(content);
            }

            warn!("origin {origin} exhausted for {path}, trying next origin");
        }

        Err(BootError::AllSourcesExhausted {
            path: path.to_string(),
        })
    }

    async fn fetch_with_retries(
        &self,
        url: &str,
        max_retries: u32,
        retry_delay_ms: u32,
    ) -> Option<String> {
        let mut attempt = 0;
        loop {
            match self.fetcher.fetch(url).await {
                Ok(content) => {
                    // A failed write is already a silent degrade; the content
                    // is still good.
                    self.store.put(url, &content).await;
                    return Some(content);
                }
                Err(err) => {
                    attempt += 1;
                    if attempt > max_retries {
                        warn!("giving up on {url} after {attempt} attempts: {err}");
                        return None;
                    }
                    self.fetcher.sleep(retry_delay_ms).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::{HashMap, VecDeque};

    struct FakeFetch {
        responses: RefCell<HashMap<String, VecDeque<Result<String, FetchError>>>>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeFetch {
        fn new() -> Self {
            Self {
                responses: RefCell::new(HashMap::new()),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn script(mut self, url: &str, outcomes: Vec<Result<String, FetchError>>) -> Self {
            self.responses
                .get_mut()
                .insert(url.to_string(), outcomes.into());
            self
        }

        fn calls_for(&self, url: &str) -> usize {
            self.calls.borrow().iter().filter(|c| *c == url).count()
        }
    }

    impl ScriptFetch for FakeFetch {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.calls.borrow_mut().push(url.to_string());
            self.responses
                .borrow_mut()
                .get_mut(url)
                .and_then(|queue| queue.pop_front())
                .unwrap_or_else(|| {
                    Err(FetchError {
                        url: url.to_string(),
                        status: None,
                    })
                })
        }

        async fn sleep(&self, _ms: u32) {}
    }

    #[derive(Default)]
    struct MemoryStore {
        entries: RefCell<HashMap<String, String>>,
    }

    impl ScriptStore for MemoryStore {
        async fn get(&self, url: &str) -> Option<String> {
            self.entries.borrow().get(url).cloned()
        }

        async fn put(&self, url: &str, content: &str) -> bool {
            self.entries
                .borrow_mut()
                .insert(url.to_string(), content.to_string());
            true
        }
    }

    fn origins() -> Vec<String> {
        vec!["https://cdn-a.test".to_string(), "https://cdn-b.test".to_string()]
    }

    fn failure(url: &str) -> Result<String, FetchError> {
        Err(FetchError {
            url: url.to_string(),
            status: Some(503),
        })
    }

    #[test]
    fn test_cache_hit_skips_network_entirely() {
        let store = MemoryStore::default();
        pollster::block_on(store.put("https://cdn-a.test/lib.js", "cached body"));
        let fetch = FakeFetch::new();
        let loader = ResourceLoader::new(origins(), fetch, store);

        let content =
            pollster::block_on(loader.load_resource_with("/lib.js", 2, 0)).expect("cache hit");

        assert_eq!(content, "cached body");
        assert!(loader.fetcher.calls.borrow().is_empty());
    }

    #[test]
    fn test_fallback_to_second_origin_populates_its_cache_entry() {
        let fetch = FakeFetch::new()
            .script(
                "https://cdn-a.test/lib.js",
                vec![
                    failure("https://cdn-a.test/lib.js"),
                    failure("https://cdn-a.test/lib.js"),
                    failure("https://cdn-a.test/lib.js"),
                ],
            )
            .script("https://cdn-b.test/lib.js", vec![Ok("body".to_string())]);
        let loader = ResourceLoader::new(origins(), fetch, MemoryStore::default());

        let content =
            pollster::block_on(loader.load_resource_with("/lib.js", 2, 0)).expect("fallback");

        assert_eq!(content, "body");
        // maxRetries = 2 means three attempts against the first origin.
        assert_eq!(loader.fetcher.calls_for("https://cdn-a.test/lib.js"), 3);
        assert_eq!(loader.fetcher.calls_for("https://cdn-b.test/lib.js"), 1);
        let entries = loader.store.entries.borrow();
        assert_eq!(entries.get("https://cdn-b.test/lib.js").unwrap(), "body");
        assert!(!entries.contains_key("https://cdn-a.test/lib.js"));
    }

    #[test]
    fn test_exhausting_every_origin_fails_without_cache_writes() {
        let loader = ResourceLoader::new(origins(), FakeFetch::new(), MemoryStore::default());

        let err = pollster::block_on(loader.load_resource_with("/lib.js", 1, 0)).unwrap_err();

        assert_eq!(
            err,
            BootError::AllSourcesExhausted {
                path: "/lib.js".to_string()
            }
        );
        assert_eq!(loader.fetcher.calls_for("https://cdn-a.test/lib.js"), 2);
        assert_eq!(loader.fetcher.calls_for("https://cdn-b.test/lib.js"), 2);
        assert!(loader.store.entries.borrow().is_empty());
    }

    #[test]
    fn test_recovery_within_retry_budget_stays_on_first_origin() {
        let fetch = FakeFetch::new().script(
            "https://cdn-a.test/lib.js",
            vec![
                failure("https://cdn-a.test/lib.js"),
                Ok("late body".to_string()),
            ],
        );
        let loader = ResourceLoader::new(origins(), fetch, MemoryStore::default());

        let content =
            pollster::block_on(loader.load_resource_with("/lib.js", 2, 0)).expect("retry");

        assert_eq!(content, "late body");
        assert_eq!(loader.fetcher.calls_for("https://cdn-b.test/lib.js"), 0);
        assert_eq!(
            loader
                .store
                .entries
                .borrow()
                .get("https://cdn-a.test/lib.js")
                .unwrap(),
            "late body"
        );
    }
}
