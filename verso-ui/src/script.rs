//! Lazy, de-duplicated loading of external scripts.
//!
//! A script is loaded by appending an element to the document body and
//! waiting for the fetch to complete. Completed loads are cached by URL, so
//! a second consumer of the same script gets an immediate ready state and no
//! second element. The cache records only *completed* loads: two consumers
//! that request the same URL while it is still in flight will each append an
//! element and fetch independently. That redundancy is accepted; both loads
//! converge on the same cached entry.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

use crate::error::UiError;

/// Fetches the content of a script element once it is in the document.
#[async_trait]
pub trait ScriptFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<(), UiError>;
}

/// Optional callbacks around a script's lifecycle.
///
/// All hooks default to no-ops. `on_create` fires after the element is
/// appended but before the fetch; `on_load` and `on_error` fire after it.
#[derive(Default)]
pub struct ScriptHooks {
    pub on_create: Option<Box<dyn Fn(&str) + Send + Sync>>,
    pub on_load: Option<Box<dyn Fn(&str) + Send + Sync>>,
    pub on_error: Option<Box<dyn Fn(&str, &UiError) + Send + Sync>>,
}

/// A script element currently present in the document body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptElement {
    pub id: usize,
    pub url: String,
}

/// Loads external scripts on demand and caches completed loads by URL.
pub struct ScriptLoader {
    fetcher: Arc<dyn ScriptFetcher>,
    loaded: Mutex<HashSet<String>>,
    body: Mutex<Vec<ScriptElement>>,
    next_id: AtomicUsize,
}

impl ScriptLoader {
    pub fn new(fetcher: Arc<dyn ScriptFetcher>) -> Self {
        Self {
            fetcher,
            loaded: Mutex::new(HashSet::new()),
            body: Mutex::new(Vec::new()),
            next_id: AtomicUsize::new(0),
        }
    }

    /// Ensures `url` is loaded, appending and fetching it if the cache has
    /// no completed load for it. The returned guard reports readiness and
    /// removes the appended element when dropped.
    pub async fn ensure(self: &Arc<Self>, url: &str, hooks: ScriptHooks) -> ScriptGuard {
        if self.loaded.lock().unwrap().contains(url) {
            debug!("Script '{}' already loaded, skipping element creation", url);
            return ScriptGuard {
                loader: self.clone(),
                element_id: None,
                ready: true,
            };
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.body.lock().unwrap().push(ScriptElement {
            id,
            url: url.to_string(),
        });
        if let Some(on_create) = &hooks.on_create {
            on_create(url);
        }

        let ready = match self.fetcher.fetch(url).await {
            Ok(()) => {
                self.loaded.lock().unwrap().insert(url.to_string());
                debug!("Script '{}' loaded", url);
                if let Some(on_load) = &hooks.on_load {
                    on_load(url);
                }
                true
            }
            Err(e) => {
                warn!("Script '{}' failed to load: {}", url, e);
                if let Some(on_error) = &hooks.on_error {
                    on_error(url, &e);
                }
                false
            }
        };

        ScriptGuard {
            loader: self.clone(),
            element_id: Some(id),
            ready,
        }
    }

    /// Whether a completed load for `url` is cached.
    pub fn is_loaded(&self, url: &str) -> bool {
        self.loaded.lock().unwrap().contains(url)
    }

    /// The script elements currently in the document body.
    pub fn body_elements(&self) -> Vec<ScriptElement> {
        self.body.lock().unwrap().clone()
    }

    fn remove_element(&self, id: usize) {
        self.body.lock().unwrap().retain(|element| element.id != id);
    }
}

/// Ownership of one consumer's interest in a script.
///
/// Dropping the guard removes the element this consumer appended; the cache
/// entry survives, so a later consumer still gets an immediate hit.
pub struct ScriptGuard {
    loader: Arc<ScriptLoader>,
    element_id: Option<usize>,
    ready: bool,
}

impl ScriptGuard {
    /// Whether the script is available to this consumer.
    pub fn ready(&self) -> bool {
        self.ready
    }
}

impl Drop for ScriptGuard {
    fn drop(&mut self) {
        if let Some(id) = self.element_id {
            self.loader.remove_element(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::Notify;

    struct CountingFetcher {
        calls: AtomicUsize,
        fail: bool,
        gate: Option<Arc<Notify>>,
    }

    impl CountingFetcher {
        fn ok() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
                gate: None,
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: true,
                gate: None,
            }
        }

        fn gated(gate: Arc<Notify>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
                gate: Some(gate),
            }
        }
    }

    #[async_trait]
    impl ScriptFetcher for CountingFetcher {
        async fn fetch(&self, url: &str) -> Result<(), UiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if self.fail {
                Err(UiError::ScriptLoad {
                    url: url.to_string(),
                    message: "connection refused".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    const URL: &str = "https://example.com/lib.js";

    #[tokio::test]
    async fn second_consumer_hits_the_cache() {
        let fetcher = Arc::new(CountingFetcher::ok());
        let loader = Arc::new(ScriptLoader::new(fetcher.clone()));

        let first = loader.ensure(URL, ScriptHooks::default()).await;
        assert!(first.ready());
        assert_eq!(loader.body_elements().len(), 1);

        let second = loader.ensure(URL, ScriptHooks::default()).await;
        assert!(second.ready());
        // Cache hit: no second element, no second fetch.
        assert_eq!(loader.body_elements().len(), 1);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_requests_are_not_deduplicated() {
        let gate = Arc::new(Notify::new());
        let fetcher = Arc::new(CountingFetcher::gated(gate.clone()));
        let loader = Arc::new(ScriptLoader::new(fetcher.clone()));

        let first = tokio::spawn({
            let loader = loader.clone();
            async move { loader.ensure(URL, ScriptHooks::default()).await }
        });
        let second = tokio::spawn({
            let loader = loader.clone();
            async move { loader.ensure(URL, ScriptHooks::default()).await }
        });

        // Wait for both fetches to start, then release them.
        while fetcher.calls.load(Ordering::SeqCst) < 2 {
            tokio::task::yield_now().await;
        }
        assert_eq!(loader.body_elements().len(), 2);
        gate.notify_waiters();

        let first = first.await.unwrap();
        let second = second.await.unwrap();
        assert!(first.ready());
        assert!(second.ready());
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_load_is_not_cached() {
        let loader = Arc::new(ScriptLoader::new(Arc::new(CountingFetcher::failing())));

        let errors = Arc::new(AtomicUsize::new(0));
        let hooks = ScriptHooks {
            on_error: Some(Box::new({
                let errors = errors.clone();
                move |_, _| {
                    errors.fetch_add(1, Ordering::SeqCst);
                }
            })),
            ..Default::default()
        };

        let guard = loader.ensure(URL, hooks).await;
        assert!(!guard.ready());
        assert!(!loader.is_loaded(URL));
        assert_eq!(errors.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn dropping_the_guard_removes_the_element_but_keeps_the_cache() {
        let loader = Arc::new(ScriptLoader::new(Arc::new(CountingFetcher::ok())));

        let guard = loader.ensure(URL, ScriptHooks::default()).await;
        assert_eq!(loader.body_elements().len(), 1);
        drop(guard);
        assert!(loader.body_elements().is_empty());
        assert!(loader.is_loaded(URL));
    }

    #[tokio::test]
    async fn hooks_fire_in_lifecycle_order() {
        let loader = Arc::new(ScriptLoader::new(Arc::new(CountingFetcher::ok())));
        let log = Arc::new(Mutex::new(Vec::new()));

        let hooks = ScriptHooks {
            on_create: Some(Box::new({
                let log = log.clone();
                move |_| log.lock().unwrap().push("create")
            })),
            on_load: Some(Box::new({
                let log = log.clone();
                move |_| log.lock().unwrap().push("load")
            })),
            ..Default::default()
        };

        let _guard = loader.ensure(URL, hooks).await;
        assert_eq!(*log.lock().unwrap(), vec!["create", "load"]);
    }
}
