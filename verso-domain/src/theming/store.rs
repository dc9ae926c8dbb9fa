//! Persistence of the user's theme preference.
//!
//! The persisted state is a single key-value pair under a fixed namespaced
//! key. There is no versioning or migration logic; an unrecognized value is
//! treated as absent by the service. Reads and writes are failable but never
//! fatal: the service resolves a failed read to the default variant and
//! ignores a failed write.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::debug;
use verso_core::CoreError;

use super::errors::ThemingError;

/// The fixed namespaced key the theme variant is persisted under.
pub const PREFERENCE_KEY: &str = "verso:theme";

const PREFERENCE_FILENAME: &str = "preference.json";

/// A durable key-value store holding the theme preference.
///
/// Implementations must treat reads and writes as potentially failable, not
/// as potentially concurrent; the service is the single writer.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Reads the persisted value under [`PREFERENCE_KEY`], if any.
    async fn load(&self) -> Result<Option<String>, ThemingError>;

    /// Writes `value` under [`PREFERENCE_KEY`], overwriting any previous value.
    async fn save(&self, value: &str) -> Result<(), ThemingError>;
}

/// A [`PreferenceStore`] backed by a JSON file in the platform config
/// directory.
///
/// The file holds a flat string map so unrelated preferences can share it
/// later without a format change.
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The store at the default location, `<config>/verso/preference.json`.
    pub fn at_default_path() -> Result<Self, ThemingError> {
        let base = dirs::config_dir().ok_or(ThemingError::NoConfigDirectory)?;
        Ok(Self::new(base.join("verso").join(PREFERENCE_FILENAME)))
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, ThemingError> {
        let raw = std::fs::read_to_string(&self.path)
            .map_err(|e| fs_error("Failed to read preference file", &self.path, e))?;
        serde_json::from_str(&raw).map_err(|e| ThemingError::PreferenceFormat {
            message: format!("Failed to parse preference file {:?}", self.path),
            source: Some(Box::new(e)),
        })
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), ThemingError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| fs_error("Failed to create preference directory", parent, e))?;
        }
        let json = serde_json::to_string_pretty(map).map_err(|e| ThemingError::PreferenceFormat {
            message: "Failed to serialize preference map".to_string(),
            source: Some(Box::new(e)),
        })?;
        std::fs::write(&self.path, json)
            .map_err(|e| fs_error("Failed to write preference file", &self.path, e))
    }
}

/// Wraps a filesystem failure as a [`CoreError`] inside the store error, so
/// the path and I/O cause survive in the source chain.
fn fs_error(message: &str, path: &Path, source: std::io::Error) -> ThemingError {
    ThemingError::PreferenceStore {
        message: format!("{} {:?}", message, path),
        source: Some(Box::new(CoreError::Filesystem {
            message: message.to_string(),
            path: path.to_path_buf(),
            source,
        })),
    }
}

#[async_trait]
impl PreferenceStore for FilePreferenceStore {
    async fn load(&self) -> Result<Option<String>, ThemingError> {
        if !self.path.exists() {
            debug!("Preference file not found at {:?}", self.path);
            return Ok(None);
        }
        let map = self.read_map()?;
        Ok(map.get(PREFERENCE_KEY).cloned())
    }

    async fn save(&self, value: &str) -> Result<(), ThemingError> {
        let mut map = if self.path.exists() {
            // A corrupt file is replaced rather than preserved.
            self.read_map().unwrap_or_default()
        } else {
            BTreeMap::new()
        };
        map.insert(PREFERENCE_KEY.to_string(), value.to_string());
        self.write_map(&map)?;
        debug!("Theme preference saved to {:?}", self.path);
        Ok(())
    }
}

/// An in-memory [`PreferenceStore`] for tests and demos.
///
/// Reads and writes can be poisoned to simulate an unavailable or read-only
/// store.
#[derive(Default)]
pub struct MemoryPreferenceStore {
    value: Mutex<Option<String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `value` under the preference key.
    pub fn with_value(value: impl Into<String>) -> Self {
        let store = Self::new();
        *store.value.lock().unwrap() = Some(value.into());
        store
    }

    /// Makes every subsequent `load` fail.
    pub fn fail_reads(self) -> Self {
        self.fail_reads.store(true, Ordering::SeqCst);
        self
    }

    /// Makes every subsequent `save` fail.
    pub fn fail_writes(self) -> Self {
        self.fail_writes.store(true, Ordering::SeqCst);
        self
    }

    /// The currently stored value, for assertions.
    pub fn stored(&self) -> Option<String> {
        self.value.lock().unwrap().clone()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn load(&self) -> Result<Option<String>, ThemingError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ThemingError::PreferenceStore {
                message: "simulated read failure".to_string(),
                source: None,
            });
        }
        Ok(self.value.lock().unwrap().clone())
    }

    async fn save(&self, value: &str) -> Result<(), ThemingError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ThemingError::PreferenceStore {
                message: "simulated write failure".to_string(),
                source: None,
            });
        }
        *self.value.lock().unwrap() = Some(value.to_string());
        Ok(())
    }
}
