//! Persisted key-value preferences
//!
//! The engine persists a single boolean (cursor tracking) across sessions.
//! Hosts with their own settings storage implement [`PreferenceStore`]
//! directly; [`FilePreferenceStore`] is the standalone default, a TOML
//! key-value map under the XDG config dir.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Process-wide persisted preferences.
pub trait PreferenceStore: Send + Sync {
    fn get_bool(&self, key: &str, default: bool) -> bool;

    fn set_bool(&self, key: &str, value: bool);
}

/// TOML-backed preference store.
///
/// Writes go through to disk immediately; persistence failures are logged
/// and otherwise ignored so a read-only config dir never breaks the view.
pub struct FilePreferenceStore {
    path: PathBuf,
    values: Mutex<toml::Table>,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = Self::load(&path);
        Self {
            path,
            values: Mutex::new(values),
        }
    }

    /// XDG standard: ~/.config/codetree/preferences.toml
    pub fn default_path() -> PathBuf {
        std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("codetree")
            .join("preferences.toml")
    }

    fn load(path: &Path) -> toml::Table {
        if !path.exists() {
            return toml::Table::new();
        }
        std::fs::read_to_string(path)
            .ok()
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_else(|| {
                tracing::warn!("Unreadable preference file: {}", path.display());
                toml::Table::new()
            })
    }

    fn persist(&self, values: &toml::Table) {
        let write = || -> std::io::Result<()> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(values)
                .map_err(|e| std::io::Error::other(e.to_string()))?;
            std::fs::write(&self.path, content)
        };
        if let Err(e) = write() {
            tracing::warn!("Failed to persist preferences to {}: {}", self.path.display(), e);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, toml::Table> {
        match self.values.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.lock()
            .get(key)
            .and_then(toml::Value::as_bool)
            .unwrap_or(default)
    }

    fn set_bool(&self, key: &str, value: bool) {
        let mut values = self.lock();
        values.insert(key.to_string(), toml::Value::Boolean(value));
        self.persist(&values);
    }
}
