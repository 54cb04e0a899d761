//! Configuration management for the todo application.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding file-backed storage
    pub data_dir: PathBuf,
    /// Storage key of the controller's list
    pub controller_key: String,
    /// Storage key of the store's list
    pub store_key: String,
    /// Toggle animation window in milliseconds (default: 600)
    pub animation_ms: u64,
    /// How long an announcement stays live in milliseconds (default: 1000)
    pub announcement_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `TODO_DATA_DIR` | `.todo` |
    /// | `TODO_CONTROLLER_KEY` | `todos` |
    /// | `TODO_STORE_KEY` | `todo-store` |
    /// | `TODO_ANIMATION_MS` | `600` |
    /// | `TODO_ANNOUNCEMENT_MS` | `1000` |
    ///
    /// Unparseable numbers fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            data_dir: lookup("TODO_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            controller_key: lookup("TODO_CONTROLLER_KEY").unwrap_or(defaults.controller_key),
            store_key: lookup("TODO_STORE_KEY").unwrap_or(defaults.store_key),
            animation_ms: lookup("TODO_ANIMATION_MS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.animation_ms),
            announcement_ms: lookup("TODO_ANNOUNCEMENT_MS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.announcement_ms),
        }
    }

    /// Toggle animation window
    #[must_use]
    pub const fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }

    /// Announcement lifetime
    #[must_use]
    pub const fn announcement_ttl(&self) -> Duration {
        Duration::from_millis(self.announcement_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".todo"),
            controller_key: "todos".to_string(),
            store_key: "todo-store".to_string(),
            animation_ms: 600,
            announcement_ms: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_environment_gives_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config, Config::default());
        assert_eq!(config.animation_duration(), Duration::from_millis(600));
        assert_eq!(config.announcement_ttl(), Duration::from_millis(1000));
    }

    #[test]
    fn variables_override_defaults() {
        let vars: HashMap<&str, &str> = [
            ("TODO_DATA_DIR", "/tmp/todo"),
            ("TODO_STORE_KEY", "svelte-todos"),
            ("TODO_ANIMATION_MS", "50"),
            ("TODO_ANNOUNCEMENT_MS", "soon"),
        ]
        .into_iter()
        .collect();

        let config = Config::from_lookup(|name| vars.get(name).map(|v| (*v).to_string()));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/todo"));
        assert_eq!(config.store_key, "svelte-todos");
        assert_eq!(config.controller_key, "todos");
        assert_eq!(config.animation_ms, 50);
        assert_eq!(config.announcement_ms, 1000);
    }
}
