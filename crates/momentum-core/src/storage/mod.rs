mod config;
pub mod kv;

pub use config::{AuthConfig, Config, NotificationsConfig, PollConfig, SuggestionsConfig};
pub use kv::KvDatabase;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;

use crate::error::StorageError;

/// Fixed keys under which the tracker collections are persisted.
pub mod keys {
    pub const ACTIONS: &str = "tracker_actions";
    pub const GOALS: &str = "tracker_goals";
    pub const CATEGORIES: &str = "tracker_categories";
    pub const REWARDS: &str = "tracker_rewards";
}

/// Storage port for the tracker state.
///
/// The tracker receives an implementation at construction time instead of
/// reaching for a process-wide handle. Values are JSON strings keyed by the
/// constants in [`keys`].
pub trait StateStore {
    /// Read the raw JSON for `key`, if present.
    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write the raw JSON for `key`, replacing any previous value.
    fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Rehydrate a collection from the store, falling back to `default` when the
/// key is absent, unreadable, or holds something that no longer parses.
/// Rehydration never fails.
pub fn load_or_default<T, F>(store: &dyn StateStore, key: &str, default: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match store.get_raw(key) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|_| default()),
        _ => default(),
    }
}

/// Serialize `value` and write it under `key`.
pub fn save<T: Serialize>(store: &dyn StateStore, key: &str, value: &T) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    store.set_raw(key, &raw)
}

/// Returns `~/.config/momentum[-dev]/` based on MOMENTUM_ENV.
///
/// Set MOMENTUM_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("MOMENTUM_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("momentum-dev")
    } else {
        base_dir.join("momentum")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use crate::model::seed_categories;

    #[test]
    fn load_or_default_falls_back_on_missing_key() {
        let store = KvDatabase::open_memory().unwrap();
        let cats: Vec<Category> = load_or_default(&store, keys::CATEGORIES, seed_categories);
        assert_eq!(cats.len(), 3);
    }

    #[test]
    fn load_or_default_falls_back_on_malformed_value() {
        let store = KvDatabase::open_memory().unwrap();
        store.set_raw(keys::CATEGORIES, "{not json").unwrap();
        let cats: Vec<Category> = load_or_default(&store, keys::CATEGORIES, seed_categories);
        assert_eq!(cats.len(), 3);
        assert_eq!(cats[0].name, "Exercise");
    }

    #[test]
    fn save_then_load_roundtrips() {
        let store = KvDatabase::open_memory().unwrap();
        let cats = seed_categories();
        save(&store, keys::CATEGORIES, &cats).unwrap();
        let loaded: Vec<Category> = load_or_default(&store, keys::CATEGORIES, Vec::new);
        assert_eq!(loaded.len(), cats.len());
        assert_eq!(loaded[2].color, "#a855f7");
    }
}
