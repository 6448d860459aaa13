use crate::errors::StoreError;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value, json};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tracing::{error, info};

const STATE_VERSION: u64 = 0;

/// State of type `S` stored as `{"<key>": {"state": S, "version": 0}}`.
///
/// Several stores may share one file; each save rewrites only its own key.
#[derive(Debug)]
pub struct PersistedStore<S> {
    path: PathBuf,
    key: &'static str,
    state: S,
}

impl<S> PersistedStore<S>
where
    S: Serialize + DeserializeOwned + Default + Clone,
{
    pub fn open(path: impl AsRef<Path>, key: &'static str) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let state = match read_document(&path)? {
            Some(mut document) => match document.remove(key) {
                Some(entry) => {
                    let state = entry.get("state").cloned().unwrap_or(entry);
                    serde_json::from_value(state).map_err(|source| {
                        error!("❌ Store {key} in {} is unreadable: {source}", path.display());
                        StoreError::Json {
                            path: path.clone(),
                            source,
                        }
                    })?
                }
                None => S::default(),
            },
            None => S::default(),
        };

        info!("📦 Opened store {key} at {}", path.display());

        Ok(Self { path, key, state })
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Applies `mutation` to a copy and keeps it only once it is on disk.
    pub fn mutate<R>(&mut self, mutation: impl FnOnce(&mut S) -> R) -> Result<R, StoreError> {
        let mut next = self.state.clone();
        let result = mutation(&mut next);
        self.save(&next)?;
        self.state = next;
        Ok(result)
    }

    fn save(&self, state: &S) -> Result<(), StoreError> {
        let mut document = read_document(&self.path)?.unwrap_or_default();

        let state = serde_json::to_value(state).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        document.insert(
            self.key.to_string(),
            json!({ "state": state, "version": STATE_VERSION }),
        );

        let body = serde_json::to_vec_pretty(&Value::Object(document)).map_err(|source| {
            StoreError::Json {
                path: self.path.clone(),
                source,
            }
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&self.path, body).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

fn read_document(path: &Path) -> Result<Option<Map<String, Value>>, StoreError> {
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice(&raw)
        .map(Some)
        .map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde::Deserialize;

    #[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
    struct Counter {
        value: u32,
    }

    #[test]
    fn missing_file_yields_default_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = PersistedStore::<Counter>::open(dir.path().join("state.json"), "counter")
            .unwrap();
        assert_eq!(store.state(), &Counter::default());
    }

    #[test]
    fn mutations_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut store = PersistedStore::<Counter>::open(&path, "counter").unwrap();
        store.mutate(|c| c.value = 7).unwrap();

        let reopened = PersistedStore::<Counter>::open(&path, "counter").unwrap();
        assert_eq!(reopened.state().value, 7);
    }

    #[test]
    fn keys_sharing_a_file_do_not_clobber_each_other() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut first = PersistedStore::<Counter>::open(&path, "first").unwrap();
        let mut second = PersistedStore::<Counter>::open(&path, "second").unwrap();
        first.mutate(|c| c.value = 1).unwrap();
        second.mutate(|c| c.value = 2).unwrap();

        assert_eq!(
            PersistedStore::<Counter>::open(&path, "first")
                .unwrap()
                .state()
                .value,
            1
        );
        assert_eq!(
            PersistedStore::<Counter>::open(&path, "second")
                .unwrap()
                .state()
                .value,
            2
        );
    }

    #[test]
    fn unknown_key_yields_default_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, r#"{"other": {"state": {"value": 3}, "version": 0}}"#).unwrap();

        let store = PersistedStore::<Counter>::open(&path, "counter").unwrap();
        assert_eq!(store.state().value, 0);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{not json").unwrap();

        assert_matches!(
            PersistedStore::<Counter>::open(&path, "counter"),
            Err(StoreError::Json { .. })
        );
    }

    #[test]
    fn failed_save_keeps_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut store = PersistedStore::<Counter>::open(&path, "counter").unwrap();
        store.mutate(|c| c.value = 1).unwrap();

        // A directory where the file should be makes every write fail.
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert_matches!(
            store.mutate(|c| c.value = 2),
            Err(StoreError::Io { .. })
        );
        assert_eq!(store.state().value, 1);
    }
}
