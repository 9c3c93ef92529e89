//! Key-value byte stores for saved games.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by a [`Store`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),
}

/// Where a game is kept between sessions.
///
/// A store holds opaque blobs under string keys. It knows nothing about
/// their contents.
pub trait Store {
    /// `Ok(None)` when nothing has been saved under `key`.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<(), StoreError>;

    /// Removing a missing key is not an error.
    ///
    /// The controller never removes its own save; a reset overwrites it with
    /// the fresh game. This is for hosts that want to discard a game.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store, for tests and for hosts that persist on their own terms.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with an existing blob.
    pub fn with_entry(mut self, key: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.entries.insert(key.into(), bytes.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }
}

impl Store for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go to a temporary file that is then renamed over the target, so a
/// crash mid-write leaves the previous save intact.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Keys become file names, so only a conservative character set is allowed.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl Store for FileStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path)(e)),
        }
    }

    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(io_error(&self.dir))?;

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, bytes).map_err(io_error(&temp_path))?;
        fs::rename(&temp_path, &path).map_err(io_error(&path))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&path)(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("pinochle-store-{}", Uuid::new_v4()))
    }

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load("game").unwrap(), None);

        store.save("game", b"blob").unwrap();
        assert_eq!(store.load("game").unwrap(), Some(b"blob".to_vec()));
        assert_eq!(store.get("game"), Some(&b"blob"[..]));

        store.remove("game").unwrap();
        store.remove("game").unwrap();
        assert_eq!(store.load("game").unwrap(), None);
    }

    #[test]
    fn memory_store_can_be_seeded() {
        let store = MemoryStore::new().with_entry("k", "v");
        assert_eq!(store.load("k").unwrap(), Some(b"v".to_vec()));
    }

    #[test]
    fn file_store_roundtrip() {
        let dir = scratch_dir();
        let mut store = FileStore::new(&dir);

        assert_eq!(store.load("pinochle-game-state").unwrap(), None);
        store.save("pinochle-game-state", b"{}").unwrap();
        assert!(dir.join("pinochle-game-state.json").exists());
        assert!(!dir.join("pinochle-game-state.json.tmp").exists());
        assert_eq!(
            store.load("pinochle-game-state").unwrap(),
            Some(b"{}".to_vec())
        );

        store.save("pinochle-game-state", b"[]").unwrap();
        assert_eq!(
            store.load("pinochle-game-state").unwrap(),
            Some(b"[]".to_vec())
        );

        store.remove("pinochle-game-state").unwrap();
        store.remove("pinochle-game-state").unwrap();
        assert_eq!(store.load("pinochle-game-state").unwrap(), None);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn file_store_rejects_path_like_keys() {
        let store = FileStore::new(scratch_dir());
        for key in ["", "../escape", ".hidden", "a/b", "sp ace"] {
            assert!(matches!(
                store.path_for(key),
                Err(StoreError::InvalidKey(_))
            ));
        }
        assert!(store.path_for("club-night_2.v1").is_ok());
    }
}
