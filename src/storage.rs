use anyhow::{anyhow, Context};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Key/value storage for UI preferences.
///
/// Every call may fail; callers decide whether a failure matters.
pub trait StorageBackend: Send + Sync {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()>;
    fn remove_item(&self, key: &str) -> anyhow::Result<()>;
}

/// Process-local storage, used in tests and when no preference directory is usable.
#[derive(Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        let items = self
            .items
            .lock()
            .map_err(|_| anyhow!("memory storage lock poisoned"))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| anyhow!("memory storage lock poisoned"))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> anyhow::Result<()> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| anyhow!("memory storage lock poisoned"))?;
        items.remove(key);
        Ok(())
    }
}

/// Stores each key as `<dir>/<key>.json`.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("creating preference directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl StorageBackend for FileStorage {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let path = self.path_for(key);
        atomic_write(&self.dir, &path, value.as_bytes())
            .with_context(|| format!("writing {}", path.display()))
    }

    fn remove_item(&self, key: &str) -> anyhow::Result<()> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing {}", path.display())),
        }
    }
}

/// Write `data` to a uniquely named temp file in `dir`, sync it, then move it
/// over `path` so readers never observe a partial blob.
fn atomic_write(dir: &Path, path: &Path, data: &[u8]) -> anyhow::Result<()> {
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}

/// Best-effort persistence of one JSON value under a fixed key.
///
/// Layout preferences are cosmetic: read and write failures are logged at
/// debug level and otherwise ignored.
pub struct PreferenceStore<T> {
    backend: Arc<dyn StorageBackend>,
    key: String,
    _value: PhantomData<fn() -> T>,
}

impl<T> Clone for PreferenceStore<T> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            key: self.key.clone(),
            _value: PhantomData,
        }
    }
}

impl<T: Serialize + DeserializeOwned> PreferenceStore<T> {
    pub fn new(backend: Arc<dyn StorageBackend>, key: &str) -> Self {
        Self {
            backend,
            key: key.to_string(),
            _value: PhantomData,
        }
    }

    /// Read the stored value if present and well formed.
    pub fn try_load(&self) -> anyhow::Result<Option<T>> {
        let Some(raw) = self.backend.get_item(&self.key)? else {
            return Ok(None);
        };
        let value = serde_json::from_str(&raw)
            .with_context(|| format!("parsing stored preference '{}'", self.key))?;
        Ok(Some(value))
    }

    /// Stored value, or `defaults` when nothing usable is stored.
    pub fn load(&self, defaults: T) -> T {
        match self.try_load() {
            Ok(Some(value)) => value,
            Ok(None) => defaults,
            Err(e) => {
                tracing::debug!(key = %self.key, error = %e, "using default preferences");
                defaults
            }
        }
    }

    pub fn try_persist(&self, value: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string(value)?;
        self.backend.set_item(&self.key, &json)
    }

    pub fn persist(&self, value: &T) {
        if let Err(e) = self.try_persist(value) {
            tracing::debug!(key = %self.key, error = %e, "failed to persist preferences");
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.backend.remove_item(&self.key) {
            tracing::debug!(key = %self.key, error = %e, "failed to clear preferences");
        }
    }
}
