//! File-backed key-value store: one JSON file per key under a data directory.

use std::path::{Path, PathBuf};

use super::KvStore;

/// Key-value store persisting each key as `<data_dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileKv {
    dir: PathBuf,
}

impl FileKv {
    /// Open (creating if needed) a file-backed store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for FileKv {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read persisted value");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        let path = self.path_for(key);
        if let Err(e) = write_atomic(&path, value) {
            tracing::warn!(key, error = %e, "Failed to persist value");
        }
    }

    fn remove(&self, key: &str) {
        let path = self.path_for(key);
        if let Err(e) = std::fs::remove_file(&path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(key, error = %e, "Failed to remove persisted value");
        }
    }
}

/// Write via a temporary file and rename, so readers never observe a
/// half-written snapshot.
fn write_atomic(path: &Path, value: &str) -> std::io::Result<()> {
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, value)?;
    std::fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> FileKv {
        let dir = std::env::temp_dir().join(format!("webshop-kv-{}", uuid::Uuid::new_v4()));
        FileKv::open(dir).expect("create temp kv dir")
    }

    #[test]
    fn test_set_get_roundtrip() {
        let kv = temp_store();
        assert_eq!(kv.get("missing"), None);
        kv.set("webshop_cart", "[1,2,3]");
        assert_eq!(kv.get("webshop_cart").as_deref(), Some("[1,2,3]"));
    }

    #[test]
    fn test_set_overwrites() {
        let kv = temp_store();
        kv.set("k", "a");
        kv.set("k", "b");
        assert_eq!(kv.get("k").as_deref(), Some("b"));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let kv = temp_store();
        kv.set("k", "a");
        kv.remove("k");
        assert_eq!(kv.get("k"), None);
        kv.remove("k");
    }
}
