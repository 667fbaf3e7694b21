use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::KeyValueStore;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// File-backed store: each key is one `<key>.json` file under `base_path`.
#[derive(Clone, Debug)]
pub struct LocalFileStore {
    base_path: PathBuf,
}

impl LocalFileStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Keys are plain file names; anything that could escape `base_path` is
    /// rejected.
    fn resolve_path(&self, key: &str) -> DomainResult<PathBuf> {
        let mut components = Path::new(key).components();
        let is_plain_name = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );

        if key.is_empty() || !is_plain_name || key.contains(['/', '\\']) {
            return Err(DomainError::Validation(format!("Invalid storage key: '{}'", key)));
        }

        Ok(self.base_path.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for LocalFileStore {
    fn read(&self, key: &str) -> DomainResult<Option<Vec<u8>>> {
        let file_path = self.resolve_path(key)?;
        match fs::read(&file_path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &[u8]) -> DomainResult<()> {
        let file_path = self.resolve_path(key)?;

        fs::create_dir_all(&self.base_path)?;

        // Write beside the target and rename so readers never see a torn file.
        let tmp_path = file_path.with_extension("json.tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &file_path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> DomainResult<()> {
        let file_path = self.resolve_path(key)?;
        match fs::remove_file(&file_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path().join("data"));

        store.write("projectdeck.activities", b"[]").unwrap();
        assert_eq!(
            store.read("projectdeck.activities").unwrap(),
            Some(b"[]".to_vec())
        );
        assert!(dir.path().join("data/projectdeck.activities.json").exists());
        assert!(!dir.path().join("data/projectdeck.activities.json.tmp").exists());
    }

    #[test]
    fn test_missing_key_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path());
        assert_eq!(store.read("nothing-here").unwrap(), None);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path());
        store.write("k", b"1").unwrap();
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.read("k").unwrap(), None);
    }

    #[test]
    fn test_io_failures_surface_as_storage_errors() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, b"x").unwrap();

        let store = LocalFileStore::new(&blocker);
        assert!(matches!(store.write("k", b"1"), Err(DomainError::Storage(_))));
    }

    #[test]
    fn test_rejects_keys_that_escape_base_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path());

        for key in ["", "..", "../escape", "nested/key", "/etc/passwd", "a\\b"] {
            assert!(
                matches!(store.write(key, b"x"), Err(DomainError::Validation(_))),
                "key {:?} should be rejected",
                key
            );
        }
    }
}
