use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::KeyValueStore;
use std::collections::HashMap;
use std::sync::RwLock;

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    values: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn read(&self, key: &str) -> DomainResult<Option<Vec<u8>>> {
        let values = self
            .values
            .read()
            .map_err(|_| DomainError::Storage("store lock poisoned".to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &[u8]) -> DomainResult<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| DomainError::Storage("store lock poisoned".to_string()))?;
        values.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> DomainResult<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| DomainError::Storage("store lock poisoned".to_string()))?;
        values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_write_remove() {
        let store = InMemoryStore::new();
        assert_eq!(store.read("k").unwrap(), None);

        store.write("k", b"v1").unwrap();
        store.write("k", b"v2").unwrap();
        assert_eq!(store.read("k").unwrap(), Some(b"v2".to_vec()));

        store.remove("k").unwrap();
        assert_eq!(store.read("k").unwrap(), None);
    }
}
