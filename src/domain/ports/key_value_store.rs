use crate::domain::errors::DomainResult;

/// Byte-oriented key-value persistence, standing in for browser local storage.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`. A missing key is `Ok(None)`.
    fn read(&self, key: &str) -> DomainResult<Option<Vec<u8>>>;

    /// Replace the value stored under `key`.
    fn write(&self, key: &str, value: &[u8]) -> DomainResult<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> DomainResult<()>;
}
