use crate::error::Result;
use async_trait::async_trait;

/// Precondition for a conditional write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetMode {
    /// Write only if the key does not exist yet.
    CreateOnly,
    /// Write only if the key already exists.
    UpdateOnly,
}

/// Key-value service backing the order store.
///
/// `set` must check its precondition and write as one indivisible step:
/// of two racing `CreateOnly` writes to the same key, exactly one returns `true`.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    /// Returns `false` when the precondition in `mode` does not hold.
    async fn set(&self, key: &str, value: Vec<u8>, mode: SetMode) -> Result<bool>;
    async fn keys(&self, prefix: &str) -> Result<Vec<String>>;
    /// Returns `true` if the key existed.
    async fn delete(&self, key: &str) -> Result<bool>;
}

pub type KeyValueStoreBox = Box<dyn KeyValueStore>;
pub type KeyValueStoreFactory = Box<dyn Fn() -> KeyValueStoreBox + Send + Sync>;
