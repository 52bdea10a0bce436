//! Port interface for durable key-value storage

use async_trait::async_trait;
use healthprod_domain::Result;

/// Trait for a small string-to-string store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or replace
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the key; missing keys are not an error
    async fn remove(&self, key: &str) -> Result<()>;
}
