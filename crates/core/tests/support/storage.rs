//! In-memory key-value store

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use healthprod_core::knowledge::KeyValueStore;
use healthprod_domain::{HealthProdError, Result as DomainResult};

#[derive(Default, Clone)]
pub struct MockKeyValueStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
    failing: bool,
}

impl MockKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails.
    pub fn failing() -> Self {
        Self { failing: true, ..Self::default() }
    }

    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries.lock().unwrap().insert(key.to_string(), value.to_string());
        self
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn check(&self) -> DomainResult<()> {
        if self.failing {
            Err(HealthProdError::Storage("disk unavailable".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl KeyValueStore for MockKeyValueStore {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        self.check()?;
        Ok(self.value(key))
    }

    async fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        self.check()?;
        self.entries.lock().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> DomainResult<()> {
        self.check()?;
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}
