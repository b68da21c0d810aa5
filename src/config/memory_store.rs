use std::collections::HashMap;
use std::sync::Mutex;
use crate::enums::config_key::ConfigKey;
use crate::errors::{ReviewError, ReviewResult};
use crate::traits::config_store::ConfigStore;

/// In-memory `ConfigStore` for tests.
#[derive(Default)]
pub struct MemoryConfigStore {
    values: Mutex<HashMap<ConfigKey, String>>,
}

impl MemoryConfigStore {
    pub fn with(entries: &[(ConfigKey, &str)]) -> Self {
        let store = Self::default();
        for (key, value) in entries {
            store.set(*key, value).unwrap();
        }
        store
    }
}

impl ConfigStore for MemoryConfigStore {
    fn get(&self, key: ConfigKey) -> ReviewResult<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| ReviewError::system_error("config read", "store lock poisoned"))?;
        Ok(values.get(&key).cloned())
    }

    fn set(&self, key: ConfigKey, value: &str) -> ReviewResult<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| ReviewError::system_error("config write", "store lock poisoned"))?;
        values.insert(key, value.to_string());
        Ok(())
    }
}
