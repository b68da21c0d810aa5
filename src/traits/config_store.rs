use crate::enums::config_key::ConfigKey;
use crate::errors::ReviewResult;

/// Read/write access to the persisted settings record.
pub trait ConfigStore: Send + Sync {
    fn get(&self, key: ConfigKey) -> ReviewResult<Option<String>>;

    fn set(&self, key: ConfigKey, value: &str) -> ReviewResult<()>;

    /// Returns the stored value unless it is absent or empty.
    fn get_non_empty(&self, key: ConfigKey) -> ReviewResult<Option<String>> {
        Ok(self.get(key)?.filter(|value| !value.is_empty()))
    }
}
