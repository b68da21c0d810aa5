use std::fs;
use std::path::{Path, PathBuf};
use crate::config::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::constants::prompts::{DEFAULT_DIFF_REVIEW_PROMPT, DEFAULT_PROJECT_REVIEW_PROMPT};
use crate::enums::config_key::ConfigKey;
use crate::errors::{ReviewError, ReviewResult};
use crate::structs::config::prompt_config::PromptConfig;
use crate::traits::config_store::ConfigStore;

pub struct ConfigManager;

impl ConfigManager {

    /// `~/diffprompt/config.toml` unless an explicit path is given.
    pub fn resolve_path(explicit: Option<&Path>) -> ReviewResult<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }

        dirs::home_dir()
            .map(|home| home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| {
                ReviewError::config_error(
                    "could not locate the home directory",
                    None,
                    Some("pass --config <file> or set DIFFPROMPT_CONFIG"),
                )
            })
    }

    pub fn load(path: &Path) -> ReviewResult<PromptConfig> {
        if !path.exists() {
            return Ok(PromptConfig::default());
        }

        log::debug!("📋 Loading config from: {}", path.display());
        let content = fs::read_to_string(path)
            .map_err(|e| ReviewError::config_file_error(&path.display().to_string(), &e.to_string()))?;
        let config: PromptConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(path: &Path, config: &PromptConfig) -> ReviewResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| ReviewError::config_file_error(&parent.display().to_string(), &e.to_string()))?;
        }

        let content = toml::to_string_pretty(config)?;
        fs::write(path, content)
            .map_err(|e| ReviewError::config_file_error(&path.display().to_string(), &e.to_string()))
    }

    /// Writes a settings file holding the default templates. Never overwrites.
    pub fn create_sample_config(path: &Path) -> ReviewResult<()> {
        if path.exists() {
            return Err(ReviewError::config_error(
                &format!("a configuration file already exists at {}", path.display()),
                None,
                Some("edit it directly or use 'diffprompt config set <key> <value>'"),
            ));
        }

        let sample = PromptConfig {
            review_prompt: Some(DEFAULT_DIFF_REVIEW_PROMPT.to_string()),
            review_prompt_no_diff: Some(DEFAULT_PROJECT_REVIEW_PROMPT.to_string()),
            ..PromptConfig::default()
        };
        Self::save(path, &sample)?;
        log::info!("✅ Created config at: {}", path.display());
        Ok(())
    }
}

/// `ConfigStore` backed by the TOML settings file. Every `set` rewrites the
/// whole file; last write wins.
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot(&self) -> ReviewResult<PromptConfig> {
        ConfigManager::load(&self.path)
    }
}

impl ConfigStore for FileConfigStore {
    fn get(&self, key: ConfigKey) -> ReviewResult<Option<String>> {
        Ok(self.snapshot()?.field(key).cloned())
    }

    fn set(&self, key: ConfigKey, value: &str) -> ReviewResult<()> {
        let mut config = self.snapshot()?;
        config.set_field(key, value.to_string());
        ConfigManager::save(&self.path, &config)
    }
}
