use serde::{Deserialize, Serialize};
use crate::enums::config_key::ConfigKey;

/// On-disk shape of the settings file. Every field is optional; an absent
/// field and an empty string both mean "use the default".
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PromptConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_prompt: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_prompt_no_diff: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_compare_branch: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_directory: Option<String>,
}

impl PromptConfig {
    pub const fn field(&self, key: ConfigKey) -> Option<&String> {
        match key {
            ConfigKey::ReviewPrompt => self.review_prompt.as_ref(),
            ConfigKey::ReviewPromptNoDiff => self.review_prompt_no_diff.as_ref(),
            ConfigKey::LastCompareBranch => self.last_compare_branch.as_ref(),
            ConfigKey::SaveDirectory => self.save_directory.as_ref(),
        }
    }

    pub fn set_field(&mut self, key: ConfigKey, value: String) {
        let slot = match key {
            ConfigKey::ReviewPrompt => &mut self.review_prompt,
            ConfigKey::ReviewPromptNoDiff => &mut self.review_prompt_no_diff,
            ConfigKey::LastCompareBranch => &mut self.last_compare_branch,
            ConfigKey::SaveDirectory => &mut self.save_directory,
        };
        *slot = Some(value);
    }
}
