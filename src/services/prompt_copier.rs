use std::path::Path;
use crate::config::constants::PASTE_INSTRUCTION;
use crate::constants::prompts::{DEFAULT_DIFF_REVIEW_PROMPT, DEFAULT_PROJECT_REVIEW_PROMPT};
use crate::enums::config_key::ConfigKey;
use crate::enums::notice_level::NoticeLevel;
use crate::errors::{ReviewError, ReviewResult};
use crate::helpers::template::fill_file_path;
use crate::traits::config_store::ConfigStore;
use crate::traits::workbench::Workbench;

const PICK_PATCH_TITLE: &str = "Select the diff file to review";

/// Copies review prompts to the clipboard.
pub struct PromptCopier<'a> {
    config: &'a dyn ConfigStore,
    workbench: &'a dyn Workbench,
}

impl<'a> PromptCopier<'a> {
    pub fn new(config: &'a dyn ConfigStore, workbench: &'a dyn Workbench) -> Self {
        Self { config, workbench }
    }

    /// Fills the diff template with `file_path` and copies it. Returns the copied text.
    pub async fn copy_diff_prompt(&self, file_path: &Path) -> ReviewResult<String> {
        let template = self
            .config
            .get_non_empty(ConfigKey::ReviewPrompt)?
            .unwrap_or_else(|| DEFAULT_DIFF_REVIEW_PROMPT.to_string());
        let prompt = fill_file_path(&template, &file_path.display().to_string());

        self.copy(prompt).await
    }

    /// Copies the whole-project template verbatim.
    pub async fn copy_project_prompt(&self) -> ReviewResult<String> {
        let prompt = self
            .config
            .get_non_empty(ConfigKey::ReviewPromptNoDiff)?
            .unwrap_or_else(|| DEFAULT_PROJECT_REVIEW_PROMPT.to_string());

        self.copy(prompt).await
    }

    /// Asks for a patch file first; dismissing the picker is a cancellation.
    pub async fn pick_and_copy_diff_prompt(&self) -> ReviewResult<String> {
        let file_path = self
            .workbench
            .pick_patch_file(PICK_PATCH_TITLE)
            .await
            .ok_or_else(|| ReviewError::cancelled("diff prompt copy"))?;

        self.copy_diff_prompt(&file_path).await
    }

    async fn copy(&self, prompt: String) -> ReviewResult<String> {
        self.workbench.write_clipboard(&prompt).await?;
        log::debug!("📋 Copied {} characters", prompt.chars().count());
        self.workbench.notify(NoticeLevel::Info, PASTE_INSTRUCTION);
        Ok(prompt)
    }
}
