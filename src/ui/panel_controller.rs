use std::sync::Arc;
use tokio::sync::Mutex;
use crate::enums::config_key::ConfigKey;
use crate::enums::notice_level::NoticeLevel;
use crate::enums::panel_event::PanelEvent;
use crate::enums::panel_message::PanelMessage;
use crate::errors::{ErrorHandler, ReviewResult};
use crate::helpers::template::{escape_html, render_markers};
use crate::services::diff_capture::{DiffCapture, PICK_SAVE_DIRECTORY_TITLE};
use crate::services::prompt_copier::PromptCopier;
use crate::traits::config_store::ConfigStore;
use crate::traits::version_control::VersionControl;
use crate::traits::workbench::Workbench;
use crate::ui::notice_recorder::NoticeRecorder;

const PANEL_TEMPLATE: &str = include_str!("static/panel.html");

/// Each copy button stores the text of the template shown above it before
/// copying.
pub const COPY_DIFF_TEMPLATE_KEY: ConfigKey = ConfigKey::ReviewPrompt;
pub const COPY_NO_DIFF_TEMPLATE_KEY: ConfigKey = ConfigKey::ReviewPromptNoDiff;

/// Backs the settings panel: renders it from the store and handles the
/// messages the page posts, one at a time.
pub struct PanelController {
    config: Arc<dyn ConfigStore>,
    vcs: Arc<dyn VersionControl>,
    workbench: Arc<dyn Workbench>,
    busy: Mutex<()>,
}

impl PanelController {
    pub fn new(
        config: Arc<dyn ConfigStore>,
        vcs: Arc<dyn VersionControl>,
        workbench: Arc<dyn Workbench>,
    ) -> Self {
        Self {
            config,
            vcs,
            workbench,
            busy: Mutex::new(()),
        }
    }

    /// Panel markup with every stored value HTML-escaped.
    pub fn render(&self, session_token: &str) -> ReviewResult<String> {
        let value = |key| -> ReviewResult<String> {
            Ok(escape_html(&self.config.get(key)?.unwrap_or_default()))
        };
        let save_directory = value(ConfigKey::SaveDirectory)?;
        let compare_branch = value(ConfigKey::LastCompareBranch)?;
        let review_prompt = value(ConfigKey::ReviewPrompt)?;
        let review_prompt_no_diff = value(ConfigKey::ReviewPromptNoDiff)?;
        let token = escape_html(session_token);

        Ok(render_markers(
            PANEL_TEMPLATE,
            &[
                ("SAVE_DIRECTORY", &save_directory),
                ("COMPARE_BRANCH", &compare_branch),
                ("REVIEW_PROMPT", &review_prompt),
                ("REVIEW_PROMPT_NO_DIFF", &review_prompt_no_diff),
                ("SESSION_TOKEN", &token),
            ],
        ))
    }

    /// Runs one panel action to completion and returns the events for the page.
    pub async fn handle(&self, message: PanelMessage) -> Vec<PanelEvent> {
        let _guard = self.busy.lock().await;
        let recorder = NoticeRecorder::new(self.workbench.as_ref());
        let mut events = Vec::new();

        if let Err(error) = self.dispatch(message, &recorder, &mut events).await {
            ErrorHandler::report(&recorder, &error);
        }

        events.extend(recorder.into_events());
        events
    }

    async fn dispatch(
        &self,
        message: PanelMessage,
        workbench: &NoticeRecorder<'_>,
        events: &mut Vec<PanelEvent>,
    ) -> ReviewResult<()> {
        let config = self.config.as_ref();

        match message {
            PanelMessage::Save {
                review_prompt,
                review_prompt_no_diff,
                compare_branch,
                save_directory,
            } => {
                config.set(ConfigKey::ReviewPrompt, &review_prompt)?;
                config.set(ConfigKey::ReviewPromptNoDiff, &review_prompt_no_diff)?;
                config.set(ConfigKey::LastCompareBranch, &compare_branch)?;
                config.set(ConfigKey::SaveDirectory, &save_directory)?;
                workbench.notify(NoticeLevel::Info, "Prompts saved");
            }
            PanelMessage::CopyDiffPrompt { prompt } => {
                config.set(COPY_DIFF_TEMPLATE_KEY, &prompt)?;
                PromptCopier::new(config, workbench).pick_and_copy_diff_prompt().await?;
            }
            PanelMessage::CopyNoDiffPrompt { prompt } => {
                config.set(COPY_NO_DIFF_TEMPLATE_KEY, &prompt)?;
                PromptCopier::new(config, workbench).copy_project_prompt().await?;
            }
            PanelMessage::SaveDiff => {
                DiffCapture::new(config, self.vcs.as_ref(), workbench).run().await?;
            }
            PanelMessage::BrowseSaveDirectory => {
                if let Some(directory) = workbench.pick_folder(PICK_SAVE_DIRECTORY_TITLE).await {
                    events.push(PanelEvent::UpdateSaveDirectory {
                        path: directory.display().to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}
