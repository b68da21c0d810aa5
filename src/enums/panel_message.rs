use serde::{Deserialize, Serialize};

/// Messages posted by the panel page. Each variant carries exactly its payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PanelMessage {
    #[serde(rename_all = "camelCase")]
    Save {
        review_prompt: String,
        review_prompt_no_diff: String,
        compare_branch: String,
        save_directory: String,
    },
    CopyDiffPrompt {
        prompt: String,
    },
    CopyNoDiffPrompt {
        prompt: String,
    },
    SaveDiff,
    BrowseSaveDirectory,
}
