use std::path::PathBuf;
use async_trait::async_trait;
use crate::enums::notice_level::NoticeLevel;
use crate::errors::ReviewResult;

/// Desktop services the handlers call into: notifications, pickers,
/// the clipboard and the project root.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Workbench: Send + Sync {
    fn notify(&self, level: NoticeLevel, message: &str);

    async fn pick_folder(&self, title: &str) -> Option<PathBuf>;

    async fn pick_patch_file(&self, title: &str) -> Option<PathBuf>;

    async fn write_clipboard(&self, text: &str) -> ReviewResult<()>;

    fn workspace_root(&self) -> Option<PathBuf>;
}
