use std::path::PathBuf;
use std::sync::Mutex;
use async_trait::async_trait;
use crate::enums::notice_level::NoticeLevel;
use crate::enums::panel_event::PanelEvent;
use crate::errors::ReviewResult;
use crate::traits::workbench::Workbench;

/// Wraps a workbench for the duration of one panel message and keeps a copy
/// of every notice so it can be returned to the page.
pub struct NoticeRecorder<'a> {
    inner: &'a dyn Workbench,
    notices: Mutex<Vec<(NoticeLevel, String)>>,
}

impl<'a> NoticeRecorder<'a> {
    pub fn new(inner: &'a dyn Workbench) -> Self {
        Self {
            inner,
            notices: Mutex::new(Vec::new()),
        }
    }

    pub fn into_events(self) -> Vec<PanelEvent> {
        self.notices
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .into_iter()
            .map(|(level, message)| PanelEvent::Notice { level, message })
            .collect()
    }
}

#[async_trait]
impl<'a> Workbench for NoticeRecorder<'a> {
    fn notify(&self, level: NoticeLevel, message: &str) {
        self.inner.notify(level, message);
        if let Ok(mut notices) = self.notices.lock() {
            notices.push((level, message.to_string()));
        }
    }

    async fn pick_folder(&self, title: &str) -> Option<PathBuf> {
        self.inner.pick_folder(title).await
    }

    async fn pick_patch_file(&self, title: &str) -> Option<PathBuf> {
        self.inner.pick_patch_file(title).await
    }

    async fn write_clipboard(&self, text: &str) -> ReviewResult<()> {
        self.inner.write_clipboard(text).await
    }

    fn workspace_root(&self) -> Option<PathBuf> {
        self.inner.workspace_root()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::workbench::MockWorkbench;

    #[test]
    fn forwards_and_records_notices_in_order() {
        let mut inner = MockWorkbench::new();
        inner.expect_notify().times(2).return_const(());

        let recorder = NoticeRecorder::new(&inner);
        recorder.notify(NoticeLevel::Info, "first");
        recorder.notify(NoticeLevel::Error, "second");

        assert_eq!(
            recorder.into_events(),
            vec![
                PanelEvent::Notice { level: NoticeLevel::Info, message: "first".into() },
                PanelEvent::Notice { level: NoticeLevel::Error, message: "second".into() },
            ]
        );
    }
}
