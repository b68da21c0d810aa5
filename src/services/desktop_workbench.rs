use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use async_trait::async_trait;
use crate::enums::notice_level::NoticeLevel;
use crate::errors::{ReviewError, ReviewResult};
use crate::traits::workbench::Workbench;

/// `Workbench` for an interactive desktop session: notices go to the log,
/// pickers are native dialogs and the clipboard is the system clipboard.
///
/// One `arboard::Clipboard` is kept for the life of the workbench. On X11 and
/// Wayland the copied text is only served while that handle is alive.
pub struct DesktopWorkbench {
    workspace: Option<PathBuf>,
    clipboard: Arc<Mutex<Option<arboard::Clipboard>>>,
    clipboard_hold: Option<Duration>,
}

impl DesktopWorkbench {
    pub fn new(workspace: Option<PathBuf>) -> Self {
        Self {
            workspace,
            clipboard: Arc::new(Mutex::new(None)),
            clipboard_hold: None,
        }
    }

    /// For short-lived commands: after each copy, keep serving the text until
    /// another program owns the clipboard or `hold` elapses. Linux only.
    pub const fn holding_clipboard(mut self, hold: Duration) -> Self {
        self.clipboard_hold = Some(hold);
        self
    }
}

#[async_trait]
impl Workbench for DesktopWorkbench {
    fn notify(&self, level: NoticeLevel, message: &str) {
        log::log!(level.log_level(), "{} {}", level.emoji(), message);
    }

    async fn pick_folder(&self, title: &str) -> Option<PathBuf> {
        rfd::AsyncFileDialog::new()
            .set_title(title)
            .pick_folder()
            .await
            .map(PathBuf::from)
    }

    async fn pick_patch_file(&self, title: &str) -> Option<PathBuf> {
        rfd::AsyncFileDialog::new()
            .set_title(title)
            .add_filter("Patch Files", &["patch"])
            .add_filter("All Files", &["*"])
            .pick_file()
            .await
            .map(PathBuf::from)
    }

    async fn write_clipboard(&self, text: &str) -> ReviewResult<()> {
        let text = text.to_string();
        let clipboard = Arc::clone(&self.clipboard);
        let hold = self.clipboard_hold;

        tokio::task::spawn_blocking(move || {
            let mut slot = clipboard
                .lock()
                .map_err(|_| ReviewError::clipboard_error("clipboard handle lock poisoned"))?;
            let board = reuse_or_create(&mut *slot, arboard::Clipboard::new)?;
            set_clipboard_text(board, text, hold)
                .map_err(|e| ReviewError::clipboard_error(&e.to_string()))
        })
        .await
        .map_err(|e| ReviewError::system_error("clipboard write", &e.to_string()))?
    }

    fn workspace_root(&self) -> Option<PathBuf> {
        self.workspace
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .filter(|root| root.is_dir())
    }
}

fn reuse_or_create<T, E: std::fmt::Display>(
    slot: &mut Option<T>,
    create: impl FnOnce() -> Result<T, E>,
) -> ReviewResult<&mut T> {
    if slot.is_none() {
        *slot = Some(create().map_err(|e| ReviewError::clipboard_error(&e.to_string()))?);
    }
    slot.as_mut()
        .ok_or_else(|| ReviewError::clipboard_error("clipboard unavailable"))
}

#[cfg(target_os = "linux")]
fn set_clipboard_text(
    board: &mut arboard::Clipboard,
    text: String,
    hold: Option<Duration>,
) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;

    match hold {
        Some(hold) => {
            log::info!("📋 Serving the prompt on the clipboard for up to {}s; paste it now", hold.as_secs());
            board
                .set()
                .wait_until(std::time::Instant::now() + hold)
                .text(text)
        }
        None => board.set_text(text),
    }
}

#[cfg(not(target_os = "linux"))]
fn set_clipboard_text(
    board: &mut arboard::Clipboard,
    text: String,
    _hold: Option<Duration>,
) -> Result<(), arboard::Error> {
    board.set_text(text)
}
