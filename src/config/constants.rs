pub const DEFAULT_SERVER_PORT_RANGE_START: u16 = 8080;
pub const DEFAULT_SERVER_PORT_RANGE_END: u16 = 8200;
pub const MAX_SESSION_TOKEN_LENGTH: usize = 64;
pub const SERVER_SHUTDOWN_GRACE_PERIOD_MS: u64 = 100;

pub const CONFIG_DIR_NAME: &str = "diffprompt";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const CONFIG_PATH_ENV: &str = "DIFFPROMPT_CONFIG";

pub const DEFAULT_LOG_FILTER: &str = "info";

/// Upper bound on `git diff` output accepted before the step fails.
pub const MAX_DIFF_OUTPUT_BYTES: usize = 10 * 1024 * 1024;

pub const FILE_PATH_PLACEHOLDER: &str = "{filePath}";

pub const PATCH_FILE_PREFIX: &str = "diff";
pub const PATCH_FILE_EXTENSION: &str = "patch";
pub const PATCH_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

pub const PANEL_TOKEN_HEADER: &str = "x-panel-token";

/// How long a one-shot CLI copy keeps serving the clipboard on Linux.
pub const CLI_CLIPBOARD_HOLD_SECS: u64 = 60;

pub const PASTE_INSTRUCTION: &str =
    "Open your chat assistant's input box and paste. The prompt has been copied to the clipboard.";

pub fn sleep_duration_millis(milliseconds: u64) -> std::time::Duration {
    std::time::Duration::from_millis(milliseconds)
}
