pub mod commands;
pub mod config_key;
pub mod diff_capture_outcome;
pub mod notice_level;
pub mod panel_event;
pub mod panel_message;
