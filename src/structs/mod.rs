pub mod cli;
pub mod config;
pub mod panel_reply;
