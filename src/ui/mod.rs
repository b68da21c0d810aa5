pub mod notice_recorder;
pub mod panel_controller;
pub mod panel_server;
