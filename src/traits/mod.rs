pub mod config_store;
pub mod version_control;
pub mod workbench;
