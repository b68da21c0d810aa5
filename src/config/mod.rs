pub mod config_manager;
pub mod constants;
#[cfg(test)]
pub mod memory_store;
