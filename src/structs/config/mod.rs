pub mod prompt_config;
