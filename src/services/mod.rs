pub mod desktop_workbench;
pub mod diff_capture;
pub mod git_cli;
pub mod prompt_copier;
