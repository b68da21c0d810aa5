use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use anyhow::bail;
use crate::config::config_manager::{ConfigManager, FileConfigStore};
use crate::config::constants::CLI_CLIPBOARD_HOLD_SECS;
use crate::enums::commands::{Commands, ConfigAction};
use crate::enums::config_key::ConfigKey;
use crate::enums::diff_capture_outcome::DiffCaptureOutcome;
use crate::enums::notice_level::NoticeLevel;
use crate::errors::{ErrorHandler, ReviewError, ReviewResult};
use crate::services::desktop_workbench::DesktopWorkbench;
use crate::services::diff_capture::DiffCapture;
use crate::services::git_cli::GitCli;
use crate::services::prompt_copier::PromptCopier;
use crate::structs::cli::Cli;
use crate::traits::config_store::ConfigStore;
use crate::ui::panel_controller::PanelController;
use crate::ui::panel_server::PanelServer;

pub struct CommandRunner {
    start_time: Option<Instant>,
    workspace: Option<PathBuf>,
    config_path: PathBuf,
}

impl CommandRunner {
    pub fn new(cli: &Cli) -> ReviewResult<Self> {
        Ok(Self {
            start_time: None,
            workspace: cli.workspace.clone(),
            config_path: ConfigManager::resolve_path(cli.config.as_deref())?,
        })
    }

    pub async fn run_command(&mut self, command: Commands) -> anyhow::Result<()> {
        self.start_time = Some(Instant::now());
        let name = command_name(&command);

        let result = match command {
            Commands::Init => self.init_command(),
            Commands::SaveDiff { branch } => self.save_diff_command(branch).await,
            Commands::CopyDiffPrompt { file } => self.copy_diff_prompt_command(file).await,
            Commands::CopyPrompt => self.copy_prompt_command().await,
            Commands::Panel { port, no_browser } => self.panel_command(port, no_browser).await,
            Commands::Config { action } => self.config_command(action),
        };

        if let Some(start) = self.start_time {
            let duration = start.elapsed();
            log::info!("⏱️  Command completed in {:.2}s", duration.as_secs_f64());
        }

        match result {
            Ok(()) => Ok(()),
            Err(error) => {
                ErrorHandler::report(&self.workbench(), &error);
                if error.notice_level() == NoticeLevel::Warning {
                    Ok(())
                } else {
                    bail!("{name} failed")
                }
            }
        }
    }

    fn workbench(&self) -> DesktopWorkbench {
        DesktopWorkbench::new(self.workspace.clone())
    }

    /// Workbench for commands that exit right after copying.
    fn one_shot_workbench(&self) -> DesktopWorkbench {
        self.workbench()
            .holding_clipboard(Duration::from_secs(CLI_CLIPBOARD_HOLD_SECS))
    }

    fn store(&self) -> FileConfigStore {
        FileConfigStore::new(self.config_path.clone())
    }

    fn init_command(&self) -> ReviewResult<()> {
        log::info!("🚀 Initializing diffprompt configuration...");

        ConfigManager::create_sample_config(&self.config_path)?;
        log::info!("📝 Edit the templates with 'diffprompt panel' or 'diffprompt config set'.");
        Ok(())
    }

    async fn save_diff_command(&self, branch: Option<String>) -> ReviewResult<()> {
        log::info!("🔍 Capturing diff...");

        let store = self.store();
        let git = GitCli::new();
        let workbench = self.one_shot_workbench();
        let capture = DiffCapture::new(&store, &git, &workbench);

        if let Some(branch) = branch.as_deref().filter(|b| !b.is_empty()) {
            capture.use_compare_branch(branch)?;
        }

        match capture.run().await? {
            DiffCaptureOutcome::Saved(path) => log::debug!("💾 Patch written to {}", path.display()),
            DiffCaptureOutcome::NoDifferences => log::debug!("No patch written"),
            DiffCaptureOutcome::CopiedProjectPrompt => log::debug!("Fell back to the project prompt"),
        }
        Ok(())
    }

    async fn copy_diff_prompt_command(&self, file: Option<PathBuf>) -> ReviewResult<()> {
        let store = self.store();
        let workbench = self.one_shot_workbench();
        let copier = PromptCopier::new(&store, &workbench);

        match file {
            Some(file) => copier.copy_diff_prompt(&file).await?,
            None => copier.pick_and_copy_diff_prompt().await?,
        };
        Ok(())
    }

    async fn copy_prompt_command(&self) -> ReviewResult<()> {
        let store = self.store();
        let workbench = self.one_shot_workbench();

        PromptCopier::new(&store, &workbench).copy_project_prompt().await?;
        Ok(())
    }

    async fn panel_command(&self, port: Option<u16>, no_browser: bool) -> ReviewResult<()> {
        log::info!("🎛️  Starting settings panel...");

        let controller = PanelController::new(
            Arc::new(self.store()),
            Arc::new(GitCli::new()),
            Arc::new(self.workbench()),
        );
        let mut server = PanelServer::new(Arc::new(controller));
        server.start(port).await?;
        let url = server.url().unwrap_or_default();

        if no_browser {
            log::info!("🔗 Open {url} in a browser");
        } else if let Err(e) = webbrowser::open(&url) {
            log::warn!("⚠️ Could not open a browser ({e}); open {url} manually");
        } else {
            log::info!("🔗 Panel opened at {url}");
        }

        log::info!("Press Ctrl+C to stop the panel");
        tokio::signal::ctrl_c()
            .await
            .map_err(|e| ReviewError::system_error("waiting for Ctrl+C", &e.to_string()))?;

        server.shutdown().await
    }

    fn config_command(&self, action: ConfigAction) -> ReviewResult<()> {
        let store = self.store();

        match action {
            ConfigAction::Show => {
                let config = store.snapshot()?;
                print!("{}", toml::to_string_pretty(&config)?);
            }
            ConfigAction::Path => println!("{}", store.path().display()),
            ConfigAction::Get { key } => {
                let key: ConfigKey = key.parse()?;
                match store.get(key)? {
                    Some(value) => println!("{value}"),
                    None => log::info!("'{key}' is not set"),
                }
            }
            ConfigAction::Set { key, value } => {
                let key: ConfigKey = key.parse()?;
                store.set(key, &value)?;
                log::info!("✅ Updated '{key}' in {}", store.path().display());
            }
        }
        Ok(())
    }
}

const fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Init => "init",
        Commands::SaveDiff { .. } => "save-diff",
        Commands::CopyDiffPrompt { .. } => "copy-diff-prompt",
        Commands::CopyPrompt => "copy-prompt",
        Commands::Panel { .. } => "panel",
        Commands::Config { .. } => "config",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn runner_in(dir: &TempDir) -> CommandRunner {
        let config = dir.path().join("config.toml");
        let cli = Cli::parse_from([
            "diffprompt",
            "--config",
            config.to_str().unwrap(),
            "config",
            "path",
        ]);
        CommandRunner::new(&cli).unwrap()
    }

    #[test]
    fn explicit_config_path_is_used() {
        let dir = TempDir::new().unwrap();
        let runner = runner_in(&dir);
        assert_eq!(runner.config_path, dir.path().join("config.toml"));
    }

    #[tokio::test]
    async fn init_then_set_then_get() {
        let dir = TempDir::new().unwrap();
        let mut runner = runner_in(&dir);

        runner.run_command(Commands::Init).await.unwrap();
        runner
            .run_command(Commands::Config {
                action: ConfigAction::Set { key: "lastCompareBranch".into(), value: "develop".into() },
            })
            .await
            .unwrap();

        let store = runner.store();
        assert_eq!(store.get(ConfigKey::LastCompareBranch).unwrap().as_deref(), Some("develop"));
        assert!(store.get_non_empty(ConfigKey::ReviewPrompt).unwrap().is_some());
    }

    #[tokio::test]
    async fn init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let mut runner = runner_in(&dir);

        runner.run_command(Commands::Init).await.unwrap();
        assert!(runner.run_command(Commands::Init).await.is_err());
    }

    #[tokio::test]
    async fn unknown_key_fails_the_command() {
        let dir = TempDir::new().unwrap();
        let mut runner = runner_in(&dir);

        let result = runner
            .run_command(Commands::Config { action: ConfigAction::Get { key: "reviewPrompts".into() } })
            .await;
        assert!(result.is_err());
    }

    #[test]
    fn command_names_match_the_cli() {
        assert_eq!(command_name(&Commands::SaveDiff { branch: None }), "save-diff");
        assert_eq!(command_name(&Commands::CopyPrompt), "copy-prompt");
    }
}
