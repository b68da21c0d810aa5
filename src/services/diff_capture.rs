use std::path::PathBuf;
use chrono::{DateTime, Local};
use crate::enums::config_key::ConfigKey;
use crate::enums::diff_capture_outcome::DiffCaptureOutcome;
use crate::enums::notice_level::NoticeLevel;
use crate::errors::{ReviewError, ReviewResult};
use crate::helpers::patch_name::{patch_file_name, project_folder_name};
use crate::services::prompt_copier::PromptCopier;
use crate::traits::config_store::ConfigStore;
use crate::traits::version_control::VersionControl;
use crate::traits::workbench::Workbench;

pub const PICK_SAVE_DIRECTORY_TITLE: &str = "Select where diff files are saved";

/// Captures `git diff <compare>...<current>` into a timestamped patch file.
pub struct DiffCapture<'a> {
    config: &'a dyn ConfigStore,
    vcs: &'a dyn VersionControl,
    workbench: &'a dyn Workbench,
    clock: fn() -> DateTime<Local>,
}

impl<'a> DiffCapture<'a> {
    pub fn new(
        config: &'a dyn ConfigStore,
        vcs: &'a dyn VersionControl,
        workbench: &'a dyn Workbench,
    ) -> Self {
        Self {
            config,
            vcs,
            workbench,
            clock: Local::now,
        }
    }

    #[cfg(test)]
    pub fn with_clock(mut self, clock: fn() -> DateTime<Local>) -> Self {
        self.clock = clock;
        self
    }

    /// Stores `branch` as the compare branch when it differs from the saved one.
    pub fn use_compare_branch(&self, branch: &str) -> ReviewResult<()> {
        let stored = self.config.get(ConfigKey::LastCompareBranch)?;
        if stored.as_deref() != Some(branch) {
            self.config.set(ConfigKey::LastCompareBranch, branch)?;
            log::info!("🌿 Compare branch set to '{branch}'");
        }
        Ok(())
    }

    pub async fn run(&self) -> ReviewResult<DiffCaptureOutcome> {
        let Some(base) = self.config.get_non_empty(ConfigKey::LastCompareBranch)? else {
            log::info!("🌍 No compare branch configured; copying the whole-project prompt");
            PromptCopier::new(self.config, self.workbench)
                .copy_project_prompt()
                .await?;
            return Ok(DiffCaptureOutcome::CopiedProjectPrompt);
        };

        let save_directory = self.resolve_save_directory().await?;
        let root = self.workbench.workspace_root().ok_or(ReviewError::NoWorkspace)?;

        let current = self.vcs.current_branch(&root).await?;
        if current == base {
            return Err(ReviewError::SameBranch { branch: current });
        }

        log::info!("🔍 Comparing {base}...{current} in {}", root.display());
        let diff = self.vcs.diff(&root, &base, &current).await?;
        if diff.is_empty() {
            self.workbench.notify(NoticeLevel::Info, "No differences");
            return Ok(DiffCaptureOutcome::NoDifferences);
        }

        let file_name = patch_file_name(&project_folder_name(&root), &(self.clock)());
        let file_path = save_directory.join(file_name);
        tokio::fs::write(&file_path, &diff)
            .await
            .map_err(|e| ReviewError::file_write_error(&file_path.display().to_string(), &e.to_string()))?;

        self.workbench.notify(
            NoticeLevel::Info,
            &format!("Saved diff file: {}", file_path.display()),
        );
        Ok(DiffCaptureOutcome::Saved(file_path))
    }

    /// Stored save directory, or ask for one and remember it.
    async fn resolve_save_directory(&self) -> ReviewResult<PathBuf> {
        if let Some(directory) = self.config.get_non_empty(ConfigKey::SaveDirectory)? {
            return Ok(PathBuf::from(directory));
        }

        let directory = self
            .workbench
            .pick_folder(PICK_SAVE_DIRECTORY_TITLE)
            .await
            .ok_or_else(|| ReviewError::cancelled("diff capture"))?;

        let display = directory.display().to_string();
        self.config.set(ConfigKey::SaveDirectory, &display)?;
        self.workbench.notify(
            NoticeLevel::Info,
            &format!("Saved the save directory to settings: {display}"),
        );
        Ok(directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use chrono::TimeZone;
    use mockall::predicate::eq;
    use tempfile::TempDir;
    use crate::config::memory_store::MemoryConfigStore;
    use crate::traits::version_control::MockVersionControl;
    use crate::traits::workbench::MockWorkbench;

    const SAMPLE_DIFF: &str = "diff --git a/app.txt b/app.txt\n--- a/app.txt\n+++ b/app.txt\n@@ -1 +1,2 @@\n first line\n+second line\n";

    fn fixed_clock() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 17, 8, 3, 9).unwrap()
    }

    fn project_root(parent: &TempDir) -> PathBuf {
        let root = parent.path().join("shop-api");
        fs::create_dir(&root).unwrap();
        root
    }

    fn workbench_at(root: PathBuf) -> MockWorkbench {
        let mut workbench = MockWorkbench::new();
        workbench.expect_workspace_root().returning(move || Some(root.clone()));
        workbench
    }

    fn vcs_on(branch: &'static str, diff: &'static str) -> MockVersionControl {
        let mut vcs = MockVersionControl::new();
        vcs.expect_current_branch().returning(move |_| Ok(branch.to_string()));
        vcs.expect_diff().returning(move |_, _, _| Ok(diff.as_bytes().to_vec()));
        vcs
    }

    fn files_in(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn writes_named_patch_file() {
        let tmp = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let root = project_root(&tmp);
        let config = MemoryConfigStore::with(&[
            (ConfigKey::LastCompareBranch, "main"),
            (ConfigKey::SaveDirectory, out.path().to_str().unwrap()),
        ]);
        let mut vcs = MockVersionControl::new();
        vcs.expect_current_branch().returning(|_| Ok("feature/login".to_string()));
        vcs.expect_diff()
            .withf(|_, base, head| base == "main" && head == "feature/login")
            .times(1)
            .returning(|_, _, _| Ok(SAMPLE_DIFF.as_bytes().to_vec()));
        let mut workbench = workbench_at(root);
        workbench
            .expect_notify()
            .withf(|level, message| *level == NoticeLevel::Info && message.starts_with("Saved diff file: "))
            .times(1)
            .return_const(());

        let outcome = DiffCapture::new(&config, &vcs, &workbench)
            .with_clock(fixed_clock)
            .run()
            .await
            .unwrap();

        let expected = out.path().join("diff_shop-api_20240517080309.patch");
        assert_eq!(outcome, DiffCaptureOutcome::Saved(expected.clone()));
        assert_eq!(fs::read_to_string(expected).unwrap(), SAMPLE_DIFF);
    }

    #[tokio::test]
    async fn same_branch_warns_and_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let config = MemoryConfigStore::with(&[
            (ConfigKey::LastCompareBranch, "develop"),
            (ConfigKey::SaveDirectory, out.path().to_str().unwrap()),
        ]);
        let mut vcs = MockVersionControl::new();
        vcs.expect_current_branch().returning(|_| Ok("develop".to_string()));
        vcs.expect_diff().never();
        let workbench = workbench_at(project_root(&tmp));

        let error = DiffCapture::new(&config, &vcs, &workbench).run().await.unwrap_err();

        assert_eq!(error, ReviewError::SameBranch { branch: "develop".into() });
        assert_eq!(error.notice_level(), NoticeLevel::Warning);
        assert!(files_in(out.path()).is_empty());
    }

    #[tokio::test]
    async fn empty_diff_reports_no_differences() {
        let tmp = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let config = MemoryConfigStore::with(&[
            (ConfigKey::LastCompareBranch, "main"),
            (ConfigKey::SaveDirectory, out.path().to_str().unwrap()),
        ]);
        let vcs = vcs_on("feature", "");
        let mut workbench = workbench_at(project_root(&tmp));
        workbench
            .expect_notify()
            .with(eq(NoticeLevel::Info), eq("No differences"))
            .times(1)
            .return_const(());

        let outcome = DiffCapture::new(&config, &vcs, &workbench).run().await.unwrap();

        assert_eq!(outcome, DiffCaptureOutcome::NoDifferences);
        assert!(files_in(out.path()).is_empty());
    }

    #[tokio::test]
    async fn missing_save_directory_is_picked_and_remembered() {
        let tmp = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let picked = out.path().to_path_buf();
        let config = MemoryConfigStore::with(&[(ConfigKey::LastCompareBranch, "main")]);
        let vcs = vcs_on("feature", SAMPLE_DIFF);
        let mut workbench = workbench_at(project_root(&tmp));
        workbench
            .expect_pick_folder()
            .with(eq(PICK_SAVE_DIRECTORY_TITLE))
            .times(1)
            .returning(move |_| Some(picked.clone()));
        workbench.expect_notify().return_const(());

        let capture = DiffCapture::new(&config, &vcs, &workbench).with_clock(fixed_clock);
        capture.run().await.unwrap();
        assert_eq!(
            config.get(ConfigKey::SaveDirectory).unwrap().as_deref(),
            out.path().to_str()
        );

        // Second run reuses the stored directory; the picker expectation is `times(1)`.
        let later = || Local.with_ymd_and_hms(2024, 5, 17, 8, 3, 10).unwrap();
        DiffCapture::new(&config, &vcs, &workbench).with_clock(later).run().await.unwrap();
        assert_eq!(
            files_in(out.path()),
            vec![
                "diff_shop-api_20240517080309.patch".to_string(),
                "diff_shop-api_20240517080310.patch".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn dismissed_directory_picker_cancels() {
        let config = MemoryConfigStore::with(&[(ConfigKey::LastCompareBranch, "main")]);
        let mut vcs = MockVersionControl::new();
        vcs.expect_current_branch().never();
        let mut workbench = MockWorkbench::new();
        workbench.expect_pick_folder().returning(|_| None);

        let error = DiffCapture::new(&config, &vcs, &workbench).run().await.unwrap_err();

        assert!(matches!(error, ReviewError::Cancelled { .. }));
        assert_eq!(config.get(ConfigKey::SaveDirectory).unwrap(), None);
    }

    #[tokio::test]
    async fn no_compare_branch_copies_project_prompt() {
        let config = MemoryConfigStore::with(&[(ConfigKey::ReviewPromptNoDiff, "review the whole project")]);
        let mut vcs = MockVersionControl::new();
        vcs.expect_current_branch().never();
        let mut workbench = MockWorkbench::new();
        workbench
            .expect_write_clipboard()
            .with(eq("review the whole project"))
            .times(1)
            .returning(|_| Ok(()));
        workbench.expect_notify().return_const(());
        workbench.expect_pick_folder().never();

        let outcome = DiffCapture::new(&config, &vcs, &workbench).run().await.unwrap();
        assert_eq!(outcome, DiffCaptureOutcome::CopiedProjectPrompt);
    }

    #[tokio::test]
    async fn missing_workspace_fails_before_git() {
        let out = TempDir::new().unwrap();
        let config = MemoryConfigStore::with(&[
            (ConfigKey::LastCompareBranch, "main"),
            (ConfigKey::SaveDirectory, out.path().to_str().unwrap()),
        ]);
        let mut vcs = MockVersionControl::new();
        vcs.expect_current_branch().never();
        let mut workbench = MockWorkbench::new();
        workbench.expect_workspace_root().returning(|| None);

        let error = DiffCapture::new(&config, &vcs, &workbench).run().await.unwrap_err();
        assert_eq!(error, ReviewError::NoWorkspace);
    }

    #[tokio::test]
    async fn git_failure_is_surfaced() {
        let tmp = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let config = MemoryConfigStore::with(&[
            (ConfigKey::LastCompareBranch, "main"),
            (ConfigKey::SaveDirectory, out.path().to_str().unwrap()),
        ]);
        let mut vcs = MockVersionControl::new();
        vcs.expect_current_branch()
            .returning(|_| Err(ReviewError::vcs_error("resolve the current branch name", "not a git repository")));
        let workbench = workbench_at(project_root(&tmp));

        let error = DiffCapture::new(&config, &vcs, &workbench).run().await.unwrap_err();
        assert!(matches!(error, ReviewError::VersionControlError { .. }));
    }

    #[tokio::test]
    async fn unwritable_save_directory_is_a_write_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("does-not-exist");
        let config = MemoryConfigStore::with(&[
            (ConfigKey::LastCompareBranch, "main"),
            (ConfigKey::SaveDirectory, missing.to_str().unwrap()),
        ]);
        let vcs = vcs_on("feature", SAMPLE_DIFF);
        let workbench = workbench_at(project_root(&tmp));

        let error = DiffCapture::new(&config, &vcs, &workbench).run().await.unwrap_err();
        assert!(matches!(error, ReviewError::FileWriteError { .. }));
    }

    #[tokio::test]
    async fn patch_keeps_non_utf8_bytes() {
        let tmp = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let config = MemoryConfigStore::with(&[
            (ConfigKey::LastCompareBranch, "main"),
            (ConfigKey::SaveDirectory, out.path().to_str().unwrap()),
        ]);
        let raw = b"diff --git a/menu.txt b/menu.txt\n+caf\xe9\n".to_vec();
        let mut vcs = MockVersionControl::new();
        vcs.expect_current_branch().returning(|_| Ok("feature".to_string()));
        let returned = raw.clone();
        vcs.expect_diff().returning(move |_, _, _| Ok(returned.clone()));
        let mut workbench = workbench_at(project_root(&tmp));
        workbench.expect_notify().return_const(());

        let outcome = DiffCapture::new(&config, &vcs, &workbench)
            .with_clock(fixed_clock)
            .run()
            .await
            .unwrap();

        let DiffCaptureOutcome::Saved(path) = outcome else {
            panic!("expected a saved patch, got {outcome:?}");
        };
        assert_eq!(fs::read(path).unwrap(), raw);
    }

    #[test]
    fn changed_compare_branch_is_stored() {
        let config = MemoryConfigStore::with(&[(ConfigKey::LastCompareBranch, "main")]);
        let vcs = MockVersionControl::new();
        let workbench = MockWorkbench::new();

        DiffCapture::new(&config, &vcs, &workbench).use_compare_branch("release/2.0").unwrap();
        assert_eq!(
            config.get(ConfigKey::LastCompareBranch).unwrap().as_deref(),
            Some("release/2.0")
        );
    }
}
