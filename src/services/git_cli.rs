use std::path::Path;
use std::process::Stdio;
use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use crate::config::constants::MAX_DIFF_OUTPUT_BYTES;
use crate::errors::{ReviewError, ReviewResult};
use crate::traits::version_control::VersionControl;

const CURRENT_BRANCH_STEP: &str = "resolve the current branch name";
const DIFF_STEP: &str = "compute the git diff";

/// `VersionControl` implemented by running the `git` executable.
pub struct GitCli {
    program: String,
    max_output_bytes: usize,
}

impl GitCli {
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
            max_output_bytes: MAX_DIFF_OUTPUT_BYTES,
        }
    }

    #[cfg(test)]
    pub const fn with_max_output_bytes(mut self, max_output_bytes: usize) -> Self {
        self.max_output_bytes = max_output_bytes;
        self
    }

    async fn run(&self, repo_root: &Path, args: &[&str], step: &str) -> ReviewResult<Vec<u8>> {
        log::debug!("🔧 {} {} (in {})", self.program, args.join(" "), repo_root.display());

        let mut child = Command::new(&self.program)
            .args(args)
            .current_dir(repo_root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ReviewError::vcs_error(step, &e.to_string()))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ReviewError::vcs_error(step, "stdout was not captured"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| ReviewError::vcs_error(step, "stderr was not captured"))?;

        let stderr_task = tokio::spawn(async move {
            let mut buf = Vec::new();
            let _ = stderr.read_to_end(&mut buf).await;
            buf
        });

        let limit = self.max_output_bytes;
        let mut output = Vec::new();
        stdout
            .take(limit as u64 + 1)
            .read_to_end(&mut output)
            .await
            .map_err(|e| ReviewError::vcs_error(step, &e.to_string()))?;

        if output.len() > limit {
            let _ = child.kill().await;
            return Err(ReviewError::vcs_error(
                step,
                &format!("output exceeded the {limit} byte limit"),
            ));
        }

        let status = child
            .wait()
            .await
            .map_err(|e| ReviewError::vcs_error(step, &e.to_string()))?;
        let stderr = stderr_task.await.unwrap_or_default();

        if !status.success() {
            let message = String::from_utf8_lossy(&stderr).trim().to_string();
            let reason = if message.is_empty() { status.to_string() } else { message };
            return Err(ReviewError::vcs_error(step, &reason));
        }

        Ok(output)
    }
}

/// Revisions must not start with `-`; git would read them as options.
fn check_revision(step: &str, revision: &str) -> ReviewResult<()> {
    if revision.is_empty() || revision.starts_with('-') {
        return Err(ReviewError::vcs_error(
            step,
            &format!("'{revision}' is not a valid branch name"),
        ));
    }
    Ok(())
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VersionControl for GitCli {
    async fn current_branch(&self, repo_root: &Path) -> ReviewResult<String> {
        let output = self
            .run(repo_root, &["rev-parse", "--abbrev-ref", "HEAD"], CURRENT_BRANCH_STEP)
            .await?;
        Ok(String::from_utf8_lossy(&output).trim().to_string())
    }

    async fn diff(&self, repo_root: &Path, base: &str, head: &str) -> ReviewResult<Vec<u8>> {
        check_revision(DIFF_STEP, base)?;
        check_revision(DIFF_STEP, head)?;

        let range = format!("{base}...{head}");
        self.run(repo_root, &["diff", "--no-color", "--end-of-options", &range], DIFF_STEP)
            .await
    }
}
