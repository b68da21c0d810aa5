use std::path::Path;
use async_trait::async_trait;
use crate::errors::ReviewResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VersionControl: Send + Sync {
    /// Name of the branch checked out in `repo_root`.
    async fn current_branch(&self, repo_root: &Path) -> ReviewResult<String>;

    /// Unified diff of `head` against the merge base with `base`, as the raw
    /// bytes git produced.
    async fn diff(&self, repo_root: &Path, base: &str, head: &str) -> ReviewResult<Vec<u8>>;
}
