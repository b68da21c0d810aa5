use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffCaptureOutcome {
    /// No baseline branch is configured; the whole-project prompt was copied instead.
    CopiedProjectPrompt,
    NoDifferences,
    Saved(PathBuf),
}
