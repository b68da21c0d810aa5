/// Used by the diff review copy when `reviewPrompt` is unset.
pub const DEFAULT_DIFF_REVIEW_PROMPT: &str = r"Please review the code using the git diff patch file below under these conditions.

- Feel free to use the command line to read the patch file.
- Review every source file listed in the patch file.
- Search for related types and modules as well and review the change as a whole.
- Focus on design; point out clear bugs and errors first and ignore minor redundancy.
- Format the review as Markdown.

[File path] {filePath}";

/// Used by the whole-project copy when `reviewPromptNoDiff` is unset.
pub const DEFAULT_PROJECT_REVIEW_PROMPT: &str = r"Please review the code of this project under these conditions.
- Review every source file in the project.
- Focus on design; point out clear bugs and errors first and ignore minor redundancy.";
