use std::path::Path;
use chrono::{DateTime, TimeZone};
use crate::config::constants::{PATCH_FILE_EXTENSION, PATCH_FILE_PREFIX, PATCH_TIMESTAMP_FORMAT};

/// `diff_<project>_<YYYYMMDDhhmmss>.patch`
pub fn patch_file_name<Tz>(project: &str, captured_at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}_{}_{}.{}",
        PATCH_FILE_PREFIX,
        project,
        captured_at.format(PATCH_TIMESTAMP_FORMAT),
        PATCH_FILE_EXTENSION
    )
}

/// Base name of the project root, as used in patch file names.
pub fn project_folder_name(root: &Path) -> String {
    root.file_name()
        .map_or_else(|| root.display().to_string(), |name| name.to_string_lossy().into_owned())
}
