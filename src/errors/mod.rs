use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::enums::notice_level::NoticeLevel;
use crate::traits::workbench::Workbench;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum ReviewError {
    // User dismissed a picker
    #[error("{action} was cancelled")]
    Cancelled {
        action: String,
    },

    // Preconditions
    #[error("no workspace root could be resolved")]
    NoWorkspace,
    #[error("current branch and compare branch are both '{branch}'")]
    SameBranch {
        branch: String,
    },

    // Version control
    #[error("git failed while trying to {step}: {reason}")]
    VersionControlError {
        step: String,
        reason: String,
    },

    // File operations
    #[error("failed to write '{file_path}': {reason}")]
    FileWriteError {
        file_path: String,
        reason: String,
    },

    // Desktop primitives
    #[error("clipboard unavailable: {reason}")]
    ClipboardError {
        reason: String,
    },

    // Configuration
    #[error("configuration error: {message}")]
    ConfigurationError {
        message: String,
        field: Option<String>,
        suggestion: Option<String>,
    },
    #[error("configuration file error at '{path}': {reason}")]
    ConfigurationFileError {
        path: String,
        reason: String,
    },

    #[error("failed to parse {content_type}: {reason}")]
    ParseError {
        content_type: String,
        reason: String,
    },

    #[error("system error during {operation}: {reason}")]
    SystemError {
        operation: String,
        reason: String,
    },
}

impl ReviewError {
    pub fn cancelled(action: &str) -> Self {
        Self::Cancelled {
            action: action.to_string(),
        }
    }

    pub fn vcs_error(step: &str, reason: &str) -> Self {
        Self::VersionControlError {
            step: step.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn file_write_error(file_path: &str, reason: &str) -> Self {
        Self::FileWriteError {
            file_path: file_path.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn clipboard_error(reason: &str) -> Self {
        Self::ClipboardError {
            reason: reason.to_string(),
        }
    }

    pub fn config_error(message: &str, field: Option<&str>, suggestion: Option<&str>) -> Self {
        Self::ConfigurationError {
            message: message.to_string(),
            field: field.map(ToString::to_string),
            suggestion: suggestion.map(ToString::to_string),
        }
    }

    pub fn config_file_error(path: &str, reason: &str) -> Self {
        Self::ConfigurationFileError {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn system_error(operation: &str, reason: &str) -> Self {
        Self::SystemError {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub const fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SystemError { .. } => ErrorSeverity::Critical,
            Self::FileWriteError { .. }
            | Self::ConfigurationFileError { .. }
            | Self::VersionControlError { .. } => ErrorSeverity::High,
            Self::NoWorkspace | Self::ClipboardError { .. } | Self::ParseError { .. } => {
                ErrorSeverity::Medium
            }
            Self::Cancelled { .. } | Self::SameBranch { .. } | Self::ConfigurationError { .. } => {
                ErrorSeverity::Low
            }
        }
    }

    /// Level the failure is shown to the user at. Cancellation and an
    /// identical baseline are warnings; everything else is an error.
    pub const fn notice_level(&self) -> NoticeLevel {
        match self {
            Self::Cancelled { .. } | Self::SameBranch { .. } => NoticeLevel::Warning,
            _ => NoticeLevel::Error,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Cancelled { action } => format!("No selection was made; {action} stopped"),
            Self::NoWorkspace => {
                "Could not resolve the workspace root path\n💡 Run from inside a project or pass --workspace <dir>".to_string()
            }
            Self::SameBranch { branch } => {
                format!("The current branch and the compare branch are the same ('{branch}')\n💡 Pick a different compare branch")
            }
            Self::VersionControlError { step, reason } => {
                format!("Failed to {step}: {reason}\n💡 Check that the workspace is a git repository and the branch names exist")
            }
            Self::FileWriteError { file_path, reason } => {
                format!("Failed to save the diff file '{file_path}': {reason}\n💡 Check the save directory exists and is writable")
            }
            Self::ClipboardError { reason } => {
                format!("Could not copy to the clipboard: {reason}")
            }
            Self::ConfigurationError { message, field, suggestion } => {
                let mut msg = format!("Configuration Error: {message}");
                if let Some(field) = field {
                    msg.push_str(&format!(" (field: {field})"));
                }
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 Suggestion: {suggestion}"));
                }
                msg
            }
            Self::ConfigurationFileError { path, reason } => {
                format!("Configuration file error at '{path}': {reason}\n💡 Check file permissions and syntax")
            }
            Self::ParseError { content_type, reason } => {
                format!("Parse error in {content_type}: {reason}\n💡 Check the format and syntax of the input")
            }
            Self::SystemError { operation, reason } => {
                format!("System error during {operation}: {reason}")
            }
        }
    }

    pub fn technical_details(&self) -> String {
        format!("{self:?}")
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// Result type alias for diffprompt operations
pub type ReviewResult<T> = Result<T, ReviewError>;

pub struct ErrorHandler;

impl ErrorHandler {
    /// Logs the technical details and shows the user message through the workbench.
    pub fn report(workbench: &dyn Workbench, error: &ReviewError) {
        log::debug!("[{}] {}", error.severity().name(), error.technical_details());
        workbench.notify(error.notice_level(), &error.user_message());
    }
}

impl From<std::io::Error> for ReviewError {
    fn from(error: std::io::Error) -> Self {
        Self::SystemError {
            operation: "I/O operation".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for ReviewError {
    fn from(error: serde_json::Error) -> Self {
        Self::ParseError {
            content_type: "JSON".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for ReviewError {
    fn from(error: toml::de::Error) -> Self {
        Self::ParseError {
            content_type: "TOML".to_string(),
            reason: error.message().to_string(),
        }
    }
}

impl From<toml::ser::Error> for ReviewError {
    fn from(error: toml::ser::Error) -> Self {
        Self::ParseError {
            content_type: "TOML".to_string(),
            reason: error.to_string(),
        }
    }
}
