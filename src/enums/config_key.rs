use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::errors::ReviewError;

/// The four persisted settings. Names match the keys in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfigKey {
    ReviewPrompt,
    ReviewPromptNoDiff,
    LastCompareBranch,
    SaveDirectory,
}

impl ConfigKey {
    pub const ALL: [Self; 4] = [
        Self::ReviewPrompt,
        Self::ReviewPromptNoDiff,
        Self::LastCompareBranch,
        Self::SaveDirectory,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReviewPrompt => "reviewPrompt",
            Self::ReviewPromptNoDiff => "reviewPromptNoDiff",
            Self::LastCompareBranch => "lastCompareBranch",
            Self::SaveDirectory => "saveDirectory",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|k| k.as_str()).collect();
                ReviewError::config_error(
                    "unknown configuration key",
                    Some(s),
                    Some(&format!("use one of: {}", known.join(", "))),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_key_name() {
        for key in ConfigKey::ALL {
            assert_eq!(key.as_str().parse::<ConfigKey>().unwrap(), key);
        }
    }

    #[test]
    fn rejects_unknown_key_with_suggestion() {
        let error = "branch".parse::<ConfigKey>().unwrap_err();
        assert!(error.user_message().contains("lastCompareBranch"));
    }
}
