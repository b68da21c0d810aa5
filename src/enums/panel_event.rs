use serde::{Deserialize, Serialize};
use crate::enums::notice_level::NoticeLevel;

/// Messages sent back to the panel page in a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PanelEvent {
    UpdateSaveDirectory {
        path: String,
    },
    Notice {
        level: NoticeLevel,
        message: String,
    },
}
