use serde::{Deserialize, Serialize};
use crate::enums::panel_event::PanelEvent;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PanelReply {
    pub events: Vec<PanelEvent>,
}
