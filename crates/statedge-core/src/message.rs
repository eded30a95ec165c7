//! Outbound cross-context navigation message

use serde::{Deserialize, Serialize};

use crate::types::AccessTier;

/// Value of the `source` field on every message
pub const MESSAGE_SOURCE: &str = "statedge_landing";

/// Target origin for `postMessage`; the host origin is not known from inside the frame
pub const TARGET_ORIGIN: &str = "*";

/// Message posted to the parent when direct assignment is not possible.
///
/// Fire-and-forget: no acknowledgment channel exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NavigationMessage {
    #[serde(rename = "whop_navigate_external")]
    External {
        url: String,
        level: AccessTier,
        source: String,
    },

    #[serde(rename = "whop_navigate_experience", rename_all = "camelCase")]
    Experience {
        experience_id: String,
        level: AccessTier,
        source: String,
    },
}

impl NavigationMessage {
    pub fn external(url: String, level: AccessTier) -> Self {
        NavigationMessage::External {
            url,
            level,
            source: MESSAGE_SOURCE.to_string(),
        }
    }

    pub fn experience(experience_id: String, level: AccessTier) -> Self {
        NavigationMessage::Experience {
            experience_id,
            level,
            source: MESSAGE_SOURCE.to_string(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
