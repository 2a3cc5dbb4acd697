// 📨 Interaction payloads - Inbound command envelope and outbound reply

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const PING: u8 = 1;
pub const APPLICATION_COMMAND: u8 = 2;

pub const PONG: u8 = 1;
pub const CHANNEL_MESSAGE_WITH_SOURCE: u8 = 4;

// ============================================================================
// INBOUND
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Interaction {
    #[serde(rename = "type")]
    pub kind: u8,

    #[serde(default)]
    pub data: Option<CommandData>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CommandData {
    pub name: String,

    #[serde(default)]
    pub options: Vec<CommandOption>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommandOption {
    pub name: String,

    #[serde(default)]
    pub value: Value,
}

impl CommandData {
    /// String value of a named option, if present
    pub fn option_str(&self, name: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.name == name)
            .and_then(|o| o.value.as_str())
    }
}

// ============================================================================
// OUTBOUND
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: u8,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<MessageData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageData {
    pub content: String,
}

impl InteractionResponse {
    pub fn pong() -> Self {
        InteractionResponse {
            kind: PONG,
            data: None,
        }
    }

    pub fn message(content: impl Into<String>) -> Self {
        InteractionResponse {
            kind: CHANNEL_MESSAGE_WITH_SOURCE,
            data: Some(MessageData {
                content: content.into(),
            }),
        }
    }
}
