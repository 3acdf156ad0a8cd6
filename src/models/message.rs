use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::role::Role;

/// Message content: plain text, or typed content blocks forwarded to the
/// provider verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<Value>),
}

impl MessageContent {
    /// Get the text if this is a plain-text content
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(text) => Some(text),
            MessageContent::Blocks(_) => None,
        }
    }
}

/// A single entry of a conversation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: MessageContent,
}

impl Message {
    /// Create a new system message with the given text
    pub fn system<S: Into<String>>(text: S) -> Self {
        Message {
            role: Role::System,
            content: MessageContent::Text(text.into()),
        }
    }

    /// Create a new user message with the given text
    pub fn user<S: Into<String>>(text: S) -> Self {
        Message {
            role: Role::User,
            content: MessageContent::Text(text.into()),
        }
    }

    /// Create a new assistant message with the given text
    pub fn assistant<S: Into<String>>(text: S) -> Self {
        Message {
            role: Role::Assistant,
            content: MessageContent::Text(text.into()),
        }
    }

    /// User message carrying a single file block referencing an uploaded
    /// file. Appended after the conversation when `file_uri` was given.
    pub fn file_reference<S: Into<String>>(file_id: S) -> Self {
        Message {
            role: Role::User,
            content: MessageContent::Blocks(vec![json!({
                "type": "file",
                "file": { "file_id": file_id.into() }
            })]),
        }
    }
}
