use serde::{Deserialize, Serialize};

/// Handle for a file uploaded to the generation provider's file storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileData {
    pub file_uri: String,
    pub mime_type: String,
}

/// One element of a generation request: plain text or an uploaded file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    File(FileData),
}

impl Content {
    pub fn text<S: Into<String>>(text: S) -> Self {
        Content::Text(text.into())
    }

    pub fn file<S: Into<String>, T: Into<String>>(file_uri: S, mime_type: T) -> Self {
        Content::File(FileData {
            file_uri: file_uri.into(),
            mime_type: mime_type.into(),
        })
    }

    /// Get the text if this is a plain-text element
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            Content::File(_) => None,
        }
    }
}

/// Caller-facing `contents` parameter: a single content item or an ordered
/// sequence of them. Normalized to a sequence before any other processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentInput {
    Single(Content),
    Many(Vec<Content>),
}

impl ContentInput {
    pub fn into_contents(self) -> Vec<Content> {
        match self {
            ContentInput::Single(content) => vec![content],
            ContentInput::Many(contents) => contents,
        }
    }
}

impl From<&str> for ContentInput {
    fn from(text: &str) -> Self {
        ContentInput::Single(Content::text(text))
    }
}

impl From<Vec<Content>> for ContentInput {
    fn from(contents: Vec<Content>) -> Self {
        ContentInput::Many(contents)
    }
}
