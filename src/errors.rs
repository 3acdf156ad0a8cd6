use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a single handler invocation. Nothing here is retried or
/// recovered locally; every variant surfaces verbatim to the caller.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Transport-level failure from the HTTP client.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The provider answered 429 or 5xx.
    #[error("Server error: {0}")]
    Server(StatusCode),

    /// Any other non-success status.
    #[error("Request failed: {status}\n{body}")]
    Request { status: StatusCode, body: String },

    /// The provider answered 200 but the body carried an error object.
    #[error("Provider error: {0}")]
    Api(String),

    /// Reading or uploading the `file_uri` file failed.
    #[error("File upload failed: {0}")]
    Upload(String),

    /// The preamble template failed to render.
    #[error("Prompt rendering failed: {0}")]
    Prompt(#[from] tera::Error),
}

/// Dispatch-layer errors, kept serializable so a host can return them to the
/// model or over a wire.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Deserialize, Serialize)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Tool execution failed: {0}")]
    Execution(String),
}

impl From<ProviderError> for ToolError {
    fn from(err: ProviderError) -> Self {
        ToolError::Execution(err.to_string())
    }
}

pub type ToolResult<T> = Result<T, ToolError>;
