use reqwest::multipart;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::Path;
use std::time::Duration;

use super::configs::GeminiConfig;
use super::utils::{contents_to_gemini_parts, expect_json, gemini_response_text, mime_type_for, NO_RESPONSE};
use crate::errors::ProviderError;
use crate::models::content::{Content, ContentInput, FileData};
use crate::prompt::brainstorm_preamble;

pub const GEMINI_HOST: &str = "https://generativelanguage.googleapis.com";
pub const GEMINI_MODEL: &str = "gemini-2.5-pro";

fn default_scope() -> String {
    "general".to_string()
}

/// Parameters of the generation brainstorming tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrainstormRequest {
    #[serde(default = "default_scope")]
    pub domain: String,
    #[serde(default = "default_scope")]
    pub topic: String,
    /// A single content item or an ordered sequence; normalized to a
    /// sequence with the preamble prepended.
    pub contents: ContentInput,
    /// Optional local path uploaded to the provider before the call.
    #[serde(default)]
    pub file_uri: Option<String>,
}

impl BrainstormRequest {
    pub fn new<C: Into<ContentInput>>(contents: C) -> Self {
        Self {
            domain: default_scope(),
            topic: default_scope(),
            contents: contents.into(),
            file_uri: None,
        }
    }

    pub fn with_domain<S: Into<String>>(mut self, domain: S) -> Self {
        self.domain = domain.into();
        self
    }

    pub fn with_topic<S: Into<String>>(mut self, topic: S) -> Self {
        self.topic = topic.into();
        self
    }

    pub fn with_file<S: Into<String>>(mut self, file_uri: S) -> Self {
        self.file_uri = Some(file_uri.into());
        self
    }
}

/// Generation brainstorming handler. Stateless: every call is one optional
/// upload plus one generateContent request.
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600)) // 10 minutes timeout
            .build()?;

        Ok(Self { client, config })
    }

    async fn post(&self, payload: Value) -> Result<Value, ProviderError> {
        // API key travels as a query parameter, not a header.
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.host.trim_end_matches('/'),
            self.config.model,
            self.config.api_key,
        );

        let response = self.client.post(&url).json(&payload).send().await?;
        expect_json(response).await
    }

    /// Upload a local file to the provider's file storage and return the
    /// handle to attach to the request.
    async fn upload_file(&self, path: &Path) -> Result<FileData, ProviderError> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            ProviderError::Upload(format!("could not read {}: {e}", path.display()))
        })?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload")
            .to_string();
        let mime_type = mime_type_for(path);

        let metadata = json!({"file": {"display_name": file_name}});
        let form = multipart::Form::new()
            .part(
                "metadata",
                multipart::Part::text(metadata.to_string()).mime_str("application/json")?,
            )
            .part(
                "file",
                multipart::Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(mime_type)?,
            );

        let url = format!(
            "{}/upload/v1beta/files?key={}",
            self.config.host.trim_end_matches('/'),
            self.config.api_key,
        );
        let response = self.client.post(&url).multipart(form).send().await?;
        let body = expect_json(response).await?;

        let file_uri = body
            .pointer("/file/uri")
            .and_then(Value::as_str)
            .ok_or_else(|| ProviderError::Upload("upload response missing file uri".to_string()))?;
        let mime_type = body
            .pointer("/file/mimeType")
            .and_then(Value::as_str)
            .unwrap_or(mime_type);

        Ok(FileData {
            file_uri: file_uri.to_string(),
            mime_type: mime_type.to_string(),
        })
    }

    /// Run one brainstorming call: prepend the preamble to the normalized
    /// content sequence, upload and append `file_uri` if given, then unwrap
    /// the generation response to a string.
    pub async fn brainstorm(&self, request: BrainstormRequest) -> Result<String, ProviderError> {
        let preamble = brainstorm_preamble(&request.domain, &request.topic)?;

        let incoming = request.contents.into_contents();
        let mut contents = Vec::with_capacity(incoming.len() + 2);
        contents.push(Content::text(preamble));
        contents.extend(incoming);

        if let Some(file_uri) = &request.file_uri {
            let file = self.upload_file(Path::new(file_uri)).await?;
            contents.push(Content::File(file));
        }

        let payload = json!({
            "contents": [{
                "role": "user",
                "parts": contents_to_gemini_parts(&contents),
            }],
        });

        let response = self.post(payload).await?;
        if let Some(error) = response.get("error") {
            return Err(ProviderError::Api(error.to_string()));
        }

        Ok(gemini_response_text(&response).unwrap_or_else(|| NO_RESPONSE.to_string()))
    }
}
