use reqwest::multipart;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::Path;
use std::time::Duration;

use super::configs::OpenAiConfig;
use super::utils::{
    expect_json, messages_to_openai_spec, mime_type_for, openai_response_content,
    openai_response_parsed, strip_nulls, NO_RESPONSE,
};
use crate::errors::ProviderError;
use crate::models::message::Message;
use crate::prompt::brainstorm_preamble;
use crate::schema::OutputFormat;

pub const OPENAI_HOST: &str = "https://api.openai.com";
pub const OPENAI_MODEL: &str = "o3";

fn default_scope() -> String {
    "general".to_string()
}

/// Parameters of the chat-completion brainstorming tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrainstormRequest {
    #[serde(default = "default_scope")]
    pub domain: String,
    #[serde(default = "default_scope")]
    pub topic: String,
    /// Ordered conversation; order is preserved on the wire.
    pub messages: Vec<Message>,
    /// Optional mapping of field name to type tag; malformed mappings
    /// degrade the call to plain text.
    #[serde(default)]
    pub expected_output_schema: Option<Value>,
    /// Optional local path uploaded to the provider before the call.
    #[serde(default)]
    pub file_uri: Option<String>,
}

impl BrainstormRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            domain: default_scope(),
            topic: default_scope(),
            messages,
            expected_output_schema: None,
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

    pub fn with_output_schema(mut self, schema: Value) -> Self {
        self.expected_output_schema = Some(schema);
        self
    }

    pub fn with_file<S: Into<String>>(mut self, file_uri: S) -> Self {
        self.file_uri = Some(file_uri.into());
        self
    }
}

/// Chat-completion brainstorming handler. Stateless: every call is one
/// optional upload plus one completion request.
pub struct OpenAiProvider {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600)) // 10 minutes timeout
            .build()?;

        Ok(Self { client, config })
    }

    async fn post(&self, payload: Value) -> Result<Value, ProviderError> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.host.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&payload)
            .send()
            .await?;

        expect_json(response).await
    }

    /// Upload a local file with purpose `user_data` and return its id.
    async fn upload_file(&self, path: &Path) -> Result<String, ProviderError> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            ProviderError::Upload(format!("could not read {}: {e}", path.display()))
        })?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload")
            .to_string();
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime_type_for(path))?;
        let form = multipart::Form::new()
            .text("purpose", "user_data")
            .part("file", part);

        let url = format!("{}/v1/files", self.config.host.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .multipart(form)
            .send()
            .await?;

        let body = expect_json(response).await?;
        body.get("id")
            .and_then(Value::as_str)
            .map(String::from)
            .ok_or_else(|| ProviderError::Upload("upload response missing file id".to_string()))
    }

    /// Run one brainstorming call: compile the output schema (degrading on
    /// malformation), prepend the preamble, upload and attach `file_uri` if
    /// given, then unwrap the completion to a string.
    pub async fn brainstorm(&self, request: BrainstormRequest) -> Result<String, ProviderError> {
        let format = OutputFormat::from_descriptor(request.expected_output_schema.as_ref());

        let preamble = brainstorm_preamble(&request.domain, &request.topic)?;
        let mut messages = Vec::with_capacity(request.messages.len() + 2);
        messages.push(Message::system(preamble));
        messages.extend(request.messages);

        if let Some(file_uri) = &request.file_uri {
            let file_id = self.upload_file(Path::new(file_uri)).await?;
            messages.push(Message::file_reference(file_id));
        }

        let mut payload = json!({
            "model": self.config.model,
            "messages": messages_to_openai_spec(&messages),
        });
        if let OutputFormat::Structured(schema) = &format {
            payload
                .as_object_mut()
                .unwrap()
                .insert("response_format".to_string(), schema.response_format());
        }

        let response = self.post(payload).await?;
        if let Some(error) = response.get("error") {
            return Err(ProviderError::Api(error.to_string()));
        }

        if format.is_structured() {
            if let Some(parsed) = openai_response_parsed(&response) {
                return Ok(strip_nulls(parsed.clone()).to_string());
            }
        }

        Ok(openai_response_content(&response).unwrap_or_else(|| NO_RESPONSE.to_string()))
    }
}
