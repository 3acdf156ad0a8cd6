//! The callable surface: two brainstorming tools and name-based dispatch.

use async_trait::async_trait;
use indoc::indoc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::{ToolError, ToolResult};
use crate::providers::configs::{GeminiConfig, OpenAiConfig};
use crate::providers::gemini::GeminiProvider;
use crate::providers::openai::OpenAiProvider;

/// A tool that can be called by a model or an agent host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tool {
    /// The name the tool is dispatched by
    pub name: String,
    /// A description of what the tool does
    pub description: String,
    /// JSON schema of the parameters the tool accepts
    pub parameters: Value,
}

impl Tool {
    pub fn new<N, D>(name: N, description: D, parameters: Value) -> Self
    where
        N: Into<String>,
        D: Into<String>,
    {
        Tool {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

/// A request to execute one tool with the given parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    pub name: String,
    pub parameters: Value,
}

impl ToolCall {
    pub fn new<S: Into<String>>(name: S, parameters: Value) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }
}

/// A named set of tools an agent host can mount and dispatch into.
#[async_trait]
pub trait ToolSet: Send + Sync {
    /// Name of this tool set
    fn name(&self) -> &str;

    /// The tools this set publishes
    fn tools(&self) -> Vec<Tool>;

    /// Execute one tool call and return its textual result
    async fn call(&self, tool_call: ToolCall) -> ToolResult<String>;
}

pub const OPENAI_BRAINSTORM: &str = "openai_brainstorm";
pub const GEMINI_BRAINSTORM: &str = "gemini_brainstorm";

const SCOPE_DESCRIPTION: &str = "Defaults to \"general\".";

/// The two brainstorming handlers behind one dispatch surface. Stateless;
/// concurrent calls share nothing but the underlying HTTP clients.
pub struct Brainstormer {
    openai: OpenAiProvider,
    gemini: GeminiProvider,
}

impl Brainstormer {
    pub fn new(openai: OpenAiProvider, gemini: GeminiProvider) -> Self {
        Self { openai, gemini }
    }

    /// Build both providers from environment credentials.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            openai: OpenAiProvider::new(OpenAiConfig::from_env()?)?,
            gemini: GeminiProvider::new(GeminiConfig::from_env()?)?,
        })
    }
}

#[async_trait]
impl ToolSet for Brainstormer {
    fn name(&self) -> &str {
        "brainstorm"
    }

    fn tools(&self) -> Vec<Tool> {
        vec![
            Tool::new(
                OPENAI_BRAINSTORM,
                indoc! {"
                    Brainstorm over a conversation with a chat-completion model.
                    Optionally constrain the answer to a JSON object described by
                    expected_output_schema, and attach a local file for the model to read."},
                json!({
                    "type": "object",
                    "required": ["messages"],
                    "properties": {
                        "domain": {
                            "type": "string",
                            "description": format!("Domain of expertise for the brainstorm. {SCOPE_DESCRIPTION}"),
                        },
                        "topic": {
                            "type": "string",
                            "description": format!("Topic to focus on within the domain. {SCOPE_DESCRIPTION}"),
                        },
                        "messages": {
                            "type": "array",
                            "description": "Ordered conversation entries.",
                            "items": {
                                "type": "object",
                                "required": ["role", "content"],
                                "properties": {
                                    "role": {"type": "string", "enum": ["system", "user", "assistant"]},
                                    "content": {"description": "Message text, or an array of typed content blocks."},
                                },
                            },
                        },
                        "expected_output_schema": {
                            "type": "object",
                            "description": "Mapping of output field name to a type tag (str, int, float, bool, dict, list[...]). Malformed mappings are ignored and the answer comes back as plain text.",
                        },
                        "file_uri": {
                            "type": "string",
                            "description": "Local path of a file to upload and attach to the request.",
                        },
                    },
                }),
            ),
            Tool::new(
                GEMINI_BRAINSTORM,
                indoc! {"
                    Brainstorm over a content sequence with a generation model.
                    Accepts a single text item or an ordered sequence, and optionally
                    a local file to upload and attach."},
                json!({
                    "type": "object",
                    "required": ["contents"],
                    "properties": {
                        "domain": {
                            "type": "string",
                            "description": format!("Domain of expertise for the brainstorm. {SCOPE_DESCRIPTION}"),
                        },
                        "topic": {
                            "type": "string",
                            "description": format!("Topic to focus on within the domain. {SCOPE_DESCRIPTION}"),
                        },
                        "contents": {
                            "description": "A single text item, or an ordered array of text items and file handles.",
                        },
                        "file_uri": {
                            "type": "string",
                            "description": "Local path of a file to upload and attach to the request.",
                        },
                    },
                }),
            ),
        ]
    }

    async fn call(&self, tool_call: ToolCall) -> ToolResult<String> {
        match tool_call.name.as_str() {
            OPENAI_BRAINSTORM => {
                let request = serde_json::from_value(tool_call.parameters)
                    .map_err(|e| ToolError::InvalidParameters(e.to_string()))?;
                Ok(self.openai.brainstorm(request).await?)
            }
            GEMINI_BRAINSTORM => {
                let request = serde_json::from_value(tool_call.parameters)
                    .map_err(|e| ToolError::InvalidParameters(e.to_string()))?;
                Ok(self.gemini.brainstorm(request).await?)
            }
            _ => Err(ToolError::NotFound(tool_call.name)),
        }
    }
}
