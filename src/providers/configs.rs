use anyhow::{Context, Result};
use std::env;

use super::gemini::{GEMINI_HOST, GEMINI_MODEL};
use super::openai::{OPENAI_HOST, OPENAI_MODEL};

/// Connection settings for the chat-completion provider.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub host: String,
    pub api_key: String,
    pub model: String,
}

impl OpenAiConfig {
    /// Default host and model with the given key.
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            host: OPENAI_HOST.to_string(),
            api_key: api_key.into(),
            model: OPENAI_MODEL.to_string(),
        }
    }

    /// Read the key from `OPENAI_API_KEY`, with optional `OPENAI_HOST` and
    /// `OPENAI_MODEL` overrides.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("OPENAI_HOST").unwrap_or_else(|_| OPENAI_HOST.to_string()),
            api_key: env::var("OPENAI_API_KEY").context("OPENAI_API_KEY is not set")?,
            model: env::var("OPENAI_MODEL").unwrap_or_else(|_| OPENAI_MODEL.to_string()),
        })
    }
}

/// Connection settings for the generation provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub host: String,
    pub api_key: String,
    pub model: String,
}

impl GeminiConfig {
    /// Default host and model with the given key.
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            host: GEMINI_HOST.to_string(),
            api_key: api_key.into(),
            model: GEMINI_MODEL.to_string(),
        }
    }

    /// Read the key from `GEMINI_API_KEY` (or `GOOGLE_API_KEY`), with
    /// optional `GEMINI_HOST` and `GEMINI_MODEL` overrides.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("GOOGLE_API_KEY"))
            .context("neither GEMINI_API_KEY nor GOOGLE_API_KEY is set")?;
        Ok(Self {
            host: env::var("GEMINI_HOST").unwrap_or_else(|_| GEMINI_HOST.to_string()),
            api_key,
            model: env::var("GEMINI_MODEL").unwrap_or_else(|_| GEMINI_MODEL.to_string()),
        })
    }
}
