use reqwest::{Response, StatusCode};
use serde_json::{json, Value};
use std::path::Path;

use crate::errors::ProviderError;
use crate::models::content::Content;
use crate::models::message::{Message, MessageContent};

/// Returned in place of response text when the provider produced none.
pub const NO_RESPONSE: &str = "[No response provided]";

/// Convert conversation messages to the chat-completion wire format.
pub fn messages_to_openai_spec(messages: &[Message]) -> Vec<Value> {
    messages
        .iter()
        .map(|message| match &message.content {
            MessageContent::Text(text) => json!({
                "role": message.role,
                "content": text,
            }),
            MessageContent::Blocks(blocks) => json!({
                "role": message.role,
                "content": blocks,
            }),
        })
        .collect()
}

/// Convert a content sequence to the generation-provider `parts` array.
pub fn contents_to_gemini_parts(contents: &[Content]) -> Vec<Value> {
    contents
        .iter()
        .map(|content| match content {
            Content::Text(text) => json!({"text": text}),
            Content::File(file) => json!({
                "file_data": {
                    "file_uri": file.file_uri,
                    "mime_type": file.mime_type,
                }
            }),
        })
        .collect()
}

/// First choice's message content, if non-empty.
pub fn openai_response_content(response: &Value) -> Option<String> {
    response
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(String::from)
}

/// First choice's parsed structured object, if present.
pub fn openai_response_parsed(response: &Value) -> Option<&Value> {
    response
        .pointer("/choices/0/message/parsed")
        .filter(|parsed| parsed.is_object())
}

/// Concatenated text parts of the first candidate, if non-empty.
pub fn gemini_response_text(response: &Value) -> Option<String> {
    let parts = response
        .pointer("/candidates/0/content/parts")?
        .as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Drop null object fields, recursively, before serializing a parsed
/// structured object back to the caller.
pub fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_nulls).collect()),
        other => other,
    }
}

/// Mime type for an upload, guessed from the file extension.
pub fn mime_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("csv") => "text/csv",
        Some("json") => "application/json",
        Some("html") => "text/html",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// Decode a provider response, mapping non-success statuses to the error
/// taxonomy: 429/5xx are server errors, anything else carries the body text.
pub async fn expect_json(response: Response) -> Result<Value, ProviderError> {
    match response.status() {
        StatusCode::OK => Ok(response.json().await?),
        status if status == StatusCode::TOO_MANY_REQUESTS || status.as_u16() >= 500 => {
            Err(ProviderError::Server(status))
        }
        status => Err(ProviderError::Request {
            status,
            body: response.text().await?,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_messages_to_openai_spec() {
        let messages = vec![
            Message::system("Be helpful."),
            Message::user("Hello"),
            Message::assistant("Hi!"),
        ];
        let spec = messages_to_openai_spec(&messages);

        assert_eq!(spec.len(), 3);
        assert_eq!(spec[0], json!({"role": "system", "content": "Be helpful."}));
        assert_eq!(spec[1], json!({"role": "user", "content": "Hello"}));
        assert_eq!(spec[2]["role"], "assistant");
    }

    #[test]
    fn test_messages_to_openai_spec_blocks() {
        let messages = vec![Message::file_reference("file-9")];
        let spec = messages_to_openai_spec(&messages);

        assert_eq!(spec[0]["role"], "user");
        assert_eq!(spec[0]["content"][0]["file"]["file_id"], "file-9");
    }

    #[test]
    fn test_messages_to_openai_spec_preserves_order() {
        let messages: Vec<Message> = (0..5).map(|i| Message::user(format!("m{i}"))).collect();
        let spec = messages_to_openai_spec(&messages);
        for (i, entry) in spec.iter().enumerate() {
            assert_eq!(entry["content"], format!("m{i}"));
        }
    }

    #[test]
    fn test_contents_to_gemini_parts() {
        let contents = vec![
            Content::text("look at this file"),
            Content::file("https://storage.example/files/abc", "application/pdf"),
        ];
        let parts = contents_to_gemini_parts(&contents);

        assert_eq!(parts[0], json!({"text": "look at this file"}));
        assert_eq!(
            parts[1],
            json!({"file_data": {
                "file_uri": "https://storage.example/files/abc",
                "mime_type": "application/pdf",
            }})
        );
    }

    #[test]
    fn test_openai_response_content() {
        let response = json!({
            "choices": [{"message": {"role": "assistant", "content": "An idea"}}]
        });
        assert_eq!(openai_response_content(&response).as_deref(), Some("An idea"));
    }

    #[test]
    fn test_openai_response_content_empty_or_null() {
        let empty = json!({"choices": [{"message": {"content": ""}}]});
        assert_eq!(openai_response_content(&empty), None);

        let null = json!({"choices": [{"message": {"content": null}}]});
        assert_eq!(openai_response_content(&null), None);

        let missing = json!({"choices": []});
        assert_eq!(openai_response_content(&missing), None);
    }

    #[test]
    fn test_openai_response_parsed_requires_object() {
        let parsed = json!({
            "choices": [{"message": {"parsed": {"risk_level": "high"}}}]
        });
        assert_eq!(
            openai_response_parsed(&parsed),
            Some(&json!({"risk_level": "high"}))
        );

        let scalar = json!({"choices": [{"message": {"parsed": "high"}}]});
        assert_eq!(openai_response_parsed(&scalar), None);
    }

    #[test]
    fn test_gemini_response_text_joins_parts() {
        let response = json!({
            "candidates": [{
                "content": {"parts": [{"text": "Hello "}, {"text": "world"}], "role": "model"}
            }]
        });
        assert_eq!(gemini_response_text(&response).as_deref(), Some("Hello world"));
    }

    #[test]
    fn test_gemini_response_text_empty() {
        let no_candidates = json!({"candidates": []});
        assert_eq!(gemini_response_text(&no_candidates), None);

        let empty_text = json!({
            "candidates": [{"content": {"parts": [{"text": ""}], "role": "model"}}]
        });
        assert_eq!(gemini_response_text(&empty_text), None);
    }

    #[test]
    fn test_strip_nulls() {
        let value = json!({
            "kept": "yes",
            "dropped": null,
            "nested": {"inner": null, "deep": [{"also": null, "kept": 1}]},
        });
        let stripped = strip_nulls(value);
        assert_eq!(
            stripped,
            json!({"kept": "yes", "nested": {"deep": [{"kept": 1}]}})
        );
    }

    #[test]
    fn test_mime_type_for() {
        assert_eq!(mime_type_for(&PathBuf::from("notes.PDF")), "application/pdf");
        assert_eq!(mime_type_for(&PathBuf::from("data.csv")), "text/csv");
        assert_eq!(
            mime_type_for(&PathBuf::from("mystery.bin")),
            "application/octet-stream"
        );
        assert_eq!(
            mime_type_for(&PathBuf::from("no_extension")),
            "application/octet-stream"
        );
    }
}
