//! Compiles an `expected_output_schema` descriptor — a mapping of field name
//! to type tag — into the JSON schema sent with a schema-constrained
//! completion. Malformed descriptors never fail the call: compilation
//! degrades to [`OutputFormat::Text`] and the reason is logged once.

use serde_json::{json, Map, Value};
use tracing::warn;

/// A compiled response schema for a structured completion.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSchema {
    schema: Value,
}

impl OutputSchema {
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// The `response_format` payload requesting a schema-constrained
    /// completion.
    pub fn response_format(&self) -> Value {
        json!({
            "type": "json_schema",
            "json_schema": {
                "name": "brainstorm_output",
                "strict": true,
                "schema": self.schema,
            }
        })
    }
}

/// How the handler asks the provider to shape its output. `Text` is both the
/// no-descriptor case and the named fallback for a malformed descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputFormat {
    Structured(OutputSchema),
    Text,
}

impl OutputFormat {
    /// Compile an optional descriptor. Absent or malformed descriptors yield
    /// `Text`; malformation is logged but never surfaced to the caller.
    pub fn from_descriptor(descriptor: Option<&Value>) -> Self {
        let Some(descriptor) = descriptor else {
            return OutputFormat::Text;
        };
        match compile(descriptor) {
            Ok(schema) => OutputFormat::Structured(schema),
            Err(reason) => {
                warn!(%reason, "ignoring malformed output schema, falling back to text");
                OutputFormat::Text
            }
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, OutputFormat::Structured(_))
    }
}

fn compile(descriptor: &Value) -> Result<OutputSchema, String> {
    let fields = descriptor
        .as_object()
        .ok_or_else(|| "descriptor is not a mapping of field names to types".to_string())?;
    if fields.is_empty() {
        return Err("descriptor has no fields".to_string());
    }

    let mut properties = Map::new();
    let mut required = Vec::new();
    for (name, tag) in fields {
        let tag = tag
            .as_str()
            .ok_or_else(|| format!("type for field `{name}` is not a string"))?;
        let schema =
            schema_for_tag(tag).ok_or_else(|| format!("unknown type `{tag}` for field `{name}`"))?;
        properties.insert(name.clone(), schema);
        required.push(Value::String(name.clone()));
    }

    Ok(OutputSchema {
        schema: json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false,
        }),
    })
}

/// Schema fragment for a single type tag. Accepts both the short spellings
/// callers pass through the tool boundary and the JSON-schema ones, plus
/// `list[<tag>]` for typed arrays.
fn schema_for_tag(tag: &str) -> Option<Value> {
    let tag = tag.trim();
    if let Some(inner) = tag.strip_prefix("list[").and_then(|rest| rest.strip_suffix(']')) {
        return Some(json!({"type": "array", "items": schema_for_tag(inner)?}));
    }
    match tag {
        "str" | "string" => Some(json!({"type": "string"})),
        "int" | "integer" => Some(json!({"type": "integer"})),
        "float" | "number" => Some(json!({"type": "number"})),
        "bool" | "boolean" => Some(json!({"type": "boolean"})),
        "dict" | "object" => Some(json!({"type": "object"})),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_basic_descriptor() {
        let descriptor = json!({"risk_level": "str", "score": "int"});
        let format = OutputFormat::from_descriptor(Some(&descriptor));

        let OutputFormat::Structured(schema) = format else {
            panic!("expected structured format");
        };
        let schema = schema.schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["risk_level"]["type"], "string");
        assert_eq!(schema["properties"]["score"]["type"], "integer");
        assert_eq!(schema["additionalProperties"], false);

        let required = schema["required"].as_array().unwrap();
        assert!(required.contains(&json!("risk_level")));
        assert!(required.contains(&json!("score")));
    }

    #[test]
    fn test_compile_list_tag() {
        let descriptor = json!({"ideas": "list[str]"});
        let format = OutputFormat::from_descriptor(Some(&descriptor));

        let OutputFormat::Structured(schema) = format else {
            panic!("expected structured format");
        };
        assert_eq!(schema.schema()["properties"]["ideas"]["type"], "array");
        assert_eq!(
            schema.schema()["properties"]["ideas"]["items"]["type"],
            "string"
        );
    }

    #[test]
    fn test_absent_descriptor_is_text() {
        assert_eq!(OutputFormat::from_descriptor(None), OutputFormat::Text);
    }

    #[test]
    fn test_non_object_descriptor_degrades() {
        let descriptor = json!(["risk_level"]);
        assert_eq!(
            OutputFormat::from_descriptor(Some(&descriptor)),
            OutputFormat::Text
        );
    }

    #[test]
    fn test_non_string_tag_degrades() {
        let descriptor = json!({"risk_level": 42});
        assert_eq!(
            OutputFormat::from_descriptor(Some(&descriptor)),
            OutputFormat::Text
        );
    }

    #[test]
    fn test_unknown_tag_degrades() {
        let descriptor = json!({"risk_level": "uuid"});
        assert_eq!(
            OutputFormat::from_descriptor(Some(&descriptor)),
            OutputFormat::Text
        );
    }

    #[test]
    fn test_empty_descriptor_degrades() {
        let descriptor = json!({});
        assert_eq!(
            OutputFormat::from_descriptor(Some(&descriptor)),
            OutputFormat::Text
        );
    }

    #[test]
    fn test_response_format_payload() {
        let descriptor = json!({"summary": "str"});
        let OutputFormat::Structured(schema) = OutputFormat::from_descriptor(Some(&descriptor))
        else {
            panic!("expected structured format");
        };

        let format = schema.response_format();
        assert_eq!(format["type"], "json_schema");
        assert_eq!(format["json_schema"]["name"], "brainstorm_output");
        assert_eq!(format["json_schema"]["strict"], true);
        assert_eq!(
            format["json_schema"]["schema"]["properties"]["summary"]["type"],
            "string"
        );
    }
}
