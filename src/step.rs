//! Protocol steps exchanged with the model.
//!
//! Every message in the conversation (apart from the system prompt) is a
//! single JSON object tagged by `type`. [`Step`] is the strict Rust view of
//! that object: parsing goes through serde's internally-tagged enum support,
//! so an unknown `type` or a missing field is rejected at the boundary
//! instead of surfacing later as an unchecked field access.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// One unit of the plan/action/observation protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Step {
    /// Raw human request.
    User { user: String },
    /// The model's stated intent. Display only.
    Plan { plan: String },
    /// A requested tool call. `input` is a bare string or a record,
    /// depending on the tool.
    Action {
        function: String,
        #[serde(default)]
        input: Value,
    },
    /// A tool result, either injected by the loop or echoed by the model.
    Observation { observation: String },
    /// The final answer for the current turn.
    Output { output: String },
}

/// Why an assistant message could not be read as a [`Step`].
#[derive(Debug, Error)]
pub enum StepError {
    #[error("response is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("response is not a JSON object")]
    NotAnObject,

    #[error("response has no string \"type\" field")]
    MissingType,

    #[error("unrecognized step type \"{0}\"")]
    UnknownType(String),

    #[error("malformed \"{kind}\" step: {source}")]
    Malformed {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}

const STEP_TYPES: &[&str] = &["user", "plan", "action", "observation", "output"];

impl Step {
    /// Parses and validates one assistant message.
    ///
    /// The checks run in layers so the error says which one failed: valid
    /// JSON, an object, a known `type` tag, then per-variant fields.
    pub fn parse(raw: &str) -> Result<Self, StepError> {
        let value: Value = serde_json::from_str(raw.trim()).map_err(StepError::InvalidJson)?;
        let kind = match &value {
            Value::Object(map) => match map.get("type") {
                Some(Value::String(kind)) => kind.clone(),
                _ => return Err(StepError::MissingType),
            },
            _ => return Err(StepError::NotAnObject),
        };
        if !STEP_TYPES.contains(&kind.as_str()) {
            return Err(StepError::UnknownType(kind));
        }
        serde_json::from_value(value).map_err(|source| StepError::Malformed { kind, source })
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::User { user: text.into() }
    }

    pub fn observation(text: impl Into<String>) -> Self {
        Self::Observation {
            observation: text.into(),
        }
    }

    /// Compact single-line JSON, the form stored in the transcript.
    pub fn to_json(&self) -> String {
        // A Step holds only strings and JSON values, so serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_each_variant() {
        assert_eq!(
            Step::parse(r#"{"type":"plan","plan":"look up Dubai"}"#).unwrap(),
            Step::Plan {
                plan: "look up Dubai".into()
            }
        );
        assert_eq!(
            Step::parse(r#"{"type":"action","function":"readFile","input":"a.txt"}"#).unwrap(),
            Step::Action {
                function: "readFile".into(),
                input: json!("a.txt"),
            }
        );
        assert_eq!(
            Step::parse(r#"{"type":"output","output":"done"}"#).unwrap(),
            Step::Output {
                output: "done".into()
            }
        );
    }

    #[test]
    fn test_parse_structured_action_input() {
        let step = Step::parse(
            r#"{"type":"action","function":"writeFile","input":{"path":"a.txt","content":"hi"}}"#,
        )
        .unwrap();
        match step {
            Step::Action { function, input } => {
                assert_eq!(function, "writeFile");
                assert_eq!(input["content"], "hi");
            }
            other => panic!("expected action, got {:?}", other),
        }
    }

    #[test]
    fn test_action_without_input_defaults_to_null() {
        let step = Step::parse(r#"{"type":"action","function":"readFile"}"#).unwrap();
        assert_eq!(
            step,
            Step::Action {
                function: "readFile".into(),
                input: Value::Null,
            }
        );
    }

    #[test]
    fn test_parse_tolerates_surrounding_whitespace() {
        assert!(Step::parse("  {\"type\":\"output\",\"output\":\"x\"}\n").is_ok());
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(matches!(
            Step::parse("I will now read the file"),
            Err(StepError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(matches!(Step::parse("[1, 2]"), Err(StepError::NotAnObject)));
    }

    #[test]
    fn test_missing_type_rejected() {
        assert!(matches!(
            Step::parse(r#"{"output":"done"}"#),
            Err(StepError::MissingType)
        ));
        assert!(matches!(
            Step::parse(r#"{"type":3,"output":"done"}"#),
            Err(StepError::MissingType)
        ));
    }

    #[test]
    fn test_unknown_type_rejected() {
        match Step::parse(r#"{"type":"thought","thought":"hmm"}"#) {
            Err(StepError::UnknownType(kind)) => assert_eq!(kind, "thought"),
            other => panic!("expected unknown type, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_field_rejected() {
        match Step::parse(r#"{"type":"output"}"#) {
            Err(StepError::Malformed { kind, .. }) => assert_eq!(kind, "output"),
            other => panic!("expected malformed, got {:?}", other),
        }
    }

    #[test]
    fn test_to_json_carries_type_tag() {
        let json = Step::observation("10°").to_json();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value, json!({"type": "observation", "observation": "10°"}));
    }
}
