//! Closed set of result shapes a tool can return.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value returned by a successful tool call.
///
/// Serialized as an externally tagged object with exactly one key, e.g.
/// `{"string": "done"}` or `{"double": 3.0}`. Deserialization rejects objects
/// with zero or several tags.
///
/// Only finite doubles survive a JSON round-trip; see
/// [`ToolOutput::is_representable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolOutput {
    String(String),
    Double(f64),
    Integer(i64),
    Boolean(bool),
    /// Arbitrary structured payload.
    Json(Value),
    List(Vec<ToolOutput>),
}

impl ToolOutput {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ToolOutput::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of the output. Integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ToolOutput::Double(d) => Some(*d),
            ToolOutput::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ToolOutput::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Whether this value survives a JSON round-trip unchanged.
    ///
    /// False when it contains a NaN or infinite double, which JSON encodes as
    /// `null`.
    pub fn is_representable(&self) -> bool {
        match self {
            ToolOutput::Double(d) => d.is_finite(),
            ToolOutput::List(items) => items.iter().all(ToolOutput::is_representable),
            _ => true,
        }
    }

    /// Name of the active case, matching its wire tag.
    pub fn kind(&self) -> &'static str {
        match self {
            ToolOutput::String(_) => "string",
            ToolOutput::Double(_) => "double",
            ToolOutput::Integer(_) => "integer",
            ToolOutput::Boolean(_) => "boolean",
            ToolOutput::Json(_) => "json",
            ToolOutput::List(_) => "list",
        }
    }
}

impl From<String> for ToolOutput {
    fn from(value: String) -> Self {
        ToolOutput::String(value)
    }
}

impl From<&str> for ToolOutput {
    fn from(value: &str) -> Self {
        ToolOutput::String(value.to_string())
    }
}

impl From<f64> for ToolOutput {
    fn from(value: f64) -> Self {
        ToolOutput::Double(value)
    }
}

impl From<i64> for ToolOutput {
    fn from(value: i64) -> Self {
        ToolOutput::Integer(value)
    }
}

impl From<bool> for ToolOutput {
    fn from(value: bool) -> Self {
        ToolOutput::Boolean(value)
    }
}

impl From<Value> for ToolOutput {
    fn from(value: Value) -> Self {
        ToolOutput::Json(value)
    }
}

impl<T: Into<ToolOutput>> From<Vec<T>> for ToolOutput {
    fn from(values: Vec<T>) -> Self {
        ToolOutput::List(values.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_tags() {
        assert_eq!(
            serde_json::to_value(ToolOutput::from("hi")).unwrap(),
            json!({"string": "hi"})
        );
        assert_eq!(
            serde_json::to_value(ToolOutput::Double(4.0)).unwrap(),
            json!({"double": 4.0})
        );
        assert_eq!(
            serde_json::to_value(ToolOutput::from(vec![1_i64, 2])).unwrap(),
            json!({"list": [{"integer": 1}, {"integer": 2}]})
        );
    }

    #[test]
    fn test_round_trip_all_cases() {
        let outputs = vec![
            ToolOutput::String("test result".to_string()),
            ToolOutput::Double(1.41421356),
            ToolOutput::Integer(-7),
            ToolOutput::Boolean(true),
            ToolOutput::Json(json!({"nested": {"values": [1, 2, 3]}})),
            ToolOutput::List(vec![ToolOutput::Double(0.0), ToolOutput::from("x")]),
        ];

        for output in outputs {
            let encoded = serde_json::to_string(&output).unwrap();
            let decoded: ToolOutput = serde_json::from_str(&encoded).unwrap();
            assert_eq!(decoded, output);
        }
    }

    #[test]
    fn test_rejects_missing_or_extra_tags() {
        assert!(serde_json::from_value::<ToolOutput>(json!({})).is_err());
        assert!(
            serde_json::from_value::<ToolOutput>(json!({"string": "a", "double": 1.0})).is_err()
        );
        assert!(serde_json::from_value::<ToolOutput>(json!({"unknown": 1})).is_err());
    }

    #[test]
    fn test_non_finite_doubles_are_not_representable() {
        assert!(ToolOutput::Double(1.5).is_representable());
        assert!(!ToolOutput::Double(f64::NAN).is_representable());
        assert!(!ToolOutput::Double(f64::INFINITY).is_representable());
        assert!(!ToolOutput::List(vec![
            ToolOutput::from("ok"),
            ToolOutput::List(vec![ToolOutput::Double(f64::NEG_INFINITY)]),
        ])
        .is_representable());
        assert!(ToolOutput::Json(json!({"a": 1})).is_representable());
    }

    #[test]
    fn test_accessors() {
        assert_eq!(ToolOutput::Double(3.0).as_f64(), Some(3.0));
        assert_eq!(ToolOutput::Integer(3).as_f64(), Some(3.0));
        assert_eq!(ToolOutput::from("a").as_f64(), None);
        assert_eq!(ToolOutput::from("a").as_str(), Some("a"));
        assert_eq!(ToolOutput::from(false).as_bool(), Some(false));
        assert_eq!(ToolOutput::Json(json!(null)).kind(), "json");
    }
}
