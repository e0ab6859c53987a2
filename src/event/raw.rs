use serde_json::Map;
use serde_json::Value;

use crate::ParseError;

/// One decoded JSON object read off the wire, paired with the verbatim source
/// line.
///
/// Re-serializing a decoded object is lossy (key order, number formatting,
/// unknown fields), so the raw text is kept alongside the parsed fields for
/// callers that need the exact upstream payload. A `RawEvent` lives for one
/// classify/decode pass only; the dispatched task owns the typed payload, not
/// this object.
#[derive(Debug, Clone)]
pub struct RawEvent {
    fields: Map<String, Value>,
    raw: String,
}

impl RawEvent {
    /// Parses one feed line. `line_no` is carried into the error for log
    /// context only.
    pub fn parse(
        line_no: u64,
        line: &str,
    ) -> std::result::Result<Self, ParseError> {
        let value: Value = serde_json::from_str(line).map_err(|source| ParseError::MalformedLine {
            line: line_no,
            source,
        })?;
        match value {
            Value::Object(fields) => Ok(RawEvent {
                fields,
                raw: line.to_owned(),
            }),
            _ => Err(ParseError::NotAnObject { line: line_no }),
        }
    }

    pub fn get(
        &self,
        key: &str,
    ) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn has(
        &self,
        key: &str,
    ) -> bool {
        self.fields.contains_key(key)
    }

    /// The verbatim source line this event was parsed from.
    pub fn raw_json(&self) -> &str {
        &self.raw
    }

    /// The whole object as a `serde_json::Value`, for decoding event kinds
    /// whose payload is the top-level object itself.
    pub(crate) fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}
