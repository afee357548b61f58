//! Wire format for the stdio tool server.
//!
//! Requests are single-line JSON-RPC 2.0 `tools/call` messages. Responses are
//! accepted in two shapes: a bare array of record objects, or an envelope
//! whose `result.content[].text` items carry either JSON record data or plain
//! text notes. Decoding is lenient per item and strict only about the
//! top-level payload being JSON.

use crate::error::RetrieveError;
use crate::record::ExternalRecord;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

pub const JSONRPC_VERSION: &str = "2.0";
pub const TOOLS_CALL: &str = "tools/call";
pub const REQUEST_ID: u64 = 1;

pub const TOOL_LIST: &str = "list_monkeys";
pub const TOOL_GET: &str = "get_monkey";
pub const TOOL_JOURNEY: &str = "get_monkey_journey";

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ToolCallRequest {
    pub jsonrpc: String,
    pub id: u64,
    pub method: String,
    pub params: ToolCallParams,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ToolCallParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

impl ToolCallRequest {
    pub fn new(tool: &str, arguments: Map<String, Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: REQUEST_ID,
            method: TOOLS_CALL.to_string(),
            params: ToolCallParams {
                name: tool.to_string(),
                arguments,
            },
        }
    }

    /// A request whose only argument is `name`.
    pub fn named(tool: &str, name: &str) -> Self {
        let mut arguments = Map::new();
        arguments.insert("name".to_string(), Value::String(name.to_string()));
        Self::new(tool, arguments)
    }

    /// Serialize as one newline-terminated line.
    pub fn to_line(&self) -> Result<String, RetrieveError> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

/// What a single `text` content item turned out to hold.
#[derive(Debug, PartialEq)]
pub enum ContentText {
    /// JSON record data: one object, or an array of objects.
    Records(Vec<Value>),
    /// Free-form output that is not record data.
    Plain(String),
}

impl ContentText {
    pub fn classify(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(object)) => ContentText::Records(vec![Value::Object(object)]),
            Ok(Value::Array(items)) => ContentText::Records(items),
            _ => ContentText::Plain(text.to_string()),
        }
    }
}

/// Decoded response: surviving records plus any plain-text notes.
#[derive(Debug, Default, PartialEq)]
pub struct ToolResponse {
    pub records: Vec<ExternalRecord>,
    pub notes: Vec<String>,
    /// Items dropped because they were malformed or unnamed.
    pub skipped: usize,
}

impl ToolResponse {
    fn push_candidate(&mut self, candidate: Value) {
        match serde_json::from_value::<ExternalRecord>(candidate) {
            Ok(record) if record.usable_name().is_some() => self.records.push(record),
            Ok(_) => {
                debug!("dropping record without a usable Name");
                self.skipped += 1;
            }
            Err(err) => {
                debug!(error = %err, "dropping malformed record");
                self.skipped += 1;
            }
        }
    }
}

/// Decode raw server stdout.
///
/// Only a payload that is not JSON at all (or is JSON of an unusable kind) is
/// an error; everything below the top level degrades item by item.
pub fn decode_response(raw: &str) -> Result<ToolResponse, RetrieveError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(ToolResponse::default());
    }

    let mut response = ToolResponse::default();
    match serde_json::from_str::<Value>(trimmed)? {
        Value::Array(items) => {
            for item in items {
                response.push_candidate(item);
            }
        }
        Value::Object(envelope) => decode_envelope(envelope, &mut response)?,
        other => {
            return Err(RetrieveError::Parse(serde::de::Error::custom(format!(
                "expected a JSON array or object, got {}",
                kind_of(&other)
            ))));
        }
    }
    Ok(response)
}

/// Walk an envelope object. `error` and `result` are read independently, so
/// a malformed one never hides the other.
fn decode_envelope(
    mut envelope: Map<String, Value>,
    response: &mut ToolResponse,
) -> Result<(), RetrieveError> {
    match envelope.remove("error") {
        None | Some(Value::Null) => {}
        Some(error) => return Err(server_error(error)),
    }

    let content = match envelope.remove("result") {
        Some(Value::Object(mut result)) => match result.remove("content") {
            Some(Value::Array(content)) => content,
            Some(other) => {
                debug!(found = kind_of(&other), "result.content is not an array; treating as empty");
                return Ok(());
            }
            None => return Ok(()),
        },
        None | Some(Value::Null) => return Ok(()),
        Some(other) => {
            debug!(found = kind_of(&other), "result is not an object; treating as empty");
            return Ok(());
        }
    };

    for item in content {
        let Some(text) = item.get("text").and_then(Value::as_str) else {
            continue;
        };
        if text.trim().is_empty() {
            continue;
        }
        match ContentText::classify(text) {
            ContentText::Records(candidates) => {
                for candidate in candidates {
                    response.push_candidate(candidate);
                }
            }
            ContentText::Plain(note) => response.notes.push(note),
        }
    }
    Ok(())
}

/// Any non-null `error` is a failure, whatever its shape.
fn server_error(error: Value) -> RetrieveError {
    match error {
        Value::Object(fields) => RetrieveError::Server {
            code: fields.get("code").and_then(Value::as_i64).unwrap_or_default(),
            message: match fields.get("message") {
                Some(Value::String(message)) => message.clone(),
                _ => Value::Object(fields.clone()).to_string(),
            },
        },
        Value::String(message) => RetrieveError::Server { code: 0, message },
        other => RetrieveError::Server {
            code: 0,
            message: other.to_string(),
        },
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use serde_json::json;

    fn names(response: &ToolResponse) -> Vec<&str> {
        response
            .records
            .iter()
            .filter_map(ExternalRecord::usable_name)
            .collect()
    }

    #[test]
    fn request_line_matches_wire_shape() {
        let line = ToolCallRequest::named(TOOL_GET, "Mandrill")
            .to_line()
            .unwrap();
        assert!(line.ends_with('\n'));
        assert_eq!(line.matches('\n').count(), 1);
        let value: Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(
            value,
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "tools/call",
                "params": {"name": "get_monkey", "arguments": {"name": "Mandrill"}}
            })
        );
    }

    #[test]
    fn list_request_sends_empty_arguments() {
        let value = serde_json::to_value(ToolCallRequest::new(TOOL_LIST, Map::new())).unwrap();
        assert_eq!(value.pointer("/params/arguments"), Some(&json!({})));
    }

    #[test]
    fn bare_array_yields_each_record() {
        let raw = json!([
            {"Name": "Baboon", "Location": "Africa & Asia", "Details": "Big.", "Population": 10000, "Image": "b.jpg"},
            {"Name": "Henry", "Location": "Phoenix", "Details": "Travels.", "Population": 1, "Image": "h.jpg"}
        ])
        .to_string();
        let response = decode_response(&raw).unwrap();
        assert_eq!(names(&response), vec!["Baboon", "Henry"]);
        assert_eq!(response.records[0].population, Some(10000));
        assert_eq!(response.records[1].location.as_deref(), Some("Phoenix"));
        assert_eq!(response.skipped, 0);
    }

    #[test]
    fn envelope_text_records_are_decoded() {
        let raw = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {"content": [
                {"type": "text", "text": json!({"Name": "Mandrill", "Population": 17000}).to_string()},
                {"type": "text", "text": json!([{"Name": "Mooch"}, {"Name": "Sebastian"}]).to_string()}
            ]}
        })
        .to_string();
        let response = decode_response(&raw).unwrap();
        assert_eq!(names(&response), vec!["Mandrill", "Mooch", "Sebastian"]);
        assert!(response.notes.is_empty());
    }

    #[test]
    fn plain_text_content_is_a_note_not_a_record() {
        let raw = json!({"result": {"content": [{"text": "Monkey not found"}]}}).to_string();
        let response = decode_response(&raw).unwrap();
        assert!(response.records.is_empty());
        assert_eq!(response.notes, vec!["Monkey not found".to_string()]);
    }

    #[test]
    fn unnamed_and_malformed_items_are_skipped() {
        let raw = json!([
            {"Name": "Baboon"},
            {"Location": "Nowhere", "Population": 3},
            {"Name": "Capuchin Monkey", "Population": "lots"},
            {"Name": "Howler Monkey", "Population": 8000}
        ])
        .to_string();
        let response = decode_response(&raw).unwrap();
        assert_eq!(names(&response), vec!["Baboon", "Howler Monkey"]);
        assert_eq!(response.skipped, 2);
    }

    #[test]
    fn missing_envelope_fields_mean_no_records() {
        for raw in [r#"{}"#, r#"{"result": {}}"#, r#"{"result": {"content": [{"type": "image"}]}}"#] {
            let response = decode_response(raw).unwrap();
            assert!(response.records.is_empty(), "payload {raw}");
        }
        assert!(decode_response("   ").unwrap().records.is_empty());
    }

    #[test]
    fn syntax_errors_are_parse_failures() {
        let err = decode_response("{\"result\": [").unwrap_err();
        assert_eq!(err.kind(), FailureKind::ParseFailure);
        let err = decode_response("42").unwrap_err();
        assert_eq!(err.kind(), FailureKind::ParseFailure);
    }

    #[test]
    fn error_envelope_is_reported() {
        let raw = json!({"error": {"code": -32601, "message": "Unknown tool"}}).to_string();
        match decode_response(&raw) {
            Err(RetrieveError::Server { code, message }) => {
                assert_eq!(code, -32601);
                assert_eq!(message, "Unknown tool");
            }
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[test]
    fn error_string_is_reported() {
        match decode_response(r#"{"error": "Unknown tool", "result": null}"#) {
            Err(RetrieveError::Server { code, message }) => {
                assert_eq!(code, 0);
                assert_eq!(message, "Unknown tool");
            }
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[test]
    fn mistyped_error_code_is_still_an_error() {
        let raw = json!({
            "error": {"code": "E_TOOL", "message": "tool crashed"},
            "result": {"content": [{"text": json!({"Name": "Baboon"}).to_string()}]}
        })
        .to_string();
        let err = decode_response(&raw).unwrap_err();
        assert_eq!(err.kind(), FailureKind::ProcessFailure);
        assert_eq!(err.to_string(), "server returned error: code=0, message=tool crashed");
    }

    #[test]
    fn null_error_keeps_result() {
        let raw = json!({
            "error": null,
            "result": {"content": [{"text": json!({"Name": "Baboon"}).to_string()}]}
        })
        .to_string();
        assert_eq!(names(&decode_response(&raw).unwrap()), vec!["Baboon"]);
    }

    #[test]
    fn mistyped_result_means_no_records() {
        for raw in [r#"{"result": "ok"}"#, r#"{"result": {"content": "text"}}"#] {
            let response = decode_response(raw).unwrap();
            assert_eq!(response, ToolResponse::default(), "payload {raw}");
        }
    }

    #[test]
    fn scalar_json_text_counts_as_plain() {
        assert_eq!(
            ContentText::classify("\"quoted\""),
            ContentText::Plain("\"quoted\"".to_string())
        );
        assert_eq!(
            ContentText::classify("hello monkeys"),
            ContentText::Plain("hello monkeys".to_string())
        );
    }
}
