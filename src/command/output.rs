//! Result rendering
//!
//! Turns a [`CallResult`] into the text printed on success. Delete-like
//! operations produce no output at all.

use serde_json::Value;

use super::registry::CallResult;

/// Render a call result for printing; `None` means print nothing.
pub fn render(result: &CallResult) -> Option<String> {
    match result {
        CallResult::NoContent => None,
        CallResult::Item(value) => Some(pretty(value)),
        CallResult::List(values) => Some(pretty(&Value::Array(values.clone()))),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
