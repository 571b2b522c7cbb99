//! Built-in module template

use serde_json::Value;

use crate::types::DataMap;

/// Closing tag, including the trailing newline
pub const CLOSE: &str = "</div>\n";

/// Opening tag followed by the module name and its primary data value
pub fn open(name: &str, data: &DataMap) -> String {
    format!("<div>{} {}", name, primary_value(data))
}

/// The first data value in insertion order, as text
///
/// Strings are written as-is, `null` and empty data as nothing, everything else
/// as compact JSON.
pub fn primary_value(data: &DataMap) -> String {
    match data.values().next() {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
