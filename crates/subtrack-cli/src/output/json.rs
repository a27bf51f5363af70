use std::io;

use serde::Serialize;
use serde_json::{Value, json};
use subtrack_client::{ClientError, SuccessEnvelope};

const JSON_VERSION: &str = "v1";

const JSON_COMMANDS: [&str; 8] = [
    "summary",
    "categories",
    "cycles",
    "list",
    "upcoming",
    "forecast",
    "dash",
    "validate",
];

pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    if !JSON_COMMANDS.contains(&success.command.as_str()) {
        return Err(io::Error::other(format!(
            "JSON output is not supported for command `{}`",
            success.command
        )));
    }

    serialize_json_pretty(&json!({
        "ok": true,
        "version": JSON_VERSION,
        "data": success.data.clone(),
    }))
}

/// Error payloads carry the structured `data` (row issues, paths) when the
/// error has any.
pub fn render_error_json(error: &ClientError) -> io::Result<String> {
    let mut body = json!({
        "code": error.code,
        "message": error.message,
        "recovery_steps": error.recovery_steps,
    });
    if let (Some(data), Some(object)) = (&error.data, body.as_object_mut()) {
        object.insert("data".to_string(), data.clone());
    }

    serialize_json_pretty(&json!({ "error": body }))
}

fn serialize_json_pretty<T>(value: &T) -> io::Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}
