use serde_json::Value;
use subtrack_client::ClientError;

pub fn render_error(error: &ClientError) -> String {
    let mut lines = vec![
        "Something went wrong, but it's easy to fix.".to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
    ];

    let issues = error
        .data
        .as_ref()
        .and_then(|data| data.get("issues"))
        .and_then(Value::as_array);
    if let Some(issues) = issues
        && !issues.is_empty()
    {
        lines.push(String::new());
        lines.push("Rows to fix:".to_string());
        for issue in issues {
            lines.push(format!(
                "  Row {}  {}: {}",
                issue.get("row").and_then(Value::as_i64).unwrap_or(0),
                issue.get("field").and_then(Value::as_str).unwrap_or("unknown"),
                issue
                    .get("description")
                    .and_then(Value::as_str)
                    .unwrap_or("invalid value"),
            ));
        }
    }

    lines.push(String::new());
    lines.push("What to do next:".to_string());
    if error.recovery_steps.is_empty() {
        lines.push("  1. Retry the command.".to_string());
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    lines.join("\n")
}
