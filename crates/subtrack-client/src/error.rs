use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

use crate::contracts::types::{LoadIssue, LoadSummary};

pub(crate) const SOURCE_HELP_COMMAND: &str = "subtrack validate --help";
pub(crate) const SOURCE_HELP_SECTION_TITLE: &str = "Subscription File Troubleshooting";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_source_help(self) -> Self {
        self.with_source_help_data(json!({}))
    }

    pub fn with_source_help_data(self, data: Value) -> Self {
        self.with_data(merge_source_help_data(data))
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `subtrack {cmd} --help` for usage."),
            None => "Run `subtrack --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    /// A renewal date that could not be read as a calendar date.
    ///
    /// Raised instead of guessing a day count, so an unreadable date never
    /// shows up as "Today" or "0 days".
    pub fn invalid_renewal_date(value: &str) -> Self {
        Self::new(
            "invalid_renewal_date",
            &format!("Renewal date `{value}` is not a valid YYYY-MM-DD calendar date."),
            vec![
                "Fix `next_renewal` in your subscriptions file.".to_string(),
                "Run `subtrack validate` to list every row that needs fixes.".to_string(),
            ],
        )
        .with_data(json!({
            "received": value,
            "expected": "YYYY-MM-DD",
        }))
    }

    pub fn invalid_subscriptions_format(message: &str, received_format: &str) -> Self {
        Self::invalid_argument_with_recovery(
            message,
            vec![
                "Provide a supported subscriptions format (JSON array or CSV).".to_string(),
                "Run `subtrack validate --help` to confirm field requirements.".to_string(),
            ],
        )
        .with_source_help_data(json!({
            "received_format": received_format,
            "supported_formats": ["json_array", "csv"],
        }))
    }

    pub fn subscriptions_schema_mismatch(
        required_headers: Vec<String>,
        optional_headers: Vec<String>,
        actual_headers: Vec<String>,
    ) -> Self {
        let mut expected_headers = required_headers.clone();
        expected_headers.extend(optional_headers.clone());

        Self::new(
            "subscriptions_schema_mismatch",
            "CSV headers do not satisfy the subscriptions schema.",
            vec![
                "Include all required headers; optional headers may be omitted.".to_string(),
                "Do not include unknown headers.".to_string(),
                "Run `subtrack validate --help` to review required and optional fields."
                    .to_string(),
            ],
        )
        .with_source_help_data(json!({
            "required_headers": required_headers,
            "optional_headers": optional_headers,
            "expected_headers": expected_headers,
            "actual_headers": actual_headers,
        }))
    }

    pub fn subscriptions_validation_failed(summary: LoadSummary, issues: Vec<LoadIssue>) -> Self {
        let issue_count = summary.rows_invalid;
        Self::new(
            "subscriptions_validation_failed",
            &format!("Subscriptions failed validation: {issue_count} rows need fixes."),
            vec![
                "Fix the listed issues in your subscriptions file.".to_string(),
                "Rerun subtrack validate <path>.".to_string(),
            ],
        )
        .with_source_help_data(json!({
            "summary": summary,
            "issues": issues,
        }))
    }

    pub fn subscriptions_not_found(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "subscriptions_not_found",
            &format!("No subscriptions file found at `{location}`."),
            vec![
                format!("Create `{location}` with a JSON array of subscriptions."),
                "Or pass `--file <path>` (use `-` for stdin).".to_string(),
                "Or set `SUBTRACK_FILE` to the file you keep your subscriptions in.".to_string(),
            ],
        )
        .with_data(json!({
            "path": location,
        }))
    }

    pub fn subscriptions_read_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "subscriptions_read_failed",
            &format!("Could not read subscriptions file `{location}`: {detail}"),
            vec![format!("Verify `{location}` exists and is readable.")],
        )
    }

    pub fn home_unresolved(detail: &str) -> Self {
        Self::new(
            "home_unresolved",
            &format!("Could not resolve the subtrack home directory: {detail}"),
            vec!["Set `SUBTRACK_HOME` to a readable directory.".to_string()],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

fn merge_source_help_data(mut data: Value) -> Value {
    if !data.is_object() {
        data = json!({});
    }

    if let Some(object) = data.as_object_mut() {
        object.insert(
            "help_command".to_string(),
            Value::String(SOURCE_HELP_COMMAND.to_string()),
        );
        object.insert(
            "help_section_title".to_string(),
            Value::String(SOURCE_HELP_SECTION_TITLE.to_string()),
        );
    }

    data
}

pub type ClientResult<T> = Result<T, ClientError>;
