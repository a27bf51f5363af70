pub(crate) mod input;
pub(crate) mod parse;
pub(crate) mod validate;

use std::path::Path;

use crate::contracts::types::{LoadSummary, LoadWarning, SourceHint};
use crate::spending::types::Subscription;
use crate::state::resolve_data_location;
use crate::{ClientError, ClientResult};

pub(crate) const RENEWAL_FIELD: &str = "next_renewal";
pub(crate) const RENEWAL_FIELD_ALIAS: &str = "next_renewal_date";

const REQUIRED_FIELDS: [&str; 4] = ["name", "cost", "billing_cycle", RENEWAL_FIELD];

const OPTIONAL_FIELDS: [&str; 6] = [
    "id",
    "category",
    "vendor",
    "currency",
    "status",
    RENEWAL_FIELD_ALIAS,
];

pub(crate) fn required_field_names() -> Vec<&'static str> {
    REQUIRED_FIELDS.to_vec()
}

pub(crate) fn optional_field_names() -> Vec<&'static str> {
    OPTIONAL_FIELDS.to_vec()
}

#[derive(Debug, Clone, Default)]
pub struct LoadOptions<'a> {
    pub file: Option<&'a str>,
    pub home_override: Option<&'a Path>,
    pub stdin_override: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LoadedSubscriptions {
    pub subscriptions: Vec<Subscription>,
    pub summary: LoadSummary,
    pub warnings: Vec<LoadWarning>,
    pub source: SourceHint,
}

impl LoadedSubscriptions {
    pub fn active(&self) -> Vec<Subscription> {
        active_only(&self.subscriptions)
    }
}

pub fn load_subscriptions(options: LoadOptions<'_>) -> ClientResult<LoadedSubscriptions> {
    let location = resolve_data_location(options.file, options.home_override)?;
    let resolved = input::resolve_source(&location, options.stdin_override)?;
    let parsed_rows = parse::parse_source(&resolved.content)?;
    let validated = validate::validate_rows(parsed_rows)?;

    log::debug!(
        "loaded {} subscriptions ({} active)",
        validated.summary.rows_valid,
        validated.summary.active
    );

    Ok(LoadedSubscriptions {
        subscriptions: validated.subscriptions,
        summary: validated.summary,
        warnings: validated.warnings,
        source: resolved.hint,
    })
}

/// Only active subscriptions take part in spending figures.
pub fn active_only(subscriptions: &[Subscription]) -> Vec<Subscription> {
    subscriptions
        .iter()
        .filter(|subscription| subscription.is_active())
        .cloned()
        .collect()
}

pub(crate) fn invalid_input_error(message: &str) -> ClientError {
    ClientError::invalid_argument_with_recovery(
        message,
        vec![
            "Provide a JSON array or CSV file with the subscription fields.".to_string(),
            "Run `subtrack validate --help` to review required and optional fields.".to_string(),
        ],
    )
    .with_source_help()
}
