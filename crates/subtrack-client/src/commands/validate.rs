use std::path::Path;

use crate::ClientResult;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ValidateData;
use crate::source::{LoadOptions, load_subscriptions};

#[derive(Debug, Default)]
pub struct ValidateRunOptions<'a> {
    pub path: Option<String>,
    pub home_override: Option<&'a Path>,
    pub stdin_override: Option<String>,
}

pub fn run(path: Option<&str>) -> ClientResult<SuccessEnvelope> {
    run_with_options(ValidateRunOptions {
        path: path.map(std::string::ToString::to_string),
        home_override: None,
        stdin_override: None,
    })
}

/// Loads and checks the subscriptions file without computing anything.
///
/// Validation failures come back as `subscriptions_validation_failed`
/// errors with every offending row listed.
#[doc(hidden)]
pub fn run_with_options(options: ValidateRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let loaded = load_subscriptions(LoadOptions {
        file: options.path.as_deref(),
        home_override: options.home_override,
        stdin_override: options.stdin_override,
    })?;

    let summary = loaded.summary;
    let message = format!(
        "Subscriptions are valid: {} rows read, {} active, {} inactive.",
        summary.rows_read, summary.active, summary.inactive
    );
    log::info!("validate: {message}");

    let data = ValidateData {
        message,
        summary,
        source: loaded.source,
        warnings: loaded.warnings,
    };
    success("validate", data)
}
