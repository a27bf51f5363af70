use std::path::Path;

use crate::ClientResult;
use crate::commands::common::{
    DEFAULT_UPCOMING_DAYS, MAX_UPCOMING_DAYS, SourceOptions, as_of_label, load_for_command,
    upcoming_rows, validate_window,
};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::UpcomingData;
use crate::spending::forecast::{total_due, upcoming_payments};

#[derive(Debug, Default)]
pub struct UpcomingRunOptions<'a> {
    pub file: Option<String>,
    pub as_of: Option<String>,
    pub days: Option<i64>,
    pub home_override: Option<&'a Path>,
    pub stdin_override: Option<String>,
}

pub fn run(
    file: Option<&str>,
    as_of: Option<&str>,
    days: Option<i64>,
) -> ClientResult<SuccessEnvelope> {
    run_with_options(UpcomingRunOptions {
        file: file.map(std::string::ToString::to_string),
        as_of: as_of.map(std::string::ToString::to_string),
        days,
        home_override: None,
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: UpcomingRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let within_days = validate_window(
        options.days,
        DEFAULT_UPCOMING_DAYS,
        MAX_UPCOMING_DAYS,
        "--days",
        "upcoming",
    )?;
    let context = load_for_command(
        SourceOptions {
            file: options.file,
            as_of: options.as_of,
            home_override: options.home_override,
            stdin_override: options.stdin_override,
        },
        "upcoming",
    )?;

    let payments = upcoming_payments(&context.active, within_days, context.reference_now)?;
    log::info!("upcoming: {} renewals within {within_days} days", payments.len());

    let data = UpcomingData {
        as_of: as_of_label(&context.reference_now),
        within_days,
        total_due: total_due(&payments),
        rows: upcoming_rows(&payments),
        source: context.loaded.source,
        warnings: context.loaded.warnings,
    };
    success("upcoming", data)
}
