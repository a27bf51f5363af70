use std::path::Path;

use crate::ClientResult;
use crate::commands::common::{
    DEFAULT_FORECAST_MONTHS, DEFAULT_UPCOMING_DAYS, MAX_FORECAST_MONTHS, SourceOptions,
    as_of_label, load_for_command, validate_window,
};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{ForecastData, ProjectionRow};
use crate::spending::date::format_iso_date;
use crate::spending::forecast::{project_months, total_due, upcoming_payments};

const STATIC_SET_ASSUMPTION: &str = "Every month repeats the current monthly spend; cancellations, new subscriptions and renewal timing are not modelled.";

#[derive(Debug, Default)]
pub struct ForecastRunOptions<'a> {
    pub file: Option<String>,
    pub as_of: Option<String>,
    pub months: Option<i64>,
    pub home_override: Option<&'a Path>,
    pub stdin_override: Option<String>,
}

pub fn run(
    file: Option<&str>,
    as_of: Option<&str>,
    months: Option<i64>,
) -> ClientResult<SuccessEnvelope> {
    run_with_options(ForecastRunOptions {
        file: file.map(std::string::ToString::to_string),
        as_of: as_of.map(std::string::ToString::to_string),
        months,
        home_override: None,
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: ForecastRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let months = validate_window(
        options.months,
        DEFAULT_FORECAST_MONTHS,
        MAX_FORECAST_MONTHS,
        "--months",
        "forecast",
    )?;
    let context = load_for_command(
        SourceOptions {
            file: options.file,
            as_of: options.as_of,
            home_override: options.home_override,
            stdin_override: options.stdin_override,
        },
        "forecast",
    )?;

    let projection = project_months(
        &context.active,
        usize::try_from(months).unwrap_or_default(),
        context.reference_now,
    );
    let horizon_total = projection
        .iter()
        .fold(0.0, |total, month| total + month.projected_amount);
    let average_per_month = if projection.is_empty() {
        0.0
    } else {
        horizon_total / projection.len() as f64
    };
    let upcoming = upcoming_payments(&context.active, DEFAULT_UPCOMING_DAYS, context.reference_now)?;
    log::info!("forecast: {months} months, {horizon_total:.2} total");

    let data = ForecastData {
        as_of: as_of_label(&context.reference_now),
        months,
        rows: projection
            .iter()
            .map(|month| ProjectionRow {
                month: month.month_label.clone(),
                month_start: format_iso_date(&month.month_start),
                projected_amount: month.projected_amount,
            })
            .collect(),
        horizon_total,
        average_per_month,
        upcoming_window_days: DEFAULT_UPCOMING_DAYS,
        upcoming_total: total_due(&upcoming),
        upcoming_count: upcoming.len() as i64,
        assumption: STATIC_SET_ASSUMPTION.to_string(),
        source: context.loaded.source,
        warnings: context.loaded.warnings,
    };
    success("forecast", data)
}
