use std::path::Path;

use chrono::{Local, NaiveDateTime, NaiveTime};

use crate::{ClientError, ClientResult};
use crate::contracts::types::{CategorySpendRow, TopCategory, UpcomingRow};
use crate::source::{LoadOptions, LoadedSubscriptions, load_subscriptions};
use crate::spending::aggregate::by_category;
use crate::spending::date::{format_iso_date, parse_iso_date_strict};
use crate::spending::forecast::UpcomingPayment;
use crate::spending::types::Subscription;

pub const DEFAULT_UPCOMING_DAYS: i64 = 30;
pub const MAX_UPCOMING_DAYS: i64 = 3650;
pub const DEFAULT_FORECAST_MONTHS: i64 = 12;
pub const MAX_FORECAST_MONTHS: i64 = 120;

/// Where to read subscriptions from and which day counts as today.
#[derive(Debug, Clone, Default)]
pub struct SourceOptions<'a> {
    pub file: Option<String>,
    pub as_of: Option<String>,
    pub home_override: Option<&'a Path>,
    pub stdin_override: Option<String>,
}

impl SourceOptions<'_> {
    pub fn new(file: Option<&str>, as_of: Option<&str>) -> Self {
        Self {
            file: file.map(std::string::ToString::to_string),
            as_of: as_of.map(std::string::ToString::to_string),
            home_override: None,
            stdin_override: None,
        }
    }
}

pub(crate) struct LoadedForCommand {
    pub(crate) loaded: LoadedSubscriptions,
    pub(crate) active: Vec<Subscription>,
    pub(crate) reference_now: NaiveDateTime,
}

/// Resolves the reference moment before touching the data file, so a bad
/// `--as-of` is reported even when the file is missing.
pub(crate) fn load_for_command(
    options: SourceOptions<'_>,
    command: &str,
) -> ClientResult<LoadedForCommand> {
    let reference_now = reference_now(options.as_of.as_deref(), command)?;
    let loaded = load_subscriptions(LoadOptions {
        file: options.file.as_deref(),
        home_override: options.home_override,
        stdin_override: options.stdin_override,
    })?;
    let active = loaded.active();
    Ok(LoadedForCommand {
        loaded,
        active,
        reference_now,
    })
}

pub(crate) fn reference_now(as_of: Option<&str>, command: &str) -> ClientResult<NaiveDateTime> {
    match as_of {
        Some(value) => {
            let date = parse_iso_date_strict(value, "--as-of", command)?;
            Ok(date.and_time(NaiveTime::MIN))
        }
        None => Ok(Local::now().naive_local()),
    }
}

pub(crate) fn validate_window(
    value: Option<i64>,
    default: i64,
    max: i64,
    flag: &str,
    command: &str,
) -> ClientResult<i64> {
    let Some(requested) = value else {
        return Ok(default);
    };
    if !(0..=max).contains(&requested) {
        return Err(ClientError::invalid_argument_for_command(
            &format!("`{flag}` must be between 0 and {max}; got {requested}."),
            Some(command),
        ));
    }
    Ok(requested)
}

pub(crate) fn category_rows(subscriptions: &[Subscription]) -> Vec<CategorySpendRow> {
    let breakdown = by_category(subscriptions);
    let total = breakdown.total();
    breakdown
        .buckets()
        .iter()
        .map(|bucket| CategorySpendRow {
            category: bucket.key.clone(),
            monthly_total: bucket.monthly_total,
            count: bucket.count as i64,
            share: if total > 0.0 {
                bucket.monthly_total / total
            } else {
                0.0
            },
        })
        .collect()
}

/// Category with the highest monthly spend; the earliest listed wins a tie.
pub(crate) fn top_category(rows: &[CategorySpendRow]) -> Option<TopCategory> {
    rows.iter()
        .fold(None::<&CategorySpendRow>, |best, row| match best {
            Some(current) if current.monthly_total >= row.monthly_total => Some(current),
            _ => Some(row),
        })
        .map(|row| TopCategory {
            category: row.category.clone(),
            monthly_total: row.monthly_total,
        })
}

pub(crate) fn upcoming_rows(payments: &[UpcomingPayment<'_>]) -> Vec<UpcomingRow> {
    payments
        .iter()
        .map(|payment| UpcomingRow {
            name: payment.subscription.name.clone(),
            cost: payment.subscription.cost,
            currency: payment.subscription.currency.clone(),
            billing_cycle: payment.subscription.billing_cycle.clone(),
            category: payment.subscription.category_label().to_string(),
            next_renewal: format_iso_date(&payment.renewal_date),
            days_until: payment.days_until,
            status_label: payment.status_label(),
        })
        .collect()
}

pub(crate) fn as_of_label(reference_now: &NaiveDateTime) -> String {
    format_iso_date(&reference_now.date())
}
