use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Whole days from `reference_now` to `date`.
///
/// Both sides are taken at midnight before subtracting, and any partial day
/// rounds up so a renewal that is not yet due is never reported as today.
/// Negative values mean the renewal date has passed.
pub fn days_until_renewal(date: NaiveDate, reference_now: NaiveDateTime) -> i64 {
    let renewal_midnight = date.and_time(NaiveTime::MIN);
    let reference_midnight = reference_now.date().and_time(NaiveTime::MIN);
    let millis = (renewal_midnight - reference_midnight).num_milliseconds();
    ceil_div(millis, MILLIS_PER_DAY)
}

/// True when the renewal falls between today and `within_days` from now,
/// both inclusive.
pub fn is_due_soon(date: NaiveDate, within_days: i64, reference_now: NaiveDateTime) -> bool {
    let days = days_until_renewal(date, reference_now);
    (0..=within_days).contains(&days)
}

pub fn renewal_status_label(date: NaiveDate, reference_now: NaiveDateTime) -> String {
    status_label_for_days(days_until_renewal(date, reference_now))
}

pub fn status_label_for_days(days: i64) -> String {
    match days {
        d if d < 0 => "Overdue".to_string(),
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        d => format!("In {d} days"),
    }
}

fn ceil_div(numerator: i64, denominator: i64) -> i64 {
    let quotient = numerator / denominator;
    if numerator % denominator > 0 {
        quotient + 1
    } else {
        quotient
    }
}
