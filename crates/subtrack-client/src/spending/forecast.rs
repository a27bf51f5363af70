use chrono::{NaiveDate, NaiveDateTime};

use crate::ClientResult;
use crate::spending::aggregate::total_monthly;
use crate::spending::date::{add_months_clamped, first_of_month, month_label};
use crate::spending::renewal::{days_until_renewal, is_due_soon, status_label_for_days};
use crate::spending::types::Subscription;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthProjection {
    pub month_start: NaiveDate,
    pub month_label: String,
    pub projected_amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingPayment<'a> {
    pub subscription: &'a Subscription,
    pub renewal_date: NaiveDate,
    pub days_until: i64,
}

impl UpcomingPayment<'_> {
    pub fn status_label(&self) -> String {
        status_label_for_days(self.days_until)
    }
}

/// Projects monthly spend over `month_count` months starting with the month
/// that contains `reference_now`.
///
/// Every month carries the same amount: the current subscription set is
/// assumed to stay unchanged for the whole horizon. Cancellations, new
/// subscriptions and renewal-date driven changes are not modelled.
///
/// The projection ends early if a month falls outside chrono's date range.
pub fn project_months(
    subscriptions: &[Subscription],
    month_count: usize,
    reference_now: NaiveDateTime,
) -> Vec<MonthProjection> {
    let monthly = total_monthly(subscriptions);
    let start = first_of_month(reference_now.date());

    (0..month_count)
        .map_while(|offset| {
            let month_start = add_months_clamped(start, i64::try_from(offset).ok()?)?;
            Some(MonthProjection {
                month_label: month_label(&month_start),
                month_start,
                projected_amount: monthly,
            })
        })
        .collect()
}

/// Subscriptions renewing between today and `within_days` from now, soonest
/// first. Equal day counts keep their input order.
///
/// Fails on the first renewal date that cannot be read.
pub fn upcoming_payments(
    subscriptions: &[Subscription],
    within_days: i64,
    reference_now: NaiveDateTime,
) -> ClientResult<Vec<UpcomingPayment<'_>>> {
    let mut upcoming = Vec::new();
    for subscription in subscriptions {
        let renewal_date = subscription.renewal_date()?;
        if is_due_soon(renewal_date, within_days, reference_now) {
            upcoming.push(UpcomingPayment {
                subscription,
                renewal_date,
                days_until: days_until_renewal(renewal_date, reference_now),
            });
        }
    }

    upcoming.sort_by_key(|payment| payment.days_until);
    Ok(upcoming)
}

/// Sum of the raw charge amounts in `payments`.
pub fn total_due(payments: &[UpcomingPayment<'_>]) -> f64 {
    payments
        .iter()
        .fold(0.0, |total, payment| total + payment.subscription.cost)
}
