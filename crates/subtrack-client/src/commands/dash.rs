use crate::ClientResult;
use crate::commands::common::{
    DEFAULT_UPCOMING_DAYS, SourceOptions, as_of_label, category_rows, load_for_command,
    top_category, upcoming_rows,
};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::DashData;
use crate::spending::aggregate::total_monthly;
use crate::spending::forecast::upcoming_payments;

pub fn run(file: Option<&str>, as_of: Option<&str>) -> ClientResult<SuccessEnvelope> {
    run_with_options(SourceOptions::new(file, as_of))
}

/// Dashboard view: monthly spend, active count, top category, renewals due
/// within the next 30 days and spend by category.
#[doc(hidden)]
pub fn run_with_options(options: SourceOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let context = load_for_command(options, "dash")?;
    let active = &context.active;
    let payments = upcoming_payments(active, DEFAULT_UPCOMING_DAYS, context.reference_now)?;
    let spend_by_category = category_rows(active);

    let data = DashData {
        as_of: as_of_label(&context.reference_now),
        total_monthly_spend: total_monthly(active),
        active_subscriptions: active.len() as i64,
        top_category: top_category(&spend_by_category),
        upcoming_window_days: DEFAULT_UPCOMING_DAYS,
        upcoming_renewals: upcoming_rows(&payments),
        spend_by_category,
        source: context.loaded.source,
        warnings: context.loaded.warnings,
    };
    log::info!(
        "dash: {} active, {} renewals due",
        data.active_subscriptions,
        data.upcoming_renewals.len()
    );

    success("dash", data)
}
