use crate::ClientResult;
use crate::commands::common::{SourceOptions, as_of_label, load_for_command};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::SummaryData;
use crate::spending::aggregate::{average_monthly, total_monthly, total_yearly};
use crate::spending::types::Subscription;

pub fn run(file: Option<&str>, as_of: Option<&str>) -> ClientResult<SuccessEnvelope> {
    run_with_options(SourceOptions::new(file, as_of))
}

#[doc(hidden)]
pub fn run_with_options(options: SourceOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let context = load_for_command(options, "summary")?;
    let active = &context.active;

    let data = SummaryData {
        as_of: as_of_label(&context.reference_now),
        active_subscriptions: active.len() as i64,
        total_monthly: total_monthly(active),
        total_yearly: total_yearly(active),
        average_monthly: average_monthly(active),
        currencies: distinct_currencies(active),
        source: context.loaded.source,
        warnings: context.loaded.warnings,
    };
    log::info!(
        "summary: {} active subscriptions, {:.2} per month",
        data.active_subscriptions,
        data.total_monthly
    );

    success("summary", data)
}

fn distinct_currencies(subscriptions: &[Subscription]) -> Vec<String> {
    let mut currencies = Vec::<String>::new();
    for subscription in subscriptions {
        if !currencies.contains(&subscription.currency) {
            currencies.push(subscription.currency.clone());
        }
    }
    currencies
}
