use crate::ClientResult;
use crate::commands::common::{SourceOptions, load_for_command};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{CycleSpendRow, CyclesData};
use crate::spending::aggregate::by_billing_cycle;
use crate::spending::cycle::BillingCycle;

pub fn run(file: Option<&str>, as_of: Option<&str>) -> ClientResult<SuccessEnvelope> {
    run_with_options(SourceOptions::new(file, as_of))
}

#[doc(hidden)]
pub fn run_with_options(options: SourceOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let context = load_for_command(options, "cycles")?;
    let breakdown = by_billing_cycle(&context.active);

    let rows = breakdown
        .buckets()
        .iter()
        .map(|bucket| CycleSpendRow {
            billing_cycle: bucket.key.clone(),
            recognized: BillingCycle::parse(&bucket.key).is_some(),
            monthly_total: bucket.monthly_total,
            count: bucket.count as i64,
        })
        .collect::<Vec<CycleSpendRow>>();
    log::info!("cycles: {} groups", rows.len());

    let data = CyclesData {
        total_monthly: breakdown.total(),
        rows,
        source: context.loaded.source,
        warnings: context.loaded.warnings,
    };
    success("cycles", data)
}
