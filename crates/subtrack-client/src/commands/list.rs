use std::path::Path;

use crate::commands::common::{SourceOptions, as_of_label, load_for_command};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{ListData, ListRow};
use crate::spending::date::format_iso_date;
use crate::spending::listing::{ListFilter, ListSort, ListedSubscription, list_subscriptions};
use crate::{ClientError, ClientResult};

#[derive(Debug, Default)]
pub struct ListRunOptions<'a> {
    pub file: Option<String>,
    pub as_of: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
    pub include_inactive: bool,
    pub home_override: Option<&'a Path>,
    pub stdin_override: Option<String>,
}

pub fn run(
    file: Option<&str>,
    as_of: Option<&str>,
    search: Option<&str>,
    category: Option<&str>,
    sort: Option<&str>,
    include_inactive: bool,
) -> ClientResult<SuccessEnvelope> {
    run_with_options(ListRunOptions {
        file: file.map(std::string::ToString::to_string),
        as_of: as_of.map(std::string::ToString::to_string),
        search: search.map(std::string::ToString::to_string),
        category: category.map(std::string::ToString::to_string),
        sort: sort.map(std::string::ToString::to_string),
        include_inactive,
        home_override: None,
        stdin_override: None,
    })
}

/// Subscriptions matching the search and category filters, with monthly and
/// yearly cost and renewal timing per row. `monthly_total` only counts
/// active rows even when inactive ones are listed.
#[doc(hidden)]
pub fn run_with_options(options: ListRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let sort = parse_sort(options.sort.as_deref())?;
    let filter = ListFilter {
        search: non_blank(options.search),
        category: non_blank(options.category),
    };
    let context = load_for_command(
        SourceOptions {
            file: options.file,
            as_of: options.as_of,
            home_override: options.home_override,
            stdin_override: options.stdin_override,
        },
        "list",
    )?;

    let candidates = if options.include_inactive {
        &context.loaded.subscriptions
    } else {
        &context.active
    };
    let listed = list_subscriptions(candidates, &filter, sort, context.reference_now)?;
    let monthly_total = listed
        .iter()
        .filter(|row| row.subscription.is_active())
        .fold(0.0, |total, row| total + row.monthly_cost);
    log::info!("list: {} of {} subscriptions", listed.len(), candidates.len());

    let data = ListData {
        as_of: as_of_label(&context.reference_now),
        sort: sort.as_str().to_string(),
        matching: listed.len() as i64,
        monthly_total,
        rows: listed.iter().map(list_row).collect(),
        search: filter.search,
        category: filter.category,
        include_inactive: options.include_inactive,
        source: context.loaded.source,
        warnings: context.loaded.warnings,
    };
    success("list", data)
}

fn parse_sort(value: Option<&str>) -> ClientResult<ListSort> {
    let Some(raw) = value else {
        return Ok(ListSort::default());
    };
    ListSort::parse(raw.trim()).ok_or_else(|| {
        ClientError::invalid_argument_for_command(
            &format!("`--sort` must be one of name, cost or renewal; got `{raw}`."),
            Some("list"),
        )
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn list_row(listed: &ListedSubscription<'_>) -> ListRow {
    let subscription = listed.subscription;
    ListRow {
        name: subscription.name.clone(),
        cost: subscription.cost,
        currency: subscription.currency.clone(),
        billing_cycle: subscription.billing_cycle.clone(),
        category: subscription.category_label().to_string(),
        status: subscription.status.as_str().to_string(),
        monthly_cost: listed.monthly_cost,
        yearly_cost: listed.yearly_cost,
        next_renewal: format_iso_date(&listed.renewal_date),
        days_until: listed.days_until,
        status_label: listed.status_label.clone(),
    }
}
