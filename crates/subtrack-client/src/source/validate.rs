use std::collections::HashSet;

use crate::contracts::types::{LoadIssue, LoadSummary, LoadWarning};
use crate::source::parse::ParsedRow;
use crate::spending::cycle::BillingCycle;
use crate::spending::date::{format_iso_date, parse_renewal_date};
use crate::spending::types::{DEFAULT_CURRENCY, Subscription, SubscriptionStatus};
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub(crate) struct ValidatedSubscriptions {
    pub(crate) subscriptions: Vec<Subscription>,
    pub(crate) summary: LoadSummary,
    pub(crate) warnings: Vec<LoadWarning>,
}

pub(crate) fn validate_rows(parsed_rows: Vec<ParsedRow>) -> ClientResult<ValidatedSubscriptions> {
    let total_rows = parsed_rows.len();
    let mut subscriptions = Vec::new();
    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    for raw in parsed_rows {
        let mut row_issues = Vec::new();

        let id = validate_id(raw.row, raw.id, &mut row_issues);
        let name = validate_required_string(
            raw.row,
            "name",
            raw.name,
            &mut row_issues,
            "name must be present and non-empty.",
        );
        let cost = validate_cost(raw.row, raw.cost, &mut row_issues);
        let billing_cycle = validate_required_string(
            raw.row,
            "billing_cycle",
            raw.billing_cycle,
            &mut row_issues,
            "billing_cycle must be present and non-empty.",
        );
        let next_renewal = validate_next_renewal(raw.row, raw.next_renewal, &mut row_issues);
        let status = validate_status(raw.row, raw.status, &mut row_issues);
        let currency = normalize_optional(raw.currency)
            .map(|value| value.to_uppercase())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

        if !row_issues.is_empty() {
            issues.extend(row_issues);
            continue;
        }

        let billing_cycle = billing_cycle.unwrap_or_default();
        if BillingCycle::parse(&billing_cycle).is_none() {
            log::warn!(
                "row {}: unrecognized billing cycle `{}` counted as monthly",
                raw.row,
                billing_cycle
            );
            warnings.push(LoadWarning {
                code: "unrecognized_billing_cycle".to_string(),
                message: format!(
                    "billing_cycle `{billing_cycle}` is not weekly, monthly, quarterly or yearly; its cost is counted as monthly."
                ),
                row: Some(raw.row),
            });
        }

        subscriptions.push(Subscription {
            id,
            name: name.unwrap_or_default(),
            cost: cost.unwrap_or_default(),
            billing_cycle,
            category: normalize_optional(raw.category),
            next_renewal: next_renewal.unwrap_or_default(),
            vendor: normalize_optional(raw.vendor),
            currency,
            status: status.unwrap_or(SubscriptionStatus::Active),
        });
    }

    let active = subscriptions
        .iter()
        .filter(|subscription| subscription.is_active())
        .count();
    let summary = LoadSummary {
        rows_read: total_rows as i64,
        rows_valid: subscriptions.len() as i64,
        rows_invalid: issues
            .iter()
            .map(|issue| issue.row)
            .collect::<HashSet<i64>>()
            .len() as i64,
        active: active as i64,
        inactive: (subscriptions.len() - active) as i64,
    };

    if !issues.is_empty() {
        return Err(ClientError::subscriptions_validation_failed(summary, issues));
    }

    Ok(ValidatedSubscriptions {
        subscriptions,
        summary,
        warnings,
    })
}

fn validate_required_string(
    row: i64,
    field: &str,
    value: Option<String>,
    issues: &mut Vec<LoadIssue>,
    description: &str,
) -> Option<String> {
    let normalized = normalize_optional(value);
    if normalized.is_none() {
        issues.push(missing_field(row, field, description, "non-empty string"));
    }
    normalized
}

fn validate_id(row: i64, value: Option<String>, issues: &mut Vec<LoadIssue>) -> Option<i64> {
    let candidate = normalize_optional(value)?;
    match candidate.parse::<i64>() {
        Ok(id) => Some(id),
        Err(_) => {
            issues.push(LoadIssue {
                row,
                field: "id".to_string(),
                code: "invalid_id".to_string(),
                description: format!("id must be an integer; got \"{candidate}\""),
                expected: Some("integer".to_string()),
                received: Some(candidate),
            });
            None
        }
    }
}

fn validate_cost(row: i64, value: Option<String>, issues: &mut Vec<LoadIssue>) -> Option<f64> {
    let normalized = normalize_optional(value);
    let Some(candidate) = normalized else {
        issues.push(missing_field(
            row,
            "cost",
            "cost must be present and non-empty.",
            "non-negative number (e.g. 15.99)",
        ));
        return None;
    };

    let parsed = candidate.parse::<f64>().ok().filter(|cost| cost.is_finite());
    let Some(cost) = parsed else {
        issues.push(LoadIssue {
            row,
            field: "cost".to_string(),
            code: "invalid_number".to_string(),
            description: format!("cost must be numeric; got \"{candidate}\""),
            expected: Some("non-negative number (e.g. 15.99)".to_string()),
            received: Some(candidate),
        });
        return None;
    };

    if cost < 0.0 {
        issues.push(LoadIssue {
            row,
            field: "cost".to_string(),
            code: "negative_cost".to_string(),
            description: format!("cost must not be negative; got {candidate}"),
            expected: Some("non-negative number (e.g. 15.99)".to_string()),
            received: Some(candidate),
        });
        return None;
    }

    Some(cost)
}

fn validate_next_renewal(
    row: i64,
    value: Option<String>,
    issues: &mut Vec<LoadIssue>,
) -> Option<String> {
    let normalized = normalize_optional(value);
    let Some(candidate) = normalized else {
        issues.push(missing_field(
            row,
            "next_renewal",
            "next_renewal must be present and non-empty.",
            "YYYY-MM-DD",
        ));
        return None;
    };

    match parse_renewal_date(&candidate) {
        Ok(date) => Some(format_iso_date(&date)),
        Err(_) => {
            issues.push(LoadIssue {
                row,
                field: "next_renewal".to_string(),
                code: "invalid_date".to_string(),
                description: format!("next_renewal must be a YYYY-MM-DD date; got \"{candidate}\""),
                expected: Some("YYYY-MM-DD".to_string()),
                received: Some(candidate),
            });
            None
        }
    }
}

fn validate_status(
    row: i64,
    value: Option<String>,
    issues: &mut Vec<LoadIssue>,
) -> Option<SubscriptionStatus> {
    let candidate = normalize_optional(value)?.to_lowercase();
    let status = SubscriptionStatus::parse(&candidate);
    if status.is_none() {
        issues.push(LoadIssue {
            row,
            field: "status".to_string(),
            code: "invalid_status".to_string(),
            description: format!("status must be active, cancelled or paused; got \"{candidate}\""),
            expected: Some("active|cancelled|paused".to_string()),
            received: Some(candidate),
        });
    }
    status
}

fn missing_field(row: i64, field: &str, description: &str, expected: &str) -> LoadIssue {
    LoadIssue {
        row,
        field: field.to_string(),
        code: "missing_required_field".to_string(),
        description: description.to_string(),
        expected: Some(expected.to_string()),
        received: Some(String::new()),
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    let raw = value?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}
