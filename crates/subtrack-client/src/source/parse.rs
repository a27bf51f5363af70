use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::source::{
    RENEWAL_FIELD, RENEWAL_FIELD_ALIAS, invalid_input_error, optional_field_names,
    required_field_names,
};
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Default)]
pub(crate) struct ParsedRow {
    pub(crate) row: i64,
    pub(crate) id: Option<String>,
    pub(crate) name: Option<String>,
    pub(crate) cost: Option<String>,
    pub(crate) billing_cycle: Option<String>,
    pub(crate) next_renewal: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) vendor: Option<String>,
    pub(crate) currency: Option<String>,
    pub(crate) status: Option<String>,
}

pub(crate) fn parse_source(content: &str) -> ClientResult<Vec<ParsedRow>> {
    let trimmed = content.trim().trim_start_matches('\u{feff}');
    if trimmed.is_empty() {
        return Err(invalid_input_error("Subscriptions source is empty."));
    }

    if looks_like_ndjson(trimmed) {
        return Err(ClientError::invalid_subscriptions_format(
            "NDJSON is not supported. Provide a JSON array or CSV.",
            "ndjson",
        ));
    }

    if trimmed.starts_with('[') {
        return parse_json_array(trimmed);
    }

    if serde_json::from_str::<Value>(trimmed).is_ok() {
        return Err(ClientError::invalid_subscriptions_format(
            "JSON input must be a top-level array of subscription objects.",
            "json_non_array",
        ));
    }

    if looks_like_csv(trimmed) {
        return parse_csv(trimmed);
    }

    Err(ClientError::invalid_subscriptions_format(
        "Unsupported subscriptions format. Provide a JSON array or CSV with headers.",
        "unknown",
    ))
}

fn parse_json_array(content: &str) -> ClientResult<Vec<ParsedRow>> {
    let parsed = serde_json::from_str::<Value>(content)
        .map_err(|_| invalid_input_error("Invalid JSON input. Provide a valid JSON array."))?;

    let Some(items) = parsed.as_array() else {
        return Err(invalid_input_error(
            "JSON input must be a top-level array of subscription objects.",
        ));
    };

    let mut rows = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let Some(object) = item.as_object() else {
            return Err(invalid_input_error(
                "JSON array entries must all be objects with subscription fields.",
            ));
        };

        rows.push(ParsedRow {
            row: (index as i64) + 1,
            id: read_optional_string(object.get("id")),
            name: read_optional_string(object.get("name")),
            cost: read_optional_string(object.get("cost")),
            billing_cycle: read_optional_string(object.get("billing_cycle")),
            next_renewal: read_renewal(object),
            category: read_optional_string(object.get("category")),
            vendor: read_optional_string(object.get("vendor")),
            currency: read_optional_string(object.get("currency")),
            status: read_optional_string(object.get("status")),
        });
    }

    Ok(rows)
}

fn read_renewal(object: &Map<String, Value>) -> Option<String> {
    read_optional_string(object.get(RENEWAL_FIELD))
        .or_else(|| read_optional_string(object.get(RENEWAL_FIELD_ALIAS)))
}

fn parse_csv(content: &str) -> ClientResult<Vec<ParsedRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| invalid_input_error("CSV header row is missing or unreadable."))?
        .iter()
        .map(|value| value.trim().to_string())
        .collect::<Vec<String>>();

    if !headers_are_valid(&headers) {
        return Err(ClientError::subscriptions_schema_mismatch(
            required_field_names()
                .iter()
                .map(|value| value.to_string())
                .collect(),
            optional_field_names()
                .iter()
                .map(|value| value.to_string())
                .collect(),
            headers,
        ));
    }

    let index_by_name = headers
        .iter()
        .enumerate()
        .map(|(index, name)| (name.to_string(), index))
        .collect::<HashMap<String, usize>>();

    let mut rows = Vec::new();
    for (row_index, result_row) in reader.records().enumerate() {
        let record =
            result_row.map_err(|_| invalid_input_error("CSV rows are malformed or not UTF-8."))?;

        rows.push(ParsedRow {
            row: (row_index as i64) + 1,
            id: value_for(&record, &index_by_name, "id"),
            name: value_for(&record, &index_by_name, "name"),
            cost: value_for(&record, &index_by_name, "cost"),
            billing_cycle: value_for(&record, &index_by_name, "billing_cycle"),
            next_renewal: value_for(&record, &index_by_name, RENEWAL_FIELD)
                .or_else(|| value_for(&record, &index_by_name, RENEWAL_FIELD_ALIAS)),
            category: value_for(&record, &index_by_name, "category"),
            vendor: value_for(&record, &index_by_name, "vendor"),
            currency: value_for(&record, &index_by_name, "currency"),
            status: value_for(&record, &index_by_name, "status"),
        });
    }

    Ok(rows)
}

fn value_for(
    record: &csv::StringRecord,
    index_by_name: &HashMap<String, usize>,
    field_name: &str,
) -> Option<String> {
    let index = index_by_name.get(field_name)?;
    let value = record.get(*index)?;
    Some(value.to_string())
}

fn read_optional_string(value: Option<&Value>) -> Option<String> {
    let current = value?;

    if current.is_null() {
        return None;
    }

    if let Some(string_value) = current.as_str() {
        return Some(string_value.to_string());
    }

    if let Some(integer_value) = current.as_i64() {
        return Some(integer_value.to_string());
    }

    if let Some(number_value) = current.as_f64() {
        return Some(number_value.to_string());
    }

    Some(current.to_string())
}

fn looks_like_ndjson(content: &str) -> bool {
    let lines = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<&str>>();
    if lines.len() < 2 {
        return false;
    }

    lines.iter().all(|line| {
        serde_json::from_str::<Value>(line.trim())
            .map(|value| value.is_object())
            .unwrap_or(false)
    })
}

fn looks_like_csv(content: &str) -> bool {
    let Some(first_line) = content.lines().find(|line| !line.trim().is_empty()) else {
        return false;
    };
    first_line.contains(',')
}

/// Every required header must appear, except that `next_renewal_date` may
/// stand in for `next_renewal`. Unknown headers are rejected.
fn headers_are_valid(actual_headers: &[String]) -> bool {
    let required_fields = required_field_names();
    let optional_fields = optional_field_names();
    let has = |name: &str| actual_headers.iter().any(|value| value == name);

    for required in &required_fields {
        let satisfied = if *required == RENEWAL_FIELD {
            has(RENEWAL_FIELD) || has(RENEWAL_FIELD_ALIAS)
        } else {
            has(*required)
        };
        if !satisfied {
            return false;
        }
    }

    actual_headers.iter().all(|header| {
        required_fields
            .iter()
            .chain(optional_fields.iter())
            .any(|value| *value == header.as_str())
    })
}
