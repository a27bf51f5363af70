use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use subtrack_client::{ClientResult, SuccessEnvelope};
use tempfile::{Builder, TempDir};

pub const AS_OF: &str = "2024-01-15";

pub fn temp_home_in_tmp(prefix: &str) -> std::io::Result<(TempDir, PathBuf)> {
    let dir = Builder::new().prefix(prefix).tempdir_in("/tmp")?;
    let home = dir.path().join("subtrack-home");
    fs::create_dir_all(&home)?;
    Ok((dir, home))
}

pub fn subscription(
    name: &str,
    cost: f64,
    billing_cycle: &str,
    next_renewal: &str,
    category: Option<&str>,
) -> Value {
    json!({
        "name": name,
        "cost": cost,
        "billing_cycle": billing_cycle,
        "next_renewal": next_renewal,
        "category": category,
    })
}

/// Five active subscriptions plus one cancelled one, renewing around
/// 2024-01-15.
pub fn household_rows() -> Vec<Value> {
    let mut cancelled = subscription("Old Magazine", 50.0, "monthly", "2024-01-18", Some("News"));
    cancelled["status"] = json!("cancelled");

    vec![
        subscription("Netflix", 15.99, "monthly", "2024-02-01", Some("Entertainment")),
        subscription("Spotify", 9.99, "monthly", "2024-01-20", Some("Entertainment")),
        subscription("Gym", 120.0, "quarterly", "2024-03-01", Some("Health")),
        subscription("IDE License", 99.99, "yearly", "2024-06-01", None),
        subscription("Coffee Club", 5.0, "weekly", "2024-01-16", None),
        cancelled,
    ]
}

pub fn household_monthly_total() -> f64 {
    15.99 + 9.99 + 120.0 / 3.0 + 99.99 / 12.0 + 5.0 * 52.0 / 12.0
}

pub fn write_subscriptions(home: &Path, rows: &[Value]) -> PathBuf {
    let path = home.join("subscriptions.json");
    let body = serde_json::to_string_pretty(rows).unwrap_or_default();
    let written = fs::write(&path, body);
    assert!(written.is_ok());
    path
}

pub fn write_raw(home: &Path, name: &str, body: &str) -> PathBuf {
    let path = home.join(name);
    let written = fs::write(&path, body);
    assert!(written.is_ok());
    path
}

pub fn payload(result: ClientResult<SuccessEnvelope>) -> Value {
    assert!(result.is_ok(), "command failed: {:?}", result.as_ref().err());
    if let Ok(success) = result {
        let value = serde_json::to_value(success);
        assert!(value.is_ok());
        if let Ok(json) = value {
            return json;
        }
    }
    Value::Null
}

pub fn approx_eq(actual: &Value, expected: f64) -> bool {
    actual
        .as_f64()
        .map(|value| (value - expected).abs() < 1e-9)
        .unwrap_or(false)
}

pub fn names(rows: &Value) -> Vec<String> {
    rows.as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|row| row["name"].as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
