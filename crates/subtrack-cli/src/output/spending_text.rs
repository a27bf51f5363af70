use std::io;

use serde_json::Value;

use super::format::{self, Column, money, money_with_currency, share_percent};

pub fn render_summary(data: &Value) -> io::Result<String> {
    let active = int_field(data, "active_subscriptions");
    let mut lines = vec![format!(
        "Subscription spending as of {}",
        str_field(data, "as_of")
    )];
    lines.push(String::new());

    if active == 0 {
        lines.push("No active subscriptions found.".to_string());
        lines.extend(source_lines(data));
        lines.extend(warning_lines(data));
        return Ok(lines.join("\n"));
    }

    lines.extend(format::key_value_rows(
        &[
            ("Active subscriptions:", active.to_string()),
            ("Monthly total:", money(float_field(data, "total_monthly"))),
            ("Yearly total:", money(float_field(data, "total_yearly"))),
            (
                "Average per subscription:",
                money(float_field(data, "average_monthly")),
            ),
        ],
        2,
    ));
    lines.extend(currency_note(data));
    lines.extend(warning_lines(data));
    Ok(lines.join("\n"))
}

pub fn render_categories(data: &Value) -> io::Result<String> {
    let rows = rows_field(data, "rows", "categories")?;
    if rows.is_empty() {
        return Ok(empty_message(data));
    }

    let mut lines = vec!["Monthly spend by category:".to_string()];
    lines.extend(category_table(rows));
    lines.push(String::new());
    lines.push(format!(
        "  Total per month:  {}",
        money(float_field(data, "total_monthly"))
    ));
    lines.extend(warning_lines(data));
    Ok(lines.join("\n"))
}

pub fn render_cycles(data: &Value) -> io::Result<String> {
    let rows = rows_field(data, "rows", "cycles")?;
    if rows.is_empty() {
        return Ok(empty_message(data));
    }

    let columns = [
        Column::left("Billing Cycle"),
        Column::right("Monthly"),
        Column::right("Count"),
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            let cycle = str_field(row, "billing_cycle");
            let recognized = row
                .get("recognized")
                .and_then(Value::as_bool)
                .unwrap_or(true);
            vec![
                if recognized {
                    cycle.to_string()
                } else {
                    format!("{cycle} (counted as monthly)")
                },
                money(float_field(row, "monthly_total")),
                int_field(row, "count").to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec!["Monthly spend by billing cycle:".to_string()];
    lines.extend(format::render_table_or_blocks(
        &columns,
        &table_rows,
        format::terminal_width(),
        "Cycle",
    ));
    lines.push(String::new());
    lines.push(format!(
        "  Total per month:  {}",
        money(float_field(data, "total_monthly"))
    ));
    lines.extend(warning_lines(data));
    Ok(lines.join("\n"))
}

pub fn render_list(data: &Value) -> io::Result<String> {
    let rows = rows_field(data, "rows", "list")?;
    if rows.is_empty() {
        let mut lines = vec!["No subscriptions match.".to_string()];
        lines.extend(source_lines(data));
        lines.extend(warning_lines(data));
        return Ok(lines.join("\n"));
    }

    let columns = [
        Column::left("Name"),
        Column::right("Monthly"),
        Column::right("Yearly"),
        Column::left("Category"),
        Column::left("Renews"),
        Column::left("When"),
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            let name = str_field(row, "name");
            vec![
                match str_field(row, "status") {
                    "active" => name.to_string(),
                    status => format!("{name} ({status})"),
                },
                money(float_field(row, "monthly_cost")),
                money(float_field(row, "yearly_cost")),
                str_field(row, "category").to_string(),
                str_field(row, "next_renewal").to_string(),
                str_field(row, "status_label").to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![format!(
        "Subscriptions by {} (as of {}):",
        str_field(data, "sort"),
        str_field(data, "as_of")
    )];
    lines.extend(format::render_table_or_blocks(
        &columns,
        &table_rows,
        format::terminal_width(),
        "Subscription",
    ));
    lines.push(String::new());
    lines.push(format!(
        "  {} shown, {} per month active",
        int_field(data, "matching"),
        money(float_field(data, "monthly_total"))
    ));
    lines.extend(warning_lines(data));
    Ok(lines.join("\n"))
}

pub fn render_upcoming(data: &Value) -> io::Result<String> {
    let rows = rows_field(data, "rows", "upcoming")?;
    let within_days = int_field(data, "within_days");
    let as_of = str_field(data, "as_of");

    if rows.is_empty() {
        let mut lines = vec![format!(
            "No renewals due in the next {within_days} days (as of {as_of})."
        )];
        lines.extend(warning_lines(data));
        return Ok(lines.join("\n"));
    }

    let mut lines = vec![
        format!("Renewals due in the next {within_days} days (as of {as_of}):"),
    ];
    lines.extend(upcoming_table(rows));
    lines.push(String::new());
    lines.push(format!(
        "  Total due:  {}",
        money(float_field(data, "total_due"))
    ));
    lines.extend(warning_lines(data));
    Ok(lines.join("\n"))
}

pub fn render_forecast(data: &Value) -> io::Result<String> {
    let rows = rows_field(data, "rows", "forecast")?;
    let months = int_field(data, "months");

    let mut lines = vec![format!(
        "Spending forecast for {months} months from {}:",
        str_field(data, "as_of")
    )];

    let columns = [Column::left("Month"), Column::right("Projected")];
    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                str_field(row, "month").to_string(),
                money(float_field(row, "projected_amount")),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(format::render_table_or_blocks(
        &columns,
        &table_rows,
        format::terminal_width(),
        "Month",
    ));

    let due_label = format!("Due in next {} days:", int_field(data, "upcoming_window_days"));
    lines.push(String::new());
    lines.push("Summary:".to_string());
    lines.extend(format::key_value_rows(
        &[
            ("Horizon total:", money(float_field(data, "horizon_total"))),
            (
                "Average per month:",
                money(float_field(data, "average_per_month")),
            ),
            (
                due_label.as_str(),
                format!(
                    "{} ({} renewals)",
                    money(float_field(data, "upcoming_total")),
                    int_field(data, "upcoming_count")
                ),
            ),
        ],
        2,
    ));
    lines.push(String::new());
    lines.push(format!("Note: {}", str_field(data, "assumption")));
    lines.extend(warning_lines(data));
    Ok(lines.join("\n"))
}

pub fn render_dash(data: &Value) -> io::Result<String> {
    let renewals = rows_field(data, "upcoming_renewals", "dash")?;
    let categories = rows_field(data, "spend_by_category", "dash")?;
    let window = int_field(data, "upcoming_window_days");

    let mut overview = vec![
        (
            "Monthly spend:",
            money(float_field(data, "total_monthly_spend")),
        ),
        (
            "Active subscriptions:",
            int_field(data, "active_subscriptions").to_string(),
        ),
    ];
    if let Some(top) = data.get("top_category").filter(|value| !value.is_null()) {
        overview.push((
            "Top category:",
            format!(
                "{} ({} per month)",
                str_field(top, "category"),
                money(float_field(top, "monthly_total"))
            ),
        ));
    }

    let mut lines = vec![format!("Subtrack dashboard ({})", str_field(data, "as_of"))];
    lines.push(String::new());
    lines.extend(format::key_value_rows(&overview, 2));

    lines.push(String::new());
    if renewals.is_empty() {
        lines.push(format!("No renewals due in the next {window} days."));
    } else {
        lines.push(format!("Upcoming renewals (next {window} days):"));
        lines.extend(upcoming_table(renewals));
    }

    if !categories.is_empty() {
        lines.push(String::new());
        lines.push("Spend by category:".to_string());
        lines.extend(category_table(categories));
    }

    lines.extend(warning_lines(data));
    Ok(lines.join("\n"))
}

pub fn render_validate(data: &Value) -> io::Result<String> {
    let summary = data
        .get("summary")
        .ok_or_else(|| io::Error::other("validate output requires summary"))?;

    let mut lines = vec![str_field(data, "message").to_string(), String::new()];
    lines.extend(format::key_value_rows(
        &[
            ("Rows read:", int_field(summary, "rows_read").to_string()),
            ("Rows valid:", int_field(summary, "rows_valid").to_string()),
            ("Active:", int_field(summary, "active").to_string()),
            ("Inactive:", int_field(summary, "inactive").to_string()),
        ],
        2,
    ));
    lines.extend(source_lines(data));
    lines.extend(warning_lines(data));
    Ok(lines.join("\n"))
}

fn category_table(rows: &[Value]) -> Vec<String> {
    let columns = [
        Column::left("Category"),
        Column::right("Monthly"),
        Column::right("Count"),
        Column::right("Share"),
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                str_field(row, "category").to_string(),
                money(float_field(row, "monthly_total")),
                int_field(row, "count").to_string(),
                share_percent(float_field(row, "share")),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    format::render_table_or_blocks(&columns, &table_rows, format::terminal_width(), "Category")
}

fn upcoming_table(rows: &[Value]) -> Vec<String> {
    let columns = [
        Column::left("Name"),
        Column::right("Cost"),
        Column::left("Cycle"),
        Column::left("Category"),
        Column::left("Renews"),
        Column::left("When"),
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                str_field(row, "name").to_string(),
                money_with_currency(float_field(row, "cost"), str_field(row, "currency")),
                str_field(row, "billing_cycle").to_string(),
                str_field(row, "category").to_string(),
                str_field(row, "next_renewal").to_string(),
                str_field(row, "status_label").to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    format::render_table_or_blocks(&columns, &table_rows, format::terminal_width(), "Renewal")
}

fn empty_message(data: &Value) -> String {
    let mut lines = vec!["No active subscriptions found.".to_string()];
    lines.extend(source_lines(data));
    lines.extend(warning_lines(data));
    lines.join("\n")
}

fn currency_note(data: &Value) -> Vec<String> {
    let currencies = data
        .get("currencies")
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<&str>>()
        })
        .unwrap_or_default();
    if currencies.len() < 2 {
        return Vec::new();
    }

    vec![
        String::new(),
        format!(
            "Note: amounts mix currencies ({}) and are added without conversion.",
            currencies.join(", ")
        ),
    ]
}

fn source_lines(data: &Value) -> Vec<String> {
    let Some(source) = data.get("source") else {
        return Vec::new();
    };
    let described = match source.get("path").and_then(Value::as_str) {
        Some(path) => path.to_string(),
        None => str_field(source, "kind").to_string(),
    };
    vec![String::new(), format!("  Source:  {described}")]
}

fn warning_lines(data: &Value) -> Vec<String> {
    let warnings = data
        .get("warnings")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if warnings.is_empty() {
        return Vec::new();
    }

    let mut lines = vec![String::new(), "Warnings:".to_string()];
    for warning in &warnings {
        let message = str_field(warning, "message");
        match warning.get("row").and_then(Value::as_i64) {
            Some(row) => lines.push(format!("  Row {row}: {message}")),
            None => lines.push(format!("  {message}")),
        }
    }
    lines
}

fn rows_field<'a>(data: &'a Value, key: &str, command: &str) -> io::Result<&'a Vec<Value>> {
    data.get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other(format!("{command} output requires {key}")))
}

fn str_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("unknown")
}

fn float_field(value: &Value, key: &str) -> f64 {
    value.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

fn int_field(value: &Value, key: &str) -> i64 {
    value.get(key).and_then(Value::as_i64).unwrap_or(0)
}
