use std::io;

use serde_json::Value;

use super::format::{
    Align, Column, format_amount, format_change, format_currency, key_value_rows,
    render_bar_chart, render_table, terminal_width,
};

const MAX_LISTED_ISSUES: usize = 20;

pub fn render_dashboard(data: &Value) -> io::Result<String> {
    let current_year = required_i64(data, "current_year")?;
    let previous_year = required_i64(data, "previous_year")?;
    let metrics = required_array(data, "metrics")?;

    let rows = metrics
        .iter()
        .map(|metric| {
            vec![
                value_str(metric, "city"),
                format_currency(value_f64(metric, "revenue")),
                format_change(metric.get("change_pct").and_then(Value::as_f64)),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![
        format!("Sales Dashboard ({current_year} vs. {previous_year})"),
        String::new(),
    ];
    if rows.is_empty() {
        lines.push("  No cities are configured.".to_string());
    } else {
        lines.extend(render_table(
            &[
                Column {
                    name: "City",
                    align: Align::Left,
                },
                Column {
                    name: "Revenue",
                    align: Align::Right,
                },
                Column {
                    name: "Change",
                    align: Align::Left,
                },
            ],
            &rows,
        ));
    }

    push_source_footer(&mut lines, data);
    Ok(lines.join("\n"))
}

pub fn render_revenue(data: &Value) -> io::Result<String> {
    let revenue_rows = required_array(data, "rows")?;
    let rows = revenue_rows
        .iter()
        .map(|row| {
            vec![
                value_str(row, "city"),
                row.get("year")
                    .and_then(Value::as_i64)
                    .map(|year| year.to_string())
                    .unwrap_or_default(),
                format_currency(value_f64(row, "revenue")),
                row.get("record_count")
                    .and_then(Value::as_i64)
                    .unwrap_or(0)
                    .to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec!["Revenue by city and year".to_string(), String::new()];
    if rows.is_empty() {
        lines.push("  No valid sales rows were found.".to_string());
    } else {
        lines.extend(render_table(
            &[
                Column {
                    name: "City",
                    align: Align::Left,
                },
                Column {
                    name: "Year",
                    align: Align::Left,
                },
                Column {
                    name: "Revenue",
                    align: Align::Right,
                },
                Column {
                    name: "Rows",
                    align: Align::Right,
                },
            ],
            &rows,
        ));
        lines.push(String::new());
        lines.extend(key_value_rows(
            &[("Total:", format_currency(value_f64(data, "total_revenue")))],
            2,
        ));
    }

    push_source_footer(&mut lines, data);
    Ok(lines.join("\n"))
}

pub fn render_breakdown(data: &Value) -> io::Result<String> {
    let year = required_i64(data, "year")?;
    let rows = required_array(data, "rows")?;
    let city = value_str(data, "city");
    let dimension = match data.get("dimension").and_then(Value::as_str) {
        Some("product_category") => "product category",
        _ => "month",
    };

    let mut lines = vec![
        format!("Sales for {year}: {city} by {dimension}"),
        String::new(),
    ];

    let entries = rows
        .iter()
        .map(|row| (value_str(row, "group_key"), value_f64(row, "total_sales")))
        .collect::<Vec<(String, f64)>>();
    if entries.is_empty() {
        lines.push(format!("  No sales recorded for {city} in {year}."));
    } else {
        lines.extend(render_bar_chart(&entries, terminal_width()));
        lines.push(String::new());
        lines.extend(key_value_rows(
            &[("Total:", format_amount(value_f64(data, "total_sales")))],
            2,
        ));
    }

    push_source_footer(&mut lines, data);
    Ok(lines.join("\n"))
}

pub fn render_check(data: &Value) -> io::Result<String> {
    let summary = data
        .get("summary")
        .ok_or_else(|| io::Error::other("check output requires summary"))?;
    let invalid = summary
        .get("rows_invalid")
        .and_then(Value::as_i64)
        .unwrap_or(0);

    let mut lines = vec![if invalid == 0 {
        "Source looks good.".to_string()
    } else {
        format!("Source has {invalid} rows that need fixes.")
    }];
    lines.push(String::new());
    lines.extend(key_value_rows(
        &[
            ("Source:", value_str(summary, "source")),
            ("Rows read:", value_i64_text(summary, "rows_read")),
            ("Rows valid:", value_i64_text(summary, "rows_valid")),
            ("Rows invalid:", invalid.to_string()),
            ("Cities:", join_values(data.get("cities"))),
            ("Years:", join_values(data.get("years"))),
        ],
        2,
    ));
    push_row_issues(&mut lines, data);
    Ok(lines.join("\n"))
}

fn push_source_footer(lines: &mut Vec<String>, data: &Value) {
    if let Some(summary) = data.get("summary") {
        lines.push(String::new());
        lines.push(format!(
            "Source: {} ({} of {} rows used)",
            value_str(summary, "source"),
            value_i64_text(summary, "rows_valid"),
            value_i64_text(summary, "rows_read"),
        ));
    }
    push_row_issues(lines, data);
}

fn push_row_issues(lines: &mut Vec<String>, data: &Value) {
    let issues = data
        .get("row_issues")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if issues.is_empty() {
        return;
    }

    lines.push(String::new());
    lines.push("Skipped rows:".to_string());
    for issue in issues.iter().take(MAX_LISTED_ISSUES) {
        lines.push(format!(
            "  Row {}  {} = `{}`: {}",
            value_i64_text(issue, "row"),
            value_str(issue, "field"),
            value_str(issue, "value"),
            value_str(issue, "message"),
        ));
    }
    if issues.len() > MAX_LISTED_ISSUES {
        lines.push(format!(
            "  ... and {} more. Use --json for the full list.",
            issues.len() - MAX_LISTED_ISSUES
        ));
    }
}

fn required_array<'a>(data: &'a Value, key: &str) -> io::Result<&'a Vec<Value>> {
    data.get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other(format!("report output requires `{key}`")))
}

fn required_i64(data: &Value, key: &str) -> io::Result<i64> {
    data.get(key)
        .and_then(Value::as_i64)
        .ok_or_else(|| io::Error::other(format!("report output requires `{key}`")))
}

fn value_str(data: &Value, key: &str) -> String {
    data.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn value_f64(data: &Value, key: &str) -> f64 {
    data.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

fn value_i64_text(data: &Value, key: &str) -> String {
    data.get(key)
        .and_then(Value::as_i64)
        .unwrap_or(0)
        .to_string()
}

fn join_values(value: Option<&Value>) -> String {
    let items = value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| match item {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<String>>()
        })
        .unwrap_or_default();
    if items.is_empty() {
        return "none".to_string();
    }
    items.join(", ")
}
