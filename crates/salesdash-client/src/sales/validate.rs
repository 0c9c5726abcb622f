use chrono::Datelike;

use crate::error::RowParseError;
use crate::sales::date::parse_sale_date;
use crate::sales::parse::RawSalesRow;
use crate::sales::types::SalesRecord;

#[derive(Debug, Clone, Default)]
pub(crate) struct ValidatedRows {
    pub(crate) records: Vec<SalesRecord>,
    pub(crate) issues: Vec<RowParseError>,
}

pub(crate) fn validate_rows(raw_rows: Vec<RawSalesRow>) -> ValidatedRows {
    let mut validated = ValidatedRows::default();

    for raw in raw_rows {
        let mut row_issues = Vec::new();

        let date_of_sale = validate_date(raw.row, raw.date_of_sale, &mut row_issues);
        let city = validate_city(raw.row, raw.city, &mut row_issues);
        let sales_amount = validate_amount(raw.row, raw.sales_amount, &mut row_issues);
        let product_category = normalize_optional(raw.product_category);
        if let Some(surplus) = raw.surplus {
            row_issues.push(issue(
                raw.row,
                "row",
                &surplus,
                "row has more cells than the header; remove the extra values.",
            ));
        }

        match (date_of_sale, city, sales_amount) {
            (Some(date), Some(city), Some(amount)) if row_issues.is_empty() => {
                validated.records.push(SalesRecord {
                    row: raw.row,
                    month: date.month(),
                    year: date.year(),
                    date_of_sale: date,
                    city,
                    product_category,
                    sales_amount: amount,
                });
            }
            _ => validated.issues.extend(row_issues),
        }
    }

    validated
}

fn validate_date(
    row: i64,
    value: Option<String>,
    issues: &mut Vec<RowParseError>,
) -> Option<chrono::NaiveDate> {
    let raw = value.unwrap_or_default();
    let parsed = parse_sale_date(&raw);
    if parsed.is_none() {
        issues.push(issue(
            row,
            "date_of_sale",
            &raw,
            "date_of_sale must be a calendar date (YYYY-MM-DD or a locale date).",
        ));
    }
    parsed
}

fn validate_city(
    row: i64,
    value: Option<String>,
    issues: &mut Vec<RowParseError>,
) -> Option<String> {
    let city = normalize_optional(value);
    if city.is_none() {
        issues.push(issue(row, "city", "", "city must be present and non-empty."));
    }
    city
}

fn validate_amount(
    row: i64,
    value: Option<String>,
    issues: &mut Vec<RowParseError>,
) -> Option<f64> {
    let raw = value.unwrap_or_default();
    let cleaned = raw.trim().trim_start_matches('$').replace(',', "");
    match cleaned.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Some(amount),
        _ => {
            issues.push(issue(
                row,
                "sales_amount",
                &raw,
                "sales_amount must be a finite decimal number.",
            ));
            None
        }
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    let trimmed = value?.trim().to_string();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed)
}

fn issue(row: i64, field: &str, value: &str, message: &str) -> RowParseError {
    RowParseError {
        row,
        field: field.to_string(),
        value: value.to_string(),
        message: message.to_string(),
    }
}
