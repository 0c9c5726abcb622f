use std::collections::HashMap;

use crate::error::DataSourceError;

pub(crate) const REQUIRED_COLUMNS: [&str; 4] =
    ["date_of_sale", "city", "sales_amount", "product_category"];

#[derive(Debug, Clone)]
pub(crate) struct RawSalesRow {
    pub(crate) row: i64,
    pub(crate) date_of_sale: Option<String>,
    pub(crate) city: Option<String>,
    pub(crate) sales_amount: Option<String>,
    pub(crate) product_category: Option<String>,
    /// Cells past the last header column, joined with commas.
    pub(crate) surplus: Option<String>,
}

/// Short rows leave their trailing cells as `None`; long rows keep the
/// overflow in `surplus`. Both are judged per row during validation.
pub(crate) fn parse_csv(
    source_id: &str,
    content: &str,
) -> Result<Vec<RawSalesRow>, DataSourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|error| DataSourceError::Malformed {
            source_id: source_id.to_string(),
            detail: format!("header row is unreadable: {error}"),
        })?
        .iter()
        .map(|value| value.trim_start_matches('\u{feff}').trim().to_string())
        .collect::<Vec<String>>();

    let missing = missing_columns(&headers);
    if !missing.is_empty() {
        return Err(DataSourceError::MissingColumns {
            source_id: source_id.to_string(),
            missing,
            actual: headers,
        });
    }

    let index_by_name = headers
        .iter()
        .enumerate()
        .map(|(index, name)| (name.to_string(), index))
        .collect::<HashMap<String, usize>>();

    let mut rows = Vec::new();
    for (row_index, result_row) in reader.records().enumerate() {
        let record = result_row.map_err(|error| DataSourceError::Malformed {
            source_id: source_id.to_string(),
            detail: format!("row {} is unreadable: {error}", row_index + 1),
        })?;

        rows.push(RawSalesRow {
            row: (row_index as i64) + 1,
            date_of_sale: value_for(&record, &index_by_name, "date_of_sale"),
            city: value_for(&record, &index_by_name, "city"),
            sales_amount: value_for(&record, &index_by_name, "sales_amount"),
            product_category: value_for(&record, &index_by_name, "product_category"),
            surplus: surplus_cells(&record, headers.len()),
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

fn surplus_cells(record: &csv::StringRecord, header_count: usize) -> Option<String> {
    if record.len() <= header_count {
        return None;
    }
    Some(
        record
            .iter()
            .skip(header_count)
            .collect::<Vec<&str>>()
            .join(","),
    )
}

fn missing_columns(actual_headers: &[String]) -> Vec<String> {
    REQUIRED_COLUMNS
        .iter()
        .filter(|required| !actual_headers.iter().any(|value| value == *required))
        .map(|value| value.to_string())
        .collect()
}
