pub mod aggregate;
pub mod cache;
pub mod date;
pub(crate) mod parse;
pub mod source;
pub mod types;
pub(crate) mod validate;

use tracing::{info, warn};

use crate::error::DataSourceError;

pub use aggregate::{
    CityYearRevenueMap, compute_city_year_revenue, compute_filtered_breakdown,
    compute_year_over_year_change, revenue_for,
};
pub use cache::SalesCache;
pub use source::SalesSource;
pub use types::{
    BreakdownDimension, BreakdownRow, CityYearRevenue, LoadedSales, SalesRecord,
    UNSPECIFIED_CATEGORY, YearOverYearChange,
};

pub fn required_columns() -> Vec<&'static str> {
    parse::REQUIRED_COLUMNS.to_vec()
}

/// Reads and parses `source`. Rows that fail validation are reported in
/// `row_errors` and left out of `records`.
pub fn load(source: &SalesSource) -> Result<LoadedSales, DataSourceError> {
    load_with_stdin(source, None)
}

pub fn load_with_stdin(
    source: &SalesSource,
    stdin_override: Option<String>,
) -> Result<LoadedSales, DataSourceError> {
    let content = source::read_source(source, stdin_override)?;
    load_from_str(&source.id(), &content)
}

pub fn load_from_str(source_id: &str, content: &str) -> Result<LoadedSales, DataSourceError> {
    if content.trim().is_empty() {
        return Err(DataSourceError::Empty {
            source_id: source_id.to_string(),
        });
    }

    let raw_rows = parse::parse_csv(source_id, content)?;
    let rows_read = raw_rows.len() as i64;
    let validated = validate::validate_rows(raw_rows);

    let loaded = LoadedSales {
        source_id: source_id.to_string(),
        rows_read,
        records: validated.records,
        row_errors: validated.issues,
    };

    if !loaded.row_errors.is_empty() {
        warn!(
            source = source_id,
            rows_invalid = loaded.rows_invalid(),
            "rejected sales rows during load"
        );
    }
    info!(
        source = source_id,
        rows_read,
        rows_valid = loaded.records.len(),
        "loaded sales source"
    );

    Ok(loaded)
}
