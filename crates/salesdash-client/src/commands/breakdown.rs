use crate::commands::common::{SourceOptions, load_context, source_summary};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::BreakdownData;
use crate::sales::{BreakdownDimension, compute_filtered_breakdown};
use crate::{ClientError, ClientResult};

#[derive(Debug, Default)]
pub struct BreakdownOptions<'a> {
    pub source: SourceOptions<'a>,
    pub city: String,
    /// `month` or `product_category`; defaults to `month`.
    pub dimension: Option<String>,
    /// Explicit year. Takes precedence over `previous_year_view`.
    pub year: Option<i32>,
    pub previous_year_view: bool,
}

pub fn run(
    city: &str,
    dimension: Option<&str>,
    previous_year_view: bool,
) -> ClientResult<SuccessEnvelope> {
    run_with_options(BreakdownOptions {
        city: city.to_string(),
        dimension: dimension.map(std::string::ToString::to_string),
        previous_year_view,
        ..BreakdownOptions::default()
    })
}

#[doc(hidden)]
pub fn run_with_options(options: BreakdownOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let city = options.city.trim();
    if city.is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            "`--city` must be a non-empty city name.",
            Some("breakdown"),
        ));
    }

    let dimension = match options.dimension.as_deref() {
        Some(value) => BreakdownDimension::parse(value).ok_or_else(|| {
            ClientError::invalid_argument_for_command(
                "`--by` must be one of: month, product-category.",
                Some("breakdown"),
            )
        })?,
        None => BreakdownDimension::Month,
    };

    let context = load_context(&options.source)?;
    let year = match (options.year, options.previous_year_view) {
        (Some(year), _) => year,
        (None, true) => context.config.dashboard.previous_year,
        (None, false) => context.config.dashboard.current_year,
    };

    let rows = compute_filtered_breakdown(&context.sales.records, city, year, dimension);
    let total_sales = rows.iter().map(|row| row.total_sales).sum::<f64>();

    let data = BreakdownData {
        city: city.to_string(),
        year,
        dimension: dimension.as_str().to_string(),
        rows,
        total_sales,
        summary: source_summary(&context.source, &context.sales),
        row_issues: context.sales.row_errors.clone(),
    };

    success("breakdown", data)
}
