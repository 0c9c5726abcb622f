use crate::ClientResult;
use crate::commands::common::{SourceOptions, load_context, source_summary};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::RevenueData;
use crate::sales::{CityYearRevenue, compute_city_year_revenue};

pub fn run(source: Option<String>) -> ClientResult<SuccessEnvelope> {
    run_with_options(SourceOptions {
        source,
        ..SourceOptions::default()
    })
}

#[doc(hidden)]
pub fn run_with_options(options: SourceOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let context = load_context(&options)?;
    let rows = compute_city_year_revenue(&context.sales.records)
        .into_values()
        .collect::<Vec<CityYearRevenue>>();
    let total_revenue = rows.iter().map(|row| row.revenue).sum::<f64>();

    let data = RevenueData {
        rows,
        total_revenue,
        summary: source_summary(&context.source, &context.sales),
        row_issues: context.sales.row_errors.clone(),
    };

    success("revenue", data)
}
