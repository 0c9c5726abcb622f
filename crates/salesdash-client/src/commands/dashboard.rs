use tracing::debug;

use crate::ClientResult;
use crate::commands::common::{SourceOptions, load_context, source_summary};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{CityMetric, DashboardData};
use crate::sales::{compute_city_year_revenue, compute_year_over_year_change, revenue_for};

#[derive(Debug, Default)]
pub struct DashboardOptions<'a> {
    pub source: SourceOptions<'a>,
    pub current_year: Option<i32>,
    pub previous_year: Option<i32>,
}

pub fn run(source: Option<String>) -> ClientResult<SuccessEnvelope> {
    run_with_options(DashboardOptions {
        source: SourceOptions {
            source,
            ..SourceOptions::default()
        },
        ..DashboardOptions::default()
    })
}

#[doc(hidden)]
pub fn run_with_options(options: DashboardOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let context = load_context(&options.source)?;
    let current_year = options
        .current_year
        .unwrap_or(context.config.dashboard.current_year);
    let previous_year = options
        .previous_year
        .unwrap_or(context.config.dashboard.previous_year);

    let revenue = compute_city_year_revenue(&context.sales.records);
    let metrics = context
        .config
        .dashboard
        .cities
        .iter()
        .map(|city| CityMetric {
            city: city.clone(),
            revenue: revenue_for(&revenue, city, current_year).unwrap_or(0.0),
            previous_revenue: revenue_for(&revenue, city, previous_year),
            change_pct: compute_year_over_year_change(&revenue, city, current_year, previous_year),
        })
        .collect::<Vec<CityMetric>>();
    debug!(cities = metrics.len(), current_year, previous_year, "built dashboard metrics");

    let data = DashboardData {
        current_year,
        previous_year,
        metrics,
        summary: source_summary(&context.source, &context.sales),
        row_issues: context.sales.row_errors.clone(),
    };

    success("dashboard", data)
}
