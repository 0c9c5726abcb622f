use serde::Serialize;

use crate::error::RowParseError;
use crate::sales::{BreakdownRow, CityYearRevenue, YearOverYearChange};

#[derive(Debug, Clone, Serialize)]
pub struct SourceSummary {
    pub source: String,
    pub source_kind: String,
    pub rows_read: i64,
    pub rows_valid: i64,
    pub rows_invalid: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CityMetric {
    pub city: String,
    pub revenue: f64,
    pub previous_revenue: Option<f64>,
    pub change_pct: YearOverYearChange,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub current_year: i32,
    pub previous_year: i32,
    pub metrics: Vec<CityMetric>,
    pub summary: SourceSummary,
    pub row_issues: Vec<RowParseError>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RevenueData {
    pub rows: Vec<CityYearRevenue>,
    pub total_revenue: f64,
    pub summary: SourceSummary,
    pub row_issues: Vec<RowParseError>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BreakdownData {
    pub city: String,
    pub year: i32,
    pub dimension: String,
    pub rows: Vec<BreakdownRow>,
    pub total_sales: f64,
    pub summary: SourceSummary,
    pub row_issues: Vec<RowParseError>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckData {
    pub required_columns: Vec<String>,
    pub cities: Vec<String>,
    pub years: Vec<i32>,
    pub summary: SourceSummary,
    pub row_issues: Vec<RowParseError>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactData {
    pub webhook_url: String,
    pub payload: crate::contact::ContactPayload,
    pub delivered: bool,
}
