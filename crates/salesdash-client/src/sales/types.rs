use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::error::RowParseError;

pub const UNSPECIFIED_CATEGORY: &str = "unspecified";

#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub row: i64,
    pub date_of_sale: NaiveDate,
    pub city: String,
    pub product_category: Option<String>,
    pub sales_amount: f64,
    pub month: u32,
    pub year: i32,
}

/// Result of a load: accepted records in source order plus every rejected row.
#[derive(Debug, Clone, Default)]
pub struct LoadedSales {
    pub source_id: String,
    pub rows_read: i64,
    pub records: Vec<SalesRecord>,
    pub row_errors: Vec<RowParseError>,
}

impl LoadedSales {
    pub fn rows_invalid(&self) -> i64 {
        self.row_errors
            .iter()
            .map(|issue| issue.row)
            .collect::<std::collections::HashSet<i64>>()
            .len() as i64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityYearRevenue {
    pub city: String,
    pub year: i32,
    pub revenue: f64,
    pub record_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum YearOverYearChange {
    Percent(f64),
    Undefined,
}

impl YearOverYearChange {
    pub fn as_percent(self) -> Option<f64> {
        match self {
            Self::Percent(value) => Some(value),
            Self::Undefined => None,
        }
    }

    pub fn is_undefined(self) -> bool {
        matches!(self, Self::Undefined)
    }
}

impl Serialize for YearOverYearChange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.as_percent().serialize(serializer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakdownDimension {
    Month,
    ProductCategory,
}

impl BreakdownDimension {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::ProductCategory => "product_category",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "month" => Some(Self::Month),
            "product_category" | "category" => Some(Self::ProductCategory),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownRow {
    pub group_key: String,
    pub total_sales: f64,
}
