use std::collections::BTreeMap;

use crate::sales::types::{
    BreakdownDimension, BreakdownRow, CityYearRevenue, SalesRecord, UNSPECIFIED_CATEGORY,
    YearOverYearChange,
};

pub type CityYearRevenueMap = BTreeMap<(String, i32), CityYearRevenue>;

pub fn compute_city_year_revenue(records: &[SalesRecord]) -> CityYearRevenueMap {
    let mut revenue = CityYearRevenueMap::new();
    for record in records {
        let entry = revenue
            .entry((record.city.clone(), record.year))
            .or_insert_with(|| CityYearRevenue {
                city: record.city.clone(),
                year: record.year,
                revenue: 0.0,
                record_count: 0,
            });
        entry.revenue += record.sales_amount;
        entry.record_count += 1;
    }
    revenue
}

pub fn revenue_for(revenue: &CityYearRevenueMap, city: &str, year: i32) -> Option<f64> {
    revenue
        .get(&(city.to_string(), year))
        .map(|entry| entry.revenue)
}

/// Percentage change from `previous_year` to `current_year` for one city.
/// Undefined when the previous year has no revenue or sums to zero.
pub fn compute_year_over_year_change(
    revenue: &CityYearRevenueMap,
    city: &str,
    current_year: i32,
    previous_year: i32,
) -> YearOverYearChange {
    let Some(previous) = revenue_for(revenue, city, previous_year) else {
        return YearOverYearChange::Undefined;
    };
    if previous == 0.0 || !previous.is_finite() {
        return YearOverYearChange::Undefined;
    }

    let current = revenue_for(revenue, city, current_year).unwrap_or(0.0);
    let change = (current - previous) / previous * 100.0;
    if !change.is_finite() {
        return YearOverYearChange::Undefined;
    }
    YearOverYearChange::Percent(change)
}

pub fn compute_filtered_breakdown(
    records: &[SalesRecord],
    city: &str,
    year: i32,
    dimension: BreakdownDimension,
) -> Vec<BreakdownRow> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for record in records
        .iter()
        .filter(|record| record.city == city && record.year == year)
    {
        *totals.entry(group_key(record, dimension)).or_insert(0.0) += record.sales_amount;
    }

    totals
        .into_iter()
        .map(|(group_key, total_sales)| BreakdownRow {
            group_key,
            total_sales,
        })
        .collect()
}

fn group_key(record: &SalesRecord, dimension: BreakdownDimension) -> String {
    match dimension {
        BreakdownDimension::Month => format!("{:02}", record.month),
        BreakdownDimension::ProductCategory => record
            .product_category
            .clone()
            .unwrap_or_else(|| UNSPECIFIED_CATEGORY.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, NaiveDate};

    use super::{
        compute_city_year_revenue, compute_filtered_breakdown, compute_year_over_year_change,
        revenue_for,
    };
    use crate::sales::types::{BreakdownDimension, SalesRecord, YearOverYearChange};

    fn record(
        row: i64,
        date: (i32, u32, u32),
        city: &str,
        amount: f64,
        category: Option<&str>,
    ) -> SalesRecord {
        let date_of_sale = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap_or_default();
        SalesRecord {
            row,
            date_of_sale,
            city: city.to_string(),
            product_category: category.map(std::string::ToString::to_string),
            sales_amount: amount,
            month: date_of_sale.month(),
            year: date_of_sale.year(),
        }
    }

    fn tokyo_fixture() -> Vec<SalesRecord> {
        vec![
            record(1, (2022, 1, 5), "Tokyo", 100.0, Some("A")),
            record(2, (2023, 1, 5), "Tokyo", 150.0, Some("A")),
            record(3, (2023, 2, 10), "Tokyo", 50.0, None),
        ]
    }

    fn mixed_fixture() -> Vec<SalesRecord> {
        let mut records = tokyo_fixture();
        records.extend([
            record(4, (2022, 12, 31), "Osaka", 40.25, Some("Food")),
            record(5, (2023, 11, 1), "Osaka", 19.75, None),
            record(6, (2023, 3, 3), "Yokohama", 0.0, Some("Toys")),
            record(7, (2023, 10, 9), "Tokyo", 12.5, Some("B")),
        ]);
        records
    }

    #[test]
    fn tokyo_scenario_matches_expected_totals() {
        let records = tokyo_fixture();
        let revenue = compute_city_year_revenue(&records);
        assert_eq!(revenue_for(&revenue, "Tokyo", 2023), Some(200.0));
        assert_eq!(revenue_for(&revenue, "Tokyo", 2022), Some(100.0));

        let change = compute_year_over_year_change(&revenue, "Tokyo", 2023, 2022);
        assert_eq!(change, YearOverYearChange::Percent(100.0));

        let by_month =
            compute_filtered_breakdown(&records, "Tokyo", 2023, BreakdownDimension::Month);
        let by_month = by_month
            .iter()
            .map(|row| (row.group_key.as_str(), row.total_sales))
            .collect::<Vec<(&str, f64)>>();
        assert_eq!(by_month, vec![("01", 150.0), ("02", 50.0)]);

        let by_category = compute_filtered_breakdown(
            &records,
            "Tokyo",
            2023,
            BreakdownDimension::ProductCategory,
        );
        let by_category = by_category
            .iter()
            .map(|row| (row.group_key.as_str(), row.total_sales))
            .collect::<Vec<(&str, f64)>>();
        assert_eq!(by_category, vec![("A", 150.0), ("unspecified", 50.0)]);
    }

    #[test]
    fn revenue_totals_conserve_the_record_sum() {
        let records = mixed_fixture();
        let revenue = compute_city_year_revenue(&records);
        let aggregated = revenue.values().map(|entry| entry.revenue).sum::<f64>();
        let raw = records.iter().map(|record| record.sales_amount).sum::<f64>();
        assert!((aggregated - raw).abs() < 1e-9);

        let keys = revenue.keys().cloned().collect::<Vec<(String, i32)>>();
        assert_eq!(
            keys,
            vec![
                ("Osaka".to_string(), 2022),
                ("Osaka".to_string(), 2023),
                ("Tokyo".to_string(), 2022),
                ("Tokyo".to_string(), 2023),
                ("Yokohama".to_string(), 2023),
            ]
        );
        assert_eq!(revenue[&("Tokyo".to_string(), 2023)].record_count, 3);
    }

    #[test]
    fn year_over_year_is_undefined_without_previous_revenue() {
        let revenue = compute_city_year_revenue(&mixed_fixture());
        assert!(compute_year_over_year_change(&revenue, "Yokohama", 2023, 2022).is_undefined());
        assert!(compute_year_over_year_change(&revenue, "Nagoya", 2023, 2022).is_undefined());

        let zero_previous = compute_city_year_revenue(&[
            record(1, (2022, 5, 1), "Kobe", 0.0, None),
            record(2, (2023, 5, 1), "Kobe", 10.0, None),
        ]);
        assert!(compute_year_over_year_change(&zero_previous, "Kobe", 2023, 2022).is_undefined());
    }

    #[test]
    fn year_over_year_handles_missing_current_year_as_full_drop() {
        let revenue = compute_city_year_revenue(&[record(1, (2022, 5, 1), "Kobe", 80.0, None)]);
        assert_eq!(
            compute_year_over_year_change(&revenue, "Kobe", 2023, 2022),
            YearOverYearChange::Percent(-100.0)
        );
    }

    #[test]
    fn month_keys_are_always_two_digit_calendar_months() {
        let mut records = Vec::new();
        for month in 1..=12u32 {
            records.push(record(i64::from(month), (2023, month, 28), "Osaka", 1.0, None));
        }
        let breakdown =
            compute_filtered_breakdown(&records, "Osaka", 2023, BreakdownDimension::Month);
        assert_eq!(breakdown.len(), 12);
        let allowed = (1..=12).map(|month| format!("{month:02}")).collect::<Vec<String>>();
        for row in &breakdown {
            assert_eq!(row.group_key.len(), 2);
            assert!(allowed.contains(&row.group_key));
        }
        assert_eq!(breakdown[0].group_key, "01");
        assert_eq!(breakdown[11].group_key, "12");
    }

    #[test]
    fn category_breakdown_never_drops_null_categories() {
        let records = mixed_fixture();
        for (city, year) in [("Tokyo", 2023), ("Osaka", 2023), ("Osaka", 2022)] {
            let breakdown = compute_filtered_breakdown(
                &records,
                city,
                year,
                BreakdownDimension::ProductCategory,
            );
            let grouped = breakdown.iter().map(|row| row.total_sales).sum::<f64>();
            let expected = records
                .iter()
                .filter(|record| record.city == city && record.year == year)
                .map(|record| record.sales_amount)
                .sum::<f64>();
            assert!((grouped - expected).abs() < 1e-9, "{city} {year}");
        }
    }

    #[test]
    fn empty_input_yields_empty_aggregates() {
        let revenue = compute_city_year_revenue(&[]);
        assert!(revenue.is_empty());
        assert!(compute_year_over_year_change(&revenue, "Tokyo", 2023, 2022).is_undefined());
        assert!(
            compute_filtered_breakdown(&[], "Tokyo", 2023, BreakdownDimension::Month).is_empty()
        );
        assert!(
            compute_filtered_breakdown(&[], "Tokyo", 2023, BreakdownDimension::ProductCategory)
                .is_empty()
        );
    }
}
