// 📊 Aggregator - Single-pass sales statistics
// One linear scan produces the three headline numbers; the table view
// sorts a copy so the caller's record order is never disturbed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::currency::PriceFormat;
use crate::error::ReportError;
use crate::records::SalesRecord;

// ============================================================================
// SUMMARY TYPES
// ============================================================================

/// RevenueLeader - the max-revenue record plus its derived revenue
///
/// Carries a copy of the record: the derived `revenue` field is attached
/// here, never to the shared input list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueLeader {
    pub record: SalesRecord,
    pub revenue: f64,
}

/// Summary - the three headline statistics of one aggregation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Record with the highest revenue (total_sales × unit price)
    pub top_revenue: RevenueLeader,

    /// Record with the highest unit sales
    pub top_sales: SalesRecord,

    /// Model year with the highest cumulative unit sales
    pub popular_year: i32,

    /// Cumulative unit sales of that year
    pub popular_year_sales: u64,
}

// ============================================================================
// AGGREGATION
// ============================================================================

/// Running maxima during the scan. Indices into the input slice; the
/// Summary clones the winners once the scan is done.
struct Running {
    revenue_idx: usize,
    revenue: f64,
    sales_idx: usize,
}

/// Compute the summary statistics over a non-empty record set.
///
/// Both maxima use strict `>`, so the first record scanned keeps the lead
/// on ties. Year totals accumulate in a `BTreeMap` and the year scan also
/// uses strict `>`, so a cumulative-sales tie goes to the smallest year.
///
/// Empty input or an unparsable price fails with `MalformedRecord`;
/// no partial summary is ever produced.
pub fn compute_summary(
    records: &[SalesRecord],
    prices: &PriceFormat,
) -> Result<Summary, ReportError> {
    let mut running: Option<Running> = None;
    let mut year_totals: BTreeMap<i32, u64> = BTreeMap::new();

    for (idx, record) in records.iter().enumerate() {
        let revenue = record.total_sales as f64 * prices.parse(&record.price)?;

        running = Some(match running {
            None => Running {
                revenue_idx: idx,
                revenue,
                sales_idx: idx,
            },
            Some(mut best) => {
                if revenue > best.revenue {
                    best.revenue_idx = idx;
                    best.revenue = revenue;
                }
                if record.total_sales > records[best.sales_idx].total_sales {
                    best.sales_idx = idx;
                }
                best
            }
        });

        *year_totals.entry(record.car.year).or_insert(0) += record.total_sales;
    }

    let best = running
        .ok_or_else(|| ReportError::malformed_record("no records to aggregate"))?;

    // BTreeMap iterates years ascending; strict > keeps the smallest year on ties
    let mut popular: Option<(i32, u64)> = None;
    for (&year, &total) in &year_totals {
        if popular.map_or(true, |(_, best_total)| total > best_total) {
            popular = Some((year, total));
        }
    }
    let (popular_year, popular_year_sales) =
        popular.ok_or_else(|| ReportError::malformed_record("no records to aggregate"))?;

    Ok(Summary {
        top_revenue: RevenueLeader {
            record: records[best.revenue_idx].clone(),
            revenue: best.revenue,
        },
        top_sales: records[best.sales_idx].clone(),
        popular_year,
        popular_year_sales,
    })
}

/// Render the summary as exactly three human-readable lines.
///
/// Fixed order: revenue leader, sales leader, most popular year.
pub fn format_summary(summary: &Summary, prices: &PriceFormat) -> Vec<String> {
    vec![
        format!(
            "The {} generated the most revenue: {}",
            summary.top_revenue.record.car.label(),
            prices.format(summary.top_revenue.revenue)
        ),
        format!(
            "The {} had the most sales: {}",
            summary.top_sales.car.label(),
            summary.top_sales.total_sales
        ),
        format!(
            "The most popular car year was {}: {} sales",
            summary.popular_year, summary.popular_year_sales
        ),
    ]
}

// ============================================================================
// TABLE PROJECTION
// ============================================================================

/// Reshape the records into a header row plus one row per record,
/// sorted by total sales descending.
///
/// Sorts a vector of borrows, never the caller's slice. `sort_by` is
/// stable, so records with equal sales keep their input order.
pub fn to_table(records: &[SalesRecord]) -> Vec<Vec<String>> {
    let mut sorted: Vec<&SalesRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.total_sales.cmp(&a.total_sales));

    let mut table = Vec::with_capacity(records.len() + 1);
    table.push(vec![
        "ID".to_string(),
        "Car".to_string(),
        "Price".to_string(),
        "Total Sales".to_string(),
    ]);

    for record in sorted {
        table.push(vec![
            record.id.to_string(),
            record.car.label(),
            record.price.clone(),
            record.total_sales.to_string(),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::CarInfo;

    fn create_test_record(id: u64, make: &str, model: &str, year: i32, price: &str, total_sales: u64) -> SalesRecord {
        SalesRecord {
            id,
            car: CarInfo {
                make: make.to_string(),
                model: model.to_string(),
                year,
            },
            price: price.to_string(),
            total_sales,
        }
    }

    /// The worked example: Mustang vs Camry
    fn mustang_camry() -> Vec<SalesRecord> {
        vec![
            create_test_record(1, "Ford", "Mustang", 2020, "$30000.00", 10),
            create_test_record(2, "Toyota", "Camry", 2021, "$25000.00", 20),
        ]
    }

    #[test]
    fn test_worked_example() {
        let records = mustang_camry();
        let summary = compute_summary(&records, &PriceFormat::usd()).unwrap();

        // id1 revenue = 300000, id2 revenue = 500000
        assert_eq!(summary.top_revenue.record.id, 2);
        assert_eq!(summary.top_revenue.revenue, 500000.0);
        assert_eq!(summary.top_sales.id, 2);
        assert_eq!(summary.popular_year, 2021);
        assert_eq!(summary.popular_year_sales, 20);

        let lines = format_summary(&summary, &PriceFormat::usd());
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "The Toyota Camry (2021) generated the most revenue: $500000.00"
        );
        assert_eq!(lines[1], "The Toyota Camry (2021) had the most sales: 20");
        assert_eq!(lines[2], "The most popular car year was 2021: 20 sales");
    }

    #[test]
    fn test_deterministic() {
        let records = mustang_camry();
        let prices = PriceFormat::usd();

        let first = compute_summary(&records, &prices).unwrap();
        let second = compute_summary(&records, &prices).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_maxima_dominate_all_records() {
        let records = vec![
            create_test_record(1, "Honda", "Civic", 2018, "$22000.00", 15),
            create_test_record(2, "Ford", "F-150", 2019, "$45000.00", 8),
            create_test_record(3, "Tesla", "Model 3", 2021, "$40000.00", 12),
            create_test_record(4, "Kia", "Rio", 2017, "$15000.00", 30),
        ];

        let prices = PriceFormat::usd();
        let summary = compute_summary(&records, &prices).unwrap();

        for record in &records {
            let revenue = record.total_sales as f64 * prices.parse(&record.price).unwrap();
            assert!(summary.top_revenue.revenue >= revenue);
            assert!(summary.top_sales.total_sales >= record.total_sales);
        }
    }

    #[test]
    fn test_year_sum_consistency() {
        let records = vec![
            create_test_record(1, "Honda", "Civic", 2020, "$22000.00", 15),
            create_test_record(2, "Ford", "F-150", 2020, "$45000.00", 8),
            create_test_record(3, "Tesla", "Model 3", 2021, "$40000.00", 12),
        ];

        let summary = compute_summary(&records, &PriceFormat::usd()).unwrap();

        // 2020 sums to 23 by direct summation, 2021 only to 12
        assert_eq!(summary.popular_year, 2020);
        assert_eq!(summary.popular_year_sales, 15 + 8);
    }

    #[test]
    fn test_first_record_wins_revenue_tie() {
        // Identical revenue: 10 × $200 == 20 × $100
        let records = vec![
            create_test_record(1, "Honda", "Civic", 2018, "$200.00", 10),
            create_test_record(2, "Kia", "Rio", 2019, "$100.00", 20),
        ];

        let summary = compute_summary(&records, &PriceFormat::usd()).unwrap();
        assert_eq!(summary.top_revenue.record.id, 1);
    }

    #[test]
    fn test_first_record_wins_sales_tie() {
        let records = vec![
            create_test_record(1, "Honda", "Civic", 2018, "$200.00", 10),
            create_test_record(2, "Kia", "Rio", 2019, "$100.00", 10),
        ];

        let summary = compute_summary(&records, &PriceFormat::usd()).unwrap();
        assert_eq!(summary.top_sales.id, 1);
    }

    #[test]
    fn test_smallest_year_wins_year_tie() {
        // 2019 and 2021 both total 10 sales; 2021 appears first in the input
        let records = vec![
            create_test_record(1, "Tesla", "Model 3", 2021, "$100.00", 10),
            create_test_record(2, "Honda", "Civic", 2019, "$100.00", 4),
            create_test_record(3, "Honda", "Accord", 2019, "$100.00", 6),
        ];

        let summary = compute_summary(&records, &PriceFormat::usd()).unwrap();
        assert_eq!(summary.popular_year, 2019);
        assert_eq!(summary.popular_year_sales, 10);
    }

    #[test]
    fn test_empty_input_is_malformed() {
        let err = compute_summary(&[], &PriceFormat::usd()).unwrap_err();
        assert!(matches!(err, ReportError::MalformedRecord(_)));
    }

    #[test]
    fn test_bad_price_is_malformed() {
        let records = vec![create_test_record(1, "Honda", "Civic", 2018, "$oops", 10)];
        let err = compute_summary(&records, &PriceFormat::usd()).unwrap_err();
        assert!(matches!(err, ReportError::MalformedRecord(_)));
    }

    #[test]
    fn test_input_not_mutated() {
        let records = mustang_camry();
        let before = records.clone();

        compute_summary(&records, &PriceFormat::usd()).unwrap();
        to_table(&records);

        assert_eq!(records, before);
    }

    #[test]
    fn test_table_header_and_length() {
        let records = mustang_camry();
        let table = to_table(&records);

        assert_eq!(table.len(), records.len() + 1);
        assert_eq!(table[0], vec!["ID", "Car", "Price", "Total Sales"]);

        // every id appears exactly once in the body rows
        let mut ids: Vec<&str> = table[1..].iter().map(|row| row[0].as_str()).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_table_sorted_descending() {
        let records = vec![
            create_test_record(1, "Honda", "Civic", 2018, "$22000.00", 15),
            create_test_record(2, "Ford", "F-150", 2019, "$45000.00", 8),
            create_test_record(3, "Kia", "Rio", 2017, "$15000.00", 30),
        ];

        let table = to_table(&records);
        let sales: Vec<u64> = table[1..]
            .iter()
            .map(|row| row[3].parse().unwrap())
            .collect();

        assert_eq!(sales, vec![30, 15, 8]);
        assert_eq!(table[1][1], "Kia Rio (2017)");
    }

    #[test]
    fn test_table_stable_for_equal_sales() {
        let records = vec![
            create_test_record(1, "Honda", "Civic", 2018, "$22000.00", 10),
            create_test_record(2, "Ford", "F-150", 2019, "$45000.00", 10),
            create_test_record(3, "Kia", "Rio", 2017, "$15000.00", 10),
        ];

        let table = to_table(&records);
        let ids: Vec<&str> = table[1..].iter().map(|row| row[0].as_str()).collect();

        // all equal sales: input order preserved
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_summary_with_comma_decimal_prices() {
        let records = vec![
            create_test_record(1, "Ford", "Mustang", 2020, "€30.000,00", 10),
            create_test_record(2, "Toyota", "Camry", 2021, "€25.000,00", 20),
        ];

        let summary = compute_summary(&records, &PriceFormat::eur()).unwrap();
        assert_eq!(summary.top_revenue.record.id, 2);
        assert_eq!(summary.top_revenue.revenue, 500000.0);
    }
}
