//! Statistics Calculator Module
//! Pure aggregations over the cleaned listings that feed every dashboard view.

use crate::data::{CategoryColumn, Listing, NumericColumn};
use statrs::statistics::Statistics;
use std::collections::HashMap;

/// Share of one category within a column.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub label: String,
    pub count: usize,
    pub proportion: f64,
}

/// Row count for one observed (category, group) combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedCount {
    pub category: String,
    pub group: String,
    pub count: usize,
}

/// Projection of a listing shown in the fastest-sold table.
#[derive(Debug, Clone, PartialEq)]
pub struct FastSale {
    pub model: String,
    pub model_year: f64,
    pub price: f64,
    pub days_listed: i64,
    pub condition: String,
}

impl From<&Listing> for FastSale {
    fn from(listing: &Listing) -> Self {
        Self {
            model: listing.model.clone(),
            model_year: listing.model_year,
            price: listing.price,
            days_listed: listing.days_listed,
            condition: listing.condition.clone(),
        }
    }
}

/// Descriptive numbers shown under a histogram.
#[derive(Debug, Clone, Copy)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for NumericSummary {
    fn default() -> Self {
        Self {
            count: 0,
            mean: f64::NAN,
            median: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
        }
    }
}

/// Aggregations used by the views. None of them can fail on a cleaned table.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Median of the values; mean of the two central values for an even count.
    pub fn median(values: &[f64]) -> Option<f64> {
        let n = values.len();
        if n == 0 {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };
        Some(median)
    }

    /// Compute descriptive statistics for an array of values.
    pub fn describe(values: &[f64]) -> NumericSummary {
        let Some(median) = Self::median(values) else {
            return NumericSummary::default();
        };

        NumericSummary {
            count: values.len(),
            mean: Statistics::mean(values),
            median,
            std: if values.len() > 1 {
                Statistics::std_dev(values)
            } else {
                0.0
            },
            min: Statistics::min(values),
            max: Statistics::max(values),
        }
    }

    /// Raw values of a numeric column in row order, ready for binning.
    pub fn numeric_series(listings: &[Listing], column: NumericColumn) -> Vec<f64> {
        listings.iter().map(|l| column.value(l)).collect()
    }

    /// Aligned `(x, y)` pairs, one per row, row order kept.
    pub fn scatter_pairs(listings: &[Listing], x: NumericColumn, y: NumericColumn) -> Vec<(f64, f64)> {
        listings.iter().map(|l| (x.value(l), y.value(l))).collect()
    }

    /// `count / total_rows` for every observed category.
    ///
    /// Sorted by descending count, ties by label.
    pub fn category_proportions(listings: &[Listing], column: CategoryColumn) -> Vec<CategoryShare> {
        let total = listings.len();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for listing in listings {
            *counts.entry(column.value(listing)).or_default() += 1;
        }

        let mut shares: Vec<CategoryShare> = counts
            .into_iter()
            .map(|(label, count)| CategoryShare {
                label: label.to_string(),
                count,
                proportion: count as f64 / total as f64,
            })
            .collect();
        shares.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
        shares
    }

    /// Row count of every observed `(category, group)` combination.
    ///
    /// Combinations come out in the order they first appear in the table;
    /// combinations with no rows are never emitted.
    pub fn grouped_counts(
        listings: &[Listing],
        category: CategoryColumn,
        group: CategoryColumn,
    ) -> Vec<GroupedCount> {
        let mut index: HashMap<(&str, &str), usize> = HashMap::new();
        let mut counts: Vec<GroupedCount> = Vec::new();

        for listing in listings {
            let key = (category.value(listing), group.value(listing));
            match index.get(&key) {
                Some(&pos) => counts[pos].count += 1,
                None => {
                    index.insert(key, counts.len());
                    counts.push(GroupedCount {
                        category: key.0.to_string(),
                        group: key.1.to_string(),
                        count: 1,
                    });
                }
            }
        }

        counts
    }

    /// The `n` listings with the smallest key, ties kept in row order.
    pub fn top_n_ascending(listings: &[Listing], key: NumericColumn, n: usize) -> Vec<FastSale> {
        let mut ordered: Vec<&Listing> = listings.iter().collect();
        // Stable: equal keys keep their original row order.
        ordered.sort_by(|a, b| key.value(a).total_cmp(&key.value(b)));

        ordered.into_iter().take(n).map(FastSale::from).collect()
    }

    /// First `n` cleaned rows.
    pub fn head(listings: &[Listing], n: usize) -> &[Listing] {
        &listings[..std::cmp::min(n, listings.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn listing(odometer: f64, price: f64, condition: &str, days_listed: i64) -> Listing {
        Listing {
            model: format!("model-{}", days_listed),
            model_year: 2012.0,
            price,
            odometer,
            condition: condition.to_string(),
            fuel: "gas".to_string(),
            vehicle_type: "sedan".to_string(),
            transmission: "automatic".to_string(),
            is_4wd: false,
            date_posted: NaiveDate::from_ymd_opt(2018, 6, 23).unwrap(),
            days_listed,
        }
    }

    fn typed(vehicle_type: &str, transmission: &str) -> Listing {
        Listing {
            vehicle_type: vehicle_type.to_string(),
            transmission: transmission.to_string(),
            ..listing(1000.0, 1000.0, "good", 1)
        }
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(StatsCalculator::median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(StatsCalculator::median(&[70000.0, 50000.0]), Some(60000.0));
        assert_eq!(StatsCalculator::median(&[]), None);
    }

    #[test]
    fn test_describe() {
        let summary = StatsCalculator::describe(&[2.0, 4.0, 6.0]);
        assert_eq!(summary.count, 3);
        assert!((summary.mean - 4.0).abs() < 1e-12);
        assert_eq!(summary.median, 4.0);
        assert!((summary.std - 2.0).abs() < 1e-12);
        assert_eq!(summary.min, 2.0);
        assert_eq!(summary.max, 6.0);

        assert_eq!(StatsCalculator::describe(&[]).count, 0);
    }

    #[test]
    fn test_condition_proportions_scenario() {
        let listings = vec![
            listing(50000.0, 10000.0, "good", 5),
            listing(60000.0, 8000.0, "good", 7),
            listing(70000.0, 12000.0, "fair", 3),
        ];

        let shares = StatsCalculator::category_proportions(&listings, CategoryColumn::Condition);

        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].label, "good");
        assert!((shares[0].proportion - 0.667).abs() < 0.01);
        assert_eq!(shares[1].label, "fair");
        assert!((shares[1].proportion - 0.333).abs() < 0.01);
        let total: f64 = shares.iter().map(|s| s.proportion).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_proportions_sum_to_one() {
        let conditions = ["excellent", "good", "like new", "fair", "salvage", "new", "good"];
        let listings: Vec<Listing> = (0..97)
            .map(|i| listing(1.0, 1.0, conditions[i % conditions.len()], i as i64))
            .collect();

        let shares = StatsCalculator::category_proportions(&listings, CategoryColumn::Condition);
        let total: f64 = shares.iter().map(|s| s.proportion).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(shares.iter().map(|s| s.count).sum::<usize>(), 97);
        assert_eq!(shares[0].label, "good");
    }

    #[test]
    fn test_proportions_empty_table() {
        assert!(StatsCalculator::category_proportions(&[], CategoryColumn::Fuel).is_empty());
    }

    #[test]
    fn test_scatter_pairs_keep_row_order() {
        let listings = vec![
            listing(50000.0, 10000.0, "good", 5),
            listing(60000.0, 8000.0, "good", 7),
            listing(70000.0, 12000.0, "fair", 3),
        ];

        let pairs =
            StatsCalculator::scatter_pairs(&listings, NumericColumn::Odometer, NumericColumn::Price);

        assert_eq!(pairs.len(), listings.len());
        for (pair, l) in pairs.iter().zip(&listings) {
            assert_eq!(*pair, (l.odometer, l.price));
        }
    }

    #[test]
    fn test_numeric_series() {
        let listings = vec![
            listing(50000.0, 10000.0, "good", 5),
            listing(60000.0, 8000.0, "good", 7),
        ];
        assert_eq!(
            StatsCalculator::numeric_series(&listings, NumericColumn::Odometer),
            vec![50000.0, 60000.0]
        );
        assert_eq!(
            StatsCalculator::numeric_series(&listings, NumericColumn::DaysListed),
            vec![5.0, 7.0]
        );
    }

    #[test]
    fn test_grouped_counts_omit_empty_combinations() {
        let listings = vec![
            typed("SUV", "automatic"),
            typed("sedan", "manual"),
            typed("SUV", "automatic"),
            typed("pickup", "automatic"),
            typed("sedan", "manual"),
            typed("SUV", "manual"),
        ];

        let counts = StatsCalculator::grouped_counts(
            &listings,
            CategoryColumn::VehicleType,
            CategoryColumn::Transmission,
        );

        let as_tuples: Vec<(&str, &str, usize)> = counts
            .iter()
            .map(|c| (c.category.as_str(), c.group.as_str(), c.count))
            .collect();
        assert_eq!(
            as_tuples,
            vec![
                ("SUV", "automatic", 2),
                ("sedan", "manual", 2),
                ("pickup", "automatic", 1),
                ("SUV", "manual", 1),
            ]
        );
        assert!(counts.iter().all(|c| c.count > 0));
    }

    #[test]
    fn test_top_n_ascending_is_stable() {
        let days = [30, 5, 12, 5, 90, 1, 44, 5, 18, 7, 60, 3, 25];
        let listings: Vec<Listing> = days
            .iter()
            .enumerate()
            .map(|(i, &d)| Listing {
                model: format!("row-{}", i),
                ..listing(1.0, 1.0, "good", d)
            })
            .collect();

        let top = StatsCalculator::top_n_ascending(&listings, NumericColumn::DaysListed, 10);

        assert_eq!(top.len(), 10);
        let returned: Vec<i64> = top.iter().map(|t| t.days_listed).collect();
        assert_eq!(returned, vec![1, 3, 5, 5, 5, 7, 12, 18, 25, 30]);
        // The three ties at 5 keep row order 1, 3, 7.
        let tied: Vec<&str> = top
            .iter()
            .filter(|t| t.days_listed == 5)
            .map(|t| t.model.as_str())
            .collect();
        assert_eq!(tied, vec!["row-1", "row-3", "row-7"]);

        let max_kept = returned[returned.len() - 1];
        let kept: Vec<&str> = top.iter().map(|t| t.model.as_str()).collect();
        for l in listings.iter().filter(|l| !kept.contains(&l.model.as_str())) {
            assert!(max_kept <= l.days_listed);
        }
    }

    #[test]
    fn test_top_n_short_table() {
        let listings = vec![listing(1.0, 1.0, "good", 9), listing(1.0, 1.0, "fair", 2)];
        let top = StatsCalculator::top_n_ascending(&listings, NumericColumn::DaysListed, 10);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].days_listed, 2);
        assert_eq!(top[0].condition, "fair");
    }

    #[test]
    fn test_head() {
        let listings = vec![listing(1.0, 1.0, "good", 9), listing(1.0, 1.0, "fair", 2)];
        assert_eq!(StatsCalculator::head(&listings, 20).len(), 2);
        assert_eq!(StatsCalculator::head(&listings, 1)[0].days_listed, 9);
    }
}
