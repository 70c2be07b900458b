//! Calendar-month aggregation of raw service records.
//!
//! The data store hands back one row per completed escort service; the
//! backtest engine wants one observation per month. Grouping happens here
//! so every consumer sees the same month keys.

use std::collections::BTreeMap;

use custodia_forecast_models::MonthlyObservation;
use serde::{Deserialize, Serialize};

/// A completed service as fetched from the operations store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    /// Date the service was completed.
    pub completed_at: chrono::NaiveDate,
    /// Value of the cargo moved on this service.
    pub gmv: f64,
}

/// Groups service records into per-month observations, ascending by month.
///
/// Records may arrive in any order. Months with no records are absent from
/// the output; the backtest assumes a gapless series but does not enforce
/// one, matching the upstream store which only materializes active months.
#[must_use]
pub fn aggregate_monthly(records: &[ServiceRecord]) -> Vec<MonthlyObservation> {
    let mut months: BTreeMap<String, (u64, f64)> = BTreeMap::new();

    for record in records {
        let key = record.completed_at.format("%Y-%m").to_string();
        let entry = months.entry(key).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += record.gmv;
    }

    months
        .into_iter()
        .map(|(month, (services, gmv))| MonthlyObservation {
            month,
            services,
            gmv,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, gmv: f64) -> ServiceRecord {
        ServiceRecord {
            completed_at: date.parse().unwrap(),
            gmv,
        }
    }

    #[test]
    fn groups_by_calendar_month_ascending() {
        let records = vec![
            record("2025-03-15", 50_000.0),
            record("2025-01-02", 10_000.0),
            record("2025-01-28", 20_000.0),
            record("2025-03-01", 5_000.0),
        ];

        let observations = aggregate_monthly(&records);

        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0].month, "2025-01");
        assert_eq!(observations[0].services, 2);
        assert!((observations[0].gmv - 30_000.0).abs() < f64::EPSILON);
        assert_eq!(observations[1].month, "2025-03");
        assert_eq!(observations[1].services, 2);
        assert!((observations[1].gmv - 55_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unsorted_input_yields_sorted_months() {
        let records = vec![
            record("2025-12-31", 1.0),
            record("2024-01-01", 1.0),
            record("2025-06-15", 1.0),
        ];

        let observations = aggregate_monthly(&records);
        let months: Vec<&str> = observations.iter().map(|o| o.month.as_str()).collect();
        assert_eq!(months, vec!["2024-01", "2025-06", "2025-12"]);
    }

    #[test]
    fn empty_input_yields_empty_series() {
        assert!(aggregate_monthly(&[]).is_empty());
    }
}
