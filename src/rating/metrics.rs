use std::collections::BTreeMap;

use serde_json::Value;

use super::types::{PlayerMetrics, RatingFilter, RatingPoint};
use crate::errors::{BalanceError, Result};

/// Parse a raw `date -> rating` history and summarise it.
pub fn compute_metrics_from_raw(
    raw: &BTreeMap<String, Value>,
    filter: RatingFilter,
) -> Result<PlayerMetrics> {
    let history = raw
        .iter()
        .map(|(date, rating)| RatingPoint::parse(date, rating))
        .collect::<Result<Vec<_>>>()?;
    compute_metrics(&history, filter)
}

/// Summarise one player's rating history.
///
/// A filter that removes every entry falls back to the full history rather
/// than failing; only an empty history yields `NoData`.
pub fn compute_metrics(history: &[RatingPoint], filter: RatingFilter) -> Result<PlayerMetrics> {
    let selected = select_window(history, filter);
    if selected.is_empty() {
        return Err(BalanceError::NoData);
    }

    if let Some(bad) = selected.iter().find(|p| !p.rating.is_finite()) {
        return Err(BalanceError::invalid(format!(
            "rating is not finite at {}",
            bad.date
        )));
    }

    let ratings = sort_chronologically(selected);
    Ok(summarise(ratings))
}

fn select_window(history: &[RatingPoint], filter: RatingFilter) -> Vec<&RatingPoint> {
    let filtered: Vec<&RatingPoint> = history.iter().filter(|p| filter.accepts(&p.date)).collect();
    if filtered.is_empty() {
        history.iter().collect()
    } else {
        filtered
    }
}

fn sort_chronologically(mut points: Vec<&RatingPoint>) -> Vec<f64> {
    // sort_by is stable, so same-date entries keep their input order
    points.sort_by(|a, b| a.date.cmp(&b.date));
    points.into_iter().map(|p| p.rating).collect()
}

fn summarise(ratings: Vec<f64>) -> PlayerMetrics {
    let n = ratings.len();
    let mean = ratings.iter().sum::<f64>() / n as f64;

    PlayerMetrics {
        arithmetic_mean: mean,
        weighted_average: recency_weighted_average(&ratings),
        max: ratings.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        current: ratings[n - 1],
        trend: ratings[n - 1] - ratings[0],
        min: ratings.iter().copied().fold(f64::INFINITY, f64::min),
        avg: mean,
        median: floor_median(&ratings),
        ratings,
    }
}

/// Weight `i + 1` for the i-th oldest entry.
fn recency_weighted_average(ratings: &[f64]) -> f64 {
    let n = ratings.len();
    let weighted_sum: f64 = ratings
        .iter()
        .enumerate()
        .map(|(i, r)| (i + 1) as f64 * r)
        .sum();
    let total_weight = (n * (n + 1) / 2) as f64;
    weighted_sum / total_weight
}

/// Element at `n / 2` of the value-sorted ratings (upper middle for even n).
fn floor_median(ratings: &[f64]) -> f64 {
    let mut sorted = ratings.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted[sorted.len() / 2]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn point(date: &str, rating: f64) -> RatingPoint {
        RatingPoint::parse(date, &json!(rating)).unwrap()
    }

    fn sample_history() -> Vec<RatingPoint> {
        vec![
            point("2025-01-01", 1300.0),
            point("2023-01-01", 1000.0),
            point("2024-06-01", 1200.0),
        ]
    }

    #[test]
    fn test_all_filter_scenario() {
        let metrics = compute_metrics(&sample_history(), RatingFilter::All).unwrap();

        assert!((metrics.weighted_average - 1216.666_666).abs() < 1e-3);
        assert_eq!(metrics.trend, 300.0);
        assert_eq!(metrics.current, 1300.0);
        assert_eq!(metrics.max, 1300.0);
        assert_eq!(metrics.min, 1000.0);
        assert_eq!(metrics.median, 1200.0);
        assert!((metrics.arithmetic_mean - 1166.666_666).abs() < 1e-3);
        assert_eq!(metrics.avg, metrics.arithmetic_mean);
        assert_eq!(metrics.ratings, vec![1000.0, 1200.0, 1300.0]);
    }

    #[test]
    fn test_year_filter_scenario() {
        let metrics = compute_metrics(&sample_history(), RatingFilter::Year2025).unwrap();

        assert_eq!(metrics.weighted_average, 1300.0);
        assert_eq!(metrics.current, 1300.0);
        assert_eq!(metrics.max, 1300.0);
        assert_eq!(metrics.min, 1300.0);
        assert_eq!(metrics.trend, 0.0);
    }

    #[test]
    fn test_since_2024_filter_keeps_later_entries() {
        let metrics = compute_metrics(&sample_history(), RatingFilter::Since2024).unwrap();
        assert_eq!(metrics.ratings, vec![1200.0, 1300.0]);
        assert_eq!(metrics.trend, 100.0);
    }

    #[test]
    fn test_empty_filter_window_falls_back_to_full_history() {
        let history = vec![point("2022-05-01", 900.0), point("2023-05-01", 950.0)];
        let metrics = compute_metrics(&history, RatingFilter::Year2025).unwrap();
        assert_eq!(metrics.ratings, vec![900.0, 950.0]);
    }

    #[test]
    fn test_empty_history_is_no_data() {
        assert_eq!(
            compute_metrics(&[], RatingFilter::All),
            Err(BalanceError::NoData)
        );
    }

    #[test]
    fn test_non_finite_rating_rejected() {
        let history = vec![RatingPoint::new(point("2024-01-01", 0.0).date, f64::NAN)];
        assert!(matches!(
            compute_metrics(&history, RatingFilter::All),
            Err(BalanceError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_weighted_average_favours_recent_entries() {
        let rising = vec![
            point("2024-01-01", 1000.0),
            point("2024-02-01", 1100.0),
            point("2024-03-01", 1200.0),
        ];
        let falling = vec![
            point("2024-01-01", 1200.0),
            point("2024-02-01", 1100.0),
            point("2024-03-01", 1000.0),
        ];
        let up = compute_metrics(&rising, RatingFilter::All).unwrap();
        let down = compute_metrics(&falling, RatingFilter::All).unwrap();

        assert!(up.weighted_average > up.arithmetic_mean);
        assert!(down.weighted_average < down.arithmetic_mean);
        assert_ne!(up.weighted_average, down.weighted_average);
    }

    #[test]
    fn test_even_count_median_uses_floor_index() {
        let history = vec![
            point("2024-01-01", 1000.0),
            point("2024-02-01", 1400.0),
            point("2024-03-01", 1100.0),
            point("2024-04-01", 1300.0),
        ];
        let metrics = compute_metrics(&history, RatingFilter::All).unwrap();
        // sorted: 1000, 1100, 1300, 1400 -> index 2
        assert_eq!(metrics.median, 1300.0);
    }

    #[test]
    fn test_same_day_entries_keep_input_order() {
        let history = vec![
            point("2024-01-01", 1000.0),
            point("2024-01-01", 1050.0),
        ];
        let metrics = compute_metrics(&history, RatingFilter::All).unwrap();
        assert_eq!(metrics.current, 1050.0);
        assert_eq!(metrics.trend, 50.0);
    }

    #[test]
    fn test_compute_from_raw_mapping() {
        let mut raw = BTreeMap::new();
        raw.insert("2023-01-01".to_string(), json!("1000"));
        raw.insert("2024-06-01".to_string(), json!(1200));
        raw.insert("2025-01-01".to_string(), json!(1300.0));

        let metrics = compute_metrics_from_raw(&raw, RatingFilter::All).unwrap();
        assert_eq!(metrics.current, 1300.0);

        raw.insert("not-a-date".to_string(), json!(1));
        assert!(compute_metrics_from_raw(&raw, RatingFilter::All).is_err());
    }
}
