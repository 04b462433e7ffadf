use serde::{Deserialize, Serialize};

use crate::errors::{BalanceError, Result};

/// Rating gap that corresponds to 10:1 odds
const LOGISTIC_SCALE: f64 = 400.0;

/// Probability that side A beats side B under the standard Elo curve.
pub fn expected_win_probability(rating_a: f64, rating_b: f64) -> Result<f64> {
    if !rating_a.is_finite() || !rating_b.is_finite() {
        return Err(BalanceError::invalid(format!(
            "ratings must be finite, got {} and {}",
            rating_a, rating_b
        )));
    }
    Ok(1.0 / (1.0 + 10f64.powf((rating_b - rating_a) / LOGISTIC_SCALE)))
}

/// Best-of-three outcome probabilities, seen from team A, with all three
/// games always played.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesOutcome {
    #[serde(rename = "3-0")]
    pub three_zero: f64,
    #[serde(rename = "2-1")]
    pub two_one: f64,
    #[serde(rename = "1-2")]
    pub one_two: f64,
    #[serde(rename = "0-3")]
    pub zero_three: f64,
}

impl SeriesOutcome {
    pub fn team_a_series_win(&self) -> f64 {
        self.three_zero + self.two_one
    }

    pub fn team_b_series_win(&self) -> f64 {
        self.one_two + self.zero_three
    }

    pub fn total(&self) -> f64 {
        self.three_zero + self.two_one + self.one_two + self.zero_three
    }
}

pub fn series_outcome_distribution(p_win: f64) -> Result<SeriesOutcome> {
    if !p_win.is_finite() || !(0.0..=1.0).contains(&p_win) {
        return Err(BalanceError::invalid(format!(
            "win probability must be within [0, 1], got {}",
            p_win
        )));
    }

    let p_lose = 1.0 - p_win;
    Ok(SeriesOutcome {
        three_zero: p_win * p_win * p_win,
        two_one: 3.0 * p_win * p_win * p_lose,
        one_two: 3.0 * p_win * p_lose * p_lose,
        zero_three: p_lose * p_lose * p_lose,
    })
}
