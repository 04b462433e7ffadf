use super::types::{PlayerMetrics, TeamMetrics};
use crate::errors::{BalanceError, Result};

/// Combine players' metrics into a single team summary.
///
/// The team weighted average is self-weighted (`Σ w² / Σ w`), so stronger
/// players pull the team figure up more than a plain mean would.
pub fn aggregate_team(players: &[PlayerMetrics]) -> Result<TeamMetrics> {
    if players.is_empty() {
        return Err(BalanceError::EmptyTeam);
    }

    Ok(TeamMetrics {
        arithmetic_mean: mean_of(players, |m| m.arithmetic_mean),
        weighted_average: self_weighted_average(players),
        max: players.iter().map(|m| m.max).fold(f64::NEG_INFINITY, f64::max),
        current: mean_of(players, |m| m.current),
        trend: mean_of(players, |m| m.trend),
        min: players.iter().map(|m| m.min).fold(f64::INFINITY, f64::min),
        avg: mean_of(players, |m| m.avg),
        median_ratings: median_sequence(players),
    })
}

fn mean_of(players: &[PlayerMetrics], field: impl Fn(&PlayerMetrics) -> f64) -> f64 {
    players.iter().map(field).sum::<f64>() / players.len() as f64
}

fn self_weighted_average(players: &[PlayerMetrics]) -> f64 {
    let total_weighted: f64 = players.iter().map(|m| m.weighted_average * m.weighted_average).sum();
    let total_weight: f64 = players.iter().map(|m| m.weighted_average).sum();

    if total_weight != 0.0 {
        total_weighted / total_weight
    } else {
        0.0
    }
}

// Orders whole rating sequences lexicographically and takes the one at n / 2.
fn median_sequence(players: &[PlayerMetrics]) -> Vec<f64> {
    let mut sequences: Vec<&Vec<f64>> = players.iter().map(|m| &m.ratings).collect();
    sequences.sort_by(|a, b| compare_sequences(a, b));
    sequences[sequences.len() / 2].clone()
}

fn compare_sequences(a: &[f64], b: &[f64]) -> std::cmp::Ordering {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| x.total_cmp(y))
        .find(|ord| ord.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}
