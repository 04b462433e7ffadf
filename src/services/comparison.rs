use serde::Serialize;

use crate::errors::Result;
use crate::rating::{
    aggregate_team, expected_win_probability, series_outcome_distribution, PlayerMetrics,
    SeriesOutcome, TeamMetrics,
};

/// Head-to-head view of two hand-picked teams
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamComparison {
    pub team_a_strength: TeamMetrics,
    pub team_b_strength: TeamMetrics,
    pub expected_a: f64,
    pub expected_b: f64,
    pub series_probabilities: SeriesOutcome,
    pub team_a_series_win: f64,
    pub team_b_series_win: f64,
}

/// Compare two teams of any (non-empty) size on their weighted averages.
pub fn compare_teams(team_a: &[PlayerMetrics], team_b: &[PlayerMetrics]) -> Result<TeamComparison> {
    let team_a_strength = aggregate_team(team_a)?;
    let team_b_strength = aggregate_team(team_b)?;

    let expected_a = expected_win_probability(
        team_a_strength.weighted_average,
        team_b_strength.weighted_average,
    )?;
    let series = series_outcome_distribution(expected_a)?;

    Ok(TeamComparison {
        team_a_strength,
        team_b_strength,
        expected_a,
        expected_b: 1.0 - expected_a,
        team_a_series_win: series.team_a_series_win(),
        team_b_series_win: series.team_b_series_win(),
        series_probabilities: series,
    })
}
