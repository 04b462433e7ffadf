use serde::{Deserialize, Serialize};

use crate::rating::{BalanceResult, PlayerProfile, ProbabilitySource, Role, TeamMember};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMetricsRequest {
    pub filter_type: Option<String>,
    #[serde(default)]
    pub use_positions: bool,
    #[serde(default)]
    pub use_recent_performance: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareTeamsRequest {
    pub team_a: Vec<String>,
    pub team_b: Vec<String>,
    pub all_metrics: Vec<PlayerProfile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalancedTeamsRequest {
    pub selected_players: Vec<String>,
    pub all_metrics: Vec<PlayerProfile>,
    #[serde(default)]
    pub use_positions: bool,
    #[serde(default)]
    pub use_recent_performance: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalancedTeamsResponse {
    pub team_a: Vec<String>,
    pub team_b: Vec<String>,
    /// Present only when positions were used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_a_roles: Option<Vec<Role>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_b_roles: Option<Vec<Role>>,
    pub team_a_weighted_average: f64,
    pub team_b_weighted_average: f64,
    pub imbalance: f64,
    pub win_probability: f64,
    pub probability_source: ProbabilitySource,
}

impl From<BalanceResult> for BalancedTeamsResponse {
    fn from(result: BalanceResult) -> Self {
        let roles = |members: &[TeamMember]| members.iter().map(|m| m.role).collect::<Option<Vec<_>>>();
        Self {
            team_a: result.team_a_names().into_iter().map(String::from).collect(),
            team_b: result.team_b_names().into_iter().map(String::from).collect(),
            team_a_roles: roles(&result.team_a),
            team_b_roles: roles(&result.team_b),
            team_a_weighted_average: result.team_a_metrics.weighted_average,
            team_b_weighted_average: result.team_b_metrics.weighted_average,
            imbalance: result.imbalance,
            win_probability: result.expected_win_probability,
            probability_source: result.probability_source,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
