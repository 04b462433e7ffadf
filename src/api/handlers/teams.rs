use axum::response::Json;

use super::ApiError;
use crate::api::models::{BalancedTeamsRequest, BalancedTeamsResponse, CompareTeamsRequest};
use crate::rating::{self, ModifierToggles, PlayerMetrics, PlayerProfile};
use crate::services::comparison::{compare_teams, TeamComparison};

/// Metrics of the named players, in `all_metrics` order.
fn pick_metrics(all_metrics: &[PlayerProfile], names: &[String]) -> Vec<PlayerMetrics> {
    all_metrics
        .iter()
        .filter(|p| names.contains(&p.name))
        .map(|p| p.metrics.clone())
        .collect()
}

pub async fn post_compare_teams(
    Json(request): Json<CompareTeamsRequest>,
) -> Result<Json<TeamComparison>, ApiError> {
    let team_a = pick_metrics(&request.all_metrics, &request.team_a);
    let team_b = pick_metrics(&request.all_metrics, &request.team_b);
    Ok(Json(compare_teams(&team_a, &team_b)?))
}

pub async fn post_balanced_teams(
    Json(request): Json<BalancedTeamsRequest>,
) -> Result<Json<BalancedTeamsResponse>, ApiError> {
    let selected: Vec<PlayerProfile> = request
        .all_metrics
        .into_iter()
        .filter(|p| request.selected_players.contains(&p.name))
        .collect();

    let toggles = ModifierToggles {
        use_positions: request.use_positions,
        use_recent_performance: request.use_recent_performance,
    };
    let result = rating::find_balanced_teams(&selected, toggles)?;
    Ok(Json(result.into()))
}
