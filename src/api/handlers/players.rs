use axum::{extract::State, response::Json};
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::api::models::PlayerMetricsRequest;
use crate::domain::RosterPlayer;
use crate::rating::{ModifierToggles, PlayerProfile, RatingFilter};
use crate::services::collector;

pub async fn get_roster(State(state): State<Arc<AppState>>) -> Json<Vec<RosterPlayer>> {
    Json(state.roster.players().to_vec())
}

pub async fn get_player_metrics(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PlayerMetricsRequest>,
) -> Result<Json<Vec<PlayerProfile>>, ApiError> {
    let filter = match request.filter_type.as_deref() {
        Some(value) => value.parse::<RatingFilter>()?,
        None => state.config.balance.default_filter,
    };
    let toggles = ModifierToggles {
        use_positions: request.use_positions,
        use_recent_performance: request.use_recent_performance,
    };

    let profiles = collector::load_profiles(
        &state.config,
        &state.roster,
        &state.pool,
        state.roster.players(),
        filter,
        toggles,
    )
    .await?;

    Ok(Json(profiles))
}
