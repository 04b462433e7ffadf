use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    players::{get_player_metrics, get_roster},
    teams::{post_balanced_teams, post_compare_teams},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/roster", get(get_roster))
        .route("/api/player-metrics", post(get_player_metrics))
        .route("/api/compare-teams", post(post_compare_teams))
        .route("/api/balanced-teams", post(post_balanced_teams))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::{AppConfig, Roster};
    use crate::database;
    use crate::domain::RosterPlayer;
    use crate::rating::{compute_metrics, PlayerProfile, RatingFilter, RatingPoint};

    fn test_state() -> Arc<AppState> {
        let players = (0..8)
            .map(|i| RosterPlayer { name: format!("P{}", i), profile_id: 100 + i })
            .collect();
        Arc::new(AppState {
            pool: database::create_memory_pool().unwrap(),
            config: AppConfig::new(),
            roster: Roster::new(players).unwrap(),
        })
    }

    fn profile(name: &str, rating: f64) -> PlayerProfile {
        let point = RatingPoint::parse("2025-01-01", &json!(rating)).unwrap();
        PlayerProfile::new(name, compute_metrics(&[point], RatingFilter::All).unwrap())
    }

    fn all_metrics(ratings: &[f64]) -> Value {
        let profiles: Vec<_> = ratings
            .iter()
            .enumerate()
            .map(|(i, r)| profile(&format!("P{}", i), *r))
            .collect();
        serde_json::to_value(profiles).unwrap()
    }

    async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = create_router(test_state()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_roster_route() {
        let request = Request::builder().uri("/api/roster").body(Body::empty()).unwrap();
        let response = create_router(test_state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.as_array().unwrap().len(), 8);
        assert_eq!(body[0]["profileId"], 100);
    }

    #[tokio::test]
    async fn test_compare_teams_route() {
        let (status, body) = post(
            "/api/compare-teams",
            json!({
                "teamA": ["P0"],
                "teamB": ["P1"],
                "allMetrics": all_metrics(&[1300.0, 1100.0]),
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let expected_a = body["expectedA"].as_f64().unwrap();
        assert!((expected_a - 0.7597).abs() < 1e-4);
        assert!(body["seriesProbabilities"]["3-0"].as_f64().is_some());
    }

    #[tokio::test]
    async fn test_compare_teams_with_unknown_names_is_unprocessable() {
        let (status, body) = post(
            "/api/compare-teams",
            json!({
                "teamA": ["Ghost"],
                "teamB": ["P1"],
                "allMetrics": all_metrics(&[1300.0, 1100.0]),
            }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_balanced_teams_route() {
        let ratings = [1000.0, 1000.0, 1200.0, 1200.0, 1400.0, 1400.0, 1600.0, 1600.0];
        let names: Vec<_> = (0..8).map(|i| format!("P{}", i)).collect();
        let (status, body) = post(
            "/api/balanced-teams",
            json!({
                "selectedPlayers": names,
                "allMetrics": all_metrics(&ratings),
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["teamA"].as_array().unwrap().len(), 4);
        assert_eq!(body["teamB"].as_array().unwrap().len(), 4);
        assert_eq!(body["winProbability"], 0.5);
        assert_eq!(body["probabilitySource"], "nominal");
        assert!(body.get("teamARoles").is_none());
    }

    #[tokio::test]
    async fn test_balanced_teams_needs_eight_players() {
        let names: Vec<_> = (0..7).map(|i| format!("P{}", i)).collect();
        let (status, body) = post(
            "/api/balanced-teams",
            json!({
                "selectedPlayers": names,
                "allMetrics": all_metrics(&[1000.0; 8]),
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("8"));
    }

    #[tokio::test]
    async fn test_unknown_filter_is_rejected_before_fetching() {
        let (status, _) = post("/api/player-metrics", json!({ "filterType": "1999" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
