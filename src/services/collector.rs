use anyhow::{Context, Result};
use log::{info, warn};

use crate::api::source::RatingHistorySource;
use crate::api::InsightsClient;
use crate::config::settings::FormSettings;
use crate::config::{AppConfig, Roster};
use crate::database::{self, matches, DbConn, DbPool};
use crate::domain::RosterPlayer;
use crate::errors::{player_context, BalanceError};
use crate::fetchers::PositionScraper;
use crate::rating::{self, ModifierToggles, PlayerProfile, RatingFilter};

/// Turns roster entries into player profiles by fetching each history
pub struct PlayerCollector<S> {
    source: S,
}

impl<S: RatingHistorySource> PlayerCollector<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetch and summarise every player in order. The first fetch failure
    /// aborts the batch; players without any history are skipped.
    pub async fn collect(
        &mut self,
        players: &[RosterPlayer],
        filter: RatingFilter,
    ) -> Result<Vec<PlayerProfile>> {
        info!("Collecting metrics for {} players (filter: {})", players.len(), filter);
        let mut profiles = Vec::with_capacity(players.len());

        for player in players {
            let raw = self
                .source
                .fetch_rating_history(player.profile_id)
                .await
                .with_context(|| player_context(&player.name))?;

            match rating::compute_metrics_from_raw(&raw, filter) {
                Ok(metrics) => profiles.push(PlayerProfile::new(player.name.clone(), metrics)),
                Err(BalanceError::NoData) => warn!("No data for {}", player.name),
                Err(e) => return Err(anyhow::Error::new(e).context(player_context(&player.name))),
            }
        }

        info!("  → Collected {} profiles", profiles.len());
        Ok(profiles)
    }
}

/// Attach position and recent-form figures from the match log to each
/// profile, for whichever modifiers are switched on.
pub fn enrich_from_match_log(
    conn: &mut DbConn,
    roster: &Roster,
    profiles: &mut [PlayerProfile],
    settings: &FormSettings,
    toggles: ModifierToggles,
) -> Result<()> {
    if !toggles.any() {
        return Ok(());
    }

    for profile in profiles.iter_mut() {
        let Some(player) = roster.find(&profile.name) else {
            warn!("{} is not on the roster, skipping match log lookup", profile.name);
            continue;
        };

        if toggles.use_positions {
            profile.position =
                matches::position_stats(conn, player.profile_id, settings.position_sample)?;
        }
        if toggles.use_recent_performance {
            profile.recent_form = Some(matches::recent_form(
                conn,
                player.profile_id,
                settings.recent_window_days,
            )?);
        }
    }

    Ok(())
}

/// Full pipeline for a set of roster players: rating histories first, then
/// whichever modifier inputs `toggles` asks for.
pub async fn load_profiles(
    config: &AppConfig,
    roster: &Roster,
    pool: &DbPool,
    players: &[RosterPlayer],
    filter: RatingFilter,
    toggles: ModifierToggles,
) -> Result<Vec<PlayerProfile>> {
    let client = InsightsClient::new(&config.insights)?;
    let mut profiles = PlayerCollector::new(client).collect(players, filter).await?;

    if toggles.any() {
        let mut conn = database::get_connection(pool)?;
        enrich_from_match_log(&mut conn, roster, &mut profiles, &config.form, toggles)?;
    }
    if toggles.use_positions {
        let mut scraper = PositionScraper::new(&config.insights)?;
        scrape_missing_positions(&mut scraper, roster, &mut profiles).await;
    }

    Ok(profiles)
}

/// Scrape position stats for profiles that still have none. A failed page
/// leaves the player without a position modifier.
pub async fn scrape_missing_positions(
    scraper: &mut PositionScraper,
    roster: &Roster,
    profiles: &mut [PlayerProfile],
) {
    for profile in profiles.iter_mut().filter(|p| p.position.is_none()) {
        let Some(player) = roster.find(&profile.name) else {
            continue;
        };

        match scraper.fetch_position_stats(player.profile_id).await {
            Ok(position) => profile.position = position,
            Err(e) => warn!("Position stats unavailable for {}: {:#}", profile.name, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{self, setup};
    use crate::domain::MatchRecord;
    use crate::rating::Role;
    use chrono::NaiveDate;
    use serde_json::{json, Value};
    use std::collections::{BTreeMap, HashMap};

    /// Serves canned histories; ids missing from the map fail like a
    /// transport error would.
    struct FakeSource {
        histories: HashMap<i64, BTreeMap<String, Value>>,
        calls: Vec<i64>,
    }

    impl FakeSource {
        fn new() -> Self {
            Self {
                histories: HashMap::new(),
                calls: Vec::new(),
            }
        }

        fn with(mut self, id: i64, entries: &[(&str, Value)]) -> Self {
            let map = entries.iter().map(|(d, r)| (d.to_string(), r.clone())).collect();
            self.histories.insert(id, map);
            self
        }
    }

    impl RatingHistorySource for FakeSource {
        async fn fetch_rating_history(&mut self, profile_id: i64) -> Result<BTreeMap<String, Value>> {
            self.calls.push(profile_id);
            self.histories
                .get(&profile_id)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("HTTP error: 503"))
        }
    }

    fn player(name: &str, profile_id: i64) -> RosterPlayer {
        RosterPlayer {
            name: name.to_string(),
            profile_id,
        }
    }

    #[tokio::test]
    async fn test_collects_in_roster_order() {
        let source = FakeSource::new()
            .with(1, &[("2023-01-01", json!(1000)), ("2025-01-01", json!("1300"))])
            .with(2, &[("2024-03-01", json!(1100))]);
        let mut collector = PlayerCollector::new(source);

        let profiles = collector
            .collect(&[player("A", 1), player("B", 2)], RatingFilter::Year2025)
            .await
            .unwrap();

        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].name, "A");
        assert_eq!(profiles[0].metrics.current, 1300.0);
        assert_eq!(profiles[0].metrics.ratings.len(), 1);
        // B has nothing in 2025 and falls back to the full history
        assert_eq!(profiles[1].metrics.current, 1100.0);
    }

    #[tokio::test]
    async fn test_first_failure_aborts_remaining_players() {
        let source = FakeSource::new()
            .with(1, &[("2024-01-01", json!(1000))])
            .with(3, &[("2024-01-01", json!(1200))]);
        let mut collector = PlayerCollector::new(source);

        let err = collector
            .collect(&[player("A", 1), player("B", 2), player("C", 3)], RatingFilter::All)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Error fetching data for B");
        assert_eq!(collector.source.calls, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_players_without_history_are_skipped() {
        let source = FakeSource::new()
            .with(1, &[])
            .with(2, &[("2024-01-01", json!(1000))]);
        let mut collector = PlayerCollector::new(source);

        let profiles = collector
            .collect(&[player("Empty", 1), player("B", 2)], RatingFilter::All)
            .await
            .unwrap();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].name, "B");
    }

    #[tokio::test]
    async fn test_malformed_history_is_reported_per_player() {
        let source = FakeSource::new().with(1, &[("yesterday", json!(1000))]);
        let mut collector = PlayerCollector::new(source);

        let err = collector.collect(&[player("A", 1)], RatingFilter::All).await.unwrap_err();
        assert_eq!(err.to_string(), "Error fetching data for A");
        assert!(matches!(
            err.root_cause().downcast_ref::<BalanceError>(),
            Some(BalanceError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_enrich_from_match_log() {
        let pool = database::create_memory_pool().unwrap();
        let mut conn = database::get_connection(&pool).unwrap();
        setup::ensure_schema(&mut conn).unwrap();

        let when = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
        for is_won in [true, true, false] {
            matches::insert_match(
                &mut conn,
                &MatchRecord { player_id: 10, position: Role::Flank, is_won, match_time: when },
            )
            .unwrap();
        }

        let roster = Roster::new(vec![player("A", 10), player("B", 20)]).unwrap();
        let metrics = rating::compute_metrics(
            &[rating::RatingPoint::new(when, 1000.0)],
            RatingFilter::All,
        )
        .unwrap();
        let mut profiles = vec![
            PlayerProfile::new("A", metrics.clone()),
            PlayerProfile::new("B", metrics),
        ];

        let toggles = ModifierToggles { use_positions: true, use_recent_performance: true };
        enrich_from_match_log(&mut conn, &roster, &mut profiles, &FormSettings::default(), toggles)
            .unwrap();

        let a_position = profiles[0].position.as_ref().unwrap();
        assert_eq!(a_position.flank_matches, 3);
        assert!(a_position.flank_multiplier > 1.0);
        assert_eq!(profiles[0].recent_form.as_ref().unwrap().total_matches, 3);

        assert!(profiles[1].position.is_none());
        assert_eq!(profiles[1].recent_form.as_ref().unwrap().performance_multiplier, 1.0);
    }
}
