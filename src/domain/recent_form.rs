use super::models::MatchRecord;
use crate::rating::RecentFormMetrics;

/// Matches at the edge of the window still count half
const DECAY_DAYS: f64 = 120.0;
/// Matches in the window that count as full activity
const FULL_ACTIVITY_MATCHES: f64 = 30.0;
const ACTIVITY_WEIGHT: f64 = 0.3;
const WINRATE_WEIGHT: f64 = 0.7;
const MULTIPLIER_SPREAD: f64 = 0.1;
const MIN_MULTIPLIER: f64 = 0.8;
const MAX_MULTIPLIER: f64 = 1.2;

/// Summarise a player's matches from the recent window.
pub fn calculate_recent_form(matches: &[MatchRecord]) -> RecentFormMetrics {
    if matches.is_empty() {
        return RecentFormMetrics::neutral();
    }

    let total = matches.len();
    let wins = matches.iter().filter(|m| m.is_won).count();

    RecentFormMetrics {
        total_matches: total as u32,
        win_rate: wins as f64 / total as f64 * 100.0,
        performance_multiplier: performance_multiplier(matches),
    }
}

/// Multiplier in [0.8, 1.2] mixing activity with a time-weighted win rate.
pub fn performance_multiplier(matches: &[MatchRecord]) -> f64 {
    let Some(most_recent) = matches.iter().map(|m| m.match_time).max() else {
        return 1.0;
    };

    let (weighted_wins, total_weight) = matches.iter().fold((0.0, 0.0), |(wins, total), m| {
        let days_ago = most_recent.signed_duration_since(m.match_time).num_days() as f64;
        let weight = 1.0 - days_ago / DECAY_DAYS;
        let won = if m.is_won { 1.0 } else { 0.0 };
        (wins + weight * won, total + weight)
    });

    if total_weight <= 0.0 {
        return 1.0;
    }

    let weighted_winrate = weighted_wins / total_weight * 100.0;
    let activity = (matches.len() as f64 / FULL_ACTIVITY_MATCHES).min(1.0);
    let winrate_impact = (weighted_winrate - 50.0) / 50.0;

    let score = ACTIVITY_WEIGHT * activity + WINRATE_WEIGHT * winrate_impact;
    (1.0 + score * MULTIPLIER_SPREAD).clamp(MIN_MULTIPLIER, MAX_MULTIPLIER)
}
