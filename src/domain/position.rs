use super::models::RoleStats;
use crate::rating::PositionMetrics;

// Base adjustment at full experience
const BASE_ADJUSTMENT: f64 = 0.15;
const PREFERENCE_WEIGHT: f64 = 0.6;
const WINRATE_WEIGHT: f64 = 0.4;

/// Turn a player's flank/pocket record into per-role strength multipliers.
///
/// A player who mostly plays one role, or wins noticeably more in it, gets a
/// multiplier above 1.0 there and below 1.0 in the other role. The size of
/// the adjustment grows with the number of games on record.
pub fn calculate_position_multipliers(flank: RoleStats, pocket: RoleStats) -> PositionMetrics {
    let total_matches = flank.matches + pocket.matches;
    if total_matches == 0 {
        return PositionMetrics {
            flank_multiplier: 1.0,
            pocket_multiplier: 1.0,
            flank_matches: 0,
            pocket_matches: 0,
            flank_wins: 0,
            pocket_wins: 0,
            flank_winrate: 0.0,
            pocket_winrate: 0.0,
        };
    }

    let total = total_matches as f64;
    let flank_preference = flank.matches as f64 / total;
    let pocket_preference = pocket.matches as f64 / total;
    let preference_factor = preference_factor(flank_preference.max(pocket_preference));

    let winrate_difference = (flank.winrate - pocket.winrate) / 100.0;
    let winrate_factor = winrate_factor(winrate_difference.abs());

    let base = BASE_ADJUSTMENT * experience_weight(total_matches);

    let flank_multiplier = 1.0
        + base
            * (PREFERENCE_WEIGHT * (flank_preference - 0.5) * preference_factor
                + WINRATE_WEIGHT * winrate_difference * winrate_factor);
    let pocket_multiplier = 1.0
        + base
            * (PREFERENCE_WEIGHT * (pocket_preference - 0.5) * preference_factor
                - WINRATE_WEIGHT * winrate_difference * winrate_factor);

    PositionMetrics {
        flank_multiplier,
        pocket_multiplier,
        flank_matches: flank.matches,
        pocket_matches: pocket.matches,
        flank_wins: flank.wins,
        pocket_wins: pocket.wins,
        flank_winrate: flank.winrate,
        pocket_winrate: pocket.winrate,
    }
}

fn preference_factor(dominant_share: f64) -> f64 {
    if dominant_share > 0.75 {
        1.5
    } else if dominant_share > 0.65 {
        1.2
    } else {
        1.0
    }
}

fn winrate_factor(abs_difference: f64) -> f64 {
    if abs_difference > 0.15 {
        2.0
    } else if abs_difference > 0.10 {
        1.8
    } else if abs_difference > 0.06 {
        1.5
    } else {
        1.0
    }
}

/// Steep curve from 0.4 below 40 games, games/50 capped at 1.0 from there.
fn experience_weight(total_matches: u32) -> f64 {
    let total = total_matches as f64;
    if total_matches < 40 {
        0.4 + (total / 40.0) * 0.55
    } else {
        (total / 50.0).min(1.0)
    }
}
