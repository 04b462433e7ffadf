use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::rating::Role;

/// One row of the match log: a single game from one player's perspective
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub player_id: i64,
    pub position: Role,
    pub is_won: bool,
    pub match_time: NaiveDateTime,
}

/// Win/loss counts for one role
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleStats {
    /// 0-100 scale
    pub winrate: f64,
    pub matches: u32,
    pub wins: u32,
}

impl RoleStats {
    pub fn new(winrate: f64, matches: u32, wins: u32) -> Self {
        Self {
            winrate,
            matches,
            wins,
        }
    }

    /// Derive the win rate from counts.
    pub fn from_counts(matches: u32, wins: u32) -> Self {
        let winrate = if matches > 0 {
            wins as f64 / matches as f64 * 100.0
        } else {
            0.0
        };
        Self::new(winrate, matches, wins)
    }

    /// Tally a role's games out of a match sample.
    pub fn tally(matches: &[MatchRecord], role: Role) -> Self {
        let played = matches.iter().filter(|m| m.position == role);
        let (total, wins) = played.fold((0u32, 0u32), |(t, w), m| (t + 1, w + m.is_won as u32));
        Self::from_counts(total, wins)
    }
}

/// Roster entry: display name plus the remote profile id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterPlayer {
    pub name: String,
    pub profile_id: i64,
}
