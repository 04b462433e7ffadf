use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::errors::{BalanceError, Result};

pub type RatingValue = f64;

/// One entry of a player's rating history
#[derive(Debug, Clone, PartialEq)]
pub struct RatingPoint {
    pub date: NaiveDateTime,
    pub rating: RatingValue,
}

impl RatingPoint {
    pub fn new(date: NaiveDateTime, rating: RatingValue) -> Self {
        Self { date, rating }
    }

    /// Build a point from the raw `date -> rating` pair returned by the
    /// history endpoint. Ratings arrive either as numbers or numeric strings.
    pub fn parse(date: &str, rating: &Value) -> Result<Self> {
        let date = parse_history_date(date)?;
        let rating = coerce_rating(rating)?;
        Ok(Self { date, rating })
    }
}

fn parse_history_date(date_str: &str) -> Result<NaiveDateTime> {
    let trimmed = date_str.trim();

    // Keep the wall-clock date as written so entries stay in their own year
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_local());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt);
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt);
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| BalanceError::invalid(format!("malformed date: {}", date_str)))
}

fn coerce_rating(value: &Value) -> Result<RatingValue> {
    let rating = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| BalanceError::invalid(format!("rating is not numeric: {}", value)))?;

    if !rating.is_finite() {
        return Err(BalanceError::invalid(format!("rating is not finite: {}", rating)));
    }
    Ok(rating)
}

/// Which slice of a player's history feeds the metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RatingFilter {
    #[default]
    #[serde(rename = "all")]
    All,
    /// Only entries dated in 2025
    #[serde(rename = "2025")]
    Year2025,
    /// Entries dated 2024 or later
    #[serde(rename = "2024-2025")]
    Since2024,
}

impl RatingFilter {
    pub fn as_str(&self) -> &str {
        match self {
            RatingFilter::All => "all",
            RatingFilter::Year2025 => "2025",
            RatingFilter::Since2024 => "2024-2025",
        }
    }

    pub fn accepts(&self, date: &NaiveDateTime) -> bool {
        match self {
            RatingFilter::All => true,
            RatingFilter::Year2025 => date.year() == 2025,
            RatingFilter::Since2024 => date.year() >= 2024,
        }
    }
}

impl FromStr for RatingFilter {
    type Err = BalanceError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(RatingFilter::All),
            "2025" => Ok(RatingFilter::Year2025),
            "2024-2025" => Ok(RatingFilter::Since2024),
            other => Err(BalanceError::invalid(format!("unknown filter: {}", other))),
        }
    }
}

impl fmt::Display for RatingFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary statistics of one player's rating history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMetrics {
    pub arithmetic_mean: f64,
    pub weighted_average: f64,
    pub max: f64,
    pub current: f64,
    pub trend: f64,
    pub min: f64,
    pub avg: f64,
    pub median: f64,
    /// Ratings in chronological order
    pub ratings: Vec<f64>,
}

/// Team-level summary built from several players' metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMetrics {
    pub arithmetic_mean: f64,
    pub weighted_average: f64,
    pub max: f64,
    pub current: f64,
    pub trend: f64,
    pub min: f64,
    pub avg: f64,
    /// Rating sequence of the middle player after ordering the players'
    /// sequences lexicographically
    pub median_ratings: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Flank,
    Pocket,
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Flank => "flank",
            Role::Pocket => "pocket",
        }
    }
}

impl FromStr for Role {
    type Err = BalanceError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "flank" => Ok(Role::Flank),
            "pocket" => Ok(Role::Pocket),
            other => Err(BalanceError::invalid(format!("unknown position: {}", other))),
        }
    }
}

/// Aggregate role statistics and the multipliers derived from them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionMetrics {
    pub flank_multiplier: f64,
    pub pocket_multiplier: f64,
    pub flank_matches: u32,
    pub pocket_matches: u32,
    pub flank_wins: u32,
    pub pocket_wins: u32,
    /// 0-100 scale
    pub flank_winrate: f64,
    pub pocket_winrate: f64,
}

impl PositionMetrics {
    pub fn multiplier_for(&self, role: Role) -> f64 {
        match role {
            Role::Flank => self.flank_multiplier,
            Role::Pocket => self.pocket_multiplier,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentFormMetrics {
    pub total_matches: u32,
    /// 0-100 scale
    pub win_rate: f64,
    /// Always within [0.8, 1.2]
    pub performance_multiplier: f64,
}

impl RecentFormMetrics {
    pub fn neutral() -> Self {
        Self {
            total_matches: 0,
            win_rate: 0.0,
            performance_multiplier: 1.0,
        }
    }
}

/// Everything the balancer knows about one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub name: String,
    #[serde(flatten)]
    pub metrics: PlayerMetrics,
    #[serde(default)]
    pub position: Option<PositionMetrics>,
    #[serde(default)]
    pub recent_form: Option<RecentFormMetrics>,
}

impl PlayerProfile {
    pub fn new(name: impl Into<String>, metrics: PlayerMetrics) -> Self {
        Self {
            name: name.into(),
            metrics,
            position: None,
            recent_form: None,
        }
    }

    pub fn with_position(mut self, position: PositionMetrics) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_recent_form(mut self, recent_form: RecentFormMetrics) -> Self {
        self.recent_form = Some(recent_form);
        self
    }
}

/// Which optional adjustments are active for a computation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifierToggles {
    pub use_positions: bool,
    pub use_recent_performance: bool,
}

impl ModifierToggles {
    pub fn any(&self) -> bool {
        self.use_positions || self.use_recent_performance
    }
}
