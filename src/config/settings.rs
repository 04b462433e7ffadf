use crate::rating::RatingFilter;

#[derive(Debug, Clone)]
pub struct BalanceSettings {
    pub default_filter: RatingFilter,
}

impl Default for BalanceSettings {
    fn default() -> Self {
        Self {
            default_filter: RatingFilter::All,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InsightsSettings {
    pub rate_limit_ms: u64,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub base_url: String,
    /// Leaderboard whose rating history is fetched (3 = team random map)
    pub ladder: u32,
}

impl Default for InsightsSettings {
    fn default() -> Self {
        Self {
            rate_limit_ms: 250,
            user_agent: "ScrimBalancer/1.0",
            timeout_secs: 30,
            base_url: "https://www.aoe2insights.com".to_string(),
            ladder: 3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormSettings {
    /// Number of most recent matches feeding the position multipliers
    pub position_sample: usize,
    pub recent_window_days: i64,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            position_sample: 60,
            recent_window_days: 60,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub balance: BalanceSettings,
    pub insights: InsightsSettings,
    pub form: FormSettings,
    pub database_path: String,
    pub roster_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            balance: BalanceSettings::default(),
            insights: InsightsSettings::default(),
            form: FormSettings::default(),
            database_path: "scrim_matches.db".to_string(),
            roster_path: "roster.json".to_string(),
        }
    }

    /// Defaults overridden by `DATABASE_PATH`, `ROSTER_PATH` and
    /// `INSIGHTS_BASE_URL` when set.
    pub fn from_env() -> Self {
        let mut config = Self::new();
        if let Ok(path) = std::env::var("DATABASE_PATH") {
            config.database_path = path;
        }
        if let Ok(path) = std::env::var("ROSTER_PATH") {
            config.roster_path = path;
        }
        if let Ok(url) = std::env::var("INSIGHTS_BASE_URL") {
            config.insights.base_url = url;
        }
        config
    }
}
