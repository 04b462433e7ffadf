use anyhow::Result;
use log::{debug, info};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::api::parsers;
use crate::api::source::RatingHistorySource;
use crate::config::settings::InsightsSettings;
use crate::errors::with_parse_context;
use crate::http::RateLimitedClient;

/// Client for the public rating-history endpoint
pub struct InsightsClient {
    client: RateLimitedClient,
    base_url: String,
    ladder: u32,
}

impl InsightsClient {
    pub fn new(settings: &InsightsSettings) -> Result<Self> {
        let client = RateLimitedClient::new(
            settings.user_agent,
            settings.timeout_secs,
            settings.rate_limit_ms,
        )?;
        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            ladder: settings.ladder,
        })
    }

    /// Fetch the `date -> rating` history of one profile
    pub async fn fetch_rating_history(&mut self, profile_id: i64) -> Result<BTreeMap<String, Value>> {
        let url = self.build_history_url(profile_id);
        info!("Fetching rating history for profile {}", profile_id);

        let text = self.client.get_text(&url).await?;
        let data: Value = with_parse_context(serde_json::from_str(&text), "rating history JSON")?;

        let history = parsers::parse_rating_history(data)?;
        debug!("  → {} history entries", history.len());
        Ok(history)
    }

    // --- Helper Methods ---

    fn build_history_url(&self, profile_id: i64) -> String {
        format!("{}/user/{}/elo-history/{}/", self.base_url, profile_id, self.ladder)
    }
}

impl RatingHistorySource for InsightsClient {
    async fn fetch_rating_history(&mut self, profile_id: i64) -> Result<BTreeMap<String, Value>> {
        InsightsClient::fetch_rating_history(self, profile_id).await
    }
}
