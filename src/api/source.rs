use anyhow::Result;
use serde_json::Value;
use std::collections::BTreeMap;
use std::future::Future;

/// Anything that can hand back a player's raw rating history
pub trait RatingHistorySource {
    fn fetch_rating_history(
        &mut self,
        profile_id: i64,
    ) -> impl Future<Output = Result<BTreeMap<String, Value>>> + Send;
}
