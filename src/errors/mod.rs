use anyhow::Context as _;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BalanceError>;

/// Failures raised by the rating core. Every variant is local and
/// recoverable; callers decide how to report them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BalanceError {
    /// The rating history was empty, even after the filter fallback
    #[error("no rating data available")]
    NoData,

    /// Aggregation was asked to combine zero players
    #[error("cannot aggregate an empty team")]
    EmptyTeam,

    /// Non-finite ratings, malformed dates, wrong roster size and similar
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl BalanceError {
    pub fn invalid(message: impl Into<String>) -> Self {
        BalanceError::InvalidInput(message.into())
    }
}

/// Add context to fetch errors
pub fn fetch_context(url: &str) -> String {
    format!("Failed to fetch from: {}", url)
}

/// Add context to parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

/// Add context to per-player failures
pub fn player_context(name: &str) -> String {
    format!("Error fetching data for {}", name)
}

/// Wrap result with fetch context
pub fn with_fetch_context<T, E>(result: std::result::Result<T, E>, url: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(fetch_context(url))
}

/// Wrap result with parse context
pub fn with_parse_context<T, E>(result: std::result::Result<T, E>, data_type: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(parse_context(data_type))
}
