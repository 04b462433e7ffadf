pub mod handlers;
pub mod insights_client;
pub mod models;
pub mod parsers;
pub mod routes;
pub mod source;

pub use insights_client::InsightsClient;
pub use source::RatingHistorySource;
