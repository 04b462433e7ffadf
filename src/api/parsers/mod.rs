pub mod history;

pub use history::parse_rating_history;
