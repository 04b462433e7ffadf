pub mod position_scraper;

pub use position_scraper::PositionScraper;
