pub mod collector;
pub mod comparison;
pub mod report;
pub mod server;
