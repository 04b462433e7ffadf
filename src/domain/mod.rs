pub mod models;
pub mod position;
pub mod recent_form;

pub use models::{MatchRecord, RoleStats, RosterPlayer};
pub use position::calculate_position_multipliers;
pub use recent_form::calculate_recent_form;
