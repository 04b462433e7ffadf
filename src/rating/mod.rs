pub mod aggregation;
pub mod balance;
pub mod metrics;
pub mod modifiers;
pub mod probability;
pub mod types;

pub use aggregation::aggregate_team;
pub use balance::{BalanceResult, ProbabilitySource, TeamMember, find_balanced_teams};
pub use metrics::{compute_metrics, compute_metrics_from_raw};
pub use modifiers::apply_modifiers;
pub use probability::{SeriesOutcome, expected_win_probability, series_outcome_distribution};
pub use types::{
    ModifierToggles, PlayerMetrics, PlayerProfile, PositionMetrics, RatingFilter, RatingPoint,
    RecentFormMetrics, Role, TeamMetrics,
};
