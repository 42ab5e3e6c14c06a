//! Rate-limited search driving the discovery and enrichment phases.

pub mod budget;
pub mod prospect;
pub mod rate_limited;

pub use budget::RunBudget;
pub use prospect::ProspectSearcher;
pub use rate_limited::{PacingConfig, RateLimitedSearcher};
