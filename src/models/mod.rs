pub mod league;
pub mod matchup;
pub mod metrics;

pub use league::*;
pub use matchup::*;
pub use metrics::*;
