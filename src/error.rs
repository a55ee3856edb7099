use thiserror::Error;

/// Errors surfaced by the league engine.
///
/// In-season computations degrade gracefully (bad metrics are sanitized,
/// repeated finalizations no-op); errors are limited to creation-time
/// validation and states the caller should never have reached.
#[derive(Debug, Error)]
pub enum LeagueError {
    #[error("invalid league size: {0} (must be even and between 4 and 14)")]
    InvalidLeagueSize(usize),

    #[error("invalid season length: {0} weeks (must be 6, 8, 10 or 12)")]
    InvalidSeasonLength(u32),

    #[error("invalid league name: {0}")]
    InvalidLeagueName(String),

    #[error("cannot build playoff bracket: {found} qualifiers (need exactly 4)")]
    InsufficientQualifiers { found: usize },

    #[error("invalid bracket state: {0}")]
    InvalidBracket(String),
}
