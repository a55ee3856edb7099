use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use std::fmt;

use crate::models::metrics::ScoringConfig;

/// One season-long competition instance with a fixed roster.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct League {
    pub id: Uuid,
    pub name: String,
    /// 6-character join code; persistence and lookup belong to the caller.
    pub join_code: String,
    /// Roster size: even, 4..=14.
    pub max_players: usize,
    /// Regular season length: 6, 8, 10 or 12.
    pub season_length_weeks: u32,
    /// 1-indexed; advances past `season_length_weeks` during playoffs.
    pub current_week: u32,
    /// Set when the roster fills (next Monday 00:00 UTC), None while forming.
    pub start_date: Option<DateTime<Utc>>,
    pub playoffs_started: bool,
    pub champion_id: Option<Uuid>,
    pub is_active: bool,
    pub scoring_config: Option<ScoringConfig>,
    pub created_at: DateTime<Utc>,
}

impl League {
    pub fn new(
        name: String,
        join_code: String,
        max_players: usize,
        season_length_weeks: u32,
        scoring_config: Option<ScoringConfig>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            join_code,
            max_players,
            season_length_weeks,
            current_week: 1,
            start_date: None,
            playoffs_started: false,
            champion_id: None,
            is_active: true,
            scoring_config,
            created_at: Utc::now(),
        }
    }
}

/// A player's participation in one league. Record fields are mutated only
/// by matchup finalization; seed and elimination only by the bracket.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Member {
    pub id: Uuid,
    pub league_id: Uuid,
    pub user_id: Uuid,
    pub display_name: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub total_points: f64,
    pub playoff_seed: Option<u8>,
    pub is_eliminated: bool,
    pub joined_at: DateTime<Utc>,
}

impl Member {
    pub fn new(league_id: Uuid, user_id: Uuid, display_name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            league_id,
            user_id,
            display_name,
            wins: 0,
            losses: 0,
            ties: 0,
            total_points: 0.0,
            playoff_seed: None,
            is_eliminated: false,
            joined_at: Utc::now(),
        }
    }

    pub fn games_played(&self) -> u32 {
        self.wins + self.losses + self.ties
    }
}

/// Derived phase of a league's season. Never stored; computed from the
/// league record and roster count so it cannot drift from the data.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum SeasonPhase {
    Forming,
    Scheduled,
    InSeason,
    Playoffs,
    Complete,
}

impl SeasonPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeasonPhase::Forming => "forming",
            SeasonPhase::Scheduled => "scheduled",
            SeasonPhase::InSeason => "in_season",
            SeasonPhase::Playoffs => "playoffs",
            SeasonPhase::Complete => "complete",
        }
    }
}

impl fmt::Display for SeasonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
