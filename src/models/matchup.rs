use serde::{Deserialize, Serialize};
use uuid::Uuid;
use std::fmt;

/// One head-to-head pairing for one regular-season week.
///
/// The player pair is unordered but the ordering fixed at creation is
/// canonical from then on. Created once per scheduled pairing per week and
/// finalized exactly once; `is_finalized` guards re-finalization.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Matchup {
    pub id: Uuid,
    pub league_id: Uuid,
    pub week_number: u32,
    pub player1_id: Uuid,
    pub player2_id: Uuid,
    pub player1_score: f64,
    pub player2_score: f64,
    pub winner_id: Option<Uuid>,
    pub is_tie: bool,
    pub is_finalized: bool,
}

impl Matchup {
    pub fn new(league_id: Uuid, week_number: u32, player1_id: Uuid, player2_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            league_id,
            week_number,
            player1_id,
            player2_id,
            player1_score: 0.0,
            player2_score: 0.0,
            winner_id: None,
            is_tie: false,
            is_finalized: false,
        }
    }
}

/// Playoff round: two semifinals, then one final.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PlayoffRound {
    Semifinal = 1,
    Final = 2,
}

impl fmt::Display for PlayoffRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayoffRound::Semifinal => write!(f, "semifinal"),
            PlayoffRound::Final => write!(f, "final"),
        }
    }
}

/// One single-elimination bracket match.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlayoffMatch {
    pub id: Uuid,
    pub league_id: Uuid,
    pub round: PlayoffRound,
    /// 1 or 2 within the semifinal round, always 1 for the final.
    pub match_number: u8,
    pub player1_id: Uuid,
    pub player2_id: Uuid,
    pub player1_score: f64,
    pub player2_score: f64,
    pub winner_id: Option<Uuid>,
    pub is_finalized: bool,
    pub week_number: u32,
}

impl PlayoffMatch {
    pub fn new(
        league_id: Uuid,
        round: PlayoffRound,
        match_number: u8,
        player1_id: Uuid,
        player2_id: Uuid,
        week_number: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            league_id,
            round,
            match_number,
            player1_id,
            player2_id,
            player1_score: 0.0,
            player2_score: 0.0,
            winner_id: None,
            is_finalized: false,
            week_number,
        }
    }

    /// The non-winning side of a finalized match, if any.
    pub fn loser_id(&self) -> Option<Uuid> {
        self.winner_id.map(|w| {
            if w == self.player1_id {
                self.player2_id
            } else {
                self.player1_id
            }
        })
    }
}
