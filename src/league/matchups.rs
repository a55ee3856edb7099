use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::league::Member;
use crate::models::matchup::Matchup;

/// Expected point swing per remaining day, used to pull displayed win
/// probability toward 50 while a week is still in progress. Roughly one
/// active day's score under the default weights.
const DAILY_SWING_POINTS: f64 = 100.0;

/// Result of a finalization attempt.
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct MatchupOutcome {
    pub winner_id: Option<Uuid>,
    pub is_tie: bool,
    pub margin: f64,
    /// True when the matchup was already finalized and this call no-oped.
    pub already_finalized: bool,
}

fn clean_score(score: f64) -> f64 {
    if !score.is_finite() || score < 0.0 {
        0.0
    } else {
        score
    }
}

/// Lock in a week's result and apply it to both members' cumulative
/// records: exactly one of wins/losses/ties increments per player, and
/// each player's weekly score is added to their running total.
///
/// Equal scores are a tie, including 0 vs 0: an empty week is a valid
/// (if unimpressive) result, not an error. Finalizing an already-finalized
/// matchup is a no-op: `is_finalized` acts as the guard so concurrent
/// callers racing through the external at-most-once check cannot
/// double-count records or points.
pub fn finalize_matchup(
    matchup: &mut Matchup,
    player1: &mut Member,
    player2: &mut Member,
    score1: f64,
    score2: f64,
) -> MatchupOutcome {
    if matchup.is_finalized {
        tracing::debug!(
            "Matchup {} already finalized, skipping re-apply",
            matchup.id
        );
        return MatchupOutcome {
            winner_id: matchup.winner_id,
            is_tie: matchup.is_tie,
            margin: (matchup.player1_score - matchup.player2_score).abs(),
            already_finalized: true,
        };
    }

    let score1 = clean_score(score1);
    let score2 = clean_score(score2);

    matchup.player1_score = score1;
    matchup.player2_score = score2;
    matchup.is_tie = score1 == score2;
    matchup.winner_id = if score1 > score2 {
        Some(matchup.player1_id)
    } else if score2 > score1 {
        Some(matchup.player2_id)
    } else {
        None
    };
    matchup.is_finalized = true;

    match matchup.winner_id {
        Some(w) if w == matchup.player1_id => {
            player1.wins += 1;
            player2.losses += 1;
        }
        Some(_) => {
            player2.wins += 1;
            player1.losses += 1;
        }
        None => {
            player1.ties += 1;
            player2.ties += 1;
        }
    }
    player1.total_points += score1;
    player2.total_points += score2;

    tracing::info!(
        "Finalized week {} matchup {}: {:.1} - {:.1} ({})",
        matchup.week_number,
        matchup.id,
        score1,
        score2,
        if matchup.is_tie { "tie" } else { "decided" }
    );

    MatchupOutcome {
        winner_id: matchup.winner_id,
        is_tie: matchup.is_tie,
        margin: (score1 - score2).abs(),
        already_finalized: false,
    }
}

/// Display-only win probability for an in-progress week, in percent.
///
/// With no days remaining the result is settled: 100 ahead, 0 behind, 50
/// tied. While days remain the estimate is pulled toward 50 in proportion
/// to how much scoring time is left, staying strictly between 0 and 100
/// for any non-zero gap. Not authoritative; finalization ignores it.
pub fn win_probability(my_score: f64, their_score: f64, days_remaining: u32) -> f64 {
    let lead = clean_score(my_score) - clean_score(their_score);
    if lead == 0.0 {
        return 50.0;
    }
    if days_remaining == 0 {
        return if lead > 0.0 { 100.0 } else { 0.0 };
    }
    let swing = days_remaining as f64 * DAILY_SWING_POINTS;
    50.0 + 50.0 * lead / (lead.abs() + swing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn member() -> Member {
        Member::new(Uuid::new_v4(), Uuid::new_v4(), "player".into())
    }

    fn fixture() -> (Matchup, Member, Member) {
        let league_id = Uuid::new_v4();
        let mut p1 = member();
        let mut p2 = member();
        p1.league_id = league_id;
        p2.league_id = league_id;
        let matchup = Matchup::new(league_id, 1, p1.id, p2.id);
        (matchup, p1, p2)
    }

    #[test]
    fn higher_score_wins_and_records_update() {
        let (mut matchup, mut p1, mut p2) = fixture();
        let outcome = finalize_matchup(&mut matchup, &mut p1, &mut p2, 120.0, 95.5);

        assert_eq!(outcome.winner_id, Some(p1.id));
        assert!(!outcome.is_tie);
        assert!((outcome.margin - 24.5).abs() < 1e-9);
        assert_eq!((p1.wins, p1.losses, p1.ties), (1, 0, 0));
        assert_eq!((p2.wins, p2.losses, p2.ties), (0, 1, 0));
        assert_eq!(p1.total_points, 120.0);
        assert_eq!(p2.total_points, 95.5);
        assert!(matchup.is_finalized);
    }

    #[test]
    fn equal_scores_are_a_tie_including_zero_zero() {
        let (mut matchup, mut p1, mut p2) = fixture();
        let outcome = finalize_matchup(&mut matchup, &mut p1, &mut p2, 0.0, 0.0);

        assert_eq!(outcome.winner_id, None);
        assert!(outcome.is_tie);
        assert!(matchup.is_tie);
        assert_eq!((p1.wins, p1.losses, p1.ties), (0, 0, 1));
        assert_eq!((p2.wins, p2.losses, p2.ties), (0, 0, 1));
    }

    #[test]
    fn refinalize_is_idempotent() {
        let (mut matchup, mut p1, mut p2) = fixture();
        finalize_matchup(&mut matchup, &mut p1, &mut p2, 80.0, 60.0);
        let second = finalize_matchup(&mut matchup, &mut p1, &mut p2, 80.0, 60.0);

        assert!(second.already_finalized);
        assert_eq!(second.winner_id, Some(p1.id));
        assert_eq!((p1.wins, p1.losses, p1.ties), (1, 0, 0));
        assert_eq!((p2.wins, p2.losses, p2.ties), (0, 1, 0));
        assert_eq!(p1.total_points, 80.0);
        assert_eq!(p2.total_points, 60.0);
    }

    #[test]
    fn corrupt_scores_are_coerced_to_zero() {
        let (mut matchup, mut p1, mut p2) = fixture();
        let outcome = finalize_matchup(&mut matchup, &mut p1, &mut p2, f64::NAN, -50.0);
        assert!(outcome.is_tie);
        assert_eq!(matchup.player1_score, 0.0);
        assert_eq!(matchup.player2_score, 0.0);
    }

    #[test]
    fn win_probability_boundaries() {
        assert_eq!(win_probability(100.0, 50.0, 0), 100.0);
        assert_eq!(win_probability(50.0, 100.0, 0), 0.0);
        assert_eq!(win_probability(75.0, 75.0, 0), 50.0);
        assert_eq!(win_probability(75.0, 75.0, 3), 50.0);
    }

    #[test]
    fn win_probability_interpolates_toward_fifty() {
        let ahead_soon = win_probability(100.0, 50.0, 1);
        let ahead_early = win_probability(100.0, 50.0, 6);
        assert!(ahead_soon > ahead_early);
        assert!(ahead_early > 50.0 && ahead_soon < 100.0);

        let behind = win_probability(50.0, 100.0, 3);
        assert!(behind > 0.0 && behind < 50.0);
    }
}
