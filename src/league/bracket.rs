use uuid::Uuid;

use crate::error::LeagueError;
use crate::models::league::{League, Member};
use crate::models::matchup::{PlayoffMatch, PlayoffRound};

fn clean_score(score: f64) -> f64 {
    if !score.is_finite() || score < 0.0 {
        0.0
    } else {
        score
    }
}

fn member_by_id(members: &mut [Member], id: Uuid) -> Option<&mut Member> {
    members.iter_mut().find(|m| m.id == id)
}

/// Build the two semifinals from the seeded field: seed 1 vs seed 4
/// (match 1) and seed 2 vs seed 3 (match 2), both in the week after the
/// regular season. The pairing is fixed at build time and never reseeded
/// after upsets. The higher seed is always `player1`.
pub fn build_semifinals(
    league: &League,
    seeded: &[Member],
) -> Result<[PlayoffMatch; 2], LeagueError> {
    if seeded.len() != 4 {
        return Err(LeagueError::InsufficientQualifiers {
            found: seeded.len(),
        });
    }

    let mut by_seed: [Option<&Member>; 4] = [None; 4];
    for member in seeded {
        match member.playoff_seed {
            Some(s @ 1..=4) => by_seed[s as usize - 1] = Some(member),
            _ => {
                return Err(LeagueError::InvalidBracket(format!(
                    "member {} has no valid playoff seed",
                    member.id
                )))
            }
        }
    }
    let seeds: Vec<&Member> = by_seed
        .into_iter()
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| LeagueError::InvalidBracket("duplicate playoff seeds".into()))?;

    let week = league.season_length_weeks + 1;
    tracing::info!(
        "Building semifinals for league {} in week {}: 1v4, 2v3",
        league.id,
        week
    );

    Ok([
        PlayoffMatch::new(league.id, PlayoffRound::Semifinal, 1, seeds[0].id, seeds[3].id, week),
        PlayoffMatch::new(league.id, PlayoffRound::Semifinal, 2, seeds[1].id, seeds[2].id, week),
    ])
}

/// Finalize a bracket match. Unlike regular-season matchups a bracket
/// match must produce a winner, so an exact tie goes to the `player1`
/// slot: the higher seed in a semifinal, and semifinal 1's winner in the
/// final. Idempotent once finalized.
pub fn finalize_playoff_match(
    playoff_match: &mut PlayoffMatch,
    score1: f64,
    score2: f64,
) -> Option<Uuid> {
    if playoff_match.is_finalized {
        return playoff_match.winner_id;
    }

    let score1 = clean_score(score1);
    let score2 = clean_score(score2);
    playoff_match.player1_score = score1;
    playoff_match.player2_score = score2;
    playoff_match.winner_id = Some(if score2 > score1 {
        playoff_match.player2_id
    } else {
        playoff_match.player1_id
    });
    playoff_match.is_finalized = true;

    tracing::info!(
        "Finalized {} match {}: {:.1} - {:.1}",
        playoff_match.round,
        playoff_match.match_number,
        score1,
        score2
    );
    playoff_match.winner_id
}

/// Pair the two semifinal winners into the final (the week after the
/// semifinals) and eliminate the losers, who play no further matches.
pub fn advance_to_final(
    league: &League,
    semifinal1: &PlayoffMatch,
    semifinal2: &PlayoffMatch,
    members: &mut [Member],
) -> Result<PlayoffMatch, LeagueError> {
    let (w1, w2) = match (semifinal1.winner_id, semifinal2.winner_id) {
        (Some(w1), Some(w2)) if semifinal1.is_finalized && semifinal2.is_finalized => (w1, w2),
        _ => {
            return Err(LeagueError::InvalidBracket(
                "both semifinals must be finalized before the final".into(),
            ))
        }
    };

    for semifinal in [semifinal1, semifinal2] {
        if let Some(loser) = semifinal.loser_id() {
            if let Some(member) = member_by_id(members, loser) {
                member.is_eliminated = true;
                tracing::debug!("Eliminated {} in the semifinals", member.display_name);
            }
        }
    }

    let week = league.season_length_weeks + 2;
    tracing::info!("Advancing league {} to the final in week {}", league.id, week);
    Ok(PlayoffMatch::new(league.id, PlayoffRound::Final, 1, w1, w2, week))
}

/// Crown the champion from the finalized final: sets `champion_id`,
/// deactivates the league, and eliminates the runner-up. Irreversible:
/// once a champion is recorded, repeat calls return it without touching
/// anything.
pub fn determine_champion(
    league: &mut League,
    final_match: &PlayoffMatch,
    members: &mut [Member],
) -> Result<Uuid, LeagueError> {
    if let Some(existing) = league.champion_id {
        return Ok(existing);
    }

    let champion_id = match final_match.winner_id {
        Some(w) if final_match.is_finalized && final_match.round == PlayoffRound::Final => w,
        _ => {
            return Err(LeagueError::InvalidBracket(
                "final must be finalized before crowning a champion".into(),
            ))
        }
    };

    if let Some(loser) = final_match.loser_id() {
        if let Some(member) = member_by_id(members, loser) {
            member.is_eliminated = true;
        }
    }

    league.champion_id = Some(champion_id);
    league.is_active = false;
    tracing::info!("League {} champion: {}", league.id, champion_id);
    Ok(champion_id)
}

/// Which playoff round a league is in, for resuming after interruption:
/// 0 with no playoff matches recorded, 1 while any semifinal is
/// unfinalized, 2 once both semifinals are finalized (whether or not the
/// final exists yet).
pub fn detect_round(matches: &[PlayoffMatch]) -> u8 {
    if matches.is_empty() {
        return 0;
    }
    let semifinal_open = matches
        .iter()
        .any(|m| m.round == PlayoffRound::Semifinal && !m.is_finalized);
    if semifinal_open {
        1
    } else {
        2
    }
}
