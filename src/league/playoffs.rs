use crate::error::LeagueError;
use crate::league::standings;
use crate::models::league::Member;

/// Size of the playoff field. Brackets other than a four-player
/// single-elimination are not supported.
pub const PLAYOFF_FIELD_SIZE: usize = 4;

/// Whether the playoff transition should fire.
///
/// True only when the regular season is exhausted, playoffs have not
/// already been generated, and the roster (when known) can field a full
/// bracket. The `already_started` check makes the transition idempotent:
/// periodic checks and racing clients all observe at most one start.
pub fn should_start_playoffs(
    current_week: u32,
    season_length: u32,
    already_started: bool,
    player_count: Option<usize>,
) -> bool {
    current_week > season_length
        && !already_started
        && player_count.map_or(true, |n| n >= PLAYOFF_FIELD_SIZE)
}

/// Select the playoff field: the top four members by standings rank.
/// Fails fast when fewer than four members are eligible, since a league can
/// never field playoffs short-handed.
pub fn qualify(members: &[Member]) -> Result<Vec<Member>, LeagueError> {
    if members.len() < PLAYOFF_FIELD_SIZE {
        return Err(LeagueError::InsufficientQualifiers {
            found: members.len(),
        });
    }
    let mut qualifiers = standings::rank(members);
    qualifiers.truncate(PLAYOFF_FIELD_SIZE);
    Ok(qualifiers)
}

/// Assign seeds 1..=4 to qualifiers in ranked order.
pub fn seed(qualifiers: &mut [Member]) {
    for (i, member) in qualifiers.iter_mut().take(PLAYOFF_FIELD_SIZE).enumerate() {
        member.playoff_seed = Some(i as u8 + 1);
        tracing::debug!("Seeded {} at #{}", member.display_name, i + 1);
    }
}
