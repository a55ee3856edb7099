use rand::Rng;

use crate::error::LeagueError;

/// Roster sizes a league may be created with: even, 4 through 14.
pub const ALLOWED_LEAGUE_SIZES: [usize; 6] = [4, 6, 8, 10, 12, 14];

/// Supported regular-season lengths in weeks.
pub const ALLOWED_SEASON_LENGTHS: [u32; 4] = [6, 8, 10, 12];

/// Join-code alphabet: uppercase alphanumerics minus the easily-confused
/// I, L, O, 0 and 1.
const JOIN_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";
const JOIN_CODE_LENGTH: usize = 6;

/// Centralized creation-time validation for leagues. Everything rejected
/// here never reaches the scheduler or the season state machine.
pub struct LeagueValidator;

impl Default for LeagueValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl LeagueValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_league_size(&self, max_players: usize) -> Result<(), LeagueError> {
        if !ALLOWED_LEAGUE_SIZES.contains(&max_players) {
            return Err(LeagueError::InvalidLeagueSize(max_players));
        }
        Ok(())
    }

    pub fn validate_season_length(&self, weeks: u32) -> Result<(), LeagueError> {
        if !ALLOWED_SEASON_LENGTHS.contains(&weeks) {
            return Err(LeagueError::InvalidSeasonLength(weeks));
        }
        Ok(())
    }

    /// Validate and sanitize a league name: trimmed, non-empty, at most
    /// 100 characters, with actual alphanumeric content.
    pub fn validate_league_name(&self, name: &str) -> Result<String, LeagueError> {
        let trimmed: String = name.trim().chars().filter(|&c| c != '\0').collect();
        let trimmed = trimmed.trim().to_string();

        if trimmed.is_empty() {
            return Err(LeagueError::InvalidLeagueName("name cannot be empty".into()));
        }
        if trimmed.len() > 100 {
            return Err(LeagueError::InvalidLeagueName(
                "name too long (max 100 characters)".into(),
            ));
        }
        if !trimmed.chars().any(|c| c.is_alphanumeric()) {
            return Err(LeagueError::InvalidLeagueName(
                "name must contain alphanumeric characters".into(),
            ));
        }
        Ok(trimmed)
    }
}

/// Generate a 6-character join code from the unambiguous alphabet.
/// Uniqueness and lookup are the caller's (database's) responsibility.
pub fn generate_join_code() -> String {
    let mut rng = rand::thread_rng();
    (0..JOIN_CODE_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..JOIN_CODE_ALPHABET.len());
            JOIN_CODE_ALPHABET[idx] as char
        })
        .collect()
}
