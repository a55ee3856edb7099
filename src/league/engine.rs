use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::LeagueError;
use crate::league::bracket;
use crate::league::matchups::{self, MatchupOutcome};
use crate::league::playoffs;
use crate::league::schedule;
use crate::league::scoring;
use crate::league::season::SeasonStateMachine;
use crate::league::validation::{generate_join_code, LeagueValidator};
use crate::models::league::{League, Member, SeasonPhase};
use crate::models::matchup::{Matchup, PlayoffMatch, PlayoffRound};
use crate::models::metrics::{HealthMetrics, ScoringConfig, WeeklyScore};

/// Main engine facade orchestrating the season lifecycle. Owns no state:
/// every operation takes the current league records explicitly and
/// returns or mutates them in place, leaving reads and writes to the
/// calling persistence layer. The caller is also responsible for the
/// at-most-once guard around finalize and playoff-start (a conditional
/// update on `is_finalized` / `playoffs_started`); within this engine
/// those flags make repeated application a no-op.
pub struct LeagueEngine {
    validator: LeagueValidator,
    state_machine: SeasonStateMachine,
}

impl Default for LeagueEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LeagueEngine {
    pub fn new() -> Self {
        Self {
            validator: LeagueValidator::new(),
            state_machine: SeasonStateMachine::new(),
        }
    }

    /// Validate creation parameters and mint a league with a fresh join
    /// code. The roster is empty; the season stays in Forming until
    /// `handle_member_joined` sees it fill.
    pub fn create_league(
        &self,
        name: &str,
        max_players: usize,
        season_length_weeks: u32,
        scoring_config: Option<ScoringConfig>,
    ) -> Result<League, LeagueError> {
        let name = self.validator.validate_league_name(name)?;
        self.validator.validate_league_size(max_players)?;
        self.validator.validate_season_length(season_length_weeks)?;

        let league = League::new(
            name,
            generate_join_code(),
            max_players,
            season_length_weeks,
            scoring_config,
        );
        tracing::info!(
            "Created league {} ({} players, {} weeks)",
            league.id,
            max_players,
            season_length_weeks
        );
        Ok(league)
    }

    /// Derived season phase; see `SeasonStateMachine::phase`.
    pub fn phase(&self, league: &League, member_count: usize, now: DateTime<Utc>) -> SeasonPhase {
        self.state_machine.phase(league, member_count, now)
    }

    /// Roster join event. Returns true when this join filled the roster
    /// and scheduled the season.
    pub fn handle_member_joined(
        &self,
        league: &mut League,
        member_count: usize,
        now: DateTime<Utc>,
    ) -> bool {
        self.state_machine
            .handle_member_joined(league, member_count, now)
    }

    /// Materialize the full regular-season fixture list as matchup
    /// records, one per pairing per week.
    pub fn build_season_schedule(
        &self,
        league: &League,
        member_ids: &[Uuid],
    ) -> Result<Vec<Matchup>, LeagueError> {
        let scheduled = schedule::generate_schedule(member_ids, league.season_length_weeks)?;
        Ok(scheduled
            .into_iter()
            .map(|s| Matchup::new(league.id, s.week, s.player1, s.player2))
            .collect())
    }

    /// Aggregate one member's daily reads into their weekly score under
    /// the league's scoring config. Bad reads are sanitized, never
    /// rejected; a week with no data scores zero.
    pub fn score_week(
        &self,
        league: &League,
        member_id: Uuid,
        week_number: u32,
        daily_metrics: &[HealthMetrics],
    ) -> WeeklyScore {
        let metrics = scoring::aggregate_weekly_metrics(daily_metrics);
        let total_points = scoring::calculate_points(&metrics, league.scoring_config.as_ref());
        WeeklyScore {
            member_id,
            week_number,
            metrics,
            total_points,
        }
    }

    /// Finalize every matchup of the league's current week from the given
    /// member-id → weekly-points map, then advance the week. Members with
    /// no submitted score count as zero. Already-finalized matchups are
    /// skipped, so replaying a week cannot double-count.
    pub fn finalize_week(
        &self,
        league: &mut League,
        week_matchups: &mut [Matchup],
        members: &mut [Member],
        weekly_points: &HashMap<Uuid, f64>,
    ) -> Vec<MatchupOutcome> {
        let week = league.current_week;
        let mut outcomes = Vec::with_capacity(week_matchups.len());

        for matchup in week_matchups.iter_mut().filter(|m| m.week_number == week) {
            let score1 = weekly_points.get(&matchup.player1_id).copied().unwrap_or(0.0);
            let score2 = weekly_points.get(&matchup.player2_id).copied().unwrap_or(0.0);

            let (p1_idx, p2_idx) = match (
                members.iter().position(|m| m.id == matchup.player1_id),
                members.iter().position(|m| m.id == matchup.player2_id),
            ) {
                (Some(a), Some(b)) if a != b => (a, b),
                _ => {
                    tracing::warn!("Matchup {} references unknown members, skipping", matchup.id);
                    continue;
                }
            };
            // Split so we can hold two disjoint mutable member records.
            let (p1, p2) = if p1_idx < p2_idx {
                let (left, right) = members.split_at_mut(p2_idx);
                (&mut left[p1_idx], &mut right[0])
            } else {
                let (left, right) = members.split_at_mut(p1_idx);
                (&mut right[0], &mut left[p2_idx])
            };

            outcomes.push(matchups::finalize_matchup(matchup, p1, p2, score1, score2));
        }

        self.state_machine.advance_week(league);
        outcomes
    }

    /// Start playoffs if the gate allows: qualify the top four, write
    /// their seeds back onto the roster, and build the semifinals.
    /// Returns `Ok(None)` when the gate says not yet (or already done).
    pub fn maybe_start_playoffs(
        &self,
        league: &mut League,
        members: &mut [Member],
    ) -> Result<Option<[PlayoffMatch; 2]>, LeagueError> {
        if !self.state_machine.start_playoffs(league, members.len()) {
            return Ok(None);
        }

        let mut qualifiers = playoffs::qualify(members)?;
        playoffs::seed(&mut qualifiers);
        for q in &qualifiers {
            if let Some(member) = members.iter_mut().find(|m| m.id == q.id) {
                member.playoff_seed = q.playoff_seed;
            }
        }

        let semifinals = bracket::build_semifinals(league, &qualifiers)?;
        Ok(Some(semifinals))
    }

    /// Progress the bracket after match results land: once both
    /// semifinals are finalized, create the final; once the final is
    /// finalized, crown the champion and close the season. Returns the
    /// champion id when the season completes.
    pub fn progress_playoffs(
        &self,
        league: &mut League,
        playoff_matches: &mut Vec<PlayoffMatch>,
        members: &mut [Member],
    ) -> Result<Option<Uuid>, LeagueError> {
        if bracket::detect_round(playoff_matches) != 2 {
            return Ok(None);
        }

        let final_match = playoff_matches
            .iter()
            .find(|m| m.round == PlayoffRound::Final)
            .cloned();

        match final_match {
            None => {
                let semis: Vec<PlayoffMatch> = playoff_matches
                    .iter()
                    .filter(|m| m.round == PlayoffRound::Semifinal)
                    .cloned()
                    .collect();
                if semis.len() != 2 {
                    return Err(LeagueError::InvalidBracket(format!(
                        "expected 2 semifinals, found {}",
                        semis.len()
                    )));
                }
                let final_match =
                    bracket::advance_to_final(league, &semis[0], &semis[1], members)?;
                self.state_machine.advance_week(league);
                playoff_matches.push(final_match);
                Ok(None)
            }
            Some(f) if f.is_finalized => {
                let champion = bracket::determine_champion(league, &f, members)?;
                Ok(Some(champion))
            }
            Some(_) => Ok(None),
        }
    }
}
