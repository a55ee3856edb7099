use chrono::{DateTime, Utc};

use crate::league::playoffs;
use crate::league::timing::TimingService;
use crate::models::league::{League, SeasonPhase};

/// Season phase sequencing. The phase itself is always derived from the
/// league record plus the roster count; transition functions mutate the
/// record exactly once each, in order, and no phase is ever re-entered.
pub struct SeasonStateMachine {
    timing: TimingService,
}

impl Default for SeasonStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl SeasonStateMachine {
    pub fn new() -> Self {
        Self {
            timing: TimingService::new(),
        }
    }

    /// Derive the current phase: Forming until the roster fills,
    /// Scheduled until the start date arrives, InSeason through the
    /// regular weeks, Playoffs once generated, Complete once a champion
    /// is crowned.
    pub fn phase(&self, league: &League, member_count: usize, now: DateTime<Utc>) -> SeasonPhase {
        if league.champion_id.is_some() || !league.is_active {
            return SeasonPhase::Complete;
        }
        if league.playoffs_started {
            return SeasonPhase::Playoffs;
        }
        match league.start_date {
            None => {
                debug_assert!(member_count <= league.max_players);
                SeasonPhase::Forming
            }
            Some(start) if now < start => SeasonPhase::Scheduled,
            Some(_) => SeasonPhase::InSeason,
        }
    }

    /// Forming → Scheduled. Fires exactly once, the first time the member
    /// count reaches `max_players`: sets the start date to the next Monday
    /// at 00:00 UTC. Returns whether the transition fired.
    pub fn handle_member_joined(
        &self,
        league: &mut League,
        member_count: usize,
        now: DateTime<Utc>,
    ) -> bool {
        if league.start_date.is_some() || member_count < league.max_players {
            return false;
        }
        let start = self.timing.next_monday(now);
        league.start_date = Some(start);
        tracing::info!(
            "League {} roster full ({} players), season starts {}",
            league.id,
            member_count,
            start
        );
        true
    }

    /// Move to the next week after a finalized one. Weeks finalize
    /// sequentially; past the regular season this walks through the two
    /// playoff weeks.
    pub fn advance_week(&self, league: &mut League) {
        if !league.is_active {
            return;
        }
        league.current_week += 1;
        tracing::debug!("League {} advanced to week {}", league.id, league.current_week);
    }

    /// InSeason → Playoffs, gated by the qualification precondition.
    /// Fires exactly once; repeat calls observe `playoffs_started` and
    /// no-op. Returns whether the transition fired.
    pub fn start_playoffs(&self, league: &mut League, member_count: usize) -> bool {
        if !playoffs::should_start_playoffs(
            league.current_week,
            league.season_length_weeks,
            league.playoffs_started,
            Some(member_count),
        ) {
            return false;
        }
        league.playoffs_started = true;
        tracing::info!("League {} entering playoffs", league.id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn league() -> League {
        League::new("phases".into(), "ABC234".into(), 4, 6, None)
    }

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn forming_until_roster_full() {
        let machine = SeasonStateMachine::new();
        let mut league = league();
        let now = utc(2024, 1, 3);

        assert_eq!(machine.phase(&league, 2, now), SeasonPhase::Forming);
        assert!(!machine.handle_member_joined(&mut league, 3, now));
        assert_eq!(league.start_date, None);

        assert!(machine.handle_member_joined(&mut league, 4, now));
        assert!(league.start_date.is_some());
        assert_eq!(machine.phase(&league, 4, now), SeasonPhase::Scheduled);

        // Transition fired once; a rejoin or recount does not move the date.
        let original_start = league.start_date;
        assert!(!machine.handle_member_joined(&mut league, 4, utc(2024, 2, 1)));
        assert_eq!(league.start_date, original_start);
    }

    #[test]
    fn scheduled_becomes_in_season_at_start_date() {
        let machine = SeasonStateMachine::new();
        let mut league = league();
        machine.handle_member_joined(&mut league, 4, utc(2024, 1, 3));

        let start = league.start_date.unwrap();
        assert_eq!(
            machine.phase(&league, 4, start - chrono::Duration::hours(1)),
            SeasonPhase::Scheduled
        );
        assert_eq!(machine.phase(&league, 4, start), SeasonPhase::InSeason);
    }

    #[test]
    fn playoffs_start_once_after_regular_season() {
        let machine = SeasonStateMachine::new();
        let mut league = league();
        machine.handle_member_joined(&mut league, 4, utc(2024, 1, 3));

        for _ in 0..6 {
            assert!(!machine.start_playoffs(&mut league, 4));
            machine.advance_week(&mut league);
        }
        assert_eq!(league.current_week, 7);
        assert!(machine.start_playoffs(&mut league, 4));
        assert_eq!(
            machine.phase(&league, 4, utc(2024, 6, 1)),
            SeasonPhase::Playoffs
        );

        // Idempotent: a second trigger no-ops.
        assert!(!machine.start_playoffs(&mut league, 4));
    }

    #[test]
    fn complete_phase_once_champion_is_set() {
        let machine = SeasonStateMachine::new();
        let mut league = league();
        league.playoffs_started = true;
        league.current_week = 8;
        league.champion_id = Some(uuid::Uuid::new_v4());
        league.is_active = false;

        assert_eq!(machine.phase(&league, 4, utc(2024, 6, 1)), SeasonPhase::Complete);
        // Week advancement is frozen for completed leagues.
        machine.advance_week(&mut league);
        assert_eq!(league.current_week, 8);
    }
}
