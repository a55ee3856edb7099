use uuid::Uuid;

use crate::error::LeagueError;

/// One scheduled pairing: `player1` vs `player2` in week `week` (1-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledMatchup {
    pub week: u32,
    pub player1: Uuid,
    pub player2: Uuid,
}

/// Generate a round-robin fixture list with the circle method.
///
/// The first player stays fixed; for each week the remaining n-1 players
/// rotate by `week mod (n-1)` positions and position i is paired with
/// position n-1-i. Every player appears exactly once per week and every
/// unordered pair appears exactly once within the first n-1 weeks. For
/// seasons longer than one round-robin cycle the rotation index wraps, so
/// the fixture repeats from week n onward. That repetition is intentional.
///
/// Upstream validation guarantees an even roster of at least 4, but the
/// scheduler still rejects anything else rather than emit byes.
pub fn generate_schedule(
    player_ids: &[Uuid],
    weeks: u32,
) -> Result<Vec<ScheduledMatchup>, LeagueError> {
    let n = player_ids.len();
    if n < 4 || n % 2 != 0 {
        tracing::warn!("Rejecting schedule request for {} players", n);
        return Err(LeagueError::InvalidLeagueSize(n));
    }

    tracing::info!(
        "Generating round-robin schedule for {} players over {} weeks",
        n,
        weeks
    );

    let fixed = player_ids[0];
    let rest = &player_ids[1..];
    let cycle = n - 1;

    let mut matchups = Vec::with_capacity(weeks as usize * n / 2);
    for w in 0..weeks {
        let rotation = w as usize % cycle;

        // Arrangement for this week: fixed player at position 0, then the
        // rotated remainder.
        let mut order = Vec::with_capacity(n);
        order.push(fixed);
        for k in 0..cycle {
            order.push(rest[(k + rotation) % cycle]);
        }

        for i in 0..n / 2 {
            matchups.push(ScheduledMatchup {
                week: w + 1,
                player1: order[i],
                player2: order[n - 1 - i],
            });
        }
    }

    tracing::debug!("Created {} scheduled matchups", matchups.len());
    Ok(matchups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn players(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    #[test]
    fn rejects_odd_and_undersized_rosters() {
        assert!(matches!(
            generate_schedule(&players(3), 6),
            Err(LeagueError::InvalidLeagueSize(3))
        ));
        assert!(matches!(
            generate_schedule(&players(5), 6),
            Err(LeagueError::InvalidLeagueSize(5))
        ));
        assert!(matches!(
            generate_schedule(&players(2), 6),
            Err(LeagueError::InvalidLeagueSize(2))
        ));
    }

    #[test]
    fn every_week_has_no_byes() {
        for n in [4usize, 6, 8, 10, 12, 14] {
            let ids = players(n);
            let schedule = generate_schedule(&ids, 10).unwrap();
            for week in 1..=10u32 {
                let week_matchups: Vec<_> =
                    schedule.iter().filter(|m| m.week == week).collect();
                assert_eq!(week_matchups.len(), n / 2, "n={} week={}", n, week);

                let mut seen = HashSet::new();
                for m in &week_matchups {
                    assert!(seen.insert(m.player1), "player scheduled twice");
                    assert!(seen.insert(m.player2), "player scheduled twice");
                }
                assert_eq!(seen.len(), n);
            }
        }
    }

    #[test]
    fn full_round_robin_within_first_cycle() {
        for n in [4usize, 6, 8, 10, 12, 14] {
            let ids = players(n);
            let schedule = generate_schedule(&ids, (n - 1) as u32).unwrap();

            let mut pairs = HashSet::new();
            for m in &schedule {
                let key = if m.player1 < m.player2 {
                    (m.player1, m.player2)
                } else {
                    (m.player2, m.player1)
                };
                assert!(pairs.insert(key), "pair repeated within first cycle");
            }
            assert_eq!(pairs.len(), n * (n - 1) / 2);
        }
    }

    #[test]
    fn fixture_repeats_after_one_cycle() {
        let ids = players(6);
        let schedule = generate_schedule(&ids, 10).unwrap();

        // Week 6 wraps to the same rotation as week 1 (6 players, cycle 5).
        let week_pairs = |w: u32| -> HashSet<(Uuid, Uuid)> {
            schedule
                .iter()
                .filter(|m| m.week == w)
                .map(|m| (m.player1, m.player2))
                .collect()
        };
        assert_eq!(week_pairs(6), week_pairs(1));
        assert_eq!(week_pairs(7), week_pairs(2));
    }
}
