use uuid::Uuid;

use crate::models::league::Member;

/// Order members for display and playoff qualification: wins descending,
/// then total points descending. No further tiebreaker is defined, so the
/// sort is stable: members equal on both keys keep their input order.
pub fn rank(members: &[Member]) -> Vec<Member> {
    let mut ranked = members.to_vec();
    ranked.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then_with(|| b.total_points.total_cmp(&a.total_points))
    });
    ranked
}

/// 1-indexed standings position of a member, if present.
pub fn position_of(members: &[Member], member_id: Uuid) -> Option<usize> {
    rank(members)
        .iter()
        .position(|m| m.id == member_id)
        .map(|i| i + 1)
}
