use std::cmp::Ordering;

use crate::core::team::Team;

/// Pairing priority: more wins first, then higher rating.
fn priority(a: &Team, b: &Team) -> Ordering {
    b.wins.cmp(&a.wins).then_with(|| b.rating.cmp(&a.rating))
}

/// Order teams by pairing priority.
///
/// The sort is stable, so teams with identical wins and rating keep their input
/// order and repeated runs over the same standings rank identically.
#[must_use]
pub fn rank_teams(teams: &[Team]) -> Vec<&Team> {
    let mut ranked: Vec<&Team> = teams.iter().collect();
    ranked.sort_by(|a, b| priority(a, b));
    ranked
}
