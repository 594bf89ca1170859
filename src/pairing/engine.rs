use std::collections::HashSet;

use crate::core::availability::{AvailabilityIndex, TeamDays};
use crate::core::team::Team;
use crate::core::types::TeamId;
use crate::pairing::fallback::{pair_leftovers, seed_for_round};
use crate::pairing::ranking::rank_teams;
use crate::pairing::{Pair, PairingError};

/// Configuration for the pairing engine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairingConfig {
    /// Seed for the shuffle in the fallback pass
    pub fallback_seed: u64,
}

impl PairingConfig {
    /// Configuration whose fallback shuffle is reproducible for a given round
    pub fn for_round(tournament_id: &str, round_number: u32) -> Self {
        Self {
            fallback_seed: seed_for_round(tournament_id, round_number),
        }
    }
}

/// The round pairing engine.
///
/// Holds no state between runs; a single engine can pair any number of rounds
/// from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct PairingEngine {
    config: PairingConfig,
}

impl PairingEngine {
    /// Create a new pairing engine with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new pairing engine with custom configuration
    pub fn with_config(config: PairingConfig) -> Self {
        Self { config }
    }

    /// Pair every team of a round, or fail without producing any pairs.
    ///
    /// # Errors
    ///
    /// Returns `PairingError::EmptyInput`, `PairingError::DuplicateTeam` or
    /// `PairingError::OddTeamCount` when the standings cannot be paired at all,
    /// and `PairingError::NoAvailabilityOverlap` when some team shares no day
    /// with any remaining team.
    pub fn pair_round(
        &self,
        teams: &[Team],
        availability: &AvailabilityIndex,
    ) -> Result<Vec<Pair>, PairingError> {
        check_preconditions(teams)?;

        let ranked = rank_teams(teams);
        let by_team = availability.by_team();

        let (mut pairs, used) = greedy_pass(&ranked, &by_team);
        tracing::debug!(
            "Greedy pass paired {} of {} teams",
            used.len(),
            teams.len()
        );

        // Leftovers go to the fallback in standings order, not rank order
        let leftovers: Vec<TeamId> = teams
            .iter()
            .filter(|t| !used.contains(&t.id))
            .map(|t| t.id.clone())
            .collect();

        if !leftovers.is_empty() {
            tracing::debug!("Falling back for {} unpaired teams", leftovers.len());
            pairs.extend(pair_leftovers(
                leftovers,
                &by_team,
                self.config.fallback_seed,
            )?);
        }

        validate_coverage(teams, &pairs)?;
        Ok(pairs)
    }
}

fn check_preconditions(teams: &[Team]) -> Result<(), PairingError> {
    if teams.is_empty() {
        return Err(PairingError::EmptyInput);
    }

    let mut seen = HashSet::with_capacity(teams.len());
    for team in teams {
        if !seen.insert(&team.id) {
            return Err(PairingError::DuplicateTeam {
                team: team.id.clone(),
            });
        }
    }

    if teams.len() % 2 != 0 {
        return Err(PairingError::OddTeamCount { count: teams.len() });
    }

    Ok(())
}

/// Pair teams in rank order with the first lower-ranked team sharing a day
fn greedy_pass(ranked: &[&Team], by_team: &TeamDays) -> (Vec<Pair>, HashSet<TeamId>) {
    let mut pairs = Vec::with_capacity(ranked.len() / 2);
    let mut used: HashSet<TeamId> = HashSet::with_capacity(ranked.len());

    for (i, first) in ranked.iter().enumerate() {
        if used.contains(&first.id) {
            continue;
        }

        let partner = ranked[i + 1..]
            .iter()
            .filter(|candidate| !used.contains(&candidate.id))
            .find_map(|candidate| {
                by_team
                    .first_common_day(&first.id, &candidate.id)
                    .map(|day| (*candidate, day.clone()))
            });

        if let Some((second, day)) = partner {
            used.insert(first.id.clone());
            used.insert(second.id.clone());
            pairs.push(Pair::new(first.id.clone(), second.id.clone(), day));
        }
    }

    (pairs, used)
}

/// Every team appears in exactly one pair and nothing else does
fn validate_coverage(teams: &[Team], pairs: &[Pair]) -> Result<(), PairingError> {
    let mut covered: HashSet<&TeamId> = HashSet::with_capacity(teams.len());
    let mut consistent = pairs.len() * 2 == teams.len();
    for pair in pairs {
        consistent &= pair.team_a != pair.team_b;
        consistent &= covered.insert(&pair.team_a);
        consistent &= covered.insert(&pair.team_b);
    }

    let mut unpaired: Vec<TeamId> = teams
        .iter()
        .filter(|t| !covered.contains(&t.id))
        .map(|t| t.id.clone())
        .collect();

    if consistent && unpaired.is_empty() {
        return Ok(());
    }

    unpaired.sort();
    Err(PairingError::NoAvailabilityOverlap { unpaired })
}
