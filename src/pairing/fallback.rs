use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::core::availability::TeamDays;
use crate::core::types::TeamId;
use crate::pairing::{Pair, PairingError};

/// Derive the fallback shuffle seed for a tournament round.
///
/// The seed is the first eight bytes (little endian) of
/// `md5("{tournament_id}#{round_number}")`, so a round can be replayed exactly.
///
/// # Examples
///
/// ```
/// use round_pairing::pairing::fallback::seed_for_round;
///
/// assert_eq!(seed_for_round("spring-cup", 2), seed_for_round("spring-cup", 2));
/// assert_ne!(seed_for_round("spring-cup", 2), seed_for_round("spring-cup", 3));
/// ```
#[must_use]
pub fn seed_for_round(tournament_id: &str, round_number: u32) -> u64 {
    let digest = md5::compute(format!("{tournament_id}#{round_number}"));
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest.0[..8]);
    u64::from_le_bytes(bytes)
}

/// Pair teams rank could not place, in seeded random order.
///
/// Teams are shuffled, then the first remaining team is matched with the first
/// later team it shares a day with. If any drawn team has no partner the whole
/// pass fails and every team still waiting is reported as unpaired.
///
/// # Errors
///
/// Returns `PairingError::NoAvailabilityOverlap` if a team cannot be placed.
pub fn pair_leftovers(
    mut remaining: Vec<TeamId>,
    by_team: &TeamDays,
    seed: u64,
) -> Result<Vec<Pair>, PairingError> {
    let mut rng = StdRng::seed_from_u64(seed);
    remaining.shuffle(&mut rng);

    let mut pairs = Vec::with_capacity(remaining.len() / 2);
    while !remaining.is_empty() {
        let first = remaining.remove(0);

        let partner = remaining.iter().enumerate().find_map(|(i, candidate)| {
            by_team
                .first_common_day(&first, candidate)
                .map(|day| (i, day.clone()))
        });

        let Some((index, day)) = partner else {
            let mut unpaired = Vec::with_capacity(remaining.len() + 1);
            unpaired.push(first);
            unpaired.append(&mut remaining);
            unpaired.sort();
            return Err(PairingError::NoAvailabilityOverlap { unpaired });
        };

        let second = remaining.remove(index);
        tracing::debug!("Fallback paired {} vs {} on {}", first, second, day);
        pairs.push(Pair::new(first, second, day));
    }

    Ok(pairs)
}
