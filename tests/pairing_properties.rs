//! Randomized checks of the pairing engine's guarantees.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use round_pairing::pairing::PairingConfig;
use round_pairing::{AvailabilityIndex, PairingEngine, PairingError, Team};

const DAYS: [&str; 5] = ["Mon", "Tue", "Wed", "2024-03-02", "2024-03-09"];

fn random_round(rng: &mut StdRng, team_count: usize) -> (Vec<Team>, AvailabilityIndex) {
    let teams: Vec<Team> = (0..team_count)
        .map(|i| {
            Team::new(
                format!("T{i}"),
                rng.gen_range(0..5),
                rng.gen_range(0..5),
                rng.gen_range(1400..1700),
            )
        })
        .collect();

    let mut availability = AvailabilityIndex::new();
    for team in &teams {
        let count = rng.gen_range(1..=DAYS.len());
        let days: Vec<_> = DAYS.choose_multiple(rng, count).map(|d| (*d).into()).collect();
        availability.record(&team.id, days);
    }
    (teams, availability)
}

#[test]
fn test_success_covers_every_team_once_on_a_shared_day() {
    let mut rng = StdRng::seed_from_u64(7);

    for round in 0..200 {
        let team_count = 2 * rng.gen_range(1..10);
        let (teams, availability) = random_round(&mut rng, team_count);
        let engine = PairingEngine::with_config(PairingConfig::for_round("cup", round + 1));
        let by_team = availability.by_team();

        match engine.pair_round(&teams, &availability) {
            Ok(pairs) => {
                assert_eq!(pairs.len() * 2, teams.len());

                let mut seen = HashSet::new();
                for pair in &pairs {
                    assert!(seen.insert(pair.team_a.clone()), "{} paired twice", pair.team_a);
                    assert!(seen.insert(pair.team_b.clone()), "{} paired twice", pair.team_b);
                    assert!(by_team.is_available(&pair.team_a, &pair.day));
                    assert!(by_team.is_available(&pair.team_b, &pair.day));
                }
                assert_eq!(seen.len(), teams.len());
            }
            Err(PairingError::NoAvailabilityOverlap { unpaired }) => {
                assert!(!unpaired.is_empty());
            }
            Err(other) => panic!("unexpected failure: {other}"),
        }
    }
}

#[test]
fn test_same_inputs_same_pairs() {
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..50 {
        let (teams, availability) = random_round(&mut rng, 8);
        let engine = PairingEngine::with_config(PairingConfig::for_round("cup", 4));

        let first = engine.pair_round(&teams, &availability);
        let second = engine.pair_round(&teams, &availability);
        assert_eq!(first, second);
    }
}

#[test]
fn test_odd_counts_always_rejected() {
    let mut rng = StdRng::seed_from_u64(3);

    for count in [1, 3, 5, 9, 17] {
        let (teams, availability) = random_round(&mut rng, count);
        assert_eq!(
            PairingEngine::new().pair_round(&teams, &availability),
            Err(PairingError::OddTeamCount { count })
        );
    }
}

#[test]
fn test_one_isolated_team_fails_whole_round() {
    let mut rng = StdRng::seed_from_u64(5);
    let (mut teams, mut availability) = random_round(&mut rng, 9);

    let loner = Team::new("loner", 9, 0, 2000);
    availability.record(&loner.id, vec!["Sun".into()]);
    teams.push(loner);

    let err = PairingEngine::new()
        .pair_round(&teams, &availability)
        .unwrap_err();
    let PairingError::NoAvailabilityOverlap { unpaired } = err else {
        panic!("expected no availability overlap, got {err}");
    };
    assert!(unpaired.iter().any(|t| t.as_str() == "loner"));
}
