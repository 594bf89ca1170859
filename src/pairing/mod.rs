//! Round pairing engine.
//!
//! - [`PairingEngine`]: turns standings plus availability into head-to-head pairs
//! - [`Pair`]: two teams and the day they play
//! - [`PairingError`]: why a round could not be paired
//!
//! ## Algorithm
//!
//! 1. **Preconditions**: reject empty input, duplicate team ids and odd team counts
//! 2. **Ranking**: stable sort by wins, then rating (both descending)
//! 3. **Greedy pass**: each unpaired team, in rank order, takes the first
//!    lower-ranked unpaired team it shares a day with
//! 4. **Fallback pass**: teams left over are shuffled with a per-round seed and
//!    paired on any shared day
//! 5. **Validation**: every team must appear in exactly one pair
//!
//! A round is all-or-nothing. A single team that shares no day with anyone fails
//! the whole round and no pairs are returned.
//!
//! ## Example
//!
//! ```rust
//! use round_pairing::core::{AvailabilityIndex, Team};
//! use round_pairing::pairing::{PairingConfig, PairingEngine};
//!
//! let teams = vec![
//!     Team::new("A", 2, 0, 1600),
//!     Team::new("B", 1, 0, 1550),
//!     Team::new("C", 1, 1, 1500),
//!     Team::new("D", 0, 2, 1400),
//! ];
//! let availability = AvailabilityIndex::new()
//!     .with_day("Mon", &["A", "B"])
//!     .with_day("Tue", &["C", "D"]);
//!
//! let engine = PairingEngine::with_config(PairingConfig::for_round("spring-cup", 1));
//! let pairs = engine.pair_round(&teams, &availability).unwrap();
//!
//! assert_eq!(pairs.len(), 2);
//! assert_eq!(pairs[0].day.as_str(), "Mon");
//! ```

pub mod engine;
pub mod fallback;
pub mod ranking;

use serde::{Deserialize, Serialize};

use crate::core::types::{Day, TeamId};

pub use engine::{PairingConfig, PairingEngine};

/// Two teams scheduled to play each other on a day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    #[serde(rename = "teamA")]
    pub team_a: TeamId,
    #[serde(rename = "teamB")]
    pub team_b: TeamId,
    pub day: Day,
}

impl Pair {
    pub fn new(team_a: TeamId, team_b: TeamId, day: Day) -> Self {
        Self {
            team_a,
            team_b,
            day,
        }
    }
}

impl std::fmt::Display for Pair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} vs {} on {}", self.team_a, self.team_b, self.day)
    }
}

/// Why a round could not be paired
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PairingError {
    #[error("No teams to pair")]
    EmptyInput,

    #[error("Team {team} appears more than once in the standings")]
    DuplicateTeam { team: TeamId },

    #[error("Cannot pair an odd number of teams ({count})")]
    OddTeamCount { count: usize },

    #[error("Unable to pair all teams; no shared availability for: {}", join_ids(.unpaired))]
    NoAvailabilityOverlap { unpaired: Vec<TeamId> },
}

impl PairingError {
    /// Stable machine-readable name of the failure
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::DuplicateTeam { .. } => "duplicate_team",
            Self::OddTeamCount { .. } => "odd_team_count",
            Self::NoAvailabilityOverlap { .. } => "no_availability_overlap",
        }
    }
}

fn join_ids(ids: &[TeamId]) -> String {
    ids.iter()
        .map(TeamId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
