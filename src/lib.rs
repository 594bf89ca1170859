//! # round-pairing
//!
//! Availability-aware round pairing and match coordination for competitive
//! tournaments.
//!
//! Each round, teams are ranked by their standings and paired with the
//! closest-ranked team they share an available day with. The coordinator then
//! creates one match per pair in the match service and announces the schedule.
//! A round either pairs every team or fails as a whole; odd team counts are
//! rejected rather than given byes.
//!
//! ## Example
//!
//! ```rust
//! use round_pairing::{AvailabilityIndex, PairingEngine, Team};
//!
//! let teams = vec![Team::new("A", 1, 0, 1510), Team::new("B", 0, 1, 1490)];
//! let availability = AvailabilityIndex::new().with_day("Sat", &["A", "B"]);
//!
//! let pairs = PairingEngine::new().pair_round(&teams, &availability).unwrap();
//! assert_eq!(pairs[0].to_string(), "A vs B on Sat");
//! ```
//!
//! ## Modules
//!
//! - [`core`]: teams, days and the availability index
//! - [`pairing`]: the pairing engine
//! - [`coordinator`]: match creation, outcome finalization and disputes
//! - [`services`]: HTTP clients for the tournament services
//! - [`config`]: service configuration
//! - [`cli`]: command-line interface implementation
//! - [`web`]: HTTP server

pub mod cli;
pub mod config;
pub mod coordinator;
pub mod core;
pub mod pairing;
pub mod services;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use crate::coordinator::{Coordinator, CoordinatorError};
pub use crate::core::availability::AvailabilityIndex;
pub use crate::core::team::Team;
pub use crate::core::types::*;
pub use crate::pairing::{Pair, PairingEngine, PairingError};
