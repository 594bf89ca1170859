//! Core data types for round pairing.
//!
//! - [`Team`]: a team's standing (wins, losses, rating) within a tournament
//! - [`AvailabilityIndex`]: which teams can play on which day of a round
//! - [`TeamId`], [`Day`], [`MatchId`]: identifier newtypes
//! - [`MatchOutcome`], [`Score`]: results reported for played matches
//!
//! ## Day ordering
//!
//! When two teams share several days, the earliest one in [`Day`] order is
//! scheduled. Date labels (`2024-03-09`) sort chronologically and ahead of
//! free-form labels (`Mon`, `Saturday`), which sort lexicographically.

pub mod availability;
pub mod team;
pub mod types;

pub use availability::{AvailabilityIndex, TeamDays};
pub use team::Team;
pub use types::{Day, MatchId, MatchOutcome, Score, TeamId};
