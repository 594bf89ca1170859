//! Orchestration of the tournament services around the pairing engine.
//!
//! The [`Coordinator`] owns no data. Each operation fetches what it needs from
//! the injected collaborators, decides, then writes back one call at a time:
//!
//! - [`Coordinator::make_matches`]: pair a round and create its matches
//! - [`Coordinator::finalize_outcome`]: record a result and update standings
//! - [`Coordinator::open_dispute`]: accept a dispute and alert moderators
//!
//! Calls are sequential with no retries. Writes already made are never undone;
//! the returned reports say which ones happened.

pub mod collaborators;
pub mod dispute;
pub mod outcome;
pub mod report;
pub mod round;

use std::sync::Arc;

pub use collaborators::{
    AvailabilityProvider, CollaboratorError, MatchRecord, MatchStore, NewMatch, Notification,
    Notifier, StandingsProvider,
};
pub use dispute::{DisputeAck, DisputeRequest};
pub use outcome::{OutcomeReport, OutcomeRequest};
pub use report::{RoundReport, StepReport, StepStatus};
pub use round::RoundRequest;

use crate::pairing::PairingError;
use crate::utils::validation::ValidationError;

/// Why a coordinator operation failed
#[derive(Debug, thiserror::Error)]
pub enum CoordinatorError {
    #[error(transparent)]
    InputValidation(#[from] ValidationError),

    #[error("{0} not found")]
    NotFound(String),

    #[error(transparent)]
    DataUnavailable(CollaboratorError),

    #[error(transparent)]
    Pairing(#[from] PairingError),

    #[error("{} of {} matches could not be created", .0.matches_failed.len(), .0.total())]
    PartialPersistence(RoundReport),

    #[error("Step {step} failed: {message}")]
    StepFailed {
        step: &'static str,
        message: String,
        steps: StepReport,
    },
}

impl From<CollaboratorError> for CoordinatorError {
    fn from(err: CollaboratorError) -> Self {
        match err {
            CollaboratorError::NotFound(what) => Self::NotFound(what),
            other => Self::DataUnavailable(other),
        }
    }
}

impl CoordinatorError {
    /// Stable machine-readable name of the failure
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InputValidation(_) => "input_validation",
            Self::NotFound(_) => "not_found",
            Self::DataUnavailable(_) => "data_unavailable",
            Self::Pairing(err) => err.kind(),
            Self::PartialPersistence(_) => "partial_persistence",
            Self::StepFailed { .. } => "step_failed",
        }
    }
}

/// Ties the pairing engine to the services holding tournament data
#[derive(Clone)]
pub struct Coordinator {
    standings: Arc<dyn StandingsProvider>,
    availability: Arc<dyn AvailabilityProvider>,
    matches: Arc<dyn MatchStore>,
    notifier: Arc<dyn Notifier>,
}

impl Coordinator {
    pub fn new(
        standings: Arc<dyn StandingsProvider>,
        availability: Arc<dyn AvailabilityProvider>,
        matches: Arc<dyn MatchStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            standings,
            availability,
            matches,
            notifier,
        }
    }

    /// Send a notification, logging instead of failing
    async fn announce(&self, notification: &Notification) -> bool {
        match self.notifier.notify(notification).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!("Notification not delivered: {}", err);
                false
            }
        }
    }
}
