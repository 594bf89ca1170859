//! Interfaces to the services the coordinator depends on.
//!
//! Each trait is implemented over HTTP in [`crate::services`]; tests substitute
//! mocks. Implementations are injected into the coordinator explicitly.

use async_trait::async_trait;
use serde::Serialize;

use crate::core::availability::AvailabilityIndex;
use crate::core::team::Team;
use crate::core::types::{Day, MatchId, MatchOutcome, Score, TeamId};
use crate::pairing::Pair;

/// Failure talking to a collaborating service
#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("{service} service unreachable: {message}")]
    Unavailable {
        service: &'static str,
        message: String,
    },

    #[error("{service} service rejected the request with status {status}: {body}")]
    Rejected {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("{service} service returned an unexpected payload: {message}")]
    Decode {
        service: &'static str,
        message: String,
    },
}

/// A match to be created for a pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMatch {
    pub tournament_id: String,
    pub team_a: TeamId,
    pub team_b: TeamId,
    pub scheduled_day: Day,
}

impl NewMatch {
    pub fn for_pair(tournament_id: &str, pair: &Pair) -> Self {
        Self {
            tournament_id: tournament_id.to_string(),
            team_a: pair.team_a.clone(),
            team_b: pair.team_b.clone(),
            scheduled_day: pair.day.clone(),
        }
    }
}

/// A match as held by the match store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub tournament_id: String,
    pub team_a: TeamId,
    pub team_b: TeamId,
    pub scheduled_day: Option<Day>,
    pub result: Option<String>,
    pub status: Option<String>,
}

/// Something worth telling the tournament's chat channel about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    RoundScheduled {
        tournament_id: String,
        round_number: u32,
        pairs: Vec<Pair>,
    },
    OutcomeFinalized {
        match_id: MatchId,
        team_a: TeamId,
        team_b: TeamId,
        outcome: MatchOutcome,
        score: Score,
    },
    DisputeRaised {
        match_id: MatchId,
        raised_by: String,
        reason: String,
    },
}

impl Notification {
    /// Human-readable message text
    pub fn render(&self) -> String {
        match self {
            Self::RoundScheduled {
                tournament_id,
                round_number,
                pairs,
            } => {
                let mut text =
                    format!("Round {round_number} of {tournament_id} is scheduled:");
                for pair in pairs {
                    text.push_str(&format!("\n- {pair}"));
                }
                text
            }
            Self::OutcomeFinalized {
                match_id,
                team_a,
                team_b,
                outcome,
                score,
            } => format!(
                "Match {match_id} ({team_a} vs {team_b}) finalized: {outcome}, {}-{}",
                score.team_a, score.team_b
            ),
            Self::DisputeRaised {
                match_id,
                raised_by,
                reason,
            } => format!("New dispute on match {match_id} raised by {raised_by}: {reason}"),
        }
    }
}

/// Tournament standings
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StandingsProvider: Send + Sync {
    /// Current standings of every team in a tournament
    async fn standings(&self, tournament_id: &str) -> Result<Vec<Team>, CollaboratorError>;

    /// Replace the win/loss/rating figures of the given teams
    async fn update_standings(
        &self,
        tournament_id: &str,
        teams: &[Team],
    ) -> Result<(), CollaboratorError>;
}

/// Team availability per round
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AvailabilityProvider: Send + Sync {
    async fn availability(
        &self,
        tournament_id: &str,
        round_number: u32,
    ) -> Result<AvailabilityIndex, CollaboratorError>;
}

/// Persistent match records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn create_match(&self, new_match: &NewMatch) -> Result<MatchId, CollaboratorError>;

    async fn get_match(&self, match_id: &MatchId) -> Result<MatchRecord, CollaboratorError>;

    async fn record_result(
        &self,
        match_id: &MatchId,
        outcome: MatchOutcome,
        score: Score,
    ) -> Result<(), CollaboratorError>;
}

/// Chat channel announcements
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: &Notification) -> Result<(), CollaboratorError>;
}
