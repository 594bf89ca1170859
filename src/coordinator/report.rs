//! Per-step accounting for multi-service operations.
//!
//! Nothing is rolled back when a later call fails, so callers get told exactly
//! which writes happened.

use serde::Serialize;

use crate::core::types::MatchId;
use crate::pairing::Pair;

/// A match that was persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedMatch {
    pub match_id: MatchId,
    #[serde(flatten)]
    pub pair: Pair,
}

/// A pair whose match could not be persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedMatch {
    #[serde(flatten)]
    pub pair: Pair,
    pub error: String,
}

/// Outcome of creating the matches of one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundReport {
    pub tournament_id: String,
    pub round_number: u32,
    pub matches_created: Vec<CreatedMatch>,
    pub matches_failed: Vec<FailedMatch>,
    /// Whether the schedule reached the chat channel
    pub announced: bool,
}

impl RoundReport {
    pub fn new(tournament_id: &str, round_number: u32) -> Self {
        Self {
            tournament_id: tournament_id.to_string(),
            round_number,
            matches_created: Vec::new(),
            matches_failed: Vec::new(),
            announced: false,
        }
    }

    pub fn record_created(&mut self, pair: Pair, match_id: MatchId) {
        self.matches_created.push(CreatedMatch { match_id, pair });
    }

    pub fn record_failed(&mut self, pair: Pair, error: impl std::fmt::Display) {
        self.matches_failed.push(FailedMatch {
            pair,
            error: error.to_string(),
        });
    }

    /// Every pair was persisted
    pub fn is_complete(&self) -> bool {
        self.matches_failed.is_empty()
    }

    pub fn created_pairs(&self) -> Vec<Pair> {
        self.matches_created.iter().map(|m| m.pair.clone()).collect()
    }

    pub fn total(&self) -> usize {
        self.matches_created.len() + self.matches_failed.len()
    }
}

/// Status of one step of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Done,
    Failed,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    pub step: &'static str,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Ordered record of the steps an operation went through
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StepReport {
    steps: Vec<StepOutcome>,
}

impl StepReport {
    pub fn done(&mut self, step: &'static str) {
        self.push(step, StepStatus::Done, None);
    }

    pub fn failed(&mut self, step: &'static str, detail: impl std::fmt::Display) {
        self.push(step, StepStatus::Failed, Some(detail.to_string()));
    }

    pub fn skipped(&mut self, steps: &[&'static str]) {
        for &step in steps {
            self.push(step, StepStatus::Skipped, None);
        }
    }

    pub fn status_of(&self, step: &str) -> Option<StepStatus> {
        self.steps.iter().find(|s| s.step == step).map(|s| s.status)
    }

    pub fn steps(&self) -> &[StepOutcome] {
        &self.steps
    }

    fn push(&mut self, step: &'static str, status: StepStatus, detail: Option<String>) {
        self.steps.push(StepOutcome {
            step,
            status,
            detail,
        });
    }
}
