use serde::{Deserialize, Serialize};

use crate::coordinator::collaborators::Notification;
use crate::coordinator::report::StepReport;
use crate::coordinator::{Coordinator, CoordinatorError};
use crate::core::team::apply_outcome;
use crate::core::types::{MatchId, MatchOutcome, Score, TeamId};
use crate::utils::validation::{require_fields, validate_identifier, ValidationError};

const RECORD_RESULT: &str = "record_result";
const UPDATE_STANDINGS: &str = "update_standings";
const ANNOUNCE: &str = "announce";

/// Request to finalize the result of a played match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeRequest {
    #[serde(default)]
    pub match_id: Option<String>,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub score: Score,
}

impl OutcomeRequest {
    /// # Errors
    ///
    /// Returns a `ValidationError` for missing fields, a malformed match id or
    /// an unknown result label.
    pub fn validate(&self) -> Result<(MatchId, MatchOutcome), ValidationError> {
        require_fields(&[
            ("matchId", self.match_id.as_deref()),
            ("result", self.result.as_deref()),
        ])?;

        let match_id =
            validate_identifier("matchId", self.match_id.as_deref().unwrap_or_default())?;
        let outcome = self
            .result
            .as_deref()
            .and_then(|r| MatchOutcome::parse(r.trim()))
            .ok_or(ValidationError::InvalidOutcome)?;

        Ok((MatchId::new(match_id), outcome))
    }
}

/// What finalizing a match did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeReport {
    pub match_id: MatchId,
    pub tournament_id: String,
    pub team_a: TeamId,
    pub team_b: TeamId,
    pub result: MatchOutcome,
    pub score: Score,
    pub steps: StepReport,
}

impl Coordinator {
    /// Record a match result and fold it into the tournament standings.
    ///
    /// Steps run in order: record the result on the match, update standings
    /// (read, apply, write back), announce. The first two abort the operation
    /// on failure; announcing is best effort.
    ///
    /// # Errors
    ///
    /// - `InputValidation` for a malformed request or incomplete match data
    /// - `NotFound` when the match does not exist
    /// - `DataUnavailable` when the match cannot be fetched
    /// - `StepFailed` when a write fails; its step report shows what already
    ///   happened
    pub async fn finalize_outcome(
        &self,
        request: &OutcomeRequest,
    ) -> Result<OutcomeReport, CoordinatorError> {
        let (match_id, outcome) = request.validate()?;
        let record = self.matches.get_match(&match_id).await?;

        if record.tournament_id.trim().is_empty()
            || record.team_a.as_str().is_empty()
            || record.team_b.as_str().is_empty()
        {
            return Err(ValidationError::IncompleteMatch(match_id.to_string()).into());
        }

        let mut steps = StepReport::default();

        if let Err(err) = self
            .matches
            .record_result(&match_id, outcome, request.score)
            .await
        {
            tracing::error!("Failed to record result of match {}: {}", match_id, err);
            return Err(abort(steps, RECORD_RESULT, err, &[UPDATE_STANDINGS, ANNOUNCE]));
        }
        steps.done(RECORD_RESULT);

        if let Err(message) = self
            .update_standings(&record.tournament_id, &record.team_a, &record.team_b, outcome)
            .await
        {
            tracing::error!(
                "Result of match {} recorded but standings not updated: {}",
                match_id,
                message
            );
            return Err(abort(steps, UPDATE_STANDINGS, message, &[ANNOUNCE]));
        }
        steps.done(UPDATE_STANDINGS);
        tracing::info!("Match {} finalized as {}", match_id, outcome);

        let notification = Notification::OutcomeFinalized {
            match_id: match_id.clone(),
            team_a: record.team_a.clone(),
            team_b: record.team_b.clone(),
            outcome,
            score: request.score,
        };
        if self.announce(&notification).await {
            steps.done(ANNOUNCE);
        } else {
            steps.failed(ANNOUNCE, "notification not delivered");
        }

        Ok(OutcomeReport {
            match_id,
            tournament_id: record.tournament_id,
            team_a: record.team_a,
            team_b: record.team_b,
            result: outcome,
            score: request.score,
            steps,
        })
    }

    async fn update_standings(
        &self,
        tournament_id: &str,
        team_a: &TeamId,
        team_b: &TeamId,
        outcome: MatchOutcome,
    ) -> Result<(), String> {
        let mut teams = self
            .standings
            .standings(tournament_id)
            .await
            .map_err(|e| e.to_string())?;
        apply_outcome(&mut teams, team_a, team_b, outcome).map_err(|e| e.to_string())?;

        // Write back only the two teams of this match
        teams.retain(|t| &t.id == team_a || &t.id == team_b);
        self.standings
            .update_standings(tournament_id, &teams)
            .await
            .map_err(|e| e.to_string())
    }
}

fn abort(
    mut steps: StepReport,
    step: &'static str,
    error: impl std::fmt::Display,
    remaining: &[&'static str],
) -> CoordinatorError {
    let message = error.to_string();
    steps.failed(step, &message);
    steps.skipped(remaining);
    CoordinatorError::StepFailed {
        step,
        message,
        steps,
    }
}
