use serde::{Deserialize, Serialize};

use crate::coordinator::collaborators::Notification;
use crate::coordinator::{Coordinator, CoordinatorError};
use crate::core::types::MatchId;
use crate::utils::validation::{
    require_fields, validate_evidence_url, validate_identifier, validate_text, ValidationError,
};

/// A dispute raised against a match result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisputeRequest {
    #[serde(default)]
    pub match_id: Option<String>,
    #[serde(default)]
    pub raised_by: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub evidence_url: Option<String>,
}

/// A validated dispute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dispute {
    pub match_id: MatchId,
    pub raised_by: String,
    pub reason: String,
    pub evidence_url: String,
}

impl DisputeRequest {
    /// # Errors
    ///
    /// Returns a `ValidationError` listing every missing field, or naming the
    /// first malformed one.
    pub fn validate(&self) -> Result<Dispute, ValidationError> {
        require_fields(&[
            ("matchId", self.match_id.as_deref()),
            ("raisedBy", self.raised_by.as_deref()),
            ("reason", self.reason.as_deref()),
            ("evidenceUrl", self.evidence_url.as_deref()),
        ])?;

        Ok(Dispute {
            match_id: MatchId::new(validate_identifier(
                "matchId",
                self.match_id.as_deref().unwrap_or_default(),
            )?),
            raised_by: validate_text("raisedBy", self.raised_by.as_deref().unwrap_or_default())?,
            reason: validate_text("reason", self.reason.as_deref().unwrap_or_default())?,
            evidence_url: validate_evidence_url(self.evidence_url.as_deref().unwrap_or_default())?,
        })
    }
}

/// Acknowledgement returned to whoever raised the dispute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisputeAck {
    pub dispute: Dispute,
    /// Whether moderators were alerted in the chat channel
    pub moderators_notified: bool,
}

impl Coordinator {
    /// Accept a dispute on an existing match and alert moderators.
    ///
    /// # Errors
    ///
    /// - `InputValidation` for missing or malformed fields
    /// - `NotFound` when the match does not exist
    /// - `DataUnavailable` when the match store cannot be reached
    pub async fn open_dispute(
        &self,
        request: &DisputeRequest,
    ) -> Result<DisputeAck, CoordinatorError> {
        let dispute = request.validate()?;
        self.matches.get_match(&dispute.match_id).await?;

        tracing::info!(
            "Dispute on match {} raised by {}",
            dispute.match_id,
            dispute.raised_by
        );

        let notification = Notification::DisputeRaised {
            match_id: dispute.match_id.clone(),
            raised_by: dispute.raised_by.clone(),
            reason: dispute.reason.clone(),
        };
        let moderators_notified = self.announce(&notification).await;

        Ok(DisputeAck {
            dispute,
            moderators_notified,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::coordinator::collaborators::{
        CollaboratorError, MatchRecord, MockAvailabilityProvider, MockMatchStore, MockNotifier,
        MockStandingsProvider,
    };
    use crate::core::types::TeamId;

    fn request() -> DisputeRequest {
        DisputeRequest {
            match_id: Some("m1".to_string()),
            raised_by: Some("captain-a".to_string()),
            reason: Some("Opponent fielded an unregistered player".to_string()),
            evidence_url: Some("https://clips.example.com/m1".to_string()),
        }
    }

    fn coordinator(matches: MockMatchStore, notifier: MockNotifier) -> Coordinator {
        Coordinator::new(
            Arc::new(MockStandingsProvider::new()),
            Arc::new(MockAvailabilityProvider::new()),
            Arc::new(matches),
            Arc::new(notifier),
        )
    }

    #[tokio::test]
    async fn test_dispute_on_existing_match_notifies_moderators() {
        let mut matches = MockMatchStore::new();
        matches.expect_get_match().returning(|_| {
            Ok(MatchRecord {
                tournament_id: "cup".to_string(),
                team_a: TeamId::new("A"),
                team_b: TeamId::new("B"),
                scheduled_day: None,
                result: None,
                status: None,
            })
        });
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|n| {
                matches!(
                    n,
                    Notification::DisputeRaised { raised_by, .. } if raised_by == "captain-a"
                )
            })
            .times(1)
            .returning(|_| Ok(()));

        let ack = coordinator(matches, notifier)
            .open_dispute(&request())
            .await
            .unwrap();
        assert!(ack.moderators_notified);
        assert_eq!(ack.dispute.match_id, MatchId::new("m1"));
    }

    #[tokio::test]
    async fn test_dispute_on_unknown_match() {
        let mut matches = MockMatchStore::new();
        matches
            .expect_get_match()
            .returning(|_| Err(CollaboratorError::NotFound("match m1".to_string())));
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().never();

        let err = coordinator(matches, notifier)
            .open_dispute(&request())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "not_found");
    }

    #[test]
    fn test_missing_fields() {
        let mut partial = request();
        partial.reason = None;
        partial.evidence_url = Some(String::new());

        assert_eq!(
            partial.validate(),
            Err(ValidationError::MissingFields(vec!["reason", "evidenceUrl"]))
        );
    }

    #[test]
    fn test_evidence_must_be_web_url() {
        let mut bad = request();
        bad.evidence_url = Some("file:///etc/passwd".to_string());
        assert_eq!(bad.validate(), Err(ValidationError::InvalidEvidenceUrl));
    }
}
