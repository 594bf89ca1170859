use serde::{Deserialize, Serialize};

use crate::coordinator::collaborators::{NewMatch, Notification};
use crate::coordinator::report::RoundReport;
use crate::coordinator::{Coordinator, CoordinatorError};
use crate::pairing::{PairingConfig, PairingEngine};
use crate::utils::validation::{
    check_team_limit, validate_identifier, RawRoundNumber, ValidationError,
};

/// Request to pair a round and create its matches
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRequest {
    #[serde(default)]
    pub tournament_id: Option<String>,
    #[serde(default)]
    pub round_number: Option<RawRoundNumber>,
}

impl RoundRequest {
    pub fn new(tournament_id: &str, round_number: u32) -> Self {
        Self {
            tournament_id: Some(tournament_id.to_string()),
            round_number: Some(round_number.into()),
        }
    }

    /// Validated tournament id and round number.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` for missing or malformed fields.
    pub fn validate(&self) -> Result<(String, u32), ValidationError> {
        let tournament_id = self
            .tournament_id
            .as_deref()
            .filter(|id| !id.trim().is_empty());

        let mut missing = Vec::new();
        if tournament_id.is_none() {
            missing.push("tournamentId");
        }
        if self.round_number.is_none() {
            missing.push("roundNumber");
        }

        match (tournament_id, &self.round_number) {
            (Some(id), Some(round)) => {
                Ok((validate_identifier("tournamentId", id)?, round.parse()?))
            }
            _ => Err(ValidationError::MissingFields(missing)),
        }
    }
}

impl Coordinator {
    /// Pair a round from current standings and availability, then create one
    /// match per pair.
    ///
    /// Nothing is written when pairing fails. Once pairing succeeds every pair
    /// is attempted; failures are collected rather than stopping the loop, and
    /// already-created matches stay in place.
    ///
    /// # Errors
    ///
    /// - `InputValidation` for a malformed request or an oversized field
    /// - `NotFound` when the tournament or the round's schedule does not exist
    /// - `DataUnavailable` when standings or availability cannot be fetched
    /// - `Pairing` when the round cannot be paired
    /// - `PartialPersistence` when at least one match could not be created
    pub async fn make_matches(
        &self,
        request: &RoundRequest,
    ) -> Result<RoundReport, CoordinatorError> {
        let (tournament_id, round_number) = request.validate()?;
        tracing::info!("Pairing round {} of {}", round_number, tournament_id);

        let teams = self.standings.standings(&tournament_id).await?;
        check_team_limit(teams.len())?;

        let availability = self
            .availability
            .availability(&tournament_id, round_number)
            .await?;

        let engine =
            PairingEngine::with_config(PairingConfig::for_round(&tournament_id, round_number));
        let pairs = engine.pair_round(&teams, &availability).map_err(|err| {
            tracing::warn!(
                "Round {} of {} cannot be paired: {}",
                round_number,
                tournament_id,
                err
            );
            err
        })?;

        let mut report = RoundReport::new(&tournament_id, round_number);
        for pair in pairs {
            let new_match = NewMatch::for_pair(&tournament_id, &pair);
            match self.matches.create_match(&new_match).await {
                Ok(match_id) => {
                    tracing::info!("Match {} created: {}", match_id, pair);
                    report.record_created(pair, match_id);
                }
                Err(err) => {
                    tracing::error!("Failed to create match {}: {}", pair, err);
                    report.record_failed(pair, err);
                }
            }
        }

        if !report.matches_created.is_empty() {
            let notification = Notification::RoundScheduled {
                tournament_id: tournament_id.clone(),
                round_number,
                pairs: report.created_pairs(),
            };
            report.announced = self.announce(&notification).await;
        }

        if report.is_complete() {
            Ok(report)
        } else {
            Err(CoordinatorError::PartialPersistence(report))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::coordinator::collaborators::{
        CollaboratorError, MockAvailabilityProvider, MockMatchStore, MockNotifier,
        MockStandingsProvider,
    };
    use crate::core::availability::AvailabilityIndex;
    use crate::core::team::Team;
    use crate::core::types::MatchId;
    use crate::pairing::PairingError;

    fn four_teams() -> Vec<Team> {
        vec![
            Team::new("A", 2, 0, 1600),
            Team::new("B", 1, 0, 1550),
            Team::new("C", 1, 1, 1500),
            Team::new("D", 0, 2, 1400),
        ]
    }

    fn split_week() -> AvailabilityIndex {
        AvailabilityIndex::new()
            .with_day("Mon", &["A", "B"])
            .with_day("Tue", &["C", "D"])
    }

    fn standings_returning(teams: Vec<Team>) -> MockStandingsProvider {
        let mut standings = MockStandingsProvider::new();
        standings
            .expect_standings()
            .withf(|tournament_id| tournament_id == "cup")
            .returning(move |_| Ok(teams.clone()));
        standings
    }

    fn availability_returning(index: AvailabilityIndex) -> MockAvailabilityProvider {
        let mut availability = MockAvailabilityProvider::new();
        availability
            .expect_availability()
            .withf(|tournament_id, round| tournament_id == "cup" && *round == 1)
            .returning(move |_, _| Ok(index.clone()));
        availability
    }

    fn coordinator(
        standings: MockStandingsProvider,
        availability: MockAvailabilityProvider,
        matches: MockMatchStore,
        notifier: MockNotifier,
    ) -> Coordinator {
        Coordinator::new(
            Arc::new(standings),
            Arc::new(availability),
            Arc::new(matches),
            Arc::new(notifier),
        )
    }

    #[tokio::test]
    async fn test_creates_one_match_per_pair_and_announces() {
        let mut matches = MockMatchStore::new();
        matches
            .expect_create_match()
            .times(2)
            .returning(|m| Ok(MatchId::new(format!("{}-{}", m.team_a, m.team_b))));

        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|n| matches!(n, Notification::RoundScheduled { pairs, .. } if pairs.len() == 2))
            .times(1)
            .returning(|_| Ok(()));

        let coordinator = coordinator(
            standings_returning(four_teams()),
            availability_returning(split_week()),
            matches,
            notifier,
        );

        let report = coordinator
            .make_matches(&RoundRequest::new("cup", 1))
            .await
            .unwrap();

        assert_eq!(report.matches_created.len(), 2);
        assert_eq!(report.matches_created[0].match_id, MatchId::new("A-B"));
        assert_eq!(report.matches_created[1].pair.day.as_str(), "Tue");
        assert!(report.announced);
    }

    #[tokio::test]
    async fn test_pairing_failure_creates_nothing() {
        let mut teams = four_teams();
        teams.pop();

        let mut matches = MockMatchStore::new();
        matches.expect_create_match().never();
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().never();

        let coordinator = coordinator(
            standings_returning(teams),
            availability_returning(split_week()),
            matches,
            notifier,
        );

        let err = coordinator
            .make_matches(&RoundRequest::new("cup", 1))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CoordinatorError::Pairing(PairingError::OddTeamCount { count: 3 })
        ));
        assert_eq!(err.kind(), "odd_team_count");
    }

    #[tokio::test]
    async fn test_failed_match_is_reported_and_others_still_created() {
        let mut matches = MockMatchStore::new();
        matches.expect_create_match().times(2).returning(|m| {
            if m.team_a.as_str() == "A" {
                Err(CollaboratorError::Unavailable {
                    service: "match",
                    message: "connection refused".to_string(),
                })
            } else {
                Ok(MatchId::new("m2"))
            }
        });

        let mut notifier = MockNotifier::new();
        notifier.expect_notify().times(1).returning(|_| Ok(()));

        let coordinator = coordinator(
            standings_returning(four_teams()),
            availability_returning(split_week()),
            matches,
            notifier,
        );

        let err = coordinator
            .make_matches(&RoundRequest::new("cup", 1))
            .await
            .unwrap_err();

        let CoordinatorError::PartialPersistence(report) = err else {
            panic!("expected partial persistence, got {err:?}");
        };
        assert_eq!(report.matches_created.len(), 1);
        assert_eq!(report.matches_created[0].pair.team_a.as_str(), "C");
        assert_eq!(report.matches_failed.len(), 1);
        assert!(report.matches_failed[0].error.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_notification_failure_is_not_fatal() {
        let mut matches = MockMatchStore::new();
        matches
            .expect_create_match()
            .returning(|_| Ok(MatchId::new("m")));

        let mut notifier = MockNotifier::new();
        notifier.expect_notify().returning(|_| {
            Err(CollaboratorError::Rejected {
                service: "notification",
                status: 401,
                body: "bad token".to_string(),
            })
        });

        let coordinator = coordinator(
            standings_returning(four_teams()),
            availability_returning(split_week()),
            matches,
            notifier,
        );

        let report = coordinator
            .make_matches(&RoundRequest::new("cup", 1))
            .await
            .unwrap();
        assert!(!report.announced);
        assert!(report.is_complete());
    }

    #[tokio::test]
    async fn test_missing_schedule_is_not_found() {
        let mut availability = MockAvailabilityProvider::new();
        availability.expect_availability().returning(|_, round| {
            Err(CollaboratorError::NotFound(format!("schedule for round {round}")))
        });

        let coordinator = coordinator(
            standings_returning(four_teams()),
            availability,
            MockMatchStore::new(),
            MockNotifier::new(),
        );

        let err = coordinator
            .make_matches(&RoundRequest::new("cup", 1))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "not_found");
        assert_eq!(err.to_string(), "schedule for round 1 not found");
    }

    #[tokio::test]
    async fn test_standings_outage_is_data_unavailable() {
        let mut standings = MockStandingsProvider::new();
        standings.expect_standings().returning(|_| {
            Err(CollaboratorError::Unavailable {
                service: "tournament",
                message: "timed out".to_string(),
            })
        });
        let mut availability = MockAvailabilityProvider::new();
        availability.expect_availability().never();

        let coordinator = coordinator(
            standings,
            availability,
            MockMatchStore::new(),
            MockNotifier::new(),
        );

        let err = coordinator
            .make_matches(&RoundRequest::new("cup", 1))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "data_unavailable");
    }

    #[tokio::test]
    async fn test_invalid_request_touches_nothing() {
        let mut standings = MockStandingsProvider::new();
        standings.expect_standings().never();

        let coordinator = coordinator(
            standings,
            MockAvailabilityProvider::new(),
            MockMatchStore::new(),
            MockNotifier::new(),
        );

        let err = coordinator
            .make_matches(&RoundRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CoordinatorError::InputValidation(ValidationError::MissingFields(ref fields))
                if fields == &vec!["tournamentId", "roundNumber"]
        ));
    }

    #[test]
    fn test_request_accepts_string_round() {
        let request: RoundRequest =
            serde_json::from_str(r#"{"tournamentId": "cup", "roundNumber": "2"}"#).unwrap();
        assert_eq!(request.validate(), Ok(("cup".to_string(), 2)));
    }

    #[test]
    fn test_request_rejects_round_zero() {
        let request: RoundRequest =
            serde_json::from_str(r#"{"tournamentId": "cup", "roundNumber": 0}"#).unwrap();
        assert_eq!(request.validate(), Err(ValidationError::InvalidRoundNumber));
    }
}
