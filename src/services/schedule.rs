use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;

use super::{decode, endpoint, read_body, transport_error};
use crate::coordinator::collaborators::{AvailabilityProvider, CollaboratorError};
use crate::core::availability::AvailabilityIndex;
use crate::utils::validation::RawRoundNumber;

const SERVICE: &str = "schedule";

/// One round's schedule document
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDoc {
    #[serde(default)]
    pub round_number: Option<RawRoundNumber>,
    #[serde(default)]
    pub tournament: Option<TournamentRef>,
    #[serde(default)]
    pub team_available_days: AvailabilityIndex,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentRef {
    #[serde(default)]
    pub tournament_id: Option<String>,
}

impl ScheduleDoc {
    fn is_for(&self, tournament_id: &str, round_number: u32) -> bool {
        let same_round = self
            .round_number
            .as_ref()
            .is_some_and(|r| r.parse().ok() == Some(round_number));
        let same_tournament = self
            .tournament
            .as_ref()
            .and_then(|t| t.tournament_id.as_deref())
            == Some(tournament_id);
        same_round && same_tournament
    }
}

/// Availability of the first document matching the tournament and round
pub fn select_round(
    docs: Vec<ScheduleDoc>,
    tournament_id: &str,
    round_number: u32,
) -> Option<AvailabilityIndex> {
    docs.into_iter()
        .find(|doc| doc.is_for(tournament_id, round_number))
        .map(|doc| doc.team_available_days)
}

/// Client for the schedule service
pub struct ScheduleClient {
    client: reqwest::Client,
    base: Url,
}

impl ScheduleClient {
    pub fn new(client: reqwest::Client, base: Url) -> Self {
        Self { client, base }
    }
}

#[async_trait]
impl AvailabilityProvider for ScheduleClient {
    async fn availability(
        &self,
        tournament_id: &str,
        round_number: u32,
    ) -> Result<AvailabilityIndex, CollaboratorError> {
        let url = endpoint(&self.base, &["schedule", "by-tournament", tournament_id]);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| transport_error(SERVICE, err))?;
        let text = read_body(
            SERVICE,
            || format!("schedule for tournament {tournament_id}"),
            response,
        )
        .await?;
        let docs: Vec<ScheduleDoc> = decode(SERVICE, &text)?;

        select_round(docs, tournament_id, round_number).ok_or_else(|| {
            CollaboratorError::NotFound(format!("schedule for round {round_number}"))
        })
    }
}
