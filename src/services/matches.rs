use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use super::{decode, endpoint, read_body, transport_error};
use crate::coordinator::collaborators::{CollaboratorError, MatchRecord, MatchStore, NewMatch};
use crate::core::types::{Day, MatchId, MatchOutcome, Score, TeamId};

const SERVICE: &str = "match";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateMatchBody<'a> {
    tournament_id: &'a str,
    #[serde(rename = "teamAId")]
    team_a_id: &'a TeamId,
    #[serde(rename = "teamBId")]
    team_b_id: &'a TeamId,
    scheduled_time: &'a Day,
}

impl<'a> From<&'a NewMatch> for CreateMatchBody<'a> {
    fn from(new_match: &'a NewMatch) -> Self {
        Self {
            tournament_id: &new_match.tournament_id,
            team_a_id: &new_match.team_a,
            team_b_id: &new_match.team_b,
            scheduled_time: &new_match.scheduled_day,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedBody {
    match_id: MatchId,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchDoc {
    #[serde(default)]
    tournament_id: String,
    #[serde(default, rename = "teamAId")]
    team_a_id: String,
    #[serde(default, rename = "teamBId")]
    team_b_id: String,
    #[serde(default)]
    scheduled_time: Option<Day>,
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl From<MatchDoc> for MatchRecord {
    fn from(doc: MatchDoc) -> Self {
        MatchRecord {
            tournament_id: doc.tournament_id,
            team_a: TeamId::new(doc.team_a_id),
            team_b: TeamId::new(doc.team_b_id),
            scheduled_day: doc.scheduled_time,
            result: doc.result,
            status: doc.status,
        }
    }
}

#[derive(Debug, Serialize)]
struct ResultBody {
    result: MatchOutcome,
    score: Score,
}

/// Client for the match service
pub struct MatchClient {
    client: reqwest::Client,
    base: Url,
}

impl MatchClient {
    pub fn new(client: reqwest::Client, base: Url) -> Self {
        Self { client, base }
    }
}

#[async_trait]
impl MatchStore for MatchClient {
    async fn create_match(&self, new_match: &NewMatch) -> Result<MatchId, CollaboratorError> {
        let url = endpoint(&self.base, &["match"]);
        let response = self
            .client
            .post(url)
            .json(&CreateMatchBody::from(new_match))
            .send()
            .await
            .map_err(|err| transport_error(SERVICE, err))?;

        let text = read_body(SERVICE, || "match endpoint".to_string(), response).await?;
        let created: CreatedBody = decode(SERVICE, &text)?;
        Ok(created.match_id)
    }

    async fn get_match(&self, match_id: &MatchId) -> Result<MatchRecord, CollaboratorError> {
        let url = endpoint(&self.base, &["match", match_id.0.as_str()]);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| transport_error(SERVICE, err))?;

        let text = read_body(SERVICE, || format!("match {match_id}"), response).await?;
        let doc: MatchDoc = decode(SERVICE, &text)?;
        Ok(doc.into())
    }

    async fn record_result(
        &self,
        match_id: &MatchId,
        outcome: MatchOutcome,
        score: Score,
    ) -> Result<(), CollaboratorError> {
        let url = endpoint(&self.base, &["match", match_id.0.as_str(), "result"]);
        let response = self
            .client
            .put(url)
            .json(&ResultBody {
                result: outcome,
                score,
            })
            .send()
            .await
            .map_err(|err| transport_error(SERVICE, err))?;

        read_body(SERVICE, || format!("match {match_id}"), response).await?;
        Ok(())
    }
}
