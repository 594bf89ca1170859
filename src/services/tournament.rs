use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{decode, endpoint, read_body, transport_error};
use crate::coordinator::collaborators::{CollaboratorError, StandingsProvider};
use crate::core::team::{Team, DEFAULT_RATING};
use crate::core::types::TeamId;

const SERVICE: &str = "tournament";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TournamentDoc {
    #[serde(default)]
    teams: Vec<TeamDoc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamDoc {
    team_id: String,
    #[serde(default)]
    team_stats: TeamStats,
}

#[derive(Debug, Clone, Deserialize)]
struct TeamStats {
    #[serde(default)]
    wins: u32,
    #[serde(default)]
    losses: u32,
    #[serde(default = "default_elo")]
    elo: i64,
}

impl Default for TeamStats {
    fn default() -> Self {
        Self {
            wins: 0,
            losses: 0,
            elo: DEFAULT_RATING,
        }
    }
}

fn default_elo() -> i64 {
    DEFAULT_RATING
}

impl From<TeamDoc> for Team {
    fn from(doc: TeamDoc) -> Self {
        Team {
            id: TeamId::new(doc.team_id),
            wins: doc.team_stats.wins,
            losses: doc.team_stats.losses,
            rating: doc.team_stats.elo,
        }
    }
}

/// Parse the standings out of a tournament document
pub fn parse_standings(text: &str) -> Result<Vec<Team>, CollaboratorError> {
    let doc: TournamentDoc = decode(SERVICE, text)?;
    Ok(doc.teams.into_iter().map(Team::from).collect())
}

/// Overwrite `teamStats` of the given teams inside a raw tournament document.
///
/// Everything else in each team entry (players, names) is left as found.
/// Returns the patched `teams` array.
pub fn patch_team_stats(doc: &mut Value, teams: &[Team]) -> Result<Value, CollaboratorError> {
    let entries = doc
        .get_mut("teams")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| CollaboratorError::Decode {
            service: SERVICE,
            message: "tournament document has no teams array".to_string(),
        })?;

    for team in teams {
        let entry = entries
            .iter_mut()
            .find(|entry| entry.get("teamId").and_then(Value::as_str) == Some(team.id.as_str()))
            .ok_or_else(|| CollaboratorError::NotFound(format!("team {}", team.id)))?;

        entry["teamStats"] = json!({
            "wins": team.wins,
            "losses": team.losses,
            "elo": team.rating,
        });
    }

    Ok(Value::Array(entries.clone()))
}

/// Client for the tournament service
pub struct TournamentClient {
    client: reqwest::Client,
    base: Url,
}

impl TournamentClient {
    pub fn new(client: reqwest::Client, base: Url) -> Self {
        Self { client, base }
    }

    async fn fetch(&self, tournament_id: &str) -> Result<String, CollaboratorError> {
        let url = endpoint(&self.base, &["tournament", tournament_id]);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| transport_error(SERVICE, err))?;
        read_body(SERVICE, || format!("tournament {tournament_id}"), response).await
    }
}

#[async_trait]
impl StandingsProvider for TournamentClient {
    async fn standings(&self, tournament_id: &str) -> Result<Vec<Team>, CollaboratorError> {
        let text = self.fetch(tournament_id).await?;
        parse_standings(&text)
    }

    async fn update_standings(
        &self,
        tournament_id: &str,
        teams: &[Team],
    ) -> Result<(), CollaboratorError> {
        let text = self.fetch(tournament_id).await?;
        let mut doc: Value = decode(SERVICE, &text)?;
        let patched = patch_team_stats(&mut doc, teams)?;

        let url = endpoint(&self.base, &["tournament", tournament_id, "update_team_stats"]);
        tracing::debug!("PUT {}", url);

        let response = self
            .client
            .put(url)
            .json(&json!({ "teams": patched }))
            .send()
            .await
            .map_err(|err| transport_error(SERVICE, err))?;
        read_body(SERVICE, || format!("tournament {tournament_id}"), response).await?;
        Ok(())
    }
}
