//! HTTP clients for the tournament services.
//!
//! Each client implements one collaborator trait from
//! [`crate::coordinator::collaborators`]. Requests are sent once with no
//! retries and no client-side timeout.

pub mod matches;
pub mod notify;
pub mod schedule;
pub mod tournament;

use std::sync::Arc;

use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;

pub use matches::MatchClient;
pub use notify::{LogNotifier, WebhookNotifier};
pub use schedule::ScheduleClient;
pub use tournament::TournamentClient;

use crate::config::{ConfigError, ServiceConfig};
use crate::coordinator::collaborators::{CollaboratorError, Notifier};
use crate::coordinator::Coordinator;

/// Wire the coordinator to the services named in the configuration
pub fn build_coordinator(config: &ServiceConfig) -> Result<Coordinator, ConfigError> {
    let client = reqwest::Client::new();

    let tournament_url = parse_url("tournament_url", &config.tournament_url)?;
    let schedule_url = parse_url("schedule_url", &config.schedule_url)?;
    let match_url = parse_url("match_url", &config.match_url)?;

    let tournament = TournamentClient::new(client.clone(), tournament_url);
    let schedule = ScheduleClient::new(client.clone(), schedule_url);
    let matches = MatchClient::new(client.clone(), match_url);

    let notifier: Arc<dyn Notifier> = match &config.notification_webhook {
        Some(webhook) => Arc::new(WebhookNotifier::new(
            client,
            parse_url("notification_webhook", webhook)?,
        )),
        None => {
            tracing::warn!("No notification webhook configured; announcements are only logged");
            Arc::new(LogNotifier)
        }
    };

    Ok(Coordinator::new(
        Arc::new(tournament),
        Arc::new(schedule),
        Arc::new(matches),
        notifier,
    ))
}

fn parse_url(key: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|_| ConfigError::InvalidUrl {
        key,
        value: value.to_string(),
    })
}

/// Append path segments to a base URL, percent-encoding each one
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

pub(crate) fn transport_error(service: &'static str, err: reqwest::Error) -> CollaboratorError {
    CollaboratorError::Unavailable {
        service,
        message: err.to_string(),
    }
}

/// Read a response body, mapping 404 and other non-success statuses
pub(crate) async fn read_body(
    service: &'static str,
    what: impl FnOnce() -> String,
    response: Response,
) -> Result<String, CollaboratorError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|err| transport_error(service, err))?;

    if status == StatusCode::NOT_FOUND {
        return Err(CollaboratorError::NotFound(what()));
    }
    if !status.is_success() {
        return Err(CollaboratorError::Rejected {
            service,
            status: status.as_u16(),
            body: text,
        });
    }
    Ok(text)
}

pub(crate) fn decode<T: DeserializeOwned>(
    service: &'static str,
    text: &str,
) -> Result<T, CollaboratorError> {
    serde_json::from_str(text).map_err(|err| CollaboratorError::Decode {
        service,
        message: err.to_string(),
    })
}
