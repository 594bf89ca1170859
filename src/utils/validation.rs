//! Centralized validation of request fields.

use serde::{Deserialize, Serialize};

/// Maximum number of teams accepted for a single round
pub const MAX_TEAMS: usize = 1024;

/// Maximum length of tournament and match identifiers
pub const MAX_ID_LENGTH: usize = 128;

/// Maximum length of free-text fields such as a dispute reason
pub const MAX_TEXT_LENGTH: usize = 4096;

/// Validation error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid {field}: expected 1-{MAX_ID_LENGTH} letters, digits, '-' or '_'")]
    InvalidIdentifier { field: &'static str },

    #[error("Invalid roundNumber: expected a whole number of at least 1")]
    InvalidRoundNumber,

    #[error("Invalid result: expected one of 'teamA won', 'teamB won', 'draw'")]
    InvalidOutcome,

    #[error("Invalid evidenceUrl: expected an absolute http(s) URL")]
    InvalidEvidenceUrl,

    #[error("{field} exceeds {MAX_TEXT_LENGTH} characters")]
    TextTooLong { field: &'static str },

    #[error("Too many teams: {count} exceeds maximum of {MAX_TEAMS}")]
    TooManyTeams { count: usize },

    #[error("Match {0} is missing tournament or team data")]
    IncompleteMatch(String),
}

/// A round number as callers actually send it: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRoundNumber {
    Number(serde_json::Number),
    Text(String),
}

impl RawRoundNumber {
    /// Parse into a round number of at least 1.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidRoundNumber` for fractions, negatives,
    /// zero, out-of-range values and non-numeric text.
    pub fn parse(&self) -> Result<u32, ValidationError> {
        let value = match self {
            Self::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
            Self::Text(s) => s.trim().parse::<u32>().ok(),
        };

        match value {
            Some(round) if round >= 1 => Ok(round),
            _ => Err(ValidationError::InvalidRoundNumber),
        }
    }
}

impl From<u32> for RawRoundNumber {
    fn from(round: u32) -> Self {
        Self::Number(round.into())
    }
}

/// Validate a tournament or match identifier.
///
/// Surrounding whitespace is trimmed; the remainder must be non-empty, at most
/// [`MAX_ID_LENGTH`] characters, and only ASCII alphanumerics, `-` or `_`.
///
/// # Examples
///
/// ```
/// use round_pairing::utils::validation::validate_identifier;
///
/// assert_eq!(validate_identifier("tournamentId", " spring_cup-24 ").unwrap(), "spring_cup-24");
/// assert!(validate_identifier("tournamentId", "../admin").is_err());
/// assert!(validate_identifier("tournamentId", "").is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::InvalidIdentifier` naming `field`.
pub fn validate_identifier(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    let valid = !trimmed.is_empty()
        && trimmed.len() <= MAX_ID_LENGTH
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(trimmed.to_string())
    } else {
        Err(ValidationError::InvalidIdentifier { field })
    }
}

/// Validate a free-text field, returning it trimmed.
///
/// # Errors
///
/// Returns `ValidationError::MissingFields` for blank text and
/// `ValidationError::TextTooLong` past [`MAX_TEXT_LENGTH`].
pub fn validate_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingFields(vec![field]));
    }
    if trimmed.chars().count() > MAX_TEXT_LENGTH {
        return Err(ValidationError::TextTooLong { field });
    }
    Ok(trimmed.to_string())
}

/// Validate that evidence points at an absolute http(s) URL.
///
/// # Errors
///
/// Returns `ValidationError::InvalidEvidenceUrl` otherwise.
pub fn validate_evidence_url(value: &str) -> Result<String, ValidationError> {
    let url = reqwest::Url::parse(value.trim()).map_err(|_| ValidationError::InvalidEvidenceUrl)?;
    if matches!(url.scheme(), "http" | "https") && url.has_host() {
        Ok(url.to_string())
    } else {
        Err(ValidationError::InvalidEvidenceUrl)
    }
}

/// Check that a round does not exceed the team limit.
///
/// # Errors
///
/// Returns `ValidationError::TooManyTeams` past [`MAX_TEAMS`].
pub fn check_team_limit(count: usize) -> Result<(), ValidationError> {
    if count > MAX_TEAMS {
        Err(ValidationError::TooManyTeams { count })
    } else {
        Ok(())
    }
}

/// Collect the names of required fields that are absent or blank.
///
/// # Errors
///
/// Returns `ValidationError::MissingFields` listing every missing field in order.
pub fn require_fields(fields: &[(&'static str, Option<&str>)]) -> Result<(), ValidationError> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, value)| value.map_or(true, |v| v.trim().is_empty()))
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingFields(missing))
    }
}
