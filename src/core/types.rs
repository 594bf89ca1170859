use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Unique identifier for a team within a tournament
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub String);

impl TeamId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TeamId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Identifier assigned to a match by the match store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub String);

impl MatchId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day label as declared by teams when submitting availability.
///
/// Labels are free-form ("Mon", "Saturday", "2024-03-02"). Ordering is what
/// picks the day for a pair when two teams share several:
///
/// - labels that parse as ISO-8601 dates order chronologically
/// - every date sorts before every non-date label
/// - everything else orders lexicographically
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Day(pub String);

impl Day {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Calendar date for date-like labels
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.0.trim(), "%Y-%m-%d").ok()
    }
}

impl Ord for Day {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.as_date(), other.as_date()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for Day {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Day {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Result of a played match, using the labels the match service stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    #[serde(rename = "teamA won")]
    TeamAWon,
    #[serde(rename = "teamB won")]
    TeamBWon,
    #[serde(rename = "draw")]
    Draw,
}

impl MatchOutcome {
    /// Parse the wire label of an outcome
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "teamA won" => Some(Self::TeamAWon),
            "teamB won" => Some(Self::TeamBWon),
            "draw" => Some(Self::Draw),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::TeamAWon => "teamA won",
            Self::TeamBWon => "teamB won",
            Self::Draw => "draw",
        }
    }
}

impl std::fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Final score of a match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    #[serde(rename = "teamA", default)]
    pub team_a: u32,
    #[serde(rename = "teamB", default)]
    pub team_b: u32,
}
