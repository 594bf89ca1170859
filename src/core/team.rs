use serde::{Deserialize, Serialize};

use crate::core::types::{MatchOutcome, TeamId};

/// Rating assigned to teams whose standings carry none
pub const DEFAULT_RATING: i64 = 1500;

/// Rating change for a decisive result
pub const WIN_RATING_DELTA: i64 = 10;

/// Rating change for both teams on a draw
pub const DRAW_RATING_DELTA: i64 = 5;

/// A team's standing within one tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,

    #[serde(default)]
    pub wins: u32,

    #[serde(default)]
    pub losses: u32,

    /// ELO-like skill estimate
    #[serde(default = "default_rating")]
    pub rating: i64,
}

fn default_rating() -> i64 {
    DEFAULT_RATING
}

impl Team {
    pub fn new(id: impl Into<String>, wins: u32, losses: u32, rating: i64) -> Self {
        Self {
            id: TeamId::new(id),
            wins,
            losses,
            rating,
        }
    }

    fn after_win(&self) -> Result<Self, StandingsError> {
        Ok(Self {
            wins: self.wins.checked_add(1).ok_or_else(|| self.overflow())?,
            rating: self.adjusted_rating(WIN_RATING_DELTA)?,
            ..self.clone()
        })
    }

    fn after_loss(&self) -> Result<Self, StandingsError> {
        Ok(Self {
            losses: self.losses.checked_add(1).ok_or_else(|| self.overflow())?,
            rating: self.adjusted_rating(-WIN_RATING_DELTA)?,
            ..self.clone()
        })
    }

    fn after_draw(&self) -> Result<Self, StandingsError> {
        Ok(Self {
            rating: self.adjusted_rating(DRAW_RATING_DELTA)?,
            ..self.clone()
        })
    }

    fn adjusted_rating(&self, delta: i64) -> Result<i64, StandingsError> {
        self.rating.checked_add(delta).ok_or_else(|| self.overflow())
    }

    fn overflow(&self) -> StandingsError {
        StandingsError::Overflow(self.id.clone())
    }
}

/// Error applying a match outcome to standings
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StandingsError {
    #[error("Team {0} is not part of the tournament standings")]
    UnknownTeam(TeamId),

    #[error("Standings of team {0} cannot absorb another result")]
    Overflow(TeamId),
}

/// Apply a finished match to the standings in place.
///
/// Only the two teams of the match are touched. Both must be present and their
/// figures must stay in range, otherwise nothing is modified.
///
/// # Errors
///
/// Returns `StandingsError::UnknownTeam` if either team is missing and
/// `StandingsError::Overflow` if a count or rating would leave its range.
pub fn apply_outcome(
    teams: &mut [Team],
    team_a: &TeamId,
    team_b: &TeamId,
    outcome: MatchOutcome,
) -> Result<(), StandingsError> {
    let a = position(teams, team_a)?;
    let b = position(teams, team_b)?;

    let (new_a, new_b) = match outcome {
        MatchOutcome::TeamAWon => (teams[a].after_win()?, teams[b].after_loss()?),
        MatchOutcome::TeamBWon => (teams[a].after_loss()?, teams[b].after_win()?),
        MatchOutcome::Draw => (teams[a].after_draw()?, teams[b].after_draw()?),
    };
    teams[a] = new_a;
    teams[b] = new_b;

    Ok(())
}

fn position(teams: &[Team], id: &TeamId) -> Result<usize, StandingsError> {
    teams
        .iter()
        .position(|t| &t.id == id)
        .ok_or_else(|| StandingsError::UnknownTeam(id.clone()))
}
