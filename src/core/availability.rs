use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::core::types::{Day, TeamId};

/// Which teams declared themselves available on which day of a round.
///
/// Deserializes straight from the schedule service's `teamAvailableDays`
/// document (`{"Mon": ["A", "B"]}`). Duplicate team ids within a day collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvailabilityIndex {
    days: BTreeMap<Day, BTreeSet<TeamId>>,
}

impl AvailabilityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one team's declared days into the index.
    ///
    /// Re-submitting a day the team already declared is a no-op.
    pub fn record<I>(&mut self, team: &TeamId, days: I)
    where
        I: IntoIterator<Item = Day>,
    {
        for day in days {
            self.days.entry(day).or_default().insert(team.clone());
        }
    }

    /// Builder form of [`AvailabilityIndex::record`]
    #[must_use]
    pub fn with_day(mut self, day: &str, teams: &[&str]) -> Self {
        let entry = self.days.entry(Day::new(day)).or_default();
        entry.extend(teams.iter().map(|t| TeamId::new(*t)));
        self
    }

    /// Teams available on a given day
    pub fn teams_on(&self, day: &Day) -> Option<&BTreeSet<TeamId>> {
        self.days.get(day)
    }

    pub fn days(&self) -> impl Iterator<Item = &Day> {
        self.days.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.days.values().all(BTreeSet::is_empty)
    }

    /// Invert into a per-team view for intersection tests
    pub fn by_team(&self) -> TeamDays {
        let mut map: HashMap<TeamId, BTreeSet<Day>> = HashMap::new();
        for (day, teams) in &self.days {
            for team in teams {
                map.entry(team.clone()).or_default().insert(day.clone());
            }
        }
        TeamDays { map }
    }
}

/// Per-team available days, the inverse of [`AvailabilityIndex`]
#[derive(Debug, Clone, Default)]
pub struct TeamDays {
    map: HashMap<TeamId, BTreeSet<Day>>,
}

impl TeamDays {
    pub fn days_of(&self, team: &TeamId) -> Option<&BTreeSet<Day>> {
        self.map.get(team)
    }

    /// Earliest day both teams can play, if any
    pub fn first_common_day(&self, a: &TeamId, b: &TeamId) -> Option<&Day> {
        let (days_a, days_b) = (self.map.get(a)?, self.map.get(b)?);
        // Both sets iterate in ascending Day order
        days_a.intersection(days_b).next()
    }

    pub fn is_available(&self, team: &TeamId, day: &Day) -> bool {
        self.map.get(team).is_some_and(|days| days.contains(day))
    }
}
