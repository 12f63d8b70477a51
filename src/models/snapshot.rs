//! Snapshot: the full tournament state handed to and returned by the resolvers.

use crate::models::fixture::{Fixtures, Match};
use crate::models::standing::Standings;
use crate::models::team::{Group, GroupKey, Playoff, PlayoffId, Team, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything the engine reads and writes. Resolvers never mutate an input
/// snapshot; they return a new one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub groups: BTreeMap<GroupKey, Group>,
    #[serde(default)]
    pub playoffs: BTreeMap<PlayoffId, Playoff>,
    #[serde(default)]
    pub matches: Fixtures,
    #[serde(default)]
    pub standings: Standings,
}

impl Snapshot {
    pub fn team(&self, id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn team_mut(&mut self, id: &str) -> Option<&mut Team> {
        self.teams.iter_mut().find(|t| t.id == id)
    }

    pub fn playoff_winner(&self, playoff: &str) -> Option<&TeamId> {
        self.playoffs.get(playoff)?.winner.as_ref()
    }

    /// Home team, falling back to the winner of the home playoff reference.
    pub fn home_team_of<'a>(&'a self, m: &'a Match) -> Option<&'a TeamId> {
        m.home_team.as_ref().or_else(|| {
            m.home_team_playoff
                .as_deref()
                .and_then(|p| self.playoff_winner(p))
        })
    }

    /// Away team, falling back to the winner of the away playoff reference.
    pub fn away_team_of<'a>(&'a self, m: &'a Match) -> Option<&'a TeamId> {
        m.away_team.as_ref().or_else(|| {
            m.away_team_playoff
                .as_deref()
                .and_then(|p| self.playoff_winner(p))
        })
    }

    /// Key of the group whose roster holds `team`.
    pub fn group_of(&self, team: &str) -> Option<&GroupKey> {
        self.groups
            .iter()
            .find(|(_, g)| g.contains(team))
            .map(|(key, _)| key)
    }
}
