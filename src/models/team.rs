//! Team, Group and Playoff data structures.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Stable string key of a team (e.g. "cro").
pub type TeamId = String;

/// Group key, "A" through "L".
pub type GroupKey = String;

/// Key of a playoff path (e.g. "UEFA-A").
pub type PlayoffId = String;

/// A national team.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    #[serde(default)]
    pub name: String,
    /// Flag / ISO-like code.
    #[serde(default)]
    pub code: String,
    /// UI emphasis flag.
    #[serde(default)]
    pub highlight: bool,
    #[serde(default)]
    pub qualified: bool,
    /// Group the team was drawn into; absent while it waits on a playoff.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupKey>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Team {
    pub fn new(id: impl Into<TeamId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Mark the team as qualified into `group`.
    pub fn qualify(&mut self, group: Option<GroupKey>) {
        self.qualified = true;
        self.group = group;
    }

    /// Withdraw a previously granted qualification.
    pub fn disqualify(&mut self) {
        self.qualified = false;
        self.group = None;
    }
}

/// A four-team group. A `None` slot is waiting on the winner of `playoff_slot`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(default)]
    pub name: String,
    pub teams: Vec<Option<TeamId>>,
    #[serde(default)]
    pub playoff_slot: Option<PlayoffId>,
}

impl Group {
    pub fn contains(&self, team: &str) -> bool {
        self.teams.iter().any(|slot| slot.as_deref() == Some(team))
    }

    /// Team ids in roster order, skipping pending slots.
    pub fn roster(&self) -> impl Iterator<Item = &TeamId> {
        self.teams.iter().flatten()
    }

    /// Empty the slot holding `team`. Returns whether it was present.
    pub fn vacate(&mut self, team: &str) -> bool {
        match self.teams.iter_mut().find(|slot| slot.as_deref() == Some(team)) {
            Some(slot) => {
                *slot = None;
                true
            }
            None => false,
        }
    }

    /// Put `team` into the first pending slot. Returns whether a slot was free.
    pub fn seat(&mut self, team: TeamId) -> bool {
        match self.teams.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(team);
                true
            }
            None => false,
        }
    }
}

/// An intercontinental or UEFA playoff path whose winner fills one group slot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playoff {
    #[serde(default)]
    pub id: PlayoffId,
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Candidate team ids.
    #[serde(default)]
    pub teams: Vec<TeamId>,
    #[serde(default)]
    pub winner: Option<TeamId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
