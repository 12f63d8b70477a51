//! Group table rows and the derived standings map.

use crate::models::team::{GroupKey, Team, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const POINTS_FOR_WIN: u32 = 3;
pub const POINTS_FOR_DRAW: u32 = 1;

/// Ranking key shared by full tables, head-to-head mini-tables and third-place ranking.
pub type RankKey = (u32, i64, u32);

/// Points and goals, the minimum needed to rank teams.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Tally {
    pub points: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}

impl Tally {
    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }

    pub fn record(&mut self, scored: u32, conceded: u32) {
        self.goals_for = self.goals_for.saturating_add(scored);
        self.goals_against = self.goals_against.saturating_add(conceded);
        self.points += match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => POINTS_FOR_WIN,
            std::cmp::Ordering::Equal => POINTS_FOR_DRAW,
            std::cmp::Ordering::Less => 0,
        };
    }

    /// points, goal difference, goals for; compare descending.
    pub fn rank_key(&self) -> RankKey {
        (self.points, self.goal_difference(), self.goals_for)
    }
}

/// One row of a group table.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStanding {
    pub id: TeamId,
    pub name: String,
    pub code: String,
    /// Position in the group roster, for a stable display before any match is played.
    pub order: usize,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub points: u32,
    pub highlight: bool,
}

impl GroupStanding {
    /// A zeroed row. Falls back to the id as name when the team is unknown.
    pub fn new(id: &TeamId, team: Option<&Team>, order: usize) -> Self {
        Self {
            id: id.clone(),
            name: team.map_or_else(|| id.clone(), |t| t.name.clone()),
            code: team.map(|t| t.code.clone()).unwrap_or_default(),
            order,
            highlight: team.is_some_and(|t| t.highlight),
            ..Self::default()
        }
    }

    /// Fold one finished match into the row. Goal totals saturate.
    pub fn record(&mut self, scored: u32, conceded: u32) {
        self.played += 1;
        self.goals_for = self.goals_for.saturating_add(scored);
        self.goals_against = self.goals_against.saturating_add(conceded);
        match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => {
                self.won += 1;
                self.points += POINTS_FOR_WIN;
            }
            std::cmp::Ordering::Equal => {
                self.drawn += 1;
                self.points += POINTS_FOR_DRAW;
            }
            std::cmp::Ordering::Less => self.lost += 1,
        }
    }

    pub fn rank_key(&self) -> RankKey {
        (self.points, self.goal_difference, self.goals_for)
    }
}

/// A group's ranked table.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupTable {
    pub name: String,
    pub teams: Vec<GroupStanding>,
}

/// Ranked tables by group key.
pub type Standings = BTreeMap<GroupKey, GroupTable>;

/// The standings read model: tables plus the provisional best third-placed teams.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsReport {
    pub standings: Standings,
    pub best_third_placed: Vec<TeamId>,
}
