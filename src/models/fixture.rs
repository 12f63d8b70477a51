//! Match, Side, Round and the knockout stage layout.

use crate::models::error::TournamentError;
use crate::models::team::{GroupKey, PlayoffId, TeamId};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Numeric match id as stored in the fixtures file.
pub type MatchId = u32;

/// Highest goal or penalty count accepted in a result update.
pub const MAX_GOALS: u32 = 99;

/// Which side of a match came out on top.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

/// Knockout round, in bracket order.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Round {
    RoundOf32,
    RoundOf16,
    QuarterFinals,
    SemiFinals,
    ThirdPlace,
    Final,
}

impl Round {
    /// Resolution order: every round only depends on rounds before it.
    pub const ALL: [Round; 6] = [
        Round::RoundOf32,
        Round::RoundOf16,
        Round::QuarterFinals,
        Round::SemiFinals,
        Round::ThirdPlace,
        Round::Final,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Round::RoundOf32 => "roundOf32",
            Round::RoundOf16 => "roundOf16",
            Round::QuarterFinals => "quarterFinals",
            Round::SemiFinals => "semiFinals",
            Round::ThirdPlace => "thirdPlace",
            Round::Final => "final",
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Round {
    type Err = TournamentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Round::ALL
            .into_iter()
            .find(|round| round.as_str() == s)
            .ok_or_else(|| TournamentError::RoundNotFound(s.to_string()))
    }
}

/// A single fixture, group stage or knockout.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    /// Cross-reference key used by bracket descriptions, e.g. "M74".
    #[serde(default)]
    pub match_code: String,
    /// `YYYY-MM-DD`.
    #[serde(default)]
    pub date: String,
    /// `HH:MM`; midnight when absent.
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    /// None for knockout matches.
    #[serde(default)]
    pub group: Option<GroupKey>,
    #[serde(default)]
    pub home_team: Option<TeamId>,
    #[serde(default)]
    pub away_team: Option<TeamId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_team_playoff: Option<PlayoffId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_team_playoff: Option<PlayoffId>,
    #[serde(default)]
    pub home_score: Option<u32>,
    #[serde(default)]
    pub away_score: Option<u32>,
    #[serde(default)]
    pub home_penalty: Option<u32>,
    #[serde(default)]
    pub away_penalty: Option<u32>,
    #[serde(default)]
    pub played: bool,
    /// Slot label before teams are known, e.g. "1A vs 3C/D/E" or "W74 vs W77".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Match {
    /// An unplayed group fixture between two known teams.
    pub fn group_fixture(
        id: MatchId,
        group: impl Into<GroupKey>,
        home: impl Into<TeamId>,
        away: impl Into<TeamId>,
    ) -> Self {
        Self {
            id,
            match_code: format!("M{id}"),
            group: Some(group.into()),
            home_team: Some(home.into()),
            away_team: Some(away.into()),
            ..Self::default()
        }
    }

    /// An empty knockout fixture waiting on the slots named in `description`.
    pub fn knockout_fixture(id: MatchId, description: impl Into<String>) -> Self {
        Self {
            id,
            match_code: format!("M{id}"),
            description: Some(description.into()),
            ..Self::default()
        }
    }

    pub fn has_score(&self) -> bool {
        self.home_score.is_some() && self.away_score.is_some()
    }

    /// Played with a full scoreline; the only state that counts towards a table.
    pub fn is_complete(&self) -> bool {
        self.played && self.has_score()
    }

    pub fn team(&self, side: Side) -> Option<&TeamId> {
        match side {
            Side::Home => self.home_team.as_ref(),
            Side::Away => self.away_team.as_ref(),
        }
    }

    pub fn involves(&self, team: &str) -> bool {
        self.home_team.as_deref() == Some(team) || self.away_team.as_deref() == Some(team)
    }

    /// Higher score wins; a level score is settled by penalties.
    pub fn outcome(&self) -> Option<Side> {
        let (home, away) = (self.home_score?, self.away_score?);
        if home != away {
            return Some(if home > away { Side::Home } else { Side::Away });
        }
        let (home_pens, away_pens) = (self.home_penalty?, self.away_penalty?);
        match home_pens.cmp(&away_pens) {
            std::cmp::Ordering::Greater => Some(Side::Home),
            std::cmp::Ordering::Less => Some(Side::Away),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn winner(&self) -> Option<&TeamId> {
        let side = self.outcome()?;
        self.team(side.opponent())?;
        self.team(side)
    }

    pub fn loser(&self) -> Option<&TeamId> {
        let side = self.outcome()?.opponent();
        self.team(side.opponent())?;
        self.team(side)
    }

    /// Drop scores, penalties and the played flag.
    pub fn clear_result(&mut self) {
        self.home_score = None;
        self.away_score = None;
        self.home_penalty = None;
        self.away_penalty = None;
        self.played = false;
    }

    /// Group matches count as played once both scores are in. Penalties never apply.
    pub fn settle_group_result(&mut self) {
        self.home_penalty = None;
        self.away_penalty = None;
        self.played = self.has_score();
    }

    /// Knockout matches: a decisive score clears penalties. A level one is only
    /// played once the shoot-out has a winner.
    pub fn settle_knockout_result(&mut self) {
        if self.home_score != self.away_score {
            self.home_penalty = None;
            self.away_penalty = None;
        }
        self.played = self.outcome().is_some();
    }

    /// Kickoff instant parsed from `date` and `time`.
    pub fn kickoff(&self) -> Option<NaiveDateTime> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()?;
        let time = match self.time.as_deref() {
            Some(t) if !t.is_empty() => NaiveTime::parse_from_str(t, "%H:%M").ok()?,
            _ => NaiveTime::MIN,
        };
        Some(date.and_time(time))
    }
}

/// Round of 32 through the final.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnockoutStage {
    #[serde(default)]
    pub round_of32: Vec<Match>,
    #[serde(default)]
    pub round_of16: Vec<Match>,
    #[serde(default)]
    pub quarter_finals: Vec<Match>,
    #[serde(default)]
    pub semi_finals: Vec<Match>,
    #[serde(default)]
    pub third_place: Option<Match>,
    #[serde(rename = "final", default)]
    pub final_match: Option<Match>,
}

impl KnockoutStage {
    pub fn round(&self, round: Round) -> &[Match] {
        match round {
            Round::RoundOf32 => &self.round_of32,
            Round::RoundOf16 => &self.round_of16,
            Round::QuarterFinals => &self.quarter_finals,
            Round::SemiFinals => &self.semi_finals,
            Round::ThirdPlace => self.third_place.as_slice(),
            Round::Final => self.final_match.as_slice(),
        }
    }

    pub fn round_mut(&mut self, round: Round) -> &mut [Match] {
        match round {
            Round::RoundOf32 => &mut self.round_of32,
            Round::RoundOf16 => &mut self.round_of16,
            Round::QuarterFinals => &mut self.quarter_finals,
            Round::SemiFinals => &mut self.semi_finals,
            Round::ThirdPlace => self.third_place.as_mut_slice(),
            Round::Final => self.final_match.as_mut_slice(),
        }
    }

    /// All knockout matches in bracket order.
    pub fn iter(&self) -> impl Iterator<Item = &Match> {
        Round::ALL.into_iter().flat_map(move |round| self.round(round))
    }

    pub fn find_by_code(&self, code: &str) -> Option<&Match> {
        self.iter().find(|m| m.match_code == code)
    }
}

/// The fixtures file: group stage plus knockout stage.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixtures {
    #[serde(default)]
    pub group_stage: Vec<Match>,
    #[serde(default)]
    pub knockout_stage: KnockoutStage,
}

impl Fixtures {
    /// Every match, group stage first.
    pub fn iter(&self) -> impl Iterator<Item = &Match> {
        self.group_stage.iter().chain(self.knockout_stage.iter())
    }

    pub fn find(&self, id: MatchId) -> Option<&Match> {
        self.iter().find(|m| m.id == id)
    }

    /// Look a match up by code, group stage first.
    pub fn find_by_code(&self, code: &str) -> Option<&Match> {
        self.group_stage
            .iter()
            .find(|m| m.match_code == code)
            .or_else(|| self.knockout_stage.find_by_code(code))
    }

    /// Every match, mutably, group stage first.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Match> {
        let stage = &mut self.knockout_stage;
        self.group_stage
            .iter_mut()
            .chain(stage.round_of32.iter_mut())
            .chain(stage.round_of16.iter_mut())
            .chain(stage.quarter_finals.iter_mut())
            .chain(stage.semi_finals.iter_mut())
            .chain(stage.third_place.iter_mut())
            .chain(stage.final_match.iter_mut())
    }

    /// Mutable lookup by id; the flag is true for knockout matches.
    pub fn find_mut(&mut self, id: MatchId) -> Option<(&mut Match, bool)> {
        let knockout = !self.group_stage.iter().any(|m| m.id == id);
        self.iter_mut().find(|m| m.id == id).map(|m| (m, knockout))
    }

    /// Next free id across both stages.
    pub fn next_id(&self) -> MatchId {
        self.iter().map(|m| m.id).max().unwrap_or(0) + 1
    }
}
