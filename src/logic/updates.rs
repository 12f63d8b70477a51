//! Entry points that change results: match results, knockout results, playoff
//! winners and new fixtures. Each validates first, then re-resolves the whole
//! snapshot (standings, then bracket).

use crate::logic::bracket::{resolve_bracket, BracketPlan};
use crate::logic::playoffs::assign_playoff_winner;
use crate::logic::standings::compute_standings;
use crate::models::{
    GroupKey, Match, MatchId, Round, Snapshot, TeamId, TournamentError, MAX_GOALS,
};
use serde::{Deserialize, Deserializer};

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Scores and penalties to write. `Some(None)` clears a value.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreUpdate {
    #[serde(default, deserialize_with = "present")]
    pub home_score: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present")]
    pub away_score: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present")]
    pub home_penalty: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present")]
    pub away_penalty: Option<Option<i64>>,
}

/// Scores after validation, same tri-state as [`ScoreUpdate`].
#[derive(Clone, Copy, Debug, Default)]
struct ValidScores {
    home_score: Option<Option<u32>>,
    away_score: Option<Option<u32>>,
    home_penalty: Option<Option<u32>>,
    away_penalty: Option<Option<u32>>,
}

fn count(
    field: &'static str,
    value: Option<Option<i64>>,
) -> Result<Option<Option<u32>>, TournamentError> {
    match value {
        Some(Some(v)) => u32::try_from(v)
            .ok()
            .filter(|n| *n <= MAX_GOALS)
            .map(|n| Some(Some(n)))
            .ok_or(TournamentError::InvalidScore { field, value: v }),
        Some(None) => Ok(Some(None)),
        None => Ok(None),
    }
}

impl ScoreUpdate {
    pub fn new(home: u32, away: u32) -> Self {
        Self {
            home_score: Some(Some(home.into())),
            away_score: Some(Some(away.into())),
            ..Self::default()
        }
    }

    pub fn with_penalties(mut self, home: u32, away: u32) -> Self {
        self.home_penalty = Some(Some(home.into()));
        self.away_penalty = Some(Some(away.into()));
        self
    }

    /// Clear both scores.
    pub fn retract() -> Self {
        Self {
            home_score: Some(None),
            away_score: Some(None),
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<ValidScores, TournamentError> {
        Ok(ValidScores {
            home_score: count("homeScore", self.home_score)?,
            away_score: count("awayScore", self.away_score)?,
            home_penalty: count("homePenalty", self.home_penalty)?,
            away_penalty: count("awayPenalty", self.away_penalty)?,
        })
    }
}

impl ValidScores {
    fn apply_scores(&self, m: &mut Match) {
        if let Some(v) = self.home_score {
            m.home_score = v;
        }
        if let Some(v) = self.away_score {
            m.away_score = v;
        }
    }

    fn apply_penalties(&self, m: &mut Match) {
        if let Some(v) = self.home_penalty {
            m.home_penalty = v;
        }
        if let Some(v) = self.away_penalty {
            m.away_penalty = v;
        }
    }

    /// Scores, then penalties only if the scoreline is level.
    fn apply_knockout(&self, m: &mut Match) {
        self.apply_scores(m);
        if m.home_score == m.away_score {
            self.apply_penalties(m);
        }
        m.settle_knockout_result();
    }
}

/// A result (and fixture details) for any match.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchUpdate {
    #[serde(flatten)]
    pub scores: ScoreUpdate,
    #[serde(default, deserialize_with = "present")]
    pub home_team: Option<Option<TeamId>>,
    #[serde(default, deserialize_with = "present")]
    pub away_team: Option<Option<TeamId>>,
    #[serde(default, deserialize_with = "present")]
    pub group: Option<Option<GroupKey>>,
    #[serde(default, deserialize_with = "present")]
    pub venue: Option<Option<String>>,
}

impl From<ScoreUpdate> for MatchUpdate {
    fn from(scores: ScoreUpdate) -> Self {
        Self {
            scores,
            ..Self::default()
        }
    }
}

/// A new group-stage fixture.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMatch {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub group: Option<GroupKey>,
    #[serde(default)]
    pub home_team: Option<TeamId>,
    #[serde(default)]
    pub away_team: Option<TeamId>,
}

/// Recompute standings and the bracket from scratch.
pub fn resolve(snapshot: &Snapshot, plan: &BracketPlan) -> Snapshot {
    let mut next = snapshot.clone();
    next.standings = compute_standings(&next);
    next.matches.knockout_stage = resolve_bracket(&next, plan);
    next
}

fn resolved_match(snapshot: &Snapshot, id: MatchId) -> Result<Match, TournamentError> {
    snapshot
        .matches
        .find(id)
        .cloned()
        .ok_or(TournamentError::MatchNotFound(id))
}

/// Write a result and/or fixture details into match `id` (group or knockout) and re-resolve.
/// Returns the new snapshot and the match as it stands after resolution.
pub fn apply_match_result(
    snapshot: &Snapshot,
    plan: &BracketPlan,
    id: MatchId,
    update: &MatchUpdate,
) -> Result<(Snapshot, Match), TournamentError> {
    let scores = update.scores.validate()?;
    let mut next = snapshot.clone();
    let (m, knockout) = next
        .matches
        .find_mut(id)
        .ok_or(TournamentError::MatchNotFound(id))?;

    if let Some(team) = &update.home_team {
        m.home_team = team.clone();
    }
    if let Some(team) = &update.away_team {
        m.away_team = team.clone();
    }
    if let Some(group) = &update.group {
        m.group = group.clone();
    }
    if let Some(venue) = &update.venue {
        m.venue = venue.clone();
    }
    if knockout {
        scores.apply_knockout(m);
    } else {
        scores.apply_scores(m);
        m.settle_group_result();
    }

    let next = resolve(&next, plan);
    let updated = resolved_match(&next, id)?;
    Ok((next, updated))
}

/// Write a knockout result into match `id` of `round` and re-resolve.
pub fn apply_knockout_result(
    snapshot: &Snapshot,
    plan: &BracketPlan,
    round: Round,
    id: MatchId,
    update: &ScoreUpdate,
) -> Result<(Snapshot, Match), TournamentError> {
    let scores = update.validate()?;
    let mut next = snapshot.clone();
    let matches = next.matches.knockout_stage.round_mut(round);
    if matches.is_empty() {
        return Err(TournamentError::RoundNotFound(round.to_string()));
    }
    let m = matches
        .iter_mut()
        .find(|m| m.id == id)
        .ok_or(TournamentError::MatchNotFound(id))?;
    scores.apply_knockout(m);

    let next = resolve(&next, plan);
    let updated = resolved_match(&next, id)?;
    Ok((next, updated))
}

/// Set or clear a playoff winner, then re-resolve standings and bracket.
pub fn set_playoff_winner(
    snapshot: &Snapshot,
    plan: &BracketPlan,
    playoff_id: &str,
    winner: Option<TeamId>,
) -> Result<Snapshot, TournamentError> {
    let next = assign_playoff_winner(snapshot, playoff_id, winner)?;
    Ok(resolve(&next, plan))
}

/// Append a new, unplayed group-stage fixture and re-resolve.
pub fn add_match(snapshot: &Snapshot, plan: &BracketPlan, new: &NewMatch) -> (Snapshot, Match) {
    let mut next = snapshot.clone();
    let m = Match {
        id: next.matches.next_id(),
        date: new.date.clone(),
        time: new.time.clone(),
        venue: new.venue.clone(),
        group: new.group.clone(),
        home_team: new.home_team.clone(),
        away_team: new.away_team.clone(),
        ..Match::default()
    };
    next.matches.group_stage.push(m.clone());
    (resolve(&next, plan), m)
}
