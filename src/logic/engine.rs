//! Tournament: a resolved snapshot together with its parsed bracket plan.

use crate::logic::bracket::BracketPlan;
use crate::logic::report::{standings_report, team_path};
use crate::logic::schedule::import_schedule;
use crate::logic::updates::{
    add_match, apply_knockout_result, apply_match_result, resolve, set_playoff_winner,
    MatchUpdate, NewMatch, ScoreUpdate,
};
use crate::models::{Match, MatchId, Round, Snapshot, StandingsReport, TeamId, TournamentError};
use std::io::Read;

/// The live tournament. Every mutation runs the full pipeline and replaces the
/// snapshot only when it succeeds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tournament {
    snapshot: Snapshot,
    plan: BracketPlan,
}

impl Tournament {
    /// Parse the bracket plan and resolve standings and bracket once.
    pub fn new(snapshot: Snapshot) -> Self {
        let plan = BracketPlan::parse(&snapshot.matches.knockout_stage);
        let snapshot = resolve(&snapshot, &plan);
        Self { snapshot, plan }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn plan(&self) -> &BracketPlan {
        &self.plan
    }

    pub fn into_snapshot(self) -> Snapshot {
        self.snapshot
    }

    /// Record a result (or fixture edit) for any match.
    pub fn apply_match_result(
        &mut self,
        id: MatchId,
        update: &MatchUpdate,
    ) -> Result<Match, TournamentError> {
        let (next, m) = apply_match_result(&self.snapshot, &self.plan, id, update)?;
        self.snapshot = next;
        Ok(m)
    }

    /// Record a knockout result in a specific round.
    pub fn apply_knockout_result(
        &mut self,
        round: Round,
        id: MatchId,
        update: &ScoreUpdate,
    ) -> Result<Match, TournamentError> {
        let (next, m) = apply_knockout_result(&self.snapshot, &self.plan, round, id, update)?;
        self.snapshot = next;
        Ok(m)
    }

    /// Set or clear a playoff winner. Returns the winner now on record.
    pub fn set_playoff_winner(
        &mut self,
        playoff_id: &str,
        winner: Option<TeamId>,
    ) -> Result<Option<TeamId>, TournamentError> {
        self.snapshot = set_playoff_winner(&self.snapshot, &self.plan, playoff_id, winner)?;
        Ok(self.snapshot.playoff_winner(playoff_id).cloned())
    }

    pub fn add_match(&mut self, new: &NewMatch) -> Match {
        let (next, m) = add_match(&self.snapshot, &self.plan, new);
        self.snapshot = next;
        m
    }

    /// Import kickoff dates/times/venues. Returns how many matches changed.
    pub fn import_schedule<R: Read>(&mut self, reader: R) -> Result<usize, TournamentError> {
        let (next, updated) = import_schedule(&self.snapshot, reader)?;
        self.snapshot = next;
        Ok(updated)
    }

    pub fn standings_report(&self) -> StandingsReport {
        standings_report(&self.snapshot)
    }

    pub fn team_path(&self, team: &str) -> Vec<&Match> {
        team_path(&self.snapshot, team)
    }
}
