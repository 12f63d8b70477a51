//! Knockout bracket: round-of-32 seeding from finished groups, best-third wildcards
//! and winner propagation through to the final.

use crate::logic::standings::{best_third_placed, is_group_finished};
use crate::models::{
    Fixtures, GroupKey, KnockoutStage, Match, MatchId, Pairing, Round, SlotRef, Snapshot,
    Standings, TeamId,
};
use std::collections::{BTreeMap, BTreeSet};

/// Slot references of every knockout match, parsed once from the descriptions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BracketPlan {
    pairings: BTreeMap<(Round, MatchId), Pairing>,
}

impl BracketPlan {
    /// Parse all descriptions. Matches without a recognisable description are
    /// left out of the plan, so the resolver never touches them.
    pub fn parse(stage: &KnockoutStage) -> Self {
        let mut pairings = BTreeMap::new();
        for round in Round::ALL {
            for m in stage.round(round) {
                let Some(desc) = m.description.as_deref() else {
                    continue;
                };
                match desc.parse::<Pairing>() {
                    Ok(pairing) => {
                        pairings.insert((round, m.id), pairing);
                    }
                    Err(e) => log::warn!("{} match {}: {}", round, m.id, e),
                }
            }
        }
        Self { pairings }
    }

    pub fn pairing(&self, round: Round, id: MatchId) -> Option<&Pairing> {
        self.pairings.get(&(round, id))
    }

    pub fn len(&self) -> usize {
        self.pairings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairings.is_empty()
    }
}

/// The best third-placed teams and which of their groups are already seated this pass.
struct WildcardPool {
    ranked: Vec<(GroupKey, TeamId)>,
    used: BTreeSet<GroupKey>,
}

impl WildcardPool {
    fn new(ranked: Vec<(GroupKey, TeamId)>) -> Self {
        Self {
            ranked,
            used: BTreeSet::new(),
        }
    }

    /// Best unused third from `candidates`, else the best unused third from any group.
    fn take(&mut self, candidates: &[GroupKey]) -> Option<TeamId> {
        let unused = |(group, _): &&(GroupKey, TeamId)| !self.used.contains(group);
        let (group, team) = self
            .ranked
            .iter()
            .filter(unused)
            .find(|(group, _)| candidates.contains(group))
            .or_else(|| self.ranked.iter().find(unused))?
            .clone();
        self.used.insert(group);
        Some(team)
    }
}

/// Read-only inputs for resolving one slot.
struct SlotContext<'a> {
    standings: &'a Standings,
    finished: &'a BTreeSet<GroupKey>,
    group_stage: &'a [Match],
}

impl SlotContext<'_> {
    fn find<'s>(&'s self, stage: &'s KnockoutStage, code: &str) -> Option<&'s Match> {
        self.group_stage
            .iter()
            .find(|m| m.match_code == code)
            .or_else(|| stage.find_by_code(code))
    }

    fn resolve(
        &self,
        slot: &SlotRef,
        stage: &KnockoutStage,
        pool: &mut WildcardPool,
    ) -> Option<TeamId> {
        match slot {
            SlotRef::GroupPosition { pos, group } => {
                if !self.finished.contains(group) {
                    return None;
                }
                let table = self.standings.get(group)?;
                table.teams.get(pos.checked_sub(1)?).map(|row| row.id.clone())
            }
            SlotRef::ThirdPlaceWildcard { candidate_groups } => pool.take(candidate_groups),
            SlotRef::WinnerOf { match_code } => self.find(stage, match_code)?.winner().cloned(),
            SlotRef::LoserOf { match_code } => self.find(stage, match_code)?.loser().cloned(),
        }
    }
}

/// Put the resolved teams into a match. A missing side or a change of teams
/// clears the result, so stale scores never survive upstream changes.
fn seat(m: &mut Match, home: Option<TeamId>, away: Option<TeamId>) {
    let reseated = m.home_team != home || m.away_team != away;
    let complete = home.is_some() && away.is_some();
    m.home_team = home;
    m.away_team = away;
    m.home_team_playoff = None;
    m.away_team_playoff = None;
    if reseated || !complete {
        m.clear_result();
    }
}

/// Rebuild the whole knockout stage from `snapshot.standings` and match results.
/// Nothing from a previous pass is reused except the results of matches whose
/// teams did not change.
pub fn resolve_bracket(snapshot: &Snapshot, plan: &BracketPlan) -> KnockoutStage {
    let Fixtures {
        group_stage,
        knockout_stage,
    } = &snapshot.matches;

    let finished: BTreeSet<GroupKey> = snapshot
        .groups
        .keys()
        .filter(|key| is_group_finished(group_stage, key))
        .cloned()
        .collect();
    let ctx = SlotContext {
        standings: &snapshot.standings,
        finished: &finished,
        group_stage,
    };
    let mut pool = WildcardPool::new(best_third_placed(&snapshot.standings, |key| {
        finished.contains(key)
    }));

    let mut stage = knockout_stage.clone();
    for round in Round::ALL {
        let mut seats = Vec::with_capacity(stage.round(round).len());
        for m in stage.round(round) {
            let sides = plan.pairing(round, m.id).map(|p| {
                let home = ctx.resolve(&p.home, &stage, &mut pool);
                let away = ctx.resolve(&p.away, &stage, &mut pool);
                (home, away)
            });
            seats.push(sides);
        }
        for (m, sides) in stage.round_mut(round).iter_mut().zip(seats) {
            if let Some((home, away)) = sides {
                seat(m, home, away);
            }
        }
    }

    log::debug!(
        "bracket resolved: {} finished groups, {} wildcards seated",
        finished.len(),
        pool.used.len()
    );
    stage
}
