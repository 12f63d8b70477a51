//! Group standings: match fold, primary ranking and the head-to-head pass.

use crate::models::{
    GroupKey, GroupStanding, GroupTable, Match, RankKey, Snapshot, Standings, Tally, TeamId,
};
use std::collections::BTreeMap;

/// How many third-placed teams reach the round of 32.
pub const ADVANCING_THIRD_PLACES: usize = 8;

/// A finished group match with both sides resolved to teams in the current roster.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GroupResult {
    pub home: TeamId,
    pub away: TeamId,
    pub home_score: u32,
    pub away_score: u32,
}

/// Descending by points, goal difference, goals for. Stable sorts keep roster order on ties.
fn by_rank(a: RankKey, b: RankKey) -> std::cmp::Ordering {
    b.cmp(&a)
}

/// Results that count towards `group`'s table.
///
/// Playoff references are replaced by the playoff winner. A match is skipped when
/// a side is still unknown, when it has no full scoreline, or when one of its
/// teams is no longer in the roster (a retracted playoff winner).
pub fn group_results(snapshot: &Snapshot, group: &str) -> Vec<GroupResult> {
    let Some(roster) = snapshot.groups.get(group) else {
        return Vec::new();
    };
    snapshot
        .matches
        .group_stage
        .iter()
        .filter(|m| m.group.as_deref() == Some(group))
        .filter_map(|m| {
            let home = snapshot.home_team_of(m)?;
            let away = snapshot.away_team_of(m)?;
            let (home_score, away_score) = (m.home_score?, m.away_score?);
            if !roster.contains(home) || !roster.contains(away) {
                return None;
            }
            Some(GroupResult {
                home: home.clone(),
                away: away.clone(),
                home_score,
                away_score,
            })
        })
        .collect()
}

/// Mini-table over the matches played only among `teams`.
pub fn head_to_head(results: &[GroupResult], teams: &[TeamId]) -> BTreeMap<TeamId, Tally> {
    let mut table: BTreeMap<TeamId, Tally> =
        teams.iter().map(|id| (id.clone(), Tally::default())).collect();
    for r in results {
        if !table.contains_key(&r.home) || !table.contains_key(&r.away) {
            continue;
        }
        if let Some(home) = table.get_mut(&r.home) {
            home.record(r.home_score, r.away_score);
        }
        if let Some(away) = table.get_mut(&r.away) {
            away.record(r.away_score, r.home_score);
        }
    }
    table
}

/// Reorder every run of teams level on points, goal difference and goals for
/// by their head-to-head mini-table. Single pass: ties inside a mini-table stay as they are.
fn apply_head_to_head(rows: &mut [GroupStanding], results: &[GroupResult]) {
    let mut start = 0;
    while start < rows.len() {
        let key = rows[start].rank_key();
        let len = rows[start..]
            .iter()
            .take_while(|r| r.rank_key() == key)
            .count();
        let run = &mut rows[start..start + len];
        if run.len() > 1 {
            let ids: Vec<TeamId> = run.iter().map(|r| r.id.clone()).collect();
            let mini = head_to_head(results, &ids);
            run.sort_by(|a, b| by_rank(mini[&a.id].rank_key(), mini[&b.id].rank_key()));
        }
        start += len;
    }
}

/// Ranked table for one group.
pub fn group_table(snapshot: &Snapshot, key: &str) -> GroupTable {
    let Some(group) = snapshot.groups.get(key) else {
        return GroupTable::default();
    };
    let mut rows: Vec<GroupStanding> = group
        .roster()
        .enumerate()
        .map(|(order, id)| GroupStanding::new(id, snapshot.team(id), order))
        .collect();

    let results = group_results(snapshot, key);
    for r in &results {
        if let Some(home) = rows.iter_mut().find(|row| row.id == r.home) {
            home.record(r.home_score, r.away_score);
        }
        if let Some(away) = rows.iter_mut().find(|row| row.id == r.away) {
            away.record(r.away_score, r.home_score);
        }
    }
    for row in &mut rows {
        row.goal_difference = i64::from(row.goals_for) - i64::from(row.goals_against);
    }

    rows.sort_by(|a, b| by_rank(a.rank_key(), b.rank_key()));
    apply_head_to_head(&mut rows, &results);

    GroupTable {
        name: group.name.clone(),
        teams: rows,
    }
}

/// Ranked tables for every group, recomputed from scratch.
pub fn compute_standings(snapshot: &Snapshot) -> Standings {
    snapshot
        .groups
        .keys()
        .map(|key| (key.clone(), group_table(snapshot, key)))
        .collect()
}

/// A group is finished when it has matches and every one of them is played with a score.
pub fn is_group_finished(group_stage: &[Match], group: &str) -> bool {
    let mut matches = group_stage
        .iter()
        .filter(|m| m.group.as_deref() == Some(group))
        .peekable();
    matches.peek().is_some() && matches.all(Match::is_complete)
}

/// Third-placed teams of the groups accepted by `eligible`, best first, at most eight.
/// Equal records keep group key order.
pub fn best_third_placed<F>(standings: &Standings, eligible: F) -> Vec<(GroupKey, TeamId)>
where
    F: Fn(&str) -> bool,
{
    let mut thirds: Vec<(&GroupKey, &GroupStanding)> = standings
        .iter()
        .filter(|(key, _)| eligible(key))
        .filter_map(|(key, table)| table.teams.get(2).map(|row| (key, row)))
        .collect();
    thirds.sort_by(|a, b| by_rank(a.1.rank_key(), b.1.rank_key()));
    thirds
        .into_iter()
        .take(ADVANCING_THIRD_PLACES)
        .map(|(key, row)| (key.clone(), row.id.clone()))
        .collect()
}
