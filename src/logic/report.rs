//! Read models: standings with provisional best thirds, a team's path, the champion.

use crate::logic::standings::best_third_placed;
use crate::models::{Match, Round, Snapshot, StandingsReport, TeamId};

/// Standings plus the best eight third-placed teams.
///
/// The thirds are only listed once at least 90% of group matches are played
/// and every team has played at least once; before that the list is empty.
pub fn standings_report(snapshot: &Snapshot) -> StandingsReport {
    let group_stage = &snapshot.matches.group_stage;
    let total = group_stage.len();
    let played = group_stage.iter().filter(|m| m.is_complete()).count();
    let mostly_played = played > 0 && played * 10 >= total * 9;
    let everyone_played = snapshot
        .standings
        .values()
        .flat_map(|table| &table.teams)
        .all(|row| row.played > 0);

    let best_third_placed = if mostly_played && everyone_played {
        best_third_placed(&snapshot.standings, |_| true)
            .into_iter()
            .map(|(_, team)| team)
            .collect()
    } else {
        Vec::new()
    };
    StandingsReport {
        standings: snapshot.standings.clone(),
        best_third_placed,
    }
}

/// Decided matches `team` took part in: group stage first, then the knockout rounds in order.
pub fn team_path<'a>(snapshot: &'a Snapshot, team: &str) -> Vec<&'a Match> {
    let group_stage = snapshot.matches.group_stage.iter().filter(|m| {
        let home = snapshot.home_team_of(m).map(String::as_str);
        let away = snapshot.away_team_of(m).map(String::as_str);
        m.is_complete() && (home == Some(team) || away == Some(team))
    });
    let knockout = snapshot
        .matches
        .knockout_stage
        .iter()
        .filter(|m| m.played && m.involves(team));
    group_stage.chain(knockout).collect()
}

/// Winner of the final, once it is decided.
pub fn champion(snapshot: &Snapshot) -> Option<&TeamId> {
    snapshot
        .matches
        .knockout_stage
        .round(Round::Final)
        .first()
        .and_then(Match::winner)
}
