//! Shared fixture: a 48-team, 12-group tournament with the full 104-match schedule.

#![allow(dead_code)]

use world_cup_tracker::{
    Group, KnockoutStage, Match, Playoff, Round, ScoreUpdate, Snapshot, Team, TeamId, Tournament,
};

pub const GROUPS: [&str; 12] = ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L"];

/// Round-robin order of roster indices inside each group.
const PAIRS: [(usize, usize); 6] = [(0, 1), (2, 3), (0, 2), (3, 1), (3, 0), (1, 2)];

const ROUND_OF_32: [&str; 16] = [
    "2A vs 2B",
    "1E vs 3A/B/C/D/F",
    "1F vs 2C",
    "1C vs 2F",
    "1I vs 3C/D/F/G/H",
    "2E vs 2I",
    "1A vs 3C/E/F/H/I",
    "1L vs 3E/H/I/J/K",
    "1D vs 3B/E/F/I/J",
    "1G vs 3A/E/H/I/J",
    "2K vs 2L",
    "1H vs 2J",
    "1B vs 3E/F/G/I/J",
    "1J vs 2H",
    "1K vs 3D/E/I/J/L",
    "2D vs 2G",
];

const ROUND_OF_16: [&str; 8] = [
    "W74 vs W77",
    "W73 vs W75",
    "W76 vs W78",
    "W79 vs W80",
    "W83 vs W84",
    "W81 vs W82",
    "W86 vs W88",
    "W85 vs W87",
];

const QUARTER_FINALS: [&str; 4] = ["W89 vs W90", "W93 vs W94", "W91 vs W92", "W95 vs W96"];

const SEMI_FINALS: [&str; 2] = ["W97 vs W98", "W99 vs W100"];

/// "e", 3 -> "e3"
pub fn team_id(group: &str, n: usize) -> TeamId {
    format!("{}{}", group.to_lowercase(), n)
}

fn knockout_round(first_id: u32, descriptions: &[&str]) -> Vec<Match> {
    descriptions
        .iter()
        .zip(first_id..)
        .map(|(desc, id)| Match::knockout_fixture(id, *desc))
        .collect()
}

/// All 48 teams drawn, 72 unplayed group matches (ids 1-72), bracket ids 73-104.
pub fn snapshot() -> Snapshot {
    let mut s = Snapshot::default();
    let mut id = 1;
    for (gi, g) in GROUPS.iter().enumerate() {
        let roster: Vec<TeamId> = (1..=4).map(|n| team_id(g, n)).collect();
        for team in &roster {
            let mut t = Team::new(team.clone(), team.to_uppercase());
            t.code = team.clone();
            t.qualify(Some(g.to_string()));
            s.teams.push(t);
        }
        s.groups.insert(
            g.to_string(),
            Group {
                name: format!("Group {g}"),
                teams: roster.iter().cloned().map(Some).collect(),
                playoff_slot: None,
            },
        );
        for (k, (home, away)) in PAIRS.iter().enumerate() {
            let mut m = Match::group_fixture(id, *g, roster[*home].clone(), roster[*away].clone());
            m.date = format!("2026-06-{:02}", 11 + k * 3 + gi % 3);
            m.time = Some(format!("{:02}:00", 12 + gi % 10));
            s.matches.group_stage.push(m);
            id += 1;
        }
    }
    s.matches.knockout_stage = KnockoutStage {
        round_of32: knockout_round(73, &ROUND_OF_32),
        round_of16: knockout_round(89, &ROUND_OF_16),
        quarter_finals: knockout_round(97, &QUARTER_FINALS),
        semi_finals: knockout_round(101, &SEMI_FINALS),
        third_place: Some(Match::knockout_fixture(103, "Loser M101 vs Loser M102")),
        final_match: Some(Match::knockout_fixture(104, "W101 vs W102")),
    };
    s
}

/// Write a played result between `a` and `b` (either orientation) straight into the snapshot.
pub fn result(s: &mut Snapshot, a: &str, b: &str, a_goals: u32, b_goals: u32) {
    let m = s
        .matches
        .group_stage
        .iter_mut()
        .find(|m| {
            let home = m.home_team.as_deref();
            let away = m.away_team.as_deref();
            (home == Some(a) && away == Some(b)) || (home == Some(b) && away == Some(a))
        })
        .expect("fixture between teams");
    if m.home_team.as_deref() == Some(a) {
        m.home_score = Some(a_goals);
        m.away_score = Some(b_goals);
    } else {
        m.home_score = Some(b_goals);
        m.away_score = Some(a_goals);
    }
    m.played = true;
}

/// Finish a group so that it ranks x1, x2, x3, x4 and the third-placed team
/// gets better the later the group letter (goal difference = index - 1).
pub fn finish_group(s: &mut Snapshot, group: &str) {
    let gi = GROUPS.iter().position(|g| *g == group).expect("group key") as u32;
    let t = |n| team_id(group, n);
    result(s, &t(1), &t(2), 2, 0);
    result(s, &t(3), &t(4), gi + 1, 0);
    result(s, &t(1), &t(3), 1, 0);
    result(s, &t(4), &t(2), 0, 2);
    result(s, &t(4), &t(1), 0, 3);
    result(s, &t(2), &t(3), 1, 0);
}

/// Every group finished with [`finish_group`], resolved.
pub fn finished_tournament() -> Tournament {
    let mut s = snapshot();
    for g in GROUPS {
        finish_group(&mut s, g);
    }
    Tournament::new(s)
}

pub fn knockout_match(t: &Tournament, round: Round, index: usize) -> &Match {
    &t.snapshot().matches.knockout_stage.round(round)[index]
}

pub fn by_code<'a>(t: &'a Tournament, code: &str) -> &'a Match {
    t.snapshot()
        .matches
        .find_by_code(code)
        .expect("match code present")
}

pub fn teams_of(m: &Match) -> (Option<&str>, Option<&str>) {
    (m.home_team.as_deref(), m.away_team.as_deref())
}

/// Home side wins 1-0 in every match of `round`.
pub fn home_wins_round(t: &mut Tournament, round: Round) {
    let ids: Vec<u32> = t
        .snapshot()
        .matches
        .knockout_stage
        .round(round)
        .iter()
        .map(|m| m.id)
        .collect();
    for id in ids {
        t.apply_knockout_result(round, id, &ScoreUpdate::new(1, 0))
            .expect("knockout match exists");
    }
}

/// Group D's fourth slot waits on playoff "UEFA-D" (candidates d4, x1, x2).
pub fn snapshot_with_pending_playoff() -> Snapshot {
    let mut s = snapshot();
    let d4 = team_id("D", 4);
    let group = s.groups.get_mut("D").expect("group D");
    group.teams[3] = None;
    group.playoff_slot = Some("UEFA-D".to_string());
    s.team_mut(&d4).expect("team d4").disqualify();
    for id in ["x1", "x2"] {
        s.teams.push(Team::new(id, id.to_uppercase()));
    }
    s.playoffs.insert(
        "UEFA-D".to_string(),
        Playoff {
            id: "UEFA-D".to_string(),
            kind: "uefa".to_string(),
            teams: vec![d4.clone(), "x1".to_string(), "x2".to_string()],
            ..Playoff::default()
        },
    );
    for m in s.matches.group_stage.iter_mut() {
        if m.home_team.as_deref() == Some(d4.as_str()) {
            m.home_team = None;
            m.home_team_playoff = Some("UEFA-D".to_string());
        }
        if m.away_team.as_deref() == Some(d4.as_str()) {
            m.away_team = None;
            m.away_team_playoff = Some("UEFA-D".to_string());
        }
    }
    s
}
