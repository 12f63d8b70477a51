//! Integration tests for playoff slots: seating winners, switching, clearing and stale cleanup.

mod common;

use common::{snapshot_with_pending_playoff, team_id};
use world_cup_tracker::{group_table, Playoff, Team, Tournament, TournamentError};

fn roster(t: &Tournament, group: &str) -> Vec<Option<String>> {
    t.snapshot().groups[group].teams.clone()
}

fn qualified(t: &Tournament, team: &str) -> (bool, Option<String>) {
    let team = t.snapshot().team(team).expect("team exists");
    (team.qualified, team.group.clone())
}

/// Every group D match that waits on the playoff ends 1-0 to the home side.
fn play_group_d(t: &Tournament) -> Tournament {
    let mut s = t.snapshot().clone();
    for m in s
        .matches
        .group_stage
        .iter_mut()
        .filter(|m| m.group.as_deref() == Some("D"))
    {
        m.home_score = Some(1);
        m.away_score = Some(0);
        m.played = true;
    }
    Tournament::new(s)
}

#[test]
fn pending_slot_is_left_out_of_the_table() {
    let t = Tournament::new(snapshot_with_pending_playoff());
    assert_eq!(roster(&t, "D")[3], None);
    let table = &t.snapshot().standings["D"];
    assert_eq!(table.teams.len(), 3);
    assert_eq!(qualified(&t, "d4"), (false, None));
}

#[test]
fn winner_is_seated_and_qualified() {
    let mut t = Tournament::new(snapshot_with_pending_playoff());
    let winner = t.set_playoff_winner("UEFA-D", Some("x1".to_string())).unwrap();
    assert_eq!(winner.as_deref(), Some("x1"));
    assert_eq!(roster(&t, "D")[3].as_deref(), Some("x1"));
    assert_eq!(qualified(&t, "x1"), (true, Some("D".to_string())));
    assert_eq!(qualified(&t, "x2"), (false, None));

    let table = &t.snapshot().standings["D"];
    assert_eq!(table.teams.len(), 4);
    assert_eq!(table.teams[3].id, "x1");
    assert_eq!(table.teams[3].name, "X1");
}

#[test]
fn switching_winner_withdraws_the_previous_one() {
    let mut t = Tournament::new(snapshot_with_pending_playoff());
    t.set_playoff_winner("UEFA-D", Some("x1".to_string())).unwrap();
    t.set_playoff_winner("UEFA-D", Some("x2".to_string())).unwrap();

    let d = roster(&t, "D");
    assert_eq!(d[3].as_deref(), Some("x2"));
    assert!(!d.iter().flatten().any(|id| id == "x1"));
    assert_eq!(qualified(&t, "x1"), (false, None));
    assert_eq!(qualified(&t, "x2"), (true, Some("D".to_string())));
}

#[test]
fn setting_then_clearing_restores_the_snapshot() {
    let initial = Tournament::new(snapshot_with_pending_playoff());
    let mut t = initial.clone();
    t.set_playoff_winner("UEFA-D", Some("x1".to_string())).unwrap();
    assert_ne!(t, initial);

    let winner = t.set_playoff_winner("UEFA-D", None).unwrap();
    assert_eq!(winner, None);
    assert_eq!(roster(&t, "D")[3], None);
    assert_eq!(qualified(&t, "x1"), (false, None));
    assert_eq!(t.snapshot(), initial.snapshot());
}

#[test]
fn stale_candidate_in_group_is_removed() {
    let mut s = snapshot_with_pending_playoff();
    s.groups.get_mut("D").unwrap().teams[3] = Some("x2".to_string());
    s.team_mut("x2").unwrap().qualify(Some("D".to_string()));
    let mut t = Tournament::new(s);

    t.set_playoff_winner("UEFA-D", Some("x1".to_string())).unwrap();
    let d = roster(&t, "D");
    assert_eq!(
        d,
        [
            Some(team_id("D", 1)),
            Some(team_id("D", 2)),
            Some(team_id("D", 3)),
            Some("x1".to_string()),
        ]
    );
    assert_eq!(qualified(&t, "x2"), (false, None));
    assert_eq!(qualified(&t, "x1"), (true, Some("D".to_string())));
}

#[test]
fn unknown_playoff_is_rejected() {
    let mut t = Tournament::new(snapshot_with_pending_playoff());
    let before = t.clone();
    let err = t.set_playoff_winner("nope", Some("x1".to_string())).unwrap_err();
    assert!(matches!(err, TournamentError::PlayoffNotFound(ref id) if id == "nope"));
    assert!(err.is_not_found());
    assert_eq!(t, before);
}

#[test]
fn playoff_without_destination_only_records_winner() {
    let mut s = snapshot_with_pending_playoff();
    s.teams.push(Team::new("y1", "Y1"));
    s.playoffs.insert(
        "IC-1".to_string(),
        Playoff {
            id: "IC-1".to_string(),
            kind: "intercontinental".to_string(),
            teams: vec!["y1".to_string()],
            ..Playoff::default()
        },
    );
    let mut t = Tournament::new(s);
    let groups_before = t.snapshot().groups.clone();

    let winner = t.set_playoff_winner("IC-1", Some("y1".to_string())).unwrap();
    assert_eq!(winner.as_deref(), Some("y1"));
    assert_eq!(t.snapshot().groups, groups_before);
    assert_eq!(qualified(&t, "y1"), (false, None));
}

#[test]
fn playoff_matches_count_for_the_winner_only_while_seated() {
    let mut t = Tournament::new(snapshot_with_pending_playoff());
    t.set_playoff_winner("UEFA-D", Some("x1".to_string())).unwrap();
    let mut t = play_group_d(&t);

    let played: u32 = t.snapshot().standings["D"].teams.iter().map(|r| r.played).sum();
    assert_eq!(played, 12);
    let x1 = t.snapshot().standings["D"]
        .teams
        .iter()
        .find(|r| r.id == "x1")
        .cloned()
        .expect("x1 in table");
    assert_eq!(x1.played, 3);
    assert_eq!(t.team_path("x1").len(), 3);

    t.set_playoff_winner("UEFA-D", None).unwrap();
    let table = group_table(t.snapshot(), "D");
    assert_eq!(table.teams.len(), 3);
    let played: u32 = table.teams.iter().map(|r| r.played).sum();
    assert_eq!(played, 6);
    assert!(t.team_path("x1").is_empty());
}
