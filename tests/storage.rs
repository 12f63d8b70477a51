//! Integration tests for JSON file persistence.

mod common;

use common::{finished_tournament, snapshot, home_wins_round};
use world_cup_tracker::{Round, SnapshotStore, Tournament, TournamentError};

#[tokio::test]
async fn saved_snapshot_loads_back_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let store = SnapshotStore::new(dir.path());
    let mut t = finished_tournament();
    home_wins_round(&mut t, Round::RoundOf32);

    store.save(t.snapshot()).await.unwrap();
    for file in ["teams.json", "groups.json", "playoffs.json", "matches.json", "standings.json"] {
        assert!(dir.path().join(file).is_file(), "{file} missing");
    }
    let loaded = store.load().await.unwrap();
    assert_eq!(&loaded, t.snapshot());
    assert_eq!(Tournament::new(loaded), t);
}

#[tokio::test]
async fn files_use_camel_case_and_round_names() {
    let dir = tempfile::tempdir().unwrap();
    let store = SnapshotStore::new(dir.path());
    store.save(Tournament::new(snapshot()).snapshot()).await.unwrap();

    let raw = tokio::fs::read(dir.path().join("matches.json")).await.unwrap();
    let matches: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    assert_eq!(matches["groupStage"][0]["matchCode"], "M1");
    assert_eq!(matches["groupStage"][0]["homeTeam"], "a1");
    let stage = &matches["knockoutStage"];
    assert_eq!(stage["roundOf32"].as_array().map(Vec::len), Some(16));
    assert_eq!(stage["thirdPlace"]["description"], "Loser M101 vs Loser M102");
    assert_eq!(stage["final"]["description"], "W101 vs W102");
    assert!(stage["final"]["homeTeam"].is_null());

    let raw = tokio::fs::read(dir.path().join("groups.json")).await.unwrap();
    let groups: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    assert_eq!(groups["groups"]["A"]["teams"][0], "a1");
}

#[tokio::test]
async fn missing_standings_file_is_recomputed() {
    let dir = tempfile::tempdir().unwrap();
    let store = SnapshotStore::new(dir.path());
    let t = finished_tournament();
    store.save(t.snapshot()).await.unwrap();
    tokio::fs::remove_file(dir.path().join("standings.json"))
        .await
        .unwrap();

    let loaded = store.load().await.unwrap();
    assert!(loaded.standings.is_empty());
    assert_eq!(Tournament::new(loaded).snapshot(), t.snapshot());
}

#[tokio::test]
async fn unknown_fields_survive_a_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = SnapshotStore::new(dir.path());
    let mut s = snapshot();
    s.teams[0]
        .extra
        .insert("fifaRanking".to_string(), serde_json::json!(14));
    store.save(&s).await.unwrap();

    let loaded = store.load().await.unwrap();
    assert_eq!(loaded.teams[0].extra["fifaRanking"], 14);
}

#[tokio::test]
async fn missing_data_directory_is_a_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = SnapshotStore::new(dir.path().join("absent"));
    let err = store.load().await.unwrap_err();
    assert!(matches!(err, TournamentError::Storage(_)), "{err}");
    assert!(!err.is_not_found());
}
