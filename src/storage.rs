//! JSON file persistence for a snapshot: one file per collection in a data directory.

use crate::models::{
    Fixtures, Group, GroupKey, Playoff, PlayoffId, Snapshot, Standings, Team, TournamentError,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const TEAMS_FILE: &str = "teams.json";
const GROUPS_FILE: &str = "groups.json";
const PLAYOFFS_FILE: &str = "playoffs.json";
const MATCHES_FILE: &str = "matches.json";
const STANDINGS_FILE: &str = "standings.json";

#[derive(Serialize, Deserialize)]
struct TeamsFile {
    teams: Vec<Team>,
}

#[derive(Serialize, Deserialize)]
struct GroupsFile {
    groups: BTreeMap<GroupKey, Group>,
}

#[derive(Serialize, Deserialize)]
struct PlayoffsFile {
    playoffs: BTreeMap<PlayoffId, Playoff>,
}

#[derive(Serialize, Deserialize)]
struct StandingsFile {
    standings: Standings,
}

/// Reads and writes `teams.json`, `groups.json`, `playoffs.json`,
/// `matches.json` and `standings.json`.
#[derive(Clone, Debug)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read<T: DeserializeOwned>(&self, name: &str) -> Result<T, TournamentError> {
        let path = self.dir.join(name);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| TournamentError::Storage(format!("{}: {}", path.display(), e)))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| TournamentError::Storage(format!("{}: {}", path.display(), e)))
    }

    async fn write<T: Serialize>(&self, name: &str, value: &T) -> Result<(), TournamentError> {
        let path = self.dir.join(name);
        let bytes = serde_json::to_vec_pretty(value)
            .map_err(|e| TournamentError::Storage(format!("{}: {}", path.display(), e)))?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| TournamentError::Storage(format!("{}: {}", path.display(), e)))
    }

    /// Load a snapshot. `standings.json` may be missing; standings are recomputed anyway.
    pub async fn load(&self) -> Result<Snapshot, TournamentError> {
        let TeamsFile { teams } = self.read(TEAMS_FILE).await?;
        let GroupsFile { groups } = self.read(GROUPS_FILE).await?;
        let PlayoffsFile { playoffs } = self.read(PLAYOFFS_FILE).await?;
        let matches: Fixtures = self.read(MATCHES_FILE).await?;
        let standings = match self.read::<StandingsFile>(STANDINGS_FILE).await {
            Ok(file) => file.standings,
            Err(e) => {
                log::debug!("no stored standings ({}), starting empty", e);
                Standings::new()
            }
        };
        Ok(Snapshot {
            teams,
            groups,
            playoffs,
            matches,
            standings,
        })
    }

    /// Write every collection of `snapshot`.
    pub async fn save(&self, snapshot: &Snapshot) -> Result<(), TournamentError> {
        self.write(
            TEAMS_FILE,
            &TeamsFile {
                teams: snapshot.teams.clone(),
            },
        )
        .await?;
        self.write(
            GROUPS_FILE,
            &GroupsFile {
                groups: snapshot.groups.clone(),
            },
        )
        .await?;
        self.write(
            PLAYOFFS_FILE,
            &PlayoffsFile {
                playoffs: snapshot.playoffs.clone(),
            },
        )
        .await?;
        self.write(MATCHES_FILE, &snapshot.matches).await?;
        self.write(
            STANDINGS_FILE,
            &StandingsFile {
                standings: snapshot.standings.clone(),
            },
        )
        .await
    }
}
