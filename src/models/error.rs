//! TournamentError.

use crate::models::fixture::{MatchId, MAX_GOALS};
use crate::models::team::PlayoffId;

/// Errors surfaced to the caller. Everything else degrades to "not yet determined".
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// No match with this id in the snapshot (or in the requested round).
    MatchNotFound(MatchId),
    /// Unknown knockout round name, or a round the snapshot does not have.
    RoundNotFound(String),
    /// No playoff path with this id.
    PlayoffNotFound(PlayoffId),
    /// A score or penalty count outside `0..=MAX_GOALS`.
    InvalidScore { field: &'static str, value: i64 },
    /// Malformed schedule import data.
    Schedule(String),
    /// Reading or writing the persisted snapshot failed.
    Storage(String),
}

impl TournamentError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TournamentError::MatchNotFound(_)
                | TournamentError::RoundNotFound(_)
                | TournamentError::PlayoffNotFound(_)
        )
    }
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            TournamentError::RoundNotFound(round) => write!(f, "Round {} not found", round),
            TournamentError::PlayoffNotFound(id) => write!(f, "Playoff {} not found", id),
            TournamentError::InvalidScore { field, value } => {
                write!(
                    f,
                    "{} must be an integer from 0 to {} (got {})",
                    field,
                    MAX_GOALS,
                    value
                )
            }
            TournamentError::Schedule(msg) => write!(f, "Invalid schedule: {}", msg),
            TournamentError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for TournamentError {}
