//! Data structures for the tracker: teams, groups, playoffs, matches, standings.

mod error;
mod fixture;
mod slot;
mod snapshot;
mod standing;
mod team;

pub use error::TournamentError;
pub use fixture::{Fixtures, KnockoutStage, Match, MatchId, Round, Side, MAX_GOALS};
pub use slot::{Pairing, SlotParseError, SlotRef};
pub use snapshot::Snapshot;
pub use standing::{
    GroupStanding, GroupTable, RankKey, Standings, StandingsReport, Tally, POINTS_FOR_DRAW,
    POINTS_FOR_WIN,
};
pub use team::{Group, GroupKey, Playoff, PlayoffId, Team, TeamId};
