//! World Cup tracker: library with models, resolution logic and snapshot storage.

pub mod logic;
pub mod models;
pub mod storage;

pub use logic::{
    add_match, apply_knockout_result, apply_match_result, assign_playoff_winner,
    best_third_placed, champion, compute_standings, group_results, group_table, head_to_head,
    import_schedule, is_group_finished, resolve, resolve_bracket, set_playoff_winner,
    standings_report, team_path, upcoming_matches, BracketPlan, GroupResult, MatchUpdate,
    NewMatch, ScoreUpdate, Tournament, ADVANCING_THIRD_PLACES,
};
pub use models::{
    Fixtures, Group, GroupKey, GroupStanding, GroupTable, KnockoutStage, Match, MatchId, Pairing,
    Playoff, PlayoffId, Round, Side, SlotParseError, SlotRef, Snapshot, Standings,
    StandingsReport, Tally, Team, TeamId, TournamentError, MAX_GOALS,
};
pub use storage::SnapshotStore;
