//! Tournament business logic: standings, playoff slots, bracket, updates and read models.

mod bracket;
mod engine;
mod playoffs;
mod report;
mod schedule;
mod standings;
mod updates;

pub use bracket::{resolve_bracket, BracketPlan};
pub use engine::Tournament;
pub use playoffs::assign_playoff_winner;
pub use report::{champion, standings_report, team_path};
pub use schedule::{import_schedule, upcoming_matches};
pub use standings::{
    best_third_placed, compute_standings, group_results, group_table, head_to_head,
    is_group_finished, GroupResult, ADVANCING_THIRD_PLACES,
};
pub use updates::{
    add_match, apply_knockout_result, apply_match_result, resolve, set_playoff_winner,
    MatchUpdate, NewMatch, ScoreUpdate,
};
