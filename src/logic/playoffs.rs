//! Playoff slots: placing (or withdrawing) a playoff winner in its destination group.

use crate::models::{Snapshot, TeamId, TournamentError};

/// Set or clear the winner of `playoff_id` and update the destination group
/// roster and team qualification flags. Does not touch standings or bracket.
///
/// Setting a winner first clears any other candidate still sitting in the
/// destination group, then seats the winner in the group's pending slot.
/// Clearing withdraws the previous winner. A playoff that no group points at
/// only records the winner.
pub fn assign_playoff_winner(
    snapshot: &Snapshot,
    playoff_id: &str,
    winner: Option<TeamId>,
) -> Result<Snapshot, TournamentError> {
    let mut next = snapshot.clone();
    let playoff = next
        .playoffs
        .get_mut(playoff_id)
        .ok_or_else(|| TournamentError::PlayoffNotFound(playoff_id.to_string()))?;
    let previous = std::mem::replace(&mut playoff.winner, winner.clone());
    let candidates = playoff.teams.clone();

    let Snapshot { groups, teams, .. } = &mut next;
    let mut withdrawn: Vec<TeamId> = Vec::new();
    let mut seated = false;

    for group in groups
        .values_mut()
        .filter(|g| g.playoff_slot.as_deref() == Some(playoff_id))
    {
        if let Some(prev) = &previous {
            group.vacate(prev);
            withdrawn.push(prev.clone());
        }
        for candidate in candidates.iter().filter(|c| Some(*c) != winner.as_ref()) {
            if group.vacate(candidate) {
                withdrawn.push(candidate.clone());
            }
        }
        if let Some(w) = &winner {
            if !group.contains(w) {
                group.seat(w.clone());
            }
            seated = true;
        }
    }

    for id in &withdrawn {
        if let Some(team) = teams.iter_mut().find(|t| &t.id == id) {
            team.disqualify();
        }
    }
    if let (Some(w), true) = (&winner, seated) {
        let home = groups
            .iter()
            .find(|(_, g)| g.contains(w))
            .map(|(key, _)| key.clone());
        if let Some(team) = teams.iter_mut().find(|t| &t.id == w) {
            team.qualify(home);
        }
    }

    log::debug!(
        "playoff {} winner {:?} -> {:?}",
        playoff_id,
        previous,
        winner
    );
    Ok(next)
}
