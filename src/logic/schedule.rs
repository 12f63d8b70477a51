//! Kickoff schedule: CSV import of dates/times/venues and the upcoming-matches query.

use crate::models::{Match, Snapshot, TournamentError};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use std::io::Read;

/// One CSV row: `matchCode,date,time,venue`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleRow {
    match_code: String,
    date: String,
    #[serde(default)]
    time: Option<String>,
    #[serde(default)]
    venue: Option<String>,
}

impl ScheduleRow {
    fn validate(&self, line: usize) -> Result<(), TournamentError> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|e| {
            TournamentError::Schedule(format!("line {}: date {:?}: {}", line, self.date, e))
        })?;
        if let Some(time) = self.time.as_deref().filter(|t| !t.is_empty()) {
            NaiveTime::parse_from_str(time, "%H:%M").map_err(|e| {
                TournamentError::Schedule(format!("line {}: time {:?}: {}", line, time, e))
            })?;
        }
        Ok(())
    }

    fn apply(&self, m: &mut Match) {
        m.date = self.date.clone();
        m.time = self.time.clone().filter(|t| !t.is_empty());
        if let Some(venue) = self.venue.as_ref().filter(|v| !v.is_empty()) {
            m.venue = Some(venue.clone());
        }
    }
}

/// Apply a CSV schedule to every match with a matching code. The whole file is
/// validated before anything changes. Returns the new snapshot and how many matches were updated.
pub fn import_schedule<R: Read>(
    snapshot: &Snapshot,
    reader: R,
) -> Result<(Snapshot, usize), TournamentError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();
    for (i, record) in rdr.deserialize::<ScheduleRow>().enumerate() {
        let line = i + 2;
        let row = record
            .map_err(|e| TournamentError::Schedule(format!("line {}: {}", line, e)))?;
        row.validate(line)?;
        rows.push(row);
    }

    let mut next = snapshot.clone();
    let mut updated = 0;
    for row in &rows {
        if row.match_code.is_empty() {
            log::warn!("schedule: skipping row without a match code");
            continue;
        }
        let found = next
            .matches
            .iter_mut()
            .find(|m| m.match_code == row.match_code);
        match found {
            Some(m) => {
                row.apply(m);
                updated += 1;
            }
            None => log::warn!("schedule: no match with code {}", row.match_code),
        }
    }
    Ok((next, updated))
}

/// Unplayed matches kicking off at or after `now`, soonest first.
pub fn upcoming_matches(snapshot: &Snapshot, now: NaiveDateTime, limit: usize) -> Vec<&Match> {
    let mut upcoming: Vec<(NaiveDateTime, &Match)> = snapshot
        .matches
        .iter()
        .filter(|m| !m.played)
        .filter_map(|m| m.kickoff().map(|k| (k, m)))
        .filter(|(kickoff, _)| *kickoff >= now)
        .collect();
    upcoming.sort_by_key(|(kickoff, m)| (*kickoff, m.id));
    upcoming.into_iter().take(limit).map(|(_, m)| m).collect()
}
