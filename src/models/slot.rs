//! Bracket slot references parsed from knockout match descriptions.
//!
//! A description names where each side of a knockout match comes from:
//! `"1A vs 3C/D/E"`, `"W74 vs W77"`, `"Loser M101 vs Loser M102"`.

use crate::models::team::GroupKey;
use std::fmt;
use std::str::FromStr;

/// Where one side of a knockout match comes from.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum SlotRef {
    /// Finishing position `pos` (1-based) in `group`.
    GroupPosition { pos: usize, group: GroupKey },
    /// One of the best third-placed teams, preferably from `candidate_groups`.
    ThirdPlaceWildcard { candidate_groups: Vec<GroupKey> },
    /// Winner of the match with this code, e.g. "M74".
    WinnerOf { match_code: String },
    /// Loser of the match with this code.
    LoserOf { match_code: String },
}

/// Both sides of a knockout match.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Pairing {
    pub home: SlotRef,
    pub away: SlotRef,
}

/// A description that is not a recognised slot reference.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SlotParseError(pub String);

impl fmt::Display for SlotParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognised bracket slot \"{}\"", self.0)
    }
}

impl std::error::Error for SlotParseError {}

fn group_key(s: &str) -> Option<GroupKey> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c @ 'A'..='L'), None) => Some(c.to_string()),
        _ => None,
    }
}

/// "74" or "M74" -> "M74".
fn match_code(s: &str) -> Option<String> {
    let digits = s.trim().trim_start_matches('M');
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(format!("M{digits}"))
}

impl FromStr for SlotRef {
    type Err = SlotParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || SlotParseError(s.to_string());

        if let Some(rest) = s.strip_prefix("Winner ") {
            let match_code = match_code(rest).ok_or_else(err)?;
            return Ok(SlotRef::WinnerOf { match_code });
        }
        if let Some(rest) = s.strip_prefix("Loser ") {
            let match_code = match_code(rest).ok_or_else(err)?;
            return Ok(SlotRef::LoserOf { match_code });
        }
        if let Some(rest) = s.strip_prefix('W') {
            let match_code = match_code(rest).ok_or_else(err)?;
            return Ok(SlotRef::WinnerOf { match_code });
        }
        if let Some(rest) = s.strip_prefix('L') {
            let match_code = match_code(rest).ok_or_else(err)?;
            return Ok(SlotRef::LoserOf { match_code });
        }

        let split = s.find(|c: char| !c.is_ascii_digit()).ok_or_else(err)?;
        let pos: usize = s[..split].parse().map_err(|_| err())?;
        let groups = &s[split..];
        if groups.contains('/') {
            if pos != 3 {
                return Err(err());
            }
            let candidate_groups = groups
                .split('/')
                .filter(|g| !g.is_empty())
                .map(group_key)
                .collect::<Option<Vec<_>>>()
                .ok_or_else(err)?;
            return Ok(SlotRef::ThirdPlaceWildcard { candidate_groups });
        }
        if pos == 0 {
            return Err(err());
        }
        let group = group_key(groups).ok_or_else(err)?;
        Ok(SlotRef::GroupPosition { pos, group })
    }
}

impl FromStr for Pairing {
    type Err = SlotParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (home, away) = s
            .split_once(" vs ")
            .ok_or_else(|| SlotParseError(s.trim().to_string()))?;
        Ok(Pairing {
            home: home.parse()?,
            away: away.parse()?,
        })
    }
}
