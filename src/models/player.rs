//! PlayerRecord and the derived rows built from it.

use serde::{Deserialize, Serialize};

/// One player's aggregated match statistics for the current snapshot.
///
/// `wins + losses + draws` is not required to equal `matches_played`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    /// Display identity; unique within a roster.
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub matches_played: u32,
}

impl PlayerRecord {
    /// Create a record with the given name and counts.
    pub fn new(name: impl Into<String>, wins: u32, losses: u32, draws: u32, matches_played: u32) -> Self {
        Self {
            name: name.into(),
            wins,
            losses,
            draws,
            matches_played,
        }
    }

    /// `round(100 * wins / matches_played)` with halves rounded up, or 0 when nothing was played.
    ///
    /// Not clamped to 100: a record with more wins than matches yields more than 100.
    /// Results beyond `u32::MAX` saturate at `u32::MAX`.
    pub fn win_percentage(&self) -> u32 {
        if self.matches_played == 0 {
            return 0;
        }
        let played = u64::from(self.matches_played);
        let scaled = (200 * u64::from(self.wins) + played) / (2 * played);
        u32::try_from(scaled).unwrap_or(u32::MAX)
    }
}

/// A record with its win percentage, before a rank has been assigned.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnrankedPlayer {
    pub record: PlayerRecord,
    pub win_percentage: u32,
}

impl UnrankedPlayer {
    pub fn from_record(record: &PlayerRecord) -> Self {
        Self {
            win_percentage: record.win_percentage(),
            record: record.clone(),
        }
    }
}

/// A row of the ranked view: record, win percentage and its 1-based position.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedPlayer {
    #[serde(flatten)]
    pub record: PlayerRecord,
    pub win_percentage: u32,
    pub rank: u32,
}

impl RankedPlayer {
    /// Medal shown next to the top three ranks.
    pub fn medal(&self) -> Option<Medal> {
        Medal::for_rank(self.rank)
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }
}

/// Rank decoration for the podium.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub fn for_rank(rank: u32) -> Option<Self> {
        match rank {
            1 => Some(Medal::Gold),
            2 => Some(Medal::Silver),
            3 => Some(Medal::Bronze),
            _ => None,
        }
    }
}
