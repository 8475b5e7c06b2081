//! SortKey, SortDirection and the SortSpec state machine driven by header clicks.

use crate::models::error::LeaderboardError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Column the leaderboard is ordered by.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Name,
    Wins,
    Losses,
    Draws,
    MatchesPlayed,
    WinPercentage,
    Rank,
}

impl SortKey {
    /// All columns in header order.
    pub const ALL: [SortKey; 7] = [
        SortKey::Rank,
        SortKey::Name,
        SortKey::Wins,
        SortKey::Losses,
        SortKey::Draws,
        SortKey::MatchesPlayed,
        SortKey::WinPercentage,
    ];

    /// Direction used when this column is first selected.
    pub fn default_direction(self) -> SortDirection {
        match self {
            SortKey::Name | SortKey::Losses | SortKey::Draws => SortDirection::Ascending,
            SortKey::Wins | SortKey::MatchesPlayed | SortKey::WinPercentage | SortKey::Rank => {
                SortDirection::Descending
            }
        }
    }

    /// Wire name, as accepted by `FromStr`.
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Wins => "wins",
            SortKey::Losses => "losses",
            SortKey::Draws => "draws",
            SortKey::MatchesPlayed => "matchesPlayed",
            SortKey::WinPercentage => "winPercentage",
            SortKey::Rank => "rank",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = LeaderboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| LeaderboardError::UnknownSortKey(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = LeaderboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Ascending),
            "desc" => Ok(SortDirection::Descending),
            other => Err(LeaderboardError::UnknownSortDirection(other.to_string())),
        }
    }
}

/// Current sort choice of a leaderboard view. Defaults to win percentage, descending.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: SortKey::WinPercentage,
            direction: SortDirection::Descending,
        }
    }
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Next spec after the user selects `key`: same column flips the direction,
    /// another column starts at its default direction.
    pub fn toggle(self, key: SortKey) -> Self {
        if key == self.key {
            Self::new(key, self.direction.reversed())
        } else {
            Self::new(key, key.default_direction())
        }
    }

    /// Header indicator for `key`: the active direction if `key` is the sorted column.
    pub fn indicator(&self, key: SortKey) -> Option<SortDirection> {
        (self.key == key).then_some(self.direction)
    }
}
