//! LeaderboardError.

/// Errors that can occur while parsing sort choices or loading a roster.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LeaderboardError {
    /// Sort key text does not name a leaderboard column.
    UnknownSortKey(String),
    /// Sort direction text is neither `asc` nor `desc`.
    UnknownSortDirection(String),
    /// Roster source could not be opened or read.
    Io(String),
    /// A roster row could not be parsed (row is 1-based, header excluded).
    InvalidRecord { row: usize, reason: String },
}

impl std::fmt::Display for LeaderboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaderboardError::UnknownSortKey(key) => write!(f, "Unknown sort key '{}'", key),
            LeaderboardError::UnknownSortDirection(dir) => {
                write!(f, "Unknown sort direction '{}' (expected asc or desc)", dir)
            }
            LeaderboardError::Io(msg) => write!(f, "Could not read roster: {}", msg),
            LeaderboardError::InvalidRecord { row, reason } => {
                write!(f, "Invalid roster row {}: {}", row, reason)
            }
        }
    }
}

impl std::error::Error for LeaderboardError {}
