//! Data structures for the leaderboard: player records, ranked rows, sort state.

mod error;
mod player;
mod sort;

pub use error::LeaderboardError;
pub use player::{Medal, PlayerRecord, RankedPlayer, UnrankedPlayer};
pub use sort::{SortDirection, SortKey, SortSpec};
