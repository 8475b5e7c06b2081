//! Badminton leaderboard: library with the ranking engine and its models.

pub mod logic;
pub mod models;

pub use logic::{derive, order, rank, rank_players, roster};
pub use models::{
    LeaderboardError, Medal, PlayerRecord, RankedPlayer, SortDirection, SortKey, SortSpec,
    UnrankedPlayer,
};
