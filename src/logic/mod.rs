//! Leaderboard business logic: ranking engine and roster sources.

mod ranking;
pub mod roster;

pub use ranking::{derive, order, rank, rank_players};
