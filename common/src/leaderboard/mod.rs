mod board;
mod store;

pub use board::{Leaderboard, LeaderboardEntry, SubmitOutcome, MAX_ENTRIES};
pub use store::{DocumentLeaderboardStore, FileLeaderboardStore, LeaderboardError, LeaderboardStore};
