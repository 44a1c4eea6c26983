pub mod leaderboard;

pub use leaderboard::{LeaderboardService, RankedStudent, ScoreUpdate};
