pub mod judging;
pub mod leaderboard;
pub mod presence;
pub mod system;
