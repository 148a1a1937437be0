pub mod api_response;
pub mod leaderboard;
pub mod login;
pub mod register;
pub mod save_score;
