use serde::{Deserialize, Serialize};

use crate::models::score::LeaderboardRow;

#[derive(Debug, Deserialize, Serialize)]
pub struct SaveScoreResponse {
    pub success: bool,
    pub id: String,
    pub top5: Vec<LeaderboardRow>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LeaderboardResponse {
    pub id: String,
    pub top5: Vec<LeaderboardRow>,
}
