use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};

/// One persisted score submission. Append-only: entries are never mutated or
/// individually deleted, the top-5 cap is applied at read time.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ScoreEntry {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub game_id: String,
    pub user_id: ObjectId,
    pub score: i64,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl ScoreEntry {
    pub fn new(game_id: String, user_id: ObjectId, score: i64) -> Self {
        ScoreEntry {
            id: ObjectId::new(),
            game_id,
            user_id,
            score,
            created_at: Utc::now(),
        }
    }
}

/// Leaderboard projection of an entry: the submitting username (or the guest
/// literal when the user reference is orphaned), the score, and the creation
/// time as epoch milliseconds when available.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct LeaderboardRow {
    pub username: String,
    pub score: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts: Option<i64>,
}
