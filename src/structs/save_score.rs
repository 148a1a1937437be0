use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Score submission body. `id` may arrive as a string or a number (clients
/// send both), `score` as any JSON value; validation in the score service
/// turns them into a typed [`crate::services::score_service::Submission`]
/// or a 400.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveScoreRequest {
    pub id: Value,
    pub username: String,
    pub score: Value,
}
