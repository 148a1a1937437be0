use serde::{Deserialize, Serialize};

/// Missing fields deserialize to empty strings and fail validation with the
/// same message the client would get for blank input.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}
