use serde::{Deserialize, Serialize};

/// Envelope for auth endpoint failures and other message-only replies.
#[derive(Debug, Deserialize, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
}

/// Successful register/login reply.
#[derive(Debug, Deserialize, Serialize)]
pub struct AuthSuccess {
    pub success: bool,
    pub username: String,
}

pub fn failure_response(message: &str) -> ApiResponse {
    ApiResponse {
        success: false,
        message: message.to_string(),
    }
}

pub fn auth_success(username: String) -> AuthSuccess {
    AuthSuccess {
        success: true,
        username,
    }
}
