use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::structs::api_response::failure_response;

/// Repository-layer failure. Handlers never see backend details; they are
/// logged server-side and surface as a generic 500.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Mongo(#[from] mongodb::error::Error),
    #[error("{0}")]
    Backend(String),
}

/// Request-scoped outcome taxonomy. The `Display` string of each variant is
/// exactly the message the client receives.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("Invalid Username and Password")]
    Unauthorized,
    #[error("User exists")]
    Conflict,
    #[error("User not found")]
    NotFound,
    #[error("Internal Server Error")]
    Internal,
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        log::error!("store failure: {}", err);
        ApiError::Internal
    }
}

impl ApiError {
    pub fn validation(message: &str) -> Self {
        ApiError::Validation(message.to_string())
    }

    /// Auth endpoints answer with the `{success, message}` envelope.
    pub fn to_auth_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(failure_response(&self.to_string()))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Conflict => StatusCode::CONFLICT,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // Score endpoints answer with the `{error}` envelope.
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
