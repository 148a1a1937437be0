pub mod password;
pub mod score_service;
pub mod user_service;
