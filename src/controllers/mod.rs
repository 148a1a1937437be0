pub mod score_controller;
pub mod user_controller;
