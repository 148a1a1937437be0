use actix_web::web;

use crate::controllers::score_controller::{get_leaderboard, save_score};
use crate::controllers::user_controller::{login, register};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login))
        .route("/api/save-score", web::post().to(save_score))
        .route("/api/leaderboard/{id}", web::get().to(get_leaderboard));
}
