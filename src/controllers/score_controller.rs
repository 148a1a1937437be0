use actix_web::{web, HttpResponse};

use crate::errors::ApiError;
use crate::repositories::AppState;
use crate::services::score_service;
use crate::structs::save_score::SaveScoreRequest;

pub async fn save_score(
    state: web::Data<AppState>,
    form: web::Json<SaveScoreRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = score_service::submit_score(&state, form.into_inner()).await?;
    Ok(HttpResponse::Created().json(body))
}

pub async fn get_leaderboard(
    state: web::Data<AppState>,
    game_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let body = score_service::leaderboard(state.scores.as_ref(), &game_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(body))
}
