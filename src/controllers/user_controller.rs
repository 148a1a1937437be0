use actix_web::{web, HttpResponse};

use crate::repositories::AppState;
use crate::services::user_service;
use crate::structs::api_response::auth_success;
use crate::structs::login::LoginRequest;
use crate::structs::register::RegisterRequest;

pub async fn register(
    state: web::Data<AppState>,
    form: web::Json<RegisterRequest>,
) -> HttpResponse {
    let request = form.into_inner();
    match user_service::register(state.users.as_ref(), &request.username, &request.password).await {
        Ok(username) => HttpResponse::Created().json(auth_success(username)),
        Err(err) => err.to_auth_response(),
    }
}

pub async fn login(state: web::Data<AppState>, form: web::Json<LoginRequest>) -> HttpResponse {
    let request = form.into_inner();
    match user_service::login(state.users.as_ref(), &request.username, &request.password).await {
        Ok(username) => HttpResponse::Ok().json(auth_success(username)),
        Err(err) => err.to_auth_response(),
    }
}
