use serde_json::Value;

use crate::config::database::guest_password;
use crate::constants::{GUEST_USERNAME, TOP_N};
use crate::errors::ApiError;
use crate::models::user::User;
use crate::repositories::{AppState, ScoreStore, UserStore};
use crate::services::password;
use crate::services::user_service::normalize_username;
use crate::structs::leaderboard::{LeaderboardResponse, SaveScoreResponse};
use crate::structs::save_score::SaveScoreRequest;

/// A submission that survived validation. Nothing touches the store before
/// one of these exists.
#[derive(Debug, PartialEq)]
pub struct Submission {
    pub game_id: String,
    pub username: String,
    pub score: i64,
}

/// Clients send game ids as strings or numbers; anything else is treated as
/// missing.
fn stringify_id(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

pub fn validate(request: &SaveScoreRequest) -> Result<Submission, ApiError> {
    let game_id = stringify_id(&request.id);
    if game_id.is_empty() {
        return Err(ApiError::validation("Game id is required"));
    }

    let score = request
        .score
        .as_f64()
        .filter(|s| s.is_finite())
        .ok_or_else(|| ApiError::validation("Score must be a number"))?;

    Ok(Submission {
        game_id,
        username: normalize_username(&request.username),
        score: score as i64,
    })
}

/// Resolves the submitting identity: an existing account, or the shared
/// `guest` account which is created on first use. Creation goes through the
/// store's atomic insert-if-absent, so racing first-time guest submissions
/// all land on one account. Unknown non-guest names are an error.
pub async fn resolve_player(users: &dyn UserStore, username: &str) -> Result<User, ApiError> {
    let name = if username.is_empty() {
        GUEST_USERNAME
    } else {
        username
    };

    if let Some(user) = users.find_by_username(name).await? {
        return Ok(user);
    }
    if name != GUEST_USERNAME {
        return Err(ApiError::NotFound);
    }

    let password_hash = password::hash(&guest_password()).map_err(|err| {
        log::error!("guest password hashing failed: {}", err);
        ApiError::Internal
    })?;
    Ok(users.create_if_absent(GUEST_USERNAME, &password_hash).await?)
}

/// Validate, resolve, persist one entry, return the fresh top-5.
pub async fn submit_score(
    state: &AppState,
    request: SaveScoreRequest,
) -> Result<SaveScoreResponse, ApiError> {
    let submission = validate(&request)?;
    let player = resolve_player(state.users.as_ref(), &submission.username).await?;

    state
        .scores
        .insert(&submission.game_id, player.id, submission.score)
        .await?;
    let top5 = state.scores.top_n(&submission.game_id, TOP_N).await?;

    Ok(SaveScoreResponse {
        success: true,
        id: submission.game_id,
        top5,
    })
}

/// Read-only view; a game nobody has played yet is an empty list, not an
/// error.
pub async fn leaderboard(
    scores: &dyn ScoreStore,
    game_id: &str,
) -> Result<LeaderboardResponse, ApiError> {
    let top5 = scores.top_n(game_id, TOP_N).await?;
    Ok(LeaderboardResponse {
        id: game_id.to_string(),
        top5,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::memory::MemoryStore;
    use serde_json::json;

    fn request(body: Value) -> SaveScoreRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn numeric_and_string_ids_normalize_to_the_same_key() {
        let by_number = validate(&request(json!({ "id": 2, "score": 10 }))).unwrap();
        let by_string = validate(&request(json!({ "id": "2", "score": 10 }))).unwrap();
        assert_eq!(by_number.game_id, "2");
        assert_eq!(by_number.game_id, by_string.game_id);
    }

    #[test]
    fn missing_or_blank_id_is_rejected() {
        for body in [
            json!({ "score": 10 }),
            json!({ "id": "", "score": 10 }),
            json!({ "id": "   ", "score": 10 }),
            json!({ "id": null, "score": 10 }),
        ] {
            let err = validate(&request(body)).unwrap_err();
            assert_eq!(err.to_string(), "Game id is required");
        }
    }

    #[test]
    fn non_numeric_or_missing_score_is_rejected() {
        for body in [
            json!({ "id": "pong" }),
            json!({ "id": "pong", "score": "not-a-number" }),
            json!({ "id": "pong", "score": null }),
            json!({ "id": "pong", "score": [1, 2] }),
        ] {
            let err = validate(&request(body)).unwrap_err();
            assert_eq!(err.to_string(), "Score must be a number");
        }
    }

    #[test]
    fn fractional_scores_round_toward_zero() {
        let sub = validate(&request(json!({ "id": "pong", "score": 99.7 }))).unwrap();
        assert_eq!(sub.score, 99);
    }

    #[actix_web::test]
    async fn empty_username_resolves_to_one_guest_account() {
        let store = MemoryStore::new();
        let first = resolve_player(&store, "").await.unwrap();
        let second = resolve_player(&store, "").await.unwrap();
        assert_eq!(first.username, GUEST_USERNAME);
        assert_eq!(first.id, second.id);
        assert_eq!(store.user_count(), 1);
    }

    #[actix_web::test]
    async fn unknown_non_guest_username_is_not_found() {
        let store = MemoryStore::new();
        let err = resolve_player(&store, "zz").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
        assert_eq!(store.user_count(), 0);
    }

    #[actix_web::test]
    async fn validation_failure_persists_nothing() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let state = AppState {
            users: store.clone(),
            scores: store.clone(),
        };

        let err = submit_score(&state, request(json!({ "id": "", "score": 10 })))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(store.score_count(), 0);
        assert_eq!(store.user_count(), 0);
    }
}
