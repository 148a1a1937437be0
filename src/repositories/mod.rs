pub mod memory;
pub mod mongo;

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::errors::StoreError;
use crate::models::score::{LeaderboardRow, ScoreEntry};
use crate::models::user::User;

/// Credential store collaborator. Usernames are already normalized
/// (trimmed, lowercased) by the service layer before they get here.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Atomic insert-if-absent: exactly one account per username survives
    /// concurrent calls, and the returned `User` is whichever credential won.
    /// An existing credential is never overwritten.
    async fn create_if_absent(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<User, StoreError>;
}

/// Score store collaborator. Entries accumulate without bound; `top_n` is a
/// read-time view ordered by score descending, then created_at ascending,
/// then entry id ascending, so repeated reads are reproducible.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    async fn insert(
        &self,
        game_id: &str,
        user_id: ObjectId,
        score: i64,
    ) -> Result<ScoreEntry, StoreError>;

    async fn top_n(&self, game_id: &str, limit: i64) -> Result<Vec<LeaderboardRow>, StoreError>;
}

/// Shared handles injected into every handler. Opened once at startup,
/// dropped at shutdown.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub scores: Arc<dyn ScoreStore>,
}
