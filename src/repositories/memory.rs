use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;

use crate::constants::GUEST_USERNAME;
use crate::errors::StoreError;
use crate::models::score::{LeaderboardRow, ScoreEntry};
use crate::models::user::User;
use crate::repositories::{ScoreStore, UserStore};

/// In-process store for tests and local development (`APP_STORE=memory`),
/// filling the role the embedded database did for the original service.
/// Everything is lost at shutdown.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    scores: Vec<StoredScore>,
    next_seq: u64,
}

struct StoredScore {
    seq: u64,
    game_id: String,
    user_id: ObjectId,
    score: i64,
    created_at: DateTime<Utc>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_count(&self) -> usize {
        self.inner.lock().expect("store lock").users.len()
    }

    pub fn score_count(&self) -> usize {
        self.inner.lock().expect("store lock").scores.len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.lock().expect("store lock");
        Ok(inner.users.iter().find(|u| u.username == username).cloned())
    }

    async fn create_if_absent(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<User, StoreError> {
        // Check and insert under one lock hold, the moral equivalent of the
        // upsert the production store issues.
        let mut inner = self.inner.lock().expect("store lock");
        if let Some(existing) = inner.users.iter().find(|u| u.username == username) {
            return Ok(existing.clone());
        }
        let user = User::new(username.to_string(), password_hash.to_string());
        inner.users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl ScoreStore for MemoryStore {
    async fn insert(
        &self,
        game_id: &str,
        user_id: ObjectId,
        score: i64,
    ) -> Result<ScoreEntry, StoreError> {
        let entry = ScoreEntry::new(game_id.to_string(), user_id, score);
        let mut inner = self.inner.lock().expect("store lock");
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.scores.push(StoredScore {
            seq,
            game_id: entry.game_id.clone(),
            user_id,
            score,
            created_at: entry.created_at,
        });
        Ok(entry)
    }

    async fn top_n(&self, game_id: &str, limit: i64) -> Result<Vec<LeaderboardRow>, StoreError> {
        let inner = self.inner.lock().expect("store lock");

        let mut entries: Vec<&StoredScore> = inner
            .scores
            .iter()
            .filter(|s| s.game_id == game_id)
            .collect();
        entries.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(a.created_at.cmp(&b.created_at))
                .then(a.seq.cmp(&b.seq))
        });

        let rows = entries
            .into_iter()
            .take(limit.max(0) as usize)
            .map(|s| LeaderboardRow {
                username: inner
                    .users
                    .iter()
                    .find(|u| u.id == s.user_id)
                    .map(|u| u.username.clone())
                    .unwrap_or_else(|| GUEST_USERNAME.to_string()),
                score: s.score,
                ts: Some(s.created_at.timestamp_millis()),
            })
            .collect();
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn seed(store: &MemoryStore, entries: Vec<(i64, i64, u64)>) -> ObjectId {
        let user = User::new("ab".to_string(), "hash".to_string());
        let mut inner = store.inner.lock().unwrap();
        inner.users.push(user.clone());
        for (score, secs, seq) in entries {
            inner.scores.push(StoredScore {
                seq,
                game_id: "pong".to_string(),
                user_id: user.id,
                score,
                created_at: at(secs),
            });
        }
        user.id
    }

    #[actix_web::test]
    async fn orders_by_score_then_time_then_sequence() {
        let store = MemoryStore::new();
        // Two ties on score, one of those also tied on created_at.
        seed(
            &store,
            vec![(70, 10, 0), (90, 30, 1), (90, 20, 2), (70, 10, 3)],
        );

        let rows = store.top_n("pong", 5).await.unwrap();
        let scores: Vec<i64> = rows.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![90, 90, 70, 70]);
        // Same score: earlier submission first.
        assert_eq!(rows[0].ts, Some(at(20).timestamp_millis()));
        assert_eq!(rows[1].ts, Some(at(30).timestamp_millis()));
        // Same score and time: insertion sequence decides.
        assert_eq!(rows[2].ts, Some(at(10).timestamp_millis()));
    }

    #[actix_web::test]
    async fn truncates_to_limit_and_repeats_identically() {
        let store = MemoryStore::new();
        seed(
            &store,
            (0..7).map(|i| (i * 10, i, i as u64)).collect::<Vec<_>>(),
        );

        let first = store.top_n("pong", 5).await.unwrap();
        assert_eq!(first.len(), 5);
        assert_eq!(first[0].score, 60);

        let second = store.top_n("pong", 5).await.unwrap();
        assert_eq!(first, second);
    }

    #[actix_web::test]
    async fn orphaned_user_reference_falls_back_to_guest() {
        let store = MemoryStore::new();
        store
            .insert("pong", ObjectId::new(), 12)
            .await
            .unwrap();

        let rows = store.top_n("pong", 5).await.unwrap();
        assert_eq!(rows[0].username, GUEST_USERNAME);
    }

    #[actix_web::test]
    async fn create_if_absent_is_idempotent() {
        let store = MemoryStore::new();
        let first = store.create_if_absent("guest", "hash-a").await.unwrap();
        let second = store.create_if_absent("guest", "hash-b").await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.password_hash, "hash-a");
        assert_eq!(store.user_count(), 1);
    }
}
