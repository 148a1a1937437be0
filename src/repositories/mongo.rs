use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, DateTime, Document};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Client, Collection, IndexModel};

use crate::constants::{DB_NAME, GUEST_USERNAME, SCORES_COLL, USERS_COLL};
use crate::errors::StoreError;
use crate::models::score::{LeaderboardRow, ScoreEntry};
use crate::models::user::User;
use crate::repositories::{ScoreStore, UserStore};

/// Production store backed by MongoDB. One instance serves both collaborator
/// roles.
pub struct MongoStore {
    users: Collection<User>,
    scores: Collection<ScoreEntry>,
}

impl MongoStore {
    /// Prepares collections and the unique username index. The index is what
    /// makes `create_if_absent` safe against concurrent registration.
    pub async fn init(client: &Client) -> Result<Self, StoreError> {
        let db = client.database(DB_NAME);
        let store = MongoStore {
            users: db.collection(USERS_COLL),
            scores: db.collection(SCORES_COLL),
        };

        let index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        store.users.create_index(index).await?;

        Ok(store)
    }
}

#[async_trait]
impl UserStore for MongoStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let filter = doc! { "username": username };
        Ok(self.users.find_one(filter).await?)
    }

    async fn create_if_absent(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<User, StoreError> {
        let filter = doc! { "username": username };
        let update = doc! {
            "$setOnInsert": {
                "_id": ObjectId::new(),
                "username": username,
                "password_hash": password_hash,
                "created_at": DateTime::now(),
            }
        };

        self.users
            .find_one_and_update(filter, update)
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| StoreError::Backend("upsert returned no document".to_string()))
    }
}

#[async_trait]
impl ScoreStore for MongoStore {
    async fn insert(
        &self,
        game_id: &str,
        user_id: ObjectId,
        score: i64,
    ) -> Result<ScoreEntry, StoreError> {
        let entry = ScoreEntry::new(game_id.to_string(), user_id, score);
        self.scores.insert_one(&entry).await?;
        Ok(entry)
    }

    async fn top_n(&self, game_id: &str, limit: i64) -> Result<Vec<LeaderboardRow>, StoreError> {
        let pipeline = create_top_n_pipeline(game_id, limit);
        let mut cursor = self.scores.aggregate(pipeline).await?;

        let mut rows = Vec::new();
        while let Some(doc) = cursor.try_next().await? {
            rows.push(extract_leaderboard_row(&doc));
        }
        Ok(rows)
    }
}

/// Sort before the lookup so only the winning entries join against users.
fn create_top_n_pipeline(game_id: &str, limit: i64) -> Vec<Document> {
    vec![
        doc! { "$match": { "game_id": game_id } },
        doc! { "$sort": { "score": -1, "created_at": 1, "_id": 1 } },
        doc! { "$limit": limit },
        doc! { "$lookup": {
            "from": USERS_COLL,
            "localField": "user_id",
            "foreignField": "_id",
            "as": "player",
        }},
        doc! { "$project": {
            "score": 1,
            "created_at": 1,
            "username": { "$ifNull": [ { "$arrayElemAt": ["$player.username", 0] }, GUEST_USERNAME ] },
        }},
    ]
}

fn extract_leaderboard_row(doc: &Document) -> LeaderboardRow {
    let username = doc
        .get_str("username")
        .unwrap_or(GUEST_USERNAME)
        .to_string();
    let score = doc
        .get_i64("score")
        .or_else(|_| doc.get_i32("score").map(i64::from))
        .unwrap_or_default();
    let ts = doc
        .get_datetime("created_at")
        .ok()
        .map(|dt| dt.timestamp_millis());

    LeaderboardRow {
        username,
        score,
        ts,
    }
}
