use std::sync::Arc;

use dotenv::dotenv;
use mongodb::Client;

use crate::repositories::memory::MemoryStore;
use crate::repositories::mongo::MongoStore;
use crate::repositories::AppState;

pub async fn connect_to_mongodb() -> Client {
    dotenv().ok();

    let uri = std::env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".into());

    match Client::with_uri_str(uri).await {
        Ok(client) => client,
        Err(e) => {
            panic!("Failed to connect to MongoDB: {:?}", e);
        }
    }
}

/// Builds the store the process will run against. `APP_STORE=memory` selects
/// the in-process store for local runs and tests; anything else means
/// MongoDB.
pub async fn connect_store() -> AppState {
    let backend = std::env::var("APP_STORE").unwrap_or_else(|_| "mongo".to_string());
    if backend == "memory" {
        let store = Arc::new(MemoryStore::new());
        return AppState {
            users: store.clone(),
            scores: store,
        };
    }

    let client = connect_to_mongodb().await;
    let store = match MongoStore::init(&client).await {
        Ok(store) => store,
        Err(e) => {
            panic!("Failed to prepare MongoDB collections: {:?}", e);
        }
    };
    let store = Arc::new(store);
    AppState {
        users: store.clone(),
        scores: store,
    }
}

pub fn get_server_address() -> String {
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    format!("localhost:{}", port)
}

/// Well-known guest credential; never user-settable through the API.
pub fn guest_password() -> String {
    std::env::var("GUEST_PASSWORD").unwrap_or_else(|_| "guest".to_string())
}
