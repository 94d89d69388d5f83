use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::{
    db::UserStore,
    error::{StoreError, StoreResult},
    models::{MovieId, MovieSnapshot, UserRecord},
};

/// Non-durable `UserStore` backed by a map
///
/// Hands out copies of records, so mutations are only visible after `save`,
/// the same as with the database store.
#[derive(Default)]
pub struct MemoryUserStore {
    records: RwLock<HashMap<String, UserRecord>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>> {
        Ok(self.records.read().await.get(email).cloned())
    }

    async fn create(
        &self,
        email: &str,
        watchlist: Vec<MovieSnapshot>,
        likes: Vec<MovieId>,
    ) -> StoreResult<UserRecord> {
        let mut records = self.records.write().await;
        if records.contains_key(email) {
            return Err(StoreError::DuplicateEmail(email.to_string()));
        }

        let record = UserRecord {
            email: email.to_string(),
            watchlist,
            likes,
        };
        records.insert(email.to_string(), record.clone());
        Ok(record)
    }

    async fn save(&self, record: &UserRecord) -> StoreResult<()> {
        self.records
            .write()
            .await
            .insert(record.email.clone(), record.clone());
        Ok(())
    }

    async fn close(&self) {}

    fn name(&self) -> &'static str {
        "memory"
    }
}
