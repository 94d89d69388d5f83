use crate::{
    error::StoreResult,
    models::{MovieId, MovieSnapshot, UserRecord},
};

/// Durable storage of one `UserRecord` per email
///
/// Records are read and written whole: callers load a record, mutate it, and
/// `save` the full state back. There is no locking between a read and the
/// following save, so concurrent writers to the same email race and the last
/// save wins.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// Point lookup by email
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>>;

    /// Inserts a new record.
    ///
    /// Fails with `StoreError::DuplicateEmail` if one already exists.
    async fn create(
        &self,
        email: &str,
        watchlist: Vec<MovieSnapshot>,
        likes: Vec<MovieId>,
    ) -> StoreResult<UserRecord>;

    /// Replaces the stored collections with the record's current state
    async fn save(&self, record: &UserRecord) -> StoreResult<()>;

    /// Releases connections held by the store
    async fn close(&self);

    /// Store name for logging
    fn name(&self) -> &'static str;
}
