use crate::{
    db::UserStore,
    error::{AppError, AppResult},
    models::{MovieId, MovieSnapshot},
};

pub const USER_NOT_FOUND: &str = "User not found";
pub const ALREADY_IN_WATCHLIST: &str = "Movie already in watchlist";

/// Result of a write that may have created the user record
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The record did not exist and was created by this call
    Created(T),
    /// An existing record was changed
    Updated(T),
}

impl<T> Outcome<T> {
    pub fn is_created(&self) -> bool {
        matches!(self, Outcome::Created(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Outcome::Created(value) | Outcome::Updated(value) => value,
        }
    }
}

/// Watchlist of `email`; an unknown user is an error
pub async fn get_watchlist(store: &dyn UserStore, email: &str) -> AppResult<Vec<MovieSnapshot>> {
    match store.find_by_email(email).await? {
        Some(record) => Ok(record.watchlist),
        None => Err(AppError::NotFound(USER_NOT_FOUND.to_string())),
    }
}

/// Likes of `email`; an unknown user simply has none
pub async fn get_likes(store: &dyn UserStore, email: &str) -> AppResult<Vec<MovieId>> {
    Ok(store
        .find_by_email(email)
        .await?
        .map(|record| record.likes)
        .unwrap_or_default())
}

/// Adds a snapshot to the watchlist, creating the record on first use
pub async fn add_to_watchlist(
    store: &dyn UserStore,
    email: &str,
    movie: MovieSnapshot,
) -> AppResult<Outcome<Vec<MovieSnapshot>>> {
    let Some(mut record) = store.find_by_email(email).await? else {
        let record = store.create(email, vec![movie], Vec::new()).await?;
        tracing::debug!(email = %email, "Created user record from watchlist add");
        return Ok(Outcome::Created(record.watchlist));
    };

    let movie_id = movie.id;
    if !record.add_to_watchlist(movie) {
        tracing::debug!(email = %email, movie_id, "Movie already in watchlist");
        return Err(AppError::Conflict(ALREADY_IN_WATCHLIST.to_string()));
    }

    store.save(&record).await?;
    Ok(Outcome::Updated(record.watchlist))
}

/// Removes every snapshot matching `movie_id` by string form
pub async fn remove_from_watchlist(
    store: &dyn UserStore,
    email: &str,
    movie_id: &MovieId,
) -> AppResult<Vec<MovieSnapshot>> {
    let Some(mut record) = store.find_by_email(email).await? else {
        return Err(AppError::NotFound(USER_NOT_FOUND.to_string()));
    };

    record.remove_from_watchlist(movie_id);
    store.save(&record).await?;
    Ok(record.watchlist)
}

/// Flips the like for `movie_id`, creating the record on first use.
///
/// Likes are compared strictly, so `101` and `"101"` are separate likes.
pub async fn toggle_like(
    store: &dyn UserStore,
    email: &str,
    movie_id: MovieId,
) -> AppResult<Outcome<Vec<MovieId>>> {
    let Some(mut record) = store.find_by_email(email).await? else {
        let record = store.create(email, Vec::new(), vec![movie_id]).await?;
        tracing::debug!(email = %email, "Created user record from like toggle");
        return Ok(Outcome::Created(record.likes));
    };

    let liked = record.toggle_like(movie_id);
    store.save(&record).await?;
    tracing::debug!(email = %email, liked, "Like toggled");
    Ok(Outcome::Updated(record.likes))
}
