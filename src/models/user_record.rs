use serde::{Deserialize, Serialize};

use super::{MovieId, MovieSnapshot};

/// Everything stored for one user, keyed by email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub email: String,
    #[serde(default)]
    pub watchlist: Vec<MovieSnapshot>,
    #[serde(default)]
    pub likes: Vec<MovieId>,
}

impl UserRecord {
    /// Creates a record with empty collections
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            watchlist: Vec::new(),
            likes: Vec::new(),
        }
    }

    /// Whether a snapshot with this id is already in the watchlist
    pub fn has_in_watchlist(&self, movie_id: i64) -> bool {
        self.watchlist.iter().any(|movie| movie.id == movie_id)
    }

    /// Appends the snapshot unless its id is already present.
    ///
    /// Returns `false` when nothing was added.
    pub fn add_to_watchlist(&mut self, movie: MovieSnapshot) -> bool {
        if self.has_in_watchlist(movie.id) {
            return false;
        }
        self.watchlist.push(movie);
        true
    }

    /// Drops every snapshot whose id matches `movie_id` by string form
    pub fn remove_from_watchlist(&mut self, movie_id: &MovieId) {
        self.watchlist
            .retain(|movie| !MovieId::Number(movie.id).matches_loosely(movie_id));
    }

    /// Flips the like for `movie_id` using strict id equality.
    ///
    /// Returns `true` if the movie is liked afterwards.
    pub fn toggle_like(&mut self, movie_id: MovieId) -> bool {
        if self.likes.contains(&movie_id) {
            self.likes.retain(|id| id != &movie_id);
            false
        } else {
            self.likes.push(movie_id);
            true
        }
    }
}
