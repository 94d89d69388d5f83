use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{MovieId, MovieSnapshot},
    routes::AppState,
    services::{preferences, Outcome},
};

#[derive(Debug, Deserialize)]
pub struct AddWatchlistRequest {
    pub email: String,
    pub movie: MovieSnapshot,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieIdRequest {
    pub email: String,
    pub movie_id: MovieId,
}

fn require_email(email: &str) -> AppResult<&str> {
    if email.trim().is_empty() {
        return Err(AppError::InvalidInput("Email is required".to_string()));
    }
    Ok(email)
}

fn with_status<T>(outcome: Outcome<T>) -> (StatusCode, Json<T>) {
    let status = if outcome.is_created() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    (status, Json(outcome.into_inner()))
}

/// GET /api/user/watchlist/:email
pub async fn get_watchlist(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<Vec<MovieSnapshot>>> {
    let watchlist = preferences::get_watchlist(state.store.as_ref(), &email).await?;
    Ok(Json(watchlist))
}

/// GET /api/user/likes/:email
pub async fn get_likes(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<Vec<MovieId>>> {
    let likes = preferences::get_likes(state.store.as_ref(), &email).await?;
    Ok(Json(likes))
}

/// POST /api/user/add-watchlist
pub async fn add_to_watchlist(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<AddWatchlistRequest>,
) -> AppResult<(StatusCode, Json<Vec<MovieSnapshot>>)> {
    let email = require_email(&request.email)?;
    tracing::info!(
        request_id = %request_id,
        movie_id = request.movie.id,
        "Adding movie to watchlist"
    );
    tracing::debug!(request_id = %request_id, email = %email, "Watchlist add target");

    let outcome =
        preferences::add_to_watchlist(state.store.as_ref(), email, request.movie).await?;
    Ok(with_status(outcome))
}

/// POST /api/user/remove-watchlist
pub async fn remove_from_watchlist(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<MovieIdRequest>,
) -> AppResult<Json<Vec<MovieSnapshot>>> {
    // Blank emails fall through to the lookup and come back as 404
    tracing::info!(
        request_id = %request_id,
        movie_id = %request.movie_id,
        "Removing movie from watchlist"
    );
    tracing::debug!(request_id = %request_id, email = %request.email, "Watchlist removal target");

    let watchlist =
        preferences::remove_from_watchlist(state.store.as_ref(), &request.email, &request.movie_id)
            .await?;
    Ok(Json(watchlist))
}

/// POST /api/user/toggle-like
pub async fn toggle_like(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<MovieIdRequest>,
) -> AppResult<(StatusCode, Json<Vec<MovieId>>)> {
    let email = require_email(&request.email)?;
    tracing::info!(
        request_id = %request_id,
        movie_id = %request.movie_id,
        "Toggling like"
    );
    tracing::debug!(request_id = %request_id, email = %email, "Like toggle target");

    let outcome = preferences::toggle_like(state.store.as_ref(), email, request.movie_id).await?;
    Ok(with_status(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::store::MockUserStore, error::StoreError, routes::create_router};
    use axum_test::TestServer;
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    /// Collects formatted log output in memory
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn failing_server() -> TestServer {
        let mut store = MockUserStore::new();
        store
            .expect_find_by_email()
            .returning(|_| Err(StoreError::Database(sqlx::Error::PoolTimedOut)));
        TestServer::new(create_router(AppState::new(Arc::new(store)))).unwrap()
    }

    #[tokio::test]
    async fn test_store_failure_is_500_on_every_route() {
        let server = failing_server();

        let responses = vec![
            server.get("/api/user/watchlist/u@test.com").await,
            server.get("/api/user/likes/u@test.com").await,
            server
                .post("/api/user/add-watchlist")
                .json(&json!({ "email": "u@test.com", "movie": { "id": 1 } }))
                .await,
            server
                .post("/api/user/remove-watchlist")
                .json(&json!({ "email": "u@test.com", "movieId": 1 }))
                .await,
            server
                .post("/api/user/toggle-like")
                .json(&json!({ "email": "u@test.com", "movieId": 1 }))
                .await,
        ];

        for response in responses {
            response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
            let body: serde_json::Value = response.json();
            assert!(body["error"].as_str().unwrap().contains("Database error"));
        }
    }

    #[tokio::test]
    async fn test_blank_email_is_rejected_before_store_access() {
        // No expectations: any store call would panic
        let store = MockUserStore::new();
        let server = TestServer::new(create_router(AppState::new(Arc::new(store)))).unwrap();

        let response = server
            .post("/api/user/toggle-like")
            .json(&json!({ "email": "  ", "movieId": 1 }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], "Email is required");
    }

    #[tokio::test]
    async fn test_info_logs_do_not_contain_email() {
        let logs = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_writer(logs.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let store = Arc::new(crate::db::MemoryUserStore::new());
        let server = TestServer::new(create_router(AppState::new(store))).unwrap();
        let email = "private.person@test.com";

        server
            .post("/api/user/add-watchlist")
            .json(&json!({ "email": email, "movie": { "id": 1 } }))
            .await
            .assert_status(StatusCode::CREATED);
        server
            .post("/api/user/toggle-like")
            .json(&json!({ "email": email, "movieId": 1 }))
            .await
            .assert_status_ok();
        server
            .post("/api/user/remove-watchlist")
            .json(&json!({ "email": email, "movieId": 1 }))
            .await
            .assert_status_ok();

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Toggling like"));
        assert!(!output.contains(email));
    }

    #[test]
    fn test_movie_id_request_accepts_camel_case() {
        let request: MovieIdRequest =
            serde_json::from_value(json!({ "email": "u@test.com", "movieId": "101" })).unwrap();
        assert_eq!(request.movie_id, MovieId::from("101"));
    }

    #[test]
    fn test_add_request_requires_movie() {
        let result = serde_json::from_value::<AddWatchlistRequest>(json!({ "email": "u@test.com" }));
        assert!(result.is_err());
    }
}
