use sqlx::{postgres::PgPoolOptions, types::Json, PgPool};

use crate::{
    db::UserStore,
    error::{StoreError, StoreResult},
    models::{MovieId, MovieSnapshot, UserRecord},
};

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Row shape of the `users` table; both collections live in JSONB columns
#[derive(sqlx::FromRow)]
struct UserRow {
    email: String,
    watchlist: Json<Vec<MovieSnapshot>>,
    likes: Json<Vec<MovieId>>,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        UserRecord {
            email: row.email,
            watchlist: row.watchlist.0,
            likes: row.likes.0,
        }
    }
}

/// `UserStore` over a PostgreSQL `users` table
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT email, watchlist, likes FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRecord::from))
    }

    async fn create(
        &self,
        email: &str,
        watchlist: Vec<MovieSnapshot>,
        likes: Vec<MovieId>,
    ) -> StoreResult<UserRecord> {
        let result = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, watchlist, likes)
            VALUES ($1, $2, $3)
            RETURNING email, watchlist, likes
            "#,
        )
        .bind(email)
        .bind(Json(&watchlist))
        .bind(Json(&likes))
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::DuplicateEmail(email.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, record: &UserRecord) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (email, watchlist, likes)
            VALUES ($1, $2, $3)
            ON CONFLICT (email)
            DO UPDATE SET watchlist = EXCLUDED.watchlist, likes = EXCLUDED.likes
            "#,
        )
        .bind(&record.email)
        .bind(Json(&record.watchlist))
        .bind(Json(&record.likes))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("PostgreSQL pool closed");
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
