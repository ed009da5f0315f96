use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use super::dto::{Movie, MoviePayload};

/// Statements the movie handlers need from the database.
#[async_trait]
pub trait MovieRepo: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<Movie>>;
    async fn find(&self, id: i32) -> anyhow::Result<Option<Movie>>;
    /// Returns the generated id.
    async fn insert(&self, movie: &MoviePayload) -> anyhow::Result<i32>;
    /// Returns the affected-row count.
    async fn update(&self, id: i32, movie: &MoviePayload) -> anyhow::Result<u64>;
    async fn delete(&self, id: i32) -> anyhow::Result<u64>;
}

#[derive(Clone)]
pub struct PgMovieRepo {
    db: PgPool,
}

impl PgMovieRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MovieRepo for PgMovieRepo {
    async fn list(&self) -> anyhow::Result<Vec<Movie>> {
        let rows = sqlx::query_as::<_, Movie>(
            r#"
            SELECT id, title, director, year, color, duration
            FROM movies
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("select movies")?;
        Ok(rows)
    }

    async fn find(&self, id: i32) -> anyhow::Result<Option<Movie>> {
        let movie = sqlx::query_as::<_, Movie>(
            r#"
            SELECT id, title, director, year, color, duration
            FROM movies
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("select movie")?;
        Ok(movie)
    }

    async fn insert(&self, movie: &MoviePayload) -> anyhow::Result<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO movies (title, director, year, color, duration)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&movie.title)
        .bind(&movie.director)
        .bind(&movie.year)
        .bind(&movie.color)
        .bind(movie.duration)
        .fetch_one(&self.db)
        .await
        .context("insert movie")?;
        Ok(id)
    }

    async fn update(&self, id: i32, movie: &MoviePayload) -> anyhow::Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE movies
            SET title = $1, director = $2, year = $3, color = $4, duration = $5
            WHERE id = $6
            "#,
        )
        .bind(&movie.title)
        .bind(&movie.director)
        .bind(&movie.year)
        .bind(&movie.color)
        .bind(movie.duration)
        .bind(id)
        .execute(&self.db)
        .await
        .context("update movie")?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i32) -> anyhow::Result<u64> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .context("delete movie")?;
        Ok(result.rows_affected())
    }
}
