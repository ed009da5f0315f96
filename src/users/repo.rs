use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use super::dto::{User, UserPayload};

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<User>>;
    async fn find(&self, id: i32) -> anyhow::Result<Option<User>>;
    async fn insert(&self, user: &UserPayload) -> anyhow::Result<i32>;
    async fn update(&self, id: i32, user: &UserPayload) -> anyhow::Result<u64>;
    async fn delete(&self, id: i32) -> anyhow::Result<u64>;
}

#[derive(Clone)]
pub struct PgUserRepo {
    db: PgPool,
}

impl PgUserRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn list(&self) -> anyhow::Result<Vec<User>> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT id, firstname, lastname, email, city, language
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("select users")?;
        Ok(rows)
    }

    async fn find(&self, id: i32) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, firstname, lastname, email, city, language
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("select user")?;
        Ok(user)
    }

    async fn insert(&self, user: &UserPayload) -> anyhow::Result<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO users (firstname, lastname, email, city, language)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&user.firstname)
        .bind(&user.lastname)
        .bind(&user.email)
        .bind(&user.city)
        .bind(&user.language)
        .fetch_one(&self.db)
        .await
        .context("insert user")?;
        Ok(id)
    }

    async fn update(&self, id: i32, user: &UserPayload) -> anyhow::Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET firstname = $1, lastname = $2, email = $3, city = $4, language = $5
            WHERE id = $6
            "#,
        )
        .bind(&user.firstname)
        .bind(&user.lastname)
        .bind(&user.email)
        .bind(&user.city)
        .bind(&user.language)
        .bind(id)
        .execute(&self.db)
        .await
        .context("update user")?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i32) -> anyhow::Result<u64> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .context("delete user")?;
        Ok(result.rows_affected())
    }
}
