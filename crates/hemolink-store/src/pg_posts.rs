//! `PostgreSQL` implementation of the post repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use hemolink_content::domain::aggregates::{Post, PostStatus};
use hemolink_content::domain::repository::PostRepository;
use hemolink_core::error::DomainError;

use crate::infra;

/// PostgreSQL-backed post repository.
#[derive(Debug, Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Creates a new `PgPostRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const POST_COLUMNS: &str =
    "id, author_id, title, slug, body, status, published_at, created_at, updated_at";

fn row_to_post(row: &PgRow) -> Result<Post, DomainError> {
    let status: String = row.try_get("status").map_err(infra)?;
    Ok(Post::rehydrate(
        row.try_get("id").map_err(infra)?,
        row.try_get("author_id").map_err(infra)?,
        row.try_get("title").map_err(infra)?,
        row.try_get("slug").map_err(infra)?,
        row.try_get("body").map_err(infra)?,
        status.parse::<PostStatus>()?,
        row.try_get::<Option<DateTime<Utc>>, _>("published_at")
            .map_err(infra)?,
        row.try_get::<DateTime<Utc>, _>("created_at").map_err(infra)?,
        row.try_get::<Option<DateTime<Utc>>, _>("updated_at")
            .map_err(infra)?,
    ))
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn next_id(&self) -> Result<i64, DomainError> {
        let row = sqlx::query("SELECT nextval(pg_get_serial_sequence('posts', 'id')) AS id")
            .fetch_one(&self.pool)
            .await
            .map_err(infra)?;
        row.try_get("id").map_err(infra)
    }

    async fn find_by_id(&self, post_id: i64) -> Result<Option<Post>, DomainError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(infra)?;
        row.as_ref().map(row_to_post).transpose()
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, DomainError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE slug = $1");
        let row = sqlx::query(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(infra)?;
        row.as_ref().map(row_to_post).transpose()
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT EXISTS (SELECT 1 FROM posts WHERE slug = $1) AS taken")
            .bind(slug)
            .fetch_one(&self.pool)
            .await
            .map_err(infra)?;
        row.try_get("taken").map_err(infra)
    }

    async fn insert(&self, post: &Post) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO posts \
             (id, author_id, title, slug, body, status, published_at, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(post.id)
        .bind(post.author_id)
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.body)
        .bind(post.status().as_str())
        .bind(post.published_at)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(infra)?;
        Ok(())
    }

    async fn update(&self, post: &Post) -> Result<(), DomainError> {
        sqlx::query(
            "UPDATE posts SET title = $2, body = $3, status = $4, published_at = $5, \
             updated_at = $6 WHERE id = $1",
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.body)
        .bind(post.status().as_str())
        .bind(post.published_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(infra)?;
        Ok(())
    }
}
