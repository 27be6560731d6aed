use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{NewTerm, Term};
use crate::utils::errors::AppResult;

/// Acceso a la tabla `terms`
#[async_trait]
pub trait TermRepository: Send + Sync {
    /// Por `display_order` ascendente
    async fn list_ordered(&self) -> AppResult<Vec<Term>>;

    async fn create(&self, term: NewTerm) -> AppResult<Term>;

    async fn update(&self, id: i64, term: NewTerm) -> AppResult<Option<Term>>;

    async fn delete(&self, id: i64) -> AppResult<bool>;
}

pub struct PgTermRepository {
    pool: PgPool,
}

impl PgTermRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TermRepository for PgTermRepository {
    async fn list_ordered(&self) -> AppResult<Vec<Term>> {
        let terms =
            sqlx::query_as::<_, Term>("SELECT * FROM terms ORDER BY display_order ASC, id ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(terms)
    }

    async fn create(&self, term: NewTerm) -> AppResult<Term> {
        let created = sqlx::query_as::<_, Term>(
            "INSERT INTO terms (title, content, display_order) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&term.title)
        .bind(&term.content)
        .bind(term.display_order)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(&self, id: i64, term: NewTerm) -> AppResult<Option<Term>> {
        let updated = sqlx::query_as::<_, Term>(
            r#"
            UPDATE terms SET title = $2, content = $3, display_order = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&term.title)
        .bind(&term.content)
        .bind(term.display_order)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM terms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
