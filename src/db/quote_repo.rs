// src/db/quote_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::quote::{CreateQuotePayload, Quote, QuoteStatus},
};

#[derive(Clone)]
pub struct QuoteRepository {
    pool: PgPool,
}

impl QuoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_quote<'e, E>(
        &self,
        executor: E,
        indication_id: Uuid,
        payload: &CreateQuotePayload,
    ) -> Result<Quote, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let quote = sqlx::query_as::<_, Quote>(
            r#"
            INSERT INTO quotes (
                indication_id, status, amount, notes, delivery_timeframe, payment_conditions
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(indication_id)
        .bind(QuoteStatus::Pending)
        .bind(payload.amount)
        .bind(&payload.notes)
        .bind(&payload.delivery_timeframe)
        .bind(&payload.payment_conditions)
        .fetch_one(executor)
        .await?;

        Ok(quote)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Quote>, AppError> {
        let quote = sqlx::query_as::<_, Quote>("SELECT * FROM quotes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(quote)
    }

    pub async fn find_for_update<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Quote>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let quote = sqlx::query_as::<_, Quote>("SELECT * FROM quotes WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(quote)
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: QuoteStatus,
    ) -> Result<Quote, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let quote = sqlx::query_as::<_, Quote>(
            r#"
            UPDATE quotes SET status = $2, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_one(executor)
        .await?;

        Ok(quote)
    }

    /// Rejeita os outros orçamentos PENDING da mesma indicação. Devolve os ids afetados.
    pub async fn reject_pending_siblings<'e, E>(
        &self,
        executor: E,
        indication_id: Uuid,
        approved_id: Uuid,
    ) -> Result<Vec<Uuid>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE quotes SET status = 'REJECTED', updated_at = now()
            WHERE indication_id = $1 AND id <> $2 AND status = 'PENDING'
            RETURNING id
            "#,
        )
        .bind(indication_id)
        .bind(approved_id)
        .fetch_all(executor)
        .await?;

        Ok(ids)
    }

    // Mais recente primeiro
    pub async fn list_for_indication(&self, indication_id: Uuid) -> Result<Vec<Quote>, AppError> {
        let quotes = sqlx::query_as::<_, Quote>(
            "SELECT * FROM quotes WHERE indication_id = $1 ORDER BY created_at DESC",
        )
        .bind(indication_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(quotes)
    }
}
