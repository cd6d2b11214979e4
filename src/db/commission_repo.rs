// src/db/commission_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::commission::{Commission, CommissionListEntry, CommissionStatus},
};

#[derive(Clone)]
pub struct CommissionRepository {
    pool: PgPool,
}

impl CommissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insere a comissão da indicação. `None` quando ela já existia.
    pub async fn insert_if_absent<'e, E>(
        &self,
        executor: E,
        indication_id: Uuid,
        amount: Decimal,
    ) -> Result<Option<Commission>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let commission = sqlx::query_as::<_, Commission>(
            r#"
            INSERT INTO commissions (indication_id, amount, status)
            VALUES ($1, $2, $3)
            ON CONFLICT (indication_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(indication_id)
        .bind(amount)
        .bind(CommissionStatus::Pending)
        .fetch_optional(executor)
        .await?;

        Ok(commission)
    }

    pub async fn find_for_update<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Commission>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let commission =
            sqlx::query_as::<_, Commission>("SELECT * FROM commissions WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(executor)
                .await?;

        Ok(commission)
    }

    pub async fn mark_paid<'e, E>(&self, executor: E, id: Uuid) -> Result<Commission, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let commission = sqlx::query_as::<_, Commission>(
            r#"
            UPDATE commissions SET status = $2, paid_at = now(), updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(CommissionStatus::Paid)
        .fetch_one(executor)
        .await?;

        Ok(commission)
    }

    pub async fn list_all(&self) -> Result<Vec<CommissionListEntry>, AppError> {
        let rows = sqlx::query_as::<_, CommissionListEntry>(
            r#"
            SELECT
                cm.id, cm.indication_id, cm.amount, cm.status, cm.paid_at,
                u.id AS architect_id, u.name AS architect_name,
                c.name AS client_name,
                cm.created_at
            FROM commissions cm
            JOIN indications i ON i.id = cm.indication_id
            JOIN users u ON u.id = i.architect_id
            JOIN clients c ON c.id = i.client_id
            ORDER BY cm.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
