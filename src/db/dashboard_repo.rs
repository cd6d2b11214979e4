// src/db/dashboard_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::dashboard::{AdminDashboard, ArchitectDashboard, CommissionTotals, IndicationStatusCount, UserStatusCount},
};

const INDICATIONS_BY_STATUS: &str = r#"
    SELECT status, COUNT(*) AS total
    FROM indications
    WHERE ($1::uuid IS NULL OR architect_id = $1)
    GROUP BY status
    ORDER BY status
"#;

const COMMISSION_TOTALS: &str = r#"
    SELECT
        COALESCE(SUM(cm.amount) FILTER (WHERE cm.status = 'PENDING'), 0) AS pending_total,
        COALESCE(SUM(cm.amount) FILTER (WHERE cm.status = 'PAID'), 0) AS paid_total
    FROM commissions cm
    JOIN indications i ON i.id = cm.indication_id
    WHERE ($1::uuid IS NULL OR i.architect_id = $1)
"#;

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Visão global do admin, lida num único snapshot
    pub async fn admin_summary(&self) -> Result<AdminDashboard, AppError> {
        let mut tx = self.pool.begin().await?;

        let users_by_status = sqlx::query_as::<_, UserStatusCount>(
            "SELECT status, COUNT(*) AS total FROM users GROUP BY status ORDER BY status",
        )
        .fetch_all(&mut *tx)
        .await?;

        let indications_by_status = Self::indications_by_status(&mut *tx, None).await?;
        let commissions = Self::commission_totals(&mut *tx, None).await?;

        tx.commit().await?;

        Ok(AdminDashboard { users_by_status, indications_by_status, commissions })
    }

    // Só as indicações do próprio arquiteto
    pub async fn architect_summary(&self, architect_id: Uuid) -> Result<ArchitectDashboard, AppError> {
        let mut tx = self.pool.begin().await?;

        let indications_by_status = Self::indications_by_status(&mut *tx, Some(architect_id)).await?;
        let commissions = Self::commission_totals(&mut *tx, Some(architect_id)).await?;

        tx.commit().await?;

        Ok(ArchitectDashboard { indications_by_status, commissions })
    }

    async fn indications_by_status<'e, E>(
        executor: E,
        architect_id: Option<Uuid>,
    ) -> Result<Vec<IndicationStatusCount>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, IndicationStatusCount>(INDICATIONS_BY_STATUS)
            .bind(architect_id)
            .fetch_all(executor)
            .await?;

        Ok(rows)
    }

    async fn commission_totals<'e, E>(executor: E, architect_id: Option<Uuid>) -> Result<CommissionTotals, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let totals = sqlx::query_as::<_, CommissionTotals>(COMMISSION_TOTALS)
            .bind(architect_id)
            .fetch_one(executor)
            .await?;

        Ok(totals)
    }
}
