// src/services/commission_service.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CommissionRepository,
    models::{
        commission::{commission_amount, Commission, CommissionListEntry},
        indication::Indication,
    },
};

#[derive(Clone)]
pub struct CommissionService {
    repo: CommissionRepository,
    pool: PgPool,
}

impl CommissionService {
    pub fn new(repo: CommissionRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    /// Gera a comissão de uma indicação concluída, dentro da transação do chamador.
    ///
    /// O valor é congelado aqui. Uma segunda conclusão concorrente cai no
    /// `ON CONFLICT DO NOTHING` e não cria nada.
    pub async fn create_for_indication<'e, E>(
        &self,
        executor: E,
        indication: &Indication,
    ) -> Result<Option<Commission>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let Some(amount) = commission_amount(
            indication.project_value,
            indication.requested_commission_percentage,
        ) else {
            tracing::warn!(
                "⚠️ Indicação {} concluída sem valor de projeto ou percentual: nenhuma comissão gerada",
                indication.id
            );
            return Ok(None);
        };

        let created = self.repo.insert_if_absent(executor, indication.id, amount).await?;

        match &created {
            Some(c) => tracing::info!("💰 Comissão {} de {} gerada para a indicação {}", c.id, c.amount, indication.id),
            None => tracing::warn!("Comissão da indicação {} já existia", indication.id),
        }

        Ok(created)
    }

    /// PENDING -> PAID, grava paid_at.
    pub async fn pay(&self, commission_id: Uuid) -> Result<Commission, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = self
            .repo
            .find_for_update(&mut *tx, commission_id)
            .await?
            .ok_or(AppError::NotFound("commission"))?;

        current.status.pay()?;
        let paid = self.repo.mark_paid(&mut *tx, commission_id).await?;

        tx.commit().await?;

        tracing::info!("💸 Comissão {} paga", paid.id);
        Ok(paid)
    }

    pub async fn list_all(&self) -> Result<Vec<CommissionListEntry>, AppError> {
        self.repo.list_all().await
    }
}
