// src/services/quote_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{IndicationRepository, QuoteRepository},
    models::{
        auth::User,
        indication::IndicationStatus,
        quote::{CreateQuotePayload, Quote, QuoteDecision, QuoteDecisionOutcome},
    },
};

#[derive(Clone)]
pub struct QuoteService {
    repo: QuoteRepository,
    indication_repo: IndicationRepository,
    pool: PgPool,
}

impl QuoteService {
    pub fn new(repo: QuoteRepository, indication_repo: IndicationRepository, pool: PgPool) -> Self {
        Self { repo, indication_repo, pool }
    }

    /// Admin envia um orçamento. O primeiro orçamento tira a indicação de PENDING.
    pub async fn create_quote(&self, indication_id: Uuid, payload: &CreateQuotePayload) -> Result<Quote, AppError> {
        let mut tx = self.pool.begin().await?;

        let indication = self
            .indication_repo
            .find_for_update(&mut *tx, indication_id)
            .await?
            .ok_or(AppError::NotFound("indication"))?;

        if indication.status.is_terminal() {
            return Err(AppError::InvalidTransition {
                entity: "indication",
                current: indication.status.as_str().to_string(),
                requested: IndicationStatus::InProgress.as_str().to_string(),
            });
        }

        let quote = self.repo.create_quote(&mut *tx, indication_id, payload).await?;

        if indication.status == IndicationStatus::Pending {
            let next = indication.status.transition_to(IndicationStatus::InProgress)?;
            self.indication_repo.update_status(&mut *tx, indication_id, next).await?;
        }

        tx.commit().await?;

        tracing::info!("📄 Orçamento {} criado para a indicação {}", quote.id, indication_id);
        Ok(quote)
    }

    /// Decisão do arquiteto dono. Aprovar rejeita os irmãos PENDING na mesma transação.
    pub async fn decide(
        &self,
        architect: &User,
        quote_id: Uuid,
        decision: QuoteDecision,
    ) -> Result<QuoteDecisionOutcome, AppError> {
        let indication_id = self
            .repo
            .find_by_id(quote_id)
            .await?
            .map(|q| q.indication_id)
            .ok_or(AppError::Forbidden)?;

        let mut tx = self.pool.begin().await?;

        // Trava a indicação primeiro: decisões concorrentes na mesma indicação fazem fila
        let indication = self
            .indication_repo
            .find_for_update(&mut *tx, indication_id)
            .await?
            .ok_or(AppError::Forbidden)?;

        if indication.architect_id != architect.id {
            tracing::warn!("Orçamento {} negado ao usuário {}", quote_id, architect.id);
            return Err(AppError::Forbidden);
        }

        let current = self
            .repo
            .find_for_update(&mut *tx, quote_id)
            .await?
            .ok_or(AppError::Forbidden)?;

        let next = current.status.decide(decision)?;
        let quote = self.repo.update_status(&mut *tx, quote_id, next).await?;

        let auto_rejected = match decision {
            QuoteDecision::Approved => {
                self.repo
                    .reject_pending_siblings(&mut *tx, indication_id, quote_id)
                    .await?
            }
            QuoteDecision::Rejected => Vec::new(),
        };

        tx.commit().await?;

        tracing::info!(
            "✅ Orçamento {} -> {} ({} rejeitado(s) em cascata)",
            quote.id,
            quote.status.as_str(),
            auto_rejected.len()
        );

        Ok(QuoteDecisionOutcome { quote, auto_rejected })
    }
}
