// src/services/indication_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{IndicationRepository, QuoteRepository},
    models::{
        auth::{Role, User},
        indication::{
            CreateIndicationPayload, Indication, IndicationDetail, IndicationStatus,
            IndicationStatusChange, IndicationSummary,
        },
    },
    services::commission_service::CommissionService,
};

#[derive(Clone)]
pub struct IndicationService {
    repo: IndicationRepository,
    quote_repo: QuoteRepository,
    commission_service: CommissionService,
    pool: PgPool,
}

impl IndicationService {
    pub fn new(
        repo: IndicationRepository,
        quote_repo: QuoteRepository,
        commission_service: CommissionService,
        pool: PgPool,
    ) -> Self {
        Self { repo, quote_repo, commission_service, pool }
    }

    /// Cria a indicação reaproveitando o cliente que já tem este e-mail principal.
    pub async fn create(&self, architect: &User, payload: CreateIndicationPayload) -> Result<Indication, AppError> {
        let email = payload.main_email().ok_or(AppError::InvalidField {
            field: "contactData",
            message: "Um E-mail Principal é obrigatório.",
        })?;

        let mut tx = self.pool.begin().await?;

        let client = match self.repo.find_client_by_main_email(&mut *tx, email).await? {
            Some(existing) => existing,
            None => {
                let client = self
                    .repo
                    .create_client(&mut *tx, &payload.client_data, &payload.address_data)
                    .await?;
                for contact in &payload.contact_data {
                    self.repo.add_client_contact(&mut *tx, client.id, contact).await?;
                }
                client
            }
        };

        let indication = self
            .repo
            .create_indication(
                &mut *tx,
                architect.id,
                client.id,
                payload.project_value,
                payload.requested_commission_percentage,
            )
            .await?;

        tx.commit().await?;

        tracing::info!("📝 Indicação {} criada por {} (cliente {})", indication.id, architect.id, client.id);
        Ok(indication)
    }

    pub async fn list_for_architect(&self, architect: &User) -> Result<Vec<IndicationSummary>, AppError> {
        self.repo.list_for_architect(architect.id).await
    }

    pub async fn list_all(&self) -> Result<Vec<IndicationSummary>, AppError> {
        self.repo.list_all().await
    }

    /// Admin vê qualquer indicação. Arquiteto só as suas: inexistente ou de
    /// outro dono dá o mesmo Forbidden.
    pub async fn detail(&self, viewer: &User, indication_id: Uuid) -> Result<IndicationDetail, AppError> {
        let found = self.repo.find_by_id(indication_id).await?;

        let indication = match (viewer.role, found) {
            (Role::Admin, Some(indication)) => indication,
            (Role::Admin, None) => return Err(AppError::NotFound("indication")),
            (Role::Architect, Some(indication)) if indication.architect_id == viewer.id => indication,
            (Role::Architect, _) => {
                tracing::warn!("Indicação {} negada ao usuário {}", indication_id, viewer.id);
                return Err(AppError::Forbidden);
            }
        };

        let client = self
            .repo
            .find_client(indication.client_id)
            .await?
            .ok_or(AppError::NotFound("client"))?;
        let quotes = self.quote_repo.list_for_indication(indication.id).await?;

        Ok(IndicationDetail { indication, client, quotes })
    }

    /// Mudança de status pelo admin. Concluir gera a comissão na mesma transação.
    pub async fn update_status(
        &self,
        indication_id: Uuid,
        requested: IndicationStatus,
    ) -> Result<IndicationStatusChange, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = self
            .repo
            .find_for_update(&mut *tx, indication_id)
            .await?
            .ok_or(AppError::NotFound("indication"))?;

        let next = current.status.transition_to(requested)?;
        let indication = self.repo.update_status(&mut *tx, indication_id, next).await?;

        let commission = if next == IndicationStatus::Concluded {
            self.commission_service
                .create_for_indication(&mut *tx, &indication)
                .await?
        } else {
            None
        };

        tx.commit().await?;

        tracing::info!(
            "🔄 Indicação {}: {} -> {}",
            indication.id,
            current.status.as_str(),
            indication.status.as_str()
        );

        Ok(IndicationStatusChange { indication, commission })
    }
}
