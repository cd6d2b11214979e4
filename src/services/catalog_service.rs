// src/services/catalog_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CatalogRepository, IndicationRepository},
    models::{
        auth::User,
        catalog::{
            attach_pieces, AddCatalogProductPayload, AddCustomProductPayload, CatalogImage, CatalogImagePayload,
            CatalogItem, CatalogItemDetail, CatalogPiece, CatalogPiecePayload, CatalogSummary,
            CreateCatalogItemPayload, NewProjectProduct, ProjectProduct, ProjectView,
        },
    },
    services::indication_service::IndicationService,
};

#[derive(Clone)]
pub struct CatalogService {
    repo: CatalogRepository,
    indication_repo: IndicationRepository,
    indication_service: IndicationService,
    pool: PgPool,
}

impl CatalogService {
    pub fn new(
        repo: CatalogRepository,
        indication_repo: IndicationRepository,
        indication_service: IndicationService,
        pool: PgPool,
    ) -> Self {
        Self { repo, indication_repo, indication_service, pool }
    }

    // =========================================================================
    //  ADMIN
    // =========================================================================

    pub async fn create_item(&self, payload: CreateCatalogItemPayload) -> Result<CatalogItem, AppError> {
        let item = self.repo.create_item(&payload.normalized()).await?;
        tracing::info!("📦 Item de catálogo {} ({}) criado", item.id, item.sku);
        Ok(item)
    }

    pub async fn list_items(&self) -> Result<Vec<CatalogItem>, AppError> {
        self.repo.list_items().await
    }

    pub async fn item_detail(&self, item_id: Uuid) -> Result<CatalogItemDetail, AppError> {
        let item = self.existing_item(item_id).await?;
        let pieces = self.repo.pieces_for_items(&[item.id]).await?;
        let images = self.repo.images_for_item(item.id).await?;

        Ok(CatalogItemDetail { item, pieces, images })
    }

    pub async fn add_piece(&self, item_id: Uuid, payload: &CatalogPiecePayload) -> Result<CatalogPiece, AppError> {
        self.existing_item(item_id).await?;
        self.repo.add_piece(item_id, payload).await
    }

    pub async fn add_image(&self, item_id: Uuid, payload: &CatalogImagePayload) -> Result<CatalogImage, AppError> {
        self.existing_item(item_id).await?;
        self.repo.add_image(item_id, payload).await
    }

    pub async fn delete_image(&self, image_id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete_image(image_id).await? {
            return Err(AppError::NotFound("catalogImage"));
        }
        tracing::info!("🗑️ Imagem de catálogo {} removida", image_id);
        Ok(())
    }

    async fn existing_item(&self, item_id: Uuid) -> Result<CatalogItem, AppError> {
        self.repo
            .find_item(&self.pool, item_id)
            .await?
            .ok_or(AppError::NotFound("catalogItem"))
    }

    // =========================================================================
    //  ARQUITETO
    // =========================================================================

    pub async fn list_summaries(&self) -> Result<Vec<CatalogSummary>, AppError> {
        self.repo.list_summaries().await
    }

    /// Copia o nome do item de catálogo para um novo produto do projeto.
    pub async fn add_catalog_product(
        &self,
        architect: &User,
        indication_id: Uuid,
        payload: AddCatalogProductPayload,
    ) -> Result<ProjectProduct, AppError> {
        let mut tx = self.pool.begin().await?;

        self.lock_own_indication(&mut tx, architect, indication_id).await?;

        let item = self
            .repo
            .find_item(&mut *tx, payload.catalog_item_id)
            .await?
            .ok_or(AppError::NotFound("catalogItem"))?;

        let product = NewProjectProduct::from_catalog(&item, payload.notes);
        let product = self.repo.add_project_product(&mut *tx, indication_id, &product).await?;

        tx.commit().await?;

        tracing::info!("🛋️ Produto {} (catálogo {}) adicionado à indicação {}", product.id, item.id, indication_id);
        Ok(product)
    }

    pub async fn add_custom_product(
        &self,
        architect: &User,
        indication_id: Uuid,
        payload: AddCustomProductPayload,
    ) -> Result<ProjectProduct, AppError> {
        let mut tx = self.pool.begin().await?;

        self.lock_own_indication(&mut tx, architect, indication_id).await?;

        let product = NewProjectProduct::custom(payload);
        let product = self.repo.add_project_product(&mut *tx, indication_id, &product).await?;

        tx.commit().await?;

        tracing::info!("✏️ Produto personalizado {} adicionado à indicação {}", product.id, indication_id);
        Ok(product)
    }

    /// Indicação com cliente, orçamentos, produtos (com peças) e o catálogo.
    pub async fn project(&self, viewer: &User, indication_id: Uuid) -> Result<ProjectView, AppError> {
        let detail = self.indication_service.detail(viewer, indication_id).await?;

        let products = self.repo.products_for_indication(detail.indication.id).await?;
        let item_ids: Vec<Uuid> = products.iter().filter_map(|p| p.catalog_item_id).collect();
        let pieces = if item_ids.is_empty() {
            Vec::new()
        } else {
            self.repo.pieces_for_items(&item_ids).await?
        };
        let catalog = self.repo.list_summaries().await?;

        Ok(ProjectView { detail, products: attach_pieces(products, &pieces), catalog })
    }

    // Inexistente ou de outro arquiteto: o mesmo Forbidden
    async fn lock_own_indication(
        &self,
        tx: &mut sqlx::Transaction<'static, sqlx::Postgres>,
        architect: &User,
        indication_id: Uuid,
    ) -> Result<(), AppError> {
        match self.indication_repo.find_for_update(&mut **tx, indication_id).await? {
            Some(indication) if indication.architect_id == architect.id => Ok(()),
            _ => {
                tracing::warn!("Produto negado na indicação {} ao usuário {}", indication_id, architect.id);
                Err(AppError::Forbidden)
            }
        }
    }
}
