// src/db/catalog_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::catalog::{
        CatalogImage, CatalogImagePayload, CatalogItem, CatalogPiece, CatalogPiecePayload, CatalogSummary,
        CreateCatalogItemPayload, NewProjectProduct, ProjectProduct,
    },
};

#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CATÁLOGO
    // =========================================================================

    /// SKU ou nome repetido vira `AlreadyExists`.
    pub async fn create_item(&self, payload: &CreateCatalogItemPayload) -> Result<CatalogItem, AppError> {
        sqlx::query_as::<_, CatalogItem>(
            r#"
            INSERT INTO catalog_items (name, sku, description, base_price)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.sku)
        .bind(&payload.description)
        .bind(payload.base_price)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from_unique_violation)
    }

    pub async fn find_item<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<CatalogItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, CatalogItem>("SELECT * FROM catalog_items WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(item)
    }

    pub async fn list_items(&self) -> Result<Vec<CatalogItem>, AppError> {
        let items = sqlx::query_as::<_, CatalogItem>("SELECT * FROM catalog_items ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    pub async fn list_summaries(&self) -> Result<Vec<CatalogSummary>, AppError> {
        let items =
            sqlx::query_as::<_, CatalogSummary>("SELECT id, name, sku FROM catalog_items ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(items)
    }

    // =========================================================================
    //  PEÇAS E IMAGENS
    // =========================================================================

    pub async fn add_piece(&self, item_id: Uuid, piece: &CatalogPiecePayload) -> Result<CatalogPiece, AppError> {
        let piece = sqlx::query_as::<_, CatalogPiece>(
            r#"
            INSERT INTO catalog_pieces (catalog_item_id, name, quantity, height, width, depth)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(item_id)
        .bind(piece.name.trim())
        .bind(piece.quantity)
        .bind(piece.height)
        .bind(piece.width)
        .bind(piece.depth)
        .fetch_one(&self.pool)
        .await?;

        Ok(piece)
    }

    /// Peças de vários itens de uma vez, na ordem de cadastro.
    pub async fn pieces_for_items(&self, item_ids: &[Uuid]) -> Result<Vec<CatalogPiece>, AppError> {
        let pieces = sqlx::query_as::<_, CatalogPiece>(
            "SELECT * FROM catalog_pieces WHERE catalog_item_id = ANY($1) ORDER BY created_at ASC",
        )
        .bind(item_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(pieces)
    }

    pub async fn add_image(&self, item_id: Uuid, image: &CatalogImagePayload) -> Result<CatalogImage, AppError> {
        let image = sqlx::query_as::<_, CatalogImage>(
            r#"
            INSERT INTO catalog_images (catalog_item_id, url, alt_text)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(item_id)
        .bind(&image.url)
        .bind(&image.alt_text)
        .fetch_one(&self.pool)
        .await?;

        Ok(image)
    }

    pub async fn images_for_item(&self, item_id: Uuid) -> Result<Vec<CatalogImage>, AppError> {
        let images = sqlx::query_as::<_, CatalogImage>(
            "SELECT * FROM catalog_images WHERE catalog_item_id = $1 ORDER BY created_at ASC",
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    /// `false` quando a imagem não existia.
    pub async fn delete_image(&self, image_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM catalog_images WHERE id = $1")
            .bind(image_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    //  PRODUTOS DO PROJETO
    // =========================================================================

    pub async fn add_project_product<'e, E>(
        &self,
        executor: E,
        indication_id: Uuid,
        product: &NewProjectProduct,
    ) -> Result<ProjectProduct, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, ProjectProduct>(
            r#"
            INSERT INTO project_products (indication_id, catalog_item_id, name, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(indication_id)
        .bind(product.catalog_item_id)
        .bind(&product.name)
        .bind(&product.notes)
        .fetch_one(executor)
        .await?;

        Ok(product)
    }

    pub async fn products_for_indication(&self, indication_id: Uuid) -> Result<Vec<ProjectProduct>, AppError> {
        let products = sqlx::query_as::<_, ProjectProduct>(
            "SELECT * FROM project_products WHERE indication_id = $1 ORDER BY name ASC",
        )
        .bind(indication_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }
}
