// src/models/catalog.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::money::{validate_amount, validate_measure};
use crate::models::indication::IndicationDetail;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: Uuid,
    #[schema(example = "Cozinha Linear Nogueira")]
    pub name: String,
    #[schema(example = "COZ-LIN-01")]
    pub sku: String,
    pub description: Option<String>,
    #[schema(example = "18500.00")]
    pub base_price: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Entrada do seletor de produtos do arquiteto.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPiece {
    pub id: Uuid,
    pub catalog_item_id: Uuid,
    #[schema(example = "Porta superior")]
    pub name: String,
    pub quantity: i32,
    #[schema(example = "72.00")]
    pub height: Decimal,
    #[schema(example = "40.00")]
    pub width: Decimal,
    #[schema(example = "1.80")]
    pub depth: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogImage {
    pub id: Uuid,
    pub catalog_item_id: Uuid,
    pub url: String,
    pub alt_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItemDetail {
    #[serde(flatten)]
    pub item: CatalogItem,
    pub pieces: Vec<CatalogPiece>,
    pub images: Vec<CatalogImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProduct {
    pub id: Uuid,
    pub indication_id: Uuid,
    /// Vazio nos produtos personalizados.
    pub catalog_item_id: Option<Uuid>,
    pub name: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ProjectProduct {
    pub fn is_custom(&self) -> bool {
        self.catalog_item_id.is_none()
    }
}

/// Produto do projeto com as peças padrão do item de catálogo de origem.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProductView {
    #[serde(flatten)]
    pub product: ProjectProduct,
    pub pieces: Vec<CatalogPiece>,
}

/// Tela do projeto: indicação, produtos escolhidos e o catálogo para escolher mais.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    #[serde(flatten)]
    pub detail: IndicationDetail,
    pub products: Vec<ProjectProductView>,
    pub catalog: Vec<CatalogSummary>,
}

/// Agrupa as peças por item, preservando a ordem em que vieram do banco.
pub fn attach_pieces(products: Vec<ProjectProduct>, pieces: &[CatalogPiece]) -> Vec<ProjectProductView> {
    products
        .into_iter()
        .map(|product| {
            let pieces = match product.catalog_item_id {
                Some(item_id) => pieces.iter().filter(|p| p.catalog_item_id == item_id).cloned().collect(),
                None => Vec::new(),
            };
            ProjectProductView { product, pieces }
        })
        .collect()
}

fn trimmed_optional(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCatalogItemPayload {
    #[validate(length(min = 3, message = "Nome é obrigatório."))]
    #[schema(example = "Cozinha Linear Nogueira")]
    pub name: String,
    #[validate(length(min = 2, message = "SKU é obrigatório."))]
    #[schema(example = "COZ-LIN-01")]
    pub sku: String,
    pub description: Option<String>,
    #[validate(custom(function = "validate_amount"))]
    #[schema(example = "18500.00")]
    pub base_price: Option<Decimal>,
}

impl CreateCatalogItemPayload {
    /// Espaços nas pontas não contam para a unicidade.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            sku: self.sku.trim().to_string(),
            description: trimmed_optional(self.description),
            base_price: self.base_price,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPiecePayload {
    #[validate(length(min = 1, message = "Nome da peça é obrigatório."))]
    #[schema(example = "Porta superior")]
    pub name: String,
    #[validate(range(min = 1, message = "A quantidade deve ser de no mínimo 1."))]
    #[schema(example = 2)]
    pub quantity: i32,
    #[validate(custom(function = "validate_measure"))]
    pub height: Decimal,
    #[validate(custom(function = "validate_measure"))]
    pub width: Decimal,
    #[validate(custom(function = "validate_measure"))]
    pub depth: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogImagePayload {
    #[validate(url(message = "URL da imagem inválida."))]
    #[schema(example = "https://cdn.exemplo.com/cozinha.jpg")]
    pub url: String,
    pub alt_text: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCatalogProductPayload {
    pub catalog_item_id: Uuid,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCustomProductPayload {
    #[validate(length(min = 1, message = "Nome do produto é obrigatório."))]
    #[schema(example = "Painel ripado sob medida")]
    pub name: String,
    pub notes: Option<String>,
}

/// Produto a inserir no projeto, já resolvido (nome copiado do catálogo ou digitado).
#[derive(Debug)]
pub struct NewProjectProduct {
    pub catalog_item_id: Option<Uuid>,
    pub name: String,
    pub notes: Option<String>,
}

impl NewProjectProduct {
    pub fn from_catalog(item: &CatalogItem, notes: Option<String>) -> Self {
        Self { catalog_item_id: Some(item.id), name: item.name.clone(), notes: trimmed_optional(notes) }
    }

    pub fn custom(payload: AddCustomProductPayload) -> Self {
        Self {
            catalog_item_id: None,
            name: payload.name.trim().to_string(),
            notes: trimmed_optional(payload.notes),
        }
    }
}
