// src/handlers/catalog.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::{AdminUser, ArchitectUser},
        i18n::Locale,
    },
    models::catalog::{
        AddCatalogProductPayload, AddCustomProductPayload, CatalogImage, CatalogImagePayload, CatalogItem,
        CatalogItemDetail, CatalogPiece, CatalogPiecePayload, CatalogSummary, CreateCatalogItemPayload,
        ProjectProduct, ProjectView,
    },
};

// =============================================================================
//  ADMIN
// =============================================================================

// GET /api/admin/catalog
#[utoipa::path(
    get,
    path = "/api/admin/catalog",
    tag = "Catalog",
    responses(
        (status = 200, description = "Itens do catálogo, mais recentes primeiro", body = Vec<CatalogItem>),
        (status = 403, description = "Acesso negado")
    ),
    security(("session_cookie" = []))
)]
pub async fn list_items(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    let items = app_state
        .catalog_service
        .list_items()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(items))
}

// POST /api/admin/catalog
#[utoipa::path(
    post,
    path = "/api/admin/catalog",
    tag = "Catalog",
    request_body = CreateCatalogItemPayload,
    responses(
        (status = 201, description = "Item criado", body = CatalogItem),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "SKU ou nome já existe")
    ),
    security(("session_cookie" = []))
)]
pub async fn create_item(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: AdminUser,
    Json(payload): Json<CreateCatalogItemPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let item = app_state
        .catalog_service
        .create_item(payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(item)))
}

// GET /api/admin/catalog/{id}
#[utoipa::path(
    get,
    path = "/api/admin/catalog/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "ID do item de catálogo")),
    responses(
        (status = 200, description = "Item com peças e imagens", body = CatalogItemDetail),
        (status = 404, description = "Item não encontrado")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_item(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: AdminUser,
    Path(item_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = app_state
        .catalog_service
        .item_detail(item_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(detail))
}

// POST /api/admin/catalog/{id}/pieces
#[utoipa::path(
    post,
    path = "/api/admin/catalog/{id}/pieces",
    tag = "Catalog",
    request_body = CatalogPiecePayload,
    params(("id" = Uuid, Path, description = "ID do item de catálogo")),
    responses(
        (status = 201, description = "Peça adicionada", body = CatalogPiece),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Item não encontrado")
    ),
    security(("session_cookie" = []))
)]
pub async fn add_piece(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: AdminUser,
    Path(item_id): Path<Uuid>,
    Json(payload): Json<CatalogPiecePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let piece = app_state
        .catalog_service
        .add_piece(item_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(piece)))
}

// POST /api/admin/catalog/{id}/images
#[utoipa::path(
    post,
    path = "/api/admin/catalog/{id}/images",
    tag = "Catalog",
    request_body = CatalogImagePayload,
    params(("id" = Uuid, Path, description = "ID do item de catálogo")),
    responses(
        (status = 201, description = "Imagem vinculada", body = CatalogImage),
        (status = 400, description = "URL inválida"),
        (status = 404, description = "Item não encontrado")
    ),
    security(("session_cookie" = []))
)]
pub async fn add_image(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: AdminUser,
    Path(item_id): Path<Uuid>,
    Json(payload): Json<CatalogImagePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let image = app_state
        .catalog_service
        .add_image(item_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(image)))
}

// DELETE /api/admin/catalog/images/{id}
#[utoipa::path(
    delete,
    path = "/api/admin/catalog/images/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "ID da imagem")),
    responses(
        (status = 204, description = "Imagem removida"),
        (status = 404, description = "Imagem não encontrada")
    ),
    security(("session_cookie" = []))
)]
pub async fn delete_image(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: AdminUser,
    Path(image_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .catalog_service
        .delete_image(image_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ARQUITETO
// =============================================================================

// GET /api/architect/catalog
#[utoipa::path(
    get,
    path = "/api/architect/catalog",
    tag = "Catalog",
    responses(
        (status = 200, description = "Catálogo em ordem alfabética", body = Vec<CatalogSummary>)
    ),
    security(("session_cookie" = []))
)]
pub async fn list_summaries(
    State(app_state): State<AppState>,
    locale: Locale,
    _architect: ArchitectUser,
) -> Result<impl IntoResponse, ApiError> {
    let items = app_state
        .catalog_service
        .list_summaries()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(items))
}

// POST /api/architect/indications/{id}/products
#[utoipa::path(
    post,
    path = "/api/architect/indications/{id}/products",
    tag = "Catalog",
    request_body = AddCatalogProductPayload,
    params(("id" = Uuid, Path, description = "ID da indicação")),
    responses(
        (status = 201, description = "Produto do catálogo adicionado ao projeto", body = ProjectProduct),
        (status = 403, description = "Acesso negado ou recurso não encontrado"),
        (status = 404, description = "Item de catálogo não encontrado")
    ),
    security(("session_cookie" = []))
)]
pub async fn add_catalog_product(
    State(app_state): State<AppState>,
    locale: Locale,
    architect: ArchitectUser,
    Path(indication_id): Path<Uuid>,
    Json(payload): Json<AddCatalogProductPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let product = app_state
        .catalog_service
        .add_catalog_product(architect.user(), indication_id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(product)))
}

// POST /api/architect/indications/{id}/custom-products
#[utoipa::path(
    post,
    path = "/api/architect/indications/{id}/custom-products",
    tag = "Catalog",
    request_body = AddCustomProductPayload,
    params(("id" = Uuid, Path, description = "ID da indicação")),
    responses(
        (status = 201, description = "Produto personalizado adicionado", body = ProjectProduct),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Acesso negado ou recurso não encontrado")
    ),
    security(("session_cookie" = []))
)]
pub async fn add_custom_product(
    State(app_state): State<AppState>,
    locale: Locale,
    architect: ArchitectUser,
    Path(indication_id): Path<Uuid>,
    Json(payload): Json<AddCustomProductPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let product = app_state
        .catalog_service
        .add_custom_product(architect.user(), indication_id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(product)))
}

// GET /api/architect/projects/{id}
#[utoipa::path(
    get,
    path = "/api/architect/projects/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "ID da indicação")),
    responses(
        (status = 200, description = "Projeto com produtos e catálogo", body = ProjectView),
        (status = 403, description = "Acesso negado ou recurso não encontrado")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_project(
    State(app_state): State<AppState>,
    locale: Locale,
    architect: ArchitectUser,
    Path(indication_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let project = app_state
        .catalog_service
        .project(architect.user(), indication_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(project))
}
