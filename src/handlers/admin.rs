// src/handlers/admin.rs

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
    middleware::{auth::AdminUser, i18n::Locale},
    models::{
        account::{AdminCreateUserPayload, AdminUpdateUserPayload, UpdateUserStatusPayload, UserListEntry},
        auth::User,
        commission::{Commission, CommissionListEntry},
        dashboard::AdminDashboard,
        indication::{IndicationDetail, IndicationStatusChange, IndicationSummary, UpdateIndicationStatusPayload},
        quote::{CreateQuotePayload, Quote},
    },
};

// =============================================================================
//  USUÁRIOS
// =============================================================================

// GET /api/admin/users
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "Admin",
    responses(
        (status = 200, description = "Usuários com o status do contrato", body = Vec<UserListEntry>),
        (status = 403, description = "Acesso negado")
    ),
    security(("session_cookie" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    let users = app_state
        .account_service
        .list_users()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(users))
}

// POST /api/admin/users
#[utoipa::path(
    post,
    path = "/api/admin/users",
    tag = "Admin",
    request_body = AdminCreateUserPayload,
    responses(
        (status = 201, description = "Usuário criado (ACTIVE)", body = User),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "E-mail, CAU ou CNPJ já cadastrado")
    ),
    security(("session_cookie" = []))
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: AdminUser,
    Json(payload): Json<AdminCreateUserPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let user = app_state
        .account_service
        .admin_create_user(payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(user)))
}

// PUT /api/admin/users/{id}
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}",
    tag = "Admin",
    request_body = AdminUpdateUserPayload,
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Usuário atualizado", body = User),
        (status = 404, description = "Usuário não encontrado"),
        (status = 409, description = "E-mail já em uso")
    ),
    security(("session_cookie" = []))
)]
pub async fn update_user(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: AdminUser,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<AdminUpdateUserPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let user = app_state
        .account_service
        .admin_update_user(user_id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(user))
}

// POST /api/admin/users/{id}/status
#[utoipa::path(
    post,
    path = "/api/admin/users/{id}/status",
    tag = "Admin",
    request_body = UpdateUserStatusPayload,
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Status alterado", body = User),
        (status = 404, description = "Usuário não encontrado"),
        (status = 409, description = "Transição não permitida")
    ),
    security(("session_cookie" = []))
)]
pub async fn update_user_status(
    State(app_state): State<AppState>,
    locale: Locale,
    admin: AdminUser,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateUserStatusPayload>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::debug!("Admin {} alterando status de {}", admin.user().id, user_id);

    let user = app_state
        .account_service
        .update_status(user_id, payload.new_status)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(user))
}

// =============================================================================
//  INDICAÇÕES E ORÇAMENTOS
// =============================================================================

// GET /api/admin/indications
#[utoipa::path(
    get,
    path = "/api/admin/indications",
    tag = "Admin",
    responses(
        (status = 200, description = "Todas as indicações", body = Vec<IndicationSummary>)
    ),
    security(("session_cookie" = []))
)]
pub async fn list_indications(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    let rows = app_state
        .indication_service
        .list_all()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(rows))
}

// GET /api/admin/indications/{id}
#[utoipa::path(
    get,
    path = "/api/admin/indications/{id}",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID da indicação")),
    responses(
        (status = 200, description = "Indicação com cliente e orçamentos", body = IndicationDetail),
        (status = 404, description = "Indicação não encontrada")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_indication(
    State(app_state): State<AppState>,
    locale: Locale,
    admin: AdminUser,
    Path(indication_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = app_state
        .indication_service
        .detail(admin.user(), indication_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(detail))
}

// POST /api/admin/indications/{id}/status
#[utoipa::path(
    post,
    path = "/api/admin/indications/{id}/status",
    tag = "Admin",
    request_body = UpdateIndicationStatusPayload,
    params(("id" = Uuid, Path, description = "ID da indicação")),
    responses(
        (status = 200, description = "Status alterado (e comissão gerada na conclusão)", body = IndicationStatusChange),
        (status = 404, description = "Indicação não encontrada"),
        (status = 409, description = "Transição não permitida")
    ),
    security(("session_cookie" = []))
)]
pub async fn update_indication_status(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: AdminUser,
    Path(indication_id): Path<Uuid>,
    Json(payload): Json<UpdateIndicationStatusPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let change = app_state
        .indication_service
        .update_status(indication_id, payload.new_status)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(change))
}

// POST /api/admin/indications/{id}/quotes
#[utoipa::path(
    post,
    path = "/api/admin/indications/{id}/quotes",
    tag = "Admin",
    request_body = CreateQuotePayload,
    params(("id" = Uuid, Path, description = "ID da indicação")),
    responses(
        (status = 201, description = "Orçamento criado", body = Quote),
        (status = 400, description = "Valor inválido"),
        (status = 404, description = "Indicação não encontrada"),
        (status = 409, description = "Indicação já finalizada")
    ),
    security(("session_cookie" = []))
)]
pub async fn create_quote(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: AdminUser,
    Path(indication_id): Path<Uuid>,
    Json(payload): Json<CreateQuotePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let quote = app_state
        .quote_service
        .create_quote(indication_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(quote)))
}

// =============================================================================
//  COMISSÕES E PAINEL
// =============================================================================

// GET /api/admin/commissions
#[utoipa::path(
    get,
    path = "/api/admin/commissions",
    tag = "Admin",
    responses(
        (status = 200, description = "Comissões", body = Vec<CommissionListEntry>)
    ),
    security(("session_cookie" = []))
)]
pub async fn list_commissions(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    let rows = app_state
        .commission_service
        .list_all()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(rows))
}

// POST /api/admin/commissions/{id}/pay
#[utoipa::path(
    post,
    path = "/api/admin/commissions/{id}/pay",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID da comissão")),
    responses(
        (status = 200, description = "Comissão paga", body = Commission),
        (status = 404, description = "Comissão não encontrada"),
        (status = 409, description = "Comissão já paga")
    ),
    security(("session_cookie" = []))
)]
pub async fn pay_commission(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: AdminUser,
    Path(commission_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let commission = app_state
        .commission_service
        .pay(commission_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(commission))
}

// GET /api/admin/dashboard
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    tag = "Admin",
    responses(
        (status = 200, description = "Resumo global", body = AdminDashboard)
    ),
    security(("session_cookie" = []))
)]
pub async fn dashboard(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    let summary = app_state
        .dashboard_service
        .admin_summary()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(summary))
}
