// src/handlers/architect.rs

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
    middleware::{auth::ArchitectUser, i18n::Locale},
    models::{
        account::{InviteCollaboratorPayload, TeamMember},
        auth::User,
        dashboard::ArchitectDashboard,
        indication::{CreateIndicationPayload, Indication, IndicationDetail, IndicationSummary},
        quote::{QuoteDecisionOutcome, QuoteDecisionPayload},
    },
};

// GET /api/architect/indications
#[utoipa::path(
    get,
    path = "/api/architect/indications",
    tag = "Architect",
    responses(
        (status = 200, description = "Minhas indicações (com comissão)", body = Vec<IndicationSummary>)
    ),
    security(("session_cookie" = []))
)]
pub async fn list_indications(
    State(app_state): State<AppState>,
    locale: Locale,
    architect: ArchitectUser,
) -> Result<impl IntoResponse, ApiError> {
    let rows = app_state
        .indication_service
        .list_for_architect(architect.user())
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(rows))
}

// POST /api/architect/indications
#[utoipa::path(
    post,
    path = "/api/architect/indications",
    tag = "Architect",
    request_body = CreateIndicationPayload,
    responses(
        (status = 201, description = "Indicação criada", body = Indication),
        (status = 400, description = "Dados inválidos")
    ),
    security(("session_cookie" = []))
)]
pub async fn create_indication(
    State(app_state): State<AppState>,
    locale: Locale,
    architect: ArchitectUser,
    Json(payload): Json<CreateIndicationPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let indication = app_state
        .indication_service
        .create(architect.user(), payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(indication)))
}

// GET /api/architect/indications/{id}
#[utoipa::path(
    get,
    path = "/api/architect/indications/{id}",
    tag = "Architect",
    params(("id" = Uuid, Path, description = "ID da indicação")),
    responses(
        (status = 200, description = "Indicação com cliente e orçamentos", body = IndicationDetail),
        (status = 403, description = "Acesso negado ou recurso não encontrado")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_indication(
    State(app_state): State<AppState>,
    locale: Locale,
    architect: ArchitectUser,
    Path(indication_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = app_state
        .indication_service
        .detail(architect.user(), indication_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(detail))
}

// POST /api/architect/quotes/{id}/decision
#[utoipa::path(
    post,
    path = "/api/architect/quotes/{id}/decision",
    tag = "Architect",
    request_body = QuoteDecisionPayload,
    params(("id" = Uuid, Path, description = "ID do orçamento")),
    responses(
        (status = 200, description = "Decisão registrada", body = QuoteDecisionOutcome),
        (status = 403, description = "Acesso negado ou recurso não encontrado"),
        (status = 409, description = "Orçamento não está mais pendente")
    ),
    security(("session_cookie" = []))
)]
pub async fn decide_quote(
    State(app_state): State<AppState>,
    locale: Locale,
    architect: ArchitectUser,
    Path(quote_id): Path<Uuid>,
    Json(payload): Json<QuoteDecisionPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = app_state
        .quote_service
        .decide(architect.user(), quote_id, payload.new_status)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(outcome))
}

// GET /api/architect/team
#[utoipa::path(
    get,
    path = "/api/architect/team",
    tag = "Architect",
    responses(
        (status = 200, description = "Membros do escritório", body = Vec<TeamMember>)
    ),
    security(("session_cookie" = []))
)]
pub async fn list_team(
    State(app_state): State<AppState>,
    locale: Locale,
    architect: ArchitectUser,
) -> Result<impl IntoResponse, ApiError> {
    let members = app_state
        .account_service
        .list_team(architect.user())
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(members))
}

// POST /api/architect/collaborators
#[utoipa::path(
    post,
    path = "/api/architect/collaborators",
    tag = "Architect",
    request_body = InviteCollaboratorPayload,
    responses(
        (status = 201, description = "Colaborador adicionado", body = User),
        (status = 403, description = "Somente gestores de escritório podem convidar"),
        (status = 409, description = "E-mail ou CAU já cadastrado")
    ),
    security(("session_cookie" = []))
)]
pub async fn invite_collaborator(
    State(app_state): State<AppState>,
    locale: Locale,
    architect: ArchitectUser,
    Json(payload): Json<InviteCollaboratorPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let user = app_state
        .account_service
        .invite_collaborator(architect.user(), payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(user)))
}

// GET /api/architect/dashboard
#[utoipa::path(
    get,
    path = "/api/architect/dashboard",
    tag = "Architect",
    responses(
        (status = 200, description = "Resumo das minhas indicações", body = ArchitectDashboard)
    ),
    security(("session_cookie" = []))
)]
pub async fn dashboard(
    State(app_state): State<AppState>,
    locale: Locale,
    architect: ArchitectUser,
) -> Result<impl IntoResponse, ApiError> {
    let summary = app_state
        .dashboard_service
        .architect_summary(architect.user())
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(summary))
}
