// src/handlers/auth.rs

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::auth::{LoginResponse, LoginUserPayload, MessageResponse, RegisterUserPayload, User},
};

// Primeiro IP do X-Forwarded-For (o cliente original)
pub(crate) fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
}

// POST /api/auth/register
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterUserPayload,
    responses(
        (status = 201, description = "Adesão registrada, aguardando aprovação", body = MessageResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "E-mail, CAU ou CNPJ já cadastrado")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    locale: Locale,
    headers: HeaderMap,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    app_state
        .auth_service
        .register(payload, client_ip(&headers))
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    let message = if locale.is_portuguese() {
        "Adesão realizada! Sua conta está aguardando aprovação."
    } else {
        "Registration received! Your account is awaiting approval."
    };

    Ok((StatusCode::CREATED, Json(MessageResponse { message: message.to_string() })))
}

// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Login bem-sucedido; cookie auth_token definido", body = LoginResponse),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    locale: Locale,
    jar: CookieJar,
    Json(payload): Json<LoginUserPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let (token, response) = app_state
        .auth_service
        .login(&payload.email, &payload.password)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((jar.add(app_state.session.session_cookie(token)), Json(response)))
}

// POST /api/auth/logout
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Cookie de sessão removido", body = MessageResponse)
    )
)]
pub async fn logout(State(app_state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    (
        jar.add(app_state.session.cleared_cookie()),
        Json(MessageResponse { message: "Logout realizado.".to_string() }),
    )
}

// GET /api/auth/me
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Usuário da sessão", body = User),
        (status = 401, description = "Sessão inválida")
    ),
    security(("session_cookie" = []))
)]
pub async fn me(AuthenticatedUser(user): AuthenticatedUser) -> Json<User> {
    Json(user)
}
