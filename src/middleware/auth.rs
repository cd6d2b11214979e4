// src/middleware/auth.rs

use std::marker::PhantomData;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::auth::{AccountStatus, Role, User},
};

// Usuário da requisição, sempre relido do banco pelos guards da API
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

fn request_locale(request: &Request) -> Locale {
    request
        .headers()
        .get(axum::http::header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
        .map(Locale::from_header)
        .unwrap_or_default()
}

async fn resolve_user(
    app_state: &AppState,
    jar: &CookieJar,
    locale: &Locale,
) -> Result<User, ApiError> {
    let claims = app_state
        .session
        .claims_from(jar)
        .ok_or(AppError::InvalidToken)
        .map_err(|e| e.to_api_error(locale))?;

    app_state
        .auth_service
        .resolve_session(&claims)
        .await
        .map_err(|e| e.to_api_error(locale))
}

/// Guard das rotas que aceitam contas pendentes (ex.: envio de contrato).
/// Conta INACTIVE é deslogada.
pub async fn session_guard(
    State(app_state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let locale = request_locale(&request);
    match resolve_user(&app_state, &jar, &locale).await {
        Ok(user) => {
            request.extensions_mut().insert(AuthenticatedUser(user));
            next.run(request).await
        }
        Err(e) => (jar.add(app_state.session.cleared_cookie()), e).into_response(),
    }
}

/// Guard das rotas de negócio: exige conta ACTIVE no banco, não só no token.
pub async fn active_guard(
    State(app_state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let locale = request_locale(&request);
    match resolve_user(&app_state, &jar, &locale).await {
        Ok(user) if user.status == AccountStatus::Active => {
            request.extensions_mut().insert(AuthenticatedUser(user));
            next.run(request).await
        }
        Ok(user) => {
            tracing::warn!("Conta {} ({}) barrada em rota de negócio", user.id, user.status.as_str());
            AppError::Forbidden.to_api_error(&locale).into_response()
        }
        Err(e) => (jar.add(app_state.session.cleared_cookie()), e).into_response(),
    }
}

// Extrator para obter o usuário autenticado diretamente nos handlers
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::InvalidToken)
    }
}

/// 1. O Trait que define o papel exigido por uma rota
pub trait RoleDef: Send + Sync + 'static {
    fn role() -> Role;
}

/// 2. O Extractor (Guardião). Carrega o usuário já verificado.
pub struct RequireRole<T>(pub User, PhantomData<T>);

impl<T> RequireRole<T> {
    pub fn user(&self) -> &User {
        &self.0
    }
}

// 3. Implementação do FromRequestParts
impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleDef,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(locale) = Locale::from_request_parts(parts, state).await;

        let AuthenticatedUser(user) = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::InvalidToken)
            .map_err(|e| e.to_api_error(&locale))?;

        if user.role != T::role() {
            tracing::warn!("Usuário {} sem o papel {:?} exigido", user.id, T::role());
            return Err(AppError::Forbidden.to_api_error(&locale));
        }

        Ok(RequireRole(user, PhantomData))
    }
}

// ---
// DEFINIÇÃO DOS PAPÉIS (TIPOS)
// ---

pub struct AdminOnly;
impl RoleDef for AdminOnly {
    fn role() -> Role { Role::Admin }
}

pub struct ArchitectOnly;
impl RoleDef for ArchitectOnly {
    fn role() -> Role { Role::Architect }
}

pub type AdminUser = RequireRole<AdminOnly>;
pub type ArchitectUser = RequireRole<ArchitectOnly>;
