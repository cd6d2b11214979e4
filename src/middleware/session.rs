// src/middleware/session.rs

use axum::extract::FromRef;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::{
    config::AppState,
    models::auth::SessionClaims,
    services::token::{SessionTokenCodec, SESSION_TTL_DAYS},
};

/// Nome do cookie de sessão.
pub const AUTH_COOKIE: &str = "auth_token";

// Tudo o que o Gate e os guards precisam para ler/gravar a sessão
#[derive(Clone)]
pub struct SessionContext {
    pub codec: SessionTokenCodec,
    pub secure_cookies: bool,
}

impl FromRef<AppState> for SessionContext {
    fn from_ref(state: &AppState) -> Self {
        state.session.clone()
    }
}

impl SessionContext {
    pub fn new(codec: SessionTokenCodec, secure_cookies: bool) -> Self {
        Self { codec, secure_cookies }
    }

    /// HttpOnly, SameSite=Strict, Path=/, Max-Age de 7 dias. Secure só em produção.
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((AUTH_COOKIE, token))
            .http_only(true)
            .secure(self.secure_cookies)
            .same_site(SameSite::Strict)
            .path("/")
            .max_age(time::Duration::days(SESSION_TTL_DAYS))
            .build()
    }

    /// Valor vazio com Max-Age 0: o navegador descarta o cookie.
    pub fn cleared_cookie(&self) -> Cookie<'static> {
        Cookie::build((AUTH_COOKIE, ""))
            .http_only(true)
            .secure(self.secure_cookies)
            .same_site(SameSite::Strict)
            .path("/")
            .max_age(time::Duration::ZERO)
            .build()
    }

    /// Claims do cookie, se existirem e forem válidas. Token inválido = sem token.
    pub fn claims_from(&self, jar: &CookieJar) -> Option<SessionClaims> {
        let cookie = jar.get(AUTH_COOKIE)?;
        if cookie.value().is_empty() {
            return None;
        }
        match self.codec.verify(cookie.value()) {
            Ok(claims) => Some(claims),
            Err(e) => {
                tracing::debug!("Cookie de sessão rejeitado: {}", e);
                None
            }
        }
    }
}
