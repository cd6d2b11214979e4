// src/services/token.rs

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{AccountStatus, Role, SessionClaims},
};

/// Validade fixa da sessão (cookie e token).
pub const SESSION_TTL_DAYS: i64 = 7;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expirado")]
    Expired,
    #[error("token inválido")]
    Invalid,
}

impl From<TokenError> for AppError {
    fn from(_: TokenError) -> Self {
        AppError::InvalidToken
    }
}

// Assina e valida o JWT da sessão. A chave vem da configuração, nunca de um global.
#[derive(Clone)]
pub struct SessionTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl SessionTokenCodec {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::days(SESSION_TTL_DAYS),
        }
    }

    pub fn issue(&self, user_id: Uuid, role: Role, status: AccountStatus) -> Result<String, AppError> {
        self.issue_at(user_id, role, status, Utc::now())
    }

    pub fn issue_at(
        &self,
        user_id: Uuid,
        role: Role,
        status: AccountStatus,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let claims = SessionClaims {
            user_id,
            role,
            status,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    /// Falha tipada para assinatura adulterada, expiração ou estrutura malformada.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat"]);

        decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> SessionTokenCodec {
        SessionTokenCodec::new("segredo-de-teste")
    }

    #[test]
    fn verify_returns_exactly_what_was_issued() {
        let codec = codec();
        let id = Uuid::new_v4();
        for (role, status) in [
            (Role::Admin, AccountStatus::Active),
            (Role::Architect, AccountStatus::PendingApproval),
            (Role::Architect, AccountStatus::Inactive),
        ] {
            let token = codec.issue(id, role, status).unwrap();
            let claims = codec.verify(&token).unwrap();
            assert_eq!((claims.user_id, claims.role, claims.status), (id, role, status));
            assert_eq!(claims.exp - claims.iat, SESSION_TTL_DAYS * 24 * 60 * 60);
        }
    }

    #[test]
    fn expired_token_fails() {
        let codec = codec();
        let issued = Utc::now() - Duration::days(SESSION_TTL_DAYS + 1);
        let token = codec
            .issue_at(Uuid::new_v4(), Role::Architect, AccountStatus::Active, issued)
            .unwrap();
        assert_eq!(codec.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn token_close_to_expiry_is_still_valid() {
        let codec = codec();
        let issued = Utc::now() - Duration::days(SESSION_TTL_DAYS) + Duration::minutes(5);
        let token = codec
            .issue_at(Uuid::new_v4(), Role::Admin, AccountStatus::Active, issued)
            .unwrap();
        assert!(codec.verify(&token).is_ok());
    }

    #[test]
    fn tampered_token_fails() {
        let codec = codec();
        let token = codec
            .issue(Uuid::new_v4(), Role::Architect, AccountStatus::PendingApproval)
            .unwrap();
        let segments: Vec<&str> = token.split('.').collect();
        assert_eq!(segments.len(), 3);

        // Troca um caractere no meio do payload e no meio da assinatura
        for (segment, offset) in [(1usize, segments[1].len() / 2), (2, segments[2].len() / 2)] {
            let mut parts: Vec<String> = segments.iter().map(|s| s.to_string()).collect();
            let original = parts[segment].as_bytes()[offset];
            let replacement = if original == b'A' { 'B' } else { 'A' };
            parts[segment].replace_range(offset..offset + 1, &replacement.to_string());
            let forged = parts.join(".");
            assert_eq!(codec.verify(&forged), Err(TokenError::Invalid));
        }
    }

    #[test]
    fn token_signed_with_another_secret_fails() {
        let token = SessionTokenCodec::new("outro-segredo")
            .issue(Uuid::new_v4(), Role::Admin, AccountStatus::Active)
            .unwrap();
        assert_eq!(codec().verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn malformed_token_fails() {
        let codec = codec();
        assert_eq!(codec.verify(""), Err(TokenError::Invalid));
        assert_eq!(codec.verify("nao.e.jwt"), Err(TokenError::Invalid));
        assert_eq!(codec.verify("abc"), Err(TokenError::Invalid));
    }

    #[test]
    fn token_error_maps_to_uniform_app_error() {
        assert!(matches!(AppError::from(TokenError::Expired), AppError::InvalidToken));
    }
}
