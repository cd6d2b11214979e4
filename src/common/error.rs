// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::middleware::i18n::Locale;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] ValidationErrors),

    // Erro de validação fora do `validator` (multipart, regras de negócio)
    #[error("Campo inválido: {field}")]
    InvalidField { field: &'static str, message: &'static str },

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido ou expirado")]
    InvalidToken,

    #[error("Acesso negado")]
    Forbidden,

    #[error("{0} não encontrado")]
    NotFound(&'static str),

    #[error("Transição inválida de {entity}: {current} -> {requested}")]
    InvalidTransition {
        entity: &'static str,
        current: String,
        requested: String,
    },

    #[error("Já existe: {0}")]
    AlreadyExists(&'static str),

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Erro de I/O: {0}")]
    IoError(#[from] std::io::Error),
}

/// O corpo de erro que realmente sai na resposta HTTP.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

fn tr(locale: &Locale, pt: &str, en: &str) -> String {
    if locale.is_portuguese() { pt.to_string() } else { en.to_string() }
}

/// Primeiro campo com erro, percorrendo structs e listas aninhadas em ordem alfabética.
pub(crate) fn first_field_error(errors: &ValidationErrors) -> Option<(String, String)> {
    let mut keys: Vec<_> = errors.errors().keys().collect();
    keys.sort();

    for key in keys {
        match &errors.errors()[key] {
            ValidationErrorsKind::Field(list) => {
                if let Some(first) = list.first() {
                    let message = first
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| first.code.to_string());
                    return Some((key.to_string(), message));
                }
            }
            ValidationErrorsKind::Struct(inner) => {
                if let Some((field, message)) = first_field_error(inner) {
                    return Some((format!("{key}.{field}"), message));
                }
            }
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    if let Some((field, message)) = first_field_error(inner) {
                        return Some((format!("{key}[{index}].{field}"), message));
                    }
                }
            }
        }
    }
    None
}

impl AppError {
    pub fn to_api_error(&self, locale: &Locale) -> ApiError {
        let (status, error, details) = match self {
            AppError::ValidationError(errors) => {
                let (field, message) = first_field_error(errors)
                    .unwrap_or_else(|| ("?".to_string(), "Dados inválidos.".to_string()));
                (StatusCode::BAD_REQUEST, message, Some(json!({ "field": field })))
            }
            AppError::InvalidField { field, message } => (
                StatusCode::BAD_REQUEST,
                message.to_string(),
                Some(json!({ "field": field })),
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                tr(locale, "Credenciais inválidas.", "Invalid credentials."),
                None,
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                tr(
                    locale,
                    "Token de autenticação inválido ou ausente.",
                    "Missing or invalid authentication token.",
                ),
                None,
            ),
            // Mesma resposta para recurso inexistente ou de outro dono
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                tr(
                    locale,
                    "Acesso negado ou recurso não encontrado.",
                    "Access denied or resource not found.",
                ),
                None,
            ),
            AppError::NotFound(entity) => (
                StatusCode::NOT_FOUND,
                tr(locale, "Registro não encontrado.", "Record not found."),
                Some(json!({ "entity": entity })),
            ),
            AppError::InvalidTransition { entity, current, requested } => (
                StatusCode::CONFLICT,
                tr(
                    locale,
                    "Este registro não pode mais ser alterado para o status solicitado.",
                    "This record can no longer move to the requested status.",
                ),
                Some(json!({
                    "entity": entity,
                    "currentStatus": current,
                    "requestedStatus": requested,
                })),
            ),
            AppError::AlreadyExists(what) => (
                StatusCode::CONFLICT,
                match *what {
                    "email" => tr(locale, "Este e-mail já está em uso.", "This e-mail is already in use."),
                    "cau" => tr(locale, "Este CAU já está cadastrado.", "This CAU is already registered."),
                    "cnpj" => tr(
                        locale,
                        "Este CPF/CNPJ já está vinculado a outro escritório.",
                        "This tax id is already linked to another office.",
                    ),
                    "sku" => tr(locale, "Este SKU já existe no catálogo.", "This SKU already exists in the catalog."),
                    "name" => tr(
                        locale,
                        "Já existe um produto com este nome.",
                        "A product with this name already exists.",
                    ),
                    _ => tr(locale, "Registro duplicado.", "Duplicate record."),
                },
                Some(json!({ "field": what })),
            ),

            // Todos os outros erros viram 500. O `tracing` loga o detalhe.
            e => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    tr(locale, "Ocorreu um erro inesperado.", "An unexpected error occurred."),
                    None,
                )
            }
        };

        ApiError { status, error, details }
    }

    /// Converte violação de unicidade do Postgres no erro de domínio certo.
    pub fn from_unique_violation(e: sqlx::Error) -> AppError {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return match db_err.constraint() {
                    Some("users_email_key") => AppError::AlreadyExists("email"),
                    Some("users_cau_key") => AppError::AlreadyExists("cau"),
                    Some("offices_cnpj_key") => AppError::AlreadyExists("cnpj"),
                    Some("catalog_items_sku_key") => AppError::AlreadyExists("sku"),
                    Some("catalog_items_name_key") => AppError::AlreadyExists("name"),
                    _ => AppError::AlreadyExists("record"),
                };
            }
        }
        e.into()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default()).into_response()
    }
}
