// src/handlers/contracts.rs

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use utoipa::ToSchema;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::document::{ContractUpload, Document, UsageRights},
};

// Só para a documentação do formulário multipart
#[allow(dead_code)]
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ContractUploadForm {
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
    #[schema(example = "Contrato de Adesão Assinado")]
    document_name: String,
    usage_rights: UsageRights,
}

/// Contratos escaneados passam fácil dos 2 MB padrão do axum.
pub const MAX_CONTRACT_BYTES: usize = 25 * 1024 * 1024;

pub fn contract_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(MAX_CONTRACT_BYTES)
}

fn invalid_upload(_: axum::extract::multipart::MultipartError) -> AppError {
    AppError::InvalidField { field: "file", message: "Upload inválido." }
}

async fn read_contract_form(mut multipart: Multipart) -> Result<ContractUpload, AppError> {
    let mut file: Option<(Option<String>, Vec<u8>)> = None;
    let mut document_name: Option<String> = None;
    let mut usage_rights: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(invalid_upload)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await.map_err(invalid_upload)?;
                file = Some((file_name, bytes.to_vec()));
            }
            Some("documentName") => document_name = Some(field.text().await.map_err(invalid_upload)?),
            Some("usageRights") => usage_rights = Some(field.text().await.map_err(invalid_upload)?),
            _ => {}
        }
    }

    let (original_file_name, bytes) = file
        .filter(|(_, bytes)| !bytes.is_empty())
        .ok_or(AppError::InvalidField { field: "file", message: "Nenhum arquivo enviado." })?;

    let document_name = document_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or(AppError::InvalidField {
            field: "documentName",
            message: "Metadados (nome e direitos de uso) em falta.",
        })?;

    let usage_rights = usage_rights
        .and_then(|raw| raw.trim().parse::<UsageRights>().ok())
        .ok_or(AppError::InvalidField {
            field: "usageRights",
            message: "Metadados (nome e direitos de uso) em falta.",
        })?;

    Ok(ContractUpload { document_name, usage_rights, original_file_name, bytes })
}

// POST /api/contracts
#[utoipa::path(
    post,
    path = "/api/contracts",
    tag = "Contracts",
    request_body(content_type = "multipart/form-data", content = ContractUploadForm),
    responses(
        (status = 201, description = "Contrato enviado para análise", body = Document),
        (status = 400, description = "Arquivo ou metadados ausentes"),
        (status = 403, description = "Usuário sem escritório")
    ),
    security(("session_cookie" = []))
)]
pub async fn upload_contract(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let upload = read_contract_form(multipart)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    let document = app_state
        .document_service
        .upload_contract(&user, upload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(document)))
}
