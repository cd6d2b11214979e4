// src/services/document_service.rs

use std::path::{Path, PathBuf};

use crate::{
    common::error::AppError,
    db::DocumentRepository,
    models::{
        auth::User,
        document::{ContractUpload, Document, DocumentType},
    },
};

const DEFAULT_EXTENSION: &str = "pdf";

/// `signed_contract.<ext>`, com a extensão do arquivo enviado quando ela é segura.
pub fn contract_file_name(original_file_name: Option<&str>) -> String {
    let extension = original_file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

    format!("signed_contract.{extension}")
}

#[derive(Clone)]
pub struct DocumentService {
    repo: DocumentRepository,
    uploads_dir: PathBuf,
}

impl DocumentService {
    pub fn new(repo: DocumentRepository, uploads_dir: PathBuf) -> Self {
        Self { repo, uploads_dir }
    }

    /// Grava o contrato em `contracts/{officeId}/` e faz upsert do documento do usuário.
    /// Um reenvio substitui o anterior e volta para PENDING_VALIDATION.
    pub async fn upload_contract(&self, user: &User, upload: ContractUpload) -> Result<Document, AppError> {
        let office_id = user.principal()?.office_id().ok_or(AppError::Forbidden)?;

        let dir = self.uploads_dir.join("contracts").join(office_id.to_string());
        let target = dir.join(contract_file_name(upload.original_file_name.as_deref()));

        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(&target, &upload.bytes).await?;

        let document = self
            .repo
            .upsert(
                user.id,
                user.id,
                DocumentType::Contract,
                &upload.document_name,
                upload.usage_rights,
                &target.to_string_lossy(),
            )
            .await?;

        tracing::info!(
            "📎 Contrato de {} salvo em {} ({} bytes)",
            user.id,
            target.display(),
            upload.bytes.len()
        );

        Ok(document)
    }
}
