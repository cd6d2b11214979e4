// src/db/document_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::document::{Document, DocumentStatus, DocumentType, UsageRights},
};

#[derive(Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Um documento por (usuário, tipo). Reenvio substitui e volta a PENDING_VALIDATION.
    pub async fn upsert(
        &self,
        user_id: Uuid,
        uploaded_by_id: Uuid,
        doc_type: DocumentType,
        name: &str,
        usage_rights: UsageRights,
        storage_path: &str,
    ) -> Result<Document, AppError> {
        let document = sqlx::query_as::<_, Document>(
            r#"
            INSERT INTO documents (
                user_id, uploaded_by_id, name, doc_type, status, usage_rights, storage_path
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id, doc_type) DO UPDATE SET
                uploaded_by_id = EXCLUDED.uploaded_by_id,
                name = EXCLUDED.name,
                status = EXCLUDED.status,
                usage_rights = EXCLUDED.usage_rights,
                storage_path = EXCLUDED.storage_path,
                updated_at = now()
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(uploaded_by_id)
        .bind(name)
        .bind(doc_type)
        .bind(DocumentStatus::PendingValidation)
        .bind(usage_rights)
        .bind(storage_path)
        .fetch_one(&self.pool)
        .await?;

        Ok(document)
    }
}
