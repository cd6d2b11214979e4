// src/models/document.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "document_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    Contract,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "document_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    PendingValidation,
    Validated,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "usage_rights", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UsageRights {
    InternalUseOnly,
    PublicPortfolio,
}

impl std::str::FromStr for UsageRights {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INTERNAL_USE_ONLY" => Ok(UsageRights::InternalUseOnly),
            "PUBLIC_PORTFOLIO" => Ok(UsageRights::PublicPortfolio),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Uuid,
    pub user_id: Uuid,
    pub uploaded_by_id: Uuid,
    #[schema(example = "Contrato de Adesão")]
    pub name: String,
    pub doc_type: DocumentType,
    pub status: DocumentStatus,
    pub usage_rights: UsageRights,
    #[serde(skip_serializing)]
    pub storage_path: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Contrato recebido no upload, já validado pelo handler.
#[derive(Debug)]
pub struct ContractUpload {
    pub document_name: String,
    pub usage_rights: UsageRights,
    pub original_file_name: Option<String>,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_rights_parse_from_form_values() {
        assert_eq!("INTERNAL_USE_ONLY".parse::<UsageRights>(), Ok(UsageRights::InternalUseOnly));
        assert_eq!("PUBLIC_PORTFOLIO".parse::<UsageRights>(), Ok(UsageRights::PublicPortfolio));
        assert!("public".parse::<UsageRights>().is_err());
    }
}
