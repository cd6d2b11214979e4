// src/models/account.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::auth::{AccountStatus, ArchitectRole, Role};
use crate::models::document::DocumentStatus;
use crate::models::office::AdminOfficePayload;

// Linha da listagem de usuários do admin (com o status do contrato)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserListEntry {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub cau: Option<String>,
    pub role: Role,
    pub status: AccountStatus,
    pub architect_role: Option<ArchitectRole>,
    pub office_id: Option<Uuid>,
    pub office_name: Option<String>,
    pub contract_status: Option<DocumentStatus>,
    pub created_at: DateTime<Utc>,
}

// Membro do escritório (tela "Equipe")
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub cau: Option<String>,
    pub status: AccountStatus,
    pub architect_role: Option<ArchitectRole>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserDataPayload {
    #[validate(length(min = 3, message = "O nome deve ter no mínimo 3 caracteres."))]
    pub name: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
    pub cau: Option<String>,
    pub role: Role,
}

// Criação direta pelo admin: a conta já nasce ACTIVE
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminCreateUserPayload {
    #[validate(nested)]
    pub user_data: AdminUserDataPayload,
    #[validate(nested)]
    pub office_data: Option<AdminOfficePayload>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdateUserPayload {
    #[validate(length(min = 3, message = "O nome é obrigatório."))]
    pub name: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserStatusPayload {
    #[schema(example = "ACTIVE")]
    pub new_status: AccountStatus,
}

// Convite de colaborador feito pelo gestor do escritório
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InviteCollaboratorPayload {
    #[validate(length(min = 3, message = "Nome é obrigatório."))]
    pub name: String,
    #[validate(email(message = "E-mail inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "Senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
    pub cau: Option<String>,
}

/// Dados prontos para inserir um usuário (senha já com hash).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub cau: Option<String>,
    pub status: AccountStatus,
    pub agreed_to_terms_at: Option<DateTime<Utc>>,
    pub ip_address: Option<String>,
}
