// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::error::AppError;
use crate::models::office::{ContactPayload, OfficePayload};

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Architect,
}

impl Role {
    /// Painel "de casa" de cada papel. Usado pelo Gate nos redirecionamentos.
    pub fn dashboard_path(self) -> &'static str {
        match self {
            Role::Admin => "/admin/dashboard",
            Role::Architect => "/architect/dashboard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "account_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    PendingApproval,
    Active,
    Inactive,
}

impl AccountStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AccountStatus::PendingApproval => "PENDING_APPROVAL",
            AccountStatus::Active => "ACTIVE",
            AccountStatus::Inactive => "INACTIVE",
        }
    }

    /// Máquina de estados da conta (ações de admin).
    ///
    /// PENDING_APPROVAL só pode ser deixado, nunca reentrado. ACTIVE e INACTIVE
    /// se alternam. Repetir o estado atual também é conflito.
    pub fn transition_to(self, next: AccountStatus) -> Result<AccountStatus, AppError> {
        use AccountStatus::*;
        match (self, next) {
            (PendingApproval, Active)
            | (PendingApproval, Inactive)
            | (Active, Inactive)
            | (Inactive, Active) => Ok(next),
            _ => Err(AppError::InvalidTransition {
                entity: "user",
                current: self.as_str().to_string(),
                requested: next.as_str().to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "architect_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArchitectRole {
    Manager,
    Collaborator,
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    #[schema(example = "Ana Souza")]
    pub name: String,
    #[schema(example = "ana@escritorio.com.br")]
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub cau: Option<String>,
    pub role: Role,
    pub status: AccountStatus,
    pub architect_role: Option<ArchitectRole>,
    pub office_id: Option<Uuid>,

    #[serde(skip_serializing)]
    pub ip_address: Option<String>,
    pub agreed_to_terms_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Papel efetivo do usuário, sem combinações inválidas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal {
    Admin,
    ArchitectManager { office_id: Uuid },
    ArchitectCollaborator { office_id: Uuid },
}

impl Principal {
    pub fn role(&self) -> Role {
        match self {
            Principal::Admin => Role::Admin,
            _ => Role::Architect,
        }
    }

    pub fn office_id(&self) -> Option<Uuid> {
        match *self {
            Principal::Admin => None,
            Principal::ArchitectManager { office_id }
            | Principal::ArchitectCollaborator { office_id } => Some(office_id),
        }
    }

    /// Decompõe nas três colunas persistidas (role, architect_role, office_id).
    pub fn columns(&self) -> (Role, Option<ArchitectRole>, Option<Uuid>) {
        match *self {
            Principal::Admin => (Role::Admin, None, None),
            Principal::ArchitectManager { office_id } => {
                (Role::Architect, Some(ArchitectRole::Manager), Some(office_id))
            }
            Principal::ArchitectCollaborator { office_id } => (
                Role::Architect,
                Some(ArchitectRole::Collaborator),
                Some(office_id),
            ),
        }
    }
}

impl TryFrom<&User> for Principal {
    type Error = AppError;

    fn try_from(user: &User) -> Result<Self, Self::Error> {
        match (user.role, user.architect_role, user.office_id) {
            (Role::Admin, None, None) => Ok(Principal::Admin),
            (Role::Architect, Some(ArchitectRole::Manager), Some(office_id)) => {
                Ok(Principal::ArchitectManager { office_id })
            }
            (Role::Architect, Some(ArchitectRole::Collaborator), Some(office_id)) => {
                Ok(Principal::ArchitectCollaborator { office_id })
            }
            _ => Err(AppError::InternalServerError(anyhow::anyhow!(
                "usuário {} com combinação de papel inválida",
                user.id
            ))),
        }
    }
}

impl User {
    pub fn principal(&self) -> Result<Principal, AppError> {
        Principal::try_from(self)
    }
}

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDataPayload {
    #[validate(length(min = 3, message = "O nome deve ter no mínimo 3 caracteres."))]
    pub name: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
    #[validate(length(min = 3, message = "O CAU deve ter no mínimo 3 caracteres."))]
    pub cau: String,
}

// Adesão self-service: usuário gestor + escritório + contatos
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserPayload {
    #[validate(nested)]
    pub user_data: UserDataPayload,
    #[validate(nested)]
    pub office_data: OfficePayload,
    #[validate(length(min = 1, message = "Informe ao menos um contato."), nested)]
    pub contact_data: Vec<ContactPayload>,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 1, message = "A senha é obrigatória."))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub role: Role,
    pub status: AccountStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    pub user_id: Uuid,
    pub role: Role,
    pub status: AccountStatus,
    pub iat: i64,
    pub exp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(role: Role, architect_role: Option<ArchitectRole>, office_id: Option<Uuid>) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Teste".into(),
            email: "teste@exemplo.com".into(),
            password_hash: "x".into(),
            cau: None,
            role,
            status: AccountStatus::Active,
            architect_role,
            office_id,
            ip_address: None,
            agreed_to_terms_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn pending_approval_can_be_approved_or_rejected() {
        assert_eq!(
            AccountStatus::PendingApproval.transition_to(AccountStatus::Active).unwrap(),
            AccountStatus::Active
        );
        assert_eq!(
            AccountStatus::PendingApproval.transition_to(AccountStatus::Inactive).unwrap(),
            AccountStatus::Inactive
        );
    }

    #[test]
    fn active_and_inactive_toggle() {
        assert!(AccountStatus::Active.transition_to(AccountStatus::Inactive).is_ok());
        assert!(AccountStatus::Inactive.transition_to(AccountStatus::Active).is_ok());
    }

    #[test]
    fn pending_approval_is_never_reentered() {
        for from in [AccountStatus::Active, AccountStatus::Inactive] {
            let err = from.transition_to(AccountStatus::PendingApproval).unwrap_err();
            assert!(matches!(err, AppError::InvalidTransition { entity: "user", .. }));
        }
    }

    #[test]
    fn same_state_is_a_conflict() {
        assert!(AccountStatus::Active.transition_to(AccountStatus::Active).is_err());
    }

    #[test]
    fn principal_from_valid_rows() {
        let office = Uuid::new_v4();
        assert_eq!(user(Role::Admin, None, None).principal().unwrap(), Principal::Admin);
        assert_eq!(
            user(Role::Architect, Some(ArchitectRole::Manager), Some(office))
                .principal()
                .unwrap(),
            Principal::ArchitectManager { office_id: office }
        );
        assert_eq!(
            user(Role::Architect, Some(ArchitectRole::Collaborator), Some(office))
                .principal()
                .unwrap(),
            Principal::ArchitectCollaborator { office_id: office }
        );
    }

    #[test]
    fn principal_rejects_invalid_combinations() {
        let office = Uuid::new_v4();
        assert!(user(Role::Admin, Some(ArchitectRole::Manager), None).principal().is_err());
        assert!(user(Role::Admin, None, Some(office)).principal().is_err());
        assert!(user(Role::Architect, None, Some(office)).principal().is_err());
        assert!(user(Role::Architect, Some(ArchitectRole::Manager), None).principal().is_err());
    }

    #[test]
    fn principal_columns_round_trip() {
        let office = Uuid::new_v4();
        let p = Principal::ArchitectCollaborator { office_id: office };
        assert_eq!(
            p.columns(),
            (Role::Architect, Some(ArchitectRole::Collaborator), Some(office))
        );
        assert_eq!(p.office_id(), Some(office));
        assert_eq!(Principal::Admin.role(), Role::Admin);
    }

    #[test]
    fn claims_serialize_with_camel_case_user_id() {
        let claims = SessionClaims {
            user_id: Uuid::nil(),
            role: Role::Architect,
            status: AccountStatus::PendingApproval,
            iat: 1,
            exp: 2,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["role"], "ARCHITECT");
        assert_eq!(json["status"], "PENDING_APPROVAL");
        assert!(json.get("userId").is_some());
    }
}
