// src/services/account_service.rs

use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{error::AppError, password::hash_password},
    db::{OfficeRepository, UserRepository},
    models::{
        account::{
            AdminCreateUserPayload, AdminUpdateUserPayload, InviteCollaboratorPayload, NewUser,
            TeamMember, UserListEntry,
        },
        auth::{AccountStatus, Principal, Role, User},
        office::NewOffice,
    },
    services::notifier::{notify_logged, Notifier},
};

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Clone)]
pub struct AccountService {
    user_repo: UserRepository,
    office_repo: OfficeRepository,
    notifier: Arc<dyn Notifier>,
    pool: PgPool,
}

impl AccountService {
    pub fn new(
        user_repo: UserRepository,
        office_repo: OfficeRepository,
        notifier: Arc<dyn Notifier>,
        pool: PgPool,
    ) -> Self {
        Self { user_repo, office_repo, notifier, pool }
    }

    // =========================================================================
    //  ADMIN
    // =========================================================================

    /// Criação direta pelo admin. A conta já nasce ACTIVE.
    /// Arquiteto criado aqui é sempre gestor de um escritório novo.
    pub async fn admin_create_user(&self, payload: AdminCreateUserPayload) -> Result<User, AppError> {
        let data = payload.user_data;

        let office_data: Option<NewOffice> = match (data.role, payload.office_data) {
            (Role::Architect, None) => {
                return Err(AppError::InvalidField {
                    field: "officeData",
                    message: "Dados do escritório são obrigatórios ao criar um Arquiteto Gestor.",
                });
            }
            (Role::Architect, Some(office)) => Some(office.into()),
            (Role::Admin, _) => None,
        };

        let password_hash = hash_password(&data.password).await?;
        let new_user = NewUser {
            name: data.name,
            email: data.email,
            password_hash,
            cau: non_blank(data.cau),
            status: AccountStatus::Active,
            agreed_to_terms_at: None,
            ip_address: None,
        };

        let mut tx = self.pool.begin().await?;

        let principal = match office_data {
            Some(office_data) => {
                let office = self.office_repo.create_office(&mut *tx, &office_data).await?;
                for contact in &office_data.contacts {
                    self.office_repo.add_contact(&mut *tx, office.id, contact).await?;
                }
                Principal::ArchitectManager { office_id: office.id }
            }
            None => Principal::Admin,
        };

        let user = self.user_repo.create_user(&mut *tx, &new_user, principal).await?;

        tx.commit().await?;

        tracing::info!("✅ Usuário {} ({:?}) criado pelo admin", user.id, user.role);
        Ok(user)
    }

    /// Só nome e e-mail. Papel e escritório não mudam por aqui.
    pub async fn admin_update_user(&self, user_id: Uuid, payload: AdminUpdateUserPayload) -> Result<User, AppError> {
        self.user_repo
            .update_profile(&self.pool, user_id, &payload.name, &payload.email)
            .await?
            .ok_or(AppError::NotFound("user"))
    }

    /// Aplica a máquina de estados da conta com a linha travada.
    pub async fn update_status(&self, user_id: Uuid, requested: AccountStatus) -> Result<User, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = self
            .user_repo
            .find_for_update(&mut *tx, user_id)
            .await?
            .ok_or(AppError::NotFound("user"))?;

        let next = current.status.transition_to(requested)?;
        let user = self.user_repo.update_status(&mut *tx, user_id, next).await?;

        tx.commit().await?;

        tracing::info!(
            "🔄 Conta {}: {} -> {}",
            user.id,
            current.status.as_str(),
            user.status.as_str()
        );

        notify_logged(
            "status da conta",
            self.notifier.account_status_changed(&user, current.status),
        )
        .await;

        Ok(user)
    }

    pub async fn list_users(&self) -> Result<Vec<UserListEntry>, AppError> {
        self.user_repo.list_with_contract_status().await
    }

    // =========================================================================
    //  ESCRITÓRIO
    // =========================================================================

    /// Só o gestor convida. O colaborador entra ACTIVE no mesmo escritório.
    pub async fn invite_collaborator(
        &self,
        requester: &User,
        payload: InviteCollaboratorPayload,
    ) -> Result<User, AppError> {
        let office_id = match requester.principal()? {
            Principal::ArchitectManager { office_id } => office_id,
            _ => {
                tracing::warn!("Convite negado: {} não é gestor de escritório", requester.id);
                return Err(AppError::Forbidden);
            }
        };

        let password_hash = hash_password(&payload.password).await?;
        let new_user = NewUser {
            name: payload.name,
            email: payload.email,
            password_hash,
            cau: non_blank(payload.cau),
            status: AccountStatus::Active,
            agreed_to_terms_at: None,
            ip_address: None,
        };

        let user = self
            .user_repo
            .create_user(&self.pool, &new_user, Principal::ArchitectCollaborator { office_id })
            .await?;

        tracing::info!("✅ Colaborador {} adicionado ao escritório {}", user.id, office_id);
        Ok(user)
    }

    pub async fn list_team(&self, requester: &User) -> Result<Vec<TeamMember>, AppError> {
        let office_id = requester.principal()?.office_id().ok_or(AppError::Forbidden)?;
        self.user_repo.list_office_members(office_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_cau_is_stored_as_null() {
        assert_eq!(non_blank(Some("  ".into())), None);
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some("A123".into())), Some("A123".into()));
    }
}
