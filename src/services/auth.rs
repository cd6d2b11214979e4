// src/services/auth.rs

use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;

use crate::{
    common::{
        error::AppError,
        password::{burn_verification, hash_password, verify_password},
    },
    db::{OfficeRepository, UserRepository},
    models::{
        account::NewUser,
        auth::{AccountStatus, LoginResponse, Principal, RegisterUserPayload, SessionClaims, User},
        office::NewOffice,
    },
    services::{
        notifier::{notify_logged, Notifier},
        token::SessionTokenCodec,
    },
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    office_repo: OfficeRepository,
    codec: SessionTokenCodec,
    notifier: Arc<dyn Notifier>,
    pool: PgPool,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        office_repo: OfficeRepository,
        codec: SessionTokenCodec,
        notifier: Arc<dyn Notifier>,
        pool: PgPool,
    ) -> Self {
        Self { user_repo, office_repo, codec, notifier, pool }
    }

    /// Adesão self-service: escritório + contatos + gestor, tudo ou nada.
    /// A conta nasce PENDING_APPROVAL e espera o contrato assinado.
    pub async fn register(
        &self,
        payload: RegisterUserPayload,
        ip_address: Option<String>,
    ) -> Result<User, AppError> {
        // 1. Hashing (fora da transação, não toca no banco)
        let password_hash = hash_password(&payload.user_data.password).await?;

        let office_data = NewOffice::from_registration(payload.office_data, payload.contact_data);
        let new_user = NewUser {
            name: payload.user_data.name,
            email: payload.user_data.email,
            password_hash,
            cau: Some(payload.user_data.cau),
            status: AccountStatus::PendingApproval,
            agreed_to_terms_at: Some(Utc::now()),
            ip_address,
        };

        // --- INÍCIO DA TRANSAÇÃO ---
        let mut tx = self.pool.begin().await?;

        let office = self.office_repo.create_office(&mut *tx, &office_data).await?;
        for contact in &office_data.contacts {
            self.office_repo.add_contact(&mut *tx, office.id, contact).await?;
        }

        let user = self
            .user_repo
            .create_user(
                &mut *tx,
                &new_user,
                Principal::ArchitectManager { office_id: office.id },
            )
            .await?;

        tx.commit().await?;
        // --- FIM DA TRANSAÇÃO ---

        tracing::info!("✅ Novo escritório {} cadastrado pelo gestor {}", office.id, user.id);

        notify_logged("cadastro", self.notifier.user_registered(&user, &office)).await;

        Ok(user)
    }

    /// Devolve o token da sessão e o par (role, status) para o frontend.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, LoginResponse), AppError> {
        let Some(user) = self.user_repo.find_by_email(email).await? else {
            burn_verification(password).await?;
            return Err(AppError::InvalidCredentials);
        };

        if !verify_password(password, &user.password_hash).await? {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.codec.issue(user.id, user.role, user.status)?;

        Ok((token, LoginResponse { role: user.role, status: user.status }))
    }

    /// Relê o usuário do token no banco. Conta apagada ou INACTIVE perde a sessão.
    pub async fn resolve_session(&self, claims: &SessionClaims) -> Result<User, AppError> {
        let user = self
            .user_repo
            .find_by_id(claims.user_id)
            .await?
            .ok_or(AppError::InvalidToken)?;

        if user.status == AccountStatus::Inactive {
            tracing::warn!("Sessão de conta inativa recusada: {}", user.id);
            return Err(AppError::InvalidToken);
        }

        Ok(user)
    }
}
