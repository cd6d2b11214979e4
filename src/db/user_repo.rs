// src/db/user_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        account::{NewUser, TeamMember, UserListEntry},
        auth::{AccountStatus, Principal, User},
    },
};

const USER_COLUMNS: &str = r#"
    id, name, email, password_hash, cau, role, status, architect_role, office_id,
    ip_address, agreed_to_terms_at, created_at, updated_at
"#;

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca um usuário pelo seu e-mail
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    // Busca um usuário pelo seu ID (leitura sempre fresca, usada pelos guards)
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Trava a linha do usuário até o fim da transação.
    pub async fn find_for_update<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<User>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(user)
    }

    // Cria um novo usuário. E-mail e CAU duplicados viram AlreadyExists.
    pub async fn create_user<'e, E>(
        &self,
        executor: E,
        new_user: &NewUser,
        principal: Principal,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let (role, architect_role, office_id) = principal.columns();

        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (
                name, email, password_hash, cau, role, status,
                architect_role, office_id, agreed_to_terms_at, ip_address
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.cau)
        .bind(role)
        .bind(new_user.status)
        .bind(architect_role)
        .bind(office_id)
        .bind(new_user.agreed_to_terms_at)
        .bind(&new_user.ip_address)
        .fetch_one(executor)
        .await
        .map_err(AppError::from_unique_violation)
    }

    pub async fn update_profile<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: &str,
        email: &str,
    ) -> Result<Option<User>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users SET name = $2, email = $3, updated_at = now()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(name)
        .bind(email)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from_unique_violation)
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: AccountStatus,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users SET status = $2, updated_at = now()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status)
        .fetch_one(executor)
        .await?;

        Ok(user)
    }

    // Listagem do admin: junta o escritório e o status do contrato enviado
    pub async fn list_with_contract_status(&self) -> Result<Vec<UserListEntry>, AppError> {
        let users = sqlx::query_as::<_, UserListEntry>(
            r#"
            SELECT
                u.id, u.name, u.email, u.cau, u.role, u.status, u.architect_role,
                u.office_id, o.name AS office_name,
                d.status AS contract_status,
                u.created_at
            FROM users u
            LEFT JOIN offices o ON o.id = u.office_id
            LEFT JOIN documents d ON d.user_id = u.id AND d.doc_type = 'CONTRACT'
            ORDER BY u.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    pub async fn list_office_members(&self, office_id: Uuid) -> Result<Vec<TeamMember>, AppError> {
        let members = sqlx::query_as::<_, TeamMember>(
            r#"
            SELECT id, name, email, cau, status, architect_role, created_at
            FROM users
            WHERE office_id = $1
            ORDER BY architect_role, name
            "#,
        )
        .bind(office_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }
}
