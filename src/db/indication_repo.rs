// src/db/indication_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        indication::{AddressPayload, Client, ClientDataPayload, Indication, IndicationStatus, IndicationSummary},
        office::ContactPayload,
    },
};

// Base das listagens: indicação + arquiteto + cliente (e-mail principal) + comissão
const SUMMARY_SELECT: &str = r#"
    SELECT
        i.id, i.status, i.project_value, i.requested_commission_percentage,
        i.architect_id, u.name AS architect_name,
        c.id AS client_id, c.name AS client_name,
        (
            SELECT ct.value FROM contacts ct
            WHERE ct.client_id = c.id AND ct.contact_type = 'EMAIL_MAIN'
            ORDER BY ct.created_at
            LIMIT 1
        ) AS client_email,
        cm.amount AS commission_amount,
        cm.status AS commission_status,
        i.created_at
    FROM indications i
    JOIN users u ON u.id = i.architect_id
    JOIN clients c ON c.id = i.client_id
    LEFT JOIN commissions cm ON cm.indication_id = i.id
"#;

#[derive(Clone)]
pub struct IndicationRepository {
    pool: PgPool,
}

impl IndicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CLIENTES
    // =========================================================================

    /// Cliente já cadastrado com este e-mail principal, se houver.
    pub async fn find_client_by_main_email<'e, E>(
        &self,
        executor: E,
        email: &str,
    ) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>(
            r#"
            SELECT c.*
            FROM clients c
            JOIN contacts ct ON ct.client_id = c.id
            WHERE ct.contact_type = 'EMAIL_MAIN' AND lower(ct.value) = lower($1)
            ORDER BY c.created_at
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(executor)
        .await?;

        Ok(client)
    }

    pub async fn create_client<'e, E>(
        &self,
        executor: E,
        client: &ClientDataPayload,
        address: &AddressPayload,
    ) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (name, document, street, city, state, zip_code)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&client.name)
        .bind(&client.document)
        .bind(&address.street)
        .bind(&address.city)
        .bind(&address.state)
        .bind(&address.zip_code)
        .fetch_one(executor)
        .await?;

        Ok(client)
    }

    pub async fn add_client_contact<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
        contact: &ContactPayload,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("INSERT INTO contacts (contact_type, value, client_id) VALUES ($1, $2, $3)")
            .bind(contact.contact_type)
            .bind(&contact.value)
            .bind(client_id)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn find_client(&self, id: Uuid) -> Result<Option<Client>, AppError> {
        let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(client)
    }

    // =========================================================================
    //  INDICAÇÕES
    // =========================================================================

    pub async fn create_indication<'e, E>(
        &self,
        executor: E,
        architect_id: Uuid,
        client_id: Uuid,
        project_value: Option<Decimal>,
        requested_commission_percentage: Option<Decimal>,
    ) -> Result<Indication, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let indication = sqlx::query_as::<_, Indication>(
            r#"
            INSERT INTO indications (
                architect_id, client_id, status, project_value, requested_commission_percentage
            )
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(architect_id)
        .bind(client_id)
        .bind(IndicationStatus::Pending)
        .bind(project_value)
        .bind(requested_commission_percentage)
        .fetch_one(executor)
        .await?;

        Ok(indication)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Indication>, AppError> {
        let indication = sqlx::query_as::<_, Indication>("SELECT * FROM indications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(indication)
    }

    /// Trava a indicação: serializa conclusões e decisões de orçamento concorrentes.
    pub async fn find_for_update<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Indication>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let indication =
            sqlx::query_as::<_, Indication>("SELECT * FROM indications WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(executor)
                .await?;

        Ok(indication)
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: IndicationStatus,
    ) -> Result<Indication, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let indication = sqlx::query_as::<_, Indication>(
            r#"
            UPDATE indications SET status = $2, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_one(executor)
        .await?;

        Ok(indication)
    }

    pub async fn list_for_architect(&self, architect_id: Uuid) -> Result<Vec<IndicationSummary>, AppError> {
        let rows = sqlx::query_as::<_, IndicationSummary>(&format!(
            "{SUMMARY_SELECT} WHERE i.architect_id = $1 ORDER BY i.created_at DESC"
        ))
        .bind(architect_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn list_all(&self) -> Result<Vec<IndicationSummary>, AppError> {
        let rows = sqlx::query_as::<_, IndicationSummary>(&format!(
            "{SUMMARY_SELECT} ORDER BY i.created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
