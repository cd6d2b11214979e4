// src/db/office_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::office::{Contact, ContactPayload, NewOffice, Office},
};

// Só escreve dentro de transações abertas pelos serviços; não guarda pool.
#[derive(Clone, Default)]
pub struct OfficeRepository;

impl OfficeRepository {
    pub fn new() -> Self {
        Self
    }

    // CNPJ duplicado vira AlreadyExists("cnpj")
    pub async fn create_office<'e, E>(&self, executor: E, office: &NewOffice) -> Result<Office, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Office>(
            r#"
            INSERT INTO offices (name, cnpj, street, city, state, zip_code)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&office.name)
        .bind(&office.cnpj)
        .bind(&office.street)
        .bind(&office.city)
        .bind(&office.state)
        .bind(&office.zip_code)
        .fetch_one(executor)
        .await
        .map_err(AppError::from_unique_violation)
    }

    pub async fn add_contact<'e, E>(
        &self,
        executor: E,
        office_id: Uuid,
        contact: &ContactPayload,
    ) -> Result<Contact, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            INSERT INTO contacts (contact_type, value, office_id)
            VALUES ($1, $2, $3)
            RETURNING id, contact_type, value, office_id, client_id, created_at
            "#,
        )
        .bind(contact.contact_type)
        .bind(&contact.value)
        .bind(office_id)
        .fetch_one(executor)
        .await?;

        Ok(contact)
    }
}
