// src/models/office.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "contact_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContactType {
    EmailMain,
    EmailSecondary,
    PhoneMain,
    Whatsapp,
    Other,
}

// ---
// Office (O "Escritório")
// ---
// Agrupa o arquiteto gestor e seus colaboradores
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Office {
    pub id: Uuid,
    #[schema(example = "Souza Arquitetura")]
    pub name: String,
    #[schema(example = "12345678000199")]
    pub cnpj: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    pub contact_type: ContactType,
    pub value: String,
    pub office_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

// ---
// Payloads
// ---

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    #[serde(rename = "type")]
    pub contact_type: ContactType,
    #[validate(length(min = 1, message = "O contato não pode ser vazio."))]
    pub value: String,
}

// Escritório informado na adesão self-service (endereço obrigatório)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OfficePayload {
    #[validate(length(min = 3, message = "O nome do escritório deve ter no mínimo 3 caracteres."))]
    pub name: String,
    #[validate(length(min = 11, message = "O CPF/CNPJ deve ter no mínimo 11 caracteres."))]
    pub cnpj: String,
    #[validate(length(min = 3, message = "A rua deve ter no mínimo 3 caracteres."))]
    pub street: String,
    #[validate(length(min = 2, message = "A cidade deve ter no mínimo 2 caracteres."))]
    pub city: String,
    #[validate(length(min = 2, message = "O estado deve ter no mínimo 2 caracteres."))]
    pub state: String,
    #[validate(length(min = 8, message = "O CEP deve ter no mínimo 8 caracteres."))]
    pub zip_code: String,
}

// Escritório informado pelo admin ao criar um arquiteto gestor
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminOfficePayload {
    #[validate(length(min = 1, message = "O nome do escritório é obrigatório."))]
    pub name: String,
    #[validate(length(min = 11, message = "O CPF/CNPJ deve ter no mínimo 11 caracteres."))]
    pub cnpj: String,
    #[validate(email(message = "O e-mail do escritório é inválido."))]
    pub email: String,
    #[validate(length(min = 1, message = "O telefone do escritório é obrigatório."))]
    pub phone: String,
}

/// Dados normalizados para inserir um escritório, vindos de qualquer fluxo.
#[derive(Debug, Clone)]
pub struct NewOffice {
    pub name: String,
    pub cnpj: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub contacts: Vec<ContactPayload>,
}

impl From<AdminOfficePayload> for NewOffice {
    fn from(p: AdminOfficePayload) -> Self {
        Self {
            name: p.name,
            cnpj: p.cnpj,
            street: None,
            city: None,
            state: None,
            zip_code: None,
            contacts: vec![
                ContactPayload { contact_type: ContactType::EmailMain, value: p.email },
                ContactPayload { contact_type: ContactType::PhoneMain, value: p.phone },
            ],
        }
    }
}

impl NewOffice {
    pub fn from_registration(office: OfficePayload, contacts: Vec<ContactPayload>) -> Self {
        Self {
            name: office.name,
            cnpj: office.cnpj,
            street: Some(office.street),
            city: Some(office.city),
            state: Some(office.state),
            zip_code: Some(office.zip_code),
            contacts,
        }
    }

    /// E-mail principal do escritório, se houver.
    pub fn main_email(&self) -> Option<&str> {
        self.contacts
            .iter()
            .find(|c| c.contact_type == ContactType::EmailMain)
            .map(|c| c.value.as_str())
    }
}
