// src/models/indication.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::common::error::AppError;
use crate::common::money::{validate_amount, validate_percentage};
use crate::models::commission::{Commission, CommissionStatus};
use crate::models::office::{ContactPayload, ContactType};
use crate::models::quote::Quote;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "indication_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndicationStatus {
    Pending,
    InProgress,
    Concluded,
    Canceled,
}

impl IndicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            IndicationStatus::Pending => "PENDING",
            IndicationStatus::InProgress => "IN_PROGRESS",
            IndicationStatus::Concluded => "CONCLUDED",
            IndicationStatus::Canceled => "CANCELED",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, IndicationStatus::Concluded | IndicationStatus::Canceled)
    }

    /// Transições permitidas ao admin. CONCLUDED e CANCELED são finais.
    pub fn transition_to(self, next: IndicationStatus) -> Result<IndicationStatus, AppError> {
        use IndicationStatus::*;
        match (self, next) {
            (Pending, InProgress)
            | (Pending, Concluded)
            | (Pending, Canceled)
            | (InProgress, Concluded)
            | (InProgress, Canceled) => Ok(next),
            _ => Err(AppError::InvalidTransition {
                entity: "indication",
                current: self.as_str().to_string(),
                requested: next.as_str().to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Indication {
    pub id: Uuid,
    pub architect_id: Uuid,
    pub client_id: Uuid,
    pub status: IndicationStatus,
    #[schema(example = "10000.00")]
    pub project_value: Option<Decimal>,
    #[schema(example = "10.00")]
    pub requested_commission_percentage: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub document: Option<String>,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Linha das listagens (relatórios): indicação + cliente + comissão
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndicationSummary {
    pub id: Uuid,
    pub status: IndicationStatus,
    pub project_value: Option<Decimal>,
    pub requested_commission_percentage: Option<Decimal>,
    pub architect_id: Uuid,
    pub architect_name: String,
    pub client_id: Uuid,
    pub client_name: String,
    pub client_email: Option<String>,
    pub commission_amount: Option<Decimal>,
    pub commission_status: Option<CommissionStatus>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndicationDetail {
    #[serde(flatten)]
    pub indication: Indication,
    pub client: Client,
    pub quotes: Vec<Quote>,
}

/// Resultado da mudança de status: a comissão só vem na conclusão que a criou.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndicationStatusChange {
    pub indication: Indication,
    pub commission: Option<Commission>,
}

// ---
// Payloads
// ---

fn validate_has_main_email(contacts: &[ContactPayload]) -> Result<(), ValidationError> {
    if !contacts.iter().any(|c| c.contact_type == ContactType::EmailMain) {
        return Err(ValidationError::new("email_main")
            .with_message("Um E-mail Principal é obrigatório.".into()));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientDataPayload {
    #[validate(length(min = 3, message = "O nome do cliente deve ter no mínimo 3 caracteres."))]
    pub name: String,
    pub document: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressPayload {
    #[validate(length(min = 3, message = "A rua deve ter no mínimo 3 caracteres."))]
    pub street: String,
    #[validate(length(min = 2, message = "A cidade deve ter no mínimo 2 caracteres."))]
    pub city: String,
    #[validate(length(min = 2, message = "O estado deve ter no mínimo 2 caracteres."))]
    pub state: String,
    #[validate(length(min = 8, message = "O CEP deve ter no mínimo 8 caracteres."))]
    pub zip_code: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateIndicationPayload {
    #[validate(nested)]
    pub client_data: ClientDataPayload,
    #[validate(nested)]
    pub address_data: AddressPayload,
    #[validate(
        length(min = 1, message = "Informe ao menos um contato."),
        custom(function = "validate_has_main_email"),
        nested
    )]
    pub contact_data: Vec<ContactPayload>,
    #[validate(custom(function = "validate_amount"))]
    #[schema(example = "10000.00")]
    pub project_value: Option<Decimal>,
    #[validate(custom(function = "validate_percentage"))]
    #[schema(example = "10")]
    pub requested_commission_percentage: Option<Decimal>,
}

impl CreateIndicationPayload {
    pub fn main_email(&self) -> Option<&str> {
        self.contact_data
            .iter()
            .find(|c| c.contact_type == ContactType::EmailMain)
            .map(|c| c.value.as_str())
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIndicationStatusPayload {
    #[schema(example = "CONCLUDED")]
    pub new_status: IndicationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use IndicationStatus::*;

    #[test]
    fn open_indications_can_be_closed() {
        for from in [Pending, InProgress] {
            assert_eq!(from.transition_to(Concluded).unwrap(), Concluded);
            assert_eq!(from.transition_to(Canceled).unwrap(), Canceled);
        }
        assert_eq!(Pending.transition_to(InProgress).unwrap(), InProgress);
    }

    #[test]
    fn terminal_states_reject_everything() {
        for from in [Concluded, Canceled] {
            assert!(from.is_terminal());
            for to in [Pending, InProgress, Concluded, Canceled] {
                let err = from.transition_to(to).unwrap_err();
                match err {
                    AppError::InvalidTransition { current, .. } => {
                        assert_eq!(current, from.as_str())
                    }
                    other => panic!("erro inesperado: {other:?}"),
                }
            }
        }
    }

    #[test]
    fn nothing_goes_back_to_pending() {
        assert!(InProgress.transition_to(Pending).is_err());
        assert!(Pending.transition_to(Pending).is_err());
    }

    fn payload(contacts: &str, pct: &str) -> CreateIndicationPayload {
        serde_json::from_str(&format!(
            r#"{{
                "clientData": {{ "name": "Cliente Teste" }},
                "addressData": {{ "street": "Rua A", "city": "SP", "state": "SP", "zipCode": "01001000" }},
                "contactData": {contacts},
                "projectValue": 10000,
                "requestedCommissionPercentage": {pct}
            }}"#
        ))
        .unwrap()
    }

    #[test]
    fn payload_requires_main_email() {
        let p = payload(r#"[{"type":"PHONE_MAIN","value":"1199"}]"#, "10");
        let errors = p.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("contact_data"));

        let ok = payload(r#"[{"type":"EMAIL_MAIN","value":"c@c.com"}]"#, "10");
        assert!(ok.validate().is_ok());
        assert_eq!(ok.main_email(), Some("c@c.com"));
    }

    #[test]
    fn payload_rejects_percentage_over_one_hundred() {
        let p = payload(r#"[{"type":"EMAIL_MAIN","value":"c@c.com"}]"#, "150");
        let errors = p.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("requested_commission_percentage"));
    }

    #[test]
    fn oversized_project_value_is_a_validation_error() {
        let mut p = payload(r#"[{"type":"EMAIL_MAIN","value":"c@c.com"}]"#, "10");
        p.project_value = Some(Decimal::new(10_000_000_000_000, 0));
        let errors = p.validate().unwrap_err();
        assert_eq!(errors.field_errors()["project_value"][0].code, "max_amount");
    }

    #[test]
    fn percentage_with_three_decimals_is_rejected() {
        let mut p = payload(r#"[{"type":"EMAIL_MAIN","value":"c@c.com"}]"#, "10");
        p.requested_commission_percentage = Some(Decimal::new(12_345, 3));
        assert!(p.validate().is_err());
    }
}
