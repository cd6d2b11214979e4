// src/models/quote.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::{error::AppError, money::validate_positive_amount};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "quote_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteStatus {
    Pending,
    Approved,
    Rejected,
    Revised,
}

impl QuoteStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            QuoteStatus::Pending => "PENDING",
            QuoteStatus::Approved => "APPROVED",
            QuoteStatus::Rejected => "REJECTED",
            QuoteStatus::Revised => "REVISED",
        }
    }

    /// Só orçamentos PENDING aceitam decisão do arquiteto.
    pub fn decide(self, decision: QuoteDecision) -> Result<QuoteStatus, AppError> {
        let next = decision.status();
        if self != QuoteStatus::Pending {
            return Err(AppError::InvalidTransition {
                entity: "quote",
                current: self.as_str().to_string(),
                requested: next.as_str().to_string(),
            });
        }
        Ok(next)
    }
}

/// Decisão do arquiteto dono: apenas aprovar ou rejeitar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteDecision {
    Approved,
    Rejected,
}

impl QuoteDecision {
    pub fn status(self) -> QuoteStatus {
        match self {
            QuoteDecision::Approved => QuoteStatus::Approved,
            QuoteDecision::Rejected => QuoteStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: Uuid,
    pub indication_id: Uuid,
    pub status: QuoteStatus,
    #[schema(example = "25000.00")]
    pub amount: Decimal,
    pub notes: Option<String>,
    #[schema(example = "45 dias")]
    pub delivery_timeframe: Option<String>,
    #[schema(example = "50% entrada + 50% na entrega")]
    pub payment_conditions: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Resultado da decisão: o orçamento alterado e os irmãos rejeitados em cascata.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDecisionOutcome {
    pub quote: Quote,
    pub auto_rejected: Vec<Uuid>,
}

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuotePayload {
    #[validate(custom(function = "validate_positive_amount"))]
    #[schema(example = "25000.00")]
    pub amount: Decimal,
    pub notes: Option<String>,
    pub delivery_timeframe: Option<String>,
    pub payment_conditions: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDecisionPayload {
    #[schema(example = "APPROVED")]
    pub new_status: QuoteDecision,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_quote_accepts_both_decisions() {
        assert_eq!(
            QuoteStatus::Pending.decide(QuoteDecision::Approved).unwrap(),
            QuoteStatus::Approved
        );
        assert_eq!(
            QuoteStatus::Pending.decide(QuoteDecision::Rejected).unwrap(),
            QuoteStatus::Rejected
        );
    }

    #[test]
    fn decided_quote_is_a_conflict_reporting_current_state() {
        for from in [QuoteStatus::Approved, QuoteStatus::Rejected, QuoteStatus::Revised] {
            match from.decide(QuoteDecision::Rejected).unwrap_err() {
                AppError::InvalidTransition { entity, current, requested } => {
                    assert_eq!(entity, "quote");
                    assert_eq!(current, from.as_str());
                    assert_eq!(requested, "REJECTED");
                }
                other => panic!("erro inesperado: {other:?}"),
            }
        }
    }

    #[test]
    fn decision_payload_refuses_other_statuses() {
        assert!(serde_json::from_str::<QuoteDecisionPayload>(r#"{"newStatus":"REVISED"}"#).is_err());
        assert!(serde_json::from_str::<QuoteDecisionPayload>(r#"{"newStatus":"PENDING"}"#).is_err());
        let p: QuoteDecisionPayload = serde_json::from_str(r#"{"newStatus":"APPROVED"}"#).unwrap();
        assert_eq!(p.new_status, QuoteDecision::Approved);
    }

    #[test]
    fn quote_amount_must_be_positive() {
        let p: CreateQuotePayload = serde_json::from_str(r#"{"amount": 0}"#).unwrap();
        assert!(p.validate().is_err());
        let p: CreateQuotePayload = serde_json::from_str(r#"{"amount": "1500.50"}"#).unwrap();
        assert!(p.validate().is_ok());
    }

    #[test]
    fn quote_amount_must_fit_the_column() {
        let p = CreateQuotePayload {
            amount: Decimal::new(1_000_000_000_000, 0),
            notes: None,
            delivery_timeframe: None,
            payment_conditions: None,
        };
        let errors = p.validate().unwrap_err();
        assert_eq!(errors.field_errors()["amount"][0].code, "max_amount");
    }
}
