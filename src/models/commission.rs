// src/models/commission.rs

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::common::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "commission_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommissionStatus {
    Pending,
    Paid,
}

impl CommissionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CommissionStatus::Pending => "PENDING",
            CommissionStatus::Paid => "PAID",
        }
    }

    /// PENDING -> PAID é a única transição existente.
    pub fn pay(self) -> Result<CommissionStatus, AppError> {
        match self {
            CommissionStatus::Pending => Ok(CommissionStatus::Paid),
            CommissionStatus::Paid => Err(AppError::InvalidTransition {
                entity: "commission",
                current: self.as_str().to_string(),
                requested: CommissionStatus::Paid.as_str().to_string(),
            }),
        }
    }
}

/// valor = valor do projeto * (percentual / 100), arredondado em centavos.
///
/// Sem valor de projeto ou sem percentual não há comissão.
pub fn commission_amount(
    project_value: Option<Decimal>,
    percentage: Option<Decimal>,
) -> Option<Decimal> {
    let (value, pct) = (project_value?, percentage?);
    let amount = value * pct / Decimal::ONE_HUNDRED;
    Some(amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Commission {
    pub id: Uuid,
    pub indication_id: Uuid,
    #[schema(example = "1000.00")]
    pub amount: Decimal,
    pub status: CommissionStatus,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Linha da listagem do admin
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommissionListEntry {
    pub id: Uuid,
    pub indication_id: Uuid,
    pub amount: Decimal,
    pub status: CommissionStatus,
    pub paid_at: Option<DateTime<Utc>>,
    pub architect_id: Uuid,
    pub architect_name: String,
    pub client_name: String,
    pub created_at: DateTime<Utc>,
}
