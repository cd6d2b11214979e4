// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::auth::AccountStatus;
use crate::models::indication::IndicationStatus;

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndicationStatusCount {
    pub status: IndicationStatus,
    pub total: i64,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserStatusCount {
    pub status: AccountStatus,
    pub total: i64,
}

// Totais de comissão (os cards do topo)
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommissionTotals {
    pub pending_total: Decimal,
    pub paid_total: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub users_by_status: Vec<UserStatusCount>,
    pub indications_by_status: Vec<IndicationStatusCount>,
    pub commissions: CommissionTotals,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectDashboard {
    pub indications_by_status: Vec<IndicationStatusCount>,
    pub commissions: CommissionTotals,
}
