// src/services/dashboard_service.rs

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::{
        auth::User,
        dashboard::{AdminDashboard, ArchitectDashboard},
    },
};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository) -> Self {
        Self { repo }
    }

    pub async fn admin_summary(&self) -> Result<AdminDashboard, AppError> {
        self.repo.admin_summary().await
    }

    // Só o que é do próprio arquiteto
    pub async fn architect_summary(&self, architect: &User) -> Result<ArchitectDashboard, AppError> {
        self.repo.architect_summary(architect.id).await
    }
}
