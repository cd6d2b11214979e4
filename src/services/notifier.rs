// src/services/notifier.rs

use async_trait::async_trait;

use crate::{
    common::error::AppError,
    models::{
        auth::{AccountStatus, User},
        office::Office,
    },
};

/// Canal de avisos externos (e-mail de boas-vindas, aviso de aprovação...).
///
/// Chamado sempre depois do commit. Falhas são logadas pelo chamador e nunca
/// desfazem a operação.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn user_registered(&self, user: &User, office: &Office) -> Result<(), AppError>;

    async fn account_status_changed(&self, user: &User, previous: AccountStatus) -> Result<(), AppError>;
}

// Implementação padrão: só registra no log.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn user_registered(&self, user: &User, office: &Office) -> Result<(), AppError> {
        tracing::info!(
            "📨 Novo cadastro aguardando contrato: {} <{}> do escritório {}",
            user.name,
            user.email,
            office.name
        );
        Ok(())
    }

    async fn account_status_changed(&self, user: &User, previous: AccountStatus) -> Result<(), AppError> {
        tracing::info!(
            "📨 Conta de {} <{}>: {} -> {}",
            user.name,
            user.email,
            previous.as_str(),
            user.status.as_str()
        );
        Ok(())
    }
}

/// Dispara o aviso sem propagar erro.
pub async fn notify_logged<F>(what: &str, fut: F)
where
    F: std::future::Future<Output = Result<(), AppError>>,
{
    if let Err(e) = fut.await {
        tracing::error!("Falha ao enviar notificação ({}): {:?}", what, e);
    }
}
