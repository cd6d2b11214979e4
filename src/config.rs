// src/config.rs

use std::{env, path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        CatalogRepository, CommissionRepository, DashboardRepository, DocumentRepository, IndicationRepository,
        OfficeRepository, QuoteRepository, UserRepository,
    },
    middleware::session::SessionContext,
    services::{
        auth::AuthService,
        notifier::{LogNotifier, Notifier},
        token::SessionTokenCodec,
        AccountService, CatalogService, CommissionService, DashboardService, DocumentService, IndicationService,
        QuoteService,
    },
};

/// Configuração lida do ambiente (.env em desenvolvimento).
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub production: bool,
    pub uploads_dir: PathBuf,
    pub db_max_connections: u32,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;
        if jwt_secret.trim().is_empty() {
            anyhow::bail!("JWT_SECRET não pode ser vazio");
        }

        let db_max_connections = match env::var("DB_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS inválido: {raw}"))?,
            Err(_) => 5,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            production: env::var("APP_ENV").is_ok_and(|v| v == "production"),
            uploads_dir: env::var("UPLOADS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads")),
            db_max_connections,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub session: SessionContext,
    pub auth_service: AuthService,
    pub account_service: AccountService,
    pub indication_service: IndicationService,
    pub quote_service: QuoteService,
    pub commission_service: CommissionService,
    pub document_service: DocumentService,
    pub dashboard_service: DashboardService,
    pub catalog_service: CatalogService,
}

impl AppState {
    // Conecta ao banco e monta o estado
    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(settings.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&settings.database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::with_pool(db_pool, settings, Arc::new(LogNotifier)))
    }

    /// Monta o gráfico de dependências sobre um pool já existente.
    pub fn with_pool(db_pool: PgPool, settings: &Settings, notifier: Arc<dyn Notifier>) -> Self {
        let codec = SessionTokenCodec::new(&settings.jwt_secret);
        let session = SessionContext::new(codec.clone(), settings.production);

        // --- Repositórios ---
        let user_repo = UserRepository::new(db_pool.clone());
        let office_repo = OfficeRepository::new();
        let indication_repo = IndicationRepository::new(db_pool.clone());
        let quote_repo = QuoteRepository::new(db_pool.clone());
        let commission_repo = CommissionRepository::new(db_pool.clone());
        let document_repo = DocumentRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());
        let catalog_repo = CatalogRepository::new(db_pool.clone());

        // --- Serviços ---
        let auth_service = AuthService::new(
            user_repo.clone(),
            office_repo.clone(),
            codec,
            notifier.clone(),
            db_pool.clone(),
        );
        let account_service = AccountService::new(user_repo, office_repo, notifier, db_pool.clone());
        let commission_service = CommissionService::new(commission_repo, db_pool.clone());
        let indication_service = IndicationService::new(
            indication_repo.clone(),
            quote_repo.clone(),
            commission_service.clone(),
            db_pool.clone(),
        );
        let catalog_service = CatalogService::new(
            catalog_repo,
            indication_repo.clone(),
            indication_service.clone(),
            db_pool.clone(),
        );
        let quote_service = QuoteService::new(quote_repo, indication_repo, db_pool.clone());
        let document_service = DocumentService::new(document_repo, settings.uploads_dir.clone());
        let dashboard_service = DashboardService::new(dashboard_repo);

        Self {
            db_pool,
            session,
            auth_service,
            account_service,
            indication_service,
            quote_service,
            commission_service,
            document_service,
            dashboard_service,
            catalog_service,
        }
    }
}
