pub mod token;
pub mod notifier;
pub mod auth;
pub mod account_service;
pub use account_service::AccountService;
pub mod commission_service;
pub use commission_service::CommissionService;
pub mod indication_service;
pub use indication_service::IndicationService;
pub mod quote_service;
pub use quote_service::QuoteService;
pub mod document_service;
pub use document_service::DocumentService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
pub mod catalog_service;
pub use catalog_service::CatalogService;
