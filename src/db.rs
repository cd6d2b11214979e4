pub mod user_repo;
pub use user_repo::UserRepository;
pub mod office_repo;
pub use office_repo::OfficeRepository;
pub mod indication_repo;
pub use indication_repo::IndicationRepository;
pub mod quote_repo;
pub use quote_repo::QuoteRepository;
pub mod commission_repo;
pub use commission_repo::CommissionRepository;
pub mod document_repo;
pub use document_repo::DocumentRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
