// src/docs.rs

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::middleware::session::AUTH_COOKIE;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::me,

        // --- Contracts ---
        handlers::contracts::upload_contract,

        // --- Admin ---
        handlers::admin::list_users,
        handlers::admin::create_user,
        handlers::admin::update_user,
        handlers::admin::update_user_status,
        handlers::admin::list_indications,
        handlers::admin::get_indication,
        handlers::admin::update_indication_status,
        handlers::admin::create_quote,
        handlers::admin::list_commissions,
        handlers::admin::pay_commission,
        handlers::admin::dashboard,

        // --- Architect ---
        handlers::architect::list_indications,
        handlers::architect::create_indication,
        handlers::architect::get_indication,
        handlers::architect::decide_quote,
        handlers::architect::list_team,
        handlers::architect::invite_collaborator,
        handlers::architect::dashboard,

        // --- Catalog ---
        handlers::catalog::list_items,
        handlers::catalog::create_item,
        handlers::catalog::get_item,
        handlers::catalog::add_piece,
        handlers::catalog::add_image,
        handlers::catalog::delete_image,
        handlers::catalog::list_summaries,
        handlers::catalog::add_catalog_product,
        handlers::catalog::add_custom_product,
        handlers::catalog::get_project,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::AccountStatus,
            models::auth::ArchitectRole,
            models::auth::User,
            models::auth::UserDataPayload,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::LoginResponse,
            models::auth::MessageResponse,

            // --- Escritórios e contas ---
            models::office::ContactType,
            models::office::ContactPayload,
            models::office::OfficePayload,
            models::office::AdminOfficePayload,
            models::account::UserListEntry,
            models::account::TeamMember,
            models::account::AdminUserDataPayload,
            models::account::AdminCreateUserPayload,
            models::account::AdminUpdateUserPayload,
            models::account::UpdateUserStatusPayload,
            models::account::InviteCollaboratorPayload,

            // --- Indicações ---
            models::indication::IndicationStatus,
            models::indication::Indication,
            models::indication::Client,
            models::indication::IndicationSummary,
            models::indication::IndicationDetail,
            models::indication::IndicationStatusChange,
            models::indication::ClientDataPayload,
            models::indication::AddressPayload,
            models::indication::CreateIndicationPayload,
            models::indication::UpdateIndicationStatusPayload,

            // --- Orçamentos ---
            models::quote::QuoteStatus,
            models::quote::QuoteDecision,
            models::quote::Quote,
            models::quote::QuoteDecisionOutcome,
            models::quote::CreateQuotePayload,
            models::quote::QuoteDecisionPayload,

            // --- Comissões ---
            models::commission::CommissionStatus,
            models::commission::Commission,
            models::commission::CommissionListEntry,

            // --- Documentos ---
            models::document::DocumentType,
            models::document::DocumentStatus,
            models::document::UsageRights,
            models::document::Document,
            handlers::contracts::ContractUploadForm,

            // --- Catálogo ---
            models::catalog::CatalogItem,
            models::catalog::CatalogSummary,
            models::catalog::CatalogPiece,
            models::catalog::CatalogImage,
            models::catalog::CatalogItemDetail,
            models::catalog::ProjectProduct,
            models::catalog::ProjectProductView,
            models::catalog::ProjectView,
            models::catalog::CreateCatalogItemPayload,
            models::catalog::CatalogPiecePayload,
            models::catalog::CatalogImagePayload,
            models::catalog::AddCatalogProductPayload,
            models::catalog::AddCustomProductPayload,

            // --- Dashboard ---
            models::dashboard::IndicationStatusCount,
            models::dashboard::UserStatusCount,
            models::dashboard::CommissionTotals,
            models::dashboard::AdminDashboard,
            models::dashboard::ArchitectDashboard,
        )
    ),
    tags(
        (name = "Auth", description = "Cadastro, login e sessão"),
        (name = "Contracts", description = "Envio do contrato assinado"),
        (name = "Admin", description = "Gestão de usuários, indicações, orçamentos e comissões"),
        (name = "Architect", description = "Indicações, orçamentos e equipe do escritório"),
        (name = "Catalog", description = "Catálogo de produtos e produtos dos projetos")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(AUTH_COOKIE))),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_api_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/login",
            "/api/contracts",
            "/api/admin/indications/{id}/status",
            "/api/architect/quotes/{id}/decision",
            "/api/admin/catalog",
            "/api/admin/catalog/images/{id}",
            "/api/architect/projects/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "faltando {path}");
        }
    }
}
