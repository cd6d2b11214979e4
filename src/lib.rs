// src/lib.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use crate::config::AppState;
use crate::middleware::{
    auth::{active_guard, session_guard},
    gate::page_gate,
    session::SessionContext,
};

/// Rotas de página, todas atrás do Gate (decisão pelo snapshot do token).
pub fn page_routes<S>(session: SessionContext) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(handlers::pages::home))
        .route("/login", get(handlers::pages::login))
        .route("/register", get(handlers::pages::register))
        .route("/pending-approval", get(handlers::pages::pending_approval))
        .route("/admin/dashboard", get(handlers::pages::admin_dashboard))
        .route("/architect/dashboard", get(handlers::pages::architect_dashboard))
        .layer(axum_middleware::from_fn_with_state(session, page_gate))
}

// Monta o router completo
pub fn app(app_state: AppState) -> Router {
    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/logout", post(handlers::auth::logout));

    // Sessão válida basta (contas pendentes também)
    let session_routes = Router::new()
        .route("/api/auth/me", get(handlers::auth::me))
        .route(
            "/api/contracts",
            post(handlers::contracts::upload_contract).layer(handlers::contracts::contract_body_limit()),
        )
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), session_guard));

    let admin_routes = Router::new()
        .route(
            "/users",
            get(handlers::admin::list_users).post(handlers::admin::create_user),
        )
        .route("/users/{id}", put(handlers::admin::update_user))
        .route("/users/{id}/status", post(handlers::admin::update_user_status))
        .route("/indications", get(handlers::admin::list_indications))
        .route("/indications/{id}", get(handlers::admin::get_indication))
        .route("/indications/{id}/status", post(handlers::admin::update_indication_status))
        .route("/indications/{id}/quotes", post(handlers::admin::create_quote))
        .route("/commissions", get(handlers::admin::list_commissions))
        .route("/commissions/{id}/pay", post(handlers::admin::pay_commission))
        .route("/dashboard", get(handlers::admin::dashboard))
        .route(
            "/catalog",
            get(handlers::catalog::list_items).post(handlers::catalog::create_item),
        )
        .route("/catalog/{id}", get(handlers::catalog::get_item))
        .route("/catalog/{id}/pieces", post(handlers::catalog::add_piece))
        .route("/catalog/{id}/images", post(handlers::catalog::add_image))
        .route("/catalog/images/{id}", delete(handlers::catalog::delete_image))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), active_guard));

    let architect_routes = Router::new()
        .route(
            "/indications",
            get(handlers::architect::list_indications).post(handlers::architect::create_indication),
        )
        .route("/indications/{id}", get(handlers::architect::get_indication))
        .route("/quotes/{id}/decision", post(handlers::architect::decide_quote))
        .route("/team", get(handlers::architect::list_team))
        .route("/collaborators", post(handlers::architect::invite_collaborator))
        .route("/dashboard", get(handlers::architect::dashboard))
        .route("/catalog", get(handlers::catalog::list_summaries))
        .route("/indications/{id}/products", post(handlers::catalog::add_catalog_product))
        .route("/indications/{id}/custom-products", post(handlers::catalog::add_custom_product))
        .route("/projects/{id}", get(handlers::catalog::get_project))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), active_guard));

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(auth_routes)
        .merge(session_routes)
        .nest("/api/admin", admin_routes)
        .nest("/api/architect", architect_routes)
        .merge(page_routes(app_state.session.clone()))
        .with_state(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}
