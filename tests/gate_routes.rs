// Gate de páginas exercitado pelo router real (sem banco: só o token importa)

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use tower::ServiceExt;
use uuid::Uuid;

use partner_backend::{
    middleware::session::SessionContext,
    models::auth::{AccountStatus, Role},
    page_routes,
    services::token::SessionTokenCodec,
};

fn session() -> SessionContext {
    SessionContext::new(SessionTokenCodec::new("segredo-do-gate"), false)
}

fn router(session: &SessionContext) -> Router {
    page_routes(session.clone())
}

fn token(session: &SessionContext, role: Role, status: AccountStatus) -> String {
    session.codec.issue(Uuid::new_v4(), role, status).unwrap()
}

async fn get(session: &SessionContext, path: &str, token: Option<&str>) -> axum::response::Response {
    let mut request = Request::builder().uri(path);
    if let Some(token) = token {
        request = request.header(header::COOKIE, format!("auth_token={token}"));
    }
    router(session)
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

fn location(response: &axum::response::Response) -> &str {
    response.headers().get(header::LOCATION).unwrap().to_str().unwrap()
}

fn clears_cookie(response: &axum::response::Response) -> bool {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with("auth_token=;") && v.contains("Max-Age=0"))
}

#[tokio::test]
async fn active_users_are_sent_from_login_to_their_dashboard() {
    let session = session();

    let admin = token(&session, Role::Admin, AccountStatus::Active);
    let response = get(&session, "/login", Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/admin/dashboard");

    let architect = token(&session, Role::Architect, AccountStatus::Active);
    let response = get(&session, "/register", Some(&architect)).await;
    assert_eq!(location(&response), "/architect/dashboard");
}

#[tokio::test]
async fn protected_page_without_token_goes_home_and_clears_cookie() {
    let session = session();

    let response = get(&session, "/admin/dashboard", None).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/");
    assert!(clears_cookie(&response));
}

#[tokio::test]
async fn forged_token_counts_as_no_token() {
    let session = session();
    let forged = SessionTokenCodec::new("outro-segredo")
        .issue(Uuid::new_v4(), Role::Admin, AccountStatus::Active)
        .unwrap();

    let response = get(&session, "/admin/dashboard", Some(&forged)).await;
    assert_eq!(location(&response), "/");
    assert!(clears_cookie(&response));

    let response = get(&session, "/login", Some(&forged)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn roles_are_cross_redirected_to_their_own_area() {
    let session = session();

    let admin = token(&session, Role::Admin, AccountStatus::Active);
    let response = get(&session, "/architect/dashboard", Some(&admin)).await;
    assert_eq!(location(&response), "/admin/dashboard");
    assert!(!clears_cookie(&response));

    let architect = token(&session, Role::Architect, AccountStatus::Active);
    let response = get(&session, "/admin/dashboard", Some(&architect)).await;
    assert_eq!(location(&response), "/architect/dashboard");

    let response = get(&session, "/architect/dashboard", Some(&architect)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn inactive_user_is_logged_out_then_treated_as_anonymous() {
    let session = session();
    let inactive = token(&session, Role::Architect, AccountStatus::Inactive);

    let response = get(&session, "/architect/dashboard", Some(&inactive)).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/?error=suspended");
    assert!(clears_cookie(&response));

    // O navegador descartou o cookie: próxima visita chega sem token
    let response = get(&session, "/architect/dashboard", None).await;
    assert_eq!(location(&response), "/");

    let response = get(&session, "/login", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn pending_user_is_pinned_to_pending_page() {
    let session = session();
    let pending = token(&session, Role::Architect, AccountStatus::PendingApproval);

    let response = get(&session, "/pending-approval", Some(&pending)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(&session, "/architect/dashboard", Some(&pending)).await;
    assert_eq!(location(&response), "/pending-approval");
    assert!(!clears_cookie(&response));

    let response = get(&session, "/login", Some(&pending)).await;
    assert_eq!(location(&response), "/pending-approval");
}

#[tokio::test]
async fn home_is_public_for_everyone() {
    let session = session();
    assert_eq!(get(&session, "/", None).await.status(), StatusCode::OK);

    let inactive = token(&session, Role::Admin, AccountStatus::Inactive);
    assert_eq!(get(&session, "/?error=suspended", Some(&inactive)).await.status(), StatusCode::OK);
}
