// src/middleware/gate.rs

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    middleware::session::SessionContext,
    models::auth::{AccountStatus, Role, SessionClaims},
};

pub const ROOT_PATH: &str = "/";
pub const PENDING_APPROVAL_PATH: &str = "/pending-approval";
pub const SUSPENDED_PATH: &str = "/?error=suspended";

const AUTH_FLOW_PATHS: [&str; 3] = ["/login", "/register", PENDING_APPROVAL_PATH];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    AuthFlow,
    Protected(Role),
    Public,
}

// Prefixo puro: `/administrator` e `/architects-gallery` também são áreas protegidas
pub fn classify(path: &str) -> RouteClass {
    if AUTH_FLOW_PATHS.contains(&path) {
        RouteClass::AuthFlow
    } else if path.starts_with("/admin") {
        RouteClass::Protected(Role::Admin)
    } else if path.starts_with("/architect") {
        RouteClass::Protected(Role::Architect)
    } else {
        RouteClass::Public
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Redirect { to: &'static str, clear_cookie: bool },
}

impl GateDecision {
    fn redirect(to: &'static str) -> Self {
        GateDecision::Redirect { to, clear_cookie: false }
    }

    fn redirect_and_logout(to: &'static str) -> Self {
        GateDecision::Redirect { to, clear_cookie: true }
    }
}

/// Tabela de decisão do Gate. A ordem importa: a primeira regra que casar vence.
///
/// O status avaliado é o que está no token (snapshot do login), não o do banco.
pub fn decide(path: &str, claims: Option<&SessionClaims>) -> GateDecision {
    match classify(path) {
        RouteClass::AuthFlow => match claims {
            // 1. Ativo e logado não precisa ver login/cadastro
            Some(c) if c.status == AccountStatus::Active => {
                GateDecision::redirect(c.role.dashboard_path())
            }
            // 2. Pendente só enxerga a página de pendência
            Some(c)
                if c.status == AccountStatus::PendingApproval
                    && path != PENDING_APPROVAL_PATH =>
            {
                GateDecision::redirect(PENDING_APPROVAL_PATH)
            }
            // 3. Resto passa
            _ => GateDecision::Allow,
        },
        RouteClass::Protected(area) => match claims {
            // 4. Sem sessão
            None => GateDecision::redirect_and_logout(ROOT_PATH),
            // 5. Conta não ativa
            Some(c) if c.status == AccountStatus::PendingApproval => {
                GateDecision::redirect(PENDING_APPROVAL_PATH)
            }
            Some(c) if c.status == AccountStatus::Inactive => {
                GateDecision::redirect_and_logout(SUSPENDED_PATH)
            }
            // 6. Área de outro papel: volta para o próprio painel
            Some(c) if c.role != area => GateDecision::redirect(c.role.dashboard_path()),
            // 7.
            Some(_) => GateDecision::Allow,
        },
        RouteClass::Public => GateDecision::Allow,
    }
}

// O middleware em si, aplicado às rotas de página
pub async fn page_gate(
    State(session): State<SessionContext>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let claims = session.claims_from(&jar);
    let path = request.uri().path().to_owned();

    match decide(&path, claims.as_ref()) {
        GateDecision::Allow => next.run(request).await,
        GateDecision::Redirect { to, clear_cookie } => {
            tracing::debug!("Gate: {} -> {} (logout: {})", path, to, clear_cookie);
            if clear_cookie {
                (jar.add(session.cleared_cookie()), Redirect::temporary(to)).into_response()
            } else {
                Redirect::temporary(to).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn claims(role: Role, status: AccountStatus) -> SessionClaims {
        SessionClaims { user_id: Uuid::new_v4(), role, status, iat: 0, exp: 0 }
    }

    const ALL: [(Role, AccountStatus); 6] = [
        (Role::Admin, AccountStatus::Active),
        (Role::Admin, AccountStatus::PendingApproval),
        (Role::Admin, AccountStatus::Inactive),
        (Role::Architect, AccountStatus::Active),
        (Role::Architect, AccountStatus::PendingApproval),
        (Role::Architect, AccountStatus::Inactive),
    ];

    #[test]
    fn classify_routes() {
        assert_eq!(classify("/login"), RouteClass::AuthFlow);
        assert_eq!(classify("/register"), RouteClass::AuthFlow);
        assert_eq!(classify("/pending-approval"), RouteClass::AuthFlow);
        assert_eq!(classify("/admin"), RouteClass::Protected(Role::Admin));
        assert_eq!(classify("/admin/users"), RouteClass::Protected(Role::Admin));
        assert_eq!(classify("/architect/dashboard"), RouteClass::Protected(Role::Architect));
        assert_eq!(classify("/administrator"), RouteClass::Protected(Role::Admin));
        assert_eq!(classify("/architects-gallery"), RouteClass::Protected(Role::Architect));
        assert_eq!(classify("/"), RouteClass::Public);
        assert_eq!(classify("/login/extra"), RouteClass::Public);
    }

    #[test]
    fn active_users_on_auth_pages_go_to_their_dashboard() {
        for path in AUTH_FLOW_PATHS {
            assert_eq!(
                decide(path, Some(&claims(Role::Admin, AccountStatus::Active))),
                GateDecision::redirect("/admin/dashboard")
            );
            assert_eq!(
                decide(path, Some(&claims(Role::Architect, AccountStatus::Active))),
                GateDecision::redirect("/architect/dashboard")
            );
        }
    }

    #[test]
    fn pending_users_are_pinned_to_pending_page() {
        let c = claims(Role::Architect, AccountStatus::PendingApproval);
        assert_eq!(decide("/login", Some(&c)), GateDecision::redirect(PENDING_APPROVAL_PATH));
        assert_eq!(decide("/register", Some(&c)), GateDecision::redirect(PENDING_APPROVAL_PATH));
        assert_eq!(decide(PENDING_APPROVAL_PATH, Some(&c)), GateDecision::Allow);
        assert_eq!(
            decide("/architect/dashboard", Some(&c)),
            GateDecision::redirect(PENDING_APPROVAL_PATH)
        );
    }

    #[test]
    fn anonymous_and_inactive_users_may_see_auth_pages() {
        for path in AUTH_FLOW_PATHS {
            assert_eq!(decide(path, None), GateDecision::Allow);
            assert_eq!(
                decide(path, Some(&claims(Role::Architect, AccountStatus::Inactive))),
                GateDecision::Allow
            );
        }
    }

    #[test]
    fn protected_without_token_goes_home_and_clears_cookie() {
        for path in ["/admin/dashboard", "/architect", "/architect/indications/1"] {
            assert_eq!(decide(path, None), GateDecision::redirect_and_logout(ROOT_PATH));
        }
    }

    #[test]
    fn inactive_users_are_logged_out_on_protected_paths() {
        for role in [Role::Admin, Role::Architect] {
            for path in ["/admin/dashboard", "/architect/dashboard"] {
                assert_eq!(
                    decide(path, Some(&claims(role, AccountStatus::Inactive))),
                    GateDecision::redirect_and_logout(SUSPENDED_PATH)
                );
            }
        }
    }

    #[test]
    fn role_mismatch_cross_redirects() {
        assert_eq!(
            decide("/architect/dashboard", Some(&claims(Role::Admin, AccountStatus::Active))),
            GateDecision::redirect("/admin/dashboard")
        );
        assert_eq!(
            decide("/admin/users", Some(&claims(Role::Architect, AccountStatus::Active))),
            GateDecision::redirect("/architect/dashboard")
        );
    }

    #[test]
    fn prefix_lookalikes_are_gated_too() {
        assert_eq!(decide("/administrator", None), GateDecision::redirect_and_logout(ROOT_PATH));
        assert_eq!(
            decide("/architects-gallery", Some(&claims(Role::Admin, AccountStatus::Active))),
            GateDecision::redirect("/admin/dashboard")
        );
    }

    #[test]
    fn matching_role_is_allowed() {
        assert_eq!(
            decide("/admin/users", Some(&claims(Role::Admin, AccountStatus::Active))),
            GateDecision::Allow
        );
        assert_eq!(
            decide("/architect/team", Some(&claims(Role::Architect, AccountStatus::Active))),
            GateDecision::Allow
        );
    }

    #[test]
    fn mismatch_rule_never_fires_for_non_active_accounts() {
        // Admin pendente em área de arquiteto: regra 5 vence a regra 6
        assert_eq!(
            decide("/architect/dashboard", Some(&claims(Role::Admin, AccountStatus::PendingApproval))),
            GateDecision::redirect(PENDING_APPROVAL_PATH)
        );
    }

    #[test]
    fn public_paths_always_pass() {
        for path in ["/", "/health", "/catalogo"] {
            assert_eq!(decide(path, None), GateDecision::Allow);
            for (role, status) in ALL {
                assert_eq!(decide(path, Some(&claims(role, status))), GateDecision::Allow);
            }
        }
    }
}
