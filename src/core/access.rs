//! Role-gated route access control.
//!
//! Re-evaluated on every guarded operation: no session redirects to
//! `/login`, a session whose primary role is outside the route's
//! allow-list redirects to `/unauthorized`, anything else is allowed.
//! Three states overall: unauthenticated, authenticated-unauthorized,
//! authenticated-authorized.

use crate::core::session::{Session, UserRole};
use crate::error::{LOGIN_ROUTE, UNAUTHORIZED_ROUTE};

const ALL_ROLES: &[UserRole] = &[UserRole::Admin, UserRole::Manager, UserRole::Employee];
const ADMIN_MANAGER: &[UserRole] = &[UserRole::Admin, UserRole::Manager];
const ADMIN_ONLY: &[UserRole] = &[UserRole::Admin];

/// Dashboard sections, each with its role allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Entreprises,
    Utilisateurs,
    Roles,
    Categories,
    Articles,
    Clients,
    CommandesClients,
    Ventes,
    Fournisseurs,
    CommandesFournisseurs,
    MvtStk,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Dashboard => "/dashboard",
            Route::Entreprises => "/dashboard/entreprises",
            Route::Utilisateurs => "/dashboard/utilisateurs",
            Route::Roles => "/dashboard/roles",
            Route::Categories => "/dashboard/categories",
            Route::Articles => "/dashboard/articles",
            Route::Clients => "/dashboard/clients",
            Route::CommandesClients => "/dashboard/commandes-clients",
            Route::Ventes => "/dashboard/ventes",
            Route::Fournisseurs => "/dashboard/fournisseurs",
            Route::CommandesFournisseurs => "/dashboard/commandes-fournisseurs",
            Route::MvtStk => "/dashboard/mvt-stk",
        }
    }

    pub fn allowed_roles(&self) -> &'static [UserRole] {
        match self {
            Route::Entreprises | Route::Utilisateurs => ADMIN_MANAGER,
            Route::Roles => ADMIN_ONLY,
            _ => ALL_ROLES,
        }
    }
}

/// Outcome of evaluating a session against a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    /// No session: navigate to the login page.
    RedirectToLogin,
    /// Valid session, role not permitted: navigate to the unauthorized page.
    RedirectToUnauthorized,
}

impl AccessDecision {
    pub fn redirect_path(&self) -> Option<&'static str> {
        match self {
            AccessDecision::Allow => None,
            AccessDecision::RedirectToLogin => Some(LOGIN_ROUTE),
            AccessDecision::RedirectToUnauthorized => Some(UNAUTHORIZED_ROUTE),
        }
    }
}

pub fn check(session: Option<&Session>, route: Route) -> AccessDecision {
    let Some(session) = session else {
        return AccessDecision::RedirectToLogin;
    };

    match session.user.role {
        Some(role) if route.allowed_roles().contains(&role) => AccessDecision::Allow,
        role => {
            log::warn!(
                "Unauthorized access to {} by role {:?}",
                route.path(),
                role
            );
            AccessDecision::RedirectToUnauthorized
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::SessionUser;

    fn session_with_role(role: Option<UserRole>) -> Session {
        Session {
            token: "jwt".to_string(),
            user: SessionUser {
                id: 1,
                nom: "Durand".to_string(),
                prenom: "Alice".to_string(),
                email: "alice@example.test".to_string(),
                role,
                roles: vec![],
            },
        }
    }

    #[test]
    fn test_no_session_redirects_to_login() {
        let decision = check(None, Route::Articles);
        assert_eq!(decision, AccessDecision::RedirectToLogin);
        assert_eq!(decision.redirect_path(), Some("/login"));
    }

    #[test]
    fn test_employee_on_admin_route_redirects_to_unauthorized() {
        let session = session_with_role(Some(UserRole::Employee));
        let decision = check(Some(&session), Route::Roles);
        assert_eq!(decision, AccessDecision::RedirectToUnauthorized);
        assert_eq!(decision.redirect_path(), Some("/unauthorized"));
    }

    #[test]
    fn test_admin_renders_admin_route() {
        let session = session_with_role(Some(UserRole::Admin));
        let decision = check(Some(&session), Route::Roles);
        assert_eq!(decision, AccessDecision::Allow);
        assert_eq!(decision.redirect_path(), None);
    }

    #[test]
    fn test_employee_allowed_on_shared_routes() {
        let session = session_with_role(Some(UserRole::Employee));
        for route in [
            Route::Dashboard,
            Route::Categories,
            Route::Articles,
            Route::Clients,
            Route::CommandesClients,
            Route::Ventes,
            Route::Fournisseurs,
            Route::CommandesFournisseurs,
            Route::MvtStk,
        ] {
            assert_eq!(check(Some(&session), route), AccessDecision::Allow);
        }
    }

    #[test]
    fn test_manager_denied_on_roles_allowed_on_entreprises() {
        let session = session_with_role(Some(UserRole::Manager));
        assert_eq!(
            check(Some(&session), Route::Roles),
            AccessDecision::RedirectToUnauthorized
        );
        assert_eq!(
            check(Some(&session), Route::Entreprises),
            AccessDecision::Allow
        );
    }

    #[test]
    fn test_session_without_resolved_role_is_unauthorized() {
        let session = session_with_role(None);
        assert_eq!(
            check(Some(&session), Route::Dashboard),
            AccessDecision::RedirectToUnauthorized
        );
    }
}
