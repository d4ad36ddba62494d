use crate::api::models::{AuthResponse, Role};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role a session resolves to for route gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Admin,
    Manager,
    Employee,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Manager => "MANAGER",
            UserRole::Employee => "EMPLOYEE",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ADMIN" => Ok(UserRole::Admin),
            "MANAGER" => Ok(UserRole::Manager),
            "EMPLOYEE" => Ok(UserRole::Employee),
            _ => Err(()),
        }
    }
}

/// Identity attached to every outgoing request after login.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub id: i64,
    pub nom: String,
    pub prenom: String,
    pub email: String,
    /// Primary role resolved at login; `None` when the backend returned
    /// no roles or an unknown role name (the session is then
    /// authenticated but unauthorized everywhere role-gated).
    pub role: Option<UserRole>,
    /// Full role list as returned by the backend.
    pub roles: Vec<Role>,
}

/// Authenticated session: bearer token plus the resolved user identity.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

impl Session {
    /// Build a session from a successful credential exchange.
    ///
    /// The first entry of the backend's role list becomes the primary
    /// role, uppercased. The backend does not guarantee an ordering for
    /// that list; until it exposes a canonical primary role, first-entry
    /// wins is the documented resolution.
    pub fn from_auth_response(response: AuthResponse) -> Self {
        let role = response
            .user
            .roles
            .first()
            .and_then(|r| r.role_name.parse::<UserRole>().ok());

        Session {
            token: response.token,
            user: SessionUser {
                id: response.user.id,
                nom: response.user.nom,
                prenom: response.user.prenom,
                email: response.user.email,
                role,
                roles: response.user.roles,
            },
        }
    }
}

/// Persisted form of a session, stored between invocations so role
/// gating works without a fresh login. The full role list is not kept;
/// only the resolved primary role matters after login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub user_id: i64,
    pub nom: String,
    pub prenom: String,
    pub email: String,
    pub role: Option<String>,
}

impl From<&Session> for StoredSession {
    fn from(session: &Session) -> Self {
        StoredSession {
            token: session.token.clone(),
            user_id: session.user.id,
            nom: session.user.nom.clone(),
            prenom: session.user.prenom.clone(),
            email: session.user.email.clone(),
            role: session.user.role.map(|r| r.as_str().to_string()),
        }
    }
}

impl StoredSession {
    pub fn into_session(self) -> Session {
        let role = self.role.as_deref().and_then(|r| r.parse().ok());
        Session {
            token: self.token,
            user: SessionUser {
                id: self.user_id,
                nom: self.nom,
                prenom: self.prenom,
                email: self.email,
                role,
                roles: vec![],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::Utilisateur;

    fn auth_response(roles: Vec<Role>) -> AuthResponse {
        AuthResponse {
            token: "jwt".to_string(),
            user: Utilisateur {
                id: 1,
                nom: "Durand".to_string(),
                prenom: "Alice".to_string(),
                email: "alice@example.test".to_string(),
                date_de_naissance: None,
                photo: None,
                entreprise_id: Some(5),
                adresse: None,
                roles,
            },
        }
    }

    fn role(name: &str) -> Role {
        Role {
            id: 1,
            role_name: name.to_string(),
            utilisateur_id: Some(1),
            entreprise_id: Some(5),
        }
    }

    #[test]
    fn test_first_role_becomes_primary() {
        let session =
            Session::from_auth_response(auth_response(vec![role("manager"), role("employee")]));
        assert_eq!(session.user.role, Some(UserRole::Manager));
        assert_eq!(session.user.roles.len(), 2);
    }

    #[test]
    fn test_role_name_is_uppercased() {
        let session = Session::from_auth_response(auth_response(vec![role("admin")]));
        assert_eq!(session.user.role, Some(UserRole::Admin));
        assert_eq!(session.user.role.unwrap().as_str(), "ADMIN");
    }

    #[test]
    fn test_no_roles_yields_no_primary_role() {
        let session = Session::from_auth_response(auth_response(vec![]));
        assert_eq!(session.user.role, None);
    }

    #[test]
    fn test_unknown_role_name_yields_no_primary_role() {
        let session = Session::from_auth_response(auth_response(vec![role("intern")]));
        assert_eq!(session.user.role, None);
    }

    #[test]
    fn test_stored_session_round_trip() {
        let session = Session::from_auth_response(auth_response(vec![role("admin")]));
        let stored = StoredSession::from(&session);
        assert_eq!(stored.role.as_deref(), Some("ADMIN"));

        let restored = stored.into_session();
        assert_eq!(restored.token, "jwt");
        assert_eq!(restored.user.role, Some(UserRole::Admin));
        assert_eq!(restored.user.email, "alice@example.test");
    }

    #[test]
    fn test_user_role_parse() {
        assert_eq!("employee".parse::<UserRole>(), Ok(UserRole::Employee));
        assert_eq!("ADMIN".parse::<UserRole>(), Ok(UserRole::Admin));
        assert!("root".parse::<UserRole>().is_err());
    }
}
