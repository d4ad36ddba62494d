use crate::AppError;
use crate::api::client::StockClient;
use crate::core::auth::LoginInput;
use crate::core::session::{Session, StoredSession};
use crate::error::{ApiError, AuthError};
use crate::storage::credentials::Credentials;

/// Current authentication state for status display.
#[derive(Debug, Clone)]
pub struct AuthStatus {
    pub profile_name: String,
    pub session_active: bool,
}

/// Credential exchange and session lifecycle.
pub struct AuthService {
    credentials: Credentials,
    client: StockClient,
}

impl AuthService {
    pub fn new(credentials: Credentials, client: StockClient) -> Self {
        Self {
            credentials,
            client,
        }
    }

    /// Exchange credentials for a session. The returned session carries
    /// the bearer token and the resolved primary role; the token is also
    /// persisted to the keyring for this profile.
    pub async fn authenticate(&mut self, input: LoginInput) -> Result<Session, AppError> {
        input.validate()?;

        let response = self
            .client
            .login(&input.email, &input.password)
            .await
            .map_err(|e| match e {
                // A rejected login is bad credentials, not a stale session.
                ApiError::SessionExpired { .. }
                | ApiError::Forbidden { .. }
                | ApiError::Validation { .. } => AppError::Auth(AuthError::InvalidCredentials),
                other => AppError::Api(other),
            })?;

        let session = Session::from_auth_response(response);
        let stored = StoredSession::from(&session);

        Credentials::save_session_for_profile(&self.credentials.profile_name, &stored)?;
        self.credentials.set_session(Some(stored));

        Ok(session)
    }

    /// Drop the stored session, client-side only.
    pub fn logout(&mut self) -> Result<(), AppError> {
        Credentials::clear_session_for_profile(&self.credentials.profile_name)?;
        self.credentials.set_session(None);
        self.client.clear_bearer_token();
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.has_session()
    }

    pub fn get_auth_status(&self) -> AuthStatus {
        AuthStatus {
            profile_name: self.credentials.profile_name.clone(),
            session_active: self.credentials.has_session(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_auth_status_structure() {
        let credentials = Credentials::new("test".to_string());
        let client = StockClient::new("http://localhost:8080".to_string()).unwrap();
        let service = AuthService::new(credentials, client);

        let status = service.get_auth_status();
        assert_eq!(status.profile_name, "test");
        assert!(!status.session_active);
        assert!(!service.is_authenticated());
    }

    #[test]
    fn test_logout_clears_session() {
        let mut credentials = Credentials::new("test".to_string());
        credentials.set_session(Some(StoredSession {
            token: "jwt".to_string(),
            user_id: 1,
            nom: "Durand".to_string(),
            prenom: "Alice".to_string(),
            email: "alice@example.test".to_string(),
            role: Some("MANAGER".to_string()),
        }));
        let mut client = StockClient::new("http://localhost:8080".to_string()).unwrap();
        client.set_bearer_token("jwt".to_string());

        let mut service = AuthService::new(credentials, client);
        assert!(service.is_authenticated());

        service.logout().expect("logout should succeed");
        assert!(!service.is_authenticated());
    }
}
