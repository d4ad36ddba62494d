use super::Result;
use crate::core::session::StoredSession;

#[cfg(not(test))]
use keyring::Entry;

const SERVICE_NAME: &str = "gestock-cli";

/// Per-profile session storage backed by the OS keyring. The persisted
/// value is the serialized [`StoredSession`] (token plus resolved user
/// identity); passwords themselves never touch disk.
#[derive(Debug, Clone)]
pub struct Credentials {
    session: Option<StoredSession>,
    pub profile_name: String,
}

impl Credentials {
    pub fn new(profile_name: String) -> Self {
        Self {
            session: None,
            profile_name,
        }
    }

    pub fn load(profile_name: &str) -> Result<Self> {
        let mut credentials = Self::new(profile_name.to_string());
        // A stale or unparseable entry is treated as no session; the
        // user just logs in again.
        credentials.session = credentials
            .load_entry("session")?
            .and_then(|raw| serde_json::from_str(&raw).ok());
        Ok(credentials)
    }

    #[cfg(not(test))]
    fn load_entry(&self, key_type: &str) -> Result<Option<String>> {
        let entry = Entry::new(SERVICE_NAME, &format!("{}-{}", key_type, self.profile_name))
            .map_err(|e| crate::error::StorageError::KeyringError(e.to_string()))?;

        match entry.get_password() {
            Ok(v) => Ok(Some(v)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(crate::error::StorageError::KeyringError(e.to_string())),
        }
    }

    #[cfg(test)]
    fn load_entry(&self, key_type: &str) -> Result<Option<String>> {
        println!(
            "MOCK: Loading {} for profile {}",
            key_type, self.profile_name
        );
        Ok(None)
    }

    /// Persist a fresh session after login.
    pub fn save_session_for_profile(profile_name: &str, session: &StoredSession) -> Result<()> {
        let credentials = Self::new(profile_name.to_string());
        let raw = serde_json::to_string(session)
            .map_err(|e| crate::error::StorageError::KeyringError(e.to_string()))?;
        credentials.save_entry("session", &Some(raw))?;
        Ok(())
    }

    /// Drop the stored session on logout or session expiry.
    pub fn clear_session_for_profile(profile_name: &str) -> Result<()> {
        let credentials = Self::new(profile_name.to_string());
        credentials.delete_entry("session")?;
        Ok(())
    }

    #[cfg(not(test))]
    fn save_entry(&self, key_type: &str, value: &Option<String>) -> Result<()> {
        if let Some(v) = value {
            let key_name = format!("{}-{}", key_type, self.profile_name);

            let entry = Entry::new(SERVICE_NAME, &key_name)
                .map_err(|e| crate::error::StorageError::KeyringError(e.to_string()))?;

            entry
                .set_password(v)
                .map_err(|e| crate::error::StorageError::KeyringError(e.to_string()))?;
        }

        Ok(())
    }

    #[cfg(not(test))]
    fn delete_entry(&self, key_type: &str) -> Result<()> {
        let key_name = format!("{}-{}", key_type, self.profile_name);

        let entry = Entry::new(SERVICE_NAME, &key_name)
            .map_err(|e| crate::error::StorageError::KeyringError(e.to_string()))?;

        match entry.delete_credential() {
            Ok(_) => Ok(()),
            // Entry doesn't exist, which is fine for logout
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(crate::error::StorageError::KeyringError(e.to_string())),
        }
    }

    #[cfg(test)]
    fn save_entry(&self, key_type: &str, value: &Option<String>) -> Result<()> {
        if let Some(v) = value {
            println!(
                "MOCK: Saving {} = '{}' for profile {}",
                key_type, v, self.profile_name
            );
        }
        Ok(())
    }

    #[cfg(test)]
    fn delete_entry(&self, key_type: &str) -> Result<()> {
        println!(
            "MOCK: Deleting {} for profile {}",
            key_type, self.profile_name
        );
        Ok(())
    }

    pub fn get_session(&self) -> Option<&StoredSession> {
        self.session.as_ref()
    }

    pub fn get_session_token(&self) -> Option<String> {
        self.session.as_ref().map(|s| s.token.clone())
    }

    pub fn set_session(&mut self, session: Option<StoredSession>) {
        self.session = session;
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_session() -> StoredSession {
        StoredSession {
            token: "jwt-token".to_string(),
            user_id: 1,
            nom: "Durand".to_string(),
            prenom: "Alice".to_string(),
            email: "alice@example.test".to_string(),
            role: Some("ADMIN".to_string()),
        }
    }

    #[test]
    fn test_save_session_mock() {
        let result = Credentials::save_session_for_profile("test-profile", &stored_session());
        assert!(result.is_ok(), "Save should succeed in test environment");
    }

    #[test]
    fn test_load_credentials_mock() {
        let loaded = Credentials::load("test-profile");
        assert!(loaded.is_ok(), "Load should succeed in test environment");

        let creds = loaded.expect("Loaded credentials should not be None");
        assert_eq!(creds.profile_name, "test-profile");
        assert!(!creds.has_session(), "Session should be None in mock");
    }

    #[test]
    fn test_clear_session_mock() {
        let result = Credentials::clear_session_for_profile("test-profile");
        assert!(result.is_ok());
    }

    #[test]
    fn test_set_session() {
        let mut creds = Credentials::new("test".to_string());
        creds.set_session(Some(stored_session()));
        assert!(creds.has_session());
        assert_eq!(creds.get_session_token(), Some("jwt-token".to_string()));
        assert_eq!(
            creds.get_session().unwrap().role.as_deref(),
            Some("ADMIN")
        );
    }
}
