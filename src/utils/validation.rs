/// Minimal shape check; the backend performs real validation.
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(format!("Invalid email address: {}", email));
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(format!("Invalid email address: {}", email));
    }
    Ok(())
}

pub fn validate_base_url(url: &str) -> Result<(), String> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(format!("URL must start with http:// or https://: {}", url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("alice@example.test").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("alice").is_err());
        assert!(validate_email("alice@").is_err());
        assert!(validate_email("@example.test").is_err());
        assert!(validate_email("alice@localhost").is_err());
    }

    #[test]
    fn test_validate_base_url() {
        assert!(validate_base_url("http://localhost:8080").is_ok());
        assert!(validate_base_url("https://api.example.test").is_ok());
        assert!(validate_base_url("ftp://example.test").is_err());
        assert!(validate_base_url("example.test").is_err());
    }
}
