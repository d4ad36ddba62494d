use crate::error::{AppError, CliError};
use crate::utils::validation::validate_email;
use rpassword::read_password;
use std::io::{self, Write};

/// User login credentials input handler
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl LoginInput {
    /// Collect login credentials from interactive input.
    /// If profile_email is provided, only the password is prompted.
    pub fn collect(profile_email: Option<&str>) -> Result<Self, AppError> {
        let email = if let Some(email) = profile_email {
            println!("Using email from profile: {}", email);
            email.to_string()
        } else {
            print!("Email: ");
            io::stdout().flush().map_err(|e| {
                AppError::Cli(CliError::InvalidArguments(format!(
                    "Failed to flush stdout: {}",
                    e
                )))
            })?;

            let mut email = String::new();
            io::stdin().read_line(&mut email).map_err(|e| {
                AppError::Cli(CliError::InvalidArguments(format!(
                    "Failed to read email: {}",
                    e
                )))
            })?;
            email.trim().to_string()
        };

        print!("Password: ");
        io::stdout().flush().map_err(|e| {
            AppError::Cli(CliError::InvalidArguments(format!(
                "Failed to flush stdout: {}",
                e
            )))
        })?;

        let password = read_password().map_err(|e| {
            AppError::Cli(CliError::InvalidArguments(format!(
                "Failed to read password: {}",
                e
            )))
        })?;

        Ok(Self {
            email,
            password: password.trim().to_string(),
        })
    }

    pub fn validate(&self) -> Result<(), AppError> {
        validate_email(&self.email)
            .map_err(|reason| AppError::Cli(CliError::InvalidArguments(reason)))?;
        if self.password.is_empty() {
            return Err(AppError::Cli(CliError::InvalidArguments(
                "Password cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}
