use thiserror::Error;

/// Client-side route the session layer navigates to after an auth failure.
pub const LOGIN_ROUTE: &str = "/login";
pub const UNAUTHORIZED_ROUTE: &str = "/unauthorized";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("AuthError: {0}")]
    Auth(#[from] AuthError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Authentication required")]
    AuthRequired { message: String, hint: String },
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

/// Transport-level failure taxonomy, decided once at the HTTP client
/// boundary. Upper layers attach user-facing messages but never
/// reclassify.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Session expired")]
    SessionExpired { endpoint: String },
    #[error("Access denied")]
    Forbidden { endpoint: String },
    #[error("Server error ({status}): {message}")]
    Server {
        status: u16,
        endpoint: String,
        message: String,
    },
    #[error("Network error: {message}")]
    Network { endpoint: String, message: String },
    #[error("Request rejected ({status}): {message}")]
    Validation {
        status: u16,
        endpoint: String,
        message: String,
    },
    #[error("Invalid response body: {message}")]
    Decode { endpoint: String, message: String },
}

impl ApiError {
    /// Route the client navigates to as a consequence of this failure.
    /// Only authentication failures carry a redirect; everything else is
    /// surfaced where it happened.
    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            ApiError::SessionExpired { .. } => Some(LOGIN_ROUTE),
            ApiError::Forbidden { .. } => Some(UNAUTHORIZED_ROUTE),
            _ => None,
        }
    }

    pub fn endpoint(&self) -> &str {
        match self {
            ApiError::SessionExpired { endpoint }
            | ApiError::Forbidden { endpoint }
            | ApiError::Server { endpoint, .. }
            | ApiError::Network { endpoint, .. }
            | ApiError::Validation { endpoint, .. }
            | ApiError::Decode { endpoint, .. } => endpoint,
        }
    }
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Login failed: Invalid credentials")]
    InvalidCredentials,
    #[error("Session expired or invalid")]
    SessionInvalid,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Keyring error: {0}")]
    KeyringError(String),
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration save failed")]
    ConfigSaveFailed,
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String, hint: String },
    #[error("Configuration field '{field}' is missing")]
    MissingField { field: String },
    #[error("Invalid configuration value for '{field}': {value}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Api(api_error) => match api_error {
                ApiError::SessionExpired { .. } | ApiError::Forbidden { .. } => ErrorSeverity::High,
                ApiError::Server { .. } | ApiError::Network { .. } => ErrorSeverity::High,
                ApiError::Validation { .. } | ApiError::Decode { .. } => ErrorSeverity::Medium,
            },
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Auth(_) => ErrorSeverity::High,
            AppError::Storage(_) => ErrorSeverity::Medium,
        }
    }

    pub fn display_friendly(&self) -> String {
        match self {
            AppError::Cli(CliError::AuthRequired { message, .. }) => message.clone(),
            AppError::Auth(AuthError::InvalidCredentials) => "Invalid credentials".to_string(),
            AppError::Auth(AuthError::SessionInvalid) => "Session expired or invalid".to_string(),
            AppError::Api(ApiError::SessionExpired { .. }) => "Session expired".to_string(),
            AppError::Api(ApiError::Forbidden { .. }) => {
                "You are not allowed to access this resource".to_string()
            }
            AppError::Api(ApiError::Network { .. }) => {
                "Could not reach the gestion-de-stock server".to_string()
            }
            _ => format!("{}", self),
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Cli(CliError::AuthRequired { hint, .. }) => Some(hint.clone()),
            AppError::Auth(AuthError::InvalidCredentials | AuthError::SessionInvalid)
            | AppError::Api(ApiError::SessionExpired { .. }) => {
                Some("'gestock-cli auth login' to start a new session".to_string())
            }
            AppError::Api(ApiError::Forbidden { .. }) => {
                Some("Ask an administrator to grant your account the required role".to_string())
            }
            AppError::Api(ApiError::Network { .. }) => {
                Some("Check your internet connection and the configured API URL".to_string())
            }
            AppError::Config(ConfigError::FileNotFound { .. }) => {
                Some("'gestock-cli config set <field> <value>' to create a configuration".to_string())
            }
            _ => None,
        }
    }
}
