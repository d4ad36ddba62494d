use crate::api::client::StockClient;
use crate::cli::main_types::{AuthCommands, Commands, ConfigCommands};
use crate::core::access::{self, AccessDecision, Route};
use crate::core::auth::LoginInput;
use crate::core::cache::QueryCache;
use crate::core::services::auth_service::AuthService;
use crate::core::session::{Session, StoredSession};
use crate::display::notify_success;
use crate::error::{ApiError, AppError, CliError};
use crate::storage::config::{Config, Profile, ProcessEnv};
use crate::storage::credentials::Credentials;
use crate::utils::validation::{validate_base_url, validate_email};
use std::path::PathBuf;

pub struct Dispatcher {
    pub(crate) config: Config,
    pub(crate) config_path: Option<PathBuf>,
    pub(crate) credentials: Credentials,
}

impl Dispatcher {
    pub fn new(config: Config, config_path: Option<PathBuf>, credentials: Credentials) -> Self {
        Self {
            config,
            config_path,
            credentials,
        }
    }

    /// Run a command, then apply session consequences in one place: a
    /// 401 from any endpoint drops the stored session so the next run
    /// starts unauthenticated, and auth failures log their navigation
    /// target.
    pub async fn dispatch(&self, command: Commands) -> Result<(), AppError> {
        let result = self.run(command).await;

        if let Err(AppError::Api(api_err)) = &result {
            if let Some(target) = api_err.redirect_target() {
                if matches!(api_err, ApiError::SessionExpired { .. }) {
                    let _ = Credentials::clear_session_for_profile(&self.credentials.profile_name);
                }
                log::info!("Navigating to {} after {}", target, api_err.endpoint());
            }
        }

        result
    }

    async fn run(&self, command: Commands) -> Result<(), AppError> {
        match command {
            Commands::Auth { command } => self.handle_auth_command(command).await,
            Commands::Config { command } => self.handle_config_command(command).await,
            Commands::Article { command } => self.handle_article_command(command).await,
            Commands::Categorie { command } => self.handle_categorie_command(command).await,
            Commands::Client { command } => self.handle_client_command(command).await,
            Commands::Fournisseur { command } => self.handle_fournisseur_command(command).await,
            Commands::CommandeClient { command } => {
                self.handle_commande_client_command(command).await
            }
            Commands::CommandeFournisseur { command } => {
                self.handle_commande_fournisseur_command(command).await
            }
            Commands::Vente { command } => self.handle_vente_command(command).await,
            Commands::MvtStk { command } => self.handle_mvt_stk_command(command).await,
            Commands::Role { command } => self.handle_role_command(command).await,
            Commands::Utilisateur { command } => self.handle_utilisateur_command(command).await,
            Commands::Entreprise { command } => self.handle_entreprise_command(command).await,
        }
    }

    pub(crate) fn profile(&self) -> Result<&Profile, AppError> {
        self.config
            .get_profile(&self.credentials.profile_name)
            .ok_or_else(|| {
                AppError::Cli(CliError::InvalidArguments(format!(
                    "Profile '{}' not found. Run 'gestock-cli config set api_url <url>' first.",
                    self.credentials.profile_name
                )))
            })
    }

    /// Build the HTTP client for the active profile, with the stored
    /// session token attached when present. The environment wins over
    /// the profile for the API URL.
    pub(crate) fn build_client(&self) -> Result<StockClient, AppError> {
        let profile = self.profile()?;
        let api_url = ProcessEnv::load().resolve_api_url(profile);
        let timeout = profile
            .timeout_seconds
            .unwrap_or(crate::api::client::DEFAULT_TIMEOUT_SECS);

        let mut client = StockClient::with_timeout(api_url, timeout)?;
        if let Some(token) = self.credentials.get_session_token() {
            client.set_bearer_token(token);
        }
        Ok(client)
    }

    pub(crate) fn build_cache(&self) -> QueryCache {
        let enabled = self
            .profile()
            .ok()
            .and_then(|p| p.cache_enabled)
            .unwrap_or(true);
        if enabled {
            QueryCache::default()
        } else {
            QueryCache::disabled()
        }
    }

    pub(crate) fn session(&self) -> Option<Session> {
        self.credentials
            .get_session()
            .cloned()
            .map(StoredSession::into_session)
    }

    /// Evaluate the route allow-list before touching the network. No
    /// session asks for a login; a session with an insufficient role is
    /// rejected the same way a server-side 403 would be.
    pub(crate) fn guard(&self, route: Route) -> Result<(), AppError> {
        let session = self.session();
        match access::check(session.as_ref(), route) {
            AccessDecision::Allow => Ok(()),
            AccessDecision::RedirectToLogin => Err(AppError::Cli(CliError::AuthRequired {
                message: format!("{} requires an active session", route.path()),
                hint: "gestock-cli auth login".to_string(),
            })),
            AccessDecision::RedirectToUnauthorized => Err(AppError::Api(ApiError::Forbidden {
                endpoint: route.path().to_string(),
            })),
        }
    }

    async fn handle_auth_command(&self, command: AuthCommands) -> Result<(), AppError> {
        match command {
            AuthCommands::Login => {
                let profile = self.profile()?;
                let input = LoginInput::collect(profile.email.as_deref())?;
                input.validate()?;

                let client = self.build_client()?;
                let mut auth = AuthService::new(self.credentials.clone(), client);
                let session = auth.authenticate(input).await?;

                let role = session
                    .user
                    .role
                    .map(|r| r.as_str())
                    .unwrap_or("no recognized role");
                notify_success(&format!(
                    "Logged in as {} {} ({})",
                    session.user.prenom, session.user.nom, role
                ));
                Ok(())
            }
            AuthCommands::Logout => {
                let client = self.build_client()?;
                let mut auth = AuthService::new(self.credentials.clone(), client);
                auth.logout()?;
                notify_success(&format!(
                    "Logged out from profile: {}",
                    self.credentials.profile_name
                ));
                Ok(())
            }
            AuthCommands::Status => {
                println!("Authentication Status:");
                println!("=====================");
                println!("Profile: {}", self.credentials.profile_name);

                match self.credentials.get_session() {
                    Some(stored) => {
                        println!("Session: active");
                        println!("User: {} {} <{}>", stored.prenom, stored.nom, stored.email);
                        println!(
                            "Role: {}",
                            stored.role.as_deref().unwrap_or("(none recognized)")
                        );
                    }
                    None => {
                        println!("Session: none");
                        println!("Run 'gestock-cli auth login' to authenticate");
                    }
                }
                Ok(())
            }
        }
    }

    async fn handle_config_command(&self, command: ConfigCommands) -> Result<(), AppError> {
        match command {
            ConfigCommands::Show => {
                println!("Current Configuration:");
                println!("=====================");

                if let Some(default_profile) = &self.config.default_profile {
                    println!("Default Profile: {}", default_profile);
                } else {
                    println!("Default Profile: (not set)");
                }

                println!("\nProfiles:");
                if self.config.profiles.is_empty() {
                    println!("  No profiles configured");
                } else {
                    for (name, profile) in &self.config.profiles {
                        println!("  [{}]", name);
                        println!("    API URL: {}", profile.api_url);
                        if let Some(email) = &profile.email {
                            println!("    Email: {}", email);
                        }
                        if let Some(timeout) = profile.timeout_seconds {
                            println!("    Timeout: {} seconds", timeout);
                        }
                        if let Some(cache) = profile.cache_enabled {
                            println!("    Cache: {}", if cache { "enabled" } else { "disabled" });
                        }
                    }
                }

                Ok(())
            }
            ConfigCommands::Set { key, value } => {
                let profile_name = self.credentials.profile_name.clone();
                let mut config = self.config.clone();
                let mut profile =
                    config
                        .get_profile(&profile_name)
                        .cloned()
                        .unwrap_or_else(|| Profile {
                            api_url: "http://localhost:8080".to_string(),
                            email: None,
                            timeout_seconds: None,
                            cache_enabled: None,
                        });

                match key.as_str() {
                    "api_url" => {
                        validate_base_url(&value)
                            .map_err(|reason| AppError::Cli(CliError::InvalidArguments(reason)))?;
                        profile.api_url = value.clone();
                    }
                    "email" => {
                        validate_email(&value)
                            .map_err(|reason| AppError::Cli(CliError::InvalidArguments(reason)))?;
                        profile.email = Some(value.clone());
                    }
                    "timeout_seconds" => {
                        let timeout = value.parse::<u64>().map_err(|_| {
                            AppError::Cli(CliError::InvalidArguments(format!(
                                "timeout_seconds must be a number, got '{}'",
                                value
                            )))
                        })?;
                        profile.timeout_seconds = Some(timeout);
                    }
                    "cache_enabled" => {
                        let enabled = value.parse::<bool>().map_err(|_| {
                            AppError::Cli(CliError::InvalidArguments(format!(
                                "cache_enabled must be true or false, got '{}'",
                                value
                            )))
                        })?;
                        profile.cache_enabled = Some(enabled);
                    }
                    other => {
                        return Err(AppError::Cli(CliError::InvalidArguments(format!(
                            "Unknown configuration key '{}'",
                            other
                        ))));
                    }
                }

                config.set_profile(profile_name.clone(), profile);
                if config.default_profile.is_none() {
                    config.default_profile = Some(profile_name.clone());
                }
                config.save(self.config_path.clone())?;

                notify_success(&format!("Set {} for profile '{}'", key, profile_name));
                Ok(())
            }
        }
    }
}
