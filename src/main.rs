use clap::Parser;
use gestock_cli::cli::dispatcher::Dispatcher;
use gestock_cli::cli::main_types::Cli;
use gestock_cli::storage::config::{Config, Profile};
use gestock_cli::storage::credentials::Credentials;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();

    // Load Config
    let config_path = cli
        .config_dir
        .as_ref()
        .map(|dir| PathBuf::from(dir).join("config.toml"));

    let mut config = match Config::load(config_path.clone()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error loading config: {}", err);
            std::process::exit(1);
        }
    };

    // Determine the profile to use
    let profile_name = cli
        .profile
        .or(config.default_profile.clone())
        .unwrap_or_else(|| "default".to_string());

    // Create a default profile if it doesn't exist
    if config.get_profile(&profile_name).is_none() {
        log::debug!("Creating default profile: {}", profile_name);

        let default_profile = Profile {
            api_url: "http://localhost:8080".to_string(),
            email: None,
            timeout_seconds: None,
            cache_enabled: None,
        };

        config.set_profile(profile_name.clone(), default_profile);

        if config.default_profile.is_none() {
            config.default_profile = Some(profile_name.clone());
        }

        if let Err(err) = config.save(config_path.clone()) {
            log::warn!("Failed to save config: {}", err);
        }
    }

    log::debug!("Using profile: {}", profile_name);

    // Load Credentials
    let credentials = match Credentials::load(&profile_name) {
        Ok(creds) => creds,
        Err(err) => {
            eprintln!("Error loading credentials: {}", err);
            Credentials::new(profile_name.clone())
        }
    };

    let dispatcher = Dispatcher::new(config, config_path, credentials);

    if let Err(e) = dispatcher.dispatch(cli.command).await {
        eprintln!("Error: {}", e.display_friendly());
        if let Some(hint) = e.troubleshooting_hint() {
            eprintln!("Hint: {}", hint);
        }
        std::process::exit(1);
    }

    Ok(())
}
