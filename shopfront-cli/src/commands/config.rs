//! Config command - manage configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use shopfront_store::{
    API_URL_ENV, Settings, SettingsStore, default_cart_path, default_config_dir,
    default_credentials_path, default_settings_path,
};
use tracing::info;

use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    /// Config action.
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration.
    Show,

    /// Show configuration and data paths.
    Path,

    /// Save the API host.
    SetApiUrl {
        /// Host URL, e.g. `https://shop.example.com`.
        url: String,
    },

    /// Reset to defaults.
    Reset,
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli, settings: &Settings) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli, settings),
        ConfigAction::Path => show_paths(cli),
        ConfigAction::SetApiUrl { url } => set_api_url(url).await,
        ConfigAction::Reset => reset_config().await,
    }
}

fn show_config(cli: &Cli, settings: &Settings) -> Result<()> {
    match cli.format {
        OutputFormat::Text => {
            let client = settings.to_client_settings();
            println!("Shopfront Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!("API:              {}", client.api_url());
            println!("Request timeout:  {}s", settings.request_timeout_secs);
            println!("Refresh timeout:  {}s", settings.refresh_timeout_secs);
            println!("Log level:        {}", settings.log_level);
            if std::env::var_os(API_URL_ENV).is_some() {
                println!();
                println!("(API host overridden by {API_URL_ENV})");
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(settings)?);
        }
    }

    Ok(())
}

fn show_paths(cli: &Cli) -> Result<()> {
    let config_dir = default_config_dir();
    let settings_path = default_settings_path();
    let cart_path = default_cart_path();
    let credentials_path = default_credentials_path();

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config dir:       {}", config_dir.display());
            println!("Settings file:    {}", settings_path.display());
            println!("Cart file:        {}", cart_path.display());
            println!("Credentials file: {}", credentials_path.display());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_dir": config_dir.display().to_string(),
                "settings_file": settings_path.display().to_string(),
                "cart_file": cart_path.display().to_string(),
                "credentials_file": credentials_path.display().to_string(),
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(())
}

async fn set_api_url(url: &str) -> Result<()> {
    let store = SettingsStore::load_default().await;
    store
        .update(|s| s.api_base_url = url.trim().trim_end_matches('/').to_string())
        .await;
    store.save().await?;

    info!(url, "API host updated");
    println!("API host set to: {url}");

    Ok(())
}

async fn reset_config() -> Result<()> {
    let path = default_settings_path();

    if path.exists() {
        tokio::fs::remove_file(&path).await?;
        info!(path = %path.display(), "Settings reset");
        println!("Configuration reset to defaults");
    } else {
        println!("No configuration file to reset");
    }

    Ok(())
}
