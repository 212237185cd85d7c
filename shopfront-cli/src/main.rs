// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Shopfront CLI - browse the catalog, manage the cart and the account.
//!
//! # Examples
//!
//! ```bash
//! # Browse products
//! shopfront products --search mug
//!
//! # Build a cart (kept locally between runs)
//! shopfront cart add p1 -n 2
//! shopfront cart set p1 5
//! shopfront cart
//!
//! # Sign in and push the cart to the server
//! shopfront login --email ada@example.com --password secret
//! shopfront cart checkout
//!
//! # JSON output
//! shopfront cart --format json --pretty
//! ```

mod commands;
mod context;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use shopfront_api::ApiError;
use shopfront_fetch::{FetchError, RefreshError};
use shopfront_store::LogLevel;
use tracing::warn;
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*, reload};

use commands::{admin, auth, cart, config, products};

// ============================================================================
// CLI Definition
// ============================================================================

/// Shopfront CLI - storefront client.
#[derive(Parser)]
#[command(name = "shopfront")]
#[command(about = "Storefront client: catalog, cart and account")]
#[command(long_about = r"
Shopfront talks to a storefront API. The cart is stored locally and
survives restarts; everything else is fetched from the server.

Examples:
  shopfront products                 # Browse the catalog
  shopfront cart add p1 -n 2         # Add two of product p1
  shopfront cart                     # Show the cart with totals
  shopfront login --email E --password P
  shopfront cart checkout            # Push the cart to the server
")]
#[command(version)]
#[command(author = "Shopfront Contributors")]
pub struct Cli {
    /// Subcommand to run. If none, shows the cart.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// API host, overriding settings and `SHOPFRONT_API_URL`.
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Browse the product catalog.
    #[command(visible_alias = "p")]
    Products(products::ProductsArgs),

    /// Manage the local cart (default if no command specified).
    #[command(visible_alias = "c")]
    Cart(cart::CartArgs),

    /// Sign in.
    Login(auth::LoginArgs),

    /// Sign out and forget stored credentials.
    Logout,

    /// Create an account.
    Register(auth::RegisterArgs),

    /// Show the signed-in user.
    Whoami,

    /// Change the password of the signed-in user.
    Password(auth::PasswordArgs),

    /// Reset a forgotten password with an emailed one-time password.
    ForgotPassword(auth::ForgotPasswordArgs),

    /// Admin operations on products, categories and users.
    Admin(admin::AdminArgs),

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// The session ended; the user has to sign in again.
    LoginRequired = 2,
}

impl ExitCode {
    /// Picks the exit code for a failed command.
    fn for_error(err: &anyhow::Error) -> Self {
        let login_required = err.chain().any(|cause| {
            cause
                .downcast_ref::<ApiError>()
                .is_some_and(ApiError::is_login_required)
                || cause
                    .downcast_ref::<FetchError>()
                    .is_some_and(FetchError::is_login_required)
                || cause.is::<RefreshError>()
        });
        if login_required {
            ExitCode::LoginRequired
        } else {
            ExitCode::Error
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

type FilterHandle = reload::Handle<EnvFilter, Registry>;

fn log_directives(verbose: bool, level: LogLevel) -> String {
    if verbose {
        "shopfront=debug,info".to_string()
    } else {
        format!("shopfront={level}")
    }
}

/// Installs the subscriber from the command-line flags alone.
///
/// Runs before anything else so that settings loading can log.
fn setup_logging(verbose: bool, quiet: bool) -> Option<FilterHandle> {
    if quiet {
        return None; // No logging in quiet mode
    }

    let directives = log_directives(verbose, LogLevel::default());
    let (filter, handle) = reload::Layer::new(EnvFilter::new(directives));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
    Some(handle)
}

/// Switches to the saved log level; `--verbose` keeps precedence.
fn apply_log_level(handle: Option<&FilterHandle>, verbose: bool, level: LogLevel) {
    let Some(handle) = handle else {
        return;
    };
    if verbose {
        return;
    }
    if let Err(e) = handle.reload(EnvFilter::new(log_directives(false, level))) {
        warn!(error = %e, "Failed to apply saved log level");
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_handle = setup_logging(cli.verbose, cli.quiet);
    let settings = context::load_settings(&cli).await;
    apply_log_level(log_handle.as_ref(), cli.verbose, settings.log_level);

    let result = match &cli.command {
        Some(Commands::Products(args)) => products::run(args, &cli, &settings).await,
        Some(Commands::Cart(args)) => cart::run(args, &cli, &settings).await,
        Some(Commands::Login(args)) => auth::login(args, &cli, &settings).await,
        Some(Commands::Logout) => auth::logout(&cli, &settings).await,
        Some(Commands::Register(args)) => auth::register(args, &cli, &settings).await,
        Some(Commands::Whoami) => auth::whoami(&cli, &settings).await,
        Some(Commands::Password(args)) => auth::change_password(args, &cli, &settings).await,
        Some(Commands::ForgotPassword(args)) => auth::forgot_password(args, &cli, &settings).await,
        Some(Commands::Admin(args)) => admin::run(args, &cli, &settings).await,
        Some(Commands::Config(args)) => config::run(args, &cli, &settings).await,
        None => cart::run(&cart::CartArgs::default(), &cli, &settings).await,
    };

    let code = match result {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            let code = ExitCode::for_error(&e);
            if !cli.quiet {
                eprintln!("Error: {e:#}");
                if code == ExitCode::LoginRequired {
                    eprintln!("Your session has ended. Run `shopfront login` to sign in again.");
                }
            }
            code
        }
    };

    std::process::exit(code as i32);
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_fetch::StatusCode;

    #[test]
    fn test_cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "shopfront",
            "cart",
            "add",
            "p1",
            "-n",
            "3",
            "--format",
            "json",
            "--api-url",
            "https://shop.test",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.api_url.as_deref(), Some("https://shop.test"));
        assert!(matches!(cli.command, Some(Commands::Cart(_))));
    }

    #[test]
    fn test_cart_set_accepts_negative_quantity() {
        let cli = Cli::try_parse_from(["shopfront", "cart", "set", "p1", "-1"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Cart(_))));
    }

    #[test]
    fn test_log_directives() {
        assert_eq!(log_directives(false, LogLevel::default()), "shopfront=warn");
        assert_eq!(log_directives(false, LogLevel::Debug), "shopfront=debug");
        assert_eq!(log_directives(true, LogLevel::Error), "shopfront=debug,info");
    }

    #[test]
    fn test_refresh_failure_maps_to_login_required() {
        let err = anyhow::Error::new(ApiError::Fetch(FetchError::Refresh(
            RefreshError::MissingRefreshToken,
        )))
        .context("checkout stopped at p1");
        assert_eq!(ExitCode::for_error(&err), ExitCode::LoginRequired);
    }

    #[test]
    fn test_other_errors_map_to_error() {
        let err = anyhow::Error::new(ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "boom".into(),
        });
        assert_eq!(ExitCode::for_error(&err), ExitCode::Error);
        assert_eq!(ExitCode::for_error(&anyhow::anyhow!("plain")), ExitCode::Error);
    }
}
