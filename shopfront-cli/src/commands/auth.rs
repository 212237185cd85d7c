//! Account commands: login, logout, register, whoami, password changes.

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use shopfront_core::Registration;
use shopfront_store::Settings;
use tracing::warn;

use crate::context::connect;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Account email.
    #[arg(long, short)]
    pub email: String,

    /// Account password.
    #[arg(long, short)]
    pub password: String,
}

/// Arguments for the register command.
#[derive(Args)]
pub struct RegisterArgs {
    /// Account email.
    #[arg(long, short)]
    pub email: String,

    /// Account password.
    #[arg(long, short)]
    pub password: String,

    /// Display name.
    #[arg(long, short)]
    pub name: String,
}

impl RegisterArgs {
    /// The registration payload.
    pub fn to_registration(&self) -> Registration {
        Registration {
            email: self.email.clone(),
            password: self.password.clone(),
            name: self.name.clone(),
        }
    }
}

/// Arguments for the password command.
#[derive(Args)]
pub struct PasswordArgs {
    /// Current password.
    #[arg(long)]
    pub old: String,

    /// New password.
    #[arg(long)]
    pub new: String,
}

/// Arguments for the forgot-password command.
#[derive(Args)]
pub struct ForgotPasswordArgs {
    /// Step to run.
    #[command(subcommand)]
    pub action: ForgotPasswordAction,
}

/// Password reset steps.
#[derive(Subcommand)]
pub enum ForgotPasswordAction {
    /// Email a one-time password.
    Send {
        /// Account email.
        #[arg(long, short)]
        email: String,
    },

    /// Set a new password using the one-time password.
    Verify {
        /// Account email.
        #[arg(long, short)]
        email: String,

        /// One-time password from the email.
        #[arg(long)]
        otp: String,

        /// New password.
        #[arg(long)]
        new_password: String,
    },
}

/// Signs in and stores the session tokens.
pub async fn login(args: &LoginArgs, cli: &Cli, settings: &Settings) -> Result<()> {
    let shop = connect(settings)?;
    let user = shop.auth().login(&args.email, &args.password).await?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("Signed in as {}", formatter.format_user(&user));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&user)?);
        }
    }
    Ok(())
}

/// Signs out. Local credentials are removed even if the server call fails.
pub async fn logout(cli: &Cli, settings: &Settings) -> Result<()> {
    let shop = connect(settings)?;
    if let Err(e) = shop.auth().logout().await {
        warn!(error = %e, "Server logout failed; local session removed anyway");
    }
    if !cli.quiet {
        println!("Signed out");
    }
    Ok(())
}

/// Creates an account.
pub async fn register(args: &RegisterArgs, cli: &Cli, settings: &Settings) -> Result<()> {
    let shop = connect(settings)?;
    shop.auth().register(&args.to_registration()).await?;
    if !cli.quiet {
        println!("Account created for {}. Run `shopfront login` to sign in.", args.email);
    }
    Ok(())
}

/// Shows the signed-in user.
pub async fn whoami(cli: &Cli, settings: &Settings) -> Result<()> {
    let shop = connect(settings)?;
    let user = shop.auth().current_user().await?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_user(&user));
            println!("Session: {}", shop.client().session_state());
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&user)?);
        }
    }
    Ok(())
}

/// Changes the password of the signed-in user.
pub async fn change_password(args: &PasswordArgs, cli: &Cli, settings: &Settings) -> Result<()> {
    if args.old == args.new {
        bail!("the new password must differ from the current one");
    }
    let shop = connect(settings)?;
    shop.auth().update_password(&args.old, &args.new).await?;
    if !cli.quiet {
        println!("Password updated");
    }
    Ok(())
}

/// Runs a password reset step.
pub async fn forgot_password(
    args: &ForgotPasswordArgs,
    cli: &Cli,
    settings: &Settings,
) -> Result<()> {
    let shop = connect(settings)?;
    match &args.action {
        ForgotPasswordAction::Send { email } => {
            shop.auth().send_otp(email).await?;
            if !cli.quiet {
                println!("A one-time password was sent to {email}");
            }
        }
        ForgotPasswordAction::Verify {
            email,
            otp,
            new_password,
        } => {
            shop.auth().verify_otp(email, otp, new_password).await?;
            if !cli.quiet {
                println!("Password reset. Run `shopfront login` to sign in.");
            }
        }
    }
    Ok(())
}
