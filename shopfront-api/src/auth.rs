//! Account endpoints: registration, login/logout, profile and password reset.

use serde::Serialize;
use shopfront_core::{Credentials, LoginResponse, Registration, User};
use shopfront_fetch::{ApiRequest, AuthClient};
use tracing::{info, instrument, warn};

use crate::error::ApiError;
use crate::response::{send_json, send_unit};

// ============================================================================
// Endpoints
// ============================================================================

const USER_ENDPOINT: &str = "/user";
const LOGIN_ENDPOINT: &str = "/login";
const LOGOUT_ENDPOINT: &str = "/logout";
const UPDATE_PASSWORD_ENDPOINT: &str = "/update-password";
const SEND_OTP_ENDPOINT: &str = "/send-otp";
const VERIFY_OTP_ENDPOINT: &str = "/verify-otp";

// ============================================================================
// Request Bodies
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordChange<'a> {
    old_password: &'a str,
    new_password: &'a str,
}

#[derive(Serialize)]
struct OtpRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OtpVerification<'a> {
    email: &'a str,
    otp: &'a str,
    new_password: &'a str,
}

// ============================================================================
// Auth API
// ============================================================================

/// Account endpoints.
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    client: &'a AuthClient,
}

impl<'a> AuthApi<'a> {
    /// Creates the endpoint group over `client`.
    pub fn new(client: &'a AuthClient) -> Self {
        Self { client }
    }

    /// Creates a customer account.
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        let request = ApiRequest::post(USER_ENDPOINT).with_json(registration)?;
        send_unit(self.client, request).await?;
        info!("Account registered");
        Ok(())
    }

    /// Signs in with email and password and stores the returned tokens.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let request = ApiRequest::get(LOGIN_ENDPOINT).with_basic_auth(email, password);
        let login: LoginResponse = send_json(self.client, request).await?;

        self.client.sign_in(&Credentials::from(&login))?;
        info!(user = %login.user.email, "Logged in");
        Ok(login.user)
    }

    /// Signs out remotely, then clears local credentials.
    ///
    /// Local credentials are cleared even if the remote call fails.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ApiError> {
        let remote = send_unit(self.client, ApiRequest::post(LOGOUT_ENDPOINT)).await;
        if let Err(e) = &remote {
            warn!(error = %e, "Remote logout failed, clearing local session anyway");
        }
        self.client.sign_out()?;
        remote
    }

    /// Fetches the signed-in user.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<User, ApiError> {
        send_json(self.client, ApiRequest::get(USER_ENDPOINT)).await
    }

    /// Changes the password of the signed-in user.
    #[instrument(skip_all)]
    pub async fn update_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        if new_password.is_empty() {
            return Err(ApiError::InvalidInput("new password is empty".to_string()));
        }
        let request = ApiRequest::patch(UPDATE_PASSWORD_ENDPOINT).with_json(&PasswordChange {
            old_password,
            new_password,
        })?;
        send_unit(self.client, request).await
    }

    /// Emails a one-time password for a password reset.
    #[instrument(skip(self))]
    pub async fn send_otp(&self, email: &str) -> Result<(), ApiError> {
        let request = ApiRequest::post(SEND_OTP_ENDPOINT).with_json(&OtpRequest { email })?;
        send_unit(self.client, request).await
    }

    /// Resets the password using the emailed one-time password.
    #[instrument(skip(self, otp, new_password))]
    pub async fn verify_otp(
        &self,
        email: &str,
        otp: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        let request = ApiRequest::post(VERIFY_OTP_ENDPOINT).with_json(&OtpVerification {
            email,
            otp,
            new_password,
        })?;
        send_unit(self.client, request).await
    }
}

// ============================================================================
// Tests
// ============================================================================
