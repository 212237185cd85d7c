//! Authenticated API client.
//!
//! Wraps a [`Transport`] with the session credentials: the stored access
//! token is attached as a bearer credential, and a 401 starts exactly one
//! refresh-and-retry cycle.

use std::sync::Arc;

use serde::Serialize;
use shopfront_core::{CredentialStore, Credentials, RefreshResponse, SessionState};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::error::{FetchError, RefreshError};
use crate::request::{ApiRequest, ApiResponse, Authorization};
use crate::settings::ClientSettings;
use crate::transport::{HttpTransport, Transport};

/// Path of the token exchange endpoint.
const REFRESH_PATH: &str = "/refreshToken";

/// Body of the token exchange.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Where a request is in its lifecycle.
enum Phase {
    /// Attach the stored bearer token.
    Attach(ApiRequest),
    /// Send over the transport.
    Dispatch(ApiRequest),
    /// Exchange the refresh token, then dispatch once more.
    Refresh(ApiRequest),
}

// ============================================================================
// Auth Client
// ============================================================================

/// HTTP client that manages the bearer session.
///
/// Session changes are published on a watch channel; a refresh failure
/// publishes [`SessionState::LoginRequired`].
pub struct AuthClient {
    transport: Arc<dyn Transport>,
    credentials: Arc<dyn CredentialStore>,
    settings: ClientSettings,
    session: watch::Sender<SessionState>,
}

impl AuthClient {
    /// Creates a client over an arbitrary transport.
    pub fn new(
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialStore>,
        settings: ClientSettings,
    ) -> Self {
        let initial = if credentials.access_token().is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        };
        let (session, _) = watch::channel(initial);

        Self {
            transport,
            credentials,
            settings,
            session,
        }
    }

    /// Creates a client that talks HTTP to the configured API.
    pub fn http(
        settings: ClientSettings,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, FetchError> {
        let transport = HttpTransport::new(&settings)?;
        Ok(Self::new(Arc::new(transport), credentials, settings))
    }

    /// Client settings.
    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Current session state.
    pub fn session_state(&self) -> SessionState {
        *self.session.borrow()
    }

    /// Subscribes to session state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.session.subscribe()
    }

    /// Stores credentials from a successful login.
    pub fn sign_in(&self, credentials: &Credentials) -> Result<(), FetchError> {
        self.credentials.save(credentials)?;
        self.session.send_replace(SessionState::Authenticated);
        info!("Signed in");
        Ok(())
    }

    /// Removes stored credentials.
    pub fn sign_out(&self) -> Result<(), FetchError> {
        self.credentials.clear()?;
        self.session.send_replace(SessionState::Anonymous);
        info!("Signed out");
        Ok(())
    }

    /// Sends a request, recovering from one 401 via the refresh token.
    ///
    /// - Any non-401 response is returned unmodified, whatever its status.
    /// - Transport errors are returned unmodified and never retried.
    /// - On a 401 the refresh token is exchanged and the request is sent
    ///   once more with the new token; that second outcome is final.
    /// - If the exchange fails, credentials are cleared, the session moves
    ///   to [`SessionState::LoginRequired`] and [`FetchError::Refresh`] is
    ///   returned.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, FetchError> {
        let mut phase = Phase::Attach(request);

        loop {
            phase = match phase {
                Phase::Attach(mut request) => {
                    if request.refreshable {
                        if let Some(token) = self.credentials.access_token() {
                            request.authorization = Some(Authorization::Bearer(token));
                        }
                    }
                    Phase::Dispatch(request)
                }
                Phase::Dispatch(request) => {
                    let response = self.transport.send(&request).await?;
                    if response.is_unauthorized() && request.may_refresh() {
                        Phase::Refresh(request)
                    } else {
                        if response.is_unauthorized() {
                            debug!(retried = request.retried, "401 returned to caller");
                        }
                        return Ok(response);
                    }
                }
                Phase::Refresh(mut request) => {
                    // Set before the exchange so no path can refresh twice.
                    request.retried = true;
                    debug!("401 received, refreshing access token");

                    match self.refresh_access_token().await {
                        Ok(token) => {
                            request.authorization = Some(Authorization::Bearer(token));
                            Phase::Dispatch(request)
                        }
                        Err(err) => {
                            self.expire_session();
                            return Err(FetchError::Refresh(err));
                        }
                    }
                }
            };
        }
    }

    /// Exchanges the stored refresh token and persists the new access token.
    async fn refresh_access_token(&self) -> Result<String, RefreshError> {
        let refresh_token = self
            .credentials
            .refresh_token()
            .ok_or(RefreshError::MissingRefreshToken)?;

        let mut request = ApiRequest::post(REFRESH_PATH)
            .with_json(&RefreshRequest {
                refresh_token: &refresh_token,
            })
            .map_err(|e| RefreshError::InvalidResponse(e.to_string()))?;
        request.refreshable = false;

        let timeout = self.settings.refresh_timeout;
        let response = tokio::time::timeout(timeout, self.transport.send(&request))
            .await
            .map_err(|_| RefreshError::Timeout(timeout))?
            .map_err(|e| RefreshError::Transport(e.to_string()))?;

        if !response.is_success() {
            return Err(RefreshError::Rejected {
                status: response.status(),
            });
        }

        let body: RefreshResponse = response
            .json()
            .map_err(|e| RefreshError::InvalidResponse(e.to_string()))?;
        if body.access_token.is_empty() {
            return Err(RefreshError::InvalidResponse(
                "empty access token".to_string(),
            ));
        }

        self.credentials
            .update_access_token(&body.access_token)
            .map_err(|e| RefreshError::Storage(e.to_string()))?;

        info!("Access token refreshed");
        Ok(body.access_token)
    }

    /// Wipes credentials after a failed refresh and asks for a new login.
    fn expire_session(&self) {
        if let Err(e) = self.credentials.clear() {
            warn!(error = %e, "Failed to clear credentials after refresh failure");
        }
        self.session.send_replace(SessionState::LoginRequired);
        warn!("Session expired, login required");
    }
}

impl std::fmt::Debug for AuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthClient")
            .field("settings", &self.settings)
            .field("session", &self.session_state())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
