//! Session credentials and session state.

use serde::{Deserialize, Serialize};

use super::account::LoginResponse;

/// Access/refresh token pair persisted between runs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Bearer token attached to every request.
    pub access_token: String,
    /// Token exchanged for a new access token on 401.
    pub refresh_token: String,
}

impl Credentials {
    /// Creates a credential pair.
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

impl From<&LoginResponse> for Credentials {
    fn from(login: &LoginResponse) -> Self {
        Self::new(login.access_token.clone(), login.refresh_token.clone())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// Whether the client currently holds a usable session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No credentials are stored.
    #[default]
    Anonymous,
    /// Credentials are stored and were last known good.
    Authenticated,
    /// A refresh failed; credentials were wiped and the user must sign in.
    LoginRequired,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anonymous => write!(f, "signed out"),
            Self::Authenticated => write!(f, "signed in"),
            Self::LoginRequired => write!(f, "login required"),
        }
    }
}
