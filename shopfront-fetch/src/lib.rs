// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Shopfront Fetch
//!
//! HTTP plumbing for the Shopfront client.
//!
//! ## Layers
//!
//! - [`transport::Transport`] - Sends one [`ApiRequest`] and returns the raw
//!   [`ApiResponse`]. [`transport::HttpTransport`] is the `reqwest` backed
//!   implementation.
//! - [`client::AuthClient`] - Attaches the bearer token from the
//!   [`CredentialStore`](shopfront_core::CredentialStore) and runs the
//!   refresh-and-retry cycle on a 401.
//!
//! ## Refresh-and-retry
//!
//! Each request moves through `Attach -> Dispatch -> [Refresh -> Dispatch] -> Return`.
//! The `retried` flag on [`ApiRequest`] is set before the refresh call, so a
//! request is refreshed at most once no matter what the backend answers.
//!
//! ## Example
//!
//! ```ignore
//! use shopfront_fetch::{ApiRequest, AuthClient, ClientSettings};
//!
//! let client = AuthClient::http(ClientSettings::default(), credentials)?;
//! let response = client.execute(ApiRequest::get("/user")).await?;
//! ```

pub mod client;
pub mod error;
pub mod request;
pub mod settings;
pub mod transport;

// Errors
pub use error::{FetchError, RefreshError};

// Client
pub use client::AuthClient;
pub use request::{ApiRequest, ApiResponse, Authorization};
pub use settings::ClientSettings;
pub use transport::{HttpTransport, Transport};

// Re-exported so callers don't need a direct reqwest dependency
pub use reqwest::{Method, StatusCode};
