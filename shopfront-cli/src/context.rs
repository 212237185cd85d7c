//! Wiring shared by the commands: settings, API client and the local cart.

use std::sync::Arc;

use anyhow::{Context, Result};
use shopfront_api::ShopApi;
use shopfront_fetch::AuthClient;
use shopfront_store::{
    CartStore, FileCartPersistence, FileCredentialStore, Settings, SettingsStore,
};
use tracing::debug;

use crate::Cli;

/// Effective settings: file, then `SHOPFRONT_API_URL`, then `--api-url`.
pub async fn load_settings(cli: &Cli) -> Settings {
    SettingsStore::load_default()
        .await
        .get()
        .await
        .with_env_override()
        .with_api_url_override(cli.api_url.as_deref())
}

/// Builds the API client over the stored credentials.
pub fn connect(settings: &Settings) -> Result<ShopApi> {
    settings.validate()?;
    let credentials = FileCredentialStore::default_location();
    let client = AuthClient::http(settings.to_client_settings(), Arc::new(credentials))
        .context("failed to build HTTP client")?;
    debug!(
        api = %client.settings().api_url(),
        session = %client.session_state(),
        "API client ready"
    );
    Ok(ShopApi::new(Arc::new(client)))
}

/// Opens the cart saved under the data directory.
pub fn open_cart() -> CartStore {
    CartStore::load(Box::new(FileCartPersistence::default_location()))
}
