//! Shared request helpers for the endpoint groups.

use serde::de::DeserializeOwned;
use shopfront_fetch::{ApiRequest, ApiResponse, AuthClient};

use crate::error::ApiError;

/// Sends a request and turns non-success statuses into [`ApiError::Status`].
pub(crate) async fn send(client: &AuthClient, request: ApiRequest) -> Result<ApiResponse, ApiError> {
    let response = client.execute(request).await?;
    if response.is_success() {
        return Ok(response);
    }

    let status = response.status();
    let message = response.error_message().unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string()
    });
    Err(ApiError::Status { status, message })
}

/// Sends a request and decodes a JSON body.
pub(crate) async fn send_json<T: DeserializeOwned>(
    client: &AuthClient,
    request: ApiRequest,
) -> Result<T, ApiError> {
    let response = send(client, request).await?;
    Ok(response.json()?)
}

/// Sends a request whose body is ignored.
pub(crate) async fn send_unit(client: &AuthClient, request: ApiRequest) -> Result<(), ApiError> {
    send(client, request).await.map(|_| ())
}
