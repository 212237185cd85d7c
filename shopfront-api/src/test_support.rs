//! Scripted transport shared by the endpoint tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use shopfront_core::{Credentials, MemoryCredentialStore};
use shopfront_fetch::{
    ApiRequest, ApiResponse, AuthClient, ClientSettings, FetchError, StatusCode, Transport,
};

use crate::ShopApi;

/// Replays `(status, body)` pairs and records requests.
#[derive(Default)]
pub(crate) struct FakeServer {
    replies: Mutex<VecDeque<(StatusCode, Option<Value>)>>,
    seen: Mutex<Vec<ApiRequest>>,
}

impl FakeServer {
    pub(crate) fn new(replies: Vec<(StatusCode, Option<Value>)>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            seen: Mutex::default(),
        })
    }

    pub(crate) fn seen(&self) -> Vec<ApiRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub(crate) fn last(&self) -> ApiRequest {
        self.seen().pop().expect("no request sent")
    }
}

#[async_trait]
impl Transport for FakeServer {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, FetchError> {
        self.seen.lock().unwrap().push(request.clone());
        let (status, body) = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected request");
        Ok(match body {
            Some(body) => ApiResponse::json_body(status, &body),
            None => ApiResponse::empty(status),
        })
    }
}

/// Builds a `ShopApi` over a fake server, optionally signed in.
pub(crate) fn shop(
    server: &Arc<FakeServer>,
    signed_in: bool,
) -> (ShopApi, MemoryCredentialStore) {
    let store = if signed_in {
        MemoryCredentialStore::with_credentials(Credentials::new("access", "refresh"))
    } else {
        MemoryCredentialStore::new()
    };
    let client = AuthClient::new(
        server.clone(),
        Arc::new(store.clone()),
        ClientSettings::default(),
    );
    (ShopApi::new(Arc::new(client)), store)
}
