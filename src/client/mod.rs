//! Operations platform API client
//!
//! Every remote call goes through [`ApiTransport::send`]. Higher layers only
//! see [`ApiRequest`]/[`ApiResponse`] values, so they can be exercised against
//! the scripted mock transport in tests.

use async_trait::async_trait;
use log::error;
use serde::de::DeserializeOwned;

use crate::error::Result;

#[cfg(test)]
pub mod fixtures;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod ops;
pub mod pagination;
pub mod request;
pub mod routes;

#[cfg(test)]
pub use mock::MockTransport;
pub use ops::OpsClient;
pub use pagination::{Continuation, Page, Paged, Paginator};
pub use request::{ApiRequest, ApiResponse};

/// Transport collaborator used for every remote call.
///
/// An `Err` means no response was obtained (transport failure). Any status
/// code, including non-2xx, comes back as `Ok`.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse>;
}

#[async_trait]
impl<T: ApiTransport + ?Sized> ApiTransport for std::sync::Arc<T> {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        (**self).send(request).await
    }
}

/// Send a request and require a 2xx status.
pub async fn execute<C: ApiTransport + ?Sized>(
    client: &C,
    request: &ApiRequest,
    action: &str,
) -> Result<ApiResponse> {
    let response = client.send(request).await.inspect_err(|e| {
        error!("Client Error. Unable to {}, got error: {}", action, e);
    })?;

    response.error_for_status(action).inspect_err(|e| {
        error!("Client Error. {}", e);
    })
}

/// Send a request, require a 2xx status and decode the JSON body.
pub async fn execute_json<C: ApiTransport + ?Sized, T: DeserializeOwned>(
    client: &C,
    request: &ApiRequest,
    action: &str,
) -> Result<T> {
    execute(client, request, action).await?.parse(action)
}
