//! Mock transport for testing
//!
//! Replies are scripted per `(method, path)` route and served in order; the
//! last reply of a route repeats once the queue is down to one entry. Every
//! request is captured for assertions.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tokio::sync::Mutex;

use super::ApiTransport;
use super::request::{ApiRequest, ApiResponse};
use crate::error::{ApiError, Result};

/// A scripted reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Respond with a status and body.
    Respond { status: u16, body: String },
    /// Fail without a response.
    TransportFailure(String),
}

/// Reply with a JSON body.
pub fn reply(status: u16, body: Value) -> MockReply {
    MockReply::Respond {
        status,
        body: body.to_string(),
    }
}

/// Reply with an empty body.
pub fn reply_empty(status: u16) -> MockReply {
    MockReply::Respond {
        status,
        body: String::new(),
    }
}

/// Fail the request at the transport level.
pub fn transport_failure(message: &str) -> MockReply {
    MockReply::TransportFailure(message.to_string())
}

#[derive(Debug)]
struct Route {
    method: Method,
    path: String,
    replies: VecDeque<MockReply>,
}

/// Mock API transport.
///
/// # Example
/// ```ignore
/// let mock = MockTransport::new()
///     .on(Method::GET, "/v1/schedules", reply(200, json!({ "values": [] })))
///     .await;
/// ```
#[derive(Default, Clone)]
pub struct MockTransport {
    routes: Arc<Mutex<Vec<Route>>>,
    captured_requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl MockTransport {
    /// Create a mock with no routes; unrouted requests get a 404.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for `method` + `path`.
    pub async fn on(self, method: Method, path: impl Into<String>, reply: MockReply) -> Self {
        let path = path.into();
        {
            let mut routes = self.routes.lock().await;
            match routes
                .iter_mut()
                .find(|r| r.method == method && r.path == path)
            {
                Some(route) => route.replies.push_back(reply),
                None => routes.push(Route {
                    method,
                    path,
                    replies: VecDeque::from([reply]),
                }),
            }
        }
        self
    }

    /// All requests seen so far, in order.
    pub async fn captured_requests(&self) -> Vec<ApiRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Number of requests seen for `method` + `path`.
    pub async fn calls_to(&self, method: Method, path: &str) -> usize {
        self.captured_requests
            .lock()
            .await
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    async fn next_reply(&self, request: &ApiRequest) -> Option<MockReply> {
        let mut routes = self.routes.lock().await;
        let route = routes
            .iter_mut()
            .find(|r| r.method == request.method && r.path == request.path)?;

        if route.replies.len() > 1 {
            route.replies.pop_front()
        } else {
            route.replies.front().cloned()
        }
    }
}

#[async_trait]
impl ApiTransport for MockTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        self.captured_requests.lock().await.push(request.clone());

        match self.next_reply(request).await {
            Some(MockReply::Respond { status, body }) => Ok(ApiResponse { status, body }),
            Some(MockReply::TransportFailure(message)) => Err(ApiError::Transport(message).into()),
            None => Ok(ApiResponse::new(
                404,
                format!("no mock route for {} {}", request.method, request.path),
            )),
        }
    }
}
