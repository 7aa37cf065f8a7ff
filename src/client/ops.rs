//! HTTP transport for the teams and operations APIs

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::trace;
use reqwest::Client as HttpClient;
use reqwest::header::{ACCEPT, HeaderValue};

use super::ApiTransport;
use super::request::{ApiRequest, ApiResponse};
use crate::config::Config;
use crate::error::{ApiError, ConfigError, Result};

/// Client-side request quota (requests per second)
const RATE_LIMIT_PER_SECOND: u32 = 10;

/// Request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// reqwest-backed [`ApiTransport`] using basic authentication.
pub struct OpsClient {
    http: HttpClient,
    base_url: String,
    base_path: String,
    email: String,
    api_token: String,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl OpsClient {
    /// Create a new client for `base_url` (scheme, host and an optional path prefix).
    pub fn new(
        base_url: impl Into<String>,
        email: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let quota = Quota::per_second(
            NonZeroU32::new(RATE_LIMIT_PER_SECOND).unwrap_or(NonZeroU32::MIN),
        );

        let base_url = base_url.into().trim_end_matches('/').to_string();
        let base_path = reqwest::Url::parse(&base_url)
            .map(|url| url.path().trim_end_matches('/').to_string())
            .unwrap_or_default();

        Ok(Self {
            http,
            base_url,
            base_path,
            email: email.into(),
            api_token: api_token.into(),
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        })
    }

    /// Create a client from validated configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate_auth()?;
        let (Some(email), Some(token)) = (&config.email, &config.api_token) else {
            return Err(ConfigError::MissingCredentials.into());
        };
        Self::new(config.api_host(), email.clone(), token.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a request path.
    ///
    /// Paths taken from next-page links already carry the host's path prefix,
    /// so it is not prepended a second time.
    fn url_for(&self, path: &str) -> String {
        let relative = if self.base_path.is_empty() {
            path
        } else {
            path.strip_prefix(self.base_path.as_str())
                .filter(|rest| rest.is_empty() || rest.starts_with('/'))
                .unwrap_or(path)
        };
        format!("{}{}", self.base_url, relative)
    }
}

#[async_trait]
impl ApiTransport for OpsClient {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        self.rate_limiter.until_ready().await;

        let url = self.url_for(&request.path);
        trace!("{} {}", request.method, url);

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .basic_auth(&self.email, Some(&self.api_token))
            .header(ACCEPT, HeaderValue::from_static("application/json"));

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(ApiError::from)?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("Failed to read response: {}", e)))?;

        trace!("{} {} -> {}", request.method, url, status);
        Ok(ApiResponse { status, body })
    }
}
