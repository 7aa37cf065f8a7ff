//! Request and response values exchanged with an [`ApiTransport`](super::ApiTransport)

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, Result};

/// A single API call, independent of the HTTP stack that carries it.
///
/// `path` is relative to the API host; the transport prepends it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Create a request with no query parameters and no body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Attach a JSON body.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Look up the first value of a query parameter.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Carry a pagination cursor into the request.
    ///
    /// JSON-object bodies get an `after` field; bodiless requests get an
    /// `after` query parameter instead.
    pub fn set_after(&mut self, cursor: &str) {
        match self.body.as_mut() {
            Some(Value::Object(map)) => {
                map.insert("after".to_string(), Value::String(cursor.to_string()));
            }
            _ => {
                self.query.retain(|(k, _)| k != "after");
                self.query.push(("after".to_string(), cursor.to_string()));
            }
        }
    }
}

/// Raw response from the remote system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The response body, if there is anything in it.
    pub fn error_body(&self) -> Option<String> {
        let trimmed = self.body.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Turn a non-2xx response into [`ApiError::Remote`].
    pub fn error_for_status(self, action: &str) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }

        Err(ApiError::Remote {
            action: action.to_string(),
            status: self.status,
            body: self.error_body(),
        }
        .into())
    }

    /// Decode the body as JSON.
    pub fn parse<T: DeserializeOwned>(&self, action: &str) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse {} response: {}", action, e)).into()
        })
    }

    /// Decode the body as JSON, treating an empty body as `T::default()`.
    pub fn parse_or_default<T: DeserializeOwned + Default>(&self, action: &str) -> Result<T> {
        if self.body.trim().is_empty() {
            return Ok(T::default());
        }
        self.parse(action)
    }
}
