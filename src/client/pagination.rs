//! Pagination over collection endpoints
//!
//! The platform uses two continuation styles:
//!
//! - **Link**: each page carries the URL of the next page. Its path and query
//!   string are re-issued verbatim; an empty or missing link ends the walk.
//! - **Cursor**: each page carries `{hasNextPage, endCursor}`. The cursor goes
//!   into the next request's `after` parameter; `hasNextPage = false` ends it.
//!
//! Response types pick their style by implementing [`Paged`], so the call site
//! selects the strategy through the type it decodes into. One loop in
//! [`Paginator`] drives both.
//!
//! A failed page aborts the whole walk: callers get the error and never a
//! partial list.

use std::collections::HashSet;
use std::ops::ControlFlow;

use log::{debug, trace};
use reqwest::Url;
use serde::de::DeserializeOwned;

use super::request::ApiRequest;
use super::{ApiTransport, execute};
use crate::error::{ApiError, Result};

/// Upper bound on pages fetched by a single walk.
pub const MAX_PAGES: usize = 1000;

/// Base used to resolve relative next links.
const LINK_BASE: &str = "http://localhost/";

/// How a page says whether (and where) the collection continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Continuation {
    /// Link-style: URL of the next page, `None` or empty when exhausted.
    Next(Option<String>),

    /// Cursor-style continuation flag plus opaque cursor.
    Cursor {
        has_next_page: bool,
        end_cursor: Option<String>,
    },
}

/// One decoded page.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub continuation: Continuation,
}

/// A response envelope that can be split into items and a continuation.
pub trait Paged: DeserializeOwned {
    type Item;

    fn into_page(self) -> Page<Self::Item>;
}

/// Sequential page walker over an [`ApiTransport`].
pub struct Paginator<'a, C: ?Sized> {
    client: &'a C,
    max_pages: usize,
}

impl<'a, C: ApiTransport + ?Sized> Paginator<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self {
            client,
            max_pages: MAX_PAGES,
        }
    }

    /// Override the page cap.
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    /// Fetch every page and return all items in page order.
    pub async fn fetch_all<R: Paged>(&self, request: ApiRequest, action: &str) -> Result<Vec<R::Item>> {
        let mut items = Vec::new();
        self.walk::<R, _>(request, action, |page| {
            items.extend(page);
            ControlFlow::Continue(())
        })
        .await?;
        Ok(items)
    }

    /// Walk pages until an item matches `predicate`; later pages are not fetched.
    pub async fn find_first<R, P>(
        &self,
        request: ApiRequest,
        action: &str,
        mut predicate: P,
    ) -> Result<Option<R::Item>>
    where
        R: Paged,
        P: FnMut(&R::Item) -> bool,
    {
        let mut found = None;
        self.walk::<R, _>(request, action, |page| {
            match page.into_iter().find(|item| predicate(item)) {
                Some(item) => {
                    found = Some(item);
                    ControlFlow::Break(())
                }
                None => ControlFlow::Continue(()),
            }
        })
        .await?;
        Ok(found)
    }

    /// Fetch only the first page, ignoring any continuation.
    pub async fn first_page<R: Paged>(&self, request: ApiRequest, action: &str) -> Result<Vec<R::Item>> {
        let response = execute(self.client, &request, action).await?;
        Ok(response.parse::<R>(action)?.into_page().items)
    }

    async fn walk<R, F>(&self, mut request: ApiRequest, action: &str, mut visit: F) -> Result<()>
    where
        R: Paged,
        F: FnMut(Vec<R::Item>) -> ControlFlow<()>,
    {
        let mut seen = HashSet::new();

        for round in 1..=self.max_pages {
            let response = execute(self.client, &request, action).await?;
            let page = response.parse::<R>(action)?.into_page();
            debug!(
                "Fetched page {} to {} ({} items)",
                round,
                action,
                page.items.len()
            );

            if visit(page.items).is_break() {
                trace!("Stopped paging to {} after a match", action);
                return Ok(());
            }

            match advance(&mut request, page.continuation)? {
                None => return Ok(()),
                Some(token) => {
                    if !seen.insert(token.clone()) {
                        return Err(ApiError::InvalidResponse(format!(
                            "pagination to {} repeated continuation {:?}",
                            action, token
                        ))
                        .into());
                    }
                }
            }
        }

        Err(ApiError::InvalidResponse(format!(
            "pagination to {} did not finish within {} pages",
            action, self.max_pages
        ))
        .into())
    }
}

/// Point `request` at the next page. Returns the continuation token used, or
/// `None` when the collection is exhausted.
fn advance(request: &mut ApiRequest, continuation: Continuation) -> Result<Option<String>> {
    match continuation {
        Continuation::Next(None) => Ok(None),
        Continuation::Next(Some(next)) if next.trim().is_empty() => Ok(None),
        Continuation::Next(Some(next)) => {
            let url = resolve_link(&next)?;
            request.path = url.path().to_string();
            request.query = url
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
            Ok(Some(next))
        }
        Continuation::Cursor {
            has_next_page: false,
            ..
        } => Ok(None),
        Continuation::Cursor {
            has_next_page: true,
            end_cursor: Some(cursor),
        } if !cursor.is_empty() => {
            request.set_after(&cursor);
            Ok(Some(cursor))
        }
        Continuation::Cursor { .. } => Err(ApiError::InvalidResponse(
            "hasNextPage is set but endCursor is missing".to_string(),
        )
        .into()),
    }
}

fn resolve_link(next: &str) -> Result<Url> {
    Url::parse(next)
        .or_else(|_| Url::parse(LINK_BASE).and_then(|base| base.join(next)))
        .map_err(|e| ApiError::InvalidResponse(format!("invalid next link {:?}: {}", next, e)).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    use crate::client::mock::{MockTransport, reply, transport_failure};
    use crate::error::Error;

    #[derive(Debug, Deserialize)]
    struct LinkPage {
        values: Vec<String>,
        #[serde(default)]
        next: Option<String>,
    }

    impl Paged for LinkPage {
        type Item = String;

        fn into_page(self) -> Page<String> {
            Page {
                items: self.values,
                continuation: Continuation::Next(self.next),
            }
        }
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct CursorPage {
        results: Vec<String>,
        has_next_page: bool,
        #[serde(default)]
        end_cursor: Option<String>,
    }

    impl Paged for CursorPage {
        type Item = String;

        fn into_page(self) -> Page<String> {
            Page {
                items: self.results,
                continuation: Continuation::Cursor {
                    has_next_page: self.has_next_page,
                    end_cursor: self.end_cursor,
                },
            }
        }
    }

    #[tokio::test]
    async fn test_link_pages_are_accumulated() {
        let mock = MockTransport::new()
            .on(
                reqwest::Method::GET,
                "/v1/schedules",
                reply(
                    200,
                    json!({
                        "values": ["a", "b"],
                        "next": "https://api.example.com/v1/schedules?offset=2&size=2"
                    }),
                ),
            )
            .await
            .on(
                reqwest::Method::GET,
                "/v1/schedules",
                reply(200, json!({ "values": ["c"], "next": "" })),
            )
            .await;

        let items = Paginator::new(&mock)
            .fetch_all::<LinkPage>(ApiRequest::get("/v1/schedules"), "list schedules")
            .await
            .unwrap();

        assert_eq!(items, vec!["a", "b", "c"]);

        let requests = mock.captured_requests().await;
        assert_eq!(requests.len(), 2);
        assert!(requests[0].query.is_empty());
        assert_eq!(requests[1].path, "/v1/schedules");
        assert_eq!(requests[1].query_value("offset"), Some("2"));
        assert_eq!(requests[1].query_value("size"), Some("2"));
    }

    #[tokio::test]
    async fn test_relative_next_link() {
        let mock = MockTransport::new()
            .on(
                reqwest::Method::GET,
                "/v1/schedules",
                reply(200, json!({ "values": ["a"], "next": "/v1/schedules?offset=1" })),
            )
            .await
            .on(
                reqwest::Method::GET,
                "/v1/schedules",
                reply(200, json!({ "values": ["b"] })),
            )
            .await;

        let items = Paginator::new(&mock)
            .fetch_all::<LinkPage>(ApiRequest::get("/v1/schedules"), "list schedules")
            .await
            .unwrap();

        assert_eq!(items, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_cursor_pages_carry_end_cursor() {
        let mock = MockTransport::new()
            .on(
                reqwest::Method::POST,
                "/members",
                reply(
                    200,
                    json!({ "results": ["u1"], "hasNextPage": true, "endCursor": "c1" }),
                ),
            )
            .await
            .on(
                reqwest::Method::POST,
                "/members",
                reply(200, json!({ "results": ["u2", "u3"], "hasNextPage": false })),
            )
            .await;

        let request = ApiRequest::post("/members")
            .json(&json!({ "first": 1 }))
            .unwrap();
        let items = Paginator::new(&mock)
            .fetch_all::<CursorPage>(request, "fetch team members")
            .await
            .unwrap();

        assert_eq!(items, vec!["u1", "u2", "u3"]);

        let requests = mock.captured_requests().await;
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].body, Some(json!({ "first": 1 })));
        assert_eq!(requests[1].body, Some(json!({ "first": 1, "after": "c1" })));
    }

    #[tokio::test]
    async fn test_failed_page_discards_accumulated_items() {
        let mock = MockTransport::new()
            .on(
                reqwest::Method::GET,
                "/v1/schedules",
                reply(200, json!({ "values": ["a", "b"], "next": "/v1/schedules?offset=2" })),
            )
            .await
            .on(
                reqwest::Method::GET,
                "/v1/schedules",
                reply(500, json!({ "message": "boom" })),
            )
            .await;

        let result = Paginator::new(&mock)
            .fetch_all::<LinkPage>(ApiRequest::get("/v1/schedules"), "list schedules")
            .await;

        match result {
            Err(Error::Api(ApiError::Remote { status, .. })) => assert_eq!(status, 500),
            other => panic!("Expected remote error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_transport_failure_aborts_walk() {
        let mock = MockTransport::new()
            .on(
                reqwest::Method::POST,
                "/members",
                reply(200, json!({ "results": ["u1"], "hasNextPage": true, "endCursor": "c1" })),
            )
            .await
            .on(
                reqwest::Method::POST,
                "/members",
                transport_failure("connection reset"),
            )
            .await;

        let request = ApiRequest::post("/members").json(&json!({})).unwrap();
        let result = Paginator::new(&mock)
            .fetch_all::<CursorPage>(request, "fetch team members")
            .await;

        assert!(matches!(result, Err(Error::Api(ApiError::Transport(_)))));
    }

    #[tokio::test]
    async fn test_repeated_cursor_is_rejected() {
        let mock = MockTransport::new()
            .on(
                reqwest::Method::POST,
                "/members",
                reply(200, json!({ "results": ["u1"], "hasNextPage": true, "endCursor": "same" })),
            )
            .await;

        let request = ApiRequest::post("/members").json(&json!({})).unwrap();
        let result = Paginator::new(&mock)
            .fetch_all::<CursorPage>(request, "fetch team members")
            .await;

        assert!(matches!(result, Err(Error::Api(ApiError::InvalidResponse(_)))));
        assert_eq!(mock.captured_requests().await.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_cursor_is_rejected() {
        let mock = MockTransport::new()
            .on(
                reqwest::Method::POST,
                "/members",
                reply(200, json!({ "results": [], "hasNextPage": true })),
            )
            .await;

        let request = ApiRequest::post("/members").json(&json!({})).unwrap();
        let result = Paginator::new(&mock)
            .fetch_all::<CursorPage>(request, "fetch team members")
            .await;

        assert!(matches!(result, Err(Error::Api(ApiError::InvalidResponse(_)))));
    }

    #[tokio::test]
    async fn test_page_cap() {
        let mut mock = MockTransport::new();
        for i in 0..5 {
            mock = mock
                .on(
                    reqwest::Method::GET,
                    "/v1/schedules",
                    reply(
                        200,
                        json!({ "values": [], "next": format!("/v1/schedules?offset={}", i + 1) }),
                    ),
                )
                .await;
        }

        let result = Paginator::new(&mock)
            .max_pages(3)
            .fetch_all::<LinkPage>(ApiRequest::get("/v1/schedules"), "list schedules")
            .await;

        assert!(matches!(result, Err(Error::Api(ApiError::InvalidResponse(_)))));
        assert_eq!(mock.captured_requests().await.len(), 3);
    }

    #[tokio::test]
    async fn test_find_first_stops_paging() {
        let mock = MockTransport::new()
            .on(
                reqwest::Method::GET,
                "/v1/schedules",
                reply(200, json!({ "values": ["a", "target", "z"], "next": "/v1/schedules?offset=3" })),
            )
            .await;

        let found = Paginator::new(&mock)
            .find_first::<LinkPage, _>(ApiRequest::get("/v1/schedules"), "list schedules", |s| {
                s == "target"
            })
            .await
            .unwrap();

        assert_eq!(found.as_deref(), Some("target"));
        assert_eq!(mock.captured_requests().await.len(), 1);
    }

    #[tokio::test]
    async fn test_first_page_ignores_continuation() {
        let mock = MockTransport::new()
            .on(
                reqwest::Method::GET,
                "/v1/rules",
                reply(200, json!({ "values": ["r1"], "next": "/v1/rules?offset=1" })),
            )
            .await;

        let items = Paginator::new(&mock)
            .first_page::<LinkPage>(ApiRequest::get("/v1/rules"), "list routing rules")
            .await
            .unwrap();

        assert_eq!(items, vec!["r1"]);
        assert_eq!(mock.captured_requests().await.len(), 1);
    }
}
