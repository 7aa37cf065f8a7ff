//! Routing rule, escalation and schedule models
//!
//! The platform creates one of each alongside a new team.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::pagination::{Continuation, Page, Paged};

/// Generic `{values, links}` list envelope of the operations API
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct ListEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,

    #[serde(default)]
    pub links: Option<Links>,
}

/// Pagination links
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub next: Option<String>,
}

impl<T: DeserializeOwned> Paged for ListEnvelope<T> {
    type Item = T;

    fn into_page(self) -> Page<T> {
        Page {
            items: self.values,
            continuation: Continuation::Next(self.links.and_then(|l| l.next)),
        }
    }
}

/// Notification target of a routing rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingRuleNotify {
    #[serde(rename = "type")]
    pub notify_type: String,

    #[serde(default)]
    pub id: String,
}

impl RoutingRuleNotify {
    /// Route to nobody.
    pub fn none() -> Self {
        Self {
            notify_type: "none".to_string(),
            id: String::new(),
        }
    }
}

/// Team routing rule.
///
/// Fields this crate does not touch are kept in `extra` so a PATCH sends the
/// rule back as it was read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingRule {
    pub id: String,

    #[serde(default)]
    pub is_default: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify: Option<RoutingRuleNotify>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Team escalation policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Escalation {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// On-call schedule (listed globally, not per team)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub team_id: Option<String>,
}
