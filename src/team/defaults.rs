//! Cleanup of the resources the platform creates alongside a new team
//!
//! Each procedure acts on the first match only and is best-effort: a failure
//! is logged and reported, but never stops the sibling procedures.

use log::{debug, warn};
use serde::Serialize;

use crate::client::models::{Escalation, ListEnvelope, RoutingRule, RoutingRuleNotify, Schedule};
use crate::client::{ApiRequest, ApiTransport, Paginator, execute, routes};
use crate::error::Result;

/// Result of one cleanup procedure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CleanupOutcome {
    /// The default resource was neutralized or deleted.
    Cleaned { id: String },
    /// Nothing matched; no action was taken.
    NothingFound,
    /// The procedure failed; the message is kept for diagnostics.
    Failed { error: String },
}

impl CleanupOutcome {
    fn from_result(kind: &str, team_id: &str, result: Result<Option<String>>) -> Self {
        match result {
            Ok(Some(id)) => {
                debug!("Cleaned default {} {} of team {}", kind, id, team_id);
                CleanupOutcome::Cleaned { id }
            }
            Ok(None) => {
                debug!("No default {} found for team {}", kind, team_id);
                CleanupOutcome::NothingFound
            }
            Err(e) => {
                warn!("Unable to clean default {} of team {}: {}", kind, team_id, e);
                CleanupOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, CleanupOutcome::Failed { .. })
    }
}

/// Outcomes of the three cleanup procedures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    pub routing_rule: CleanupOutcome,
    pub escalation: CleanupOutcome,
    pub schedule: CleanupOutcome,
}

impl CleanupReport {
    pub fn has_failures(&self) -> bool {
        self.routing_rule.is_failed() || self.escalation.is_failed() || self.schedule.is_failed()
    }
}

/// Finds and neutralizes the default resources of one team.
pub struct DefaultsCleaner<'a, C: ?Sized> {
    client: &'a C,
    cloud_id: &'a str,
}

impl<'a, C: ApiTransport + ?Sized> DefaultsCleaner<'a, C> {
    pub fn new(client: &'a C, cloud_id: &'a str) -> Self {
        Self { client, cloud_id }
    }

    /// Run all three procedures in order, regardless of individual failures.
    pub async fn clean_all(&self, team_id: &str) -> CleanupReport {
        let routing_rule = CleanupOutcome::from_result(
            "routing rule",
            team_id,
            self.neutralize_default_routing_rule(team_id).await,
        );
        let escalation = CleanupOutcome::from_result(
            "escalation",
            team_id,
            self.delete_default_escalation(team_id).await,
        );
        let schedule = CleanupOutcome::from_result(
            "schedule",
            team_id,
            self.delete_default_schedule(team_id).await,
        );

        CleanupReport {
            routing_rule,
            escalation,
            schedule,
        }
    }

    /// Point the first default routing rule at nobody.
    ///
    /// Only the first `isDefault` rule is patched; later default rules are left
    /// untouched.
    pub async fn neutralize_default_routing_rule(&self, team_id: &str) -> Result<Option<String>> {
        let rules = Paginator::new(self.client)
            .first_page::<ListEnvelope<RoutingRule>>(
                ApiRequest::get(routes::routing_rules(self.cloud_id, team_id)),
                "list routing rules",
            )
            .await?;

        let Some(mut rule) = rules.into_iter().find(|r| r.is_default) else {
            return Ok(None);
        };

        rule.notify = Some(RoutingRuleNotify::none());
        let request = ApiRequest::patch(routes::routing_rule(self.cloud_id, team_id, &rule.id))
            .json(&rule)?;
        execute(self.client, &request, "update default routing rule").await?;

        Ok(Some(rule.id))
    }

    /// Delete the first escalation listed for the team.
    pub async fn delete_default_escalation(&self, team_id: &str) -> Result<Option<String>> {
        let escalations = Paginator::new(self.client)
            .first_page::<ListEnvelope<Escalation>>(
                ApiRequest::get(routes::escalations(self.cloud_id, team_id)),
                "list escalations",
            )
            .await?;

        let Some(escalation) = escalations.into_iter().next() else {
            return Ok(None);
        };

        let request = ApiRequest::delete(routes::escalation(self.cloud_id, team_id, &escalation.id));
        execute(self.client, &request, "delete default escalation").await?;

        Ok(Some(escalation.id))
    }

    /// Page through all schedules until one belongs to the team, then delete it.
    pub async fn delete_default_schedule(&self, team_id: &str) -> Result<Option<String>> {
        let schedule = Paginator::new(self.client)
            .find_first::<ListEnvelope<Schedule>, _>(
                ApiRequest::get(routes::schedules(self.cloud_id)),
                "list schedules",
                |s| {
                    s.team_id
                        .as_deref()
                        .is_some_and(|id| id.eq_ignore_ascii_case(team_id))
                },
            )
            .await?;

        let Some(schedule) = schedule else {
            return Ok(None);
        };

        let request = ApiRequest::delete(routes::schedule(self.cloud_id, &schedule.id));
        execute(self.client, &request, "delete default schedule").await?;

        Ok(Some(schedule.id))
    }
}
