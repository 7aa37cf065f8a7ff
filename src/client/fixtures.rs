//! Test fixtures and builders for domain types and API payloads
//!
//! Provides builder patterns for creating test data with sensible defaults.
//! Import via `use crate::client::fixtures::*` in test modules.

#![allow(dead_code)] // Builder methods are available for future tests

use serde_json::{Value, json};

use crate::config::ApiScope;
use crate::service::{ServiceSpec, ServiceType};
use crate::team::{MembershipSet, Team, TeamState};

pub const TEST_ORG: &str = "org-1";
pub const TEST_CLOUD: &str = "cloud-1";

// ============================================================================
// TeamBuilder
// ============================================================================

/// Builder for creating test Team instances.
///
/// # Example
/// ```ignore
/// let state = TeamBuilder::new("SRE")
///     .id("team-1")
///     .members(&["acc-1", "acc-2"])
///     .build_state();
/// ```
#[derive(Debug, Clone)]
pub struct TeamBuilder {
    id: String,
    organization_id: String,
    team_type: String,
    display_name: String,
    description: String,
    delete_default_resources: bool,
    members: MembershipSet,
}

impl TeamBuilder {
    /// Create a new builder with the given display name.
    pub fn new(display_name: impl Into<String>) -> Self {
        let display_name = display_name.into();
        Self {
            description: format!("Team {}", &display_name),
            display_name,
            id: String::new(),
            organization_id: TEST_ORG.to_string(),
            team_type: "OPEN".to_string(),
            delete_default_resources: false,
            members: MembershipSet::new(),
        }
    }

    /// Set the platform-assigned ID.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the owning organization.
    pub fn organization_id(mut self, org_id: impl Into<String>) -> Self {
        self.organization_id = org_id.into();
        self
    }

    /// Set the team type.
    pub fn team_type(mut self, team_type: impl Into<String>) -> Self {
        self.team_type = team_type.into();
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Ask for default resource cleanup after creation.
    pub fn delete_default_resources(mut self) -> Self {
        self.delete_default_resources = true;
        self
    }

    /// Set the desired members.
    pub fn members(mut self, account_ids: &[&str]) -> Self {
        self.members = MembershipSet::from_account_ids(account_ids.iter().copied());
        self
    }

    /// Build the Team.
    pub fn build(self) -> Team {
        Team {
            id: self.id,
            organization_id: self.organization_id,
            team_type: self.team_type,
            display_name: self.display_name,
            description: self.description,
            delete_default_resources: self.delete_default_resources,
        }
    }

    /// Build the Team together with its members.
    pub fn build_state(self) -> TeamState {
        let members = self.members.clone();
        TeamState {
            team: self.build(),
            members,
        }
    }
}

// ============================================================================
// ServiceBuilder
// ============================================================================

/// Builder for creating test ServiceSpec instances.
#[derive(Debug, Clone)]
pub struct ServiceBuilder {
    spec: ServiceSpec,
}

impl ServiceBuilder {
    /// Create a new builder with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            spec: ServiceSpec::new(name.clone(), format!("Service {}", name)),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.spec.id = id.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.spec.description = description.into();
        self
    }

    pub fn tier(mut self, tier: i32) -> Self {
        self.spec.tier = tier;
        self
    }

    pub fn service_type(mut self, service_type: ServiceType) -> Self {
        self.spec.service_type = service_type;
        self
    }

    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.spec.owner = owner.into();
        self
    }

    pub fn responder_team(mut self, team_id: impl Into<String>) -> Self {
        self.spec.responder_teams.push(team_id.into());
        self
    }

    pub fn build(self) -> ServiceSpec {
        self.spec
    }
}

// ============================================================================
// Payload helpers
// ============================================================================

/// Scope pointing at the test cloud.
pub fn test_scope() -> ApiScope {
    ApiScope {
        cloud_id: TEST_CLOUD.to_string(),
        member_page_size: 50,
    }
}

/// Team response body as returned by create/read/patch.
pub fn team_json(team: &Team) -> Value {
    json!({
        "teamId": team.id,
        "displayName": team.display_name,
        "description": team.description,
        "organizationId": team.organization_id,
        "teamType": team.team_type,
    })
}

/// One page of the cursor-paginated member listing.
pub fn members_page(account_ids: &[&str], end_cursor: Option<&str>) -> Value {
    let results: Vec<Value> = account_ids
        .iter()
        .map(|id| json!({ "accountId": id }))
        .collect();

    json!({
        "results": results,
        "pageInfo": {
            "hasNextPage": end_cursor.is_some(),
            "endCursor": end_cursor,
        }
    })
}

/// Membership change response without errors.
pub fn membership_ok() -> Value {
    json!({ "errors": [] })
}

/// Membership change response with one error per account.
pub fn membership_errors(account_ids: &[&str]) -> Value {
    let errors: Vec<Value> = account_ids
        .iter()
        .map(|id| json!({ "accountId": id, "code": "NOT_FOUND", "message": "User not found" }))
        .collect();
    json!({ "errors": errors })
}

/// One page of a `{values, links}` listing.
pub fn list_page(values: Value, next: Option<&str>) -> Value {
    match next {
        Some(next) => json!({ "values": values, "links": { "next": next } }),
        None => json!({ "values": values }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_builder_defaults() {
        let team = TeamBuilder::new("SRE").build();
        assert!(team.id.is_empty());
        assert_eq!(team.organization_id, TEST_ORG);
        assert_eq!(team.team_type, "OPEN");
        assert!(!team.delete_default_resources);
    }

    #[test]
    fn test_team_builder_state() {
        let state = TeamBuilder::new("SRE")
            .id("team-1")
            .members(&["b", "a", "a"])
            .build_state();
        assert_eq!(state.team.id, "team-1");
        assert_eq!(state.members.account_ids(), vec!["a", "b"]);
    }

    #[test]
    fn test_members_page_flags_next_page() {
        let page = members_page(&["a"], Some("c1"));
        assert_eq!(page["pageInfo"]["hasNextPage"], true);
        assert_eq!(members_page(&[], None)["pageInfo"]["hasNextPage"], false);
    }
}
