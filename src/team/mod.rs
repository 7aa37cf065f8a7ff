//! Team lifecycle management
//!
//! [`TeamReconciler`] drives create, read, update and delete against the
//! platform. Creation is a multi-step workflow: the team is created first,
//! then its membership is reconciled against what the platform seeded, and
//! optionally the default routing rule, escalation and schedule are cleaned
//! up. A failure after the team exists deletes it again.

use serde::{Deserialize, Serialize};

use crate::client::models::TeamDto;
use crate::error::ValidationError;

mod defaults;
mod members;
mod reconcile;

pub use defaults::{CleanupOutcome, CleanupReport, DefaultsCleaner};
pub use members::{Member, MembershipDiff, MembershipSet, diff};
pub use reconcile::{CreateOutcome, CreateStage, TeamReconciler, validate_update};

/// A team as the caller declares or observes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Platform-assigned ID; empty before creation
    #[serde(default)]
    pub id: String,

    /// Owning organization; immutable after creation
    pub organization_id: String,

    /// Team type; immutable after creation
    pub team_type: String,

    pub display_name: String,

    #[serde(default)]
    pub description: String,

    /// Clean up platform-created defaults after creation
    #[serde(default)]
    pub delete_default_resources: bool,
}

impl Team {
    pub fn to_dto(&self) -> TeamDto {
        TeamDto {
            team_id: self.id.clone(),
            display_name: self.display_name.clone(),
            description: self.description.clone(),
            organization_id: self.organization_id.clone(),
            team_type: self.team_type.clone(),
        }
    }

    /// Build a team from a platform response.
    ///
    /// Fields the response leaves empty are taken from `known`, and the local
    /// `delete_default_resources` flag is always kept from it.
    pub fn from_dto(dto: TeamDto, known: &Team) -> Self {
        fn or_known(value: String, known: &str) -> String {
            if value.is_empty() {
                known.to_string()
            } else {
                value
            }
        }

        Self {
            id: or_known(dto.team_id, &known.id),
            organization_id: or_known(dto.organization_id, &known.organization_id),
            team_type: or_known(dto.team_type, &known.team_type),
            display_name: or_known(dto.display_name, &known.display_name),
            description: or_known(dto.description, &known.description),
            delete_default_resources: known.delete_default_resources,
        }
    }
}

/// A team together with its membership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamState {
    pub team: Team,
    pub members: MembershipSet,
}

/// Identifier used to adopt an existing team: `<team_id>,<organization_id>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamImportId {
    pub team_id: String,
    pub organization_id: String,
}

impl TeamImportId {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let parts: Vec<&str> = raw.split(',').collect();
        match parts.as_slice() {
            [team_id, organization_id] if !team_id.is_empty() && !organization_id.is_empty() => {
                Ok(Self {
                    team_id: team_id.to_string(),
                    organization_id: organization_id.to_string(),
                })
            }
            _ => Err(ValidationError::ImportId {
                expected: "id,organization_id",
                got: raw.to_string(),
            }),
        }
    }
}
