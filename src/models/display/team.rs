//! Team display models

use serde::Serialize;
use tabled::Tabled;

use super::common::{or_dash, truncate_string};
use crate::team::{CleanupOutcome, CleanupReport, Member, TeamState};

const DESCRIPTION_WIDTH: usize = 40;

/// Team display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct TeamDisplay {
    #[tabled(rename = "TEAM ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "TYPE")]
    pub team_type: String,

    #[tabled(rename = "ORGANIZATION")]
    pub organization_id: String,

    #[tabled(rename = "MEMBERS")]
    pub member_count: usize,

    #[tabled(rename = "DESCRIPTION")]
    pub description: String,
}

impl From<&TeamState> for TeamDisplay {
    fn from(state: &TeamState) -> Self {
        Self {
            id: state.team.id.clone(),
            name: state.team.display_name.clone(),
            team_type: state.team.team_type.clone(),
            organization_id: state.team.organization_id.clone(),
            member_count: state.members.len(),
            description: or_dash(&truncate_string(&state.team.description, DESCRIPTION_WIDTH)),
        }
    }
}

/// Team member row.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct MemberDisplay {
    #[tabled(rename = "ACCOUNT ID")]
    pub account_id: String,
}

impl From<&Member> for MemberDisplay {
    fn from(member: &Member) -> Self {
        Self {
            account_id: member.account_id.clone(),
        }
    }
}

/// One row per default-resource cleanup procedure.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct CleanupDisplay {
    #[tabled(rename = "DEFAULT")]
    pub resource: String,

    #[tabled(rename = "RESULT")]
    pub result: String,

    #[tabled(rename = "DETAIL")]
    pub detail: String,
}

impl CleanupDisplay {
    fn row(resource: &str, outcome: &CleanupOutcome) -> Self {
        let (result, detail) = match outcome {
            CleanupOutcome::Cleaned { id } => ("cleaned", id.clone()),
            CleanupOutcome::NothingFound => ("none found", "--".to_string()),
            CleanupOutcome::Failed { error } => ("failed", error.clone()),
        };
        Self {
            resource: resource.to_string(),
            result: result.to_string(),
            detail,
        }
    }

    pub fn rows(report: &CleanupReport) -> Vec<Self> {
        vec![
            Self::row("routing rule", &report.routing_rule),
            Self::row("escalation", &report.escalation),
            Self::row("schedule", &report.schedule),
        ]
    }
}
