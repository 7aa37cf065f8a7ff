//! Service models

use serde::{Deserialize, Serialize};

/// Service as exchanged with the operations API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDto {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    pub tier: i32,

    #[serde(rename = "type")]
    pub service_type: String,

    /// Owner team ID; empty means no owner
    #[serde(default)]
    pub owner: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_approvers: Option<ChangeApproversDto>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responders: Option<RespondersDto>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stakeholders: Option<StakeholdersDto>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<ProjectsDto>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeApproversDto {
    #[serde(default)]
    pub groups: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespondersDto {
    #[serde(default)]
    pub users: Vec<String>,

    #[serde(default)]
    pub teams: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeholdersDto {
    #[serde(default)]
    pub users: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectsDto {
    #[serde(default)]
    pub ids: Vec<String>,
}
