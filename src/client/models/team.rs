//! Team and membership models

use serde::{Deserialize, Serialize};

use crate::client::pagination::{Continuation, Page, Paged};
use crate::error::MemberOperationError;

/// Team as exchanged with the teams API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDto {
    /// Team ID, assigned by the platform on creation
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub team_id: String,

    /// Display name
    #[serde(default)]
    pub display_name: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Owning organization
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub organization_id: String,

    /// Team type (e.g. MEMBER_INVITE, OPEN, EXTERNAL)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub team_type: String,
}

/// A team member reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberDto {
    pub account_id: String,
}

/// Body of the add/remove membership calls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMemberList {
    pub members: Vec<TeamMemberDto>,
}

/// Body of the member listing call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberListRequest {
    /// Page size
    pub first: usize,

    /// Cursor of the previous page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

impl MemberListRequest {
    pub fn new(first: usize) -> Self {
        Self { first, after: None }
    }
}

/// Cursor pagination info
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,

    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// One page of team members
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberListResponse {
    #[serde(default)]
    pub results: Vec<TeamMemberDto>,

    #[serde(default)]
    pub page_info: PageInfo,
}

impl Paged for MemberListResponse {
    type Item = TeamMemberDto;

    fn into_page(self) -> Page<TeamMemberDto> {
        Page {
            items: self.results,
            continuation: Continuation::Cursor {
                has_next_page: self.page_info.has_next_page,
                end_cursor: self.page_info.end_cursor,
            },
        }
    }
}

/// Response of the add/remove membership calls.
///
/// A 2xx response may still carry per-member errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MembershipChangeResponse {
    #[serde(default)]
    pub errors: Vec<MemberOperationError>,
}
