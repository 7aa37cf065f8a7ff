//! Wire models for the teams and operations APIs
//!
//! These mirror the JSON the platform sends and accepts. Domain types in
//! [`crate::team`] and [`crate::service`] convert to and from them.

mod defaults;
mod service;
mod team;

pub use defaults::{Escalation, Links, ListEnvelope, RoutingRule, RoutingRuleNotify, Schedule};
pub use service::{
    ChangeApproversDto, ProjectsDto, RespondersDto, ServiceDto, StakeholdersDto,
};
pub use team::{
    MemberListRequest, MemberListResponse, MembershipChangeResponse, PageInfo, TeamDto,
    TeamMemberDto, TeamMemberList,
};
