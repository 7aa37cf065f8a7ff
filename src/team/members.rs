//! Team membership sets and their difference

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::client::models::{TeamMemberDto, TeamMemberList};

/// A team member, identified only by account ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub account_id: String,
}

impl Member {
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
        }
    }
}

impl From<TeamMemberDto> for Member {
    fn from(dto: TeamMemberDto) -> Self {
        Self::new(dto.account_id)
    }
}

impl From<&Member> for TeamMemberDto {
    fn from(member: &Member) -> Self {
        TeamMemberDto {
            account_id: member.account_id.clone(),
        }
    }
}

/// Unordered set of members, unique by account ID.
///
/// Iteration is sorted by account ID so output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MembershipSet(BTreeSet<Member>);

impl MembershipSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from account IDs.
    pub fn from_account_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ids.into_iter().map(Member::new).collect()
    }

    /// Insert a member; returns `false` if the account was already present.
    pub fn insert(&mut self, member: Member) -> bool {
        self.0.insert(member)
    }

    pub fn contains(&self, account_id: &str) -> bool {
        self.0.contains(&Member::new(account_id))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Member> {
        self.0.iter()
    }

    pub fn account_ids(&self) -> Vec<&str> {
        self.0.iter().map(|m| m.account_id.as_str()).collect()
    }

    /// Request body for the add/remove membership calls.
    pub fn to_member_list(&self) -> TeamMemberList {
        TeamMemberList {
            members: self.0.iter().map(TeamMemberDto::from).collect(),
        }
    }
}

impl FromIterator<Member> for MembershipSet {
    fn from_iter<I: IntoIterator<Item = Member>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for MembershipSet {
    type Item = Member;
    type IntoIter = std::collections::btree_set::IntoIter<Member>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Members to add and remove to turn an observed set into a desired one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MembershipDiff {
    pub added: MembershipSet,
    pub removed: MembershipSet,
}

impl MembershipDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// `added = desired \ observed`, `removed = observed \ desired`.
pub fn diff(desired: &MembershipSet, observed: &MembershipSet) -> MembershipDiff {
    MembershipDiff {
        added: desired.0.difference(&observed.0).cloned().collect(),
        removed: observed.0.difference(&desired.0).cloned().collect(),
    }
}
