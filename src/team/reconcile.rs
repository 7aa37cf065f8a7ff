//! Team reconciliation workflows
//!
//! Creation walks an explicit stage sequence:
//!
//! ```text
//! Draft -> TeamCreated -> MembersObserved -> MembersReconciled -> [DefaultsCleaned] -> Committed
//!              \________________\__________________\___________-> RolledBack
//! ```
//!
//! A failure while the team exists but membership is not yet reconciled takes
//! the compensating edge: the team is deleted (best-effort) and the original
//! error is returned wrapped in [`Error::RolledBack`]. Updates never roll back.

use std::fmt;
use std::sync::Arc;

use log::{debug, warn};
use serde::Serialize;

use super::defaults::{CleanupReport, DefaultsCleaner};
use super::members::{Member, MembershipDiff, MembershipSet, diff};
use super::{Team, TeamImportId, TeamState};
use crate::client::models::{
    MemberListRequest, MemberListResponse, MembershipChangeResponse, TeamDto,
};
use crate::client::{ApiRequest, ApiTransport, Paginator, execute, execute_json, routes};
use crate::config::ApiScope;
use crate::error::{ApiError, Error, Result, ValidationError};

/// Position reached by a create workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CreateStage {
    Draft,
    TeamCreated,
    MembersObserved,
    MembersReconciled,
    DefaultsCleaned,
    Committed,
    RolledBack,
}

impl CreateStage {
    /// Whether a failure at this stage leaves a team that must be deleted.
    pub fn requires_compensation(self) -> bool {
        matches!(
            self,
            CreateStage::TeamCreated | CreateStage::MembersObserved | CreateStage::MembersReconciled
        )
    }
}

impl fmt::Display for CreateStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CreateStage::Draft => "draft",
            CreateStage::TeamCreated => "team created",
            CreateStage::MembersObserved => "members observed",
            CreateStage::MembersReconciled => "members reconciled",
            CreateStage::DefaultsCleaned => "defaults cleaned",
            CreateStage::Committed => "committed",
            CreateStage::RolledBack => "rolled back",
        };
        f.write_str(name)
    }
}

/// Stage trail of one create run.
#[derive(Debug)]
struct CreateRun {
    stages: Vec<CreateStage>,
}

impl CreateRun {
    fn start() -> Self {
        Self {
            stages: vec![CreateStage::Draft],
        }
    }

    fn advance(&mut self, stage: CreateStage) {
        debug!("Team create reached stage: {}", stage);
        self.stages.push(stage);
    }

    fn current(&self) -> CreateStage {
        self.stages.last().copied().unwrap_or(CreateStage::Draft)
    }
}

/// Result of a successful create.
#[derive(Debug, Clone, Serialize)]
pub struct CreateOutcome {
    /// The created team and its final membership
    pub state: TeamState,

    /// Default resource cleanup results, when cleanup was requested
    pub cleanup: Option<CleanupReport>,

    /// Stages passed through, in order
    pub stages: Vec<CreateStage>,
}

/// Reject changes to fields that are fixed once a team exists.
///
/// Only applies when the ID is unchanged; an empty desired ID counts as
/// unchanged.
pub fn validate_update(current: &Team, desired: &Team) -> std::result::Result<(), ValidationError> {
    let same_team = desired.id.is_empty() || desired.id == current.id;
    if !same_team {
        return Ok(());
    }

    if desired.organization_id != current.organization_id {
        return Err(ValidationError::ImmutableField {
            field: "organization_id",
        });
    }
    if desired.team_type != current.team_type {
        return Err(ValidationError::ImmutableField { field: "team_type" });
    }
    Ok(())
}

/// Drives team lifecycle operations against the platform.
pub struct TeamReconciler<C: ?Sized> {
    client: Arc<C>,
    scope: ApiScope,
}

impl<C: ApiTransport + ?Sized> TeamReconciler<C> {
    pub fn new(client: Arc<C>, scope: ApiScope) -> Self {
        Self { client, scope }
    }

    /// Create a team and bring its membership to `desired.members`.
    pub async fn create(&self, desired: &TeamState) -> Result<CreateOutcome> {
        let mut run = CreateRun::start();

        let request = ApiRequest::post(routes::teams(&desired.team.organization_id))
            .json(&desired.team.to_dto())?;
        let created: TeamDto = execute_json(&*self.client, &request, "create team").await?;

        let team = Team::from_dto(created, &desired.team);
        if team.id.is_empty() {
            return Err(ApiError::InvalidResponse(
                "create team response did not contain a teamId".to_string(),
            )
            .into());
        }
        debug!("Created team {} in organization {}", team.id, team.organization_id);
        run.advance(CreateStage::TeamCreated);

        if let Err(e) = self.reconcile_new_members(&team, &desired.members, &mut run).await {
            if run.current().requires_compensation() {
                return Err(self.roll_back(&team, &mut run, e).await);
            }
            return Err(e);
        }

        let cleanup = if team.delete_default_resources {
            let report = DefaultsCleaner::new(&*self.client, &self.scope.cloud_id)
                .clean_all(&team.id)
                .await;
            if report.has_failures() {
                warn!("Default resource cleanup of team {} was incomplete", team.id);
            }
            run.advance(CreateStage::DefaultsCleaned);
            Some(report)
        } else {
            None
        };

        run.advance(CreateStage::Committed);

        Ok(CreateOutcome {
            state: TeamState {
                team,
                members: desired.members.clone(),
            },
            cleanup,
            stages: run.stages,
        })
    }

    async fn reconcile_new_members(
        &self,
        team: &Team,
        desired: &MembershipSet,
        run: &mut CreateRun,
    ) -> Result<()> {
        let observed = self.fetch_members(&team.organization_id, &team.id).await?;
        run.advance(CreateStage::MembersObserved);

        let delta = diff(desired, &observed);
        self.apply_diff(&team.organization_id, &team.id, &delta).await?;
        run.advance(CreateStage::MembersReconciled);
        Ok(())
    }

    /// Delete a half-created team. The delete's own failure is recorded but
    /// never replaces `error`.
    async fn roll_back(&self, team: &Team, run: &mut CreateRun, error: Error) -> Error {
        let stage = run.current();
        warn!(
            "Team create failed at stage '{}', deleting team {}: {}",
            stage, team.id, error
        );

        let rollback_error = match self.delete(&team.organization_id, &team.id).await {
            Ok(()) => None,
            Err(e) => {
                warn!("Rollback of team {} failed: {}", team.id, e);
                Some(e.to_string())
            }
        };
        run.advance(CreateStage::RolledBack);

        Error::RolledBack {
            stage,
            source: Box::new(error),
            rollback_error,
        }
    }

    /// Read a team and its members; `Ok(None)` when the team no longer exists.
    pub async fn read(&self, organization_id: &str, team_id: &str) -> Result<Option<TeamState>> {
        let request = ApiRequest::get(routes::team(organization_id, team_id));
        let dto = match execute_json::<_, TeamDto>(&*self.client, &request, "read team").await {
            Ok(dto) => dto,
            Err(Error::Api(e)) if e.status() == Some(404) => {
                debug!("Team {} not found, treating as absent", team_id);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let known = Team {
            id: team_id.to_string(),
            organization_id: organization_id.to_string(),
            ..Team::default()
        };
        let team = Team::from_dto(dto, &known);
        let members = self.fetch_members(organization_id, team_id).await?;

        Ok(Some(TeamState { team, members }))
    }

    /// Adopt an existing team from a `<team_id>,<organization_id>` identifier.
    pub async fn import(&self, raw_id: &str) -> Result<Option<TeamState>> {
        let id = TeamImportId::parse(raw_id)?;
        self.read(&id.organization_id, &id.team_id).await
    }

    /// Patch a team and apply the membership delta against `current`.
    ///
    /// Membership is diffed against the previously known members, not a fresh
    /// listing. A failure after the patch leaves whatever was applied.
    pub async fn update(&self, current: &TeamState, desired: &TeamState) -> Result<TeamState> {
        validate_update(&current.team, &desired.team)?;

        let org = &current.team.organization_id;
        let id = &current.team.id;

        let mut body = desired.team.to_dto();
        body.team_id = String::new();
        let request = ApiRequest::patch(routes::team(org, id)).json(&body)?;
        let response = execute(&*self.client, &request, "update team").await?;
        debug!("Patched team {}", id);

        let known = Team {
            id: id.clone(),
            organization_id: org.clone(),
            ..desired.team.clone()
        };
        let team = match response.parse_or_default::<Option<TeamDto>>("update team")? {
            Some(dto) => Team::from_dto(dto, &known),
            None => known,
        };

        let delta = diff(&desired.members, &current.members);
        self.apply_diff(org, id, &delta).await?;

        Ok(TeamState {
            team,
            members: desired.members.clone(),
        })
    }

    pub async fn delete(&self, organization_id: &str, team_id: &str) -> Result<()> {
        let request = ApiRequest::delete(routes::team(organization_id, team_id));
        execute(&*self.client, &request, "delete team").await?;
        debug!("Deleted team {}", team_id);
        Ok(())
    }

    /// List every current member of a team.
    pub async fn fetch_members(&self, organization_id: &str, team_id: &str) -> Result<MembershipSet> {
        let request = ApiRequest::post(routes::team_members(organization_id, team_id))
            .json(&MemberListRequest::new(self.scope.member_page_size))?;

        let members = Paginator::new(&*self.client)
            .fetch_all::<MemberListResponse>(request, "fetch team members")
            .await?;
        debug!("Team {} has {} members", team_id, members.len());

        Ok(members.into_iter().map(Member::from).collect())
    }

    async fn apply_diff(&self, organization_id: &str, team_id: &str, delta: &MembershipDiff) -> Result<()> {
        if delta.is_empty() {
            debug!("Membership of team {} already up to date", team_id);
            return Ok(());
        }

        if !delta.added.is_empty() {
            self.change_members(
                routes::team_members_add(organization_id, team_id),
                "add users to the team",
                &delta.added,
            )
            .await?;
            debug!("Added {} members to team {}", delta.added.len(), team_id);
        }

        if !delta.removed.is_empty() {
            self.change_members(
                routes::team_members_remove(organization_id, team_id),
                "remove users from the team",
                &delta.removed,
            )
            .await?;
            debug!("Removed {} members from team {}", delta.removed.len(), team_id);
        }

        Ok(())
    }

    /// Send an add/remove call; per-member errors in a 2xx body fail it.
    async fn change_members(&self, path: String, action: &str, members: &MembershipSet) -> Result<()> {
        let request = ApiRequest::post(path).json(&members.to_member_list())?;
        let response = execute(&*self.client, &request, action).await?;

        let result: MembershipChangeResponse = response.parse_or_default(action)?;
        if !result.errors.is_empty() {
            return Err(ApiError::PartialMemberOperation {
                action: action.to_string(),
                errors: result.errors,
            }
            .into());
        }
        Ok(())
    }
}
