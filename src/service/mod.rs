//! Service lifecycle management
//!
//! Services live next to teams in the operations API and are plain CRUD:
//! no membership, no rollback.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::client::models::{
    ChangeApproversDto, ProjectsDto, RespondersDto, ServiceDto, StakeholdersDto,
};
use crate::client::{ApiRequest, ApiTransport, execute, execute_json, routes};
use crate::config::ApiScope;
use crate::error::{ApiError, Error, Result, ValidationError};

const NAME_MAX: usize = 100;
const DESCRIPTION_MAX: usize = 1000;
const OWNER_MAX: usize = 500;

/// Service classification accepted by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
    #[default]
    SoftwareServices,
    BusinessServices,
    CapabilitiesServices,
    Applications,
}

impl ServiceType {
    pub const ALL: [ServiceType; 4] = [
        ServiceType::SoftwareServices,
        ServiceType::BusinessServices,
        ServiceType::CapabilitiesServices,
        ServiceType::Applications,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::SoftwareServices => "SOFTWARE_SERVICES",
            ServiceType::BusinessServices => "BUSINESS_SERVICES",
            ServiceType::CapabilitiesServices => "CAPABILITIES_SERVICES",
            ServiceType::Applications => "APPLICATIONS",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceType {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ServiceType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::InvalidField {
                field: "type",
                reason: format!(
                    "expected one of {}, got {:?}",
                    ServiceType::ALL.map(|t| t.as_str()).join(", "),
                    s
                ),
            })
    }
}

/// A service as the caller declares or observes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSpec {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub description: String,
    /// 1 (most critical) to 4
    pub tier: i32,
    pub service_type: ServiceType,
    /// Owner team ID; empty for none
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub change_approver_groups: Vec<String>,
    #[serde(default)]
    pub responder_users: Vec<String>,
    #[serde(default)]
    pub responder_teams: Vec<String>,
    #[serde(default)]
    pub stakeholder_users: Vec<String>,
    #[serde(default)]
    pub project_ids: Vec<String>,
}

impl ServiceSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            description: description.into(),
            tier: 4,
            service_type: ServiceType::default(),
            owner: String::new(),
            change_approver_groups: Vec::new(),
            responder_users: Vec::new(),
            responder_teams: Vec::new(),
            stakeholder_users: Vec::new(),
            project_ids: Vec::new(),
        }
    }

    /// Check field constraints before anything is sent.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        check_length("name", &self.name, 1, NAME_MAX)?;
        check_length("description", &self.description, 1, DESCRIPTION_MAX)?;
        check_length("owner", &self.owner, 0, OWNER_MAX)?;

        if !(1..=4).contains(&self.tier) {
            return Err(ValidationError::InvalidField {
                field: "tier",
                reason: format!("must be between 1 and 4, got {}", self.tier),
            });
        }

        Ok(())
    }

    pub fn to_dto(&self) -> ServiceDto {
        fn non_empty<T>(values: &[String], wrap: impl FnOnce(Vec<String>) -> T) -> Option<T> {
            (!values.is_empty()).then(|| wrap(values.to_vec()))
        }

        let responders = if self.responder_users.is_empty() && self.responder_teams.is_empty() {
            None
        } else {
            Some(RespondersDto {
                users: self.responder_users.clone(),
                teams: self.responder_teams.clone(),
            })
        };

        ServiceDto {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            tier: self.tier,
            service_type: self.service_type.to_string(),
            owner: self.owner.clone(),
            change_approvers: non_empty(&self.change_approver_groups, |groups| {
                ChangeApproversDto { groups }
            }),
            responders,
            stakeholders: non_empty(&self.stakeholder_users, |users| StakeholdersDto { users }),
            projects: non_empty(&self.project_ids, |ids| ProjectsDto { ids }),
        }
    }

    /// Build a spec from a platform response, keeping `known_id` if the
    /// response omits it.
    pub fn from_dto(dto: ServiceDto, known_id: &str) -> Result<Self> {
        let service_type = dto.service_type.parse::<ServiceType>()?;
        let responders = dto.responders.unwrap_or_default();

        Ok(Self {
            id: if dto.id.is_empty() {
                known_id.to_string()
            } else {
                dto.id
            },
            name: dto.name,
            description: dto.description,
            tier: dto.tier,
            service_type,
            owner: dto.owner,
            change_approver_groups: dto.change_approvers.unwrap_or_default().groups,
            responder_users: responders.users,
            responder_teams: responders.teams,
            stakeholder_users: dto.stakeholders.unwrap_or_default().users,
            project_ids: dto.projects.unwrap_or_default().ids,
        })
    }
}

fn check_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> std::result::Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(ValidationError::InvalidField {
            field,
            reason: format!("length must be between {} and {}, got {}", min, max, len),
        });
    }
    Ok(())
}

/// Service import identifier: the bare service ID.
pub fn parse_import_id(raw: &str) -> std::result::Result<String, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::ImportId {
            expected: "service_id",
            got: raw.to_string(),
        });
    }
    Ok(raw.trim().to_string())
}

/// CRUD for services of one cloud site.
pub struct ServiceManager<C: ?Sized> {
    client: Arc<C>,
    scope: ApiScope,
}

impl<C: ApiTransport + ?Sized> ServiceManager<C> {
    pub fn new(client: Arc<C>, scope: ApiScope) -> Self {
        Self { client, scope }
    }

    pub async fn create(&self, desired: &ServiceSpec) -> Result<ServiceSpec> {
        desired.validate()?;

        let request = ApiRequest::post(routes::services(&self.scope.cloud_id)).json(&desired.to_dto())?;
        let dto: ServiceDto = execute_json(&*self.client, &request, "create service").await?;
        debug!("Created service {} ({})", dto.name, dto.id);

        let created = ServiceSpec::from_dto(dto, "")?;
        if created.id.is_empty() {
            return Err(ApiError::InvalidResponse(
                "create service response did not contain an id".to_string(),
            )
            .into());
        }
        Ok(created)
    }

    /// Fetch a service; `Ok(None)` when it no longer exists.
    pub async fn read(&self, id: &str) -> Result<Option<ServiceSpec>> {
        let request = ApiRequest::get(routes::service(&self.scope.cloud_id, id));
        match execute_json::<_, ServiceDto>(&*self.client, &request, "read service").await {
            Ok(dto) => Ok(Some(ServiceSpec::from_dto(dto, id)?)),
            Err(Error::Api(e)) if e.status() == Some(404) => {
                debug!("Service {} not found", id);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn update(&self, desired: &ServiceSpec) -> Result<ServiceSpec> {
        desired.validate()?;

        let request = ApiRequest::patch(routes::service(&self.scope.cloud_id, &desired.id))
            .json(&desired.to_dto())?;
        let response = execute(&*self.client, &request, "update service").await?;
        debug!("Updated service {}", desired.id);

        match response.parse_or_default::<Option<ServiceDto>>("update service")? {
            Some(dto) => ServiceSpec::from_dto(dto, &desired.id),
            None => Ok(desired.clone()),
        }
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let request = ApiRequest::delete(routes::service(&self.scope.cloud_id, id));
        execute(&*self.client, &request, "delete service").await?;
        debug!("Deleted service {}", id);
        Ok(())
    }
}
