//! Service display model

use serde::Serialize;
use tabled::Tabled;

use super::common::{or_dash, truncate_string};
use crate::service::ServiceSpec;

/// Service display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ServiceDisplay {
    #[tabled(rename = "SERVICE ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "TIER")]
    pub tier: i32,

    #[tabled(rename = "TYPE")]
    pub service_type: String,

    #[tabled(rename = "OWNER")]
    pub owner: String,

    #[tabled(rename = "DESCRIPTION")]
    pub description: String,
}

impl From<&ServiceSpec> for ServiceDisplay {
    fn from(spec: &ServiceSpec) -> Self {
        Self {
            id: spec.id.clone(),
            name: spec.name.clone(),
            tier: spec.tier,
            service_type: spec.service_type.to_string(),
            owner: or_dash(&spec.owner),
            description: truncate_string(&spec.description, 40),
        }
    }
}
