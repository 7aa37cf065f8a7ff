//! Endpoint paths, relative to the API host

/// Teams API root (organization scoped)
const TEAMS_API: &str = "/public/teams/v1/org";

/// Operations API root (cloud scoped)
const OPS_API: &str = "/jsm/ops/api";

pub fn teams(org_id: &str) -> String {
    format!("{}/{}/teams/", TEAMS_API, org_id)
}

pub fn team(org_id: &str, team_id: &str) -> String {
    format!("{}/{}/teams/{}", TEAMS_API, org_id, team_id)
}

pub fn team_members(org_id: &str, team_id: &str) -> String {
    format!("{}/members", team(org_id, team_id))
}

pub fn team_members_add(org_id: &str, team_id: &str) -> String {
    format!("{}/members/add", team(org_id, team_id))
}

pub fn team_members_remove(org_id: &str, team_id: &str) -> String {
    format!("{}/members/remove", team(org_id, team_id))
}

fn ops(cloud_id: &str, suffix: &str) -> String {
    format!("{}/{}/v1{}", OPS_API, cloud_id, suffix)
}

pub fn routing_rules(cloud_id: &str, team_id: &str) -> String {
    ops(cloud_id, &format!("/teams/{}/routing-rules", team_id))
}

pub fn routing_rule(cloud_id: &str, team_id: &str, rule_id: &str) -> String {
    format!("{}/{}", routing_rules(cloud_id, team_id), rule_id)
}

pub fn escalations(cloud_id: &str, team_id: &str) -> String {
    ops(cloud_id, &format!("/teams/{}/escalations", team_id))
}

pub fn escalation(cloud_id: &str, team_id: &str, escalation_id: &str) -> String {
    format!("{}/{}", escalations(cloud_id, team_id), escalation_id)
}

pub fn schedules(cloud_id: &str) -> String {
    ops(cloud_id, "/schedules")
}

pub fn schedule(cloud_id: &str, schedule_id: &str) -> String {
    format!("{}/{}", schedules(cloud_id), schedule_id)
}

pub fn services(cloud_id: &str) -> String {
    ops(cloud_id, "/services")
}

pub fn service(cloud_id: &str, service_id: &str) -> String {
    format!("{}/{}", services(cloud_id), service_id)
}
