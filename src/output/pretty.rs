//! Human-oriented detail views

use colored::Colorize;

use crate::models::CleanupDisplay;
use crate::service::ServiceSpec;
use crate::team::{CleanupReport, TeamState};

/// Multi-line view of a team and its members.
pub fn team(state: &TeamState) -> String {
    let team = &state.team;
    let mut out = String::new();

    out.push_str(&format!("{} {}\n", team.display_name.bold(), format!("({})", team.id).dimmed()));
    out.push_str(&format!("  Organization: {}\n", team.organization_id));
    out.push_str(&format!("  Type:         {}\n", team.team_type));
    if !team.description.is_empty() {
        out.push_str(&format!("  Description:  {}\n", team.description));
    }

    out.push_str(&format!("  Members ({}):", state.members.len()));
    if state.members.is_empty() {
        out.push_str(&format!(" {}", "none".dimmed()));
    }
    for account_id in state.members.account_ids() {
        out.push_str(&format!("\n    - {}", account_id));
    }

    out
}

/// One line per cleanup procedure.
pub fn cleanup(report: &CleanupReport) -> String {
    CleanupDisplay::rows(report)
        .into_iter()
        .map(|row| {
            let marker = match row.result.as_str() {
                "cleaned" => "✓".green(),
                "failed" => "⚠".yellow(),
                _ => "○".dimmed(),
            };
            format!("{} Default {}: {} ({})", marker, row.resource, row.result, row.detail)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Multi-line view of a service.
pub fn service(spec: &ServiceSpec) -> String {
    let mut lines = vec![
        format!("{} {}", spec.name.bold(), format!("({})", spec.id).dimmed()),
        format!("  Type:         {}", spec.service_type),
        format!("  Tier:         {}", spec.tier),
        format!("  Description:  {}", spec.description),
    ];

    if !spec.owner.is_empty() {
        lines.push(format!("  Owner:        {}", spec.owner));
    }

    let lists = [
        ("Responder teams", &spec.responder_teams),
        ("Responder users", &spec.responder_users),
        ("Stakeholders", &spec.stakeholder_users),
        ("Approver groups", &spec.change_approver_groups),
        ("Projects", &spec.project_ids),
    ];
    for (label, values) in lists {
        if !values.is_empty() {
            lines.push(format!("  {}: {}", label, values.join(", ")));
        }
    }

    lines.join("\n")
}
