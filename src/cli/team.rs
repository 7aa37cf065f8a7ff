//! Team management commands

use colored::Colorize;
use dialoguer::Confirm;
use log::debug;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat, TeamCreateArgs, TeamUpdateArgs};
use crate::error::{ApiError, Result};
use crate::models::{CleanupDisplay, MemberDisplay, TeamDisplay};
use crate::output::{self, json::Deleted, pretty};
use crate::team::{Member, MembershipSet, Team, TeamState};

/// Create a team and reconcile its membership
pub async fn create(opts: &GlobalOptions, args: TeamCreateArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let org_id = ctx.require_org_id()?.to_string();

    let desired = TeamState {
        team: Team {
            id: String::new(),
            organization_id: org_id,
            team_type: args.team_type,
            display_name: args.name,
            description: args.description,
            delete_default_resources: args.delete_defaults,
        },
        members: MembershipSet::from_account_ids(args.members),
    };

    let outcome = ctx.teams(args.delete_defaults)?.create(&desired).await?;
    debug!("Create passed stages: {:?}", outcome.stages);

    match ctx.format {
        OutputFormat::Json => output::print(ctx.format, &outcome, &[] as &[TeamDisplay], String::new)?,
        OutputFormat::Table => {
            println!("{}", output::table::format_table(&[TeamDisplay::from(&outcome.state)]));
            if let Some(report) = &outcome.cleanup {
                println!("{}", output::table::format_table(&CleanupDisplay::rows(report)));
            }
        }
        OutputFormat::Pretty => {
            eprintln!("{} Team \"{}\" created", "✓".green(), outcome.state.team.display_name);
            println!("{}", pretty::team(&outcome.state));
            if let Some(report) = &outcome.cleanup {
                println!("{}", pretty::cleanup(report));
            }
        }
    }

    Ok(())
}

/// Show a team and its members
pub async fn get(opts: &GlobalOptions, team_id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let org_id = ctx.require_org_id()?;

    let state = ctx
        .teams(false)?
        .read(org_id, team_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("team {}", team_id)))?;

    print_state(ctx.format, &state)
}

/// Look up a team from a `<team_id>,<organization_id>` identifier
pub async fn import(opts: &GlobalOptions, import_id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let state = ctx
        .teams(false)?
        .import(import_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("team {}", import_id)))?;

    print_state(ctx.format, &state)
}

/// Update a team's attributes and membership
pub async fn update(opts: &GlobalOptions, args: TeamUpdateArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let org_id = ctx.require_org_id()?;
    let teams = ctx.teams(false)?;

    let current = teams
        .read(org_id, &args.team_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("team {}", args.team_id)))?;

    let desired = desired_state(&current, &args);
    let updated = teams.update(&current, &desired).await?;

    if ctx.format == OutputFormat::Pretty {
        eprintln!("{} Team \"{}\" updated", "✓".green(), updated.team.display_name);
    }
    print_state(ctx.format, &updated)
}

/// Apply the update flags on top of the current state
fn desired_state(current: &TeamState, args: &TeamUpdateArgs) -> TeamState {
    let mut desired = current.clone();

    if let Some(name) = &args.name {
        desired.team.display_name = name.clone();
    }
    if let Some(description) = &args.description {
        desired.team.description = description.clone();
    }

    if !args.members.is_empty() {
        desired.members = MembershipSet::from_account_ids(args.members.iter().cloned());
    } else if !args.add_members.is_empty() || !args.remove_members.is_empty() {
        desired.members = current
            .members
            .iter()
            .filter(|m| !args.remove_members.contains(&m.account_id))
            .cloned()
            .chain(args.add_members.iter().cloned().map(Member::new))
            .collect();
    }

    desired
}

/// Delete a team
pub async fn delete(opts: &GlobalOptions, team_id: &str, yes: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let org_id = ctx.require_org_id()?;

    if !yes {
        eprintln!("{} Delete team {}? This cannot be undone.", "⚠".yellow(), team_id);

        let confirm = Confirm::new()
            .with_prompt("Confirm deletion?")
            .default(false)
            .interact()?;

        if !confirm {
            eprintln!("Cancelled.");
            return Ok(());
        }
    }

    ctx.teams(false)?.delete(org_id, team_id).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", output::json::format_json(&Deleted::new("team", team_id))?),
        _ => eprintln!("{} Team {} deleted", "✓".green(), team_id),
    }

    Ok(())
}

fn print_state(format: OutputFormat, state: &TeamState) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("{}", output::table::format_table(&[TeamDisplay::from(state)]));
            let members: Vec<MemberDisplay> = state.members.iter().map(MemberDisplay::from).collect();
            println!("{}", output::table::format_table(&members));
            Ok(())
        }
        _ => output::print(format, state, &[] as &[TeamDisplay], || pretty::team(state)),
    }
}
