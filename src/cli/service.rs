//! Service management commands

use colored::Colorize;
use dialoguer::Confirm;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat, ServiceArgs};
use crate::error::{ApiError, Result, ValidationError};
use crate::models::ServiceDisplay;
use crate::output::{self, json::Deleted, pretty};
use crate::service::{ServiceSpec, ServiceType, parse_import_id};

/// Create a service
pub async fn create(opts: &GlobalOptions, args: ServiceArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let name = args.name.clone().ok_or(ValidationError::InvalidField {
        field: "name",
        reason: "--name is required".to_string(),
    })?;
    let description = args.description.clone().unwrap_or_default();

    let desired = apply_args(ServiceSpec::new(name, description), &args)?;
    let created = ctx.services()?.create(&desired).await?;

    if ctx.format == OutputFormat::Pretty {
        eprintln!("{} Service \"{}\" created", "✓".green(), created.name);
    }
    print_service(ctx.format, &created)
}

/// Show a service
pub async fn get(opts: &GlobalOptions, service_id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let service_id = parse_import_id(service_id)?;

    let service = ctx
        .services()?
        .read(&service_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("service {}", service_id)))?;

    print_service(ctx.format, &service)
}

/// Update a service; unset flags keep their current value
pub async fn update(opts: &GlobalOptions, service_id: &str, args: ServiceArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let services = ctx.services()?;

    let current = services
        .read(service_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("service {}", service_id)))?;

    let desired = apply_args(current, &args)?;
    let updated = services.update(&desired).await?;

    if ctx.format == OutputFormat::Pretty {
        eprintln!("{} Service \"{}\" updated", "✓".green(), updated.name);
    }
    print_service(ctx.format, &updated)
}

/// Delete a service
pub async fn delete(opts: &GlobalOptions, service_id: &str, yes: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    if !yes {
        eprintln!("{} Delete service {}? This cannot be undone.", "⚠".yellow(), service_id);

        let confirm = Confirm::new()
            .with_prompt("Confirm deletion?")
            .default(false)
            .interact()?;

        if !confirm {
            eprintln!("Cancelled.");
            return Ok(());
        }
    }

    ctx.services()?.delete(service_id).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", output::json::format_json(&Deleted::new("service", service_id))?),
        _ => eprintln!("{} Service {} deleted", "✓".green(), service_id),
    }

    Ok(())
}

/// Layer the given flags over `spec`; repeatable flags replace the list when given.
fn apply_args(mut spec: ServiceSpec, args: &ServiceArgs) -> Result<ServiceSpec> {
    if let Some(name) = &args.name {
        spec.name = name.clone();
    }
    if let Some(description) = &args.description {
        spec.description = description.clone();
    }
    if let Some(tier) = args.tier {
        spec.tier = tier;
    }
    if let Some(service_type) = &args.service_type {
        spec.service_type = service_type.parse::<ServiceType>()?;
    }
    if let Some(owner) = &args.owner {
        spec.owner = owner.clone();
    }

    let lists = [
        (&args.responder_teams, &mut spec.responder_teams),
        (&args.responder_users, &mut spec.responder_users),
        (&args.stakeholders, &mut spec.stakeholder_users),
        (&args.approver_groups, &mut spec.change_approver_groups),
        (&args.projects, &mut spec.project_ids),
    ];
    for (given, target) in lists {
        if !given.is_empty() {
            *target = given.clone();
        }
    }

    Ok(spec)
}

fn print_service(format: OutputFormat, service: &ServiceSpec) -> Result<()> {
    output::print(format, service, &[ServiceDisplay::from(service)], || {
        pretty::service(service)
    })
}
