//! Status command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "OpsTeam Configuration Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;

    match Config::load_from(config_path.clone()) {
        Ok(mut config) => {
            opts.apply_to(&mut config);
            println!("Config file: {}", config_path.display().to_string().cyan());
            println!();

            if config.validate_auth().is_ok() {
                let email = config.email.as_deref().unwrap_or_default();
                println!("{} API credentials configured ({})", "✓".green(), email);
            } else {
                println!("{} API credentials not configured", "✗".red());
                println!("  → Run `opsteam init` to set `email` and `api_token`");
            }

            match config.require_org_id() {
                Ok(org_id) => println!("{} Organization: {}", "✓".green(), org_id),
                Err(_) => {
                    println!("{} No organization set", "○".dimmed());
                    println!("  → Set `org_id` or pass --org");
                }
            }

            match config.require_cloud_id() {
                Ok(cloud_id) => println!("{} Cloud ID: {}", "✓".green(), cloud_id),
                Err(_) => {
                    println!(
                        "{} No cloud ID set (needed for services and default cleanup)",
                        "○".dimmed()
                    );
                }
            }

            if config.api_host.is_some() {
                println!("{} Custom API host: {}", "○".dimmed(), config.api_host().cyan());
            }

            println!();
        }
        Err(_) => {
            println!("{} Configuration not found", "✗".red());
            println!();
            println!(
                "Create {} with `email`, `api_token`, `org_id` and `cloud_id`.",
                config_path.display().to_string().cyan()
            );
            println!();
        }
    }

    Ok(())
}
