//! Init command implementation

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::cli::InitArgs;
use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::{ConfigError, Error, Result};

/// Run the init command
///
/// Values given as flags are taken as-is; values already present in an
/// existing config file are kept. Anything still missing is prompted for.
pub fn run(opts: &GlobalOptions, args: InitArgs) -> Result<()> {
    println!("{}", "Welcome to OpsTeam!".bold().green());

    let mut config = match Config::load_at(opts.config_ref()) {
        Ok(config) => config,
        Err(Error::Config(ConfigError::NotFound)) => Config::default(),
        Err(e) => return Err(e),
    };
    apply_given(&mut config, opts, args);

    let theme = ColorfulTheme::default();

    if config.email.as_deref().is_none_or(str::is_empty) {
        let email: String = Input::with_theme(&theme)
            .with_prompt("Account email")
            .interact_text()?;
        config.email = Some(email);
    }

    if config.api_token.as_deref().is_none_or(str::is_empty) {
        let token = Password::with_theme(&theme)
            .with_prompt("API token")
            .interact()?;
        config.api_token = Some(token);
    }

    if config.org_id.is_none() {
        config.org_id = prompt_optional(&theme, "Organization ID (teams API)")?;
    }
    if config.cloud_id.is_none() {
        config.cloud_id = prompt_optional(&theme, "Cloud ID (operations API, optional)")?;
    }

    config.validate_auth()?;
    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );
    if let Some(org_id) = &config.org_id {
        println!("  Default organization: {}", org_id.bold());
    }

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "opsteam status".cyan());

    Ok(())
}

/// Layer the values given as flags over the loaded config.
fn apply_given(config: &mut Config, opts: &GlobalOptions, args: InitArgs) {
    if let Some(email) = args.email {
        config.email = Some(email);
    }
    if let Some(token) = args.api_token {
        config.api_token = Some(token);
    }
    opts.apply_to(config);
}

fn prompt_optional(theme: &ColorfulTheme, prompt: &str) -> Result<Option<String>> {
    let value: String = Input::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    let value = value.trim();
    Ok((!value.is_empty()).then(|| value.to_string()))
}
