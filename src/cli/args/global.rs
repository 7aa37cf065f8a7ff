//! Global CLI options shared across all commands

use clap::ValueEnum;

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// CLI flag > environment variable > config file > default. This struct
/// captures the CLI/env layer; [`GlobalOptions::apply_to`] layers it over a
/// loaded config.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format, if given on the command line or in the environment
    pub format: Option<OutputFormat>,

    /// Organization ID override
    pub org: Option<String>,

    /// Cloud ID override
    pub cloud_id: Option<String>,

    /// Custom config file path (defaults to ~/.opsteam/config.yaml)
    pub config: Option<String>,

    /// Custom API host for development/testing
    pub api_host: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            org: cli.org.clone(),
            cloud_id: cli.cloud_id.clone(),
            config: cli.config.clone(),
            api_host: cli.api_host.clone(),
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Overwrite config values with the ones given on the command line.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(org) = &self.org {
            config.org_id = Some(org.clone());
        }
        if let Some(cloud_id) = &self.cloud_id {
            config.cloud_id = Some(cloud_id.clone());
        }
        if let Some(host) = &self.api_host {
            config.api_host = Some(host.clone());
        }
    }

    /// Effective output format: flag, then config preference, then pretty.
    pub fn resolve_format(&self, config: &Config) -> OutputFormat {
        self.format
            .or_else(|| {
                config
                    .preferences
                    .format
                    .as_deref()
                    .and_then(|f| <OutputFormat as ValueEnum>::from_str(f, true).ok())
            })
            .unwrap_or_default()
    }
}
