//! Command execution context
//!
//! Provides a unified context for command execution, eliminating boilerplate
//! for config loading, credential validation, and client initialization.

use std::sync::Arc;

use log::debug;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::OpsClient;
use crate::config::Config;
use crate::error::Result;
use crate::service::ServiceManager;
use crate::team::TeamReconciler;

/// Context for command execution containing config, client, and runtime options.
pub struct CommandContext {
    /// Loaded configuration with command-line overrides applied
    pub config: Config,
    /// Authenticated API client
    pub client: Arc<OpsClient>,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// Loads the config file, applies the global overrides, validates the
    /// credentials and builds the HTTP client.
    ///
    /// # Errors
    /// Returns error if config cannot be loaded or credentials are missing.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let mut config = Config::load_at(opts.config_ref())?;
        opts.apply_to(&mut config);

        let client = Arc::new(OpsClient::from_config(&config)?);
        debug!("Using API host {}", client.base_url());

        let format = opts.resolve_format(&config);

        Ok(Self {
            config,
            client,
            format,
        })
    }

    /// Get the organization ID, returning an error if not set.
    pub fn require_org_id(&self) -> Result<&str> {
        self.config.require_org_id()
    }

    /// Team reconciler for this invocation.
    ///
    /// `with_defaults` asks for default resource cleanup, which needs a cloud ID.
    pub fn teams(&self, with_defaults: bool) -> Result<TeamReconciler<OpsClient>> {
        let scope = if with_defaults {
            self.config.api_scope()?
        } else {
            self.config.team_scope()?
        };
        Ok(TeamReconciler::new(self.client.clone(), scope))
    }

    /// Service manager for this invocation.
    pub fn services(&self) -> Result<ServiceManager<OpsClient>> {
        Ok(ServiceManager::new(self.client.clone(), self.config.api_scope()?))
    }
}
