//! CLI command definitions and handlers

use clap::{Args, Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod context;
pub mod init;
pub mod service;
pub mod status;
pub mod team;

pub use args::OutputFormat;
pub use context::CommandContext;

/// OpsTeam CLI - team lifecycle management for operations platforms
#[derive(Parser, Debug)]
#[command(name = "opsteam")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json) [default: pretty, or the config preference]
    #[arg(
        long,
        global = true,
        env = "OPSTEAM_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override default organization
    #[arg(long, global = true, env = "OPSTEAM_ORG_ID", hide_env = true)]
    pub org: Option<String>,

    /// Override cloud (site) ID used by the operations API
    #[arg(long, global = true, env = "OPSTEAM_CLOUD_ID", hide_env = true)]
    pub cloud_id: Option<String>,

    /// Override config file location
    #[arg(long, global = true, env = "OPSTEAM_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override API host (for testing)
    #[arg(long, global = true, env = "OPSTEAM_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "OPSTEAM_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the configuration file (credentials, organization, cloud ID)
    Init(InitArgs),

    /// Show authentication and configuration status
    Status,

    /// Manage teams
    #[command(subcommand)]
    Team(TeamCommands),

    /// Manage services
    #[command(subcommand)]
    Service(ServiceCommands),

    /// Generate shell completions
    #[command(after_help = "\
  bash:   opsteam completion bash > /etc/bash_completion.d/opsteam
  zsh:    opsteam completion zsh > \"${fpath[1]}/_opsteam\"
  fish:   opsteam completion fish > ~/.config/fish/completions/opsteam.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for `init`
#[derive(Debug, Clone, Default, Args)]
pub struct InitArgs {
    /// Account email used for basic authentication
    #[arg(long, env = "OPSTEAM_EMAIL", hide_env = true)]
    pub email: Option<String>,

    /// API token paired with the email
    #[arg(long, env = "OPSTEAM_API_TOKEN", hide_env = true, hide_env_values = true)]
    pub api_token: Option<String>,
}

/// Team management subcommands
#[derive(Subcommand, Debug)]
pub enum TeamCommands {
    /// Create a team and reconcile its members
    Create(TeamCreateArgs),

    /// Show a team and its members
    Get {
        /// Team ID
        team_id: String,
    },

    /// Update a team's attributes and members
    Update(TeamUpdateArgs),

    /// Delete a team
    Delete {
        /// Team ID
        team_id: String,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Look up an existing team by `<team_id>,<organization_id>`
    Import {
        /// Import identifier
        import_id: String,
    },
}

/// Arguments for `team create`
#[derive(Debug, Clone, Args)]
pub struct TeamCreateArgs {
    /// Team display name
    #[arg(long)]
    pub name: String,

    /// Team description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Team type (e.g. OPEN, MEMBER_INVITE, EXTERNAL)
    #[arg(long = "type", default_value = "OPEN")]
    pub team_type: String,

    /// Member account ID (repeatable)
    #[arg(long = "member", short = 'm')]
    pub members: Vec<String>,

    /// Remove the routing rule, escalation and schedule created with the team
    #[arg(long)]
    pub delete_defaults: bool,
}

/// Arguments for `team update`
#[derive(Debug, Clone, Args)]
pub struct TeamUpdateArgs {
    /// Team ID
    pub team_id: String,

    /// New display name
    #[arg(long)]
    pub name: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// Replace the member list (repeatable)
    #[arg(long = "member", short = 'm', conflicts_with_all = ["add_members", "remove_members"])]
    pub members: Vec<String>,

    /// Add a member (repeatable)
    #[arg(long = "add-member")]
    pub add_members: Vec<String>,

    /// Remove a member (repeatable)
    #[arg(long = "remove-member")]
    pub remove_members: Vec<String>,
}

/// Service management subcommands
#[derive(Subcommand, Debug)]
pub enum ServiceCommands {
    /// Create a service
    Create(ServiceArgs),

    /// Show a service
    Get {
        /// Service ID
        service_id: String,
    },

    /// Update a service
    Update {
        /// Service ID
        service_id: String,

        #[command(flatten)]
        args: ServiceArgs,
    },

    /// Delete a service
    Delete {
        /// Service ID
        service_id: String,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

/// Service attributes; on update, only the given ones change
#[derive(Debug, Clone, Args, Default)]
pub struct ServiceArgs {
    /// Service name
    #[arg(long)]
    pub name: Option<String>,

    /// Service description
    #[arg(long)]
    pub description: Option<String>,

    /// Tier, 1 (most critical) to 4
    #[arg(long)]
    pub tier: Option<i32>,

    /// Service type (SOFTWARE_SERVICES, BUSINESS_SERVICES, CAPABILITIES_SERVICES, APPLICATIONS)
    #[arg(long = "type")]
    pub service_type: Option<String>,

    /// Owner team ID
    #[arg(long)]
    pub owner: Option<String>,

    /// Responder team ID (repeatable)
    #[arg(long = "responder-team")]
    pub responder_teams: Vec<String>,

    /// Responder user account ID (repeatable)
    #[arg(long = "responder-user")]
    pub responder_users: Vec<String>,

    /// Stakeholder user account ID (repeatable)
    #[arg(long = "stakeholder")]
    pub stakeholders: Vec<String>,

    /// Change approver group ID (repeatable)
    #[arg(long = "approver-group")]
    pub approver_groups: Vec<String>,

    /// Project ID (repeatable)
    #[arg(long = "project")]
    pub projects: Vec<String>,
}
