//! Configuration management for OpsTeam

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Default API host for the teams and operations APIs
pub const DEFAULT_API_HOST: &str = "https://api.atlassian.com";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Account email used for basic authentication
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// API token paired with `email`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Default organization ID (teams API)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,

    /// Cloud (site) ID (operations API)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_id: Option<String>,

    /// API host override, mostly for testing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Page size used when listing team members
    #[serde(default = "default_member_page_size")]
    pub member_page_size: usize,
}

fn default_member_page_size() -> usize {
    50
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            format: None,
            member_page_size: default_member_page_size(),
        }
    }
}

/// Resolved, read-only view of the configuration handed to the API layer.
///
/// Built once per invocation; nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiScope {
    pub cloud_id: String,
    pub member_page_size: usize,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".opsteam").join("config.yaml"))
    }

    /// Resolve an optional explicit path against the default location
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an explicit path or the default location
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(Self::resolve_path(path)?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to an explicit path or the default location
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(Self::resolve_path(path)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // Credentials live in this file
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Validate that credentials are present
    pub fn validate_auth(&self) -> Result<()> {
        match (&self.email, &self.api_token) {
            (Some(email), Some(token)) if !email.is_empty() && !token.is_empty() => Ok(()),
            _ => Err(ConfigError::MissingCredentials.into()),
        }
    }

    /// Get the organization ID, returning an error if not set
    pub fn require_org_id(&self) -> Result<&str> {
        self.org_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ConfigError::MissingOrgId.into())
    }

    /// Get the cloud ID, returning an error if not set
    pub fn require_cloud_id(&self) -> Result<&str> {
        self.cloud_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ConfigError::MissingCloudId.into())
    }

    /// Effective API host without a trailing slash
    pub fn api_host(&self) -> String {
        self.api_host
            .as_deref()
            .unwrap_or(DEFAULT_API_HOST)
            .trim_end_matches('/')
            .to_string()
    }

    /// Resolve the scope used by the API layer; requires a cloud ID
    pub fn api_scope(&self) -> Result<ApiScope> {
        let cloud_id = self.require_cloud_id()?.to_string();
        self.scope_with(cloud_id)
    }

    /// Scope for team operations that never reach the operations API.
    ///
    /// The cloud ID is left empty when not configured.
    pub fn team_scope(&self) -> Result<ApiScope> {
        self.scope_with(self.cloud_id.clone().unwrap_or_default())
    }

    fn scope_with(&self, cloud_id: String) -> Result<ApiScope> {
        if self.preferences.member_page_size == 0 {
            return Err(
                ConfigError::Invalid("member_page_size must be greater than 0".to_string()).into(),
            );
        }

        Ok(ApiScope {
            cloud_id,
            member_page_size: self.preferences.member_page_size,
        })
    }
}
