//! CLI configuration.

use anyhow::{Context, Result};
use mercurius_auth::SessionConfig;
use mercurius_catalog::Currency;
use serde::{Deserialize, Serialize};

/// Environment variable overriding `store.data_file`.
pub const DATA_FILE_ENV: &str = "MERCURIUS_DATA_FILE";

/// Environment variable holding the admin password for non-interactive use.
pub const ADMIN_PASSWORD_ENV: &str = "MERCURIUS_ADMIN_PASSWORD";

/// CLI configuration file (`mercurius.toml`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Where the catalog lives.
    #[serde(default)]
    pub store: StoreConfig,

    /// The admin account used by mutating commands.
    #[serde(default)]
    pub admin: AdminConfig,

    /// Session settings.
    #[serde(default)]
    pub session: SessionSection,

    /// Display settings.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: Self = if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))?
        };
        config
            .validate()
            .with_context(|| format!("Invalid config: {}", path))?;
        Ok(config)
    }

    /// Check values serde cannot.
    pub fn validate(&self) -> Result<()> {
        self.session.session_config()?;
        Ok(())
    }
}

/// Store location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON data file, relative to the config file's directory.
    #[serde(default = "default_data_file")]
    pub data_file: String,
}

fn default_data_file() -> String {
    "data/mercurius.json".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
        }
    }
}

/// Admin account defaults used by `admin setup` and product commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_username")]
    pub username: String,

    #[serde(default = "default_admin_email")]
    pub email: String,

    #[serde(default = "default_admin_name")]
    pub name: String,
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_email() -> String {
    "admin@mercurius.com".to_string()
}

fn default_admin_name() -> String {
    "Administrador".to_string()
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: default_admin_username(),
            email: default_admin_email(),
            name: default_admin_name(),
        }
    }
}

/// Session lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSection {
    #[serde(default = "default_duration_hours")]
    pub duration_hours: i64,
}

fn default_duration_hours() -> i64 {
    SessionConfig::DEFAULT_HOURS
}

impl SessionSection {
    pub fn session_config(&self) -> Result<SessionConfig> {
        Ok(SessionConfig::hours(self.duration_hours)?)
    }
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            duration_hours: default_duration_hours(),
        }
    }
}

/// Display settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Currency used to format prices.
    #[serde(default)]
    pub currency: Currency,
}

/// Generate a default mercurius.toml config file.
pub fn generate_default_config() -> String {
    r#"# Mercurius catalog configuration

[store]
data_file = "data/mercurius.json"

[admin]
username = "admin"
email = "admin@mercurius.com"
name = "Administrador"

[session]
duration_hours = 720

[display]
currency = "BRL"
"#
    .to_string()
}
