//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use mercurius_auth::{AuthSession, SessionConfig, SessionRegistry};
use mercurius_catalog::Currency;
use mercurius_store::{MemoryStore, Snapshot, UserService};

use crate::config::{CliConfig, ADMIN_PASSWORD_ENV, DATA_FILE_ENV};
use crate::output::Output;

const CONFIG_NAMES: [&str; 2] = ["mercurius.toml", ".mercurius.toml"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Directory relative paths in the config resolve against.
    pub root: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, root) = if let Some(path) = config_path {
            let root = Path::new(path)
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| cwd.clone());
            (CliConfig::load(path)?, root)
        } else {
            Self::find_config(&cwd).unwrap_or_else(|| (CliConfig::default(), cwd.clone()))
        };

        Ok(Self {
            config,
            output,
            cwd,
            root,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match CliConfig::load(config_path.to_str()?) {
                        Ok(config) => {
                            tracing::debug!(path = %config_path.display(), "using config file");
                            return Some((config, current));
                        }
                        Err(e) => {
                            tracing::warn!(
                                path = %config_path.display(),
                                error = %format!("{:#}", e),
                                "skipping config file"
                            );
                        }
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Path of the JSON data file.
    pub fn data_path(&self) -> PathBuf {
        match std::env::var(DATA_FILE_ENV) {
            Ok(path) if !path.is_empty() => self.resolve_path(&self.cwd, &path),
            _ => self.resolve_path(&self.root, &self.config.store.data_file),
        }
    }

    /// Load the store from the data file.
    pub fn open_store(&self) -> Result<MemoryStore> {
        let path = self.data_path();
        let snapshot = Snapshot::load(&path)
            .with_context(|| format!("Failed to load data file: {}", path.display()))?;
        self.output
            .debug(&format!("Loaded {} products from {}", snapshot.products.len(), path.display()));
        MemoryStore::try_from_snapshot(snapshot)
            .with_context(|| format!("Inconsistent data file: {}", path.display()))
    }

    /// Write the store back to the data file.
    pub fn save_store(&self, store: &MemoryStore) -> Result<()> {
        let path = self.data_path();
        store
            .snapshot()?
            .save(&path)
            .with_context(|| format!("Failed to write data file: {}", path.display()))?;
        self.output.debug(&format!("Saved {}", path.display()));
        Ok(())
    }

    pub fn currency(&self) -> Currency {
        self.config.display.currency
    }

    pub fn session_config(&self) -> Result<SessionConfig> {
        self.config.session.session_config()
    }

    /// Password from the environment, or an interactive prompt.
    pub fn password(&self, prompt: &str) -> Result<String> {
        if let Ok(password) = std::env::var(ADMIN_PASSWORD_ENV) {
            if !password.is_empty() {
                return Ok(password);
            }
        }
        dialoguer::Password::new()
            .with_prompt(prompt)
            .interact()
            .context("Failed to read password")
    }

    /// A new password from the environment, or a prompt asked twice.
    pub fn new_password(&self, prompt: &str) -> Result<String> {
        if let Ok(password) = std::env::var(ADMIN_PASSWORD_ENV) {
            if !password.is_empty() {
                return Ok(password);
            }
        }
        dialoguer::Password::new()
            .with_prompt(prompt)
            .with_confirmation("Repeat password", "Passwords do not match")
            .interact()
            .context("Failed to read password")
    }

    /// Sign in as the configured admin.
    pub fn admin_session(&self, store: &MemoryStore) -> Result<AuthSession> {
        let username = &self.config.admin.username;
        let password = self.password(&format!("Password for {}", username))?;
        let registry = SessionRegistry::new(self.session_config()?);
        let session = UserService::new(store)
            .login(&registry, username, &password)
            .with_context(|| format!("Sign-in failed for {}", username))?;
        self.output
            .debug(&format!("Signed in as {} ({})", username, session.id));
        Ok(session)
    }

    /// Resolve a path relative to `base`.
    fn resolve_path(&self, base: &Path, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            base.join(path)
        }
    }
}
