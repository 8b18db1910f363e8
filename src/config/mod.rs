use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::cli::Cli;

/// Feature flags the console UI knows how to read.
pub const KNOWN_FEATURE_FLAGS: &[&str] = &["MY_REQUESTS"];

/// Prefix of environment variables that switch a feature flag.
pub const FEATURE_FLAG_ENV_PREFIX: &str = "FEATURE_FLAG_";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown feature flag '{0}'")]
    UnknownFeatureFlag(String),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub feature_flags: BTreeMap<String, bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            feature_flags: KNOWN_FEATURE_FLAGS
                .iter()
                .map(|name| (name.to_string(), false))
                .collect(),
        }
    }
}

impl Settings {
    /// Create settings from CLI arguments (config file, `FEATURE_FLAG_*` env vars, CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let mut settings = Self::from_file(&cli.config)?;

        // CLI > env vars > config file
        settings.apply_feature_flag_env(std::env::vars());
        settings.apply_cli_overrides(cli);

        Ok(settings)
    }

    /// Load settings from a TOML file. A missing file yields the defaults.
    pub fn from_file(config_path: &Path) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .add_source(File::from(config_path).required(false))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .build()?;

        let mut settings: Settings = s.try_deserialize()?;
        settings.normalize_feature_flags()?;

        Ok(settings)
    }

    /// Apply `FEATURE_FLAG_<NAME>` variables for known flags. A flag is on
    /// only when its variable is exactly `"true"`.
    pub fn apply_feature_flag_env<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            let Some(name) = key.strip_prefix(FEATURE_FLAG_ENV_PREFIX) else {
                continue;
            };
            if !KNOWN_FEATURE_FLAGS.contains(&name) {
                tracing::debug!("Ignoring {} for unknown feature flag", key);
                continue;
            }
            let active = value == "true";
            tracing::debug!("Feature flag {} set to {} from environment", name, active);
            self.feature_flags.insert(name.to_string(), active);
        }
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
    }

    /// Upper-case flag names, reject unknown ones and default the rest to off.
    fn normalize_feature_flags(&mut self) -> Result<(), ConfigError> {
        let mut flags = BTreeMap::new();
        for (name, active) in std::mem::take(&mut self.feature_flags) {
            let name = name.to_ascii_uppercase();
            if !KNOWN_FEATURE_FLAGS.contains(&name.as_str()) {
                return Err(ConfigError::UnknownFeatureFlag(name));
            }
            flags.insert(name, active);
        }
        for name in KNOWN_FEATURE_FLAGS {
            flags.entry(name.to_string()).or_insert(false);
        }
        self.feature_flags = flags;
        Ok(())
    }

    pub fn active_feature_flags(&self) -> impl Iterator<Item = &str> {
        self.feature_flags
            .iter()
            .filter(|(_, active)| **active)
            .map(|(name, _)| name.as_str())
    }
}
