use crate::error::{Result, SweepError};
use serde::Deserialize;
use std::path::PathBuf;
use xdg::BaseDirectories;

pub const DEFAULT_ROOT: &str = "/srv/drop";
pub const DEFAULT_ARCHIVE: &str = "/srv/drop-logs";

/// Login identity for transports that authenticate.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub name: String,
    pub secret: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigFile {
    root: Option<String>,
    archive: Option<String>,
    mount: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Base path holding the company folders.
    pub root: String,
    /// Directory receiving the run log.
    pub archive: String,
    /// Mount point the local backend serves paths from.
    pub mount: PathBuf,
    pub credentials: Option<Credentials>,
}

impl Config {
    /// Resolves configuration: explicit values win over the config file,
    /// which wins over the built-in defaults. The config file is taken from
    /// the override path, the `SWEEPER_CONFIG` environment variable, or the
    /// XDG config home, in that order.
    pub fn load(
        config_override: Option<PathBuf>,
        root: Option<String>,
        archive: Option<String>,
        mount: Option<PathBuf>,
    ) -> Result<Self> {
        let file = Self::read_file(config_override)?;

        let config = Config {
            root: root
                .or(file.root)
                .unwrap_or_else(|| DEFAULT_ROOT.to_string()),
            archive: archive
                .or(file.archive)
                .unwrap_or_else(|| DEFAULT_ARCHIVE.to_string()),
            mount: mount.or(file.mount).unwrap_or_else(|| PathBuf::from("/")),
            credentials: None,
        };

        config.validate()?;
        Ok(config)
    }

    fn read_file(config_override: Option<PathBuf>) -> Result<ConfigFile> {
        let path = if let Some(path) = config_override {
            Some(path)
        } else if let Ok(env_path) = std::env::var("SWEEPER_CONFIG") {
            Some(PathBuf::from(env_path))
        } else {
            BaseDirectories::with_prefix("sweeper")
                .ok()
                .and_then(|xdg| xdg.find_config_file("sweeper.toml"))
        };

        let path = match path {
            Some(path) => path,
            None => return Ok(ConfigFile::default()),
        };

        let contents = std::fs::read_to_string(&path)
            .map_err(|e| SweepError::Config(format!("Failed to read config file: {}", e)))?;
        toml::from_str(&contents)
            .map_err(|e| SweepError::Config(format!("Failed to parse config TOML: {}", e)))
    }

    pub fn validate(&self) -> Result<()> {
        if !self.root.starts_with('/') {
            return Err(SweepError::Config(format!(
                "Base path must be absolute: {}",
                self.root
            )));
        }
        if !self.archive.starts_with('/') {
            return Err(SweepError::Config(format!(
                "Archive path must be absolute: {}",
                self.archive
            )));
        }
        Ok(())
    }

    pub fn with_credentials(mut self, name: Option<String>, secret: Option<String>) -> Self {
        if let (Some(name), Some(secret)) = (name, secret) {
            self.credentials = Some(Credentials { name, secret });
        }
        self
    }
}
