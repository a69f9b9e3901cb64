//! Configuration handling for sitectl
//!
//! Supports sitectl.toml in the site root, a user-level sitectl.toml in the
//! platform config directory, and environment variable overrides.

use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::core::{SiteError, SiteResult};

/// Name of the configuration file looked up in the site root
pub const CONFIG_FILE: &str = "sitectl.toml";

/// Connection used when a command names none
pub const DEFAULT_CONNECTION: &str = "default";

/// Web root used when no configuration file sets one
pub const DEFAULT_DOCROOT: &str = "web";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site layout
    pub site: SiteConfig,

    /// Database connections keyed by connection name
    pub databases: BTreeMap<String, Connection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Web root relative to the site root, when a file sets one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docroot: Option<PathBuf>,
}

/// Supported database drivers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Driver {
    Mysql,
    Pgsql,
}

impl Driver {
    /// Parse a driver name as written in settings files
    pub fn parse(name: &str) -> SiteResult<Self> {
        match name.to_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Driver::Mysql),
            "pgsql" | "postgres" | "postgresql" => Ok(Driver::Pgsql),
            other => Err(SiteError::UnsupportedDriver(other.to_string())),
        }
    }
}

impl TryFrom<String> for Driver {
    type Error = SiteError;

    fn try_from(name: String) -> SiteResult<Self> {
        Driver::parse(&name)
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Driver::Mysql => write!(f, "mysql"),
            Driver::Pgsql => write!(f, "pgsql"),
        }
    }
}

/// A single database connection record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Connection {
    pub driver: Driver,
    pub database: String,
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        let mut databases = BTreeMap::new();
        databases.insert(DEFAULT_CONNECTION.to_string(), Connection::default());
        Self {
            site: SiteConfig::default(),
            databases,
        }
    }
}

impl Default for Connection {
    fn default() -> Self {
        Self {
            driver: Driver::Mysql,
            database: "drupal".to_string(),
            username: "drupal".to_string(),
            password: String::new(),
            host: "127.0.0.1".to_string(),
            port: 3306,
            prefix: String::new(),
        }
    }
}

impl Config {
    /// Load configuration for a site root and merge with defaults
    pub fn load(site_root: &Path) -> SiteResult<Self> {
        let mut config = Config::default();

        if let Some(user_file) = Self::user_config_file() {
            if user_file.exists() {
                config = config.merge(Self::read_file(&user_file)?);
            }
        }

        let site_file = site_root.join(CONFIG_FILE);
        if site_file.exists() {
            config = config.merge(Self::read_file(&site_file)?);
        }

        Ok(config.apply_env_overrides())
    }

    fn read_file(path: &Path) -> SiteResult<Config> {
        tracing::debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Location of the user-level configuration file, if the platform has one
    pub fn user_config_file() -> Option<PathBuf> {
        ProjectDirs::from("org", "sitectl", "sitectl")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(self, other: Config) -> Self {
        let docroot = other.site.docroot.or(self.site.docroot);

        let mut databases = self.databases;
        databases.extend(other.databases);

        Self {
            site: SiteConfig { docroot },
            databases,
        }
    }

    /// Apply environment variable overrides to the default connection
    ///
    /// Variable names match the ones written by `dotenv:init`.
    fn apply_env_overrides(mut self) -> Self {
        let connection = self
            .databases
            .entry(DEFAULT_CONNECTION.to_string())
            .or_default();

        if let Ok(driver) = env::var("DATABASE_DRIVER") {
            match Driver::parse(&driver) {
                Ok(driver) => connection.driver = driver,
                Err(e) => tracing::warn!("Ignoring DATABASE_DRIVER: {}", e),
            }
        }

        if let Ok(name) = env::var("DATABASE_NAME") {
            connection.database = name;
        }

        if let Ok(user) = env::var("DATABASE_USER") {
            connection.username = user;
        }

        if let Ok(password) = env::var("DATABASE_PASSWORD") {
            connection.password = password;
        }

        if let Ok(host) = env::var("DATABASE_HOST") {
            connection.host = host;
        }

        if let Ok(port) = env::var("DATABASE_PORT") {
            if let Ok(n) = port.parse() {
                connection.port = n;
            }
        }

        self
    }

    /// Resolve a connection by key
    pub fn connection(&self, key: &str) -> SiteResult<&Connection> {
        self.databases
            .get(key)
            .ok_or_else(|| SiteError::ConnectionNotFound(key.to_string()))
    }

    /// Absolute web root for a site root
    pub fn docroot(&self, site_root: &Path) -> PathBuf {
        match &self.site.docroot {
            Some(docroot) => site_root.join(docroot),
            None => site_root.join(DEFAULT_DOCROOT),
        }
    }
}
