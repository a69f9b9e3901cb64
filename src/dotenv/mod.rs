//! Environment scaffolding parameters
//!
//! The parameters are written to `.env` by [`generator::DotenvGenerator`];
//! they start from built-in defaults or from an entry of a sites file.

pub mod generator;

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::core::SiteResult;

pub use generator::DotenvGenerator;

/// Sites file read by `--load-from-yml` when no path is given
pub const DEFAULT_SITES_FILE: &str = "~/.console/sites/local.yml";

const DEFAULTS: &[(&str, &str)] = &[
    ("environment", "develop"),
    ("database_name", "drupal"),
    ("database_user", "drupal"),
    ("database_password", "drupal"),
    ("database_host", "mariadb"),
    ("database_port", "3306"),
    ("host_name", "drupal.develop"),
    ("host_port", "80"),
    ("drupal_root", "/var/www/html"),
    ("server_root", "/var/www/html/web"),
];

/// Ordered key/value parameters for the environment file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvParameters {
    entries: Vec<(String, String)>,
}

impl Default for EnvParameters {
    fn default() -> Self {
        Self {
            entries: DEFAULTS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl EnvParameters {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set a value, keeping the position of an existing key
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_set(&self, key: &str) -> bool {
        matches!(self.get(key), Some(v) if !v.is_empty() && v != "false")
    }

    /// Parameters for `env` from a sites file, `None` when the file has no such entry
    pub fn from_sites_file(path: &Path, env: &str) -> SiteResult<Option<Self>> {
        tracing::debug!("Loading site parameters for '{}' from {}", env, path.display());
        let content = std::fs::read_to_string(path)?;
        let mut sites: HashMap<String, SiteEntry> = serde_yaml::from_str(&content)?;

        let Some(site) = sites.remove(env) else {
            return Ok(None);
        };
        let db = site.db.unwrap_or_default();

        let mut parameters = Self { entries: Vec::new() };
        parameters.set("environment", env);
        parameters.set("database_name", text(db.name, ""));
        parameters.set("database_user", text(db.user, ""));
        parameters.set("database_password", text(db.pass, ""));
        parameters.set("database_host", text(db.host, ""));
        parameters.set("database_port", text(db.port, "3306"));
        parameters.set("host_name", text(site.host_name, ""));
        parameters.set("host_port", text(site.host_port, "80"));
        parameters.set("drupal_root", text(site.root, ""));
        parameters.set("server_root", text(site.server_root, ""));
        Ok(Some(parameters))
    }

    /// Render as `KEY=value` lines
    pub fn to_dotenv(&self) -> String {
        let mut out = String::from("# Generated by sitectl dotenv:init\n");
        for (key, value) in self.iter() {
            out.push_str(&key.to_uppercase());
            out.push('=');
            out.push_str(&dotenv_value(value));
            out.push('\n');
        }
        out
    }
}

fn dotenv_value(value: &str) -> String {
    if value.chars().any(|c| c.is_whitespace() || c == '#' || c == '"' || c == '\'') {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

fn text(value: Option<Scalar>, default: &str) -> String {
    match value {
        Some(Scalar::Text(s)) => s,
        Some(Scalar::Number(n)) => n.to_string(),
        None => default.to_string(),
    }
}

/// String or numeric YAML scalar
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Number(i64),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct SiteEntry {
    root: Option<Scalar>,
    server_root: Option<Scalar>,
    host_name: Option<Scalar>,
    host_port: Option<Scalar>,
    db: Option<DbEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct DbEntry {
    name: Option<Scalar>,
    user: Option<Scalar>,
    pass: Option<Scalar>,
    host: Option<Scalar>,
    port: Option<Scalar>,
}
