//! Configuration system for mentorship.

use serde::{Deserialize, Serialize};

use crate::error::{MentorshipError, MentorshipResult};
use crate::traits::StoreBackend;

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Store selection and connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Which backend to use.
    pub backend: StoreBackend,
    /// MongoDB connection string.
    pub mongodb_url: String,
    /// Database holding the `mentors` and `students` collections.
    pub database: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            mongodb_url: "mongodb://localhost:27017".to_string(),
            database: "mentor_student_db".to_string(),
        }
    }
}

/// Business rule switches for the assignment service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Reject single-student assignment to a mentor id that does not exist.
    pub verify_mentor_exists: bool,
}

/// Log output settings. The filter itself comes from `RUST_LOG`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

/// Main service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MentorshipConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub service: ServiceConfig,
    pub log: LogConfig,
}

impl MentorshipConfig {
    /// Load configuration from a file (TOML, JSON, or YAML).
    pub fn from_file(path: impl AsRef<std::path::Path>) -> MentorshipResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let ext = path.as_ref().extension().and_then(|e| e.to_str());

        match ext {
            Some("toml") => {
                toml::from_str(&content).map_err(|e| MentorshipError::Configuration(e.to_string()))
            }
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| MentorshipError::Configuration(e.to_string())),
            Some("yaml" | "yml") => serde_yaml::from_str(&content)
                .map_err(|e| MentorshipError::Configuration(e.to_string())),
            _ => Err(MentorshipError::Configuration(
                "Unsupported config file format. Use .toml, .json, or .yaml".to_string(),
            )),
        }
    }

    /// Load configuration from environment variables on top of the defaults.
    pub fn from_env() -> MentorshipResult<Self> {
        Self::default().apply_env()
    }

    /// Override fields from environment variables.
    ///
    /// Reads:
    /// - `MENTORSHIP_HOST`
    /// - `PORT` (default: 5000)
    /// - `MENTORSHIP_STORE` (`memory` or `mongodb`)
    /// - `MONGODB_URL`
    /// - `MONGODB_DATABASE`
    /// - `MENTORSHIP_VERIFY_MENTOR`
    /// - `MENTORSHIP_LOG_JSON`
    pub fn apply_env(self) -> MentorshipResult<Self> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    /// Override fields from an arbitrary variable source.
    pub fn apply_vars<F>(mut self, var: F) -> MentorshipResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = var("MENTORSHIP_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("PORT") {
            self.server.port = port.trim().parse().map_err(|_| {
                MentorshipError::Configuration(format!("PORT must be a valid port number, got '{}'", port))
            })?;
        }

        if let Some(backend) = var("MENTORSHIP_STORE") {
            self.store.backend = backend.parse()?;
        }
        if let Some(url) = var("MONGODB_URL") {
            self.store.mongodb_url = url;
        }
        if let Some(database) = var("MONGODB_DATABASE") {
            self.store.database = database;
        }

        if let Some(flag) = var("MENTORSHIP_VERIFY_MENTOR") {
            self.service.verify_mentor_exists = parse_flag("MENTORSHIP_VERIFY_MENTOR", &flag)?;
        }
        if let Some(flag) = var("MENTORSHIP_LOG_JSON") {
            self.log.json = parse_flag("MENTORSHIP_LOG_JSON", &flag)?;
        }

        Ok(self)
    }

    /// Build configuration using builder pattern.
    pub fn builder() -> MentorshipConfigBuilder {
        MentorshipConfigBuilder::default()
    }
}

fn parse_flag(name: &str, value: &str) -> MentorshipResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(MentorshipError::Configuration(format!(
            "{} must be a boolean, got '{}'",
            name, other
        ))),
    }
}

/// Builder for MentorshipConfig.
#[derive(Default)]
pub struct MentorshipConfigBuilder {
    config: MentorshipConfig,
}

impl MentorshipConfigBuilder {
    /// Set the bind host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.server.host = host.into();
        self
    }

    /// Set the listen port.
    pub fn port(mut self, port: u16) -> Self {
        self.config.server.port = port;
        self
    }

    /// Set store configuration.
    pub fn store(mut self, store: StoreConfig) -> Self {
        self.config.store = store;
        self
    }

    /// Require mentors to exist on single-student assignment.
    pub fn verify_mentor_exists(mut self, verify: bool) -> Self {
        self.config.service.verify_mentor_exists = verify;
        self
    }

    /// Switch JSON log output on or off.
    pub fn json_logs(mut self, json: bool) -> Self {
        self.config.log.json = json;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> MentorshipConfig {
        self.config
    }
}
