use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::engine::ENTAILMENT_THRESHOLD;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the engine and the service around it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub engine: EngineConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            engine: EngineConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Which entailment backend backs the semantic stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticBackend {
    Lexical,
    Disabled,
}

impl SemanticBackend {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lexical" => Ok(Self::Lexical),
            "disabled" | "off" | "none" => Ok(Self::Disabled),
            _ => Err(ConfigError::InvalidSemanticBackend {
                value: value.to_string(),
            }),
        }
    }
}

/// Rule source, report sink and semantic stage settings.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub rules_path: PathBuf,
    pub report_dir: PathBuf,
    pub semantic_backend: SemanticBackend,
    pub entailment_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rules_path: PathBuf::from("rules.json"),
            report_dir: PathBuf::from("reports"),
            semantic_backend: SemanticBackend::Lexical,
            entailment_threshold: ENTAILMENT_THRESHOLD,
        }
    }
}

impl EngineConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let rules_path = env::var("AUDIT_RULES_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.rules_path);
        let report_dir = env::var("AUDIT_REPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.report_dir);

        let semantic_backend = match env::var("AUDIT_SEMANTIC_BACKEND") {
            Ok(value) => SemanticBackend::parse(&value)?,
            Err(_) => defaults.semantic_backend,
        };

        let entailment_threshold = match env::var("AUDIT_ENTAILMENT_THRESHOLD") {
            Ok(value) => value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|t| t.is_finite() && *t > 0.0 && *t <= 1.0)
                .ok_or(ConfigError::InvalidEntailmentThreshold { value })?,
            Err(_) => defaults.entailment_threshold,
        };

        Ok(Self {
            rules_path,
            report_dir,
            semantic_backend,
            entailment_threshold,
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidSemanticBackend { value: String },
    InvalidEntailmentThreshold { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidSemanticBackend { value } => write!(
                f,
                "AUDIT_SEMANTIC_BACKEND must be 'lexical' or 'disabled', got '{value}'"
            ),
            ConfigError::InvalidEntailmentThreshold { value } => write!(
                f,
                "AUDIT_ENTAILMENT_THRESHOLD must be a number in (0, 1], got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidSemanticBackend { .. }
            | ConfigError::InvalidEntailmentThreshold { .. } => None,
        }
    }
}
