use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::remote::HttpSettings;

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

pub const DEFAULT_ASSESSMENT_URL: &str = "https://backend-hydra.onrender.com/";
pub const DEFAULT_CHATBOT_URL: &str = "https://rag-1-7afi.onrender.com/";

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub remote: RemoteConfig,
    pub estimator: EstimatorSettings,
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

        let assessment_url =
            env::var("APP_ASSESSMENT_URL").unwrap_or_else(|_| DEFAULT_ASSESSMENT_URL.to_string());
        let chatbot_url =
            env::var("APP_CHATBOT_URL").unwrap_or_else(|_| DEFAULT_CHATBOT_URL.to_string());
        let timeout_secs = env::var("APP_HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidTimeout)?;

        let avg_annual_rainfall_mm = match env::var("APP_RAINFALL_MM") {
            Ok(raw) => {
                let value = raw
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| ConfigError::InvalidRainfall)?;
                if !value.is_finite() || value < 0.0 {
                    return Err(ConfigError::InvalidRainfall);
                }
                value
            }
            Err(_) => EstimatorSettings::DEFAULT_RAINFALL_MM,
        };

        let score_seed = match env::var("APP_SCORE_SEED") {
            Ok(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidSeed)?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            remote: RemoteConfig {
                assessment_url,
                chatbot_url,
                timeout: Duration::from_secs(timeout_secs),
            },
            estimator: EstimatorSettings {
                avg_annual_rainfall_mm,
                score_seed,
            },
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

/// Endpoints of the hosted assessment and chatbot backends.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub assessment_url: String,
    pub chatbot_url: String,
    pub timeout: Duration,
}

impl RemoteConfig {
    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            connect_timeout: self.timeout,
            request_timeout: self.timeout,
        }
    }
}

/// Estimator inputs that vary per deployment.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimatorSettings {
    pub avg_annual_rainfall_mm: f64,
    /// Fixes the score jitter sequence when present.
    pub score_seed: Option<u64>,
}

impl EstimatorSettings {
    pub const DEFAULT_RAINFALL_MM: f64 = 680.0;
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        Self {
            avg_annual_rainfall_mm: Self::DEFAULT_RAINFALL_MM,
            score_seed: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTimeout,
    InvalidRainfall,
    InvalidSeed,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTimeout => {
                write!(f, "APP_HTTP_TIMEOUT_SECS must be a whole number of seconds")
            }
            ConfigError::InvalidRainfall => {
                write!(f, "APP_RAINFALL_MM must be a non-negative number")
            }
            ConfigError::InvalidSeed => write!(f, "APP_SCORE_SEED must be a valid u64"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidTimeout
            | ConfigError::InvalidRainfall
            | ConfigError::InvalidSeed => None,
        }
    }
}
