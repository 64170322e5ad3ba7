use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::assessment::status::DEFAULT_VALID_FEE_CODES;

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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub assessment: AssessmentConfig,
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

        let assessment = AssessmentConfig::from_env()?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                ansi: environment == AppEnvironment::Development,
            },
            assessment,
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
    pub ansi: bool,
}

/// Business settings for the assessment workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentConfig {
    /// Fixed-fee codes for which Crime claims may have assessed totals entered.
    pub valid_fee_codes: Vec<String>,
    /// Assessed total (incl. VAT) at or above which a submission is logged for audit.
    pub high_value_assessment_limit: Decimal,
}

impl AssessmentConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let valid_fee_codes = match env::var("APP_VALID_FEE_CODES") {
            Ok(raw) => {
                let codes: Vec<String> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|code| !code.is_empty())
                    .map(str::to_string)
                    .collect();
                if codes.is_empty() {
                    return Err(ConfigError::EmptyFeeCodes);
                }
                codes
            }
            Err(_) => defaults.valid_fee_codes,
        };

        let high_value_assessment_limit = match env::var("APP_HIGH_VALUE_ASSESSMENT_LIMIT") {
            Ok(raw) => Decimal::from_str(raw.trim())
                .ok()
                .filter(|limit| !limit.is_sign_negative())
                .ok_or(ConfigError::InvalidHighValueLimit { value: raw })?,
            Err(_) => defaults.high_value_assessment_limit,
        };

        Ok(Self {
            valid_fee_codes,
            high_value_assessment_limit,
        })
    }
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            valid_fee_codes: DEFAULT_VALID_FEE_CODES
                .iter()
                .map(|code| code.to_string())
                .collect(),
            high_value_assessment_limit: Decimal::new(2_500_000, 2),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidHighValueLimit { value: String },
    EmptyFeeCodes,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidHighValueLimit { value } => write!(
                f,
                "APP_HIGH_VALUE_ASSESSMENT_LIMIT must be a non-negative amount, got '{value}'"
            ),
            ConfigError::EmptyFeeCodes => {
                write!(f, "APP_VALID_FEE_CODES must list at least one fee code")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidHighValueLimit { .. }
            | ConfigError::EmptyFeeCodes => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_VALID_FEE_CODES");
        env::remove_var("APP_HIGH_VALUE_ASSESSMENT_LIMIT");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.assessment.valid_fee_codes, vec!["INVC".to_string()]);
        assert_eq!(config.assessment.high_value_assessment_limit, dec!(25000.00));
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn fee_codes_are_read_as_a_trimmed_list() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_VALID_FEE_CODES", " INVC, INVM ,,");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(
            config.assessment.valid_fee_codes,
            vec!["INVC".to_string(), "INVM".to_string()]
        );
        reset_env();
    }

    #[test]
    fn rejects_blank_fee_code_list_and_negative_limit() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_VALID_FEE_CODES", " , ");
        match AppConfig::load() {
            Err(ConfigError::EmptyFeeCodes) => {}
            other => panic!("expected empty fee code error, got {other:?}"),
        }

        reset_env();
        env::set_var("APP_HIGH_VALUE_ASSESSMENT_LIMIT", "-1");
        match AppConfig::load() {
            Err(ConfigError::InvalidHighValueLimit { value }) => assert_eq!(value, "-1"),
            other => panic!("expected invalid limit error, got {other:?}"),
        }
        reset_env();
    }
}
