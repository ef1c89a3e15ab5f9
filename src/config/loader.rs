//! Configuration loading from disk and the environment.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ConfigViolation};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_violations(.0))]
    Validation(Vec<ConfigViolation>),
}

fn join_violations(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Command line and environment overrides.
///
/// Every flag can also be supplied through the environment variable named
/// next to it, which is how container deployments configure the service.
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "resilient-gitops",
    version,
    about = "HTTP service with a CPU stress endpoint for autoscaling demos"
)]
pub struct CliArgs {
    /// Optional TOML configuration file.
    ///
    /// Environment variable: `APP_CONFIG`
    #[arg(short, long, env = "APP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Port to listen on, on all interfaces. Overrides the file's bind address.
    ///
    /// Environment variable: `PORT`
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Log level: debug, info, warn or error.
    ///
    /// Environment variable: `LOG_LEVEL`
    #[arg(long, env = "LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

impl AppConfig {
    /// Resolve the effective configuration: defaults, then the optional file,
    /// then `PORT` / `LOG_LEVEL` overrides, then validation.
    pub fn resolve(args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config: AppConfig = match &args.config {
            Some(path) => {
                let content = fs::read_to_string(path)?;
                toml::from_str(&content)?
            }
            None => AppConfig::default(),
        };

        if let Some(port) = args.port {
            config.listener.bind_address = format!("0.0.0.0:{}", port);
        }
        if let Some(level) = &args.log_level {
            config.observability.log_level = level.clone();
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogFormat;

    #[test]
    fn test_parse_partial_file() {
        let config = parse_config(
            r#"
            [observability]
            log_format = "pretty"

            [stress]
            cores = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.observability.log_format, LogFormat::Pretty);
        assert_eq!(config.observability.log_level, "info");
        assert_eq!(config.stress.cores, Some(4));
        assert_eq!(config.stress.max_duration_secs, 30);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn test_parse_rejects_invalid_values() {
        let err = parse_config("[stress]\nmax_duration_secs = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("stress.max_duration_secs"));
    }

    #[test]
    fn test_parse_rejects_bad_toml() {
        let err = parse_config("[listener\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_env_style_overrides() {
        let args = CliArgs {
            config: None,
            port: Some(9090),
            log_level: Some("debug".into()),
        };
        let config = AppConfig::resolve(&args).unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:9090");
        assert_eq!(config.observability.log_level, "debug");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let args = CliArgs {
            config: Some(PathBuf::from("/definitely/not/here.toml")),
            ..CliArgs::default()
        };
        assert!(matches!(AppConfig::resolve(&args), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::try_parse_from(["resilient-gitops", "--port", "3000", "--log-level", "warn"])
            .unwrap();
        assert_eq!(args.port, Some(3000));
        assert_eq!(args.log_level.as_deref(), Some("warn"));
    }
}
