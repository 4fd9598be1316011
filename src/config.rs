//! Launcher configuration
//!
//! Settings are read from environment variables with sensible defaults;
//! command-line flags override them.
//!
//! - `ORACLE_TOOLS_MVN`: Maven executable - default: "mvn"
//! - `ORACLE_TOOLS_INQUIRY_PROFILE`: profile that echoes the configuration - default: "conf-inquiry"
//! - `ORACLE_TOOLS_TIMEOUT`: inquiry timeout in seconds - default: "300"
//! - `ORACLE_TOOLS_STRICT_BUNDLES`: reject POMs matching both Apex and database profiles - default: "false"
//! - `ORACLE_TOOLS_LOG_LEVEL`: logging level - default: "info"

use std::env;
use std::fmt;
use thiserror::Error;

const DEFAULT_MVN_PROGRAM: &str = "mvn";
const DEFAULT_INQUIRY_PROFILE: &str = "conf-inquiry";
const DEFAULT_TIMEOUT_SECS: u64 = 300;
const DEFAULT_LOG_LEVEL: &str = "info";
const MAX_TIMEOUT_SECS: u64 = 3600;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

#[derive(Debug, Clone)]
pub struct LauncherConfig {
    pub mvn_program: String,
    pub inquiry_profile: String,
    pub timeout_secs: u64,
    pub strict_bundles: bool,
    pub log_level: String,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        let mvn_program = env::var("ORACLE_TOOLS_MVN")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_MVN_PROGRAM.to_string());

        let inquiry_profile = env::var("ORACLE_TOOLS_INQUIRY_PROFILE")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_INQUIRY_PROFILE.to_string());

        let timeout_secs = env::var("ORACLE_TOOLS_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let strict_bundles = env::var("ORACLE_TOOLS_STRICT_BUNDLES")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        let log_level = env::var("ORACLE_TOOLS_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            mvn_program,
            inquiry_profile,
            timeout_secs,
            strict_bundles,
            log_level,
        }
    }
}

impl LauncherConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mvn_program.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Maven executable must not be empty".to_string(),
            ));
        }

        if self.inquiry_profile.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Inquiry profile must not be empty".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Timeout must be at least 1 second".to_string(),
            ));
        }
        if self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::ValidationFailed(
                "Timeout cannot exceed 1 hour".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }
}

impl fmt::Display for LauncherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Oracle Tools Configuration:")?;
        writeln!(f, "  Maven: {}", self.mvn_program)?;
        writeln!(f, "  Inquiry Profile: {}", self.inquiry_profile)?;
        writeln!(f, "  Timeout: {}s", self.timeout_secs)?;
        writeln!(f, "  Strict Bundles: {}", self.strict_bundles)?;
        write!(f, "  Log Level: {}", self.log_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "ORACLE_TOOLS_MVN",
            "ORACLE_TOOLS_INQUIRY_PROFILE",
            "ORACLE_TOOLS_TIMEOUT",
            "ORACLE_TOOLS_STRICT_BUNDLES",
            "ORACLE_TOOLS_LOG_LEVEL",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = LauncherConfig::default();

        assert_eq!(config.mvn_program, "mvn");
        assert_eq!(config.inquiry_profile, "conf-inquiry");
        assert_eq!(config.timeout_secs, 300);
        assert!(!config.strict_bundles);
        assert_eq!(config.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_from_env() {
        clear_env();
        env::set_var("ORACLE_TOOLS_MVN", "/opt/maven/bin/mvn");
        env::set_var("ORACLE_TOOLS_TIMEOUT", "42");
        env::set_var("ORACLE_TOOLS_STRICT_BUNDLES", "true");
        env::set_var("ORACLE_TOOLS_LOG_LEVEL", "DEBUG");

        let config = LauncherConfig::default();
        clear_env();

        assert_eq!(config.mvn_program, "/opt/maven/bin/mvn");
        assert_eq!(config.timeout_secs, 42);
        assert!(config.strict_bundles);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    #[serial]
    fn test_unparsable_timeout_falls_back() {
        clear_env();
        env::set_var("ORACLE_TOOLS_TIMEOUT", "soon");
        let config = LauncherConfig::default();
        clear_env();

        assert_eq!(config.timeout_secs, 300);
    }

    #[test]
    #[serial]
    fn test_validate_rejects_bad_values() {
        clear_env();
        let base = LauncherConfig::default();

        let mut config = base.clone();
        config.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = base.clone();
        config.timeout_secs = 7200;
        assert!(config.validate().is_err());

        let mut config = base.clone();
        config.log_level = "loud".to_string();
        assert!(config.validate().is_err());

        let mut config = base;
        config.inquiry_profile = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_display() {
        clear_env();
        let shown = LauncherConfig::default().to_string();
        assert!(shown.contains("Maven: mvn"));
        assert!(shown.contains("Timeout: 300s"));
    }
}
