use std::env;
use std::fmt;
use thiserror::Error;

const DEFAULT_HIDDEN_PREFIX: char = '.';
const DEFAULT_LOG_LEVEL: &str = "info";

pub const ENV_HIDDEN_PREFIX: &str = "BOOKMARK_LOCATOR_HIDDEN_PREFIX";
pub const ENV_LATEST_POLICY: &str = "BOOKMARK_LOCATOR_LATEST_POLICY";
pub const ENV_LOG_LEVEL: &str = "BOOKMARK_LOCATOR_LOG_LEVEL";

/// How the latest-file selector treats a first entry that is hidden or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LatestFilePolicy {
    /// Only visible, non-directory entries are ever candidates.
    #[default]
    Strict,
    /// The first listed entry is the starting candidate even if it would be
    /// filtered out, and is returned unless a later candidate is at least as new.
    Compatible,
}

impl LatestFilePolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "strict" => Some(LatestFilePolicy::Strict),
            "compatible" | "compat" => Some(LatestFilePolicy::Compatible),
            _ => None,
        }
    }

    pub fn from_env() -> Self {
        env::var(ENV_LATEST_POLICY)
            .ok()
            .and_then(|v| Self::parse(&v))
            .unwrap_or_default()
    }
}

impl fmt::Display for LatestFilePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LatestFilePolicy::Strict => f.write_str("strict"),
            LatestFilePolicy::Compatible => f.write_str("compatible"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

#[derive(Debug, Clone)]
pub struct LocatorConfig {
    pub hidden_prefix: char,
    pub latest_file_policy: LatestFilePolicy,
    pub log_level: String,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        let hidden_prefix = env::var(ENV_HIDDEN_PREFIX)
            .ok()
            .and_then(|v| v.chars().next())
            .unwrap_or(DEFAULT_HIDDEN_PREFIX);

        let log_level = env::var(ENV_LOG_LEVEL)
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            hidden_prefix,
            latest_file_policy: LatestFilePolicy::from_env(),
            log_level,
        }
    }
}

impl LocatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hidden_prefix.is_whitespace() || self.hidden_prefix.is_control() {
            return Err(ConfigError::ValidationFailed(format!(
                "Hidden prefix must be a visible character, got {:?}",
                self.hidden_prefix
            )));
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

impl fmt::Display for LocatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bookmark Locator Configuration:")?;
        writeln!(f, "  Hidden Prefix: {:?}", self.hidden_prefix)?;
        writeln!(f, "  Latest File Policy: {}", self.latest_file_policy)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}
