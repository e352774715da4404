//! Error types for reward accounting

use thiserror::Error;

/// Result type alias for reward operations
pub type Result<T> = std::result::Result<T, RewardError>;

/// Errors that can occur while computing rewards
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RewardError {
    /// A numeric argument violated its precondition
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A tier schedule broke ordering or range rules
    #[error("Invalid tier schedule: {0}")]
    InvalidSchedule(String),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RewardError {
    /// Get the error code for API responses
    pub fn code(&self) -> u32 {
        match self {
            Self::InvalidInput(_) => 1001,
            Self::InvalidSchedule(_) => 1002,
            Self::Config(_) => 1003,
        }
    }

    pub(crate) fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub(crate) fn invalid_schedule(msg: impl Into<String>) -> Self {
        Self::InvalidSchedule(msg.into())
    }
}

impl From<::config::ConfigError> for RewardError {
    fn from(err: ::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Reject negative, NaN and infinite amounts.
pub(crate) fn ensure_non_negative(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(RewardError::invalid_input(format!(
            "{name} must be finite, got {value}"
        )));
    }
    if value < 0.0 {
        return Err(RewardError::invalid_input(format!(
            "{name} must be non-negative, got {value}"
        )));
    }
    Ok(())
}

/// Reject anything outside `[0, 100]`.
pub(crate) fn ensure_percentage(name: &str, value: f64) -> Result<()> {
    ensure_non_negative(name, value)?;
    if value > 100.0 {
        return Err(RewardError::invalid_input(format!(
            "{name} must not exceed 100, got {value}"
        )));
    }
    Ok(())
}
