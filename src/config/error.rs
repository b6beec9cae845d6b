//! Configuration error types.

use thiserror::Error;

/// Errors that can occur when loading or applying configuration
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// JSON input could not be decoded
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("History capacity {found} exceeds maximum {max}")]
    HistoryCapacityTooLarge { max: usize, found: usize },

    #[error("Throttle interval must be greater than zero")]
    ZeroThrottleInterval,

    #[error("Recovery duration must be greater than zero")]
    ZeroRecoveryDuration,

    /// A recovery duration was configured without a state to recover into
    #[error("Recovery duration set but no fallback state given")]
    MissingFallback,

    /// Every violation found by a validation pass
    #[error("Invalid configuration: {0:?}")]
    Invalid(Vec<ConfigError>),
}
