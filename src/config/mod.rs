//! Machine and timing configuration.
//!
//! Configuration is plain serde data so hosts can ship it as JSON. Both types
//! validate with stillwater's `Validation`, reporting every problem in one
//! pass instead of stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use tickset::config::{MachineConfig, TimingPolicy};
//!
//! let config = MachineConfig::from_json(r#"{ "history_capacity": 8 }"#).unwrap();
//! assert_eq!(config.history_capacity, 8);
//!
//! let policy = TimingPolicy::from_json(
//!     r#"{ "recovery_ms": 3000, "throttle_ms": 100, "delay_ms": 1000 }"#,
//! )
//! .unwrap();
//! assert_eq!(policy.throttle_ms, Some(100));
//! ```

use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub mod error;

pub use error::ConfigError;

/// Upper bound on the transition log size
pub const MAX_HISTORY_CAPACITY: usize = 4096;

/// Default transition log size
pub const DEFAULT_HISTORY_CAPACITY: usize = 32;

/// Settings for a [`crate::core::StateMachine`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Number of transitions kept in the machine's log. Zero disables it.
    pub history_capacity: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl MachineConfig {
    /// Decode and validate a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        into_result(config.validate())?;
        Ok(config)
    }

    /// Check every rule, accumulating all violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigError>>> = Vec::new();

        let check = if self.history_capacity > MAX_HISTORY_CAPACITY {
            Validation::fail(ConfigError::HistoryCapacityTooLarge {
                max: MAX_HISTORY_CAPACITY,
                found: self.history_capacity,
            })
        } else {
            Validation::success(())
        };
        checks.push(check);

        Validation::all_vec(checks).map(|_| ())
    }
}

/// Decorator timings applied to a state chain.
///
/// Applied by [`crate::builder::StateBuilder::with_policy`] in the canonical
/// order: recovery innermost, then throttle, then delay outermost. Unset
/// fields skip that decorator.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingPolicy {
    /// Maximum time the state may run before recovery kicks in
    pub recovery_ms: Option<u64>,
    /// Minimum spacing between ticks reaching the state
    pub throttle_ms: Option<u64>,
    /// Time after construction before the chain becomes current
    pub delay_ms: Option<u64>,
}

impl TimingPolicy {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let policy: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        into_result(policy.validate())?;
        Ok(policy)
    }

    /// Check every rule, accumulating all violations.
    ///
    /// A zero throttle interval would let every tick through and a zero
    /// recovery duration would abandon the state on its second tick; both
    /// are treated as misconfiguration.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigError>>> = Vec::new();

        if let Some(throttle_ms) = self.throttle_ms {
            let check = if throttle_ms == 0 {
                Validation::fail(ConfigError::ZeroThrottleInterval)
            } else {
                Validation::success(())
            };
            checks.push(check);
        }

        if let Some(recovery_ms) = self.recovery_ms {
            let check = if recovery_ms == 0 {
                Validation::fail(ConfigError::ZeroRecoveryDuration)
            } else {
                Validation::success(())
            };
            checks.push(check);
        }

        Validation::all_vec(checks).map(|_| ())
    }
}

/// Collapse a validation outcome into a `Result`, keeping every violation.
pub(crate) fn into_result(
    validation: Validation<(), NonEmptyVec<ConfigError>>,
) -> Result<(), ConfigError> {
    match validation {
        Validation::Success(_) => Ok(()),
        Validation::Failure(errors) => Err(ConfigError::Invalid(errors.iter().cloned().collect())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(into_result(MachineConfig::default().validate()).is_ok());
        assert!(into_result(TimingPolicy::default().validate()).is_ok());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = MachineConfig::from_json("{}").unwrap();
        assert_eq!(config, MachineConfig::default());

        let policy = TimingPolicy::from_json(r#"{ "throttle_ms": 100 }"#).unwrap();
        assert_eq!(policy.throttle_ms, Some(100));
        assert_eq!(policy.recovery_ms, None);
        assert_eq!(policy.delay_ms, None);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = MachineConfig::from_json("{ history_capacity: ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn oversized_history_is_rejected() {
        let result = MachineConfig::from_json(r#"{ "history_capacity": 100000 }"#);
        assert_eq!(
            result,
            Err(ConfigError::Invalid(vec![ConfigError::HistoryCapacityTooLarge {
                max: MAX_HISTORY_CAPACITY,
                found: 100_000,
            }]))
        );
    }

    #[test]
    fn policy_accumulates_all_violations() {
        let policy = TimingPolicy {
            recovery_ms: Some(0),
            throttle_ms: Some(0),
            delay_ms: Some(0),
        };

        match policy.validate() {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ConfigError::ZeroThrottleInterval)));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ConfigError::ZeroRecoveryDuration)));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn zero_delay_is_allowed() {
        let policy = TimingPolicy {
            delay_ms: Some(0),
            ..TimingPolicy::default()
        };
        assert!(into_result(policy.validate()).is_ok());
    }

    #[test]
    fn policy_round_trips_through_json() {
        let policy = TimingPolicy {
            recovery_ms: Some(3_000),
            throttle_ms: Some(100),
            delay_ms: Some(1_000),
        };
        let json = serde_json::to_string(&policy).unwrap();
        assert_eq!(TimingPolicy::from_json(&json).unwrap(), policy);
    }
}
