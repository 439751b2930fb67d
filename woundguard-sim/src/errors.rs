//! Simulator errors

use thiserror_no_std::Error;
use woundguard_core::{ConfigError, ReplayError};

/// Result type for simulator operations
pub type SimResult<T> = Result<T, SimError>;

/// Everything that can stop a simulation or sweep
#[derive(Error, Debug)]
pub enum SimError {
    /// The alert engine rejected the sampling interval or policy
    #[error("Invalid detector configuration: {0}")]
    Config(#[from] ConfigError),

    /// Simulation parameters out of range
    #[error("Invalid simulation config: {reason}")]
    InvalidConfig {
        /// Which field was rejected
        reason: &'static str,
    },

    /// Reading a trace back failed
    #[error(transparent)]
    Replay(#[from] ReplayError),

    /// Writing a trace or report failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config JSON could not be parsed or produced
    #[error("Config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_engine_config_error() {
        let err: SimError = ConfigError::ZeroSamplingInterval.into();
        assert_eq!(
            err.to_string(),
            "Invalid detector configuration: Sampling interval must be at least 1 minute"
        );
    }

    #[test]
    fn invalid_config_names_reason() {
        let err = SimError::InvalidConfig { reason: "days is zero" };
        assert_eq!(err.to_string(), "Invalid simulation config: days is zero");
    }
}
