//! Error Types for Alert Engine Configuration
//!
//! ## Design Philosophy
//!
//! The alert engine itself is total: `update` accepts any reading and any
//! clock value and never fails. The only thing that can go wrong is building
//! an engine whose window would be empty or would not fit in the fixed
//! buffer, so that is the only error surface the core carries.
//!
//! Errors follow the embedded rules used throughout the crate:
//!
//! 1. **Small Size**: numeric payloads only, no `String`.
//! 2. **No Heap Allocation**: messages are `&'static str`.
//! 3. **Copy Semantics**: errors are `Copy` and cheap to return.
//!
//! ```
//! use woundguard_core::{AlertEngine, ConfigError};
//!
//! match AlertEngine::new(0) {
//!     Err(ConfigError::ZeroSamplingInterval) => {
//!         // Fall back to the 15 minute default
//!     }
//!     _ => unreachable!(),
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for engine construction
pub type DetectorResult<T> = Result<T, ConfigError>;

/// Rejected engine configurations
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// A zero minute interval has no samples per hour
    #[error("Sampling interval must be at least 1 minute")]
    ZeroSamplingInterval,

    /// Intervals above one hour truncate to zero samples per hour
    #[error("Sampling interval {minutes} min exceeds {max} min")]
    SamplingIntervalTooLong {
        /// Requested interval in minutes
        minutes: u8,
        /// Longest interval that still yields one sample per hour
        max: u8,
    },

    /// The derived window does not fit in the fixed violation buffer
    #[error("Window of {required} samples exceeds capacity {capacity}")]
    WindowTooLarge {
        /// Samples the policy asks for
        required: usize,
        /// Fixed buffer capacity
        capacity: usize,
    },

    /// Policy value outside its meaningful range
    #[error("Invalid policy: {reason}")]
    InvalidPolicy {
        /// Which policy field was rejected
        reason: &'static str,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::ZeroSamplingInterval =>
                defmt::write!(fmt, "Sampling interval is zero"),
            Self::SamplingIntervalTooLong { minutes, max } =>
                defmt::write!(fmt, "Interval {} min exceeds {} min", minutes, max),
            Self::WindowTooLarge { required, capacity } =>
                defmt::write!(fmt, "Window {} exceeds capacity {}", required, capacity),
            Self::InvalidPolicy { reason } =>
                defmt::write!(fmt, "Invalid policy: {}", reason),
        }
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let err = ConfigError::SamplingIntervalTooLong { minutes: 90, max: 60 };
        assert_eq!(err.to_string(), "Sampling interval 90 min exceeds 60 min");

        let err = ConfigError::InvalidPolicy { reason: "rate threshold out of (0, 1]" };
        assert_eq!(err.to_string(), "Invalid policy: rate threshold out of (0, 1]");
    }
}
