//! Core alert engine for WoundGuard smart dressings
//!
//! Turns a periodic stream of wound-bed pH and temperature readings into a
//! single infection alert flag. Designed to run on the dressing's MCU.
//!
//! Key constraints:
//! - Patient-specific temperature baseline, learned from the first 24 hours
//! - An alert needs pH AND temperature elevated for most of a 12 hour window
//! - No allocation in `update` once calibration has finished
//! - `update` never fails; garbage in is processed as-is
//!
//! ```
//! use woundguard_core::AlertEngine;
//!
//! // One sample every 15 minutes
//! let mut engine = AlertEngine::new(15).unwrap();
//!
//! // Still calibrating: no alert possible yet
//! assert!(!engine.update(7.1, 36.8, 0));
//! assert!(!engine.is_baseline_locked());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

#[macro_use]
mod macros;

pub mod baseline;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod observer;
pub mod policy;
#[cfg(feature = "std")]
pub mod replay;
pub mod time;
pub mod window;

// Public API
pub use engine::{AlertEngine, AlertStatus, Phase};
pub use errors::{ConfigError, DetectorResult};
pub use observer::{AlertObserver, NoopObserver};
pub use policy::AlertPolicy;
pub use time::Hours;
pub use window::ViolationWindow;

#[cfg(feature = "log")]
pub use observer::LogObserver;

#[cfg(feature = "defmt")]
pub use observer::DefmtObserver;

#[cfg(feature = "std")]
pub use replay::{ReplayError, ReplayOutcome, ReplayResult, SensorReading};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
