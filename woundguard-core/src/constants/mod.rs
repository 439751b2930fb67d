//! Constants for WoundGuard Core
//!
//! Centralized numeric values used by the alert engine. Nothing in the engine
//! should carry a magic number; if it needs one, it lives here.
//!
//! ## Organization
//!
//! - **Policy**: clinical alert thresholds (fixed at design time)
//! - **Time**: unit conversions and the supported sampling intervals
//! - **Buffers**: fixed capacities for the violation window and calibration
//!
//! ## Usage Guidelines
//!
//! 1. Policy values are validated against the phase 1 simulation study;
//!    changing one shifts every alert timing
//! 2. Include units in the name (`_HOURS`, `_C`, `_MINUTES`)

/// Clinical alert policy: pH and temperature thresholds, persistence span.
pub mod policy;

/// Time conversions and sampling interval limits.
pub mod time;

/// Buffer capacities for embedded targets.
pub mod buffers;

// Re-export commonly used constants for convenience
pub use policy::{
    PH_THRESHOLD, TEMP_DELTA_THRESHOLD_C, PERSISTENCE_HOURS,
    VIOLATION_RATE_THRESHOLD, CALIBRATION_HOURS,
};

pub use time::{MINUTES_PER_HOUR, DEFAULT_SAMPLING_INTERVAL_MINUTES};

pub use buffers::MAX_WINDOW_SAMPLES;
