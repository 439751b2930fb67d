//! Buffer Sizes and Memory Constraints
//!
//! Fixed capacities so the monitoring path never touches the allocator.

use super::policy::{CALIBRATION_HOURS, PERSISTENCE_HOURS};
use super::time::{MINUTES_PER_HOUR, MIN_SAMPLING_INTERVAL_MINUTES};

/// Samples per hour at the fastest supported sampling rate.
const MAX_SAMPLES_PER_HOUR: usize = (MINUTES_PER_HOUR / MIN_SAMPLING_INTERVAL_MINUTES) as usize;

/// Capacity of the violation window (flags).
///
/// Sized for the default 12 hour persistence at 1 minute sampling:
/// - 720 flags × 1 byte = 720 bytes
/// - 48 flags are used at the default 15 minute rate
pub const MAX_WINDOW_SAMPLES: usize = PERSISTENCE_HOURS as usize * MAX_SAMPLES_PER_HOUR;

/// Calibration samples expected at the fastest sampling rate.
///
/// Used only as an allocation hint; calibration keeps accepting samples
/// past this if the caller's clock stalls below 24 hours.
pub const MAX_CALIBRATION_SAMPLES_HINT: usize = CALIBRATION_HOURS as usize * MAX_SAMPLES_PER_HOUR + 1;
