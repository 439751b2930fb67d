//! Time-Related Constants
//!
//! The engine works in whole elapsed hours and whole sampling minutes.

use crate::time::Hours;

/// Minutes per hour.
pub const MINUTES_PER_HOUR: u8 = 60;

/// Hours per day.
pub const HOURS_PER_DAY: Hours = 24;

/// Default sampling interval (minutes).
///
/// 15 minutes gives 96 calibration samples and a 48 sample window while
/// keeping the dressing's coin cell alive for the 7 day wear period.
pub const DEFAULT_SAMPLING_INTERVAL_MINUTES: u8 = 15;

/// Shortest supported sampling interval (minutes).
pub const MIN_SAMPLING_INTERVAL_MINUTES: u8 = 1;

/// Longest supported sampling interval (minutes).
///
/// Anything longer yields zero samples per hour and an empty window.
pub const MAX_SAMPLING_INTERVAL_MINUTES: u8 = MINUTES_PER_HOUR;
