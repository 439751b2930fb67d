//! Elapsed-time handling for the dressing
//!
//! The engine never reads a clock itself. The caller owns the time source
//! (RTC, tick counter, replayed CSV column) and hands in whole elapsed hours
//! since the dressing was applied.

use crate::constants::time::MINUTES_PER_HOUR;

/// Elapsed hours since the session began
pub type Hours = u32;

/// Samples produced per hour at `interval_minutes`.
///
/// Truncating division, so 7 minutes gives 8 samples per hour (56 minutes)
/// rather than 8.57. Returns 0 for intervals of zero or above one hour.
pub const fn samples_per_hour(interval_minutes: u8) -> u32 {
    if interval_minutes == 0 {
        return 0;
    }
    (MINUTES_PER_HOUR / interval_minutes) as u32
}

/// Convert fractional elapsed hours to the whole hours the engine expects.
///
/// Floors toward zero. Negative and NaN inputs map to 0 and values beyond
/// `Hours::MAX` saturate.
pub fn whole_hours(elapsed_hours: f32) -> Hours {
    if !(elapsed_hours > 0.0) {
        return 0;
    }
    // `as` saturates on overflow
    libm::floorf(elapsed_hours) as Hours
}

/// Elapsed hours at sample `index` for a fixed sampling interval.
pub fn sample_time_hours(index: u32, interval_minutes: u8) -> f32 {
    index as f32 * interval_minutes as f32 / MINUTES_PER_HOUR as f32
}
