//! Patient temperature baseline
//!
//! Wound temperature depends on dressing placement, body site and the
//! patient, so the temperature check compares against a baseline learned
//! from the first day of wear rather than a fixed absolute value.
//!
//! The baseline is the median of the calibration samples taken by index:
//! sort ascending and pick element `len / 2`. Even counts pick one of the two
//! middle elements instead of averaging them, so the locked value is always
//! an actual reading and replays reproduce it exactly. The median ignores
//! the handful of wild readings a dressing produces while it settles.

use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::constants::buffers::MAX_CALIBRATION_SAMPLES_HINT;
use crate::time::{samples_per_hour, Hours};

/// Median of `samples` taken as the element at index `len / 2` after sorting.
///
/// Sorts `samples` in place. NaN readings sort after every number so they
/// never panic the sort. Returns `None` for an empty slice.
///
/// ```
/// use woundguard_core::baseline::lower_median;
///
/// let mut odd = [37.2, 36.8, 36.9];
/// assert_eq!(lower_median(&mut odd), Some(36.9));
///
/// // Even length: index 2 of [36.5, 36.7, 36.9, 37.1]
/// let mut even = [36.9, 36.5, 37.1, 36.7];
/// assert_eq!(lower_median(&mut even), Some(36.9));
/// ```
pub fn lower_median(samples: &mut [f32]) -> Option<f32> {
    if samples.is_empty() {
        return None;
    }
    samples.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or_else(|| nan_last(*a, *b)));
    Some(samples[samples.len() / 2])
}

fn nan_last(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        _ => Ordering::Less,
    }
}

/// Collects calibration temperatures until the baseline locks
#[derive(Debug, Clone, Default)]
pub struct BaselineCalibrator {
    samples: Vec<f32>,
}

impl BaselineCalibrator {
    /// Calibrator pre-sized for `calibration_hours` of samples
    pub fn with_expected(calibration_hours: Hours, interval_minutes: u8) -> Self {
        let expected = (calibration_hours as usize)
            .saturating_mul(samples_per_hour(interval_minutes) as usize)
            .saturating_add(1)
            .min(MAX_CALIBRATION_SAMPLES_HINT);

        Self {
            samples: Vec::with_capacity(expected),
        }
    }

    /// Record one calibration temperature
    pub fn record(&mut self, temp_c: f32) {
        self.samples.push(temp_c);
    }

    /// Samples recorded so far
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True before the first sample
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Consume the samples and produce the baseline
    pub fn finish(mut self) -> Option<f32> {
        lower_median(&mut self.samples)
    }
}
