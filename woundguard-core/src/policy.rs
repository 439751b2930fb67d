//! Alert policy
//!
//! The thresholds an engine judges readings against. The clinical default is
//! the set of constants in [`crate::constants::policy`]; other policies exist
//! only so the simulation tooling can sweep thresholds. A policy is fixed
//! when the engine is built and cannot be changed afterwards.

use crate::constants::policy::{
    CALIBRATION_HOURS, PERSISTENCE_HOURS, PH_THRESHOLD, TEMP_DELTA_THRESHOLD_C,
    VIOLATION_RATE_THRESHOLD,
};
use crate::errors::{ConfigError, DetectorResult};
use crate::time::Hours;

/// Thresholds for the infection alert
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlertPolicy {
    /// pH above which a reading violates
    pub ph_threshold: f32,

    /// Rise above baseline (°C) above which a reading violates
    pub temp_delta_threshold_c: f32,

    /// Span of the violation window in hours
    pub persistence_hours: Hours,

    /// Fraction of the window that must violate, in (0, 1]
    pub violation_rate_threshold: f32,

    /// Elapsed hours before the baseline locks
    pub calibration_hours: Hours,
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self {
            ph_threshold: PH_THRESHOLD,
            temp_delta_threshold_c: TEMP_DELTA_THRESHOLD_C,
            persistence_hours: PERSISTENCE_HOURS,
            violation_rate_threshold: VIOLATION_RATE_THRESHOLD,
            calibration_hours: CALIBRATION_HOURS,
        }
    }
}

impl AlertPolicy {
    /// Override the pH threshold
    pub fn with_ph_threshold(mut self, threshold: f32) -> Self {
        self.ph_threshold = threshold;
        self
    }

    /// Override the temperature delta threshold
    pub fn with_temp_delta_threshold(mut self, threshold_c: f32) -> Self {
        self.temp_delta_threshold_c = threshold_c;
        self
    }

    /// Override the violation rate threshold
    pub fn with_violation_rate_threshold(mut self, rate: f32) -> Self {
        self.violation_rate_threshold = rate;
        self
    }

    /// Check the policy can drive an engine
    pub fn validate(&self) -> DetectorResult<()> {
        if !self.ph_threshold.is_finite() {
            return Err(ConfigError::InvalidPolicy { reason: "pH threshold is not finite" });
        }
        if !self.temp_delta_threshold_c.is_finite() {
            return Err(ConfigError::InvalidPolicy {
                reason: "temperature delta threshold is not finite",
            });
        }
        if !(self.violation_rate_threshold > 0.0 && self.violation_rate_threshold <= 1.0) {
            return Err(ConfigError::InvalidPolicy { reason: "rate threshold out of (0, 1]" });
        }
        if self.persistence_hours == 0 {
            return Err(ConfigError::InvalidPolicy { reason: "persistence span is zero" });
        }
        Ok(())
    }

    /// Fewest violating samples that raise the alert in a full window of
    /// `window_size`.
    ///
    /// Uses the same `f32` comparison as the engine, so a threshold that does
    /// not divide the window evenly rounds up (0.9 of 48 needs 44).
    pub fn required_violations(&self, window_size: usize) -> usize {
        let size = window_size as f32;
        (0..=window_size)
            .find(|&n| n as f32 / size >= self.violation_rate_threshold)
            .unwrap_or(window_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_constants() {
        let policy = AlertPolicy::default();
        assert_eq!(policy.ph_threshold, 7.5);
        assert_eq!(policy.temp_delta_threshold_c, 1.0);
        assert_eq!(policy.persistence_hours, 12);
        assert_eq!(policy.violation_rate_threshold, 0.75);
        assert_eq!(policy.calibration_hours, 24);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn rejects_bad_rate_threshold() {
        for rate in [0.0, -0.1, 1.01, f32::NAN] {
            let policy = AlertPolicy::default().with_violation_rate_threshold(rate);
            assert!(matches!(policy.validate(), Err(ConfigError::InvalidPolicy { .. })));
        }

        let policy = AlertPolicy::default().with_violation_rate_threshold(1.0);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn rejects_non_finite_thresholds() {
        let policy = AlertPolicy::default().with_ph_threshold(f32::INFINITY);
        assert!(policy.validate().is_err());

        let policy = AlertPolicy::default().with_temp_delta_threshold(f32::NAN);
        assert!(policy.validate().is_err());
    }

    #[test]
    fn required_violations_for_default_window() {
        let policy = AlertPolicy::default();
        assert_eq!(policy.required_violations(48), 36);
        assert_eq!(policy.required_violations(96), 72);
        assert_eq!(policy.required_violations(24), 18);
    }

    #[test]
    fn required_violations_rounds_up_between_counts() {
        let policy = AlertPolicy::default().with_violation_rate_threshold(0.9);
        assert_eq!(policy.required_violations(48), 44);
        assert_eq!(policy.required_violations(96), 87);

        let policy = AlertPolicy::default().with_violation_rate_threshold(1.0);
        assert_eq!(policy.required_violations(48), 48);
    }
}
