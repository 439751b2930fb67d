//! Clinical Alert Policy
//!
//! Thresholds for the infection alert. These were frozen after the phase 1
//! simulation study (normal healing vs. infection, 10 day runs, noise and
//! drift at datasheet levels) and are not adjustable at runtime.

use crate::time::Hours;

// ===== SINGLE-SAMPLE THRESHOLDS =====

/// Wound-bed pH above which a reading counts as alkaline (violating).
///
/// Healing wounds trend acidic (pH 5.5-6.5). Sustained alkaline shift above
/// 7.5 is associated with bacterial colonisation.
pub const PH_THRESHOLD: f32 = 7.5;

/// Temperature rise above the patient baseline that counts as violating (°C).
///
/// Measured against the calibrated baseline rather than an absolute
/// temperature, so dressing placement and patient variation cancel out.
/// Tightened from 1.5 °C during the phase 1 study.
pub const TEMP_DELTA_THRESHOLD_C: f32 = 1.0;

// ===== PERSISTENCE =====

/// Span of the rolling violation window (hours).
pub const PERSISTENCE_HOURS: Hours = 12;

/// Fraction of window samples that must violate to raise the alert.
///
/// 75% means 36 of 48 samples at 15 minute sampling.
pub const VIOLATION_RATE_THRESHOLD: f32 = 0.75;

// ===== CALIBRATION =====

/// Elapsed hours of data used to learn the temperature baseline.
///
/// The baseline locks on the first sample whose elapsed time reaches this.
pub const CALIBRATION_HOURS: Hours = 24;
