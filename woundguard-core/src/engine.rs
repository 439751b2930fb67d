//! Infection Alert Engine
//!
//! ## Overview
//!
//! One engine watches one dressing. Every sampling tick the caller hands it
//! a pH reading, a temperature reading and the elapsed whole hours since the
//! dressing went on; it answers with the current alert state.
//!
//! ## Phases
//!
//! ```text
//!              uptime >= 24h (same call falls through)
//! CALIBRATING ─────────────────────────────────────────▶ MONITORING
//!  collect temps                                         judge every reading
//!  always "no alert"                                     never goes back
//! ```
//!
//! ### Calibrating
//! Every temperature is recorded. On the first reading whose uptime reaches
//! the calibration span, the baseline locks to the median of everything
//! recorded so far, including that reading, and the same reading is then
//! judged as the first monitoring sample.
//!
//! ### Monitoring
//! A reading *violates* when pH is above 7.5 **and** temperature is more than
//! 1.0 °C above baseline. Either alone is normal wound variation. Violation
//! flags go into a window covering the last 12 hours of samples. Until that
//! window is full the engine stays quiet; after that the alert is on exactly
//! when at least 75% of the window violates.
//!
//! ```text
//! 15 min sampling → 48 sample window → alert needs 36 violations
//!
//! [T T F T T T ... T F T]   37/48 = 77% → alert
//! [T F F T F T ... F F T]   20/48 = 42% → no alert
//! ```
//!
//! A single spiking reading cannot raise the alert and a single normal
//! reading cannot clear it. The cost is latency: sustained infection is
//! flagged roughly 9 hours after it becomes continuous.
//!
//! ## Caller Contract
//!
//! - `uptime_hours` should not decrease. It is not checked: after lock a
//!   backwards jump changes nothing, and a clock that never reaches 24 keeps
//!   the engine calibrating forever.
//! - Readings are not range-checked. Validation belongs to the acquisition
//!   layer; NaN never compares above a threshold so it never violates.
//! - The engine is not synchronized. Share it across threads only behind a
//!   mutex.

use core::mem;

use crate::baseline::BaselineCalibrator;
use crate::constants::time::MAX_SAMPLING_INTERVAL_MINUTES;
use crate::errors::{ConfigError, DetectorResult};
use crate::observer::{AlertObserver, NoopObserver};
use crate::policy::AlertPolicy;
use crate::time::{samples_per_hour, Hours};
use crate::window::ViolationWindow;

/// Where the engine is in its lifecycle
#[derive(Debug, Clone)]
pub enum Phase {
    /// Collecting temperatures for the baseline
    Calibrating(BaselineCalibrator),

    /// Baseline fixed; readings are being judged
    Monitoring {
        /// Locked baseline temperature (°C)
        baseline_c: f32,
    },
}

impl Phase {
    /// True until the baseline locks
    pub fn is_calibrating(&self) -> bool {
        matches!(self, Phase::Calibrating(_))
    }

    /// Locked baseline, if any
    pub fn baseline(&self) -> Option<f32> {
        match self {
            Phase::Monitoring { baseline_c } => Some(*baseline_c),
            Phase::Calibrating(_) => None,
        }
    }
}

/// Point-in-time snapshot of engine state for diagnostics and telemetry
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlertStatus {
    /// Current alert state
    pub alert_active: bool,
    /// Whether calibration has finished
    pub baseline_locked: bool,
    /// Locked baseline temperature, once available
    pub baseline_c: Option<f32>,
    /// Last elapsed time handed to `update`
    pub uptime_hours: Hours,
    /// Configured window size in samples
    pub window_size: usize,
    /// Flags currently in the window
    pub window_len: usize,
    /// Violating flags currently in the window
    pub violation_count: usize,
    /// Fewest violations that raise the alert once the window is full
    pub required_violations: usize,
    /// `violation_count / window_len`, 0 for an empty window
    pub violation_rate: f32,
}

/// Calibrating, windowed-persistence infection detector
///
/// ```
/// use woundguard_core::AlertEngine;
///
/// let mut engine = AlertEngine::new(15).unwrap();
/// assert_eq!(engine.window_size(), 48);
///
/// // First day: calibration at a steady 36.8 °C
/// for k in 0..96 {
///     assert!(!engine.update(6.8, 36.8, k / 4));
/// }
///
/// // Hour 24 locks the baseline and is judged in the same call
/// engine.update(6.8, 36.8, 24);
/// assert_eq!(engine.baseline(), Some(36.8));
/// assert_eq!(engine.window_len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct AlertEngine<O: AlertObserver = NoopObserver> {
    policy: AlertPolicy,
    sampling_interval_minutes: u8,
    phase: Phase,
    window: ViolationWindow,
    alert_active: bool,
    uptime_hours: Hours,
    observer: O,
}

impl AlertEngine<NoopObserver> {
    /// Engine with the clinical policy for the given sampling interval
    ///
    /// The window holds `12 * (60 / sampling_interval_minutes)` samples,
    /// with the division truncating: 7 minutes gives 8 samples per hour and
    /// a 96 sample window. Intervals of 0 or above 60 minutes are rejected.
    pub fn new(sampling_interval_minutes: u8) -> DetectorResult<Self> {
        Self::with_policy(sampling_interval_minutes, AlertPolicy::default())
    }

    /// Engine with a non-default policy, fixed for its lifetime
    pub fn with_policy(sampling_interval_minutes: u8, policy: AlertPolicy) -> DetectorResult<Self> {
        if sampling_interval_minutes == 0 {
            return Err(ConfigError::ZeroSamplingInterval);
        }
        if sampling_interval_minutes > MAX_SAMPLING_INTERVAL_MINUTES {
            return Err(ConfigError::SamplingIntervalTooLong {
                minutes: sampling_interval_minutes,
                max: MAX_SAMPLING_INTERVAL_MINUTES,
            });
        }
        policy.validate()?;

        let window_size = (policy.persistence_hours as usize)
            .saturating_mul(samples_per_hour(sampling_interval_minutes) as usize);
        let window = ViolationWindow::new(window_size)?;

        log_debug!(
            "alert engine: {} min sampling, {} sample window",
            sampling_interval_minutes,
            window_size
        );

        Ok(Self {
            policy,
            sampling_interval_minutes,
            phase: Phase::Calibrating(BaselineCalibrator::with_expected(
                policy.calibration_hours,
                sampling_interval_minutes,
            )),
            window,
            alert_active: false,
            uptime_hours: 0,
            observer: NoopObserver,
        })
    }
}

impl<O: AlertObserver> AlertEngine<O> {
    /// Replace the observer, keeping all state
    pub fn with_observer<P: AlertObserver>(self, observer: P) -> AlertEngine<P> {
        AlertEngine {
            policy: self.policy,
            sampling_interval_minutes: self.sampling_interval_minutes,
            phase: self.phase,
            window: self.window,
            alert_active: self.alert_active,
            uptime_hours: self.uptime_hours,
            observer,
        }
    }

    /// Feed one sampling tick and get the alert state back
    ///
    /// Returns `false` throughout calibration and until the window has
    /// filled after calibration. Never fails.
    pub fn update(&mut self, ph: f32, temp_c: f32, uptime_hours: Hours) -> bool {
        self.uptime_hours = uptime_hours;

        if let Phase::Calibrating(calibrator) = &mut self.phase {
            calibrator.record(temp_c);
            if uptime_hours < self.policy.calibration_hours {
                return false;
            }

            let calibrator = mem::take(calibrator);
            log_debug!("baseline from {} calibration samples", calibrator.len());
            // Never empty here: this reading was just recorded
            let baseline_c = calibrator.finish().unwrap_or(temp_c);
            self.phase = Phase::Monitoring { baseline_c };

            self.observer.on_baseline_locked(baseline_c, uptime_hours);
        }

        let Phase::Monitoring { baseline_c } = self.phase else {
            return false;
        };

        let ph_violated = ph > self.policy.ph_threshold;
        let temp_violated = (temp_c - baseline_c) > self.policy.temp_delta_threshold_c;
        self.window.push(ph_violated && temp_violated);

        if !self.window.is_full() {
            return false;
        }

        let rate = self.window_fill_rate();
        let was_active = self.alert_active;
        self.alert_active = rate >= self.policy.violation_rate_threshold;

        if self.alert_active != was_active {
            log_trace!("alert {} -> {} at rate {}", was_active, self.alert_active, rate);
            let status = self.status();
            if self.alert_active {
                self.observer.on_alert_raised(&status);
            } else {
                self.observer.on_alert_cleared(&status);
            }
        }

        self.alert_active
    }

    /// Back to the freshly constructed state
    ///
    /// Clears the window, the alert and the baseline and restarts
    /// calibration. Policy, window size and observer are kept.
    pub fn reset(&mut self) {
        self.phase = Phase::Calibrating(BaselineCalibrator::with_expected(
            self.policy.calibration_hours,
            self.sampling_interval_minutes,
        ));
        self.window.clear();
        self.alert_active = false;
        self.uptime_hours = 0;
    }

    /// Latest computed alert state
    pub fn is_alert_active(&self) -> bool {
        self.alert_active
    }

    /// Locked baseline temperature; `None` while calibrating
    pub fn baseline(&self) -> Option<f32> {
        self.phase.baseline()
    }

    /// Whether calibration has finished
    pub fn is_baseline_locked(&self) -> bool {
        !self.phase.is_calibrating()
    }

    /// Fraction of violating flags in the window as it stands (0 if empty)
    pub fn violation_rate(&self) -> f32 {
        self.window.rate()
    }

    /// Violating flags over the full window size, the quantity the alert
    /// threshold is compared against
    ///
    /// Differs from [`violation_rate`](Self::violation_rate) only while the
    /// window is still filling.
    pub fn window_fill_rate(&self) -> f32 {
        self.window.violation_count() as f32 / self.window.capacity() as f32
    }

    /// Violating flags in the window
    pub fn violation_count(&self) -> usize {
        self.window.violation_count()
    }

    /// Configured window size in samples
    pub fn window_size(&self) -> usize {
        self.window.capacity()
    }

    /// Flags currently in the window
    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// The violation window, oldest flag first
    pub fn window(&self) -> &ViolationWindow {
        &self.window
    }

    /// Last elapsed time handed to `update`
    pub fn uptime_hours(&self) -> Hours {
        self.uptime_hours
    }

    /// Policy this engine judges against
    pub fn policy(&self) -> &AlertPolicy {
        &self.policy
    }

    /// Sampling interval the window was sized for
    pub fn sampling_interval_minutes(&self) -> u8 {
        self.sampling_interval_minutes
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Attached observer
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Attached observer, mutably
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Snapshot of everything a dashboard or test wants to see
    pub fn status(&self) -> AlertStatus {
        AlertStatus {
            alert_active: self.alert_active,
            baseline_locked: self.is_baseline_locked(),
            baseline_c: self.baseline(),
            uptime_hours: self.uptime_hours,
            window_size: self.window_size(),
            window_len: self.window_len(),
            violation_count: self.violation_count(),
            required_violations: self.policy.required_violations(self.window_size()),
            violation_rate: self.violation_rate(),
        }
    }
}
