//! Telemetry hooks for the alert engine
//!
//! The engine does no I/O. Anything that wants to hear about baseline locks
//! or alert transitions (serial console, BLE notification, host logger, a
//! test) implements [`AlertObserver`] and is handed to
//! [`AlertEngine::with_observer`](crate::AlertEngine::with_observer).
//!
//! Every method has an empty default, so an observer only implements what it
//! cares about. Observers are called synchronously from inside `update`;
//! keep them short.
//!
//! ```
//! use woundguard_core::{AlertEngine, AlertObserver, Hours};
//!
//! #[derive(Default)]
//! struct BaselineProbe {
//!     locked_at: Option<Hours>,
//! }
//!
//! impl AlertObserver for BaselineProbe {
//!     fn on_baseline_locked(&mut self, _baseline_c: f32, uptime_hours: Hours) {
//!         self.locked_at = Some(uptime_hours);
//!     }
//! }
//!
//! let mut probe = BaselineProbe::default();
//! let mut engine = AlertEngine::new(60).unwrap().with_observer(&mut probe);
//! for hour in 0..=24 {
//!     engine.update(6.5, 36.8, hour);
//! }
//! drop(engine);
//! assert_eq!(probe.locked_at, Some(24));
//! ```

use crate::engine::AlertStatus;
use crate::time::Hours;

/// Receives engine state transitions
pub trait AlertObserver {
    /// Baseline temperature has just been fixed
    fn on_baseline_locked(&mut self, _baseline_c: f32, _uptime_hours: Hours) {}

    /// Violation rate reached the threshold; alert went inactive → active
    fn on_alert_raised(&mut self, _status: &AlertStatus) {}

    /// Violation rate dropped below the threshold; alert went active → inactive
    fn on_alert_cleared(&mut self, _status: &AlertStatus) {}
}

impl<O: AlertObserver + ?Sized> AlertObserver for &mut O {
    fn on_baseline_locked(&mut self, baseline_c: f32, uptime_hours: Hours) {
        (**self).on_baseline_locked(baseline_c, uptime_hours)
    }

    fn on_alert_raised(&mut self, status: &AlertStatus) {
        (**self).on_alert_raised(status)
    }

    fn on_alert_cleared(&mut self, status: &AlertStatus) {
        (**self).on_alert_cleared(status)
    }
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl AlertObserver for NoopObserver {}

/// Observer that writes transitions to the `log` facade
#[cfg(feature = "log")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

#[cfg(feature = "log")]
impl AlertObserver for LogObserver {
    fn on_baseline_locked(&mut self, baseline_c: f32, uptime_hours: Hours) {
        log::info!("Baseline locked: {:.2} degrees C (t={}h)", baseline_c, uptime_hours);
    }

    fn on_alert_raised(&mut self, status: &AlertStatus) {
        log::warn!(
            "Infection alert raised at t={}h: {}/{} samples violating ({:.0}%)",
            status.uptime_hours,
            status.violation_count,
            status.window_size,
            status.violation_rate * 100.0,
        );
    }

    fn on_alert_cleared(&mut self, status: &AlertStatus) {
        log::info!(
            "Infection alert cleared at t={}h: {}/{} samples violating",
            status.uptime_hours,
            status.violation_count,
            status.window_size,
        );
    }
}

/// Observer that writes transitions over defmt (RTT / serial on the dressing)
#[cfg(feature = "defmt")]
#[derive(Debug, Clone, Copy, Default)]
pub struct DefmtObserver;

#[cfg(feature = "defmt")]
impl AlertObserver for DefmtObserver {
    fn on_baseline_locked(&mut self, baseline_c: f32, uptime_hours: Hours) {
        defmt::info!("Baseline locked: {} degrees C (t={}h)", baseline_c, uptime_hours);
    }

    fn on_alert_raised(&mut self, status: &AlertStatus) {
        defmt::warn!(
            "Infection alert raised at t={}h: {}/{} samples violating",
            status.uptime_hours,
            status.violation_count,
            status.window_size,
        );
    }

    fn on_alert_cleared(&mut self, status: &AlertStatus) {
        defmt::info!("Infection alert cleared at t={}h", status.uptime_hours);
    }
}
