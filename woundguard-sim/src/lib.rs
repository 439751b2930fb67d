//! Wound and sensor simulator for the WoundGuard alert engine
//!
//! Generates synthetic pH/temperature series from a latent infection
//! severity model, corrupts them the way the dressing's sensors do (white
//! noise plus slow random-walk drift), and drives a real
//! [`AlertEngine`](woundguard_core::AlertEngine) over the result.
//!
//! ```text
//! WoundModel ──clean──▶ SensorChannel ──noisy──▶ AlertEngine ──▶ SimulationRun
//!  (ISI curve)           (noise + drift)          (core crate)      (trace, first alert)
//! ```
//!
//! The [`sweep`] module repeats runs while varying one parameter at a time
//! to characterise detection latency and false-positive behaviour.
//!
//! ```
//! use woundguard_sim::{run_simulation, Scenario, SimulationConfig};
//!
//! let config = SimulationConfig {
//!     scenario: Scenario::Normal,
//!     days: 3,
//!     ..SimulationConfig::default()
//! };
//! let run = run_simulation(&config).unwrap();
//! assert!(!run.alert_triggered());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod channel;
pub mod errors;
pub mod noise;
pub mod simulation;
pub mod sweep;
pub mod wound;

pub use channel::{Measurand, SensorChannel};
pub use errors::{SimError, SimResult};
pub use noise::NoiseGenerator;
pub use simulation::{run_simulation, run_simulation_observed, NoiseSpec, SimulationConfig, SimulationRun, TracePoint};
pub use sweep::{run_suite, run_sweep, Suite, SweepConfig, SweepParams, SweepReport, SweepRow};
pub use wound::{Scenario, WoundModel};
