//! One-at-a-time robustness sweep
//!
//! Starting from the clinical operating point, each [`Suite`] varies a
//! single parameter across a fixed set of values and runs both scenarios at
//! every value:
//!
//! | Suite               | Values               |
//! |---------------------|----------------------|
//! | sampling interval   | 5, 15, 30, 60 min    |
//! | noise multiplier    | ×1, ×2, ×3           |
//! | pH threshold        | 7.3, 7.5, 7.7        |
//! | ΔT threshold        | 0.8, 1.0, 1.2 °C     |
//! | violation threshold | 0.60, 0.75, 0.90     |
//!
//! The detector itself is never modified; only its policy and the sensor
//! conditions change. A normal-scenario row that alerts is a false positive.

use std::io::Write;

use serde::{Deserialize, Serialize};
use woundguard_core::constants::time::DEFAULT_SAMPLING_INTERVAL_MINUTES;
use woundguard_core::AlertPolicy;

use crate::errors::SimResult;
use crate::simulation::{run_simulation, SimulationConfig, DEFAULT_DAYS, DEFAULT_SEED};
use crate::wound::Scenario;

/// Parameters a sweep can vary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepParams {
    /// Minutes between samples
    pub sampling_interval_minutes: u8,
    /// White-noise scale on both channels
    pub noise_multiplier: f32,
    /// Detector pH threshold
    pub ph_threshold: f32,
    /// Detector temperature delta threshold (°C)
    pub temp_delta_threshold_c: f32,
    /// Detector violation rate threshold
    pub violation_rate_threshold: f32,
}

impl Default for SweepParams {
    fn default() -> Self {
        let policy = AlertPolicy::default();
        Self {
            sampling_interval_minutes: DEFAULT_SAMPLING_INTERVAL_MINUTES,
            noise_multiplier: 1.0,
            ph_threshold: policy.ph_threshold,
            temp_delta_threshold_c: policy.temp_delta_threshold_c,
            violation_rate_threshold: policy.violation_rate_threshold,
        }
    }
}

/// A family of runs varying one parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suite {
    /// Sampling interval stress
    SamplingInterval,
    /// Sensor noise stress
    Noise,
    /// pH threshold sensitivity
    PhThreshold,
    /// Temperature delta sensitivity
    DeltaT,
    /// Persistence strictness
    ViolationThreshold,
}

impl Suite {
    /// All suites in report order
    pub const ALL: [Suite; 5] = [
        Suite::SamplingInterval,
        Suite::Noise,
        Suite::PhThreshold,
        Suite::DeltaT,
        Suite::ViolationThreshold,
    ];

    /// Column label for reports
    pub fn name(&self) -> &'static str {
        match self {
            Suite::SamplingInterval => "sampling_interval",
            Suite::Noise => "noise_multiplier",
            Suite::PhThreshold => "ph_threshold",
            Suite::DeltaT => "dt_threshold",
            Suite::ViolationThreshold => "violation_threshold",
        }
    }

    /// Values this suite visits
    pub fn values(&self) -> &'static [f32] {
        match self {
            Suite::SamplingInterval => &[5.0, 15.0, 30.0, 60.0],
            Suite::Noise => &[1.0, 2.0, 3.0],
            Suite::PhThreshold => &[7.3, 7.5, 7.7],
            Suite::DeltaT => &[0.8, 1.0, 1.2],
            Suite::ViolationThreshold => &[0.60, 0.75, 0.90],
        }
    }

    /// `base` with this suite's parameter set to `value`
    pub fn apply(&self, base: SweepParams, value: f32) -> SweepParams {
        let mut params = base;
        match self {
            Suite::SamplingInterval => params.sampling_interval_minutes = value as u8,
            Suite::Noise => params.noise_multiplier = value,
            Suite::PhThreshold => params.ph_threshold = value,
            Suite::DeltaT => params.temp_delta_threshold_c = value,
            Suite::ViolationThreshold => params.violation_rate_threshold = value,
        }
        params
    }
}

/// Sweep-wide settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Run length in days
    pub days: u32,
    /// Seed shared by every run, so rows differ only in the varied parameter
    pub seed: u64,
    /// Operating point the suites vary around
    pub base: SweepParams,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self { days: DEFAULT_DAYS, seed: DEFAULT_SEED, base: SweepParams::default() }
    }
}

impl SweepConfig {
    fn simulation(&self, scenario: Scenario, params: SweepParams) -> SimulationConfig {
        let policy = AlertPolicy::default()
            .with_ph_threshold(params.ph_threshold)
            .with_temp_delta_threshold(params.temp_delta_threshold_c)
            .with_violation_rate_threshold(params.violation_rate_threshold);

        SimulationConfig {
            scenario,
            days: self.days,
            sampling_interval_minutes: params.sampling_interval_minutes,
            noise_multiplier: params.noise_multiplier,
            seed: self.seed,
            policy,
            ..SimulationConfig::default()
        }
    }
}

/// Outcome of one run in a sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRow {
    /// Suite the run belongs to
    pub suite: Suite,
    /// Clinical course simulated
    pub scenario: Scenario,
    /// Value of the varied parameter
    pub value: f32,
    /// Whether any sample alerted
    pub alert_triggered: bool,
    /// Time of first alert (hours)
    pub alert_hours: Option<f32>,
    /// Time of first alert (days)
    pub alert_days: Option<f32>,
    /// Highest full-window violation rate
    pub peak_violation_rate: f32,
}

/// All rows of a sweep
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    /// Rows in suite, then scenario, then value order
    pub rows: Vec<SweepRow>,
}

impl SweepReport {
    /// Normal-scenario rows that alerted
    pub fn false_positives(&self) -> Vec<&SweepRow> {
        self.rows
            .iter()
            .filter(|r| r.scenario == Scenario::Normal && r.alert_triggered)
            .collect()
    }

    /// Infection-scenario rows that never alerted
    pub fn missed_detections(&self) -> Vec<&SweepRow> {
        self.rows
            .iter()
            .filter(|r| r.scenario == Scenario::Infection && !r.alert_triggered)
            .collect()
    }

    /// Rows of one suite
    pub fn suite(&self, suite: Suite) -> impl Iterator<Item = &SweepRow> {
        self.rows.iter().filter(move |r| r.suite == suite)
    }

    /// Row for a given suite, scenario and value
    pub fn find(&self, suite: Suite, scenario: Scenario, value: f32) -> Option<&SweepRow> {
        self.suite(suite).find(|r| r.scenario == scenario && r.value == value)
    }

    /// Write the report as CSV, header first
    pub fn write_csv<W: Write>(&self, mut writer: W) -> SimResult<()> {
        writeln!(
            writer,
            "suite,scenario,value,alert_triggered,alert_time_hours,alert_time_days,peak_violation_rate"
        )?;
        for row in &self.rows {
            writeln!(
                writer,
                "{},{},{},{},{},{},{:.4}",
                row.suite.name(),
                row.scenario,
                row.value,
                row.alert_triggered,
                optional(row.alert_hours),
                optional(row.alert_days),
                row.peak_violation_rate,
            )?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn optional(value: Option<f32>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_default()
}

/// Run one suite for both scenarios
pub fn run_suite(config: &SweepConfig, suite: Suite) -> SimResult<Vec<SweepRow>> {
    let mut rows = Vec::with_capacity(Scenario::ALL.len() * suite.values().len());

    for scenario in Scenario::ALL {
        for &value in suite.values() {
            let params = suite.apply(config.base, value);
            let run = run_simulation(&config.simulation(scenario, params))?;

            log::info!(
                "{} | {} | {}={} | alert={}",
                suite.name(),
                scenario,
                suite.name(),
                value,
                run.alert_triggered()
            );

            rows.push(SweepRow {
                suite,
                scenario,
                value,
                alert_triggered: run.alert_triggered(),
                alert_hours: run.first_alert_hours,
                alert_days: run.first_alert_days(),
                peak_violation_rate: run.peak_violation_rate,
            });
        }
    }

    Ok(rows)
}

/// Run every suite
pub fn run_sweep(config: &SweepConfig) -> SimResult<SweepReport> {
    let mut report = SweepReport::default();
    for suite in Suite::ALL {
        report.rows.extend(run_suite(config, suite)?);
    }

    let false_positives = report.false_positives().len();
    if false_positives > 0 {
        log::warn!("{} false positives across {} runs", false_positives, report.rows.len());
    }
    Ok(report)
}
