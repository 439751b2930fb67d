//! Closed-loop simulation runs
//!
//! A run samples both channels on the configured grid, feeds every pair to
//! a fresh [`AlertEngine`] with the elapsed time floored to whole hours, and
//! records a per-sample trace.
//!
//! ## Sampling grid
//!
//! `t_k = k * interval / 60` for every `k` with `t_k < days * 24`. Intervals
//! that do not divide the run evenly get one final partial step, so a 7
//! minute, 10 day run has 2058 samples.
//!
//! ## Config
//!
//! [`SimulationConfig`] round-trips through JSON; every field has a default
//! so a config file only needs to name what it changes:
//!
//! ```json
//! { "scenario": "infection", "noise_multiplier": 2.0, "seed": 7 }
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use woundguard_core::constants::time::{DEFAULT_SAMPLING_INTERVAL_MINUTES, HOURS_PER_DAY};
use woundguard_core::replay::write_csv;
use woundguard_core::time::{sample_time_hours, whole_hours};
use woundguard_core::{AlertEngine, AlertObserver, AlertPolicy, AlertStatus, SensorReading};

use crate::channel::{Measurand, SensorChannel};
use crate::errors::{SimError, SimResult};
use crate::noise::NoiseGenerator;
use crate::wound::{Scenario, WoundModel};

/// Default run length
pub const DEFAULT_DAYS: u32 = 10;

/// Default seed for reproducible runs
pub const DEFAULT_SEED: u64 = 0x5EED_2024;

const MINUTES_PER_DAY: u32 = HOURS_PER_DAY * 60;

/// Noise and drift of one channel at multiplier 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseSpec {
    /// Per-sample white noise standard deviation
    pub sigma: f32,
    /// Random-walk drift standard deviation accumulated per hour
    pub drift_per_hour: f32,
}

impl NoiseSpec {
    /// pH electrode: 0.05 noise, 0.002/h drift
    pub const PH: NoiseSpec = NoiseSpec { sigma: 0.05, drift_per_hour: 0.002 };

    /// Thermistor: 0.10 °C noise, 0.01 °C/h drift
    pub const TEMPERATURE: NoiseSpec = NoiseSpec { sigma: 0.10, drift_per_hour: 0.01 };

    /// No noise, no drift
    pub const SILENT: NoiseSpec = NoiseSpec { sigma: 0.0, drift_per_hour: 0.0 };
}

/// Everything needed to reproduce a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Clinical course
    pub scenario: Scenario,
    /// Run length in days
    pub days: u32,
    /// Minutes between samples
    pub sampling_interval_minutes: u8,
    /// Scales white noise on both channels; drift is not scaled
    pub noise_multiplier: f32,
    /// pH channel noise
    pub ph_noise: NoiseSpec,
    /// Temperature channel noise
    pub temp_noise: NoiseSpec,
    /// RNG seed; both channels derive their streams from it
    pub seed: u64,
    /// Detector policy
    pub policy: AlertPolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            scenario: Scenario::Normal,
            days: DEFAULT_DAYS,
            sampling_interval_minutes: DEFAULT_SAMPLING_INTERVAL_MINUTES,
            noise_multiplier: 1.0,
            ph_noise: NoiseSpec::PH,
            temp_noise: NoiseSpec::TEMPERATURE,
            seed: DEFAULT_SEED,
            policy: AlertPolicy::default(),
        }
    }
}

impl SimulationConfig {
    /// Default config for `scenario`
    pub fn for_scenario(scenario: Scenario) -> Self {
        Self { scenario, ..Self::default() }
    }

    /// Same config with both channels noise- and drift-free
    pub fn noiseless(mut self) -> Self {
        self.ph_noise = NoiseSpec::SILENT;
        self.temp_noise = NoiseSpec::SILENT;
        self
    }

    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject parameters the detector does not cover
    pub fn validate(&self) -> SimResult<()> {
        if self.days == 0 {
            return Err(SimError::InvalidConfig { reason: "days is zero" });
        }
        if self.days.checked_mul(MINUTES_PER_DAY).is_none() {
            return Err(SimError::InvalidConfig { reason: "days too large for the sample grid" });
        }
        if !(self.noise_multiplier.is_finite() && self.noise_multiplier >= 0.0) {
            return Err(SimError::InvalidConfig { reason: "noise multiplier must be finite and non-negative" });
        }
        for noise in [self.ph_noise, self.temp_noise] {
            if !(noise.sigma >= 0.0 && noise.drift_per_hour >= 0.0) {
                return Err(SimError::InvalidConfig { reason: "noise sigma must be non-negative" });
            }
        }
        Ok(())
    }

    /// Samples on the run's grid
    ///
    /// Saturates for run lengths [`validate`](Self::validate) rejects.
    pub fn sample_count(&self) -> u32 {
        let total_minutes = self.days.saturating_mul(MINUTES_PER_DAY);
        let interval = self.sampling_interval_minutes.max(1) as u32;
        total_minutes.div_ceil(interval)
    }
}

/// One sample of a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TracePoint {
    /// Elapsed time (fractional hours)
    pub time_hours: f32,
    /// Model pH
    pub ph_clean: f32,
    /// Measured pH
    pub ph: f32,
    /// Model temperature (°C)
    pub temp_clean_c: f32,
    /// Measured temperature (°C)
    pub temp_c: f32,
    /// Detector output after this sample
    pub alert: bool,
}

/// Outcome of [`run_simulation`]
#[derive(Debug, Clone, Serialize)]
pub struct SimulationRun {
    /// Config the run was made with
    pub config: SimulationConfig,
    /// Every sample, in order
    pub trace: Vec<TracePoint>,
    /// Time of the first alerting sample
    pub first_alert_hours: Option<f32>,
    /// Highest full-window violation rate seen
    pub peak_violation_rate: f32,
    /// Detector state after the last sample
    pub final_status: AlertStatus,
}

impl SimulationRun {
    /// True if any sample raised the alert
    pub fn alert_triggered(&self) -> bool {
        self.first_alert_hours.is_some()
    }

    /// First alert in days
    pub fn first_alert_days(&self) -> Option<f32> {
        self.first_alert_hours.map(|h| h / HOURS_PER_DAY as f32)
    }

    /// Locked baseline temperature, if the run reached it
    pub fn baseline_c(&self) -> Option<f32> {
        self.final_status.baseline_c
    }

    /// Measured series in replay form
    pub fn readings(&self) -> Vec<SensorReading> {
        self.trace
            .iter()
            .map(|p| SensorReading { time_hours: p.time_hours, ph: p.ph, temp_c: p.temp_c })
            .collect()
    }

    /// Write the measured series as replay CSV
    pub fn write_csv<W: Write>(&self, writer: W) -> SimResult<()> {
        write_csv(writer, &self.readings())?;
        Ok(())
    }

    /// Save the measured series as a replay CSV file
    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> SimResult<()> {
        let file = File::create(path.as_ref())?;
        self.write_csv(BufWriter::new(file))?;
        log::info!("Wrote {} samples to {}", self.trace.len(), path.as_ref().display());
        Ok(())
    }
}

/// Run one simulation with no observer attached
pub fn run_simulation(config: &SimulationConfig) -> SimResult<SimulationRun> {
    let engine = AlertEngine::with_policy(config.sampling_interval_minutes, config.policy)?;
    run_with_engine(config, engine)
}

/// Run one simulation, reporting engine transitions to `observer`
pub fn run_simulation_observed<O: AlertObserver>(
    config: &SimulationConfig,
    observer: O,
) -> SimResult<SimulationRun> {
    let engine = AlertEngine::with_policy(config.sampling_interval_minutes, config.policy)?
        .with_observer(observer);
    run_with_engine(config, engine)
}

fn run_with_engine<O: AlertObserver>(
    config: &SimulationConfig,
    mut engine: AlertEngine<O>,
) -> SimResult<SimulationRun> {
    config.validate()?;

    let interval = config.sampling_interval_minutes;
    let model = WoundModel::new(config.scenario);
    let mut seeds = StdRng::seed_from_u64(config.seed);

    let channel_noise = |noise: NoiseSpec, seed: u64| {
        NoiseGenerator::new(noise.sigma * config.noise_multiplier, noise.drift_per_hour, interval, seed)
    };
    let mut ph_channel = SensorChannel::new(model, Measurand::Ph, channel_noise(config.ph_noise, seeds.gen()));
    let mut temp_channel = SensorChannel::new(
        model,
        Measurand::Temperature,
        channel_noise(config.temp_noise, seeds.gen()),
    );

    let samples = config.sample_count();
    let mut trace = Vec::with_capacity(samples as usize);
    let mut first_alert_hours = None;
    let mut peak_violation_rate = 0.0f32;

    for k in 0..samples {
        let time_hours = sample_time_hours(k, interval);
        let ph = ph_channel.read(time_hours);
        let temp_c = temp_channel.read(time_hours);

        let alert = engine.update(ph, temp_c, whole_hours(time_hours));
        if alert && first_alert_hours.is_none() {
            first_alert_hours = Some(time_hours);
        }
        peak_violation_rate = peak_violation_rate.max(engine.window_fill_rate());

        trace.push(TracePoint {
            time_hours,
            ph_clean: ph_channel.clean(time_hours),
            ph,
            temp_clean_c: temp_channel.clean(time_hours),
            temp_c,
            alert,
        });
    }

    log::debug!(
        "{} run: {} samples, first alert {:?}h, peak rate {:.2}",
        config.scenario,
        samples,
        first_alert_hours,
        peak_violation_rate
    );

    Ok(SimulationRun {
        config: config.clone(),
        trace,
        first_alert_hours,
        peak_violation_rate,
        final_status: engine.status(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use woundguard_core::replay::{parse_csv, replay};
    use woundguard_core::{ConfigError, Hours};

    fn infection() -> SimulationConfig {
        SimulationConfig::for_scenario(Scenario::Infection)
    }

    #[test]
    fn grid_covers_run_exactly() {
        assert_eq!(SimulationConfig::default().sample_count(), 960);

        let seven = SimulationConfig { sampling_interval_minutes: 7, ..SimulationConfig::default() };
        assert_eq!(seven.sample_count(), 2058);

        let run = run_simulation(&seven).unwrap();
        assert!(run.trace.last().unwrap().time_hours < 240.0);
    }

    #[test]
    fn noiseless_infection_matches_model_timing() {
        let run = run_simulation(&infection().noiseless()).unwrap();

        let t = run.first_alert_hours.unwrap();
        assert!((145.5..=147.0).contains(&t), "first alert at {t}h");
        assert_eq!(run.baseline_c(), Some(36.8));
        assert!(run.trace.iter().all(|p| p.ph == p.ph_clean && p.temp_c == p.temp_clean_c));
    }

    #[test]
    fn noisy_infection_alerts_a_day_after_onset() {
        let seeds = 1..=40u64;
        let mut firsts: Vec<Option<f32>> = seeds
            .clone()
            .map(|seed| run_simulation(&SimulationConfig { seed, ..infection() }).unwrap().first_alert_hours)
            .collect();

        for (seed, first) in seeds.zip(&firsts) {
            if let Some(t) = first {
                assert!((130.0..240.0).contains(t), "seed {seed}: first alert at {t}h");
            }
        }

        let alerted = firsts.iter().filter(|t| t.is_some()).count();
        assert!(alerted * 10 >= firsts.len() * 9, "only {alerted}/{} seeds alerted", firsts.len());

        // Runs that never alert sort last
        firsts.sort_by(|a, b| a.unwrap_or(f32::INFINITY).total_cmp(&b.unwrap_or(f32::INFINITY)));
        let median = firsts[firsts.len() / 2].unwrap_or(f32::INFINITY);
        assert!((145.0..=165.0).contains(&median), "median first alert at {median}h");
    }

    #[test]
    fn normal_healing_never_alerts() {
        for seed in 1..=5 {
            for noise_multiplier in [1.0, 3.0] {
                let config = SimulationConfig { seed, noise_multiplier, ..SimulationConfig::default() };
                let run = run_simulation(&config).unwrap();
                assert!(!run.alert_triggered(), "seed {seed} x{noise_multiplier}");
                assert_eq!(run.peak_violation_rate, 0.0);
            }
        }
    }

    #[test]
    fn same_seed_reproduces_run() {
        let a = run_simulation(&infection()).unwrap();
        let b = run_simulation(&infection()).unwrap();
        assert_eq!(a.trace, b.trace);

        let c = run_simulation(&SimulationConfig { seed: 99, ..infection() }).unwrap();
        assert_ne!(a.trace, c.trace);
    }

    #[test]
    fn trace_replays_to_same_first_alert() {
        let run = run_simulation(&infection()).unwrap();

        let mut csv = Vec::new();
        run.write_csv(&mut csv).unwrap();
        let readings = parse_csv(csv.as_slice(), "trace").unwrap();

        let mut engine = AlertEngine::new(15).unwrap();
        let outcome = replay(&mut engine, &readings);
        assert_eq!(outcome.first_alert_hours, run.first_alert_hours);
        assert_eq!(outcome.final_status, run.final_status);
    }

    #[test]
    fn bad_interval_surfaces_engine_error() {
        let config = SimulationConfig { sampling_interval_minutes: 0, ..SimulationConfig::default() };
        assert!(matches!(
            run_simulation(&config),
            Err(SimError::Config(ConfigError::ZeroSamplingInterval))
        ));
    }

    #[test]
    fn zero_days_rejected() {
        let config = SimulationConfig { days: 0, ..SimulationConfig::default() };
        assert!(matches!(run_simulation(&config), Err(SimError::InvalidConfig { .. })));
    }

    #[test]
    fn oversized_days_rejected_before_running() {
        let config = SimulationConfig::from_json(r#"{ "days": 2982617 }"#).unwrap();
        assert!(matches!(config.validate(), Err(SimError::InvalidConfig { .. })));
        assert!(matches!(run_simulation(&config), Err(SimError::InvalidConfig { .. })));
        assert_eq!(config.sample_count(), u32::MAX / 15);

        let longest = SimulationConfig { days: u32::MAX / 1440, ..SimulationConfig::default() };
        assert!(longest.validate().is_ok());
    }

    #[test]
    fn config_json_fills_defaults() {
        let config = SimulationConfig::from_json(r#"{ "scenario": "infection", "seed": 7 }"#).unwrap();
        assert_eq!(config.scenario, Scenario::Infection);
        assert_eq!(config.seed, 7);
        assert_eq!(config.days, DEFAULT_DAYS);
        assert_eq!(config.policy, AlertPolicy::default());

        let back = SimulationConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn observer_sees_lock() {
        #[derive(Default)]
        struct Lock(Option<Hours>);

        impl AlertObserver for Lock {
            fn on_baseline_locked(&mut self, _baseline_c: f32, uptime_hours: Hours) {
                self.0 = Some(uptime_hours);
            }
        }

        let mut lock = Lock::default();
        let config = SimulationConfig { days: 2, ..SimulationConfig::default() };
        run_simulation_observed(&config, &mut lock).unwrap();
        assert_eq!(lock.0, Some(24));
    }
}
