//! Common test utilities for alert engine integration tests
//!
//! Provides:
//! - A series builder for piecewise-constant pH/temperature runs
//! - A deterministic infection curve matching the wound model used in the
//!   phase 1 study, without noise
//! - Helpers to drive an engine and collect per-sample results

#![allow(dead_code)]

use woundguard_core::{
    time::{sample_time_hours, whole_hours},
    AlertEngine, AlertObserver, SensorReading,
};

/// Builds a regularly sampled series one segment at a time
pub struct SeriesBuilder {
    interval_minutes: u8,
    readings: Vec<SensorReading>,
}

impl SeriesBuilder {
    pub fn new(interval_minutes: u8) -> Self {
        Self {
            interval_minutes,
            readings: Vec::new(),
        }
    }

    /// Append readings at constant pH/temperature for `hours`
    pub fn hold(self, hours: u32, ph: f32, temp_c: f32) -> Self {
        let samples = hours * (60 / self.interval_minutes as u32);
        self.samples(samples, ph, temp_c)
    }

    /// Append `count` readings at constant pH/temperature
    pub fn samples(mut self, count: u32, ph: f32, temp_c: f32) -> Self {
        for _ in 0..count {
            let index = self.readings.len() as u32;
            self.readings.push(SensorReading {
                time_hours: sample_time_hours(index, self.interval_minutes),
                ph,
                temp_c,
            });
        }
        self
    }

    /// Append readings produced by `f(time_hours)` for `hours`
    pub fn curve<F: Fn(f32) -> (f32, f32)>(mut self, hours: u32, f: F) -> Self {
        let samples = hours * (60 / self.interval_minutes as u32);
        for _ in 0..samples {
            let index = self.readings.len() as u32;
            let time_hours = sample_time_hours(index, self.interval_minutes);
            let (ph, temp_c) = f(time_hours);
            self.readings.push(SensorReading { time_hours, ph, temp_c });
        }
        self
    }

    pub fn build(self) -> Vec<SensorReading> {
        self.readings
    }
}

/// Noise-free infection curve: quiet for two days, then the infection
/// severity index climbs from 0.2 toward 0.8 with a 36 hour time constant
pub fn infection_curve(time_hours: f32) -> (f32, f32) {
    let severity = if time_hours < 48.0 {
        0.0
    } else {
        0.2 + 0.6 * (1.0 - libm::expf(-(time_hours - 48.0) / 36.0))
    };
    (6.0 + 2.0 * severity, 36.8 + 1.65 * severity)
}

/// Noise-free normal healing: constant low severity
pub fn healing_curve(_time_hours: f32) -> (f32, f32) {
    let severity = 0.1;
    (6.0 + 2.0 * severity, 36.8 + 1.65 * severity)
}

/// Feed every reading, returning the per-sample alert state
pub fn run<O: AlertObserver>(engine: &mut AlertEngine<O>, readings: &[SensorReading]) -> Vec<bool> {
    readings
        .iter()
        .map(|r| engine.update(r.ph, r.temp_c, whole_hours(r.time_hours)))
        .collect()
}

/// Time of the first alerting reading
pub fn first_alert(readings: &[SensorReading], alerts: &[bool]) -> Option<f32> {
    readings
        .iter()
        .zip(alerts)
        .find(|(_, alert)| **alert)
        .map(|(r, _)| r.time_hours)
}
