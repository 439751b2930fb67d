//! One simulated sensor on the dressing

use crate::noise::NoiseGenerator;
use crate::wound::WoundModel;

/// Quantity a channel measures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measurand {
    /// Wound-bed pH
    Ph,
    /// Wound-bed temperature (°C)
    Temperature,
}

/// Ground truth from a [`WoundModel`] seen through a noisy, drifting sensor
#[derive(Debug, Clone)]
pub struct SensorChannel {
    model: WoundModel,
    measurand: Measurand,
    noise: NoiseGenerator,
}

impl SensorChannel {
    /// Channel reading `measurand` off `model`
    pub fn new(model: WoundModel, measurand: Measurand, noise: NoiseGenerator) -> Self {
        Self { model, measurand, noise }
    }

    /// What this channel measures
    pub fn measurand(&self) -> Measurand {
        self.measurand
    }

    /// Noise-free value at `t_hours`
    pub fn clean(&self, t_hours: f32) -> f32 {
        match self.measurand {
            Measurand::Ph => self.model.ph(t_hours),
            Measurand::Temperature => self.model.temperature(t_hours),
        }
    }

    /// Take one reading at `t_hours`
    pub fn read(&mut self, t_hours: f32) -> f32 {
        let clean = self.clean(t_hours);
        self.noise.apply(clean)
    }

    /// Forget accumulated drift
    pub fn reset(&mut self) {
        self.noise.reset();
    }
}
