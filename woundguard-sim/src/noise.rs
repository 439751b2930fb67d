//! Sensor noise and drift
//!
//! Each sample gets independent Gaussian noise on top of a random-walk
//! drift that accumulates for the life of the channel:
//!
//! ```text
//! value = clean + N(0, noise_sigma) + drift
//! drift += N(0, drift_sigma_per_hour * sqrt(interval_minutes / 60))
//! ```
//!
//! Scaling the drift step by the square root of the sample spacing keeps the
//! drift per hour independent of how often the channel is sampled.
//!
//! Generators are seeded so a run can be reproduced exactly.

use core::f32::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded white-noise plus random-walk drift source
#[derive(Debug, Clone)]
pub struct NoiseGenerator {
    noise_sigma: f32,
    drift_sigma_per_sample: f32,
    drift: f32,
    rng: StdRng,
}

impl NoiseGenerator {
    /// Generator for a channel sampled every `sampling_interval_minutes`
    pub fn new(
        noise_sigma: f32,
        drift_sigma_per_hour: f32,
        sampling_interval_minutes: u8,
        seed: u64,
    ) -> Self {
        let hours_per_sample = sampling_interval_minutes as f32 / 60.0;
        Self {
            noise_sigma,
            drift_sigma_per_sample: drift_sigma_per_hour * libm::sqrtf(hours_per_sample),
            drift: 0.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Per-sample noise standard deviation
    pub fn noise_sigma(&self) -> f32 {
        self.noise_sigma
    }

    /// Standard deviation of one drift step
    pub fn drift_sigma_per_sample(&self) -> f32 {
        self.drift_sigma_per_sample
    }

    /// Drift accumulated so far
    pub fn drift(&self) -> f32 {
        self.drift
    }

    /// Zero the accumulated drift. The random stream is not rewound.
    pub fn reset(&mut self) {
        self.drift = 0.0;
    }

    /// Draw one sample, advancing the drift
    ///
    /// Returns `(noise, drift)` with drift already updated.
    pub fn sample(&mut self) -> (f32, f32) {
        let noise = self.noise_sigma * self.standard_normal();
        self.drift += self.drift_sigma_per_sample * self.standard_normal();
        (noise, self.drift)
    }

    /// Corrupt a clean value with one sample of noise and the current drift
    pub fn apply(&mut self, clean: f32) -> f32 {
        let (noise, drift) = self.sample();
        clean + noise + drift
    }

    /// Box-Muller transform over two uniforms
    fn standard_normal(&mut self) -> f32 {
        // (0, 1]: keeps the log finite
        let u1 = 1.0 - self.rng.gen::<f32>();
        let u2 = self.rng.gen::<f32>();
        libm::sqrtf(-2.0 * libm::logf(u1)) * libm::cosf(2.0 * PI * u2)
    }
}
