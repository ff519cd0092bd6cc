//! One-pole low-pass with its time constant given in milliseconds.
//!
//! Feeding an exponential decay through the integrator turns it into an attack/decay shape
//! whose peak drops as the time constants approach each other. [`normalizer`] gives the
//! factor restoring a unit peak.

#[allow(unused_imports)]
use num_traits::float::Float;

use super::time_constant_coefficient;
use crate::utils::one_pole;

#[derive(Debug, Clone)]
pub struct LeakyIntegrator {
    time_constant: f32,
    sample_rate: f32,
    coefficient: f32,
    state: f32,
}

impl LeakyIntegrator {
    pub fn new(time_constant: f32, sample_rate: f32) -> Self {
        let mut integrator = Self {
            time_constant,
            sample_rate,
            coefficient: 0.0,
            state: 0.0,
        };
        integrator.calculate_coefficient();
        integrator
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.calculate_coefficient();
    }

    /// Sets the time constant in milliseconds. Zero turns the integrator into a pass-through.
    pub fn set_time_constant(&mut self, time_constant: f32) {
        self.time_constant = time_constant.max(0.0);
        self.calculate_coefficient();
    }

    #[inline]
    pub fn time_constant(&self) -> f32 {
        self.time_constant
    }

    #[inline]
    pub fn state(&self) -> f32 {
        self.state
    }

    /// Jumps to `value` without gliding.
    pub fn set_state(&mut self, value: f32) {
        self.state = value;
    }

    pub fn reset(&mut self) {
        self.state = 0.0;
    }

    #[inline]
    pub fn process(&mut self, in_: f32) -> f32 {
        one_pole(&mut self.state, in_, 1.0 - self.coefficient);
        self.state
    }

    fn calculate_coefficient(&mut self) {
        self.coefficient = time_constant_coefficient(self.time_constant, self.sample_rate);
    }
}

/// Factor scaling the peak to 1 when a unit exponential decay with time constant
/// `decay_time` (ms) passes an integrator with time constant `integrator_time` (ms).
pub fn normalizer(decay_time: f32, integrator_time: f32, sample_rate: f32) -> f32 {
    if decay_time <= 0.0 || integrator_time <= 0.0 || sample_rate <= 0.0 {
        return 1.0;
    }

    let td = 0.001 * decay_time;
    let ta = 0.001 * integrator_time;
    let xd = (-1.0 / (td * sample_rate)).exp();
    let xa = (-1.0 / (ta * sample_rate)).exp();
    let ba = 1.0 - xa;

    let peak = if (xd - xa).abs() < 1.0e-7 {
        // Equal time constants: the response is ba * (n + 1) * x^n.
        let n = (ta * sample_rate - 1.0).max(0.0).round();
        ba * (n + 1.0) * xa.powf(n)
    } else {
        let tp = (td / ta).ln() / (1.0 / ta - 1.0 / td);
        let n = (tp * sample_rate).round();
        ba * (xd.powf(n + 1.0) - xa.powf(n + 1.0)) / (xd - xa)
    };

    if peak > 0.0 {
        1.0 / peak
    } else {
        1.0
    }
}
