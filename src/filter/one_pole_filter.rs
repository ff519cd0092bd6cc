//! First order filter used for DC removal and phase shaping around the main filter.

#[allow(unused_imports)]
use num_traits::float::Float;

use crate::utils::flush_denormal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnePoleMode {
    /// Impulse-invariant high-pass.
    HighPass,
    /// Bilinear all-pass with 90° phase shift at the cutoff.
    AllPass,
}

#[derive(Debug, Clone)]
pub struct OnePoleFilter {
    mode: OnePoleMode,
    cutoff: f32,
    sample_rate: f32,

    b0: f32,
    b1: f32,
    a1: f32,

    x1: f32,
    y1: f32,
}

impl OnePoleFilter {
    pub fn new(mode: OnePoleMode, cutoff: f32, sample_rate: f32) -> Self {
        let mut filter = Self {
            mode,
            cutoff,
            sample_rate,
            b0: 1.0,
            b1: 0.0,
            a1: 0.0,
            x1: 0.0,
            y1: 0.0,
        };
        filter.calculate_coefficients();
        filter
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.calculate_coefficients();
    }

    pub fn set_cutoff(&mut self, cutoff: f32) {
        if cutoff.is_nan() {
            return;
        }
        self.cutoff = cutoff.clamp(0.0, 0.49 * self.sample_rate);
        self.calculate_coefficients();
    }

    #[inline]
    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    pub fn reset(&mut self) {
        self.x1 = 0.0;
        self.y1 = 0.0;
    }

    fn calculate_coefficients(&mut self) {
        let w = 2.0 * core::f32::consts::PI * self.cutoff / self.sample_rate;
        match self.mode {
            OnePoleMode::HighPass => {
                let x = (-w).exp();
                self.b0 = 0.5 * (1.0 + x);
                self.b1 = -0.5 * (1.0 + x);
                self.a1 = x;
            }
            OnePoleMode::AllPass => {
                let t = (0.5 * w).tan();
                let x = (t - 1.0) / (t + 1.0);
                self.b0 = x;
                self.b1 = 1.0;
                self.a1 = -x;
            }
        }
    }

    #[inline]
    pub fn process(&mut self, in_: f32) -> f32 {
        let out = flush_denormal(self.b0 * in_ + self.b1 * self.x1 + self.a1 * self.y1);
        self.x1 = in_;
        self.y1 = out;
        out
    }
}
