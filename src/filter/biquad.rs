//! Second order (biquad) filter with cookbook coefficient formulas.

#[allow(unused_imports)]
use num_traits::float::Float;

use crate::utils::flush_denormal;

const LN_2: f32 = core::f32::consts::LN_2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BiquadMode {
    /// 12 dB/oct low-pass with quality factor `q`.
    LowPass { q: f32 },
    /// Notch with a width given in octaves.
    BandReject { bandwidth: f32 },
}

#[derive(Debug, Clone)]
pub struct Biquad {
    mode: BiquadMode,
    frequency: f32,
    sample_rate: f32,

    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,

    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl Biquad {
    pub fn new(mode: BiquadMode, frequency: f32, sample_rate: f32) -> Self {
        let mut filter = Self {
            mode,
            frequency,
            sample_rate,
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        };
        filter.calculate_coefficients();
        filter
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.calculate_coefficients();
    }

    pub fn set_frequency(&mut self, frequency: f32) {
        if frequency.is_nan() {
            return;
        }
        self.frequency = frequency;
        self.calculate_coefficients();
    }

    pub fn set_mode(&mut self, mode: BiquadMode) {
        self.mode = mode;
        self.calculate_coefficients();
    }

    #[inline]
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    #[inline]
    pub fn mode(&self) -> BiquadMode {
        self.mode
    }

    pub fn reset(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }

    fn calculate_coefficients(&mut self) {
        let frequency = self.frequency.clamp(1.0e-3, 0.49 * self.sample_rate);
        let w = 2.0 * core::f32::consts::PI * frequency / self.sample_rate;
        let (s, c) = w.sin_cos();

        let (b0, b1, b2, alpha) = match self.mode {
            BiquadMode::LowPass { q } => {
                let alpha = s / (2.0 * q.max(0.1));
                (0.5 * (1.0 - c), 1.0 - c, 0.5 * (1.0 - c), alpha)
            }
            BiquadMode::BandReject { bandwidth } => {
                let alpha = s * (0.5 * LN_2 * bandwidth * w / s).sinh();
                (1.0, -2.0 * c, 1.0, alpha)
            }
        };

        let a0 = 1.0 + alpha;
        self.b0 = b0 / a0;
        self.b1 = b1 / a0;
        self.b2 = b2 / a0;
        self.a1 = -2.0 * c / a0;
        self.a2 = (1.0 - alpha) / a0;
    }

    #[inline]
    pub fn process(&mut self, in_: f32) -> f32 {
        // Direct form I keeps low cutoffs well-behaved in single precision.
        let out = self.b0 * in_ + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;
        self.x2 = self.x1;
        self.x1 = in_;
        self.y2 = self.y1;
        self.y1 = flush_denormal(out);
        self.y1
    }
}
