//! Resonant four-pole filter with selectable response.
//!
//! Four cascaded one-pole low-pass sections share a resonance feedback path. Mixing the input
//! and the four stage outputs with fixed weights yields low-pass, high-pass and band-pass
//! responses of various slopes. The [`FilterMode::Ladder`] mode instead runs the stages as a
//! coupled diode ladder, reproducing the classic bass-machine response.
//!
//! Coefficients can be derived two ways. [`PoleMixingFilter::calculate_coefficients_exact`]
//! evaluates the transcendental functions directly and runs on sample rate and mode changes.
//! [`PoleMixingFilter::calculate_coefficients_approx`] replaces them with polynomial and
//! rational approximations and runs on every cutoff, resonance and drive update. Both agree
//! to within a small tolerance across the audio range.

// Based on MIT-licensed code (c) 2009 by Robin Schmidt

#[allow(unused_imports)]
use num_traits::float::Float;

use super::one_pole_filter::{OnePoleFilter, OnePoleMode};
use crate::utils::flush_denormal;
use crate::utils::units::db_to_amp;

const PI: f32 = core::f32::consts::PI;
const TWO_PI: f32 = 2.0 * PI;
const ONE_OVER_SQRT2: f32 = core::f32::consts::FRAC_1_SQRT_2;

pub const MIN_CUTOFF: f32 = 200.0;
pub const MAX_CUTOFF: f32 = 20000.0;

const DEFAULT_FEEDBACK_HIGHPASS: f32 = 150.0;

/// Response of the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FilterMode {
    Flat,
    Lp6,
    Lp12,
    Lp18,
    Lp24,
    Hp6,
    Hp12,
    Hp18,
    Hp24,
    Bp12_12,
    Bp6_18,
    Bp18_6,
    Bp6_12,
    Bp12_6,
    Bp6_6,
    Ladder,
}

/// Weights for the input and the four stage outputs plus the output gain of a mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeCoefficients {
    pub mix: [f32; 5],
    pub gain: f32,
}

const fn mode(mix: [f32; 5], gain: f32) -> ModeCoefficients {
    ModeCoefficients { mix, gain }
}

/// Coefficients indexed by `FilterMode as usize`. The gains even out the levels against the
/// input attenuation of 1/8 applied ahead of the pole-mixing stages.
const MODE_TABLE: [ModeCoefficients; FilterMode::COUNT] = [
    mode([1.0, 0.0, 0.0, 0.0, 0.0], 8.0),
    mode([0.0, 1.0, 0.0, 0.0, 0.0], 8.0),
    mode([0.0, 0.0, 1.0, 0.0, 0.0], 8.0),
    mode([0.0, 0.0, 0.0, 1.0, 0.0], 8.0),
    mode([0.0, 0.0, 0.0, 0.0, 1.0], 8.0),
    mode([1.0, -1.0, 0.0, 0.0, 0.0], 8.0),
    mode([1.0, -2.0, 1.0, 0.0, 0.0], 8.0),
    mode([1.0, -3.0, 3.0, -1.0, 0.0], 8.0),
    mode([1.0, -4.0, 6.0, -4.0, 1.0], 7.0),
    mode([0.0, 0.0, 1.0, -2.0, 1.0], 15.0),
    mode([0.0, 0.0, 0.0, 1.0, -1.0], 8.0),
    mode([0.0, 1.0, -3.0, 3.0, -1.0], 8.0),
    mode([0.0, 0.0, 1.0, -1.0, 0.0], 8.0),
    mode([0.0, 1.0, -2.0, 1.0, 0.0], 8.0),
    mode([0.0, 1.0, -1.0, 0.0, 0.0], 8.0),
    // Ladder mixing is implicit, its gain follows the resonance.
    mode([0.0, 0.0, 0.0, 0.0, 1.0], 1.0),
];

impl FilterMode {
    pub const COUNT: usize = 16;

    pub const ALL: [FilterMode; Self::COUNT] = [
        Self::Flat,
        Self::Lp6,
        Self::Lp12,
        Self::Lp18,
        Self::Lp24,
        Self::Hp6,
        Self::Hp12,
        Self::Hp18,
        Self::Hp24,
        Self::Bp12_12,
        Self::Bp6_18,
        Self::Bp18_6,
        Self::Bp6_12,
        Self::Bp12_6,
        Self::Bp6_6,
        Self::Ladder,
    ];

    #[inline]
    pub fn coefficients(self) -> &'static ModeCoefficients {
        &MODE_TABLE[self as usize]
    }

    /// Mode from its index in [`FilterMode::ALL`], `None` when out of range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

#[derive(Debug, Clone)]
pub struct PoleMixingFilter {
    mode: FilterMode,
    cutoff: f32,
    resonance_raw: f32,
    resonance_skewed: f32,
    drive: f32,
    drive_factor: f32,
    sample_rate: f32,
    two_pi_over_sample_rate: f32,

    // One-pole section coefficients.
    b0: f32,
    a1: f32,
    // Feedback factor and output gain.
    k: f32,
    g: f32,

    y1: f32,
    y2: f32,
    y3: f32,
    y4: f32,

    feedback_highpass: OnePoleFilter,
}

impl PoleMixingFilter {
    pub fn new(mode: FilterMode, sample_rate: f32) -> Self {
        let mut filter = Self {
            mode,
            cutoff: 1000.0,
            resonance_raw: 0.0,
            resonance_skewed: 0.0,
            drive: 0.0,
            drive_factor: 1.0,
            sample_rate,
            two_pi_over_sample_rate: TWO_PI / sample_rate,
            b0: 1.0,
            a1: 0.0,
            k: 0.0,
            g: 1.0,
            y1: 0.0,
            y2: 0.0,
            y3: 0.0,
            y4: 0.0,
            feedback_highpass: OnePoleFilter::new(
                OnePoleMode::HighPass,
                DEFAULT_FEEDBACK_HIGHPASS,
                sample_rate,
            ),
        };
        filter.calculate_coefficients_exact();
        filter
    }

    /// Sets the rate the filter runs at. Non-positive rates are ignored.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        if sample_rate > 0.0 {
            self.sample_rate = sample_rate;
        }
        self.two_pi_over_sample_rate = TWO_PI / self.sample_rate;
        self.feedback_highpass.set_sample_rate(self.sample_rate);
        self.cutoff = self.clamp_cutoff(self.cutoff);
        self.calculate_coefficients_exact();
    }

    /// Switches the response. The delay elements are cleared because their content is
    /// meaningless under a different topology.
    pub fn set_mode(&mut self, mode: FilterMode) {
        if mode != self.mode {
            self.mode = mode;
            self.calculate_coefficients_exact();
            self.reset();
        }
    }

    /// Sets the cutoff frequency in Hz, clamped to `200.0..=20000.0` and below Nyquist. NaN is
    /// ignored.
    #[inline]
    pub fn set_cutoff(&mut self, cutoff: f32) {
        if cutoff.is_nan() {
            return;
        }
        let cutoff = self.clamp_cutoff(cutoff);
        if cutoff != self.cutoff {
            self.cutoff = cutoff;
            self.calculate_coefficients_approx();
        }
    }

    /// Sets the resonance in percent where 100% is self oscillation.
    #[inline]
    pub fn set_resonance(&mut self, resonance: f32) {
        let resonance_raw = 0.01 * resonance.clamp(0.0, 100.0);
        if resonance.is_nan() || resonance_raw == self.resonance_raw {
            return;
        }
        self.resonance_raw = resonance_raw;
        self.resonance_skewed =
            (1.0 - (-3.0 * self.resonance_raw).exp()) / (1.0 - (-3.0_f32).exp());
        self.calculate_coefficients_approx();
    }

    /// Sets the input drive in decibels.
    pub fn set_drive(&mut self, drive: f32) {
        if drive.is_nan() || drive == self.drive {
            return;
        }
        self.drive = drive;
        self.drive_factor = db_to_amp(drive);
    }

    /// Sets the cutoff of the high-pass inside the resonance feedback loop.
    pub fn set_feedback_highpass_cutoff(&mut self, cutoff: f32) {
        self.feedback_highpass.set_cutoff(cutoff);
    }

    pub fn reset(&mut self) {
        self.feedback_highpass.reset();
        self.y1 = 0.0;
        self.y2 = 0.0;
        self.y3 = 0.0;
        self.y4 = 0.0;
    }

    #[inline]
    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    #[inline]
    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    /// Resonance in percent.
    #[inline]
    pub fn resonance(&self) -> f32 {
        100.0 * self.resonance_raw
    }

    /// Perceptually skewed resonance in the range `0.0..=1.0`.
    #[inline]
    pub fn resonance_skewed(&self) -> f32 {
        self.resonance_skewed
    }

    #[inline]
    pub fn drive(&self) -> f32 {
        self.drive
    }

    #[inline]
    pub fn feedback_highpass_cutoff(&self) -> f32 {
        self.feedback_highpass.cutoff()
    }

    #[inline]
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Current `(b0, a1, k, g)`: one-pole feed and feedback coefficients, resonance feedback
    /// factor and output gain.
    #[inline]
    pub fn coefficients(&self) -> (f32, f32, f32, f32) {
        (self.b0, self.a1, self.k, self.g)
    }

    #[inline]
    fn clamp_cutoff(&self, cutoff: f32) -> f32 {
        cutoff.clamp(MIN_CUTOFF, MAX_CUTOFF.min(0.45 * self.sample_rate))
    }

    pub fn calculate_coefficients_exact(&mut self) {
        let wc = self.two_pi_over_sample_rate * self.cutoff;
        let r = self.resonance_skewed;

        if self.mode == FilterMode::Ladder {
            self.calculate_ladder_coefficients(wc, r);
            return;
        }

        let (s, c) = wc.sin_cos();
        let h = (0.5 * wc).sin();
        let one_minus_c = 2.0 * h * h;
        // Tangent of an angle in the 4th quadrant.
        let t = (0.25 * (wc - PI)).tan();
        let x = (-wc).exp();
        self.set_pole_coefficients(s, c, one_minus_c, t, x, r);
    }

    pub fn calculate_coefficients_approx(&mut self) {
        let wc = self.two_pi_over_sample_rate * self.cutoff;
        let r = self.resonance_skewed;

        if self.mode == FilterMode::Ladder {
            self.calculate_ladder_coefficients(wc, r);
            return;
        }

        // Sine and cosine from the half-angle tangent.
        let u = tan_approx(wc / TWO_PI);
        let u2 = u * u;
        let s = 2.0 * u / (1.0 + u2);
        let c = (1.0 - u2) / (1.0 + u2);
        let one_minus_c = 2.0 * u2 / (1.0 + u2);
        // tan(pi/4 - wc/4) from the tangent of the small angle.
        let v = tan_approx(wc / (4.0 * PI));
        let t = -(1.0 - v) / (1.0 + v);
        let x = exp_neg_approx(wc);
        self.set_pole_coefficients(s, c, one_minus_c, t, x, r);
    }

    #[inline]
    fn set_pole_coefficients(&mut self, s: f32, c: f32, one_minus_c: f32, t: f32, x: f32, r: f32) {
        // Pole placement that puts the resonance peak exactly at the cutoff...
        let a1_full_resonance = t / (s - c * t);
        // ...and the one of a plain leaky integrator.
        let a1_no_resonance = -x;
        self.a1 = r * a1_full_resonance + (1.0 - r) * a1_no_resonance;
        self.b0 = 1.0 + self.a1;

        // Feedback normalized by the magnitude of the four stages at the cutoff. The
        // denominator equals 1 + a1^2 + 2*a1*cos(wc) without the cancellation at low cutoffs.
        let b0_sq = self.b0 * self.b0;
        let gsq = b0_sq / (b0_sq - 2.0 * self.a1 * one_minus_c);
        self.k = r / (gsq * gsq);
        self.g = self.mode.coefficients().gain;
    }

    #[inline]
    #[allow(clippy::excessive_precision)]
    fn calculate_ladder_coefficients(&mut self, wc: f32, r: f32) {
        let fx = wc * ONE_OVER_SQRT2 / TWO_PI;
        self.b0 = (0.00045522346 + 6.1922189 * fx) / (1.0 + 12.358354 * fx + 4.4156345 * (fx * fx));
        self.a1 = self.b0 - 1.0;
        let k = fx
            * (fx * (fx * (fx * (fx * (fx + 7198.6997) - 5837.7917) - 476.47308) + 614.95611)
                + 213.87126)
            + 16.998792;
        // Output gain goes from 1 to 2 with the resonance.
        let g = (k / 17.0 - 1.0) * r + 1.0;
        self.g = g * (1.0 + r);
        self.k = k * r;
    }

    #[inline]
    pub fn process(&mut self, in_: f32) -> f32 {
        let feedback = self.feedback_highpass.process(self.k * self.y4);

        if self.mode == FilterMode::Ladder {
            let y0 = self.drive_factor * in_ - feedback;
            let b0 = self.b0;
            self.y1 += 2.0 * b0 * (y0 - self.y1 + self.y2);
            self.y2 += b0 * (self.y1 - 2.0 * self.y2 + self.y3);
            self.y3 += b0 * (self.y2 - 2.0 * self.y3 + self.y4);
            self.y4 = flush_denormal(self.y4 + b0 * (self.y3 - 2.0 * self.y4));
            return 2.0 * self.g * self.y4;
        }

        let y0 = 0.125 * self.drive_factor * in_ - feedback;
        let a1 = self.a1;
        self.y1 = y0 + a1 * (y0 - self.y1);
        self.y2 = self.y1 + a1 * (self.y1 - self.y2);
        self.y3 = self.y2 + a1 * (self.y2 - self.y3);
        self.y4 = flush_denormal(self.y3 + a1 * (self.y3 - self.y4));

        let mix = &self.mode.coefficients().mix;
        self.g
            * (mix[0] * y0
                + mix[1] * self.y1
                + mix[2] * self.y2
                + mix[3] * self.y3
                + mix[4] * self.y4)
    }

    /// Writes the complete filter state to the log.
    pub fn log_state(&self) {
        log::debug!("Filter mode: {:?}", self.mode);
        log::debug!("cutoff: {}", self.cutoff);
        log::debug!("resonance raw: {}", self.resonance_raw);
        log::debug!("resonance skewed: {}", self.resonance_skewed);
        log::debug!("sample rate: {}", self.sample_rate);
        log::debug!("b0: {}, a1: {}", self.b0, self.a1);
        log::debug!(
            "stages: y1: {}, y2: {}, y3: {}, y4: {}",
            self.y1,
            self.y2,
            self.y3,
            self.y4
        );
        log::debug!("mixing: {:?}", self.mode.coefficients().mix);
        log::debug!("k: {}, g: {}", self.k, self.g);
    }
}

/// `tan(pi * f)` for `f` up to about 0.25.
#[inline]
#[allow(clippy::excessive_precision)]
fn tan_approx(f: f32) -> f32 {
    const PI_POW_2: f32 = PI * PI;
    const PI_POW_3: f32 = PI_POW_2 * PI;
    const PI_POW_5: f32 = PI_POW_3 * PI_POW_2;
    const PI_POW_7: f32 = PI_POW_5 * PI_POW_2;
    const PI_POW_9: f32 = PI_POW_7 * PI_POW_2;
    const PI_POW_11: f32 = PI_POW_9 * PI_POW_2;
    const A: f32 = 3.333314036e-01 * PI_POW_3;
    const B: f32 = 1.333923995e-01 * PI_POW_5;
    const C: f32 = 5.33740603e-02 * PI_POW_7;
    const D: f32 = 2.900525e-03 * PI_POW_9;
    const E: f32 = 9.5168091e-03 * PI_POW_11;
    let f2 = f * f;
    f * (PI + f2 * (A + f2 * (B + f2 * (C + f2 * (D + f2 * E)))))
}

/// `exp(-x)` through a [3/3] Padé approximant, accurate for `x` up to about 2.
#[inline]
fn exp_neg_approx(x: f32) -> f32 {
    let x2 = x * x;
    let x3 = x2 * x;
    let p = 1.0 + x / 2.0 + x2 / 10.0 + x3 / 120.0;
    let q = 1.0 - x / 2.0 + x2 / 10.0 - x3 / 120.0;
    q / p
}
