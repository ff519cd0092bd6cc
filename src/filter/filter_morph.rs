//! Crossfade between two resonant filters controlled by a single morph position.
//!
//! Filter A runs the ladder response for positions up to 0.5 and a configurable high-pass
//! response above. Filter B stays on a band-pass response and is never switched, so it can
//! take over the output while filter A changes its mode at the 0.5 boundary:
//!
//! - 0.0 -> ladder only
//! - 0.5 -> band-pass only
//! - 1.0 -> high-pass only

use super::pole_mixing_filter::{FilterMode, PoleMixingFilter};
use crate::utils::crossfade;

/// Mode filter A switches to above the center of the morph range.
pub const DEFAULT_HIGH_MODE: FilterMode = FilterMode::Hp12;

const LOW_MODE: FilterMode = FilterMode::Ladder;
const BAND_MODE: FilterMode = FilterMode::Bp12_12;

/// Level compensation of the band-pass against the ladder response.
const BAND_GAIN: f32 = 2.0;

/// Largest crossfade fraction, keeping the blend strictly inside its sub-range.
const MAX_FRACTION: f32 = 1.0 - f32::EPSILON;

#[derive(Debug, Clone)]
pub struct FilterMorph {
    filter_a: PoleMixingFilter,
    filter_b: PoleMixingFilter,
    high_mode: FilterMode,
    position: f32,
    fraction: f32,
}

impl FilterMorph {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            filter_a: PoleMixingFilter::new(LOW_MODE, sample_rate),
            filter_b: PoleMixingFilter::new(BAND_MODE, sample_rate),
            high_mode: DEFAULT_HIGH_MODE,
            position: 0.0,
            fraction: 0.0,
        }
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.filter_a.set_sample_rate(sample_rate);
        self.filter_b.set_sample_rate(sample_rate);
    }

    /// Sets the morph position, clamped to `0.0..=1.0`.
    pub fn set_filter_morph(&mut self, position: f32) {
        let position = if position.is_nan() {
            0.0
        } else {
            position.clamp(0.0, 1.0)
        };
        self.position = position;

        let (mode, fraction) = if position <= 0.5 {
            (LOW_MODE, position * 2.0)
        } else {
            (self.high_mode, (position - 0.5) * 2.0)
        };
        self.fraction = fraction.min(MAX_FRACTION);

        if self.filter_a.mode() != mode {
            log::trace!("Morph filter switches to {mode:?}");
            self.filter_a.set_mode(mode);
        }
    }

    /// Selects the mode filter A uses above the center of the morph range.
    pub fn set_high_mode(&mut self, mode: FilterMode) {
        self.high_mode = mode;
        self.set_filter_morph(self.position);
    }

    pub fn set_cutoff(&mut self, cutoff: f32) {
        self.filter_a.set_cutoff(cutoff);
        self.filter_b.set_cutoff(cutoff);
    }

    pub fn set_resonance(&mut self, resonance: f32) {
        self.filter_a.set_resonance(resonance);
        self.filter_b.set_resonance(resonance);
    }

    pub fn set_drive(&mut self, drive: f32) {
        self.filter_a.set_drive(drive);
        self.filter_b.set_drive(drive);
    }

    pub fn set_feedback_highpass_cutoff(&mut self, cutoff: f32) {
        self.filter_a.set_feedback_highpass_cutoff(cutoff);
        self.filter_b.set_feedback_highpass_cutoff(cutoff);
    }

    #[inline]
    pub fn filter_morph(&self) -> f32 {
        self.position
    }

    #[inline]
    pub fn high_mode(&self) -> FilterMode {
        self.high_mode
    }

    /// Weight of the second input of the current crossfade.
    #[inline]
    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    #[inline]
    pub fn filter_a(&self) -> &PoleMixingFilter {
        &self.filter_a
    }

    #[inline]
    pub fn filter_b(&self) -> &PoleMixingFilter {
        &self.filter_b
    }

    pub fn reset(&mut self) {
        self.filter_a.reset();
        self.filter_b.reset();
    }

    #[inline]
    pub fn process(&mut self, in_: f32) -> f32 {
        let a = self.filter_a.process(in_);
        let b = BAND_GAIN * self.filter_b.process(in_);

        if self.position <= 0.5 {
            crossfade(a, b, self.fraction)
        } else {
            crossfade(b, a, self.fraction)
        }
    }

    pub fn log_state(&self) {
        log::debug!("Morph position: {}, fraction: {}", self.position, self.fraction);
        log::debug!("Filter A:");
        self.filter_a.log_state();
        log::debug!("Filter B:");
        self.filter_b.log_state();
    }
}
