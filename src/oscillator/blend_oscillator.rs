//! Band-limited oscillator fading from sawtooth to square.
//!
//! Naive waveforms are corrected with polynomial band-limited steps at each discontinuity.
//! The output is delayed by one sample so the correction can reach into the sample following
//! the step.

// Based on MIT-licensed code (c) 2016 by Emilie Gillet (emilie.o.gillet@gmail.com)

use crate::utils::crossfade;
use crate::utils::polyblep::add_step;

/// Highest normalized frequency the step correction handles.
pub const MAX_FREQUENCY: f32 = 0.25;

const PULSE_WIDTH: f32 = 0.5;

#[derive(Debug, Clone)]
pub struct BlendOscillator {
    sample_rate: f32,
    frequency: f32,
    blend: f32,

    phase: f32,
    next_sample: f32,
    high: bool,
}

impl BlendOscillator {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            frequency: 0.0,
            blend: 0.0,
            phase: 0.0,
            next_sample: 0.0,
            high: false,
        }
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    /// Sets the frequency in Hz.
    #[inline]
    pub fn set_frequency(&mut self, frequency: f32) {
        self.frequency = (frequency / self.sample_rate).clamp(0.0, MAX_FREQUENCY);
    }

    /// Normalized frequency (cycles per sample).
    #[inline]
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Sets the waveform from sawtooth (0.0) to square (1.0).
    #[inline]
    pub fn set_blend(&mut self, blend: f32) {
        self.blend = blend.clamp(0.0, 1.0);
    }

    #[inline]
    pub fn blend(&self) -> f32 {
        self.blend
    }

    /// Restarts the waveform at the beginning of its cycle.
    pub fn reset(&mut self) {
        self.phase = 0.0;
        self.next_sample = 0.0;
        self.high = false;
    }

    #[inline]
    pub fn process(&mut self) -> f32 {
        let frequency = self.frequency;
        let square_amount = self.blend;

        let mut this_sample = self.next_sample;
        let mut next_sample = 0.0;

        self.phase += frequency;

        if !self.high && self.phase >= PULSE_WIDTH {
            let t = (self.phase - PULSE_WIDTH) / frequency;
            add_step(&mut this_sample, &mut next_sample, t, 2.0 * square_amount);
            self.high = true;
        }

        if self.phase >= 1.0 {
            self.phase -= 1.0;
            let t = self.phase / frequency;
            // Both waveforms fall from +1 to -1.
            add_step(&mut this_sample, &mut next_sample, t, -2.0);
            self.high = false;
        }

        let saw = 2.0 * self.phase - 1.0;
        let square = if self.high { 1.0 } else { -1.0 };
        next_sample += crossfade(saw, square, square_amount);

        self.next_sample = next_sample;
        this_sample
    }
}
