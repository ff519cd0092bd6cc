//! Exponentially decaying envelope driving the filter.

use super::time_constant_coefficient;

#[derive(Debug, Clone)]
pub struct DecayEnvelope {
    decay: f32,
    sample_rate: f32,
    coefficient: f32,
    value: f32,
}

impl DecayEnvelope {
    pub fn new(decay: f32, sample_rate: f32) -> Self {
        let mut envelope = Self {
            decay,
            sample_rate,
            coefficient: 0.0,
            value: 0.0,
        };
        envelope.calculate_coefficient();
        envelope
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.calculate_coefficient();
    }

    /// Sets the time constant of the decay in milliseconds.
    pub fn set_decay(&mut self, decay: f32) {
        self.decay = decay.max(0.0);
        self.calculate_coefficient();
    }

    #[inline]
    pub fn decay(&self) -> f32 {
        self.decay
    }

    /// Restarts the envelope so that the next sample is 1.
    pub fn trigger(&mut self) {
        self.value = if self.coefficient > 0.0 {
            1.0 / self.coefficient
        } else {
            1.0
        };
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }

    #[inline]
    pub fn process(&mut self) -> f32 {
        if self.coefficient > 0.0 {
            self.value *= self.coefficient;
        } else {
            // Zero decay time yields a single unit pulse.
            let out = self.value;
            self.value = 0.0;
            return out;
        }
        self.value
    }

    fn calculate_coefficient(&mut self) {
        self.coefficient = time_constant_coefficient(self.decay, self.sample_rate);
    }
}
