//! Attack/decay/sustain/release envelope with RC-style exponential segments.
//!
//! The attack aims above full scale and is cut off on reaching 1, giving the fast convex rise
//! of a charging capacitor. Retriggering continues from the current level.

use super::time_constant_coefficient;
use crate::utils::flush_denormal;

const ATTACK_TARGET: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    Attack,
    Decay,
    Release,
}

#[derive(Debug, Clone)]
pub struct AnalogEnvelope {
    attack: f32,
    decay: f32,
    sustain: f32,
    release: f32,
    sample_rate: f32,

    attack_coefficient: f32,
    decay_coefficient: f32,
    release_coefficient: f32,

    stage: EnvelopeStage,
    value: f32,
}

impl AnalogEnvelope {
    pub fn new(sample_rate: f32) -> Self {
        let mut envelope = Self {
            attack: 0.0,
            decay: 1000.0,
            sustain: 0.0,
            release: 1.0,
            sample_rate,
            attack_coefficient: 0.0,
            decay_coefficient: 0.0,
            release_coefficient: 0.0,
            stage: EnvelopeStage::Release,
            value: 0.0,
        };
        envelope.calculate_coefficients();
        envelope
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.calculate_coefficients();
    }

    /// Attack time constant in milliseconds.
    pub fn set_attack(&mut self, attack: f32) {
        self.attack = attack.max(0.0);
        self.attack_coefficient = time_constant_coefficient(self.attack, self.sample_rate);
    }

    /// Decay time constant in milliseconds.
    pub fn set_decay(&mut self, decay: f32) {
        self.decay = decay.max(0.0);
        self.decay_coefficient = time_constant_coefficient(self.decay, self.sample_rate);
    }

    /// Sustain as a linear level in `0.0..=1.0`.
    pub fn set_sustain(&mut self, sustain: f32) {
        if !sustain.is_nan() {
            self.sustain = sustain.clamp(0.0, 1.0);
        }
    }

    /// Release time constant in milliseconds.
    pub fn set_release(&mut self, release: f32) {
        self.release = release.max(0.0);
        self.release_coefficient = time_constant_coefficient(self.release, self.sample_rate);
    }

    #[inline]
    pub fn attack(&self) -> f32 {
        self.attack
    }

    #[inline]
    pub fn decay(&self) -> f32 {
        self.decay
    }

    #[inline]
    pub fn sustain(&self) -> f32 {
        self.sustain
    }

    #[inline]
    pub fn release(&self) -> f32 {
        self.release
    }

    #[inline]
    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }

    #[inline]
    pub fn is_note_on(&self) -> bool {
        self.stage != EnvelopeStage::Release
    }

    /// Last computed output.
    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn note_on(&mut self) {
        self.stage = EnvelopeStage::Attack;
    }

    pub fn note_off(&mut self) {
        self.stage = EnvelopeStage::Release;
    }

    pub fn reset(&mut self) {
        self.stage = EnvelopeStage::Release;
        self.value = 0.0;
    }

    #[inline]
    pub fn process(&mut self) -> f32 {
        match self.stage {
            EnvelopeStage::Attack => {
                self.value =
                    ATTACK_TARGET + self.attack_coefficient * (self.value - ATTACK_TARGET);
                if self.value >= 1.0 {
                    self.value = 1.0;
                    self.stage = EnvelopeStage::Decay;
                }
            }
            EnvelopeStage::Decay => {
                self.value = self.sustain + self.decay_coefficient * (self.value - self.sustain);
            }
            EnvelopeStage::Release => {
                self.value = flush_denormal(self.release_coefficient * self.value);
            }
        }
        self.value
    }

    fn calculate_coefficients(&mut self) {
        self.attack_coefficient = time_constant_coefficient(self.attack, self.sample_rate);
        self.decay_coefficient = time_constant_coefficient(self.decay, self.sample_rate);
        self.release_coefficient = time_constant_coefficient(self.release, self.sample_rate);
    }
}
