//! Low-pass run at the oversampled rate in front of the implicit decimation.
//!
//! Sixth order Butterworth response built from three biquad sections, with the corner just
//! below the Nyquist frequency of the base rate.

use super::biquad::{Biquad, BiquadMode};

const SECTION_Q: [f32; 3] = [0.517_638_1, 0.707_106_8, 1.931_851_6];
const CORNER: f32 = 0.9;

#[derive(Debug, Clone)]
pub struct AntiAliasFilter {
    sections: [Biquad; 3],
    sub_division: usize,
}

impl AntiAliasFilter {
    /// `oversampled_rate` is the rate the filter runs at, `sub_division` the oversampling factor.
    pub fn new(oversampled_rate: f32, sub_division: usize) -> Self {
        let sub_division = sub_division.max(1);
        let corner = corner_frequency(oversampled_rate, sub_division);
        Self {
            sections: SECTION_Q
                .map(|q| Biquad::new(BiquadMode::LowPass { q }, corner, oversampled_rate)),
            sub_division,
        }
    }

    pub fn set_sample_rate(&mut self, oversampled_rate: f32) {
        let corner = corner_frequency(oversampled_rate, self.sub_division);
        for section in self.sections.iter_mut() {
            section.set_sample_rate(oversampled_rate);
            section.set_frequency(corner);
        }
    }

    pub fn reset(&mut self) {
        for section in self.sections.iter_mut() {
            section.reset();
        }
    }

    #[inline]
    pub fn process(&mut self, in_: f32) -> f32 {
        self.sections
            .iter_mut()
            .fold(in_, |sample, section| section.process(sample))
    }
}

#[inline]
fn corner_frequency(oversampled_rate: f32, sub_division: usize) -> f32 {
    CORNER * 0.5 * oversampled_rate / sub_division as f32
}
