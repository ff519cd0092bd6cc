//! Polynomial approximation of the band-limited step used by the oscillator.

/// Residual to add to the sample in which a discontinuity occurs. `t` is the fraction of the
/// sample period elapsed since the discontinuity.
#[inline]
pub fn this_blep_sample(t: f32) -> f32 {
    0.5 * t * t
}

/// Residual to add to the sample following a discontinuity.
#[inline]
pub fn next_blep_sample(t: f32) -> f32 {
    let t = 1.0 - t;
    -0.5 * t * t
}

/// Spreads a step of `height` over the current and the next output sample.
#[inline]
pub fn add_step(this_sample: &mut f32, next_sample: &mut f32, t: f32, height: f32) {
    *this_sample += this_blep_sample(t) * height;
    *next_sample += next_blep_sample(t) * height;
}
