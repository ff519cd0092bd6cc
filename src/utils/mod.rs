//! Utility functions shared by the building blocks of the engine.

pub mod parameter_interpolator;
pub mod polyblep;
pub mod units;

#[allow(unused_imports)]
use num_traits::float::Float;

#[inline]
pub fn one_pole(out: &mut f32, in_: f32, coefficient: f32) {
    *out += coefficient * (in_ - *out);
}

/// Linear blend from `a` (at `fade == 0.0`) to `b` (at `fade == 1.0`).
#[inline]
pub fn crossfade(a: f32, b: f32, fade: f32) -> f32 {
    a + (b - a) * fade
}

/// Flushes values too small to matter to zero to keep recursive filters out of denormals.
#[inline]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1.0e-20 {
        0.0
    } else {
        x
    }
}
