//! Envelope generators and the smoothing integrators shaping the filter envelope.

pub mod analog_envelope;
pub mod decay_envelope;
pub mod leaky_integrator;

#[allow(unused_imports)]
use num_traits::float::Float;

/// Per-sample coefficient of an exponential with time constant `time_ms`. Zero for times
/// that are not positive and for times so short that the coefficient would be subnormal.
#[inline]
pub(crate) fn time_constant_coefficient(time_ms: f32, sample_rate: f32) -> f32 {
    if time_ms > 0.0 {
        let coefficient = (-1.0 / (0.001 * time_ms * sample_rate)).exp();
        if coefficient < f32::MIN_POSITIVE {
            0.0
        } else {
            coefficient
        }
    } else {
        0.0
    }
}
