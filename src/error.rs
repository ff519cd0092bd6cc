//! Error type for the few operations that can be rejected.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    /// Sample rate was zero, negative or not a finite number.
    #[error("invalid sample rate: {0} Hz")]
    InvalidSampleRate(f32),
}

/// Checks a sample rate for use by the engine.
pub(crate) fn validate_sample_rate(sample_rate: f32) -> Result<f32, Error> {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        Ok(sample_rate)
    } else {
        log::warn!("Rejected sample rate {sample_rate} Hz");
        Err(Error::InvalidSampleRate(sample_rate))
    }
}
