//! Oscillators.

pub mod blend_oscillator;
