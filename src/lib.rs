#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]

pub mod controller;
pub mod engine;
pub mod envelope;
pub mod error;
pub mod filter;
pub mod note_stack;
pub mod oscillator;
pub mod settings;
pub mod utils;
pub mod voice;

pub use error::Error;

/// Oversampling factor of the oscillator/filter section.
pub const OVERSAMPLING: usize = 4;

/// Velocity at or above which a note is played with accent.
pub const ACCENT_THRESHOLD: u8 = 100;
