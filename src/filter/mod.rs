//! Filters of the signal chain.

pub mod anti_alias_filter;
pub mod biquad;
pub mod filter_morph;
pub mod one_pole_filter;
pub mod pole_mixing_filter;
