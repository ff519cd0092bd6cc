//! Configuration of the engine parameters that are not automated by the host.
//!
//! These shape the character of the instrument and are set rarely, typically once on startup.
//! Apply them with [`Voice::apply_settings`](crate::voice::Voice::apply_settings), or with
//! [`BassSynth::apply_settings`](crate::engine::BassSynth::apply_settings) when driving the
//! engine directly. The latter ignores the accent threshold.

use crate::filter::filter_morph::DEFAULT_HIGH_MODE;
use crate::filter::pole_mixing_filter::FilterMode;
use crate::ACCENT_THRESHOLD;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Settings {
    /// Frequency of A4 in Hz.
    pub tuning: f32,
    /// Glide time constant in ms.
    pub slide_time: f32,
    /// Time constant of the smoothing of the filter envelope on normal notes in ms.
    pub normal_attack: f32,
    /// Time constant of the smoothing of the filter envelope on accented notes in ms.
    pub accent_attack: f32,
    /// Filter envelope decay of accented notes in ms.
    pub accent_decay: f32,
    /// Amplitude envelope decay in ms.
    pub amp_decay: f32,
    /// Amplitude envelope sustain in dB. Levels at or below -120 dB mean silence.
    pub amp_sustain: f32,
    /// Amplitude envelope release of normal notes in ms.
    pub amp_release: f32,
    /// Amplitude envelope release of accented notes in ms.
    pub accent_amp_release: f32,
    pub pre_filter_highpass: f32,
    pub feedback_highpass: f32,
    pub post_filter_highpass: f32,
    pub allpass: f32,
    pub notch_frequency: f32,
    /// Notch width in octaves.
    pub notch_bandwidth: f32,
    /// Filter response above the center of the morph range.
    pub morph_high_mode: FilterMode,
    /// Velocity at or above which a note is accented.
    pub accent_threshold: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: 440.0,
            slide_time: 60.0,
            normal_attack: 10.0,
            accent_attack: 3.0,
            accent_decay: 200.0,
            amp_decay: 1230.0,
            amp_sustain: -120.0,
            amp_release: 1.0,
            accent_amp_release: 50.0,
            pre_filter_highpass: 44.486,
            feedback_highpass: 150.0,
            post_filter_highpass: 24.167,
            allpass: 14.008,
            notch_frequency: 7.5164,
            notch_bandwidth: 4.7,
            morph_high_mode: DEFAULT_HIGH_MODE,
            accent_threshold: ACCENT_THRESHOLD,
        }
    }
}
