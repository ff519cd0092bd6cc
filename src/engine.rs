//! Monophonic bass synthesizer engine.
//!
//! Signal flow per output sample:
//!
//! - The slide integrator glides the oscillator towards the note frequency.
//! - The filter envelope passes two smoothing integrators and modulates the cutoff in octaves.
//!   The second one only contributes on accented notes.
//! - Oscillator, pre-filter high-pass, external input blend, morphing filter and anti-aliasing
//!   filter run [`OVERSAMPLING`] times per output sample.
//! - All-pass, post-filter high-pass and notch shape the result at the base rate before it is
//!   scaled by the declicked amplitude envelope and the volume.
//!
//! The engine goes idle once the amplitude envelope has faded out after a release and then
//! renders silence without touching any state.

// Based on MIT-licensed code (c) 2009 by Robin Schmidt

#[allow(unused_imports)]
use num_traits::float::Float;

use crate::controller::NoteReceiver;
use crate::envelope::analog_envelope::AnalogEnvelope;
use crate::envelope::decay_envelope::DecayEnvelope;
use crate::envelope::leaky_integrator::{normalizer, LeakyIntegrator};
use crate::error::{validate_sample_rate, Error};
use crate::filter::anti_alias_filter::AntiAliasFilter;
use crate::filter::biquad::{Biquad, BiquadMode};
use crate::filter::filter_morph::FilterMorph;
use crate::filter::one_pole_filter::{OnePoleFilter, OnePoleMode};
use crate::filter::pole_mixing_filter::{FilterMode, MAX_CUTOFF, MIN_CUTOFF};
use crate::oscillator::blend_oscillator::BlendOscillator;
use crate::settings::Settings;
use crate::utils::crossfade;
use crate::utils::units::{
    amp_to_db, db_to_amp, exp_to_lin, octaves_to_ratio, pitch_to_frequency, semitones_to_ratio,
};
use crate::OVERSAMPLING;

/// Level below which the amplitude envelope counts as silent.
pub const SILENCE_DB: f32 = -120.0;

/// Largest pitch bend in semitones in either direction.
pub const MAX_PITCH_BEND: f32 = 12.0;

const DECLICK_FREQUENCY: f32 = 200.0;

// Measured mapping of the envelope modulation depth onto octaves.
const ENV_MOD_CUTOFF_LOW: f32 = 313.815_28;
const ENV_MOD_CUTOFF_HIGH: f32 = 2394.412;
const ENV_MOD_SLOPE_LOW: f32 = 3.773_996_3;
const ENV_MOD_INTERCEPT_LOW: f32 = 0.736_965_6;
const ENV_MOD_SLOPE_HIGH: f32 = 4.194_548_8;
const ENV_MOD_INTERCEPT_HIGH: f32 = 0.864_344_9;
const ENV_OFFSET_SLOPE: f32 = 0.048_292_93;
const ENV_OFFSET_INTERCEPT: f32 = 0.294_391_2;

// Contribution of the filter envelope to the amplitude while a note is held.
const AMP_SNAP: f32 = 0.45;
const AMP_SNAP_ACCENT: f32 = 4.0;

#[derive(Debug, Clone)]
pub struct BassSynth {
    sample_rate: f32,

    oscillator: BlendOscillator,
    pitch_slewer: LeakyIntegrator,
    pre_filter_highpass: OnePoleFilter,
    filter: FilterMorph,
    anti_alias_filter: AntiAliasFilter,
    allpass: OnePoleFilter,
    post_filter_highpass: OnePoleFilter,
    notch: Biquad,

    main_envelope: DecayEnvelope,
    normal_smoother: LeakyIntegrator,
    accent_smoother: LeakyIntegrator,
    normal_normalizer: f32,
    accent_normalizer: f32,
    amp_envelope: AnalogEnvelope,
    amp_declicker: Biquad,

    // Host parameters.
    waveform: f32,
    cutoff: f32,
    env_mod: f32,
    decay: f32,
    accent: f32,
    volume: f32,
    amp_scaler: f32,
    pitch_bend: f32,
    pitch_bend_factor: f32,
    ext_in_mix: f32,

    // Tweakables.
    tuning: f32,
    accent_decay: f32,
    amp_release: f32,
    accent_amp_release: f32,
    amp_sustain: f32,

    env_scaler: f32,
    env_offset: f32,

    note: u8,
    accent_note: bool,
    accent_gain: f32,
    osc_frequency: f32,
    idle: bool,
}

impl BassSynth {
    pub fn new(sample_rate: f32) -> Result<Self, Error> {
        let sample_rate = validate_sample_rate(sample_rate)?;
        let oversampled_rate = sample_rate * OVERSAMPLING as f32;
        let settings = Settings::default();

        let mut synth = Self {
            sample_rate,
            oscillator: BlendOscillator::new(oversampled_rate),
            pitch_slewer: LeakyIntegrator::new(settings.slide_time, sample_rate),
            pre_filter_highpass: OnePoleFilter::new(
                OnePoleMode::HighPass,
                settings.pre_filter_highpass,
                oversampled_rate,
            ),
            filter: FilterMorph::new(oversampled_rate),
            anti_alias_filter: AntiAliasFilter::new(oversampled_rate, OVERSAMPLING),
            allpass: OnePoleFilter::new(OnePoleMode::AllPass, settings.allpass, sample_rate),
            post_filter_highpass: OnePoleFilter::new(
                OnePoleMode::HighPass,
                settings.post_filter_highpass,
                sample_rate,
            ),
            notch: Biquad::new(
                BiquadMode::BandReject {
                    bandwidth: settings.notch_bandwidth,
                },
                settings.notch_frequency,
                sample_rate,
            ),
            main_envelope: DecayEnvelope::new(1000.0, sample_rate),
            normal_smoother: LeakyIntegrator::new(settings.normal_attack, sample_rate),
            accent_smoother: LeakyIntegrator::new(settings.accent_attack, sample_rate),
            normal_normalizer: 1.0,
            accent_normalizer: 1.0,
            amp_envelope: AnalogEnvelope::new(sample_rate),
            amp_declicker: Biquad::new(
                BiquadMode::LowPass {
                    q: core::f32::consts::FRAC_1_SQRT_2,
                },
                DECLICK_FREQUENCY,
                sample_rate,
            ),
            waveform: 0.0,
            cutoff: 1000.0,
            env_mod: 25.0,
            decay: 1000.0,
            accent: 0.5,
            volume: -12.0,
            amp_scaler: db_to_amp(-12.0),
            pitch_bend: 0.0,
            pitch_bend_factor: 1.0,
            ext_in_mix: 0.0,
            tuning: settings.tuning,
            accent_decay: settings.accent_decay,
            amp_release: settings.amp_release,
            accent_amp_release: settings.accent_amp_release,
            amp_sustain: settings.amp_sustain,
            env_scaler: 1.0,
            env_offset: 0.0,
            note: 60,
            accent_note: false,
            accent_gain: 0.0,
            osc_frequency: 440.0,
            idle: true,
        };

        synth.apply_settings(&settings);
        synth.calculate_env_mod_scaler_and_offset();
        synth.main_envelope.set_decay(synth.decay);
        synth.update_normalizers();
        synth.set_resonance(50.0);
        synth.set_filter_morph(0.0);
        Ok(synth)
    }

    /// Changes the output sample rate and recomputes every coefficient. An invalid rate is
    /// rejected and leaves the engine untouched.
    pub fn set_sample_rate(&mut self, sample_rate: f32) -> Result<(), Error> {
        let sample_rate = validate_sample_rate(sample_rate)?;
        let oversampled_rate = sample_rate * OVERSAMPLING as f32;
        self.sample_rate = sample_rate;

        self.oscillator.set_sample_rate(oversampled_rate);
        self.pre_filter_highpass.set_sample_rate(oversampled_rate);
        self.filter.set_sample_rate(oversampled_rate);
        self.anti_alias_filter.set_sample_rate(oversampled_rate);

        self.pitch_slewer.set_sample_rate(sample_rate);
        self.allpass.set_sample_rate(sample_rate);
        self.post_filter_highpass.set_sample_rate(sample_rate);
        self.notch.set_sample_rate(sample_rate);
        self.main_envelope.set_sample_rate(sample_rate);
        self.normal_smoother.set_sample_rate(sample_rate);
        self.accent_smoother.set_sample_rate(sample_rate);
        self.amp_envelope.set_sample_rate(sample_rate);
        self.amp_declicker.set_sample_rate(sample_rate);
        self.update_normalizers();
        Ok(())
    }

    #[inline]
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Applies all tweakable parameters at once.
    pub fn apply_settings(&mut self, settings: &Settings) {
        log::debug!("Applying settings: {settings:?}");
        self.set_tuning(settings.tuning);
        self.set_slide_time(settings.slide_time);
        self.set_normal_attack(settings.normal_attack);
        self.set_accent_attack(settings.accent_attack);
        self.set_accent_decay(settings.accent_decay);
        self.set_amp_decay(settings.amp_decay);
        self.set_amp_sustain(settings.amp_sustain);
        self.set_amp_release(settings.amp_release);
        self.set_accent_amp_release(settings.accent_amp_release);
        self.set_pre_filter_highpass(settings.pre_filter_highpass);
        self.set_feedback_highpass(settings.feedback_highpass);
        self.set_post_filter_highpass(settings.post_filter_highpass);
        self.set_allpass(settings.allpass);
        self.set_notch(settings.notch_frequency, settings.notch_bandwidth);
        self.set_morph_high_mode(settings.morph_high_mode);
    }

    /// Current tweakable parameters. The accent threshold is not owned by the engine and
    /// reported with its default.
    pub fn settings(&self) -> Settings {
        let (notch_frequency, notch_bandwidth) = self.notch();
        Settings {
            tuning: self.tuning,
            slide_time: self.slide_time(),
            normal_attack: self.normal_attack(),
            accent_attack: self.accent_attack(),
            accent_decay: self.accent_decay,
            amp_decay: self.amp_decay(),
            amp_sustain: self.amp_sustain,
            amp_release: self.amp_release,
            accent_amp_release: self.accent_amp_release,
            pre_filter_highpass: self.pre_filter_highpass(),
            feedback_highpass: self.feedback_highpass(),
            post_filter_highpass: self.post_filter_highpass(),
            allpass: self.allpass(),
            notch_frequency,
            notch_bandwidth,
            morph_high_mode: self.morph_high_mode(),
            ..Settings::default()
        }
    }

    // Host parameters. Out-of-range values are clamped and NaN leaves the value unchanged.

    /// Sets the waveform from sawtooth (0.0) to square (1.0).
    pub fn set_waveform(&mut self, waveform: f32) {
        if waveform.is_nan() {
            return;
        }
        self.waveform = waveform.clamp(0.0, 1.0);
        self.oscillator.set_blend(self.waveform);
    }

    /// Sets the nominal filter cutoff in Hz.
    pub fn set_cutoff(&mut self, cutoff: f32) {
        let cutoff = cutoff.clamp(MIN_CUTOFF, MAX_CUTOFF);
        if cutoff.is_nan() || cutoff == self.cutoff {
            return;
        }
        self.cutoff = cutoff;
        self.calculate_env_mod_scaler_and_offset();
    }

    /// Sets the filter resonance in percent.
    pub fn set_resonance(&mut self, resonance: f32) {
        self.filter.set_resonance(resonance);
    }

    /// Sets the depth of the filter envelope in percent.
    pub fn set_env_mod(&mut self, env_mod: f32) {
        let env_mod = env_mod.clamp(0.0, 100.0);
        if env_mod.is_nan() || env_mod == self.env_mod {
            return;
        }
        self.env_mod = env_mod;
        self.calculate_env_mod_scaler_and_offset();
    }

    /// Sets the filter envelope decay of normal notes in ms.
    pub fn set_decay(&mut self, decay: f32) {
        if decay.is_nan() {
            return;
        }
        let decay = decay.max(0.0);
        if decay == self.decay {
            return;
        }
        self.decay = decay;
        if !self.accent_note {
            self.main_envelope.set_decay(self.decay);
        }
        self.update_normalizers();
    }

    /// Sets the accent amount in percent.
    pub fn set_accent(&mut self, accent: f32) {
        if accent.is_nan() {
            return;
        }
        self.accent = 0.01 * accent.clamp(0.0, 100.0);
    }

    /// Sets the output level in dB.
    pub fn set_volume(&mut self, volume: f32) {
        if volume.is_nan() || volume == self.volume {
            return;
        }
        self.volume = volume;
        self.amp_scaler = db_to_amp(volume);
    }

    /// Sets the filter morph position, clamped to `0.0..=1.0`.
    pub fn set_filter_morph(&mut self, position: f32) {
        self.filter.set_filter_morph(position);
    }

    /// Sets the filter input drive in dB.
    pub fn set_filter_drive(&mut self, drive: f32) {
        self.filter.set_drive(drive);
    }

    /// Sets the pitch bend in semitones, clamped to ±12.
    pub fn set_pitch_bend(&mut self, semitones: f32) {
        self.pitch_bend = if semitones.is_nan() {
            0.0
        } else {
            semitones.clamp(-MAX_PITCH_BEND, MAX_PITCH_BEND)
        };
        self.pitch_bend_factor = semitones_to_ratio(self.pitch_bend);
    }

    /// Sets the level of the external input blended in front of the filter, `0.0..=1.0`.
    pub fn set_ext_in_mix(&mut self, mix: f32) {
        if !mix.is_nan() {
            self.ext_in_mix = mix.clamp(0.0, 1.0);
        }
    }

    #[inline]
    pub fn waveform(&self) -> f32 {
        self.waveform
    }

    #[inline]
    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    #[inline]
    pub fn resonance(&self) -> f32 {
        self.filter.filter_a().resonance()
    }

    #[inline]
    pub fn env_mod(&self) -> f32 {
        self.env_mod
    }

    #[inline]
    pub fn decay(&self) -> f32 {
        self.decay
    }

    #[inline]
    pub fn accent(&self) -> f32 {
        100.0 * self.accent
    }

    #[inline]
    pub fn volume(&self) -> f32 {
        self.volume
    }

    #[inline]
    pub fn filter_morph(&self) -> f32 {
        self.filter.filter_morph()
    }

    #[inline]
    pub fn filter_drive(&self) -> f32 {
        self.filter.filter_a().drive()
    }

    #[inline]
    pub fn pitch_bend(&self) -> f32 {
        self.pitch_bend
    }

    #[inline]
    pub fn ext_in_mix(&self) -> f32 {
        self.ext_in_mix
    }

    // Tweakables.

    /// Sets the frequency of A4 in Hz. A sounding note glides to the new tuning.
    pub fn set_tuning(&mut self, tuning: f32) {
        self.tuning = tuning.max(1.0);
        self.osc_frequency = pitch_to_frequency(self.note as f32, self.tuning);
    }

    /// Sets the glide time constant in ms.
    pub fn set_slide_time(&mut self, slide_time: f32) {
        self.pitch_slewer.set_time_constant(slide_time);
    }

    /// Sets the smoothing time of the filter envelope on normal notes in ms.
    pub fn set_normal_attack(&mut self, attack: f32) {
        self.normal_smoother.set_time_constant(attack);
        self.update_normalizers();
    }

    /// Sets the smoothing time of the filter envelope on accented notes in ms.
    pub fn set_accent_attack(&mut self, attack: f32) {
        self.accent_smoother.set_time_constant(attack);
        self.update_normalizers();
    }

    /// Sets the filter envelope decay of accented notes in ms.
    pub fn set_accent_decay(&mut self, decay: f32) {
        self.accent_decay = decay.max(0.0);
        if self.accent_note {
            self.main_envelope.set_decay(self.accent_decay);
        }
        self.update_normalizers();
    }

    pub fn set_amp_decay(&mut self, decay: f32) {
        self.amp_envelope.set_decay(decay);
    }

    /// Sets the amplitude sustain level in dB.
    pub fn set_amp_sustain(&mut self, sustain: f32) {
        if sustain.is_nan() {
            return;
        }
        self.amp_sustain = sustain;
        self.amp_envelope.set_sustain(if sustain <= SILENCE_DB {
            0.0
        } else {
            db_to_amp(sustain)
        });
    }

    /// Sets the amplitude release of normal notes in ms.
    pub fn set_amp_release(&mut self, release: f32) {
        self.amp_release = release.max(0.0);
        if !self.accent_note {
            self.amp_envelope.set_release(self.amp_release);
        }
    }

    /// Sets the amplitude release of accented notes in ms.
    pub fn set_accent_amp_release(&mut self, release: f32) {
        self.accent_amp_release = release.max(0.0);
        if self.accent_note {
            self.amp_envelope.set_release(self.accent_amp_release);
        }
    }

    pub fn set_pre_filter_highpass(&mut self, cutoff: f32) {
        self.pre_filter_highpass.set_cutoff(cutoff);
    }

    /// Sets the cutoff of the high-pass in the resonance feedback path in Hz.
    pub fn set_feedback_highpass(&mut self, cutoff: f32) {
        self.filter.set_feedback_highpass_cutoff(cutoff);
    }

    pub fn set_post_filter_highpass(&mut self, cutoff: f32) {
        self.post_filter_highpass.set_cutoff(cutoff);
    }

    pub fn set_allpass(&mut self, cutoff: f32) {
        self.allpass.set_cutoff(cutoff);
    }

    /// Sets the notch center frequency in Hz and its width in octaves.
    pub fn set_notch(&mut self, frequency: f32, bandwidth: f32) {
        self.notch.set_frequency(frequency);
        self.notch.set_mode(BiquadMode::BandReject {
            bandwidth: bandwidth.max(0.0),
        });
    }

    /// Selects the filter response at the upper end of the morph range.
    pub fn set_morph_high_mode(&mut self, mode: FilterMode) {
        self.filter.set_high_mode(mode);
    }

    #[inline]
    pub fn tuning(&self) -> f32 {
        self.tuning
    }

    #[inline]
    pub fn slide_time(&self) -> f32 {
        self.pitch_slewer.time_constant()
    }

    #[inline]
    pub fn normal_attack(&self) -> f32 {
        self.normal_smoother.time_constant()
    }

    #[inline]
    pub fn accent_attack(&self) -> f32 {
        self.accent_smoother.time_constant()
    }

    #[inline]
    pub fn accent_decay(&self) -> f32 {
        self.accent_decay
    }

    #[inline]
    pub fn amp_decay(&self) -> f32 {
        self.amp_envelope.decay()
    }

    #[inline]
    pub fn amp_sustain(&self) -> f32 {
        self.amp_sustain
    }

    #[inline]
    pub fn amp_release(&self) -> f32 {
        self.amp_release
    }

    #[inline]
    pub fn accent_amp_release(&self) -> f32 {
        self.accent_amp_release
    }

    #[inline]
    pub fn pre_filter_highpass(&self) -> f32 {
        self.pre_filter_highpass.cutoff()
    }

    #[inline]
    pub fn feedback_highpass(&self) -> f32 {
        self.filter.filter_a().feedback_highpass_cutoff()
    }

    #[inline]
    pub fn post_filter_highpass(&self) -> f32 {
        self.post_filter_highpass.cutoff()
    }

    #[inline]
    pub fn allpass(&self) -> f32 {
        self.allpass.cutoff()
    }

    /// Notch center frequency in Hz and width in octaves.
    pub fn notch(&self) -> (f32, f32) {
        let bandwidth = match self.notch.mode() {
            BiquadMode::BandReject { bandwidth } => bandwidth,
            BiquadMode::LowPass { .. } => 0.0,
        };
        (self.notch.frequency(), bandwidth)
    }

    #[inline]
    pub fn morph_high_mode(&self) -> FilterMode {
        self.filter.high_mode()
    }

    // State.

    /// Note number of the sounding or last sounded note.
    #[inline]
    pub fn note(&self) -> u8 {
        self.note
    }

    #[inline]
    pub fn is_accented(&self) -> bool {
        self.accent_note
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.idle
    }

    /// Frequency the oscillator is gliding towards, without pitch bend.
    #[inline]
    pub fn target_frequency(&self) -> f32 {
        self.osc_frequency
    }

    /// Current oscillator frequency in Hz including pitch bend.
    #[inline]
    pub fn frequency(&self) -> f32 {
        self.pitch_slewer.state() * self.pitch_bend_factor
    }

    #[inline]
    pub fn filter(&self) -> &FilterMorph {
        &self.filter
    }

    /// Writes the state of both morph filters to the log.
    pub fn log_filter_state(&self) {
        self.filter.log_state();
    }

    /// Renders one output sample without external input.
    #[inline]
    pub fn process(&mut self) -> f32 {
        self.process_with_input(0.0)
    }

    /// Renders one output sample, blending `ext_in` into the filter input.
    #[inline]
    pub fn process_with_input(&mut self, ext_in: f32) -> f32 {
        if self.idle {
            return 0.0;
        }

        let frequency = self.pitch_slewer.process(self.osc_frequency) * self.pitch_bend_factor;
        self.oscillator.set_frequency(frequency);

        let main = self.main_envelope.process();
        let normal = self.normal_normalizer * self.normal_smoother.process(main);
        let accent = self.accent_normalizer
            * self
                .accent_smoother
                .process(if self.accent_gain > 0.0 { main } else { 0.0 });
        let octaves = self.env_scaler * (normal - self.env_offset) + self.accent_gain * accent;
        self.filter.set_cutoff(self.cutoff * octaves_to_ratio(octaves));

        let mut amp = self.amp_envelope.process();
        if self.amp_envelope.is_note_on() {
            amp += (AMP_SNAP + AMP_SNAP_ACCENT * self.accent_gain) * main;
        }
        let amp = self.amp_declicker.process(amp);

        let mut filtered = 0.0;
        for _ in 0..OVERSAMPLING {
            let osc = -self.oscillator.process();
            let osc = self.pre_filter_highpass.process(osc);
            let mixed = crossfade(osc, ext_in, self.ext_in_mix);
            filtered = self.anti_alias_filter.process(self.filter.process(mixed));
        }

        let mut out = self.allpass.process(filtered);
        out = self.post_filter_highpass.process(out);
        out = self.notch.process(out);
        out *= amp * self.amp_scaler;

        self.idle = !self.amp_envelope.is_note_on()
            && amp_to_db(self.amp_envelope.value()) < SILENCE_DB;

        out
    }

    fn calculate_env_mod_scaler_and_offset(&mut self) {
        let e = 0.01 * self.env_mod;
        let c = exp_to_lin(
            self.cutoff,
            ENV_MOD_CUTOFF_LOW,
            ENV_MOD_CUTOFF_HIGH,
            0.0,
            1.0,
        )
        .clamp(0.0, 1.0);
        let scaler_low = ENV_MOD_SLOPE_LOW * e + ENV_MOD_INTERCEPT_LOW;
        let scaler_high = ENV_MOD_SLOPE_HIGH * e + ENV_MOD_INTERCEPT_HIGH;
        self.env_scaler = crossfade(scaler_low, scaler_high, c);
        self.env_offset = ENV_OFFSET_SLOPE * c + ENV_OFFSET_INTERCEPT;
    }

    fn update_normalizers(&mut self) {
        self.normal_normalizer = normalizer(
            self.decay,
            self.normal_smoother.time_constant(),
            self.sample_rate,
        );
        self.accent_normalizer = normalizer(
            self.accent_decay,
            self.accent_smoother.time_constant(),
            self.sample_rate,
        );
    }

    /// Applies the decay and release times belonging to the accent state of the new note.
    fn set_accent_state(&mut self, accent: bool) {
        self.accent_note = accent;
        self.accent_gain = if accent { self.accent } else { 0.0 };
        if accent {
            self.main_envelope.set_decay(self.accent_decay);
            self.amp_envelope.set_release(self.accent_amp_release);
        } else {
            self.main_envelope.set_decay(self.decay);
            self.amp_envelope.set_release(self.amp_release);
        }
    }

    fn reset_signal_path(&mut self) {
        self.oscillator.reset();
        self.pre_filter_highpass.reset();
        self.filter.reset();
        self.anti_alias_filter.reset();
        self.allpass.reset();
        self.post_filter_highpass.reset();
        self.notch.reset();
        self.amp_declicker.reset();
        self.normal_smoother.reset();
        self.accent_smoother.reset();
    }
}

impl NoteReceiver for BassSynth {
    fn trigger_note(&mut self, note: u8, accent: bool) {
        if self.idle {
            self.reset_signal_path();
        }

        self.note = note;
        self.set_accent_state(accent);
        self.osc_frequency = pitch_to_frequency(note as f32, self.tuning);
        self.pitch_slewer.set_state(self.osc_frequency);
        self.main_envelope.trigger();
        self.amp_envelope.note_on();
        self.idle = false;
    }

    fn slide_to_note(&mut self, note: u8, accent: bool) {
        self.note = note;
        self.set_accent_state(accent);
        self.osc_frequency = pitch_to_frequency(note as f32, self.tuning);
    }

    fn release_note(&mut self, _note: u8) {
        self.amp_envelope.note_off();
    }

    fn all_notes_off(&mut self) {
        self.amp_envelope.note_off();
    }
}
