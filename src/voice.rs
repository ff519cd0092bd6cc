//! Block-based driver around the engine.
//!
//! Once per block the note input is turned into commands for the engine, then every host
//! parameter is ramped from its previous value to the newly requested one while the samples of
//! the block are rendered.

use crate::controller::{GateInput, NoteEvent, NoteEventController};
use crate::engine::{BassSynth, MAX_PITCH_BEND};
use crate::error::Error;
use crate::filter::pole_mixing_filter::{MAX_CUTOFF, MIN_CUTOFF};
use crate::settings::Settings;
use crate::utils::parameter_interpolator::ParameterInterpolator;

/// Host parameters, each in its natural range.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Patch {
    /// Oscillator waveform in the range from `0.0` (saw) to `1.0` (square). Default is `0.0`.
    pub waveform: f32,

    /// Filter cutoff in Hz in the range from `200.0` to `20000.0`. Default is `1000.0`.
    pub cutoff: f32,

    /// Filter resonance in percent. Default is `50.0`.
    pub resonance: f32,

    /// Filter envelope depth in percent. Default is `25.0`.
    pub env_mod: f32,

    /// Filter envelope decay in ms in the range from `200.0` to `2000.0`. Default is `1000.0`.
    pub decay: f32,

    /// Accent amount in percent. Default is `50.0`.
    pub accent: f32,

    /// Output level in dB in the range from `-60.0` to `0.0`. Default is `-12.0`.
    pub volume: f32,

    /// Filter morph position in the range from `0.0` to `1.0`. Default is `0.0`.
    pub filter_morph: f32,

    /// Filter drive in dB in the range from `-24.0` to `24.0`. Default is `0.0`.
    pub filter_drive: f32,

    /// Pitch bend in semitones in the range from `-12.0` to `12.0`. Default is `0.0`.
    pub pitch_bend: f32,

    /// Level of the external input in the range from `0.0` to `1.0`. Default is `0.0`.
    pub ext_in_mix: f32,
}

impl Default for Patch {
    fn default() -> Self {
        Self {
            waveform: 0.0,
            cutoff: 1000.0,
            resonance: 50.0,
            env_mod: 25.0,
            decay: 1000.0,
            accent: 50.0,
            volume: -12.0,
            filter_morph: 0.0,
            filter_drive: 0.0,
            pitch_bend: 0.0,
            ext_in_mix: 0.0,
        }
    }
}

impl Patch {
    /// Copy with every parameter limited to its range. NaN falls back to the default value.
    pub fn clamped(&self) -> Self {
        let default = Self::default();
        Self {
            waveform: limit(self.waveform, 0.0, 1.0, default.waveform),
            cutoff: limit(self.cutoff, MIN_CUTOFF, MAX_CUTOFF, default.cutoff),
            resonance: limit(self.resonance, 0.0, 100.0, default.resonance),
            env_mod: limit(self.env_mod, 0.0, 100.0, default.env_mod),
            decay: limit(self.decay, 200.0, 2000.0, default.decay),
            accent: limit(self.accent, 0.0, 100.0, default.accent),
            volume: limit(self.volume, -60.0, 0.0, default.volume),
            filter_morph: limit(self.filter_morph, 0.0, 1.0, default.filter_morph),
            filter_drive: limit(self.filter_drive, -24.0, 24.0, default.filter_drive),
            pitch_bend: limit(
                self.pitch_bend,
                -MAX_PITCH_BEND,
                MAX_PITCH_BEND,
                default.pitch_bend,
            ),
            ext_in_mix: limit(self.ext_in_mix, 0.0, 1.0, default.ext_in_mix),
        }
    }
}

#[inline]
fn limit(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

#[derive(Debug, Clone)]
pub struct Voice {
    synth: BassSynth,
    controller: NoteEventController,

    // Committed parameter values, starting points of the next block's ramps.
    patch: Patch,
}

impl Voice {
    pub fn new(sample_rate: f32) -> Result<Self, Error> {
        let mut voice = Self {
            synth: BassSynth::new(sample_rate)?,
            controller: NoteEventController::new(),
            patch: Patch::default(),
        };
        voice.init(&Patch::default());
        Ok(voice)
    }

    /// Resets the note input and jumps to `patch` without ramping.
    pub fn init(&mut self, patch: &Patch) {
        self.controller.init();
        self.patch = patch.clamped();
        let patch = self.patch.clone();
        self.apply_patch(&patch);
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) -> Result<(), Error> {
        self.synth.set_sample_rate(sample_rate)
    }

    /// Applies the tweakables to the engine and the accent threshold to the note input.
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.synth.apply_settings(settings);
        self.controller.set_accent_threshold(settings.accent_threshold);
    }

    #[inline]
    pub fn synth(&self) -> &BassSynth {
        &self.synth
    }

    #[inline]
    pub fn synth_mut(&mut self) -> &mut BassSynth {
        &mut self.synth
    }

    #[inline]
    pub fn controller(&self) -> &NoteEventController {
        &self.controller
    }

    /// Renders a block driven by a gate input. `ext_in`, when given, is read sample by sample
    /// alongside `out`.
    pub fn render(
        &mut self,
        patch: &Patch,
        input: &GateInput,
        ext_in: Option<&[f32]>,
        out: &mut [f32],
    ) {
        self.controller.process_gate(input, &mut self.synth);
        self.render_block(patch, ext_in, out);
    }

    /// Renders a block driven by note events. All events apply before the first sample.
    pub fn render_events(
        &mut self,
        patch: &Patch,
        events: &[NoteEvent],
        ext_in: Option<&[f32]>,
        out: &mut [f32],
    ) {
        self.controller.process_events(events, &mut self.synth);
        self.render_block(patch, ext_in, out);
    }

    fn render_block(&mut self, patch: &Patch, ext_in: Option<&[f32]>, out: &mut [f32]) {
        let patch = patch.clamped();
        let size = out.len();
        let committed = &mut self.patch;
        let synth = &mut self.synth;

        let mut waveform =
            ParameterInterpolator::new(&mut committed.waveform, patch.waveform, size);
        let mut cutoff = ParameterInterpolator::new(&mut committed.cutoff, patch.cutoff, size);
        let mut resonance =
            ParameterInterpolator::new(&mut committed.resonance, patch.resonance, size);
        let mut env_mod = ParameterInterpolator::new(&mut committed.env_mod, patch.env_mod, size);
        let mut decay = ParameterInterpolator::new(&mut committed.decay, patch.decay, size);
        let mut accent = ParameterInterpolator::new(&mut committed.accent, patch.accent, size);
        let mut volume = ParameterInterpolator::new(&mut committed.volume, patch.volume, size);
        let mut filter_morph =
            ParameterInterpolator::new(&mut committed.filter_morph, patch.filter_morph, size);
        let mut filter_drive =
            ParameterInterpolator::new(&mut committed.filter_drive, patch.filter_drive, size);
        let mut pitch_bend =
            ParameterInterpolator::new(&mut committed.pitch_bend, patch.pitch_bend, size);
        let mut ext_in_mix =
            ParameterInterpolator::new(&mut committed.ext_in_mix, patch.ext_in_mix, size);

        for (i, out_sample) in out.iter_mut().enumerate() {
            synth.set_waveform(waveform.next());
            synth.set_cutoff(cutoff.next());
            synth.set_resonance(resonance.next());
            synth.set_env_mod(env_mod.next());
            synth.set_decay(decay.next());
            synth.set_accent(accent.next());
            synth.set_volume(volume.next());
            synth.set_filter_morph(filter_morph.next());
            synth.set_filter_drive(filter_drive.next());
            synth.set_pitch_bend(pitch_bend.next());
            synth.set_ext_in_mix(ext_in_mix.next());

            let input = ext_in.and_then(|ext_in| ext_in.get(i)).copied().unwrap_or(0.0);
            *out_sample = synth.process_with_input(input);
        }
    }

    fn apply_patch(&mut self, patch: &Patch) {
        self.synth.set_waveform(patch.waveform);
        self.synth.set_cutoff(patch.cutoff);
        self.synth.set_resonance(patch.resonance);
        self.synth.set_env_mod(patch.env_mod);
        self.synth.set_decay(patch.decay);
        self.synth.set_accent(patch.accent);
        self.synth.set_volume(patch.volume);
        self.synth.set_filter_morph(patch.filter_morph);
        self.synth.set_filter_drive(patch.filter_drive);
        self.synth.set_pitch_bend(patch.pitch_bend);
        self.synth.set_ext_in_mix(patch.ext_in_mix);
    }
}
