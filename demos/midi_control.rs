//! Bass voice with MIDI note and parameter control.

use audio_midi_shell::{AudioGenerator, AudioMidiShell};
use simple_logger::SimpleLogger;

use acid_bass_dsp::controller::NoteEvent;
use acid_bass_dsp::utils::units::{lin_to_exp, lin_to_lin};
use acid_bass_dsp::voice::{Patch, Voice};

const SAMPLE_RATE: u32 = 48000;
const BLOCK_SIZE: usize = 32;

fn main() -> ! {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .unwrap();

    AudioMidiShell::run_forever(SAMPLE_RATE, BLOCK_SIZE, App::new());
}

#[derive(Debug)]
struct App {
    voice: Voice,
    patch: Patch,
    events: Vec<NoteEvent>,
}

impl App {
    pub fn new() -> Self {
        Self {
            voice: Voice::new(SAMPLE_RATE as f32).unwrap(),
            patch: Patch::default(),
            events: Vec::new(),
        }
    }
}

impl AudioGenerator for App {
    fn init(&mut self, _block_size: usize) {
        self.patch.cutoff = 500.0;
        self.patch.resonance = 80.0;
        self.patch.env_mod = 50.0;
        self.voice.init(&self.patch);
    }

    fn process(&mut self, samples_left: &mut [f32], samples_right: &mut [f32]) {
        let mut out = vec![0.0; samples_left.len()];

        self.voice.render_events(&self.patch, &self.events, None, &mut out);
        self.events.clear();

        samples_left.clone_from_slice(&out);
        samples_right.clone_from_slice(&out);
    }

    fn process_midi(&mut self, message: Vec<u8>) {
        if message.len() < 3 {
            return;
        }

        match message[0] & 0xF0 {
            0x80 => {
                self.events.push(NoteEvent::NoteOff { note: message[1] });
                log::info!("Note off: {}", message[1]);
            }
            0x90 => {
                self.events.push(NoteEvent::NoteOn {
                    note: message[1],
                    velocity: message[2],
                });
                log::info!("Note on: {} velocity {}", message[1], message[2]);
            }
            0xB0 => {
                // Control change
                let value = message[2] as f32 / 127.0;
                match message[1] {
                    21 => {
                        self.patch.waveform = value;
                        log::info!("Waveform: {}", self.patch.waveform);
                    }
                    22 => {
                        self.patch.cutoff = lin_to_exp(value, 0.0, 1.0, 314.0, 2394.0);
                        log::info!("Cutoff: {} Hz", self.patch.cutoff);
                    }
                    23 => {
                        self.patch.resonance = 100.0 * value;
                        log::info!("Resonance: {} %", self.patch.resonance);
                    }
                    24 => {
                        self.patch.env_mod = 100.0 * value;
                        log::info!("Env mod: {} %", self.patch.env_mod);
                    }
                    25 => {
                        self.patch.decay = lin_to_exp(value, 0.0, 1.0, 200.0, 2000.0);
                        log::info!("Decay: {} ms", self.patch.decay);
                    }
                    26 => {
                        self.patch.accent = 100.0 * value;
                        log::info!("Accent: {} %", self.patch.accent);
                    }
                    27 => {
                        self.patch.filter_morph = value;
                        log::info!("Filter morph: {}", self.patch.filter_morph);
                    }
                    28 => {
                        self.patch.volume = lin_to_lin(value, 0.0, 1.0, -60.0, 0.0);
                        log::info!("Volume: {} dB", self.patch.volume);
                    }
                    123 => {
                        self.events.push(NoteEvent::AllNotesOff);
                        log::info!("All notes off");
                    }
                    _ => {}
                }
            }
            0xE0 => {
                // Pitch bend
                let bend = ((message[2] as i32) << 7 | message[1] as i32) - 8192;
                self.patch.pitch_bend = lin_to_lin(bend as f32, -8192.0, 8192.0, -12.0, 12.0);
                log::info!("Pitch bend: {} semitones", self.patch.pitch_bend);
            }
            _ => {}
        }
    }
}
