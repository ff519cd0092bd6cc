//! Translation of block-rate note input into monophonic note commands.
//!
//! Two input forms are supported:
//!
//! - A gate level with note number, velocity and an all-notes-off flag, sampled once per block.
//!   Every action is derived from an edge against the values seen in the previous block, so a
//!   sustained level issues its action exactly once.
//! - Discrete note events. Held keys are tracked on a [`NoteStack`] so that releasing the
//!   sounding key falls back to the previously held one without retriggering.

use crate::note_stack::NoteStack;
use crate::ACCENT_THRESHOLD;

/// Receiver of the commands issued by the [`NoteEventController`].
pub trait NoteReceiver {
    /// Starts a new note with fresh envelopes.
    fn trigger_note(&mut self, note: u8, accent: bool);

    /// Glides to a new note without retriggering the envelopes.
    fn slide_to_note(&mut self, note: u8, accent: bool);

    /// Releases the sounding note.
    fn release_note(&mut self, note: u8);

    /// Silences everything regardless of held keys.
    fn all_notes_off(&mut self);
}

/// Gate-style note input for one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateInput {
    pub gate: bool,
    pub note: u8,
    pub velocity: u8,
    pub all_notes_off: bool,
}

impl Default for GateInput {
    fn default() -> Self {
        Self {
            gate: false,
            note: 60,
            velocity: 0,
            all_notes_off: false,
        }
    }
}

impl GateInput {
    /// Builds the input from raw host control values, clamping note and velocity to
    /// `0..=127`.
    pub fn from_controls(gate: f32, note: f32, velocity: f32, all_notes_off: f32) -> Self {
        Self {
            gate: gate > 0.0,
            note: to_midi_byte(note),
            velocity: to_midi_byte(velocity),
            all_notes_off: all_notes_off >= 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteEvent {
    /// Key pressed. A velocity of 0 is treated as [`NoteEvent::NoteOff`].
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8 },
    AllNotesOff,
}

#[derive(Debug, Clone)]
pub struct NoteEventController {
    note_stack: NoteStack,
    accent_threshold: u8,

    last_gate: bool,
    last_note: u8,
    last_all_notes_off: bool,
}

impl Default for NoteEventController {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteEventController {
    pub fn new() -> Self {
        Self {
            note_stack: NoteStack::new(),
            accent_threshold: ACCENT_THRESHOLD,
            last_gate: false,
            last_note: 60,
            last_all_notes_off: false,
        }
    }

    pub fn init(&mut self) {
        self.note_stack.init();
        self.last_gate = false;
        self.last_note = 60;
        self.last_all_notes_off = false;
    }

    pub fn set_accent_threshold(&mut self, threshold: u8) {
        self.accent_threshold = threshold;
    }

    pub fn accent_threshold(&self) -> u8 {
        self.accent_threshold
    }

    pub fn note_stack(&self) -> &NoteStack {
        &self.note_stack
    }

    #[inline]
    fn is_accent(&self, velocity: u8) -> bool {
        velocity >= self.accent_threshold
    }

    /// Compares the gate input against the previous block and issues the resulting commands.
    pub fn process_gate<R>(&mut self, input: &GateInput, receiver: &mut R)
    where
        R: NoteReceiver + ?Sized,
    {
        let accent = self.is_accent(input.velocity);

        if input.gate && !self.last_gate {
            log::debug!("Trigger note {} (accent: {accent})", input.note);
            receiver.trigger_note(input.note, accent);
        }

        if input.note != self.last_note && input.gate && self.last_gate {
            log::debug!("Slide to note {} (accent: {accent})", input.note);
            receiver.slide_to_note(input.note, accent);
        }

        if self.last_gate && !input.gate {
            log::debug!("Release note {}", input.note);
            receiver.release_note(input.note);
        }

        if input.all_notes_off && !self.last_all_notes_off {
            log::debug!("All notes off");
            self.note_stack.clear();
            receiver.all_notes_off();
        }

        self.last_gate = input.gate;
        self.last_note = input.note;
        self.last_all_notes_off = input.all_notes_off;
    }

    /// Applies a single note event, keeping track of held keys.
    pub fn process_event<R>(&mut self, event: NoteEvent, receiver: &mut R)
    where
        R: NoteReceiver + ?Sized,
    {
        match event {
            NoteEvent::NoteOn { note, velocity: 0 } => self.note_off(note, receiver),
            NoteEvent::NoteOn { note, velocity } => {
                let accent = self.is_accent(velocity);
                if self.note_stack.is_empty() {
                    log::debug!("Trigger note {note} (accent: {accent})");
                    receiver.trigger_note(note, accent);
                } else {
                    log::debug!("Slide to note {note} (accent: {accent})");
                    receiver.slide_to_note(note, accent);
                }
                self.note_stack.note_on(note, velocity);
            }
            NoteEvent::NoteOff { note } => self.note_off(note, receiver),
            NoteEvent::AllNotesOff => {
                log::debug!("All notes off");
                self.note_stack.clear();
                receiver.all_notes_off();
            }
        }
    }

    pub fn process_events<R>(&mut self, events: &[NoteEvent], receiver: &mut R)
    where
        R: NoteReceiver + ?Sized,
    {
        for event in events {
            self.process_event(*event, receiver);
        }
    }

    fn note_off<R: NoteReceiver + ?Sized>(&mut self, note: u8, receiver: &mut R) {
        if !self.note_stack.contains(note) {
            return;
        }

        let was_sounding = self
            .note_stack
            .most_recent_note()
            .is_some_and(|entry| entry.note == note);
        self.note_stack.note_off(note);

        match self.note_stack.most_recent_note() {
            None => {
                log::debug!("Release note {note}");
                receiver.release_note(note);
            }
            Some(entry) if was_sounding => {
                let accent = self.is_accent(entry.velocity);
                log::debug!("Fall back to note {} (accent: {accent})", entry.note);
                receiver.slide_to_note(entry.note, accent);
            }
            Some(_) => {}
        }
    }
}

#[inline]
fn to_midi_byte(value: f32) -> u8 {
    if value.is_nan() {
        0
    } else {
        value.clamp(0.0, 127.0) as u8
    }
}
