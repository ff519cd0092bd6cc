//! Tests for the note event controller.

use acid_bass_dsp::controller::{GateInput, NoteEvent, NoteEventController, NoteReceiver};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Trigger(u8, bool),
    Slide(u8, bool),
    Release(u8),
    AllNotesOff,
}

#[derive(Debug, Default)]
struct Recorder {
    commands: Vec<Command>,
}

impl NoteReceiver for Recorder {
    fn trigger_note(&mut self, note: u8, accent: bool) {
        self.commands.push(Command::Trigger(note, accent));
    }

    fn slide_to_note(&mut self, note: u8, accent: bool) {
        self.commands.push(Command::Slide(note, accent));
    }

    fn release_note(&mut self, note: u8) {
        self.commands.push(Command::Release(note));
    }

    fn all_notes_off(&mut self) {
        self.commands.push(Command::AllNotesOff);
    }
}

fn gate(gate: bool, note: u8, velocity: u8) -> GateInput {
    GateInput {
        gate,
        note,
        velocity,
        all_notes_off: false,
    }
}

#[test]
fn gate_trigger_slide_release() {
    let mut controller = NoteEventController::new();
    let mut recorder = Recorder::default();

    let blocks = [
        gate(false, 45, 0),
        gate(true, 45, 127),
        gate(true, 45, 127),
        gate(true, 45, 127),
        gate(true, 48, 127),
        gate(true, 48, 127),
        gate(false, 48, 127),
        gate(false, 48, 127),
    ];
    for input in blocks.iter() {
        controller.process_gate(input, &mut recorder);
    }

    assert_eq!(
        recorder.commands,
        vec![
            Command::Trigger(45, true),
            Command::Slide(48, true),
            Command::Release(48),
        ]
    );
}

#[test]
fn gate_accent_threshold() {
    let mut controller = NoteEventController::new();
    let mut recorder = Recorder::default();

    controller.process_gate(&gate(true, 36, 99), &mut recorder);
    controller.process_gate(&gate(false, 36, 99), &mut recorder);
    controller.process_gate(&gate(true, 36, 100), &mut recorder);

    assert_eq!(
        recorder.commands,
        vec![
            Command::Trigger(36, false),
            Command::Release(36),
            Command::Trigger(36, true),
        ]
    );

    controller.set_accent_threshold(120);
    assert_eq!(controller.accent_threshold(), 120);
}

#[test]
fn gate_all_notes_off_on_rising_edge_only() {
    let mut controller = NoteEventController::new();
    let mut recorder = Recorder::default();

    let mut input = gate(false, 60, 0);
    input.all_notes_off = true;
    for _ in 0..4 {
        controller.process_gate(&input, &mut recorder);
    }
    input.all_notes_off = false;
    controller.process_gate(&input, &mut recorder);
    input.all_notes_off = true;
    controller.process_gate(&input, &mut recorder);

    assert_eq!(
        recorder.commands,
        vec![Command::AllNotesOff, Command::AllNotesOff]
    );
}

#[test]
fn gate_input_from_controls() {
    let input = GateInput::from_controls(1.0, 200.0, -5.0, 0.5);

    assert!(input.gate);
    assert_eq!(input.note, 127);
    assert_eq!(input.velocity, 0);
    assert!(!input.all_notes_off);

    let input = GateInput::from_controls(0.0, 45.7, 127.0, 1.0);
    assert!(!input.gate);
    assert_eq!(input.note, 45);
    assert_eq!(input.velocity, 127);
    assert!(input.all_notes_off);
}

#[test]
fn overlapping_holds_fall_back_to_previous_note() {
    let mut controller = NoteEventController::new();
    let mut recorder = Recorder::default();

    controller.process_events(
        &[
            NoteEvent::NoteOn {
                note: 60,
                velocity: 80,
            },
            NoteEvent::NoteOn {
                note: 64,
                velocity: 80,
            },
            NoteEvent::NoteOff { note: 64 },
        ],
        &mut recorder,
    );

    assert_eq!(
        recorder.commands,
        vec![
            Command::Trigger(60, false),
            Command::Slide(64, false),
            Command::Slide(60, false),
        ]
    );
    assert_eq!(
        controller.note_stack().most_recent_note().map(|e| e.note),
        Some(60)
    );

    controller.process_event(NoteEvent::NoteOff { note: 60 }, &mut recorder);
    assert_eq!(recorder.commands.last(), Some(&Command::Release(60)));
    assert!(controller.note_stack().is_empty());
}

#[test]
fn fallback_uses_accent_of_held_note() {
    let mut controller = NoteEventController::new();
    let mut recorder = Recorder::default();

    controller.process_event(
        NoteEvent::NoteOn {
            note: 40,
            velocity: 127,
        },
        &mut recorder,
    );
    controller.process_event(
        NoteEvent::NoteOn {
            note: 43,
            velocity: 20,
        },
        &mut recorder,
    );
    controller.process_event(NoteEvent::NoteOff { note: 43 }, &mut recorder);

    assert_eq!(recorder.commands.last(), Some(&Command::Slide(40, true)));
}

#[test]
fn releasing_a_held_but_silent_note_only_updates_the_stack() {
    let mut controller = NoteEventController::new();
    let mut recorder = Recorder::default();

    controller.process_event(
        NoteEvent::NoteOn {
            note: 60,
            velocity: 80,
        },
        &mut recorder,
    );
    controller.process_event(
        NoteEvent::NoteOn {
            note: 64,
            velocity: 80,
        },
        &mut recorder,
    );
    let commands = recorder.commands.len();

    controller.process_event(NoteEvent::NoteOff { note: 60 }, &mut recorder);

    assert_eq!(recorder.commands.len(), commands);
    assert_eq!(controller.note_stack().size(), 1);
}

#[test]
fn zero_velocity_is_note_off() {
    let mut controller = NoteEventController::new();
    let mut recorder = Recorder::default();

    controller.process_events(
        &[
            NoteEvent::NoteOn {
                note: 50,
                velocity: 100,
            },
            NoteEvent::NoteOn {
                note: 50,
                velocity: 0,
            },
        ],
        &mut recorder,
    );

    assert_eq!(
        recorder.commands,
        vec![Command::Trigger(50, true), Command::Release(50)]
    );
}

#[test]
fn note_off_of_unknown_note_is_ignored() {
    let mut controller = NoteEventController::new();
    let mut recorder = Recorder::default();

    controller.process_event(NoteEvent::NoteOff { note: 70 }, &mut recorder);

    assert!(recorder.commands.is_empty());
}

#[test]
fn all_notes_off_clears_held_notes() {
    let mut controller = NoteEventController::new();
    let mut recorder = Recorder::default();

    controller.process_events(
        &[
            NoteEvent::NoteOn {
                note: 60,
                velocity: 80,
            },
            NoteEvent::NoteOn {
                note: 62,
                velocity: 80,
            },
            NoteEvent::AllNotesOff,
            NoteEvent::NoteOff { note: 62 },
            NoteEvent::NoteOn {
                note: 65,
                velocity: 80,
            },
        ],
        &mut recorder,
    );

    assert_eq!(
        recorder.commands,
        vec![
            Command::Trigger(60, false),
            Command::Slide(62, false),
            Command::AllNotesOff,
            Command::Trigger(65, false),
        ]
    );
}
