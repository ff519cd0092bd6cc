//! Tests for the envelopes

mod wav_writer;

use acid_bass_dsp::envelope::analog_envelope::{AnalogEnvelope, EnvelopeStage};
use acid_bass_dsp::envelope::decay_envelope::DecayEnvelope;
use acid_bass_dsp::envelope::leaky_integrator::{normalizer, LeakyIntegrator};

const SAMPLE_RATE: f32 = 44100.0;

fn ms_to_samples(ms: f32) -> usize {
    (0.001 * ms * SAMPLE_RATE) as usize
}

#[test]
fn decay_envelope_starts_at_one() {
    let mut envelope = DecayEnvelope::new(200.0, SAMPLE_RATE);
    envelope.trigger();

    let first = envelope.process();
    assert!((first - 1.0).abs() < 1.0e-6);

    let mut previous = first;
    for _ in 0..ms_to_samples(200.0) {
        let value = envelope.process();
        assert!(value < previous);
        previous = value;
    }
    // One time constant later
    assert!((previous - (-1.0_f32).exp()).abs() < 1.0e-2, "{previous}");
}

#[test]
fn decay_envelope_retrigger() {
    let mut envelope = DecayEnvelope::new(50.0, SAMPLE_RATE);
    envelope.trigger();
    for _ in 0..1000 {
        envelope.process();
    }

    envelope.set_decay(1000.0);
    assert_eq!(envelope.decay(), 1000.0);
    envelope.trigger();
    assert!((envelope.process() - 1.0).abs() < 1.0e-6);

    envelope.reset();
    assert_eq!(envelope.process(), 0.0);
}

#[test]
fn decay_envelope_zero_time_is_single_pulse() {
    let mut envelope = DecayEnvelope::new(0.0, SAMPLE_RATE);
    envelope.trigger();

    assert_eq!(envelope.process(), 1.0);
    assert_eq!(envelope.process(), 0.0);
}

#[test]
fn decay_envelope_extremely_short_time() {
    // Coefficient would be subnormal, falls back to a single pulse.
    let mut envelope = DecayEnvelope::new(2.4e-4, SAMPLE_RATE);
    envelope.trigger();
    assert_eq!(envelope.process(), 1.0);
    assert_eq!(envelope.process(), 0.0);

    for decay in [2.2e-4, 2.6e-4, 3.0e-4, 1.0e-3] {
        envelope.set_decay(decay);
        envelope.trigger();
        let first = envelope.process();
        assert!((first - 1.0).abs() < 1.0e-6, "{decay}: {first}");
        for _ in 0..16 {
            let value = envelope.process();
            assert!(value.is_finite() && (0.0..1.0).contains(&value), "{decay}: {value}");
        }
    }
}

#[test]
fn leaky_integrator_step_response() {
    let mut integrator = LeakyIntegrator::new(10.0, SAMPLE_RATE);
    let mut out = 0.0;
    for _ in 0..ms_to_samples(10.0) {
        out = integrator.process(1.0);
    }
    assert!((out - (1.0 - (-1.0_f32).exp())).abs() < 1.0e-2, "{out}");

    integrator.set_state(0.25);
    assert_eq!(integrator.state(), 0.25);

    integrator.set_time_constant(0.0);
    assert_eq!(integrator.process(0.75), 0.75);
}

#[test]
fn normalizer_scales_peak_to_unity() {
    for (decay, attack) in [(1000.0, 10.0), (200.0, 3.0), (200.0, 50.0), (30.0, 30.0)] {
        let mut envelope = DecayEnvelope::new(decay, SAMPLE_RATE);
        let mut integrator = LeakyIntegrator::new(attack, SAMPLE_RATE);
        let n = normalizer(decay, attack, SAMPLE_RATE);

        envelope.trigger();
        let mut peak: f32 = 0.0;
        for _ in 0..SAMPLE_RATE as usize {
            peak = peak.max(n * integrator.process(envelope.process()));
        }

        assert!((peak - 1.0).abs() < 1.0e-2, "{decay} {attack}: {peak}");
    }
}

#[test]
fn normalizer_without_time_constant() {
    assert_eq!(normalizer(0.0, 10.0, SAMPLE_RATE), 1.0);
    assert_eq!(normalizer(200.0, 0.0, SAMPLE_RATE), 1.0);
}

#[test]
fn analog_envelope_stages() {
    let mut envelope = AnalogEnvelope::new(SAMPLE_RATE);
    envelope.set_attack(0.0);
    envelope.set_decay(100.0);
    envelope.set_sustain(0.5);
    envelope.set_release(10.0);

    assert_eq!(envelope.process(), 0.0);
    assert!(!envelope.is_note_on());

    envelope.note_on();
    assert_eq!(envelope.process(), 1.0);
    assert_eq!(envelope.stage(), EnvelopeStage::Decay);

    let mut value = 1.0;
    for _ in 0..ms_to_samples(1000.0) {
        value = envelope.process();
    }
    assert!((value - 0.5).abs() < 1.0e-3, "{value}");

    envelope.note_off();
    assert!(!envelope.is_note_on());
    for _ in 0..ms_to_samples(200.0) {
        value = envelope.process();
    }
    assert!(value < 1.0e-6, "{value}");
}

#[test]
fn analog_envelope_attack_is_limited() {
    let mut envelope = AnalogEnvelope::new(SAMPLE_RATE);
    envelope.set_attack(10.0);
    envelope.set_decay(500.0);
    envelope.note_on();

    let mut wav_data = Vec::new();
    let mut peak_time = 0;
    for n in 0..ms_to_samples(100.0) {
        let value = envelope.process();
        assert!(value <= 1.0);
        if value == 1.0 && peak_time == 0 {
            peak_time = n;
        }
        wav_data.push(value);
    }

    // Charging towards 1.5 crosses 1 after ln(3) time constants.
    let expected = 3.0_f32.ln() * ms_to_samples(10.0) as f32;
    assert!((peak_time as f32 - expected).abs() < 3.0, "{peak_time}");

    wav_writer::write("envelope/analog_attack.wav", &wav_data, SAMPLE_RATE).ok();
}

#[test]
fn analog_envelope_retriggers_from_current_level() {
    let mut envelope = AnalogEnvelope::new(SAMPLE_RATE);
    envelope.set_attack(5.0);
    envelope.set_release(100.0);
    envelope.note_on();
    for _ in 0..ms_to_samples(50.0) {
        envelope.process();
    }
    envelope.note_off();
    for _ in 0..ms_to_samples(20.0) {
        envelope.process();
    }

    let level = envelope.value();
    assert!(level > 0.1);

    envelope.note_on();
    assert!(envelope.process() > level);

    envelope.reset();
    assert_eq!(envelope.value(), 0.0);
    assert_eq!(envelope.stage(), EnvelopeStage::Release);
}
