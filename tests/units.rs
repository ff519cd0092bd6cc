//! Tests for the unit conversions

use acid_bass_dsp::utils::units::*;

#[test]
fn pitch_ratios() {
    assert_eq!(semitones_to_ratio(0.0), 1.0);
    assert!((semitones_to_ratio(12.0) - 2.0).abs() < 1.0e-5);
    assert!((semitones_to_ratio(-24.0) - 0.25).abs() < 1.0e-6);
    assert!((semitones_to_ratio(7.0) - 1.498_307).abs() < 1.0e-4);
    assert!((octaves_to_ratio(1.5) - 2.828_427).abs() < 1.0e-3);
}

#[test]
fn note_frequencies() {
    assert!((pitch_to_frequency(69.0, 440.0) - 440.0).abs() < 1.0e-3);
    assert!((pitch_to_frequency(45.0, 440.0) - 110.0).abs() < 1.0e-3);
    assert!((pitch_to_frequency(60.0, 440.0) - 261.625_6).abs() < 0.05);
    assert!((pitch_to_frequency(69.0, 432.0) - 432.0).abs() < 1.0e-3);
}

#[test]
fn decibels() {
    assert_eq!(db_to_amp(0.0), 1.0);
    assert!((db_to_amp(-20.0) - 0.1).abs() < 1.0e-6);
    assert!((amp_to_db(0.5) + 6.020_6).abs() < 1.0e-3);
    assert!(amp_to_db(0.0).is_finite());
    assert!(amp_to_db(0.0) < -120.0);
}

#[test]
fn range_mappers() {
    assert_eq!(lin_to_lin(0.5, 0.0, 1.0, -60.0, 0.0), -30.0);
    assert_eq!(lin_to_lin(-8192.0, -8192.0, 8192.0, -12.0, 12.0), -12.0);

    assert!((lin_to_exp(0.5, 0.0, 1.0, 200.0, 2000.0) - 632.455_5).abs() < 0.01);
    assert!((exp_to_lin(632.455_5, 200.0, 2000.0, 0.0, 1.0) - 0.5).abs() < 1.0e-5);
    assert!(exp_to_lin(2000.0, 200.0, 2000.0, 0.0, 1.0) > 0.999_99);
}
