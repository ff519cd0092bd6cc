//! Conversions between musical/physical units and raw factors.
//!
//! Pitch ratios are looked up in two tables (whole semitones and 1/256 semitone steps) that are
//! built once on first use.

#[allow(unused_imports)]
use num_traits::float::Float;
use spin::Once;

const PITCH_TABLE_SIZE: usize = 257;

struct PitchRatioTables {
    high: [f32; PITCH_TABLE_SIZE],
    low: [f32; PITCH_TABLE_SIZE],
}

static PITCH_RATIO_TABLES: Once<PitchRatioTables> = Once::new();

fn pitch_ratio_tables() -> &'static PitchRatioTables {
    PITCH_RATIO_TABLES.call_once(|| {
        let mut high = [0.0; PITCH_TABLE_SIZE];
        let mut low = [0.0; PITCH_TABLE_SIZE];
        for (i, (h, l)) in high.iter_mut().zip(low.iter_mut()).enumerate() {
            let i = i as f64;
            *h = 2.0_f64.powf((i - 128.0) / 12.0) as f32;
            *l = 2.0_f64.powf(i / 256.0 / 12.0) as f32;
        }
        PitchRatioTables { high, low }
    })
}

/// Frequency ratio of an interval in semitones. The interval is limited to ±128 semitones.
#[inline]
pub fn semitones_to_ratio(semitones: f32) -> f32 {
    let tables = pitch_ratio_tables();
    let pitch = semitones.clamp(-128.0, 127.996) + 128.0;
    let pitch_integral = pitch as usize;
    let pitch_fractional = pitch - pitch_integral as f32;

    tables.high[pitch_integral] * tables.low[(pitch_fractional * 256.0) as usize]
}

/// Frequency ratio of an interval in octaves.
#[inline]
pub fn octaves_to_ratio(octaves: f32) -> f32 {
    semitones_to_ratio(12.0 * octaves)
}

/// Equal-tempered frequency of a MIDI note for the given tuning of A4.
#[inline]
pub fn pitch_to_frequency(note: f32, tuning: f32) -> f32 {
    tuning * semitones_to_ratio(note - 69.0)
}

#[inline]
pub fn db_to_amp(db: f32) -> f32 {
    10.0_f32.powf(0.05 * db)
}

#[inline]
pub fn amp_to_db(amp: f32) -> f32 {
    20.0 * amp.max(1.0e-12).log10()
}

/// Maps `value` linearly from `in_min..in_max` to `out_min..out_max`.
#[inline]
pub fn lin_to_lin(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let t = (value - in_min) / (in_max - in_min);
    out_min + t * (out_max - out_min)
}

/// Maps an exponentially distributed `value` (such as a frequency) onto a linear range.
#[inline]
pub fn exp_to_lin(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let t = (value / in_min).ln() / (in_max / in_min).ln();
    out_min + t * (out_max - out_min)
}

/// Maps a linear `value` onto an exponential range, e.g. a 0..1 knob onto a frequency.
#[inline]
pub fn lin_to_exp(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let t = (value - in_min) / (in_max - in_min);
    out_min * (out_max / out_min).powf(t)
}
