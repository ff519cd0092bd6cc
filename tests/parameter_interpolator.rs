//! Tests for the parameter interpolator.

use acid_bass_dsp::utils::parameter_interpolator::ParameterInterpolator;

#[test]
fn ramps_linearly_to_target() {
    let mut state = 0.0;
    let mut values = Vec::new();

    {
        let mut interpolator = ParameterInterpolator::new(&mut state, 1.0, 4);
        for _ in 0..4 {
            values.push(interpolator.next());
        }
    }

    assert_eq!(values, vec![0.25, 0.5, 0.75, 1.0]);
    assert_eq!(state, 1.0);
}

#[test]
fn first_value_is_strictly_between_previous_and_target() {
    let mut state = 100.0;
    let mut interpolator = ParameterInterpolator::new(&mut state, 200.0, 32);

    let first = interpolator.next();
    assert!(first > 100.0 && first < 200.0);
}

#[test]
fn monotonic_when_rising() {
    let mut state = 200.0;
    let size = 64;
    let mut interpolator = ParameterInterpolator::new(&mut state, 2000.0, size);

    let mut previous = 200.0;
    for _ in 0..size {
        let value = interpolator.next();
        assert!(value > previous);
        previous = value;
    }
    assert_eq!(previous, 2000.0);
}

#[test]
fn falling_ramp_ends_exactly_on_target() {
    let mut state = 0.3;
    let size = 48;

    {
        let mut interpolator = ParameterInterpolator::new(&mut state, -0.7, size);
        let mut previous = 0.3;
        for _ in 0..size {
            let value = interpolator.next();
            assert!(value < previous);
            previous = value;
        }
        assert_eq!(interpolator.remaining(), 0);
    }

    assert_eq!(state, -0.7);
}

#[test]
fn target_holds_after_block_end() {
    let mut state = 0.0;
    let mut interpolator = ParameterInterpolator::new(&mut state, 1.0, 2);

    interpolator.next();
    interpolator.next();
    assert_eq!(interpolator.next(), 1.0);
    assert_eq!(interpolator.next(), 1.0);
}

#[test]
fn partial_block_commits_last_consumed_value() {
    let mut state = 0.0;

    {
        let mut interpolator = ParameterInterpolator::new(&mut state, 1.0, 4);
        interpolator.next();
        interpolator.next();
        assert_eq!(interpolator.remaining(), 2);
    }

    assert_eq!(state, 0.5);
}

#[test]
fn consecutive_blocks_continue_from_committed_value() {
    let mut state = 0.0;

    {
        let mut interpolator = ParameterInterpolator::new(&mut state, 1.0, 2);
        interpolator.next();
        interpolator.next();
    }

    let mut interpolator = ParameterInterpolator::new(&mut state, 3.0, 2);
    assert_eq!(interpolator.next(), 2.0);
    assert_eq!(interpolator.next(), 3.0);
}

#[test]
fn empty_block_keeps_state() {
    let mut state = 0.5;

    {
        let mut interpolator = ParameterInterpolator::new(&mut state, 1.0, 0);
        assert_eq!(interpolator.next(), 0.5);
    }

    assert_eq!(state, 0.5);
}
