//! Free-running square wave tests

use super::new_buffer;
use crate::chip::{SquareWave, SweepSquare};

/// Clock rate giving a 5-clock half period at 100 Hz
const CLOCK_RATE: f64 = 1000.0;

#[test]
fn test_square_wave_alternates() {
    let mut buf = new_buffer();
    let mut wave = SquareWave::new(100.0, 0.5);

    // Deltas at 0, 5, 10
    wave.run(&mut buf, CLOCK_RATE, 12);
    assert_eq!(wave.amplitude(), 16384);

    // Next half cycle was at 15, which is 3 in the new frame
    wave.run(&mut buf, CLOCK_RATE, 3);
    assert_eq!(wave.amplitude(), 16384);

    wave.run(&mut buf, CLOCK_RATE, 4);
    assert_eq!(wave.amplitude(), -16384);
}

#[test]
fn test_square_wave_volume_change() {
    let mut buf = new_buffer();
    let mut wave = SquareWave::new(100.0, 1.0);

    wave.run(&mut buf, CLOCK_RATE, 1);
    assert_eq!(wave.amplitude(), 32768);

    wave.volume = 0.25;
    wave.run(&mut buf, CLOCK_RATE, 5);
    assert_eq!(wave.amplitude(), -8192);
}

#[test]
fn test_square_wave_volume_is_clamped() {
    let mut buf = new_buffer();
    let mut wave = SquareWave::new(100.0, -0.3);

    wave.run(&mut buf, CLOCK_RATE, 20);
    assert_eq!(wave.amplitude(), 0);
}

#[test]
fn test_square_wave_period_at_least_one_clock() {
    let mut buf = new_buffer();
    let mut wave = SquareWave::new(1.0e9, 1.0);

    wave.run(&mut buf, CLOCK_RATE, 4);
    assert_eq!(wave.amplitude(), -32768);
}

#[test]
fn test_sweep_square_advance() {
    let mut sweep = SweepSquare::new();
    assert_eq!(sweep.period(), 1);
    assert_eq!(sweep.volume(), 0);

    sweep.advance();
    assert_eq!(sweep.period(), 4);
    assert_eq!(sweep.volume(), 100);

    sweep.advance();
    assert_eq!(sweep.period(), 7);
    assert_eq!(sweep.volume(), 200);
}

#[test]
fn test_sweep_square_run() {
    let mut buf = new_buffer();
    let mut sweep = SweepSquare::new();
    sweep.advance();

    // Deltas at 0, 4, 8
    sweep.run(&mut buf, 10);
    assert_eq!(sweep.amplitude(), 100);

    // Next at 12, which is 2 in the new frame
    sweep.run(&mut buf, 2);
    assert_eq!(sweep.amplitude(), 100);
    sweep.run(&mut buf, 3);
    assert_eq!(sweep.amplitude(), -100);
}
