//! Chip voice and log tests

use super::*;
use crate::blip::BlipBuffer;

mod square_tests;

/// Buffer at the default rate, roomy enough for a few thousand clocks
pub(crate) fn new_buffer() -> BlipBuffer {
    BlipBuffer::new(64).expect("capacity within limits")
}

#[test]
fn test_chip_voices() {
    let chip = Chip::new();

    let waveforms: Vec<Waveform> = (0..CHANNEL_COUNT)
        .map(|i| chip.channel(i).waveform())
        .collect();
    assert_eq!(
        waveforms,
        [
            Waveform::Square,
            Waveform::Square,
            Waveform::Triangle,
            Waveform::Noise
        ]
    );

    for i in 0..CHANNEL_COUNT {
        assert_eq!(chip.channel(i).register(Register::Period), 10);
        assert_eq!(chip.channel(i).register(Register::Volume), 0);
        assert_eq!(chip.channel(i).amplitude(), 0);
    }
}

#[test]
fn test_chip_gains() {
    let mut chip = Chip::new();
    let mut buf = new_buffer();

    // Triangle: volume 1, then 3 steps
    chip.write(&mut buf, 0, 2, Register::Volume, 1);
    // Square: full duty
    chip.write(&mut buf, 0, 0, Register::Volume, 1);
    chip.end_frame(&mut buf, 25);

    assert_eq!(chip.channel(0).amplitude(), 1135);
    assert_eq!(chip.channel(1).amplitude(), 0);
    assert_eq!(chip.channel(2).amplitude(), 3 * 1310);
}

#[test]
fn test_chip_apply_events() {
    let mut chip = Chip::new();
    let mut buf = BlipBuffer::new(1000).unwrap();
    buf.set_rates(1_789_772.727, 44_100.0);

    let events = [
        ChipEvent::Write {
            time: 0,
            channel: 0,
            register: Register::Period,
            value: 2000,
        },
        ChipEvent::Write {
            time: 0,
            channel: 0,
            register: Register::Volume,
            value: 12,
        },
        ChipEvent::EndFrame { time: 29_830 },
    ];
    for event in events {
        chip.apply(&mut buf, event);
    }

    assert_eq!(buf.samples_available(), 735);
    assert_eq!(chip.channel(0).amplitude(), 12 * 1135);
    assert_eq!(chip.channel(0).register(Register::Period), 2000);
}
