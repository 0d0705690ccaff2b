// Common test utilities for blip buffer integration tests

#![allow(dead_code)]

use blip_rs::blip::constants::END_FRAME_EXTRA;
use blip_rs::blip::{BlipBuffer, ChannelMode, MAX_RATIO};

/// Clocks per sample before `set_rates` is called
pub const OVERSAMPLE: u64 = MAX_RATIO;

/// A frame that ends a quarter of the way into a sample
pub const FRAME_LEN: u64 = 20 * OVERSAMPLE + OVERSAMPLE / 4;

pub fn new_buffer(capacity: usize) -> BlipBuffer {
    BlipBuffer::new(capacity).expect("capacity within limits")
}

/// Vector of `len` copies of `value`, so untouched slots are visible
pub fn filled(len: usize, value: i16) -> Vec<i16> {
    vec![value; len]
}

/// Adds one delta mid-frame and one as late past the frame end as allowed
pub fn add_frame_deltas(buf: &mut BlipBuffer, offset: u64) {
    buf.add_delta(FRAME_LEN / 2 + offset, 1000);
    buf.add_delta(
        FRAME_LEN + offset + END_FRAME_EXTRA as u64 * OVERSAMPLE,
        1000,
    );
}

/// Reads everything available into `out[count..]`, returning the new count
pub fn drain_into(buf: &mut BlipBuffer, out: &mut [i16], count: usize) -> usize {
    let remaining = out.len() - count;
    count + buf.read_samples(&mut out[count..], remaining, ChannelMode::Mono)
}
