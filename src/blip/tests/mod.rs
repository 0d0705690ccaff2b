//! Blip buffer unit tests
//!
//! Organized by facet: rate conversion, delta synthesis, and frame
//! handling/extraction.

use super::*;
use std::panic::{catch_unwind, AssertUnwindSafe};

// ========================================
// Test Constants
// ========================================

/// Clocks per sample before `set_rates` is called
pub(crate) const OVERSAMPLE: u64 = MAX_RATIO;

/// Capacity used by most tests
pub(crate) const BLIP_SIZE: usize = MAX_FRAME / 2;

// ========================================
// Helpers
// ========================================

pub(crate) fn new_buffer(capacity: usize) -> BlipBuffer {
    BlipBuffer::new(capacity).expect("capacity within limits")
}

/// Ends a frame of `samples` samples and reads them all as mono
pub(crate) fn end_frame_and_read(buf: &mut BlipBuffer, samples: usize) -> Vec<i16> {
    buf.end_frame(samples as u64 * OVERSAMPLE);
    let mut out = vec![0i16; samples];
    assert_eq!(buf.read_samples(&mut out, samples, ChannelMode::Mono), samples);
    out
}

/// Runs `f` on a fresh 32-sample buffer and returns its 32 samples
pub(crate) fn render_32(f: impl FnOnce(&mut BlipBuffer)) -> Vec<i16> {
    let mut buf = new_buffer(32);
    f(&mut buf);
    end_frame_and_read(&mut buf, 32)
}

/// Returns true if `f` panics
pub(crate) fn panics(f: impl FnOnce()) -> bool {
    catch_unwind(AssertUnwindSafe(f)).is_err()
}

#[test]
fn test_new_rejects_bad_capacity() {
    assert_eq!(BlipBuffer::new(0).unwrap_err(), BlipError::ZeroCapacity);
    assert_eq!(
        BlipBuffer::new(MAX_FRAME + 1).unwrap_err(),
        BlipError::CapacityTooLarge {
            requested: MAX_FRAME + 1,
            max: MAX_FRAME
        }
    );
}

#[test]
fn test_new_accepts_limits() {
    assert_eq!(new_buffer(1).capacity(), 1);
    assert_eq!(new_buffer(MAX_FRAME).capacity(), MAX_FRAME);

    let buf = new_buffer(BLIP_SIZE);
    assert_eq!(buf.samples_available(), 0);
    assert_eq!(buf.clocks_per_sample(), OVERSAMPLE as f64);
}

#[test]
fn test_error_messages() {
    let err = BlipBuffer::new(5000).unwrap_err();
    assert_eq!(
        err.to_string(),
        "buffer capacity 5000 exceeds maximum of 4000 samples"
    );
}

#[test]
fn test_channel_mode_stride() {
    assert_eq!(ChannelMode::Mono.stride(), 1);
    assert_eq!(ChannelMode::Stereo.stride(), 2);
    assert_eq!(ChannelMode::default(), ChannelMode::Mono);
}

// ========================================
// Test Modules
// ========================================
