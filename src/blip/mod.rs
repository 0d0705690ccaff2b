// Blip module - Band-limited delta buffer
//
// A sound chip emulator reports every change of its output level as a
// timestamped delta, measured in chip clocks. This module turns that sparse
// stream into 16-bit PCM at an independent output sample rate:
//
// - Fixed-point clock-to-sample conversion that does not drift over hours
// - Each delta is spread over 16 output samples by a band-limited kernel
//   chosen (and interpolated) for its sub-sample phase
// - The accumulator stores differences; reading integrates them once,
//   saturates to i16 and removes DC with a gentle high-pass
//
// # Usage
//
// ```
// use blip_rs::blip::{BlipBuffer, ChannelMode};
//
// let mut buf = BlipBuffer::new(4000).unwrap();
// buf.set_rates(1_789_773.0, 44_100.0);
//
// // In the emulator loop, one call per output level change:
// buf.add_delta(100, 4000);
// buf.add_delta(2000, -4000);
//
// // At the end of each emulated frame:
// let clocks = 29_830;
// buf.end_frame(clocks);
//
// let mut out = [0i16; 1024];
// let count = buf.read_samples(&mut out, 1024, ChannelMode::Mono);
// assert_eq!(count, 735);
// ```

pub mod constants;
pub mod error;
pub mod kernel;

mod frame;
mod rate;
mod synth;

#[cfg(test)]
mod tests;

pub use constants::{MAX_FRAME, MAX_RATIO};
pub use error::BlipError;
pub use kernel::{StepTable, STEP_TABLE};

use constants::{BUF_EXTRA, TIME_UNIT};
use tracing::debug;

/// Output layout for [`BlipBuffer::read_samples`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelMode {
    /// Samples are written to consecutive slots
    #[default]
    Mono,

    /// Samples are written to every other slot, leaving the others untouched.
    ///
    /// Pass `&mut out[1..]` to fill the right channel of an interleaved buffer.
    Stereo,
}

impl ChannelMode {
    /// Distance between consecutive samples in the destination
    pub fn stride(self) -> usize {
        match self {
            ChannelMode::Mono => 1,
            ChannelMode::Stereo => 2,
        }
    }
}

/// Band-limited delta buffer
///
/// Owns a fixed accumulator sized at construction; nothing is allocated
/// afterwards. Times passed to [`add_delta`](Self::add_delta) and
/// [`end_frame`](Self::end_frame) are clocks since the start of the current
/// frame.
///
/// Misuse that would write past the accumulator (a delta or frame beyond the
/// buffer's horizon, asking for more samples than fit) panics before any
/// state is changed.
#[derive(Debug, Clone)]
pub struct BlipBuffer {
    /// Fixed-point samples per clock, in `TIME_UNIT`s
    factor: u64,

    /// Fractional sample time carried into the next frame
    offset: u64,

    /// Finished samples ready to be read
    available: usize,

    /// Maximum number of finished samples
    capacity: usize,

    /// Running sum carried between reads
    integrator: i64,

    /// A delta has been added since the last clear
    modified: bool,

    /// Per-sample differences, `capacity + BUF_EXTRA` cells
    accumulator: Vec<i64>,

    /// Shared phase kernels
    kernel: &'static StepTable,
}

impl BlipBuffer {
    /// Create a buffer that holds up to `capacity` finished samples
    ///
    /// The initial rate is one sample per [`MAX_RATIO`] clocks; call
    /// [`set_rates`](Self::set_rates) to choose real rates.
    ///
    /// # Errors
    ///
    /// Returns an error if `capacity` is zero or above [`MAX_FRAME`].
    pub fn new(capacity: usize) -> Result<Self, BlipError> {
        BlipError::check_capacity(capacity)?;

        debug!(capacity, "created blip buffer");

        Ok(Self {
            factor: TIME_UNIT / MAX_RATIO,
            offset: 0,
            available: 0,
            capacity,
            integrator: 0,
            modified: false,
            accumulator: vec![0; capacity + BUF_EXTRA],
            kernel: &STEP_TABLE,
        })
    }

    /// Maximum number of finished samples the buffer can hold
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of finished samples ready to be read
    pub fn samples_available(&self) -> usize {
        self.available
    }
}
