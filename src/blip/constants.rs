//! Fixed-point layout and capacity limits of the delta buffer

/// Maximum clock_rate / sample_rate ratio.
///
/// A freshly created buffer behaves as if `set_rates` had been called with
/// exactly this ratio, so one output sample spans `MAX_RATIO` clocks.
pub const MAX_RATIO: u64 = 1 << 20;

/// Maximum buffer capacity, in output samples
pub const MAX_FRAME: usize = 4000;

/// Bits dropped from sample time before phase extraction
pub(crate) const PRE_SHIFT: u32 = 32;

/// Fractional bits of fixed-point sample time
pub(crate) const TIME_BITS: u32 = PRE_SHIFT + 20;

/// One output sample in fixed-point time
pub(crate) const TIME_UNIT: u64 = 1 << TIME_BITS;

/// Sample-index bits remaining after `PRE_SHIFT` is applied
pub(crate) const FRAC_BITS: u32 = TIME_BITS - PRE_SHIFT;

pub(crate) const PHASE_BITS: u32 = 5;

/// Number of kernel phases per output sample
pub(crate) const PHASE_COUNT: usize = 1 << PHASE_BITS;

/// Half of the kernel width, in samples
pub(crate) const HALF_WIDTH: usize = 8;

/// Samples past the end of a frame that a delta may still land on
pub const END_FRAME_EXTRA: usize = 2;

/// Accumulator cells kept beyond `capacity` for kernel tails
pub(crate) const BUF_EXTRA: usize = HALF_WIDTH * 2 + END_FRAME_EXTRA;

/// Fractional bits of each accumulator cell
pub(crate) const DELTA_BITS: u32 = 15;

pub(crate) const DELTA_UNIT: i64 = 1 << DELTA_BITS;

/// DC-blocking high-pass strength applied while reading
pub(crate) const BASS_SHIFT: u32 = 9;
