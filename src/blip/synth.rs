//! Delta injection through the phase kernels

use super::constants::{
    DELTA_BITS, DELTA_UNIT, END_FRAME_EXTRA, FRAC_BITS, HALF_WIDTH, PHASE_BITS, PHASE_COUNT,
    PRE_SHIFT,
};
use super::kernel::StepTable;
use super::BlipBuffer;

impl BlipBuffer {
    /// Add an amplitude step of `delta` at clock `time` of the current frame
    ///
    /// The step is band-limited by the kernel for its sub-sample phase,
    /// interpolated between the two nearest table phases. Deltas are purely
    /// additive and may be added in any order.
    ///
    /// # Panics
    ///
    /// Panics if `time` lands more than two samples past the buffer's
    /// capacity (the frame is too long for the buffer).
    pub fn add_delta(&mut self, time: u64, delta: i32) {
        let (index, fixed) = self.locate(time);

        let phase_shift = FRAC_BITS - PHASE_BITS;
        let phase = (fixed >> phase_shift) as usize & (PHASE_COUNT - 1);
        let interp = (fixed >> (phase_shift - DELTA_BITS)) as i64 & (DELTA_UNIT - 1);
        let (delta1, delta2) = StepTable::split(delta as i64, interp);

        let cells = &mut self.accumulator[index..index + 2 * HALF_WIDTH];
        self.kernel.add_interpolated(cells, phase, delta1, delta2);
        self.modified = true;
    }

    /// Same as [`add_delta`](Self::add_delta) but with a two-sample step
    /// instead of the full kernel: cheaper, not band-limited.
    ///
    /// # Panics
    ///
    /// Same conditions as [`add_delta`](Self::add_delta).
    pub fn add_delta_fast(&mut self, time: u64, delta: i32) {
        let (index, fixed) = self.locate(time);

        let interp = (fixed >> (FRAC_BITS - DELTA_BITS)) as i64 & (DELTA_UNIT - 1);

        let cells = &mut self.accumulator[index..index + 2 * HALF_WIDTH];
        self.kernel.add_nearest(cells, interp, delta as i64);
        self.modified = true;
    }

    /// Accumulator index and fixed-point position of clock `time`
    fn locate(&self, time: u64) -> (usize, u64) {
        let fixed = (time as u128 * self.factor as u128 + self.offset as u128) >> PRE_SHIFT;
        let index = self.available as u128 + (fixed >> FRAC_BITS);
        assert!(
            index <= (self.capacity + END_FRAME_EXTRA) as u128,
            "delta at clock {time} is past the end of the buffer"
        );

        // Only the low bits are needed past this point
        (index as usize, fixed as u64)
    }
}
