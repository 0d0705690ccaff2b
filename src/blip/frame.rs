//! Frame boundaries and sample extraction

use tracing::trace;

use super::constants::{BASS_SHIFT, BUF_EXTRA, DELTA_BITS, TIME_BITS, TIME_UNIT};
use super::{BlipBuffer, ChannelMode};

impl BlipBuffer {
    /// End the current frame at clock `time`
    ///
    /// Samples before `time` become available for reading and the fractional
    /// remainder is carried over, so the next frame's clocks start at `time`.
    /// Splitting a frame into several shorter ones gives identical output.
    ///
    /// # Panics
    ///
    /// Panics if the frame would make more samples available than the
    /// buffer's capacity.
    pub fn end_frame(&mut self, time: u64) {
        let off = time as u128 * self.factor as u128 + self.offset as u128;
        let available = self.available as u128 + (off >> TIME_BITS);
        assert!(
            available <= self.capacity as u128,
            "frame of {time} clocks overflows buffer ({} of {} samples used)",
            self.available,
            self.capacity
        );

        self.available = available as usize;
        self.offset = off as u64 & (TIME_UNIT - 1);
    }

    /// Read up to `max_samples` finished samples into `dest`
    ///
    /// Returns the number of samples read, at most
    /// [`samples_available`](Self::samples_available). Unread samples stay
    /// in the buffer for the next call. In [`ChannelMode::Stereo`] samples go
    /// to every other slot of `dest`.
    ///
    /// # Panics
    ///
    /// Panics if `dest` is too short for the samples being read.
    pub fn read_samples(
        &mut self,
        dest: &mut [i16],
        max_samples: usize,
        mode: ChannelMode,
    ) -> usize {
        let count = max_samples.min(self.available);
        if count == 0 {
            return 0;
        }

        let stride = mode.stride();
        assert!(
            dest.len() > (count - 1) * stride,
            "destination of {} slots cannot hold {count} samples at stride {stride}",
            dest.len()
        );

        let mut sum = self.integrator;
        for (out, &cell) in dest
            .iter_mut()
            .step_by(stride)
            .zip(&self.accumulator[..count])
        {
            let sample = (sum >> DELTA_BITS).clamp(i16::MIN as i64, i16::MAX as i64);
            sum += cell;
            *out = sample as i16;

            // High-pass filter
            sum -= sample << (DELTA_BITS - BASS_SHIFT);
        }
        self.integrator = sum;

        self.remove_samples(count);
        count
    }

    /// Discard all samples and return to the just-created state
    ///
    /// Also removes kernel tails of deltas added near the end of the last
    /// frame. The rates are kept.
    pub fn clear(&mut self) {
        self.offset = 0;
        self.available = 0;
        self.integrator = 0;

        if self.modified {
            self.accumulator.fill(0);
            self.modified = false;
        }
        trace!("blip buffer cleared");
    }

    /// Shift unread cells (and pending tails) down to the buffer start
    fn remove_samples(&mut self, count: usize) {
        let remain = self.available + BUF_EXTRA - count;
        self.available -= count;

        self.accumulator.copy_within(count..count + remain, 0);
        self.accumulator[remain..remain + count].fill(0);
    }
}
