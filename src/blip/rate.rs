//! Clock-to-sample rate conversion

use tracing::debug;

use super::constants::{MAX_RATIO, TIME_BITS, TIME_UNIT};
use super::BlipBuffer;

impl BlipBuffer {
    /// Set the input clock rate and output sample rate
    ///
    /// Samples already in the buffer are kept; only times passed to later
    /// calls are affected.
    ///
    /// # Panics
    ///
    /// Panics if either rate is not positive, or if
    /// `clock_rate / sample_rate` exceeds [`MAX_RATIO`].
    pub fn set_rates(&mut self, clock_rate: f64, sample_rate: f64) {
        assert!(
            clock_rate > 0.0 && sample_rate > 0.0,
            "rates must be positive (clock {clock_rate}, sample {sample_rate})"
        );
        assert!(
            clock_rate / sample_rate <= MAX_RATIO as f64,
            "clock_rate/sample_rate exceeds MAX_RATIO"
        );
        assert!(
            sample_rate / clock_rate < (1u64 << (64 - TIME_BITS)) as f64,
            "sample_rate is too high for clock_rate"
        );

        self.factor = factor_for(clock_rate, sample_rate);
        debug!(
            clock_rate,
            sample_rate,
            factor = self.factor,
            "blip buffer rates changed"
        );
    }

    /// Number of clocks needed to make `samples` more samples available
    ///
    /// Counted from the start of the current frame; ending the frame at
    /// exactly this many clocks yields exactly `samples` new samples, one
    /// clock fewer yields `samples - 1`.
    ///
    /// # Panics
    ///
    /// Panics if the buffer cannot hold that many more samples.
    pub fn clocks_needed(&self, samples: usize) -> u64 {
        assert!(
            samples <= self.capacity - self.available,
            "{samples} more samples do not fit ({} of {} available)",
            self.available,
            self.capacity
        );

        let needed = samples as u64 * TIME_UNIT;
        if needed < self.offset {
            return 0;
        }

        (needed - self.offset).div_ceil(self.factor)
    }

    /// Average number of clocks per output sample at the current rates
    pub fn clocks_per_sample(&self) -> f64 {
        TIME_UNIT as f64 / self.factor as f64
    }
}

/// Fixed-point samples-per-clock factor for the given rates.
///
/// Rounded up, so a sample never takes more clocks than the exact ratio.
/// Whole-number rates are divided exactly in integers.
fn factor_for(clock_rate: f64, sample_rate: f64) -> u64 {
    let whole = |rate: f64| rate.fract() == 0.0 && rate < u64::MAX as f64;
    if whole(clock_rate) && whole(sample_rate) {
        let scaled = TIME_UNIT as u128 * sample_rate as u128;
        return scaled.div_ceil(clock_rate as u128) as u64;
    }

    let exact = TIME_UNIT as f64 * sample_rate / clock_rate;
    let factor = exact as u64;
    if (factor as f64) < exact {
        factor + 1
    } else {
        factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_for_integer_ratios() {
        assert_eq!(factor_for(1.0, 1.0), TIME_UNIT);
        assert_eq!(factor_for(2.0, 4.0), TIME_UNIT * 2);
        assert_eq!(factor_for(MAX_RATIO as f64, 1.0), TIME_UNIT / MAX_RATIO);
    }

    #[test]
    fn test_factor_for_whole_rates_is_exact() {
        let scaled = TIME_UNIT as u128 * 44_100;
        let factor = factor_for(1_789_773.0, 44_100.0) as u128;
        assert!(factor * 1_789_773 >= scaled);
        assert!((factor - 1) * 1_789_773 < scaled);

        assert_eq!(factor_for(3.0, 2.0), (2 * TIME_UNIT).div_ceil(3));
    }

    #[test]
    fn test_factor_for_rounds_up() {
        let exact = TIME_UNIT as f64 * 44_100.0 / 1_789_773.0;
        let factor = factor_for(1_789_773.0, 44_100.0);
        assert!(factor as f64 >= exact);
        assert!(((factor - 1) as f64) < exact);
    }
}
