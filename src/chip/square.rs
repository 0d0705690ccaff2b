//! Free-running square wave oscillators

use crate::blip::BlipBuffer;

/// Square wave with float frequency and volume
///
/// Frequency and volume may change between calls to [`run`](Self::run);
/// the new values take effect from the next half cycle.
#[derive(Debug, Clone)]
pub struct SquareWave {
    /// Cycles per second
    pub frequency: f64,
    /// 0.0 to 1.0
    pub volume: f64,
    /// +1 or -1
    phase: i32,
    /// Clock time of next delta
    time: u64,
    /// Current amplitude in the buffer
    amp: i32,
}

impl SquareWave {
    pub fn new(frequency: f64, volume: f64) -> Self {
        Self {
            frequency,
            volume,
            phase: 1,
            time: 0,
            amp: 0,
        }
    }

    /// Amplitude currently held in the buffer
    pub fn amplitude(&self) -> i32 {
        self.amp
    }

    /// Add the deltas for a frame of `clocks` clocks at `clock_rate`
    pub fn run(&mut self, buf: &mut BlipBuffer, clock_rate: f64, clocks: u64) {
        // Clocks per half cycle
        let period = ((clock_rate / self.frequency / 2.0 + 0.5) as u64).max(1);

        // Bipolar, so half the 16-bit range
        let volume = (self.volume.clamp(0.0, 1.0) * 65536.0 / 2.0 + 0.5) as i32;

        while self.time < clocks {
            let delta = self.phase * volume - self.amp;
            self.amp += delta;
            buf.add_delta(self.time, delta);
            self.phase = -self.phase;
            self.time += period;
        }

        self.time -= clocks;
    }
}

/// Square wave with an integer period that grows every frame
///
/// Each call to [`advance`](Self::advance) raises the volume and lengthens
/// the period, giving a falling sweep.
#[derive(Debug, Clone)]
pub struct SweepSquare {
    /// Clocks between deltas
    period: u64,
    volume: i32,
    phase: i32,
    time: u64,
    amp: i32,
}

impl Default for SweepSquare {
    fn default() -> Self {
        Self::new()
    }
}

impl SweepSquare {
    pub fn new() -> Self {
        Self {
            period: 1,
            volume: 0,
            phase: 1,
            time: 0,
            amp: 0,
        }
    }

    pub fn period(&self) -> u64 {
        self.period
    }

    pub fn volume(&self) -> i32 {
        self.volume
    }

    pub fn amplitude(&self) -> i32 {
        self.amp
    }

    /// Add the deltas that fall before `clocks` and rebase on the next frame
    pub fn run(&mut self, buf: &mut BlipBuffer, clocks: u64) {
        while self.time < clocks {
            let delta = self.phase * self.volume - self.amp;
            self.amp += delta;
            buf.add_delta(self.time, delta);
            self.phase = -self.phase;
            self.time += self.period;
        }
        self.time -= clocks;
    }

    /// Step the sweep once
    pub fn advance(&mut self) {
        self.volume = (self.volume + 100).min(i16::MAX as i32);
        self.period += self.period / 28 + 3;
    }
}
