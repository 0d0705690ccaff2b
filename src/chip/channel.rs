//! Register-driven chip voice

use crate::blip::BlipBuffer;

/// Waveform produced by a [`ChipChannel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    /// 8-step pulse whose duty is set by the timbre register
    Square,
    /// 32-step triangle; halts while volume is zero
    Triangle,
    /// LFSR noise; timbre is the feedback tap mask
    Noise,
}

/// Voice registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    /// Clocks between waveform steps
    Period = 0,
    /// Step amplitude
    Volume = 1,
    /// Waveform-specific shape
    Timbre = 2,
}

impl TryFrom<u32> for Register {
    type Error = u32;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Register::Period),
            1 => Ok(Register::Volume),
            2 => Ok(Register::Timbre),
            other => Err(other),
        }
    }
}

/// One chip voice
#[derive(Debug, Clone)]
pub struct ChipChannel {
    waveform: Waveform,
    /// Overall volume of the voice
    gain: i32,
    /// Period, volume, timbre
    regs: [i32; 3],
    /// Clock time of next step
    time: u64,
    /// Position within the waveform (LFSR state for noise)
    phase: i32,
    /// Amplitude last added to the buffer
    amp: i32,
}

impl ChipChannel {
    pub fn new(waveform: Waveform, gain: i32) -> Self {
        Self {
            waveform,
            gain,
            regs: [10, 0, 0],
            time: 0,
            phase: 0,
            amp: 0,
        }
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn register(&self, register: Register) -> i32 {
        self.regs[register as usize]
    }

    /// Amplitude currently held in the buffer
    pub fn amplitude(&self) -> i32 {
        self.amp
    }

    /// Run to `time`, then store `value` in `register`
    pub fn write(&mut self, buf: &mut BlipBuffer, time: u64, register: Register, value: i32) {
        self.run(buf, time);
        self.regs[register as usize] = value;
    }

    /// Emit every step that falls before `end_time`
    pub fn run(&mut self, buf: &mut BlipBuffer, end_time: u64) {
        match self.waveform {
            Waveform::Square => self.run_square(buf, end_time),
            Waveform::Triangle => self.run_triangle(buf, end_time),
            Waveform::Noise => self.run_noise(buf, end_time),
        }
    }

    /// Run to `end_time` and rebase the next step time on the new frame
    pub fn end_frame(&mut self, buf: &mut BlipBuffer, end_time: u64) {
        self.run(buf, end_time);
        self.time -= end_time;
    }

    fn period(&self) -> u64 {
        self.regs[Register::Period as usize].max(1) as u64
    }

    fn update_amp(&mut self, buf: &mut BlipBuffer, amp: i32) {
        let delta = amp.saturating_mul(self.gain).saturating_sub(self.amp);
        self.amp += delta;
        buf.add_delta(self.time, delta);
    }

    fn run_square(&mut self, buf: &mut BlipBuffer, end_time: u64) {
        let period = self.period();
        while self.time < end_time {
            self.phase = (self.phase + 1) % 8;
            let amp = if self.phase >= self.regs[Register::Timbre as usize] {
                self.regs[Register::Volume as usize]
            } else {
                0
            };
            self.update_amp(buf, amp);
            self.time += period;
        }
    }

    fn run_triangle(&mut self, buf: &mut BlipBuffer, end_time: u64) {
        let period = self.period();
        while self.time < end_time {
            if self.regs[Register::Volume as usize] != 0 {
                self.phase = (self.phase + 1) % 32;
                let amp = if self.phase >= 16 {
                    31 - self.phase
                } else {
                    self.phase
                };
                self.update_amp(buf, amp);
            }
            self.time += period;
        }
    }

    fn run_noise(&mut self, buf: &mut BlipBuffer, end_time: u64) {
        // LFSR must never be zero
        if self.phase == 0 {
            self.phase = 1;
        }

        let period = self.period();
        let taps = self.regs[Register::Timbre as usize];
        while self.time < end_time {
            self.phase = ((self.phase & 1) * taps) ^ (self.phase >> 1);
            let amp = (self.phase & 1) * self.regs[Register::Volume as usize];
            self.update_amp(buf, amp);
            self.time += period;
        }
    }
}
