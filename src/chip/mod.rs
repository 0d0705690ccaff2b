// Chip module - Example sound sources feeding a BlipBuffer
//
// Small oscillators in the shape a sound chip emulator drives the buffer:
// each keeps the clock time of its next level change and the amplitude it
// last reported, and emits only the difference.
//
// - `square`: free-running square waves with float frequency and volume
// - `channel`: register-driven square, triangle and noise voices
// - `log`: parser for recorded register writes

pub mod channel;
pub mod log;
pub mod square;

#[cfg(test)]
mod tests;

pub use channel::{ChipChannel, Register, Waveform};
pub use log::{ChipEvent, ChipLog, ChipLogError};
pub use square::{SquareWave, SweepSquare};

use crate::blip::BlipBuffer;

/// Number of voices on the chip
pub const CHANNEL_COUNT: usize = 4;

/// Full-scale amplitude shared by all voices
pub const MASTER_VOLUME: i32 = 65536 / 15;

/// Four-voice chip: two squares, a triangle and a noise generator
#[derive(Debug, Clone)]
pub struct Chip {
    channels: [ChipChannel; CHANNEL_COUNT],
}

impl Default for Chip {
    fn default() -> Self {
        Self::new()
    }
}

impl Chip {
    pub fn new() -> Self {
        Self {
            channels: [
                ChipChannel::new(Waveform::Square, MASTER_VOLUME * 26 / 100),
                ChipChannel::new(Waveform::Square, MASTER_VOLUME * 26 / 100),
                ChipChannel::new(Waveform::Triangle, MASTER_VOLUME * 30 / 100),
                ChipChannel::new(Waveform::Noise, MASTER_VOLUME * 18 / 100),
            ],
        }
    }

    /// Voice at `index`
    pub fn channel(&self, index: usize) -> &ChipChannel {
        &self.channels[index]
    }

    /// Run voice `index` to `time`, then write `value` to one of its registers
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`CHANNEL_COUNT`].
    pub fn write(
        &mut self,
        buf: &mut BlipBuffer,
        time: u64,
        index: usize,
        register: Register,
        value: i32,
    ) {
        self.channels[index].write(buf, time, register, value);
    }

    /// Run every voice to `end_time` and end the frame on `buf`
    pub fn end_frame(&mut self, buf: &mut BlipBuffer, end_time: u64) {
        for channel in &mut self.channels {
            channel.end_frame(buf, end_time);
        }
        buf.end_frame(end_time);
    }

    /// Apply one recorded event
    pub fn apply(&mut self, buf: &mut BlipBuffer, event: ChipEvent) {
        match event {
            ChipEvent::Write {
                time,
                channel,
                register,
                value,
            } => self.write(buf, time, channel, register, value),
            ChipEvent::EndFrame { time } => self.end_frame(buf, time),
        }
    }
}
