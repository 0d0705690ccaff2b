// Render module - Demo scenes rendered to wave files
//
// Each scene drives one or two BlipBuffers the way an emulator would and
// streams the finished samples into a WaveWriter:
//
// - Square: a sweeping square wave at an NTSC-like clock, ended every
//   video frame
// - Fixed: two square waves at the maximum clock ratio, with frames sized
//   by `clocks_needed` to give fixed-size sample chunks
// - Stereo: the same two waves on separate buffers, interleaved
// - Chip: register writes replayed from a chip log

use std::io::{BufRead, Seek, Write};
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::blip::{BlipBuffer, BlipError, ChannelMode, MAX_RATIO};
use crate::chip::{Chip, ChipEvent, ChipLog, ChipLogError, SquareWave, SweepSquare};
use crate::config::DemoConfig;
use crate::wave::{WaveError, WaveWriter};

/// Samples generated per chunk in the fixed-chunk scenes
pub const CHUNK_SAMPLES: usize = 1024;

/// Samples moved per read when draining a buffer
const FLUSH_SAMPLES: usize = 512;

/// Lowest frequency the sweeping waves are allowed to reach
const MIN_FREQUENCY: f64 = 20.0;

/// Errors produced while rendering a scene
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Blip(#[from] BlipError),

    #[error(transparent)]
    Wave(#[from] WaveError),

    #[error(transparent)]
    Log(#[from] ChipLogError),

    #[error("unsupported rates: {clock_rate} Hz clock, {sample_rate} Hz output")]
    Rates { clock_rate: f64, sample_rate: f64 },

    #[error("frame of {clocks} clocks does not fit the buffer (at most {limit})")]
    FrameTooLong { clocks: u64, limit: u64 },
}

/// Demo scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    Square,
    Fixed,
    Stereo,
    Chip,
}

impl Scene {
    /// Interleaved channels written by the scene
    pub fn channels(self) -> u16 {
        match self {
            Scene::Stereo => 2,
            _ => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Scene::Square => "square",
            Scene::Fixed => "fixed",
            Scene::Stereo => "stereo",
            Scene::Chip => "chip",
        }
    }
}

/// Buffer sized and rated from `config`
fn new_buffer(config: &DemoConfig, clock_rate: f64) -> Result<BlipBuffer, RenderError> {
    let sample_rate = config.output.sample_rate as f64;
    let supported = clock_rate > 0.0
        && sample_rate > 0.0
        && clock_rate / sample_rate <= MAX_RATIO as f64
        && sample_rate / clock_rate < 4096.0;
    if !supported {
        return Err(RenderError::Rates {
            clock_rate,
            sample_rate,
        });
    }

    let mut buf = BlipBuffer::new(config.buffer_capacity())?;
    buf.set_rates(clock_rate, sample_rate);
    Ok(buf)
}

/// Longest frame that still fits in the free part of `buf`
fn frame_limit(buf: &BlipBuffer) -> u64 {
    buf.clocks_needed(buf.capacity() - buf.samples_available())
}

fn check_frame(buf: &BlipBuffer, clocks: u64) -> Result<(), RenderError> {
    let limit = frame_limit(buf);
    if clocks > limit {
        return Err(RenderError::FrameTooLong { clocks, limit });
    }
    Ok(())
}

/// Read everything available from `buf` into `out`
fn flush<W: Write + Seek>(
    buf: &mut BlipBuffer,
    out: &mut WaveWriter<W>,
) -> Result<(), RenderError> {
    let mut temp = [0i16; FLUSH_SAMPLES];
    while buf.samples_available() > 0 {
        let count = buf.read_samples(&mut temp, FLUSH_SAMPLES, ChannelMode::Mono);
        out.write(&temp[..count])?;
    }
    Ok(())
}

/// Sweeping square wave, one buffer frame per video frame
///
/// Returns the number of samples written.
pub fn render_square<W: Write + Seek>(
    config: &DemoConfig,
    out: &mut WaveWriter<W>,
) -> Result<usize, RenderError> {
    let mut buf = new_buffer(config, config.clock.square_rate)?;
    let clocks = (config.clock.square_rate / config.clock.frame_rate) as u64;
    check_frame(&buf, clocks)?;

    let start = out.sample_count();
    let total = start + config.total_samples();
    let mut wave = SweepSquare::new();
    info!(clocks, total, "rendering square sweep");

    while out.sample_count() < total {
        wave.run(&mut buf, clocks);
        buf.end_frame(clocks);
        flush(&mut buf, out)?;

        wave.advance();
        trace!(period = wave.period(), volume = wave.volume(), "frame done");
    }

    Ok(out.sample_count() - start)
}

/// The two waves shared by the fixed and stereo scenes
fn analog_waves() -> [SquareWave; 2] {
    [SquareWave::new(16_000.0, 0.0), SquareWave::new(1_000.0, 0.5)]
}

/// One fades in while falling, the other fades out while rising
fn sweep_waves(waves: &mut [SquareWave; 2], nyquist: f64) {
    waves[0].volume += 0.005;
    waves[0].frequency = (waves[0].frequency * 0.950).max(MIN_FREQUENCY);

    waves[1].volume -= 0.002;
    waves[1].frequency = (waves[1].frequency * 1.010).min(nyquist);
}

/// Two square waves at the maximum clock ratio, in fixed-size chunks
///
/// Returns the number of samples written.
pub fn render_fixed<W: Write + Seek>(
    config: &DemoConfig,
    out: &mut WaveWriter<W>,
) -> Result<usize, RenderError> {
    let sample_rate = config.output.sample_rate as f64;
    let clock_rate = sample_rate * MAX_RATIO as f64;
    let mut buf = new_buffer(config, clock_rate)?;

    let chunk = CHUNK_SAMPLES.min(buf.capacity());
    let mut temp = vec![0i16; chunk];
    let mut waves = analog_waves();

    let start = out.sample_count();
    let total = start + config.total_samples();
    info!(chunk, total, "rendering fixed chunks");

    while out.sample_count() < total {
        let clocks = buf.clocks_needed(chunk);
        for wave in &mut waves {
            wave.run(&mut buf, clock_rate, clocks);
        }
        buf.end_frame(clocks);

        let count = buf.read_samples(&mut temp, chunk, ChannelMode::Mono);
        out.write(&temp[..count])?;

        sweep_waves(&mut waves, sample_rate / 2.0);
    }

    Ok(out.sample_count() - start)
}

/// The fixed scene with each wave on its own channel
///
/// Returns the number of samples written, counting both channels.
pub fn render_stereo<W: Write + Seek>(
    config: &DemoConfig,
    out: &mut WaveWriter<W>,
) -> Result<usize, RenderError> {
    let sample_rate = config.output.sample_rate as f64;
    let clock_rate = sample_rate * MAX_RATIO as f64;
    let mut bufs = [
        new_buffer(config, clock_rate)?,
        new_buffer(config, clock_rate)?,
    ];

    let pairs = CHUNK_SAMPLES.min(bufs[0].capacity());
    let mut temp = vec![0i16; pairs * 2];
    let mut waves = analog_waves();

    let start = out.sample_count();
    let total = start + config.total_samples() * 2;
    info!(pairs, total, "rendering stereo chunks");

    while out.sample_count() < total {
        let clocks = bufs[0].clocks_needed(pairs);
        for (i, (wave, buf)) in waves.iter_mut().zip(&mut bufs).enumerate() {
            wave.run(buf, clock_rate, clocks);
            buf.end_frame(clocks);
            let count = buf.read_samples(&mut temp[i..], pairs, ChannelMode::Stereo);
            assert_eq!(count, pairs, "short read on channel {i}");
        }
        out.write(&temp)?;

        sweep_waves(&mut waves, sample_rate / 2.0);
    }

    Ok(out.sample_count() - start)
}

/// Replay a chip log
///
/// Stops at the end of the log or once the configured duration has been
/// written, whichever comes first. Returns the number of samples written.
pub fn render_chip<R: BufRead, W: Write + Seek>(
    config: &DemoConfig,
    log: R,
    out: &mut WaveWriter<W>,
) -> Result<usize, RenderError> {
    let mut buf = new_buffer(config, config.clock.chip_rate)?;
    let mut chip = Chip::new();
    let mut limit = frame_limit(&buf);
    let mut frames = 0usize;

    let start = out.sample_count();
    let total = start + config.total_samples();
    info!(limit, total, "replaying chip log");

    for event in ChipLog::new(log) {
        if out.sample_count() >= total {
            break;
        }

        let event = event?;
        if event.time() > limit {
            return Err(RenderError::FrameTooLong {
                clocks: event.time(),
                limit,
            });
        }

        chip.apply(&mut buf, event);
        if let ChipEvent::EndFrame { .. } = event {
            flush(&mut buf, out)?;
            limit = frame_limit(&buf);
            frames += 1;
        }
    }

    debug!(frames, "chip log done");
    Ok(out.sample_count() - start)
}
