// Wave writer - Stores finished 16-bit samples in a RIFF/WAVE file
//
// Thin wrapper around hound that counts samples the way the demo loops
// need it and reports errors through WaveError.

use hound::{SampleFormat, WavSpec, WavWriter};
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;
use thiserror::Error;

/// Bits per stored sample
pub const BITS_PER_SAMPLE: u16 = 16;

/// Errors produced while writing a wave file
#[derive(Debug, Error)]
pub enum WaveError {
    /// The encoder or the underlying writer failed
    #[error("wave output failed: {0}")]
    Encode(#[from] hound::Error),

    /// Only mono and interleaved stereo are supported
    #[error("unsupported channel count {0} (expected 1 or 2)")]
    Channels(u16),
}

/// 16-bit PCM wave writer
///
/// Stereo data is written interleaved, left first, exactly as
/// [`BlipBuffer::read_samples`](crate::blip::BlipBuffer::read_samples)
/// produces it in stereo mode.
pub struct WaveWriter<W: Write + Seek> {
    writer: WavWriter<W>,
    spec: WavSpec,
    sample_count: usize,
}

impl WaveWriter<BufWriter<File>> {
    /// Create a wave file at `path`
    pub fn create<P: AsRef<Path>>(
        path: P,
        sample_rate: u32,
        channels: u16,
    ) -> Result<Self, WaveError> {
        let spec = wav_spec(sample_rate, channels)?;
        Ok(Self {
            writer: WavWriter::create(path, spec)?,
            spec,
            sample_count: 0,
        })
    }
}

impl<W: Write + Seek> WaveWriter<W> {
    /// Write a wave stream to `sink`
    pub fn new(sink: W, sample_rate: u32, channels: u16) -> Result<Self, WaveError> {
        let spec = wav_spec(sample_rate, channels)?;
        Ok(Self {
            writer: WavWriter::new(sink, spec)?,
            spec,
            sample_count: 0,
        })
    }

    /// Append samples, returning how many were written
    pub fn write(&mut self, samples: &[i16]) -> Result<usize, WaveError> {
        for &sample in samples {
            self.writer.write_sample(sample)?;
        }
        self.sample_count += samples.len();
        Ok(samples.len())
    }

    /// Number of `i16` values written so far (both channels for stereo)
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Output sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.spec.sample_rate
    }

    /// Number of interleaved channels
    pub fn channels(&self) -> u16 {
        self.spec.channels
    }

    /// Write the final header sizes and flush
    pub fn finalize(self) -> Result<(), WaveError> {
        self.writer.finalize()?;
        Ok(())
    }
}

fn wav_spec(sample_rate: u32, channels: u16) -> Result<WavSpec, WaveError> {
    if !(1..=2).contains(&channels) {
        return Err(WaveError::Channels(channels));
    }

    Ok(WavSpec {
        channels,
        sample_rate,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn u16_at(bytes: &[u8], pos: usize) -> u16 {
        u16::from_le_bytes([bytes[pos], bytes[pos + 1]])
    }

    fn u32_at(bytes: &[u8], pos: usize) -> u32 {
        u32::from_le_bytes([bytes[pos], bytes[pos + 1], bytes[pos + 2], bytes[pos + 3]])
    }

    fn encode(samples: &[i16], sample_rate: u32, channels: u16) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = WaveWriter::new(&mut cursor, sample_rate, channels).unwrap();
        assert_eq!(writer.write(samples).unwrap(), samples.len());
        assert_eq!(writer.sample_count(), samples.len());
        writer.finalize().unwrap();
        cursor.into_inner()
    }

    #[test]
    fn test_mono_header() {
        let bytes = encode(&[0, 1, -1, i16::MAX, i16::MIN], 44_100, 1);

        assert_eq!(bytes.len(), 44 + 10);
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(u32_at(&bytes, 0x04), (bytes.len() - 8) as u32);
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[12..16], b"fmt ");
        assert_eq!(u16_at(&bytes, 0x14), 1); // PCM
        assert_eq!(u16_at(&bytes, 0x16), 1);
        assert_eq!(u32_at(&bytes, 0x18), 44_100);
        assert_eq!(u32_at(&bytes, 0x1C), 44_100 * 2);
        assert_eq!(u16_at(&bytes, 0x20), 2);
        assert_eq!(u16_at(&bytes, 0x22), 16);
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(u32_at(&bytes, 0x28), 10);
    }

    #[test]
    fn test_stereo_header() {
        let bytes = encode(&[1, 2, 3, 4], 48_000, 2);

        assert_eq!(u16_at(&bytes, 0x16), 2);
        assert_eq!(u32_at(&bytes, 0x1C), 48_000 * 4);
        assert_eq!(u16_at(&bytes, 0x20), 4);
        assert_eq!(u32_at(&bytes, 0x28), 8);
    }

    #[test]
    fn test_samples_read_back() {
        let samples = [0, 100, -100, 32767, -32768, 7];
        let bytes = encode(&samples, 22_050, 1);

        let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        assert_eq!(reader.spec().sample_rate, 22_050);
        let read: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(read, samples);
    }

    #[test]
    fn test_writer_reports_format() {
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = WaveWriter::new(&mut cursor, 32_000, 2).unwrap();
        assert_eq!(writer.sample_rate(), 32_000);
        assert_eq!(writer.channels(), 2);

        writer.write(&[1, 2]).unwrap();
        writer.write(&[3, 4, 5, 6]).unwrap();
        assert_eq!(writer.sample_count(), 6);
        writer.finalize().unwrap();
    }

    #[test]
    fn test_empty_file() {
        let bytes = encode(&[], 44_100, 1);
        assert_eq!(bytes.len(), 44);
        assert_eq!(u32_at(&bytes, 0x28), 0);
    }

    #[test]
    fn test_rejects_bad_channel_count() {
        let mut cursor = Cursor::new(Vec::new());
        let err = WaveWriter::new(&mut cursor, 44_100, 3).err().unwrap();
        assert!(matches!(err, WaveError::Channels(3)));
    }
}
