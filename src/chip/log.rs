//! Recorded chip register writes
//!
//! One event per line, four whitespace-separated integers:
//!
//! ```text
//! time channel register value
//! ```
//!
//! `time` is in clocks since the start of the frame. A `channel` of
//! [`CHANNEL_COUNT`] or more marks the end of a frame at `time`; its
//! register and value are ignored. Blank lines and lines starting with `#`
//! are skipped.

use std::io::{self, BufRead, Lines};
use thiserror::Error;

use super::channel::Register;
use super::CHANNEL_COUNT;

/// Errors produced while reading a chip log
#[derive(Debug, Error)]
pub enum ChipLogError {
    #[error("failed to read chip log: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: missing {field}")]
    MissingField { line: usize, field: &'static str },

    #[error("line {line}: invalid {field} '{text}'")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        text: String,
    },

    #[error("line {line}: register {register} out of range (0-2)")]
    InvalidRegister { line: usize, register: u32 },

    #[error("line {line}: unexpected trailing '{text}'")]
    Trailing { line: usize, text: String },
}

/// One recorded event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipEvent {
    /// Register write on a voice
    Write {
        time: u64,
        channel: usize,
        register: Register,
        value: i32,
    },
    /// End of the current frame
    EndFrame { time: u64 },
}

impl ChipEvent {
    /// Clock time of the event within its frame
    pub fn time(&self) -> u64 {
        match *self {
            ChipEvent::Write { time, .. } | ChipEvent::EndFrame { time } => time,
        }
    }
}

/// Parse one log line
///
/// Returns `Ok(None)` for blank and comment lines. `line` is the 1-based
/// line number used in errors.
pub fn parse_event(text: &str, line: usize) -> Result<Option<ChipEvent>, ChipLogError> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }

    let mut fields = text.split_whitespace();
    let time: u64 = field(&mut fields, line, "time")?;
    let channel: usize = field(&mut fields, line, "channel")?;
    let register: u32 = field(&mut fields, line, "register")?;
    let value: i32 = field(&mut fields, line, "value")?;

    if let Some(extra) = fields.next() {
        return Err(ChipLogError::Trailing {
            line,
            text: extra.to_string(),
        });
    }

    if channel >= CHANNEL_COUNT {
        return Ok(Some(ChipEvent::EndFrame { time }));
    }

    let register = Register::try_from(register)
        .map_err(|register| ChipLogError::InvalidRegister { line, register })?;

    Ok(Some(ChipEvent::Write {
        time,
        channel,
        register,
        value,
    }))
}

fn field<'a, T: std::str::FromStr>(
    fields: &mut impl Iterator<Item = &'a str>,
    line: usize,
    name: &'static str,
) -> Result<T, ChipLogError> {
    let text = fields
        .next()
        .ok_or(ChipLogError::MissingField { line, field: name })?;
    text.parse().map_err(|_| ChipLogError::InvalidNumber {
        line,
        field: name,
        text: text.to_string(),
    })
}

/// Iterator over the events of a chip log
pub struct ChipLog<R: BufRead> {
    lines: Lines<R>,
    line: usize,
}

impl<R: BufRead> ChipLog<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }
}

impl<R: BufRead> Iterator for ChipLog<R> {
    type Item = Result<ChipEvent, ChipLogError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(e) => return Some(Err(e.into())),
            };
            self.line += 1;

            match parse_event(&text, self.line) {
                Ok(Some(event)) => return Some(Ok(event)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
