//! Construction errors for the delta buffer

use thiserror::Error;

use super::constants::MAX_FRAME;

/// Errors reported when creating a [`BlipBuffer`](super::BlipBuffer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BlipError {
    /// A buffer must hold at least one sample
    #[error("buffer capacity must be at least one sample")]
    ZeroCapacity,

    /// Requested capacity is above [`MAX_FRAME`]
    #[error("buffer capacity {requested} exceeds maximum of {max} samples")]
    CapacityTooLarge { requested: usize, max: usize },
}

impl BlipError {
    pub(crate) fn check_capacity(capacity: usize) -> Result<(), Self> {
        if capacity == 0 {
            return Err(BlipError::ZeroCapacity);
        }
        if capacity > MAX_FRAME {
            return Err(BlipError::CapacityTooLarge {
                requested: capacity,
                max: MAX_FRAME,
            });
        }
        Ok(())
    }
}
