// blip-rs Library
// Band-limited delta synthesis for sound chip emulators

// Public modules
pub mod blip;
pub mod chip;
pub mod config;
pub mod render;
pub mod wave;

// Re-export main types for convenience
pub use blip::{BlipBuffer, BlipError, ChannelMode, MAX_FRAME, MAX_RATIO};
pub use chip::{Chip, ChipChannel, ChipEvent, ChipLog, ChipLogError, SquareWave, SweepSquare};
pub use config::DemoConfig;
pub use render::{RenderError, Scene};
pub use wave::{WaveError, WaveWriter};
