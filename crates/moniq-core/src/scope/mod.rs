//! Scope data pipelines
//!
//! Two producers share one rendering contract, a fixed-length series of
//! points in normalized chart units (-1.0..=1.0 on both axes):
//!
//! - [`SoundScope`]: live audio from the sample queue, double buffered and
//!   shared lock-free between the sample receiver and the UI.
//! - [`WtScope`]: wavetable frames streamed from a file on a UI timer.

mod sound;
mod wavetable;

pub use sound::{ScopeAtomics, SoundScope};
pub use wavetable::{
    default_wavetable_dir, WavFile, WavetableError, WavetableSource, WtScope, DEFAULT_WAVETABLE_DIR,
    SAMPLES_PER_WAVE,
};

use std::time::Duration;

/// Stereo pairs per sample frame, and points in the sound scope series
pub const SCOPE_NUM_SAMPLES: usize = 128;

/// Render clock period (60 Hz)
pub const SCOPE_REFRESH_INTERVAL: Duration = Duration::from_millis(16);

/// Render ticks of silence before a background scope hides itself (3 s at 60 Hz)
pub const SCOPE_IDLE_FRAME_COUNT: u32 = 60 * 3;

/// Wavetable viewer frame period
pub const WT_REFRESH_INTERVAL: Duration = Duration::from_millis(17);

pub const FOREGROUND_ALPHA: f32 = 1.0;
pub const BACKGROUND_ALPHA: f32 = 0.5;

/// Whether the scope is drawn as the main content or dimmed behind it
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Foreground = 0,
    Background = 1,
}

impl DisplayMode {
    pub fn alpha(self) -> f32 {
        match self {
            Self::Foreground => FOREGROUND_ALPHA,
            Self::Background => BACKGROUND_ALPHA,
        }
    }

    fn from_raw(v: u8) -> Self {
        if v == Self::Background as u8 {
            Self::Background
        } else {
            Self::Foreground
        }
    }
}

/// X coordinate of sample `i` of `n`, evenly spaced from -1.0
#[inline]
pub fn spread_x(i: usize, n: usize) -> f32 {
    -1.0 + (i as f32 / n as f32) * 2.0
}
