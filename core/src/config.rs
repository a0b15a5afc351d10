//! Simulation configuration.
//!
//! Every timing and geometry constant the session controller depends on lives
//! here so frontends can override them from a config file. Values that are
//! absent from a deserialized table fall back to [`SimConfig::default`].

use std::time::Duration;

use serde::Deserialize;

use crate::error::SimError;

mod defaults {
    /// Logical display resolution the window is created at.
    pub const DISPLAY_WIDTH: u32 = 1024;
    pub const DISPLAY_HEIGHT: u32 = 768;

    /// Raw video-signal buffer: one slot per pixel clock of a full
    /// 640x480@60 frame including blanking (800 clocks x 525 lines).
    pub const VIDEO_WIDTH: u32 = 800;
    pub const VIDEO_HEIGHT: u32 = 525;

    pub const FRAME_RATE_HZ: f64 = 60.0;

    /// Simulated ticks between clock-speed samples. Two ticks make one bus
    /// clock cycle, so this is one million bus cycles.
    pub const CLOCK_SAMPLE_INTERVAL: u64 = 2_000_000;

    /// Presented frames between clock-speed log lines.
    pub const LOG_INTERVAL_FRAMES: u64 = 100;

    /// Width of the active-low button pin.
    pub const INPUT_BITS: u8 = 4;

    /// Widest button pin an [`crate::input::InputMask`] can drive.
    pub const MAX_INPUT_BITS: u8 = 8;
}

/// A width x height pair in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Bytes per row of an RGBA buffer at this resolution.
    pub const fn pitch(&self) -> usize {
        self.width as usize * 4
    }

    /// Total bytes of an RGBA buffer at this resolution.
    pub const fn frame_bytes(&self) -> usize {
        self.pitch() * self.height as usize
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Logical resolution of the render target.
    pub display: Resolution,
    /// Geometry of the raw signal buffer and the texture it is copied into.
    pub video: Resolution,
    /// Maximum rate of input polling and presentation. Zero disables pacing.
    pub frame_rate_hz: f64,
    pub clock_sample_interval: u64,
    pub log_interval_frames: u64,
    pub input_bits: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            display: Resolution::new(defaults::DISPLAY_WIDTH, defaults::DISPLAY_HEIGHT),
            video: Resolution::new(defaults::VIDEO_WIDTH, defaults::VIDEO_HEIGHT),
            frame_rate_hz: defaults::FRAME_RATE_HZ,
            clock_sample_interval: defaults::CLOCK_SAMPLE_INTERVAL,
            log_interval_frames: defaults::LOG_INTERVAL_FRAMES,
            input_bits: defaults::INPUT_BITS,
        }
    }
}

impl SimConfig {
    /// Reject settings the session cannot run with: empty geometry, a button
    /// pin wider than the mask, or a negative frame rate.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.video.width == 0 || self.video.height == 0 {
            return Err(SimError::InvalidConfig("video resolution must be non-zero".into()));
        }
        if self.display.width == 0 || self.display.height == 0 {
            return Err(SimError::InvalidConfig("display resolution must be non-zero".into()));
        }
        if self.input_bits > defaults::MAX_INPUT_BITS {
            return Err(SimError::InvalidConfig(format!(
                "input_bits is {}, at most {} are supported",
                self.input_bits,
                defaults::MAX_INPUT_BITS
            )));
        }
        if self.frame_rate_hz < 0.0 || self.frame_rate_hz.is_nan() {
            return Err(SimError::InvalidConfig("frame_rate_hz must be zero or positive".into()));
        }
        Ok(())
    }

    /// Minimum wall-clock spacing between two gated presentation passes.
    pub fn present_interval(&self) -> Duration {
        if self.frame_rate_hz.is_finite() && self.frame_rate_hz > 0.0 {
            Duration::from_secs_f64(1.0 / self.frame_rate_hz)
        } else {
            Duration::ZERO
        }
    }
}
