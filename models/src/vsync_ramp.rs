//! Minimal synthetic video source.
//!
//! Counts pixel-clock rising edges through a fixed-length cycle: vsync is held
//! low for the first `low_clocks` edges and high for the next `high_clocks`.
//! During the high phase the red channel carries the edge index within that
//! phase, modulo 256; green and blue stay at zero. Useful for smoke runs where
//! a predictable byte pattern matters more than a picture.

use vgasim_core::model::{HardwareModel, InputPin, OutputPin, SimContext};

use crate::registry::ModelEntry;

/// Default cycle fills an 800x525 buffer exactly.
pub const DEFAULT_LOW_CLOCKS: u32 = 2;
pub const DEFAULT_HIGH_CLOCKS: u32 = 800 * 525 - DEFAULT_LOW_CLOCKS;

pub struct VsyncRamp {
    low_clocks: u32,
    high_clocks: u32,
    frame_limit: Option<u32>,

    clk_pix: bool,
    prev_pix: bool,

    position: u32,
    frames: u32,

    red: u8,
    vsync: bool,
}

impl Default for VsyncRamp {
    fn default() -> Self {
        Self::new(DEFAULT_LOW_CLOCKS, DEFAULT_HIGH_CLOCKS)
    }
}

impl VsyncRamp {
    pub fn new(low_clocks: u32, high_clocks: u32) -> Self {
        assert!(low_clocks > 0 && high_clocks > 0, "both phases need at least one clock");
        Self {
            low_clocks,
            high_clocks,
            frame_limit: None,
            clk_pix: false,
            prev_pix: false,
            position: 0,
            frames: 0,
            red: 0,
            vsync: false,
        }
    }

    /// Call [`SimContext::finish`] on the first pixel clock after `frames`
    /// sync pulses have completed, so the sample that closes the last pulse
    /// is still taken.
    pub fn with_frame_limit(mut self, frames: u32) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    /// Sync pulses completed so far.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    fn on_pixel_rising(&mut self, ctx: &mut SimContext) {
        if self.frame_limit.is_some_and(|limit| self.frames >= limit) {
            ctx.finish();
            return;
        }

        self.position = (self.position + 1) % (self.low_clocks + self.high_clocks);

        let was_low = !self.vsync;
        self.vsync = self.position >= self.low_clocks;
        self.red = if self.vsync {
            (self.position - self.low_clocks) as u8
        } else {
            0
        };

        if was_low && self.vsync {
            self.frames += 1;
        }
    }
}

impl HardwareModel for VsyncRamp {
    fn set_input(&mut self, pin: InputPin, value: u32) {
        if pin == InputPin::PixelClock {
            self.clk_pix = value != 0;
        }
    }

    fn output(&self, pin: OutputPin) -> u32 {
        match pin {
            OutputPin::Red => self.red as u32,
            OutputPin::Green | OutputPin::Blue => 0,
            OutputPin::VSync => self.vsync as u32,
        }
    }

    fn eval(&mut self, ctx: &mut SimContext) {
        if self.clk_pix && !self.prev_pix {
            self.on_pixel_rising(ctx);
        }
        self.prev_pix = self.clk_pix;
    }
}

fn create_model() -> Box<dyn HardwareModel> {
    Box::new(VsyncRamp::default())
}

inventory::submit! {
    ModelEntry::new(
        "vsync_ramp",
        "synthetic red ramp between vsync pulses",
        create_model,
    )
}
