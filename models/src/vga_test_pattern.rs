//! Behavioral 640x480@60 VGA test-pattern generator.
//!
//! Mirrors a small RTL design with two clock domains:
//!
//! - **Bus domain**: the button pin passes through a two-stage synchronizer
//!   clocked on bus-clock rising edges.
//! - **Pixel domain**: horizontal and vertical counters advance one pixel per
//!   pixel-clock rising edge. Colour and sync outputs are registered, so they
//!   change only on that edge.
//!
//! The visible area shows eight colour bars. Buttons are active low:
//!
//! | Bit | Effect while held |
//! |-----|-------------------|
//! | 0   | invert colours |
//! | 1   | grey gradient instead of bars |
//! | 2   | darken every other 32x32 square |
//! | 3   | scroll one pixel left per frame |

use vgasim_core::model::{HardwareModel, InputPin, OutputPin, SimContext};

use crate::registry::ModelEntry;

pub const H_VISIBLE: u16 = 640;
pub const H_FRONT_PORCH: u16 = 16;
pub const H_SYNC: u16 = 96;
pub const H_BACK_PORCH: u16 = 48;
pub const H_TOTAL: u16 = H_VISIBLE + H_FRONT_PORCH + H_SYNC + H_BACK_PORCH;

pub const V_VISIBLE: u16 = 480;
pub const V_FRONT_PORCH: u16 = 10;
pub const V_SYNC: u16 = 2;
pub const V_BACK_PORCH: u16 = 33;
pub const V_TOTAL: u16 = V_VISIBLE + V_FRONT_PORCH + V_SYNC + V_BACK_PORCH;

pub const KEY_INVERT: u8 = 0;
pub const KEY_GRADIENT: u8 = 1;
pub const KEY_CHECKER: u8 = 2;
pub const KEY_SCROLL: u8 = 3;

const BAR_WIDTH: u16 = H_VISIBLE / 8;
const CHECKER_SIZE: u16 = 32;

/// White, yellow, cyan, green, magenta, red, blue, black.
const BARS: [[u8; 3]; 8] = [
    [0xFF, 0xFF, 0xFF],
    [0xFF, 0xFF, 0x00],
    [0x00, 0xFF, 0xFF],
    [0x00, 0xFF, 0x00],
    [0xFF, 0x00, 0xFF],
    [0xFF, 0x00, 0x00],
    [0x00, 0x00, 0xFF],
    [0x00, 0x00, 0x00],
];

pub struct VgaTestPattern {
    // Input pins
    clk_bus: bool,
    clk_pix: bool,
    keys_in: u8,

    // Previous clock levels for edge detection
    prev_bus: bool,
    prev_pix: bool,

    // Bus domain: key synchronizer, [first stage, second stage]
    key_sync: [u8; 2],

    // Pixel domain
    h: u16,
    v: u16,
    frame: u32,
    scroll: u16,

    // Registered outputs
    rgb: [u8; 3],
    hsync: bool,
    vsync: bool,
}

impl Default for VgaTestPattern {
    fn default() -> Self {
        Self::new()
    }
}

impl VgaTestPattern {
    pub fn new() -> Self {
        let mut sys = Self {
            clk_bus: false,
            clk_pix: false,
            keys_in: 0xFF,
            prev_bus: false,
            prev_pix: false,
            key_sync: [0xFF; 2],
            h: 0,
            v: 0,
            frame: 0,
            scroll: 0,
            rgb: [0; 3],
            hsync: true,
            vsync: true,
        };
        sys.update_outputs();
        sys
    }

    /// Current (h, v) counter position.
    pub fn position(&self) -> (u16, u16) {
        (self.h, self.v)
    }

    /// Completed frames since construction.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Horizontal sync output, active low.
    pub fn hsync(&self) -> bool {
        self.hsync
    }

    /// Synchronized key state as seen by the pixel domain.
    pub fn synced_keys(&self) -> u8 {
        self.key_sync[1]
    }

    fn key_held(&self, bit: u8) -> bool {
        self.key_sync[1] & (1 << bit) == 0
    }

    fn on_bus_rising(&mut self) {
        self.key_sync[1] = self.key_sync[0];
        self.key_sync[0] = self.keys_in;
    }

    fn on_pixel_rising(&mut self) {
        self.h += 1;
        if self.h == H_TOTAL {
            self.h = 0;
            self.v += 1;
            if self.v == V_TOTAL {
                self.v = 0;
                self.frame = self.frame.wrapping_add(1);
                if self.key_held(KEY_SCROLL) {
                    self.scroll = (self.scroll + 1) % H_VISIBLE;
                }
            }
        }
        self.update_outputs();
    }

    fn update_outputs(&mut self) {
        let hsync_start = H_VISIBLE + H_FRONT_PORCH;
        let vsync_start = V_VISIBLE + V_FRONT_PORCH;
        self.hsync = !(hsync_start..hsync_start + H_SYNC).contains(&self.h);
        self.vsync = !(vsync_start..vsync_start + V_SYNC).contains(&self.v);

        self.rgb = if self.h < H_VISIBLE && self.v < V_VISIBLE {
            self.pattern(self.h, self.v)
        } else {
            [0; 3]
        };
    }

    /// Colour of visible pixel (x, y).
    pub fn pattern(&self, x: u16, y: u16) -> [u8; 3] {
        let x = (x + self.scroll) % H_VISIBLE;

        let mut rgb = if self.key_held(KEY_GRADIENT) {
            let level = (x as u32 * 256 / H_VISIBLE as u32) as u8;
            [level; 3]
        } else {
            BARS[(x / BAR_WIDTH) as usize]
        };

        if self.key_held(KEY_CHECKER) && ((x / CHECKER_SIZE) ^ (y / CHECKER_SIZE)) & 1 == 1 {
            rgb = rgb.map(|c| c / 2);
        }

        if self.key_held(KEY_INVERT) {
            rgb = rgb.map(|c| !c);
        }

        rgb
    }
}

impl HardwareModel for VgaTestPattern {
    fn set_input(&mut self, pin: InputPin, value: u32) {
        match pin {
            InputPin::BusClock => self.clk_bus = value != 0,
            InputPin::PixelClock => self.clk_pix = value != 0,
            InputPin::Keys => self.keys_in = value as u8,
        }
    }

    fn output(&self, pin: OutputPin) -> u32 {
        match pin {
            OutputPin::Red => self.rgb[0] as u32,
            OutputPin::Green => self.rgb[1] as u32,
            OutputPin::Blue => self.rgb[2] as u32,
            OutputPin::VSync => self.vsync as u32,
        }
    }

    fn eval(&mut self, _ctx: &mut SimContext) {
        if self.clk_bus && !self.prev_bus {
            self.on_bus_rising();
        }
        if self.clk_pix && !self.prev_pix {
            self.on_pixel_rising();
        }
        self.prev_bus = self.clk_bus;
        self.prev_pix = self.clk_pix;
    }
}

// ---------------------------------------------------------------------------
// Model registry
// ---------------------------------------------------------------------------

fn create_model() -> Box<dyn HardwareModel> {
    Box::new(VgaTestPattern::new())
}

inventory::submit! {
    ModelEntry::new(
        "vga_test_pattern",
        "640x480@60 colour bars, F1-F4 invert/gradient/checker/scroll",
        create_model,
    )
}
