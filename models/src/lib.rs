pub mod registry;
pub mod vga_test_pattern;
pub mod vsync_ramp;

pub use vga_test_pattern::VgaTestPattern;
pub use vsync_ramp::VsyncRamp;
