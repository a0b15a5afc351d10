//! Pin-level contract between the simulation core and a hardware model.
//!
//! The core never looks inside a model: it drives input pins, calls
//! [`HardwareModel::eval`] once per step, and reads output pins back. Any
//! cycle-level design (a translated netlist, a behavioral stand-in, a test
//! double) can be plugged in by implementing this trait.

/// Pins the core drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputPin {
    /// Primary clock for the model's sequential logic.
    BusClock,
    /// Video pixel clock.
    PixelClock,
    /// Active-low button mask (see [`crate::input::InputMask`]).
    Keys,
}

/// Pins the core samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputPin {
    Red,
    Green,
    Blue,
    /// Vertical sync, active low.
    VSync,
}

/// One read of the video output pins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VideoSample {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Raw vsync pin level: `false` while the sync pulse is asserted.
    pub vsync: bool,
}

/// Simulation-time context owned by a single session.
///
/// Time only moves forward. A model signals that it has run to completion
/// through [`SimContext::finish`]; the session controller observes the flag
/// at the top of its step loop.
#[derive(Debug, Default)]
pub struct SimContext {
    time: u64,
    finished: bool,
}

impl SimContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulation time in ticks.
    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn advance(&mut self, ticks: u64) {
        self.time += ticks;
    }

    /// Mark the simulation as complete.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    pub fn finished(&self) -> bool {
        self.finished
    }
}

/// A steppable hardware model exposed through its pins.
pub trait HardwareModel {
    /// Drive an input pin. The value persists until it is driven again.
    fn set_input(&mut self, pin: InputPin, value: u32);

    /// Read an output pin as of the last evaluation.
    fn output(&self, pin: OutputPin) -> u32;

    /// Evaluate the design once against the current input levels.
    fn eval(&mut self, ctx: &mut SimContext);

    /// Tear the model down at the end of its session.
    fn finalize(&mut self, _ctx: &mut SimContext) {}

    /// Read the colour and vsync pins in one go. Colour pins are 8 bits wide.
    fn video_out(&self) -> VideoSample {
        VideoSample {
            r: self.output(OutputPin::Red) as u8,
            g: self.output(OutputPin::Green) as u8,
            b: self.output(OutputPin::Blue) as u8,
            vsync: self.output(OutputPin::VSync) != 0,
        }
    }
}
