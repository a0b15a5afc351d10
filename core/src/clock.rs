use crate::model::{HardwareModel, InputPin, SimContext};

/// Clock pin levels driven during one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClockState {
    /// Bus clock: bit 0 of the step counter (period 2 steps).
    pub bus: bool,
    /// Pixel clock: bit 1 of the step counter (period 4 steps).
    pub pixel: bool,
}

impl ClockState {
    /// Derive both clock levels from a step counter value.
    pub const fn from_counter(counter: u64) -> Self {
        Self {
            bus: counter & 0x1 != 0,
            pixel: counter & 0x2 != 0,
        }
    }

    /// True when the video outputs are sampled: both clocks high at once.
    ///
    /// This is a level check, not a rising edge, so it holds for exactly one
    /// step out of every four.
    pub const fn samples_video(&self) -> bool {
        self.bus && self.pixel
    }
}

/// Drives the bus and pixel clock pins of a model, one half-edge per step.
#[derive(Debug, Default)]
pub struct ClockDriver {
    counter: u64,
}

impl ClockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of steps taken so far.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Advance one step: drive the clock pins, move simulation time forward by
    /// one tick and evaluate the model once. Returns the levels just driven.
    pub fn step(&mut self, model: &mut dyn HardwareModel, ctx: &mut SimContext) -> ClockState {
        let state = ClockState::from_counter(self.counter);
        model.set_input(InputPin::BusClock, state.bus as u32);
        model.set_input(InputPin::PixelClock, state.pixel as u32);
        ctx.advance(1);
        model.eval(ctx);
        self.counter += 1;
        state
    }
}
