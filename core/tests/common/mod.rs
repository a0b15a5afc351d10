#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use vgasim_core::error::SimError;
use vgasim_core::input::{InputEvent, InputSource};
use vgasim_core::model::{HardwareModel, InputPin, OutputPin, SimContext};
use vgasim_core::session::RenderSink;
use vgasim_core::video::{PresentLayout, PresentableFrame, copy_locked};

// ==========================================================================
// Render sink
// ==========================================================================

/// Sink that keeps a copy of every uploaded frame and every present layout.
pub struct RecordingSink {
    pub frames: Vec<Vec<u8>>,
    pub presents: Vec<PresentLayout>,
    pub captures: u32,
    pub drawable: (u32, u32),
    /// Pitch reported by the "locked texture"; `None` reports width * 4.
    pub pitch: Option<usize>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            presents: Vec::new(),
            captures: 0,
            drawable: (1024, 768),
            pitch: None,
        }
    }

    pub fn with_pitch(pitch: usize) -> Self {
        Self {
            pitch: Some(pitch),
            ..Self::new()
        }
    }
}

impl RenderSink for RecordingSink {
    fn upload(&mut self, frame: &PresentableFrame<'_>) -> Result<(), SimError> {
        let mut texture = vec![0u8; frame.pixels().len()];
        let pitch = self.pitch.unwrap_or(frame.geometry().pitch());
        copy_locked(frame, &mut texture, pitch)?;
        self.frames.push(texture);
        Ok(())
    }

    fn drawable_size(&self) -> (u32, u32) {
        self.drawable
    }

    fn present(&mut self, layout: &PresentLayout) -> Result<(), SimError> {
        self.presents.push(*layout);
        Ok(())
    }

    fn capture(&mut self) -> Result<(), SimError> {
        self.captures += 1;
        Ok(())
    }
}

// ==========================================================================
// Input source
// ==========================================================================

/// Replays one batch of events per drain. An empty batch is an idle pass.
/// Once every batch is consumed the queue stays empty.
pub struct ScriptedInput {
    batches: VecDeque<VecDeque<InputEvent<u32>>>,
}

impl ScriptedInput {
    pub fn new(batches: Vec<Vec<InputEvent<u32>>>) -> Self {
        Self {
            batches: batches.into_iter().map(VecDeque::from).collect(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn remaining(&self) -> usize {
        self.batches.len()
    }
}

impl InputSource for ScriptedInput {
    type Key = u32;

    fn poll(&mut self) -> Option<InputEvent<u32>> {
        let batch = self.batches.front_mut()?;
        match batch.pop_front() {
            Some(event) => Some(event),
            None => {
                self.batches.pop_front();
                None
            }
        }
    }
}

// ==========================================================================
// Models
// ==========================================================================

/// Holds vsync low for `low_steps` simulation steps, then high for
/// `high_steps`, repeating. On every pixel-clock-high step the red channel
/// is set to the step index modulo 256.
pub struct RampModel {
    low_steps: u64,
    high_steps: u64,
    pixel: bool,
    red: u8,
    vsync: bool,
}

impl RampModel {
    pub fn new(low_steps: u64, high_steps: u64) -> Self {
        Self {
            low_steps,
            high_steps,
            pixel: false,
            red: 0,
            vsync: true,
        }
    }

    /// First step of `cycle`'s vsync-high phase on which both clocks are
    /// high, i.e. the step whose sample opens the next frame.
    pub fn first_high_sample(&self, cycle: u64) -> u64 {
        let start = cycle * (self.low_steps + self.high_steps) + self.low_steps;
        start + (7 - start % 4) % 4
    }
}

impl HardwareModel for RampModel {
    fn set_input(&mut self, pin: InputPin, value: u32) {
        if pin == InputPin::PixelClock {
            self.pixel = value != 0;
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
        let step = ctx.time() - 1;
        self.vsync = step % (self.low_steps + self.high_steps) >= self.low_steps;
        if self.pixel {
            self.red = step as u8;
        }
    }
}

/// What a [`TraceModel`] observed during its session.
#[derive(Debug, Default)]
pub struct TraceRecord {
    pub first_eval_time: Option<u64>,
    pub last_time: u64,
    pub keys_seen: Vec<u32>,
    pub evals: u64,
    pub finalized: bool,
}

pub type TraceLog = Rc<RefCell<Vec<TraceRecord>>>;

/// Records pin traffic into a shared log, one record per instance. Finishes
/// on its own after `limit` ticks so a script that never quits still ends.
pub struct TraceModel {
    log: TraceLog,
    index: usize,
    limit: u64,
    vsync_period: u64,
}

impl TraceModel {
    pub fn new(log: &TraceLog, limit: u64) -> Self {
        let mut records = log.borrow_mut();
        records.push(TraceRecord::default());
        Self {
            log: Rc::clone(log),
            index: records.len() - 1,
            limit,
            vsync_period: 64,
        }
    }

    fn with_record<R>(&self, f: impl FnOnce(&mut TraceRecord) -> R) -> R {
        f(&mut self.log.borrow_mut()[self.index])
    }
}

impl HardwareModel for TraceModel {
    fn set_input(&mut self, pin: InputPin, value: u32) {
        if pin == InputPin::Keys {
            self.with_record(|r| {
                if r.keys_seen.last() != Some(&value) {
                    r.keys_seen.push(value);
                }
            });
        }
    }

    fn output(&self, pin: OutputPin) -> u32 {
        match pin {
            // Short sync pulse every `vsync_period` ticks keeps frames flowing.
            OutputPin::VSync => self.with_record(|r| r.last_time % self.vsync_period >= 8) as u32,
            _ => 0x40,
        }
    }

    fn eval(&mut self, ctx: &mut SimContext) {
        let time = ctx.time();
        self.with_record(|r| {
            r.first_eval_time.get_or_insert(time);
            r.last_time = time;
            r.evals += 1;
        });
        if time >= self.limit {
            ctx.finish();
        }
    }

    fn finalize(&mut self, _ctx: &mut SimContext) {
        self.with_record(|r| r.finalized = true);
    }
}

/// Model with constant outputs and no behavior beyond counting evaluations.
#[derive(Default)]
pub struct StaticModel {
    pub rgb: [u8; 3],
    pub vsync: bool,
    pub evals: u64,
    pub bus: u32,
    pub pixel: u32,
    pub keys: u32,
}

impl HardwareModel for StaticModel {
    fn set_input(&mut self, pin: InputPin, value: u32) {
        match pin {
            InputPin::BusClock => self.bus = value,
            InputPin::PixelClock => self.pixel = value,
            InputPin::Keys => self.keys = value,
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
        self.evals += 1;
    }
}
