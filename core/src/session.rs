//! Session lifecycle and the main step loop.
//!
//! A [`Session`] owns one hardware-model instance together with its time
//! context, clock driver and signal-decoding state. The
//! [`SessionController`] owns everything that outlives a session: the pixel
//! buffer, the render sink and the input source. On a restart request it
//! finalizes the current session and builds a fresh one, leaving the sink and
//! buffer untouched.

use std::time::Instant;

use log::{debug, info, warn};

use crate::clock::{ClockDriver, ClockState};
use crate::config::SimConfig;
use crate::error::SimError;
use crate::input::{Control, InputBridge, InputMask, InputSource, KeyBindings};
use crate::model::{HardwareModel, InputPin, SimContext};
use crate::pacer::{ClockMeter, FramePacer};
use crate::video::{
    FrameAssembler, FrameEvent, PixelBuffer, PresentLayout, PresentableFrame, SignalDecoder,
};

/// Presentation backend.
///
/// The sink keeps its texture across sessions; [`RenderSink::upload`] replaces
/// the texture contents and [`RenderSink::present`] shows them.
pub trait RenderSink {
    /// Copy a completed frame into texture storage. Implementations should go
    /// through [`crate::video::copy_locked`] so the pitch check is shared.
    fn upload(&mut self, frame: &PresentableFrame<'_>) -> Result<(), SimError>;

    /// Size of the drawable surface in physical pixels.
    fn drawable_size(&self) -> (u32, u32);

    /// Clear the target, blit the texture into `layout.dest` and present.
    fn present(&mut self, layout: &PresentLayout) -> Result<(), SimError>;

    /// Save the most recently uploaded frame somewhere persistent.
    fn capture(&mut self) -> Result<(), SimError> {
        Ok(())
    }
}

/// Builds a fresh hardware-model instance for each session.
pub trait ModelFactory {
    fn create(&mut self) -> Box<dyn HardwareModel>;
}

impl<F> ModelFactory for F
where
    F: FnMut() -> Box<dyn HardwareModel>,
{
    fn create(&mut self) -> Box<dyn HardwareModel> {
        self()
    }
}

/// One lifetime of a model instance, from construction to finalize.
pub struct Session {
    ctx: SimContext,
    clock: ClockDriver,
    model: Box<dyn HardwareModel>,
    decoder: SignalDecoder,
    assembler: FrameAssembler,
    keys: InputMask,
}

impl Session {
    /// Start a session with both clocks low and every button released.
    pub fn new(mut model: Box<dyn HardwareModel>, input_bits: u8) -> Self {
        let keys = InputMask::released(input_bits);
        model.set_input(InputPin::BusClock, 0);
        model.set_input(InputPin::PixelClock, 0);
        model.set_input(InputPin::Keys, keys.value() as u32);

        Self {
            ctx: SimContext::new(),
            clock: ClockDriver::new(),
            model,
            decoder: SignalDecoder::new(),
            assembler: FrameAssembler::new(),
            keys,
        }
    }

    /// Simulation time in ticks.
    pub fn time(&self) -> u64 {
        self.ctx.time()
    }

    /// True once the model has reported completion.
    pub fn finished(&self) -> bool {
        self.ctx.finished()
    }

    pub fn keys(&self) -> InputMask {
        self.keys
    }

    pub fn decoder(&self) -> &SignalDecoder {
        &self.decoder
    }

    pub fn assembler(&self) -> &FrameAssembler {
        &self.assembler
    }

    /// Replace the button mask and drive it onto the model.
    pub fn set_keys(&mut self, keys: InputMask) {
        if keys != self.keys {
            self.keys = keys;
            self.model.set_input(InputPin::Keys, keys.value() as u32);
        }
    }

    /// One clock step, followed by frame assembly and decode when both clocks
    /// are high. The vsync level is checked before the sample is written, so
    /// a completed frame is uploaded to `sink` intact and the sample that
    /// ends the pulse becomes pixel 0 of the next frame.
    pub fn step(
        &mut self,
        buffer: &mut PixelBuffer,
        sink: &mut dyn RenderSink,
    ) -> Result<ClockState, SimError> {
        let clocks = self.clock.step(self.model.as_mut(), &mut self.ctx);
        if !clocks.samples_video() {
            return Ok(clocks);
        }

        let sample = self.model.video_out();
        match self.assembler.observe(sample.vsync) {
            Some(FrameEvent::EnteredVsync) => {
                debug!("vsync asserted at t={}", self.ctx.time());
            }
            Some(FrameEvent::FrameComplete) => {
                debug!(
                    "frame {} complete at t={}, cursor wraps so far: {}",
                    self.assembler.frames(),
                    self.ctx.time(),
                    self.decoder.wraps()
                );
                sink.upload(&PresentableFrame::snapshot(buffer))?;
            }
            None => {}
        }

        let frame_started = self.assembler.take_frame_start();
        self.decoder.sample(buffer, sample, frame_started);

        Ok(clocks)
    }

    /// Tear the model down. Consumes the session.
    pub fn finalize(mut self) {
        self.model.finalize(&mut self.ctx);
    }
}

/// Two-state lifecycle of the controller's outer loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    RestartRequested,
}

/// Why [`SessionController::run`] returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitReason {
    /// Quit requested through the input source.
    Quit,
    /// The model reported completion.
    Finished,
}

enum SessionEnd {
    Exit(ExitReason),
    Restart,
}

/// Owns the process-lifetime resources and runs sessions back to back.
pub struct SessionController<F, S, I: InputSource> {
    config: SimConfig,
    factory: F,
    sink: S,
    input: I,
    bridge: InputBridge<I::Key>,
    buffer: PixelBuffer,
    sessions: u64,
}

impl<F, S, I> SessionController<F, S, I>
where
    F: ModelFactory,
    S: RenderSink,
    I: InputSource,
{
    pub fn new(
        config: SimConfig,
        factory: F,
        sink: S,
        input: I,
        bindings: KeyBindings<I::Key>,
    ) -> Self {
        let buffer = PixelBuffer::new(config.video);
        Self {
            config,
            factory,
            sink,
            input,
            bridge: InputBridge::new(bindings),
            buffer,
            sessions: 0,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Sessions started so far, including the current one.
    pub fn sessions_started(&self) -> u64 {
        self.sessions
    }

    /// Run sessions until one ends with a quit request or model completion.
    /// The config is validated first; nothing is stepped if it is rejected.
    pub fn run(&mut self) -> Result<ExitReason, SimError> {
        self.config.validate()?;

        let mut state = RunState::Running;
        loop {
            if state == RunState::RestartRequested {
                info!("restarting model");
            }

            let mut session = Session::new(self.factory.create(), self.config.input_bits);
            self.sessions += 1;
            info!("session {} started", self.sessions);

            let end = self.run_session(&mut session);
            session.finalize();

            match end? {
                SessionEnd::Restart => state = RunState::RestartRequested,
                SessionEnd::Exit(reason) => {
                    info!("session {} ended: {reason:?}", self.sessions);
                    return Ok(reason);
                }
            }
        }
    }

    fn run_session(&mut self, session: &mut Session) -> Result<SessionEnd, SimError> {
        let start = Instant::now();
        let mut pacer = FramePacer::new(self.config.present_interval(), start);
        let mut meter = ClockMeter::new(self.config.clock_sample_interval, start);
        let mut control = Control::default();

        while !session.finished() && !control.quit {
            let clocks = session.step(&mut self.buffer, &mut self.sink)?;
            if !clocks.bus {
                continue;
            }

            let now = Instant::now();
            meter.observe(session.time(), now);

            if pacer.gate(now) {
                let mut keys = session.keys();
                control.merge(self.bridge.drain(&mut self.input, &mut keys));
                session.set_keys(keys);

                if std::mem::take(&mut control.capture)
                    && let Err(e) = self.sink.capture()
                {
                    warn!("{e}");
                }

                // Counted from the first pass, so the first present logs too.
                let frame = pacer.presented() - 1;
                self.present(frame, &meter)?;
            }
        }

        if control.restart {
            Ok(SessionEnd::Restart)
        } else if control.quit {
            Ok(SessionEnd::Exit(ExitReason::Quit))
        } else {
            Ok(SessionEnd::Exit(ExitReason::Finished))
        }
    }

    fn present(&mut self, frame: u64, meter: &ClockMeter) -> Result<(), SimError> {
        let layout =
            PresentLayout::compute(self.sink.drawable_size(), self.config.display, self.config.video);

        let interval = self.config.log_interval_frames;
        if interval != 0
            && frame % interval == 0
            && let Some(mhz) = meter.mhz()
        {
            info!("clock speed: {mhz:.3} MHz");
        }

        self.sink.present(&layout)
    }
}
