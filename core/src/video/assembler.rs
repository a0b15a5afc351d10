/// Whether the vertical sync pulse is currently asserted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SyncState {
    #[default]
    OutsideVsync,
    InsideVsync,
}

/// Transition reported by [`FrameAssembler::observe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameEvent {
    /// The vsync pin went low.
    EnteredVsync,
    /// The vsync pin went high again: the buffer holds a complete frame and
    /// should be snapshotted before the current sample is written.
    FrameComplete,
}

/// One-bit edge detector over the vsync pin.
///
/// A pulse of any width produces one `EnteredVsync` and one `FrameComplete`.
/// Pulse width is not validated, so every glitch on the pin also counts as a
/// frame boundary.
#[derive(Debug, Default)]
pub struct FrameAssembler {
    state: SyncState,
    frame_started: bool,
    frames: u64,
}

impl FrameAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Frames completed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Consume the "new frame" marker. Returns true once after each
    /// `FrameComplete`, telling the decoder to write the current sample at
    /// the start of the buffer.
    pub fn take_frame_start(&mut self) -> bool {
        std::mem::take(&mut self.frame_started)
    }

    /// Feed the vsync pin level (active low) of the current sample, before
    /// the decoder writes it.
    pub fn observe(&mut self, vsync: bool) -> Option<FrameEvent> {
        match (self.state, vsync) {
            (SyncState::OutsideVsync, false) => {
                self.state = SyncState::InsideVsync;
                Some(FrameEvent::EnteredVsync)
            }
            (SyncState::InsideVsync, true) => {
                self.state = SyncState::OutsideVsync;
                self.frame_started = true;
                self.frames += 1;
                Some(FrameEvent::FrameComplete)
            }
            _ => None,
        }
    }
}
