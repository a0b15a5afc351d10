pub mod clock;
pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod pacer;
pub mod session;
pub mod video;

pub mod prelude {
    pub use crate::clock::{ClockDriver, ClockState};
    pub use crate::config::{Resolution, SimConfig};
    pub use crate::error::SimError;
    pub use crate::input::{Binding, InputEvent, InputMask, InputSource, KeyBindings};
    pub use crate::model::{HardwareModel, InputPin, OutputPin, SimContext, VideoSample};
    pub use crate::session::{ExitReason, ModelFactory, RenderSink, Session, SessionController};
    pub use crate::video::{PresentLayout, PresentableFrame, copy_locked};
}
