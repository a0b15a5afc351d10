pub mod assembler;
pub mod buffer;
pub mod decoder;
pub mod frame;
pub mod layout;

pub use assembler::{FrameAssembler, FrameEvent, SyncState};
pub use buffer::PixelBuffer;
pub use decoder::SignalDecoder;
pub use frame::{PresentableFrame, copy_locked};
pub use layout::{PresentLayout, Rect};
