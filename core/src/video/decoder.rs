use crate::model::VideoSample;
use crate::video::buffer::PixelBuffer;

/// Fully opaque alpha written with every sample.
const ALPHA_OPAQUE: u8 = 255;

/// Turns pixel-clock samples into consecutive RGBA slots of a [`PixelBuffer`].
///
/// The decoder has no notion of "pixel valid": every call writes one sample.
/// The caller only invokes it on steps where both clocks are high, which must
/// match the cadence at which the design emits pixels.
#[derive(Debug, Default)]
pub struct SignalDecoder {
    cursor: usize,
    wrapped: bool,
    wraps: u64,
}

impl SignalDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Byte offset the next sample will be written at.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of samples written over the start of the buffer without a frame
    /// boundary in between. Non-zero means the configured geometry is smaller
    /// than the design's frame.
    pub fn wraps(&self) -> u64 {
        self.wraps
    }

    /// Write one sample. When `frame_started` is set the cursor first returns
    /// to the start of the buffer.
    pub fn sample(&mut self, buffer: &mut PixelBuffer, sample: VideoSample, frame_started: bool) {
        if frame_started {
            self.cursor = 0;
        } else if self.wrapped {
            self.wraps += 1;
        }
        self.wrapped = false;

        buffer.put_rgba(self.cursor, [sample.r, sample.g, sample.b, ALPHA_OPAQUE]);

        self.cursor += 4;
        if self.cursor >= buffer.len() {
            self.cursor %= buffer.len();
            self.wrapped = true;
        }
    }
}
