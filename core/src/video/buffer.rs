use crate::config::Resolution;

/// Raw RGBA capture buffer, one 4-byte slot per sampled pixel clock.
///
/// The buffer outlives every session: a restart rebuilds the model and its
/// time context but keeps writing into the same storage.
pub struct PixelBuffer {
    geometry: Resolution,
    bytes: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a zeroed buffer of `width * height * 4` bytes.
    pub fn new(geometry: Resolution) -> Self {
        Self {
            geometry,
            bytes: vec![0; geometry.frame_bytes()],
        }
    }

    pub fn geometry(&self) -> Resolution {
        self.geometry
    }

    /// Capacity in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Store one pixel at a byte offset. `offset` must be 4-aligned and less
    /// than the capacity.
    pub(crate) fn put_rgba(&mut self, offset: usize, rgba: [u8; 4]) {
        self.bytes[offset..offset + 4].copy_from_slice(&rgba);
    }
}
