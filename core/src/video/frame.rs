use crate::config::Resolution;
use crate::error::SimError;
use crate::video::buffer::PixelBuffer;

/// Immutable view of a complete pixel buffer taken at a frame boundary.
///
/// Handed to a render sink for the duration of one upload; the sink copies
/// whatever it needs to keep.
#[derive(Clone, Copy)]
pub struct PresentableFrame<'a> {
    geometry: Resolution,
    pixels: &'a [u8],
}

impl<'a> PresentableFrame<'a> {
    pub fn snapshot(buffer: &'a PixelBuffer) -> Self {
        Self {
            geometry: buffer.geometry(),
            pixels: buffer.as_bytes(),
        }
    }

    pub fn geometry(&self) -> Resolution {
        self.geometry
    }

    /// RGBA bytes, rows of `width * 4` bytes, top to bottom.
    pub fn pixels(&self) -> &'a [u8] {
        self.pixels
    }

    /// One row of RGBA bytes.
    pub fn row(&self, y: u32) -> &'a [u8] {
        let pitch = self.geometry.pitch();
        let start = y as usize * pitch;
        &self.pixels[start..start + pitch]
    }

    /// RGBA value of a single pixel.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let offset = y as usize * self.geometry.pitch() + x as usize * 4;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.pixels[offset..offset + 4]);
        rgba
    }
}

/// Copy a frame into a locked texture region.
///
/// The region must be tightly packed: a `pitch` other than `width * 4` means
/// the configured geometry does not match the texture, which is fatal.
pub fn copy_locked(
    frame: &PresentableFrame<'_>,
    dst: &mut [u8],
    pitch: usize,
) -> Result<(), SimError> {
    let expected = frame.geometry().pitch();
    if pitch != expected {
        return Err(SimError::PitchMismatch {
            expected,
            actual: pitch,
        });
    }

    let src = frame.pixels();
    if dst.len() < src.len() {
        return Err(SimError::RegionTooSmall {
            expected: src.len(),
            actual: dst.len(),
        });
    }

    dst[..src.len()].copy_from_slice(src);
    Ok(())
}
