use std::path::{Path, PathBuf};

use anyhow::Context;
use log::info;
use sdl2::pixels::{Color, PixelFormatEnum};
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use vgasim_core::config::Resolution;
use vgasim_core::error::SimError;
use vgasim_core::session::RenderSink;
use vgasim_core::video::{PresentLayout, PresentableFrame, copy_locked};

use crate::capture;

/// SDL renderer plus one streaming RGBA texture sized to the video buffer.
pub struct SdlSink<'t> {
    canvas: Canvas<Window>,
    texture: Texture<'t>,
    geometry: Resolution,
    last_frame: Vec<u8>,
    capture_dir: PathBuf,
}

impl<'t> SdlSink<'t> {
    pub fn new(
        canvas: Canvas<Window>,
        texture_creator: &'t TextureCreator<WindowContext>,
        geometry: Resolution,
        capture_dir: &Path,
    ) -> anyhow::Result<Self> {
        let texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::RGBA32, geometry.width, geometry.height)
            .context("failed to create video texture")?;

        Ok(Self {
            canvas,
            texture,
            geometry,
            last_frame: Vec::with_capacity(geometry.frame_bytes()),
            capture_dir: capture_dir.to_path_buf(),
        })
    }
}

impl RenderSink for SdlSink<'_> {
    fn upload(&mut self, frame: &PresentableFrame<'_>) -> Result<(), SimError> {
        self.texture
            .with_lock(None, |dst, pitch| copy_locked(frame, dst, pitch))
            .map_err(SimError::Sink)??;

        self.last_frame.clear();
        self.last_frame.extend_from_slice(frame.pixels());
        Ok(())
    }

    fn drawable_size(&self) -> (u32, u32) {
        self.canvas.window().drawable_size()
    }

    fn present(&mut self, layout: &PresentLayout) -> Result<(), SimError> {
        self.canvas.set_draw_color(Color::RGB(0, 0, 0));
        self.canvas.clear();

        let dest = layout.dest;
        if dest.w > 0 && dest.h > 0 {
            let rect = sdl2::rect::Rect::new(dest.x, dest.y, dest.w, dest.h);
            self.canvas
                .copy(&self.texture, None, rect)
                .map_err(SimError::Sink)?;
        }

        self.canvas.present();
        Ok(())
    }

    fn capture(&mut self) -> Result<(), SimError> {
        if self.last_frame.is_empty() {
            return Err(SimError::Capture("no frame has been completed yet".to_string()));
        }
        let path = capture::capture_path(&self.capture_dir);
        capture::write_png(&path, self.geometry, &self.last_frame)?;
        info!("frame captured to {}", path.display());
        Ok(())
    }
}
