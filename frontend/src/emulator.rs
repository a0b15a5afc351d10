use std::path::Path;

use anyhow::{Context, anyhow};
use sdl2::keyboard::Keycode;
use vgasim_core::config::SimConfig;
use vgasim_core::input::KeyBindings;
use vgasim_core::session::{ExitReason, SessionController};
use vgasim_models::registry::ModelEntry;

use crate::input::SdlInput;
use crate::video::SdlSink;

/// Open the window and texture, then hand control to the session controller
/// until the user quits or the model finishes.
///
/// The window, renderer and texture are created once here and survive every
/// model restart.
pub fn run(
    entry: &'static ModelEntry,
    config: SimConfig,
    bindings: KeyBindings<Keycode>,
    capture_dir: &Path,
) -> anyhow::Result<ExitReason> {
    let sdl_context = sdl2::init().map_err(|e| anyhow!("failed to initialize SDL2: {e}"))?;
    let sdl_video = sdl_context
        .video()
        .map_err(|e| anyhow!("failed to init SDL video: {e}"))?;

    let window = sdl_video
        .window("vgasim", config.display.width, config.display.height)
        .position_centered()
        .build()
        .context("failed to create window")?;

    let canvas = window
        .into_canvas()
        .accelerated()
        .build()
        .context("failed to create canvas")?;

    let texture_creator = canvas.texture_creator();
    let sink = SdlSink::new(canvas, &texture_creator, config.video, capture_dir)?;

    let event_pump = sdl_context
        .event_pump()
        .map_err(|e| anyhow!("failed to get event pump: {e}"))?;
    let input = SdlInput::new(event_pump);

    let mut controller = SessionController::new(config, entry.create, sink, input, bindings);
    let reason = controller.run()?;
    Ok(reason)
}
