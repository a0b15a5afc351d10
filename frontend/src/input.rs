use anyhow::{anyhow, bail};
use sdl2::EventPump;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use vgasim_core::input::{Binding, InputEvent, InputSource, KeyBindings};

use crate::config::KeyConfig;

/// SDL event queue as an [`InputSource`].
pub struct SdlInput {
    pump: EventPump,
}

impl SdlInput {
    pub fn new(pump: EventPump) -> Self {
        Self { pump }
    }
}

impl InputSource for SdlInput {
    type Key = Keycode;

    fn poll(&mut self) -> Option<InputEvent<Keycode>> {
        // Events with no key meaning are skipped, not reported as an empty queue.
        while let Some(event) = self.pump.poll_event() {
            match event {
                Event::Quit { .. } => return Some(InputEvent::Quit),

                Event::KeyDown {
                    keycode: Some(key),
                    repeat,
                    ..
                } => return Some(InputEvent::KeyDown { key, repeat }),

                Event::KeyUp {
                    keycode: Some(key), ..
                } => return Some(InputEvent::KeyUp { key }),

                _ => {}
            }
        }
        None
    }
}

/// Resolve configured SDL key names into bindings. Button `i` in
/// `keys.buttons` drives bit `i` of the button pin.
pub fn key_bindings(keys: &KeyConfig, input_bits: u8) -> anyhow::Result<KeyBindings<Keycode>> {
    if keys.buttons.len() > input_bits as usize {
        bail!(
            "{} button keys configured but the button pin is only {input_bits} bits wide",
            keys.buttons.len()
        );
    }

    let mut bindings = KeyBindings::new();
    for (bit, name) in keys.buttons.iter().enumerate() {
        bindings.bind(lookup(name)?, Binding::Button(bit as u8));
    }
    bindings.bind(lookup(&keys.restart)?, Binding::Restart);
    bindings.bind(lookup(&keys.capture)?, Binding::Capture);
    Ok(bindings)
}

fn lookup(name: &str) -> anyhow::Result<Keycode> {
    Keycode::from_name(name).ok_or_else(|| anyhow!("unknown key name `{name}`"))
}
