//! Translation of discrete key events into the model's button pin.
//!
//! Buttons are active low: a released button reads 1, a pressed button 0.
//! Keys are generic so the core stays independent of any windowing backend;
//! frontends bind their own key codes through [`KeyBindings`].

use std::collections::HashMap;
use std::hash::Hash;

/// Discrete event delivered by an [`InputSource`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent<K> {
    /// Window closed or the user asked to quit.
    Quit,
    KeyDown { key: K, repeat: bool },
    KeyUp { key: K },
}

/// Non-blocking event queue.
pub trait InputSource {
    type Key: Copy + Eq + Hash;

    /// Next pending event, or `None` once the queue is empty.
    fn poll(&mut self) -> Option<InputEvent<Self::Key>>;
}

/// Active-low button mask driven onto [`crate::model::InputPin::Keys`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputMask {
    value: u8,
    width: u8,
}

impl InputMask {
    /// All `width` buttons released (every bit set).
    pub fn released(width: u8) -> Self {
        assert!(width <= 8, "input mask is at most 8 bits wide");
        let value = if width == 8 { 0xFF } else { (1u8 << width) - 1 };
        Self { value, width }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    /// Clear a button's bit. Bits outside the mask width are ignored.
    pub fn press(&mut self, bit: u8) {
        if bit < self.width {
            self.value &= !(1 << bit);
        }
    }

    /// Set a button's bit back to 1.
    pub fn release(&mut self, bit: u8) {
        if bit < self.width {
            self.value |= 1 << bit;
        }
    }

    pub fn is_pressed(&self, bit: u8) -> bool {
        bit < self.width && self.value & (1 << bit) == 0
    }
}

/// What a bound key does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Binding {
    /// Drives one bit of the button mask.
    Button(u8),
    /// Tears the session down and starts a fresh one on release.
    Restart,
    /// Saves the latest frame on release.
    Capture,
}

/// Maps backend key codes to bindings.
#[derive(Debug)]
pub struct KeyBindings<K> {
    map: HashMap<K, Binding>,
}

impl<K: Copy + Eq + Hash> KeyBindings<K> {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Bind a key, replacing any previous binding for it.
    pub fn bind(&mut self, key: K, binding: Binding) {
        self.map.insert(key, binding);
    }

    pub fn get(&self, key: K) -> Option<Binding> {
        self.map.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<K: Copy + Eq + Hash> Default for KeyBindings<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Requests accumulated while draining one batch of events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Control {
    pub quit: bool,
    pub restart: bool,
    pub capture: bool,
}

impl Control {
    /// Fold another batch of requests into this one.
    pub fn merge(&mut self, other: Control) {
        self.quit |= other.quit;
        self.restart |= other.restart;
        self.capture |= other.capture;
    }
}

pub struct InputBridge<K> {
    bindings: KeyBindings<K>,
}

impl<K: Copy + Eq + Hash> InputBridge<K> {
    pub fn new(bindings: KeyBindings<K>) -> Self {
        Self { bindings }
    }

    pub fn bindings(&self) -> &KeyBindings<K> {
        &self.bindings
    }

    /// Apply a single event to the mask, recording any requests in `control`.
    pub fn apply(&self, event: InputEvent<K>, mask: &mut InputMask, control: &mut Control) {
        match event {
            InputEvent::Quit => control.quit = true,

            InputEvent::KeyDown { repeat: true, .. } => {}

            InputEvent::KeyDown { key, repeat: false } => match self.bindings.get(key) {
                Some(Binding::Button(bit)) => mask.press(bit),
                Some(Binding::Restart) => log::info!("reset requested"),
                Some(Binding::Capture) | None => {}
            },

            InputEvent::KeyUp { key } => match self.bindings.get(key) {
                Some(Binding::Button(bit)) => mask.release(bit),
                Some(Binding::Restart) => {
                    control.quit = true;
                    control.restart = true;
                }
                Some(Binding::Capture) => control.capture = true,
                None => {}
            },
        }
    }

    /// Drain every pending event from `source`.
    pub fn drain<S>(&self, source: &mut S, mask: &mut InputMask) -> Control
    where
        S: InputSource<Key = K> + ?Sized,
    {
        let mut control = Control::default();
        while let Some(event) = source.poll() {
            self.apply(event, mask, &mut control);
        }
        control
    }
}
