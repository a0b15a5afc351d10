mod common;

use common::ScriptedInput;
use vgasim_core::input::{Binding, Control, InputBridge, InputEvent, InputMask, KeyBindings};

const KEY_A: u32 = 1;
const KEY_B: u32 = 2;
const KEY_C: u32 = 3;
const KEY_RESTART: u32 = 12;
const KEY_CAPTURE: u32 = 11;
const KEY_UNBOUND: u32 = 99;

fn bridge() -> InputBridge<u32> {
    let mut bindings = KeyBindings::new();
    bindings.bind(KEY_A, Binding::Button(0));
    bindings.bind(KEY_B, Binding::Button(1));
    bindings.bind(KEY_C, Binding::Button(3));
    bindings.bind(KEY_RESTART, Binding::Restart);
    bindings.bind(KEY_CAPTURE, Binding::Capture);
    InputBridge::new(bindings)
}

fn down(key: u32) -> InputEvent<u32> {
    InputEvent::KeyDown { key, repeat: false }
}

fn up(key: u32) -> InputEvent<u32> {
    InputEvent::KeyUp { key }
}

fn apply_all(events: &[InputEvent<u32>], mask: &mut InputMask) -> Control {
    let bridge = bridge();
    let mut control = Control::default();
    for &event in events {
        bridge.apply(event, mask, &mut control);
    }
    control
}

// ==========================================================================
// Mask
// ==========================================================================

#[test]
fn test_released_mask_is_all_ones() {
    assert_eq!(InputMask::released(4).value(), 0b1111);
    assert_eq!(InputMask::released(1).value(), 0b1);
    assert_eq!(InputMask::released(8).value(), 0xFF);
    assert_eq!(InputMask::released(0).value(), 0);
}

#[test]
fn test_press_clears_release_sets() {
    let mut mask = InputMask::released(4);
    mask.press(2);
    assert_eq!(mask.value(), 0b1011);
    assert!(mask.is_pressed(2));
    mask.release(2);
    assert_eq!(mask.value(), 0b1111);
    assert!(!mask.is_pressed(2));
}

#[test]
fn test_bits_outside_width_ignored() {
    let mut mask = InputMask::released(4);
    mask.press(5);
    assert_eq!(mask.value(), 0b1111);
    assert!(!mask.is_pressed(5));
}

// ==========================================================================
// Bridge
// ==========================================================================

#[test]
fn test_press_then_release_restores_mask() {
    for key in [KEY_A, KEY_B, KEY_C] {
        let mut mask = InputMask::released(4);
        let original = mask;
        apply_all(&[down(key)], &mut mask);
        assert_ne!(mask, original);
        apply_all(&[up(key)], &mut mask);
        assert_eq!(mask, original);
    }
}

#[test]
fn test_release_order_commutes() {
    let mut first = InputMask::released(4);
    apply_all(&[down(KEY_A), down(KEY_C), up(KEY_A), up(KEY_C)], &mut first);

    let mut second = InputMask::released(4);
    apply_all(&[down(KEY_A), down(KEY_C), up(KEY_C), up(KEY_A)], &mut second);

    assert_eq!(first, second);
    assert_eq!(first, InputMask::released(4));
}

#[test]
fn test_two_buttons_held_together() {
    let mut mask = InputMask::released(4);
    apply_all(&[down(KEY_B), down(KEY_C)], &mut mask);
    assert_eq!(mask.value(), 0b0101);
}

#[test]
fn test_repeat_key_down_is_ignored() {
    let mut mask = InputMask::released(4);
    apply_all(
        &[InputEvent::KeyDown {
            key: KEY_A,
            repeat: true,
        }],
        &mut mask,
    );
    assert_eq!(mask.value(), 0b1111);
}

#[test]
fn test_restart_fires_on_key_up_only() {
    let mut mask = InputMask::released(4);
    let control = apply_all(&[down(KEY_RESTART)], &mut mask);
    assert_eq!(control, Control::default());

    let control = apply_all(&[up(KEY_RESTART)], &mut mask);
    assert!(control.restart);
    assert!(control.quit);
    assert_eq!(mask.value(), 0b1111);
}

#[test]
fn test_quit_does_not_restart() {
    let mut mask = InputMask::released(4);
    let control = apply_all(&[InputEvent::Quit], &mut mask);
    assert!(control.quit);
    assert!(!control.restart);
}

#[test]
fn test_capture_on_key_up() {
    let mut mask = InputMask::released(4);
    let control = apply_all(&[down(KEY_CAPTURE), up(KEY_CAPTURE)], &mut mask);
    assert!(control.capture);
    assert!(!control.quit);
}

#[test]
fn test_unbound_keys_ignored() {
    let mut mask = InputMask::released(4);
    let control = apply_all(&[down(KEY_UNBOUND), up(KEY_UNBOUND)], &mut mask);
    assert_eq!(control, Control::default());
    assert_eq!(mask.value(), 0b1111);
}

#[test]
fn test_drain_consumes_whole_batch() {
    let mut input = ScriptedInput::new(vec![
        vec![down(KEY_A), down(KEY_B), up(KEY_A)],
        vec![InputEvent::Quit],
    ]);
    let bridge = bridge();
    let mut mask = InputMask::released(4);

    let control = bridge.drain(&mut input, &mut mask);
    assert_eq!(mask.value(), 0b1101);
    assert!(!control.quit);
    assert_eq!(input.remaining(), 1);

    let control = bridge.drain(&mut input, &mut mask);
    assert!(control.quit);
    assert_eq!(input.remaining(), 0);
}

#[test]
fn test_control_merge_is_sticky() {
    let mut control = Control::default();
    control.merge(Control {
        quit: true,
        restart: false,
        capture: false,
    });
    control.merge(Control::default());
    assert!(control.quit);
}
