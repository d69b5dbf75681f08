// Host-side tests for the pure key mapping.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod keys {
    include!("../src/keys.rs");
}

use keys::*;
use portal_core::MoveAxes;

#[test]
fn digit_row_selects_preset_slots() {
    assert_eq!(slot_for_digit("1"), Some(0));
    assert_eq!(slot_for_digit("4"), Some(3));
    assert_eq!(slot_for_digit("5"), None);
    assert_eq!(slot_for_digit("0"), None);
    assert_eq!(action_for_key("2"), Some(KeyAction::Slot(1)));
}

#[test]
fn warp_keys_cover_every_universe() {
    assert_eq!(universe_for_key("z"), Some(0));
    assert_eq!(universe_for_key("X"), Some(1));
    assert_eq!(universe_for_key("c"), Some(2));
    assert_eq!(universe_for_key("v"), None);
    assert_eq!(action_for_key("x"), Some(KeyAction::Warp(1)));
}

#[test]
fn misc_keys_map_to_actions() {
    assert_eq!(action_for_key("Escape"), Some(KeyAction::ClearFocus));
    assert_eq!(action_for_key("L"), Some(KeyAction::TogglePointerLock));
    assert_eq!(action_for_key("w"), Some(KeyAction::Move));
    assert_eq!(action_for_key("ArrowLeft"), Some(KeyAction::Move));
    assert_eq!(action_for_key("?"), None);
}

#[test]
fn held_keys_build_movement_axes() {
    let mut state = KeyState::default();
    assert!(state.axes().is_zero());

    state.press("w");
    state.press("D");
    state.press("e");
    assert_eq!(
        state.axes(),
        MoveAxes {
            forward: 1.0,
            right: 1.0,
            up: 1.0
        }
    );

    // Opposite keys cancel
    state.press("s");
    assert_eq!(state.axes().forward, 0.0);

    state.release("w");
    assert_eq!(state.axes().forward, -1.0);

    state.clear();
    assert!(state.axes().is_zero());
}

#[test]
fn arrows_alias_wasd() {
    let mut state = KeyState::default();
    state.press("ArrowUp");
    state.press("ArrowLeft");
    let axes = state.axes();
    assert_eq!(axes.forward, 1.0);
    assert_eq!(axes.right, -1.0);
    state.release("w");
    assert_eq!(state.axes().forward, 0.0);
}

#[test]
fn non_movement_keys_leave_axes_alone() {
    let mut state = KeyState::default();
    assert_eq!(state.press("3"), Some(KeyAction::Slot(2)));
    assert_eq!(state.press("z"), Some(KeyAction::Warp(0)));
    assert_eq!(state, KeyState::default());
}
