use crate::keys::{KeyAction, KeyState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// One-shot requests raised by key presses, drained by the session each frame.
#[derive(Clone, Debug, Default)]
pub struct PendingKeys {
    pub keys: KeyState,
    pub slot: Option<usize>,
    pub warp: Option<u32>,
    pub clear_focus: bool,
    pub toggle_pointer_lock: bool,
}

pub fn handle_keydown(ev: &web::KeyboardEvent, pending: &Rc<RefCell<PendingKeys>>) {
    if ev.repeat() {
        return;
    }
    let key = ev.key();
    let mut p = pending.borrow_mut();
    match p.keys.press(&key) {
        Some(KeyAction::Move) => {
            if key.starts_with("Arrow") {
                ev.prevent_default();
            }
        }
        Some(KeyAction::Slot(index)) => {
            log::info!("[keys] slot {}", index);
            p.slot = Some(index);
        }
        Some(KeyAction::Warp(universe)) => {
            log::info!("[keys] warp -> {}", universe);
            p.warp = Some(universe);
        }
        Some(KeyAction::ClearFocus) => p.clear_focus = true,
        Some(KeyAction::TogglePointerLock) => p.toggle_pointer_lock = true,
        None => {}
    }
}

pub fn wire_keyboard(pending: Rc<RefCell<PendingKeys>>) {
    let Some(window) = web::window() else {
        log::warn!("[keys] no window; keyboard input disabled");
        return;
    };

    let down_pending = pending.clone();
    let keydown = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_keydown(&ev, &down_pending);
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());
    keydown.forget();

    let up_pending = pending.clone();
    let keyup = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        up_pending.borrow_mut().keys.release(&ev.key());
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref());
    keyup.forget();

    // Keys released while the tab is hidden never fire keyup
    let blur = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
        pending.borrow_mut().keys.clear();
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("blur", blur.as_ref().unchecked_ref());
    blur.forget();
}
