use glam::Vec3;
use portal_core::{ControllerEvent, InputSnapshot, Intent, MoveAxes};
use std::collections::VecDeque;

/// Oldest events are dropped past this many undrained entries.
pub const EVENT_LOG_CAPACITY: usize = 64;

/// Navigation desires the page or the keyboard raised, carried between frames.
///
/// Focus and slot persist until replaced or released. A warp request is
/// one-shot; queuing a warp also releases any focus or slot lock so the
/// camera does not glide back after it lands. When several warps are
/// requested before the next frame the latest one wins.
#[derive(Clone, Debug, Default)]
pub struct FrameDesires {
    focus: Option<String>,
    slot: Option<usize>,
    warp: Option<u32>,
    look_direction: Option<Vec3>,
    pointer_locked: bool,
}

impl FrameDesires {
    pub fn set_focus(&mut self, id: Option<String>) {
        self.slot = None;
        self.focus = id;
    }

    pub fn set_slot(&mut self, index: Option<usize>) {
        self.focus = None;
        self.slot = index;
    }

    pub fn release(&mut self) {
        self.focus = None;
        self.slot = None;
    }

    pub fn request_warp(&mut self, universe: u32) {
        self.release();
        self.warp = Some(universe);
    }

    /// A zero vector clears the look direction.
    pub fn set_look_direction(&mut self, dir: Vec3) {
        self.look_direction = dir.try_normalize();
    }

    pub fn set_pointer_locked(&mut self, locked: bool) {
        self.pointer_locked = locked;
    }

    pub fn toggle_pointer_lock(&mut self) {
        self.pointer_locked = !self.pointer_locked;
    }

    /// Input for this frame. Consumes the pending warp request.
    pub fn snapshot(&mut self, movement: MoveAxes) -> InputSnapshot {
        InputSnapshot {
            movement,
            look_direction: self.look_direction,
            focus_entity_id: self.focus.clone(),
            active_slot_index: self.slot,
            warp_request: self.warp.take(),
            pointer_locked: self.pointer_locked,
        }
    }

    /// Manual flight releases any lock so it does not resume when keys go up.
    pub fn after_frame(&mut self, intent: &Intent, movement: MoveAxes) {
        if *intent == Intent::FreeFly && !movement.is_zero() {
            self.release();
        }
    }
}

pub fn describe(event: &ControllerEvent) -> String {
    match event {
        ControllerEvent::WarpStarted { target_universe } => format!("warp-started:{target_universe}"),
        ControllerEvent::WarpCompleted { target_universe } => {
            format!("warp-completed:{target_universe}")
        }
        ControllerEvent::WarpCancelled {
            target_universe,
            progress,
        } => format!("warp-cancelled:{target_universe}:{progress:.3}"),
        ControllerEvent::WarpRejected { target_universe } => {
            format!("warp-rejected:{target_universe}")
        }
        ControllerEvent::FocusUnresolved(id) => format!("focus-unresolved:{id}"),
        ControllerEvent::SlotIgnored(index) => format!("slot-ignored:{index}"),
    }
}

/// Bounded queue of `kind:detail` event strings waiting for the page.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    entries: VecDeque<String>,
}

impl EventLog {
    pub fn push(&mut self, event: &ControllerEvent) {
        if self.entries.len() == EVENT_LOG_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(describe(event));
    }

    pub fn drain(&mut self) -> impl Iterator<Item = String> + '_ {
        self.entries.drain(..)
    }
}
