use portal_core::MoveAxes;

/// What a single key press asks the camera to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Held movement key; read continuously through `KeyState::axes`.
    Move,
    Slot(usize),
    Warp(u32),
    ClearFocus,
    TogglePointerLock,
}

/// Preset slot for the digit row: `1`..`4` map to slots 0..3.
#[inline]
pub fn slot_for_digit(key: &str) -> Option<usize> {
    match key {
        "1" => Some(0),
        "2" => Some(1),
        "3" => Some(2),
        "4" => Some(3),
        _ => None,
    }
}

/// Warp target universe for the function-style keys.
#[inline]
pub fn universe_for_key(key: &str) -> Option<u32> {
    match key {
        "z" | "Z" => Some(0), // Canon
        "x" | "X" => Some(1), // Xen
        "c" | "C" => Some(2), // Nascent
        _ => None,
    }
}

#[inline]
fn is_movement_key(key: &str) -> bool {
    matches!(
        key,
        "w" | "W"
            | "a"
            | "A"
            | "s"
            | "S"
            | "d"
            | "D"
            | "q"
            | "Q"
            | "e"
            | "E"
            | "ArrowUp"
            | "ArrowDown"
            | "ArrowLeft"
            | "ArrowRight"
    )
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    if is_movement_key(key) {
        return Some(KeyAction::Move);
    }
    if let Some(slot) = slot_for_digit(key) {
        return Some(KeyAction::Slot(slot));
    }
    if let Some(universe) = universe_for_key(key) {
        return Some(KeyAction::Warp(universe));
    }
    match key {
        "Escape" => Some(KeyAction::ClearFocus),
        "l" | "L" => Some(KeyAction::TogglePointerLock),
        _ => None,
    }
}

/// Held movement keys, tracked across keydown/keyup pairs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl KeyState {
    fn flag(&mut self, key: &str) -> Option<&mut bool> {
        match key {
            "w" | "W" | "ArrowUp" => Some(&mut self.forward),
            "s" | "S" | "ArrowDown" => Some(&mut self.back),
            "a" | "A" | "ArrowLeft" => Some(&mut self.left),
            "d" | "D" | "ArrowRight" => Some(&mut self.right),
            "e" | "E" => Some(&mut self.up),
            "q" | "Q" => Some(&mut self.down),
            _ => None,
        }
    }

    /// Record a keydown. Returns the action for that key, if it has one.
    pub fn press(&mut self, key: &str) -> Option<KeyAction> {
        if let Some(flag) = self.flag(key) {
            *flag = true;
        }
        action_for_key(key)
    }

    pub fn release(&mut self, key: &str) {
        if let Some(flag) = self.flag(key) {
            *flag = false;
        }
    }

    /// Drop every held key, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Opposite keys cancel out.
    pub fn axes(&self) -> MoveAxes {
        let axis = |pos: bool, neg: bool| (pos as i8 - neg as i8) as f32;
        MoveAxes {
            forward: axis(self.forward, self.back),
            right: axis(self.right, self.left),
            up: axis(self.up, self.down),
        }
    }
}
