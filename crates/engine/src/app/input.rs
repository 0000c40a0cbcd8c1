/// Held (level-triggered) actions. Edge-triggered presses live on the snapshot itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
}

const ACTION_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub(crate) fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub(crate) fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }
}

impl InputAction {
    const fn index(self) -> usize {
        match self {
            InputAction::MoveUp => 0,
            InputAction::MoveDown => 1,
            InputAction::MoveLeft => 2,
            InputAction::MoveRight => 3,
        }
    }
}

/// Tracks one physical button and latches a pressed edge until the next tick consumes it.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct EdgeLatch {
    is_down: bool,
    pressed_edge: bool,
}

impl EdgeLatch {
    pub(crate) fn handle(&mut self, is_pressed: bool) {
        if is_pressed {
            if !self.is_down {
                self.pressed_edge = true;
            }
            self.is_down = true;
        } else {
            self.is_down = false;
        }
    }

    pub(crate) fn take(&mut self) -> bool {
        std::mem::take(&mut self.pressed_edge)
    }
}
