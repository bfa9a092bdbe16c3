#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Last known state of the keys the program cares about.
#[derive(Debug, Default)]
pub struct Input {
    escape_down: bool,
}

impl Input {
    pub fn update(&mut self, key: Key, state: KeyState) {
        match key {
            Key::Escape => self.escape_down = state == KeyState::Pressed,
        }
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        match key {
            Key::Escape => self.escape_down,
        }
    }
}
