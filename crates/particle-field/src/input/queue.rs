/// Input events the field reacts to, in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The pointer moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// A click landed at (x, y).
    Click { x: f32, y: f32 },
    /// The viewport changed size.
    Resize { width: f32, height: f32 },
}

/// A queue of input events.
/// Handlers push as events arrive; the runner drains it at the start of each frame.
#[derive(Debug)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Move every event from `other` to the back of this queue.
    pub fn append(&mut self, other: &mut InputQueue) {
        self.events.append(&mut other.events);
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
