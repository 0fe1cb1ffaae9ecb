/// Mouse button reported with pointer-down and click events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
    Other(u16),
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` value.
    pub fn from_dom(button: u16) -> Self {
        match button {
            0 => Self::Primary,
            1 => Self::Middle,
            2 => Self::Secondary,
            other => Self::Other(other),
        }
    }

    pub fn is_primary(self) -> bool {
        self == Self::Primary
    }
}

/// Keys the scenes care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other(String),
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Self::Escape,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Input event types forwarded by the page.
/// Pointer positions are normalized device coordinates in [-1, 1], Y up.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32, button: PointerButton },
    PointerMove { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    PointerLeave,
    Click { x: f32, y: f32, button: PointerButton },
    KeyDown { key: Key },
    /// The container element changed size (CSS pixels).
    Resize { width: f32, height: f32 },
    /// `fullscreenchange` fired; `active` mirrors `document.fullscreenElement`.
    FullscreenChanged { active: bool },
}

impl InputEvent {
    pub fn kind(&self) -> InputKind {
        match self {
            Self::PointerDown { .. } => InputKind::PointerDown,
            Self::PointerMove { .. } => InputKind::PointerMove,
            Self::PointerUp { .. } => InputKind::PointerUp,
            Self::PointerLeave => InputKind::PointerLeave,
            Self::Click { .. } => InputKind::Click,
            Self::KeyDown { .. } => InputKind::KeyDown,
            Self::Resize { .. } => InputKind::Resize,
            Self::FullscreenChanged { .. } => InputKind::FullscreenChanged,
        }
    }
}

/// Discriminant of [`InputEvent`], used for listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum InputKind {
    PointerDown = 0,
    PointerMove = 1,
    PointerUp = 2,
    PointerLeave = 3,
    Click = 4,
    KeyDown = 5,
    Resize = 6,
    FullscreenChanged = 7,
}

/// Set of input kinds a scene has registered listeners for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListenerMask(u16);

impl ListenerMask {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(0xff);

    pub fn of(kinds: &[InputKind]) -> Self {
        kinds.iter().fold(Self::NONE, |mask, &kind| mask.with(kind))
    }

    pub fn with(self, kind: InputKind) -> Self {
        Self(self.0 | 1 << kind as u8)
    }

    pub fn contains(self, kind: InputKind) -> bool {
        self.0 & (1 << kind as u8) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// A queue of input events.
/// JS writes events into the queue; Rust drains them once per frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
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
