//! Input events for canvas interaction.
//!
//! Mouse and touch sources are normalized into a single [`PointerEvent`] so the
//! surface state machine only ever sees one input type.

use serde::{Deserialize, Serialize};

/// A pointer location. Client coordinates until the surface translates it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerPosition {
    /// X coordinate in pixels.
    pub x: f32,
    /// Y coordinate in pixels.
    pub y: f32,
}

impl PointerPosition {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Phase shared by mouse and touch sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// Button pressed / finger down.
    Down,
    /// Pointer moved.
    Move,
    /// Button released / finger lifted.
    Up,
    /// Pointer left the canvas.
    Leave,
    /// Input cancelled by the platform (e.g. palm rejection).
    Cancel,
}

/// A single touch contact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    /// Touch identifier (for multi-touch).
    pub id: u32,
    /// X position in client coordinates.
    pub client_x: f32,
    /// Y position in client coordinates.
    pub client_y: f32,
}

/// A mouse event as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouseEvent {
    /// Phase of this event.
    pub phase: PointerPhase,
    /// X position in client coordinates.
    pub client_x: f32,
    /// Y position in client coordinates.
    pub client_y: f32,
}

/// A touch event with zero or more active contacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    /// Phase of this event.
    pub phase: PointerPhase,
    /// Active touch points; the first one drives the pointer.
    pub touches: Vec<TouchPoint>,
}

impl TouchEvent {
    /// Create a new touch event.
    #[must_use]
    pub fn new(phase: PointerPhase, touches: Vec<TouchPoint>) -> Self {
        Self { phase, touches }
    }

    /// Get the primary (first) touch point.
    #[must_use]
    pub fn primary_touch(&self) -> Option<&TouchPoint> {
        self.touches.first()
    }
}

/// Raw input from any native source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum InputEvent {
    /// Mouse input.
    Mouse(MouseEvent),
    /// Touch input.
    Touch(TouchEvent),
}

impl InputEvent {
    /// Normalize into a [`PointerEvent`].
    ///
    /// Returns `None` for down/move touch events without any contact point,
    /// which carry no usable position.
    #[must_use]
    pub fn to_pointer(&self) -> Option<PointerEvent> {
        let (phase, position) = match self {
            Self::Mouse(mouse) => (
                mouse.phase,
                Some(PointerPosition::new(mouse.client_x, mouse.client_y)),
            ),
            Self::Touch(touch) => (
                touch.phase,
                touch
                    .primary_touch()
                    .map(|t| PointerPosition::new(t.client_x, t.client_y)),
            ),
        };
        PointerEvent::from_phase(phase, position)
    }
}

/// Normalized pointer input consumed by the canvas surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "position", rename_all = "lowercase")]
pub enum PointerEvent {
    /// Pointer pressed at a position.
    Down(PointerPosition),
    /// Pointer moved to a position.
    Move(PointerPosition),
    /// Pointer released.
    Up,
    /// Pointer left the canvas.
    Leave,
    /// Pointer input cancelled.
    Cancel,
}

impl PointerEvent {
    /// Build an event from a phase and optional position.
    ///
    /// Down and move need a position; the ending phases do not.
    #[must_use]
    pub fn from_phase(phase: PointerPhase, position: Option<PointerPosition>) -> Option<Self> {
        match phase {
            PointerPhase::Down => position.map(Self::Down),
            PointerPhase::Move => position.map(Self::Move),
            PointerPhase::Up => Some(Self::Up),
            PointerPhase::Leave => Some(Self::Leave),
            PointerPhase::Cancel => Some(Self::Cancel),
        }
    }

    /// Position carried by this event, if any.
    #[must_use]
    pub fn position(&self) -> Option<PointerPosition> {
        match self {
            Self::Down(pos) | Self::Move(pos) => Some(*pos),
            Self::Up | Self::Leave | Self::Cancel => None,
        }
    }

    /// Whether this event ends an active gesture.
    #[must_use]
    pub fn ends_gesture(&self) -> bool {
        matches!(self, Self::Up | Self::Leave | Self::Cancel)
    }
}
