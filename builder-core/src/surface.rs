//! Canvas surface interaction: selection, dragging and resizing.
//!
//! The surface is a small state machine fed with [`PointerEvent`]s:
//!
//! ```text
//!            down on element            move
//!   Idle ─────────────────────▶ Dragging ◀──┐
//!    ▲  │                           │  └────┘
//!    │  │ down on resize handle     │ up / leave / cancel
//!    │  └──────────────▶ Resizing   │
//!    └─────────────────────┴────────┘
//! ```
//!
//! Every position update goes through [`Canvas::update_element`], so anything
//! reading the canvas (such as an open property editor) sees the live values.

use serde::{Deserialize, Serialize};

use crate::{Canvas, Element, ElementId, ElementUpdate, PointerEvent, PointerPosition};

/// How far the element's origin sits from the pointer while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum GrabOffset {
    /// Constant offset regardless of where the element was grabbed.
    /// The element's origin jumps to `pointer - (x, y)` on the first move.
    Fixed {
        /// Horizontal offset in pixels.
        x: f32,
        /// Vertical offset in pixels.
        y: f32,
    },
    /// Keep the exact pixel that was grabbed under the pointer.
    Anchored,
}

impl Default for GrabOffset {
    fn default() -> Self {
        Self::Fixed { x: 75.0, y: 20.0 }
    }
}

/// Surface behaviour settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Drag anchoring mode.
    pub grab_offset: GrabOffset,
    /// Smallest width/height a resize can produce.
    pub min_element_size: f32,
    /// Side length of the square resize handle at the selection's bottom-right corner.
    pub resize_handle_size: f32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            grab_offset: GrabOffset::default(),
            min_element_size: 20.0,
            resize_handle_size: 10.0,
        }
    }
}

/// Origin of the canvas bounding box in client coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasBounds {
    /// Client X of the canvas' left edge.
    pub left: f32,
    /// Client Y of the canvas' top edge.
    pub top: f32,
}

impl CanvasBounds {
    /// Translate a client position into canvas coordinates.
    #[must_use]
    pub fn to_canvas(&self, position: PointerPosition) -> PointerPosition {
        PointerPosition::new(position.x - self.left, position.y - self.top)
    }
}

/// Axis-aligned rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Check if a point lies inside (edges inclusive).
    #[must_use]
    pub fn contains(&self, point: PointerPosition) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// The resize handle of `element`: a square flush with its bottom-right corner.
#[must_use]
pub fn resize_handle(element: &Element, size: f32) -> Rect {
    let s = &element.styles;
    Rect {
        x: s.left + s.width - size,
        y: s.top + s.height - size,
        width: size,
        height: size,
    }
}

/// Current gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum DragState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Moving an element.
    Dragging {
        /// Element being moved.
        id: ElementId,
        /// Offset subtracted from the pointer to get the element origin.
        offset: PointerPosition,
    },
    /// Resizing an element from its bottom-right handle.
    Resizing {
        /// Element being resized.
        id: ElementId,
        /// Canvas position where the resize started.
        origin: PointerPosition,
        /// Width when the resize started.
        start_width: f32,
        /// Height when the resize started.
        start_height: f32,
    },
}

impl DragState {
    /// Element targeted by the current gesture.
    #[must_use]
    pub fn target(&self) -> Option<ElementId> {
        match self {
            Self::Idle => None,
            Self::Dragging { id, .. } | Self::Resizing { id, .. } => Some(*id),
        }
    }
}

/// Pointer-driven viewport over a [`Canvas`].
#[derive(Debug, Clone, Default)]
pub struct CanvasSurface {
    config: SurfaceConfig,
    bounds: CanvasBounds,
    state: DragState,
}

impl CanvasSurface {
    /// Create a surface with the given configuration.
    #[must_use]
    pub fn new(config: SurfaceConfig) -> Self {
        Self {
            config,
            bounds: CanvasBounds::default(),
            state: DragState::Idle,
        }
    }

    /// Create a surface with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(SurfaceConfig::default())
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// Update the canvas bounding box (after layout or scroll).
    pub fn set_bounds(&mut self, bounds: CanvasBounds) {
        self.bounds = bounds;
    }

    /// Current canvas bounding box.
    #[must_use]
    pub fn bounds(&self) -> CanvasBounds {
        self.bounds
    }

    /// Current gesture state.
    #[must_use]
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Whether an element is being dragged.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Feed one pointer event through the state machine.
    ///
    /// Returns `true` if the canvas (elements or selection) changed.
    pub fn handle(&mut self, canvas: &mut Canvas, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down(position) => self.pointer_down(canvas, position),
            PointerEvent::Move(position) => self.pointer_move(canvas, position),
            PointerEvent::Up | PointerEvent::Leave | PointerEvent::Cancel => {
                self.end_gesture();
                false
            }
        }
    }

    /// Pointer pressed at a client position; the target is found by hit testing.
    ///
    /// Hit testing uses each element's stored box, which for auto-height
    /// variants is the minimum height. Hosts that know the rendered target
    /// (the DOM) should call [`Self::pointer_down_on`] instead.
    pub fn pointer_down(&mut self, canvas: &mut Canvas, position: PointerPosition) -> bool {
        let point = self.bounds.to_canvas(position);

        let Some(id) = canvas.element_at(point.x, point.y) else {
            // Background click clears the selection.
            self.state = DragState::Idle;
            let changed = canvas.selected_id().is_some();
            canvas.select_element(None);
            return changed;
        };

        // The handle only counts when nothing is painted above it.
        if let Some(element) = canvas.selected_element().filter(|e| e.id() == id) {
            if resize_handle(element, self.config.resize_handle_size).contains(point) {
                self.state = DragState::Resizing {
                    id,
                    origin: point,
                    start_width: element.styles.width,
                    start_height: element.styles.height,
                };
                return false;
            }
        }

        self.pointer_down_on(canvas, id, position)
    }

    /// Pointer pressed on a known element (e.g. resolved from a DOM event target).
    ///
    /// Selects the element and starts dragging it.
    pub fn pointer_down_on(
        &mut self,
        canvas: &mut Canvas,
        id: ElementId,
        position: PointerPosition,
    ) -> bool {
        let Some(element) = canvas.get_element(id) else {
            tracing::debug!("Pointer down on unknown element {id}");
            self.state = DragState::Idle;
            canvas.select_element(None);
            return true;
        };

        let point = self.bounds.to_canvas(position);
        let offset = match self.config.grab_offset {
            GrabOffset::Fixed { x, y } => PointerPosition::new(x, y),
            GrabOffset::Anchored => PointerPosition::new(
                point.x - element.styles.left,
                point.y - element.styles.top,
            ),
        };

        let changed = !canvas.is_selected(id);
        canvas.select_element(Some(id));
        self.state = DragState::Dragging { id, offset };
        changed
    }

    /// Pointer moved to a client position.
    pub fn pointer_move(&mut self, canvas: &mut Canvas, position: PointerPosition) -> bool {
        let point = self.bounds.to_canvas(position);
        let (id, update) = match self.state {
            DragState::Idle => return false,
            DragState::Dragging { id, offset } => (
                id,
                ElementUpdate::position(point.x - offset.x, point.y - offset.y),
            ),
            DragState::Resizing {
                id,
                origin,
                start_width,
                start_height,
            } => {
                let min = self.config.min_element_size;
                (
                    id,
                    ElementUpdate::size(
                        (start_width + point.x - origin.x).max(min),
                        (start_height + point.y - origin.y).max(min),
                    ),
                )
            }
        };

        if canvas.update_element(id, &update).is_err() {
            // Element deleted mid-gesture.
            self.state = DragState::Idle;
            return false;
        }
        true
    }

    /// End any gesture in progress.
    pub fn end_gesture(&mut self) {
        if let Some(id) = self.state.target() {
            tracing::trace!("Gesture on {id} ended");
        }
        self.state = DragState::Idle;
    }
}
