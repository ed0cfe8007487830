//! Display list for the live editor surface.
//!
//! Each element becomes one [`RenderBox`] in paint order. The host (DOM or any
//! 2D backend) draws the boxes as given; it does not need to know about
//! element variants or selection rules.

use builder_core::surface::{resize_handle, Rect};
use builder_core::{Canvas, Element, ElementId, ElementKind, Styles};
use serde::Serialize;

use crate::style::{inline_style, HeightRule};

/// Selection outline color.
pub const SELECTION_COLOR: &str = "#3b82f6";

/// Vertical sizing of a box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", content = "value", rename_all = "lowercase")]
pub enum BoxHeight {
    /// Exactly this many pixels (images).
    Fixed(f32),
    /// Grows with content, never shorter than `min` pixels.
    Auto {
        /// Minimum height in pixels.
        min: f32,
    },
}

/// What a box shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RenderContent {
    /// Text block.
    Text {
        /// Text to draw.
        text: String,
    },
    /// Image.
    Image {
        /// Source URL (may be empty).
        src: String,
        /// Alt text.
        alt: String,
    },
    /// Button.
    Button {
        /// Button label.
        label: String,
    },
    /// Container block.
    Container {
        /// Wrapped text.
        text: String,
    },
}

impl RenderContent {
    fn of(element: &Element) -> Self {
        match &element.kind {
            ElementKind::Text { content } => Self::Text {
                text: content.clone(),
            },
            ElementKind::Image { props } => Self::Image {
                src: props.src.clone(),
                alt: props.alt.clone(),
            },
            ElementKind::Button { content } => Self::Button {
                label: content.clone(),
            },
            ElementKind::Container { content } => Self::Container {
                text: content.clone(),
            },
        }
    }
}

/// Outline drawn around the selected element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Outline {
    /// Stroke color.
    pub color: &'static str,
    /// Stroke width in pixels.
    pub width: f32,
    /// Always dashed.
    pub dashed: bool,
}

impl Outline {
    /// The selection outline.
    #[must_use]
    pub fn selection() -> Self {
        Self {
            color: SELECTION_COLOR,
            width: 2.0,
            dashed: true,
        }
    }

    /// CSS `outline` declaration.
    #[must_use]
    pub fn css(&self) -> String {
        let line = if self.dashed { "dashed" } else { "solid" };
        format!("outline:{}px {line} {};", self.width, self.color)
    }
}

/// One positioned box in the editor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderBox {
    /// Element this box draws.
    pub id: ElementId,
    /// Box at `(left, top)` sized `(width, height)`; for auto-height boxes
    /// the height is the minimum.
    pub rect: Rect,
    /// Vertical sizing rule.
    pub height: BoxHeight,
    /// Styles applied verbatim.
    pub styles: Styles,
    /// Box content.
    pub content: RenderContent,
    /// Present when the element is selected.
    pub outline: Option<Outline>,
    /// Resize handle, present when the element is selected.
    pub resize_handle: Option<Rect>,
}

impl RenderBox {
    /// Inline CSS for a DOM node drawing this box.
    #[must_use]
    pub fn css(&self) -> String {
        let rule = match self.height {
            BoxHeight::Fixed(_) => HeightRule::Exact,
            BoxHeight::Auto { .. } => HeightRule::Minimum,
        };
        let mut css = inline_style(&self.styles, rule);
        if let Some(outline) = &self.outline {
            css.push_str(&outline.css());
        }
        css
    }

    /// Whether this box is the selection.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.outline.is_some()
    }
}

/// Every element of a canvas as boxes, in paint order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayList {
    boxes: Vec<RenderBox>,
}

impl DisplayList {
    /// Build the display list for `canvas`.
    ///
    /// `handle_size` is the side of the selection's resize handle.
    #[must_use]
    pub fn build(canvas: &Canvas, handle_size: f32) -> Self {
        let boxes = canvas
            .elements_by_z()
            .into_iter()
            .map(|element| {
                let s = &element.styles;
                let selected = canvas.is_selected(element.id());
                let height = match element.kind {
                    ElementKind::Image { .. } => BoxHeight::Fixed(s.height),
                    _ => BoxHeight::Auto { min: s.height },
                };
                RenderBox {
                    id: element.id(),
                    rect: Rect {
                        x: s.left,
                        y: s.top,
                        width: s.width,
                        height: s.height,
                    },
                    height,
                    styles: s.clone(),
                    content: RenderContent::of(element),
                    outline: selected.then(Outline::selection),
                    resize_handle: selected.then(|| resize_handle(element, handle_size)),
                }
            })
            .collect();
        Self { boxes }
    }

    /// Boxes in paint order (back to front).
    #[must_use]
    pub fn boxes(&self) -> &[RenderBox] {
        &self.boxes
    }

    /// The selected box, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&RenderBox> {
        self.boxes.iter().find(|b| b.is_selected())
    }

    /// Number of boxes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}
