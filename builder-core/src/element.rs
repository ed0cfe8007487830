//! Canvas elements - the building blocks of a page.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{BuilderError, BuilderResult};

/// Placeholder text for new text elements.
pub const DEFAULT_TEXT_CONTENT: &str = "New text";

/// Placeholder label for new buttons.
pub const DEFAULT_BUTTON_LABEL: &str = "Click me";

/// Unique identifier for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an element ID from its string form.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidId`] if the string is not a UUID.
    pub fn parse(value: &str) -> BuilderResult<Self> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| BuilderError::InvalidId(value.to_string()))
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of element variants the toolbar can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    /// Block of text.
    Text,
    /// Image loaded from a URL.
    Image,
    /// Clickable button with a label.
    Button,
    /// Generic block wrapping text.
    Container,
}

impl ElementType {
    /// Every element type, in toolbar order.
    pub const ALL: [Self; 4] = [Self::Text, Self::Image, Self::Button, Self::Container];

    /// Wire name of this type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Button => "button",
            Self::Container => "container",
        }
    }
}

impl FromStr for ElementType {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BuilderError::UnknownElementType(s.to_string()))
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extra data for image elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageProps {
    /// Image URL. Empty until the user picks one.
    #[serde(default)]
    pub src: String,
    /// Alternative text.
    #[serde(default)]
    pub alt: String,
}

/// Variant payload of an element.
///
/// Serialized with an internal `type` tag, so an element reads as
/// `{"type": "text", "content": "..."}` or `{"type": "image", "props": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    /// A text block.
    Text {
        /// Text content.
        #[serde(default)]
        content: String,
    },

    /// An image.
    Image {
        /// Source and alt text.
        #[serde(default)]
        props: ImageProps,
    },

    /// A button.
    Button {
        /// Button label.
        #[serde(default)]
        content: String,
    },

    /// A generic container block.
    Container {
        /// Text wrapped by the container.
        #[serde(default)]
        content: String,
    },
}

impl ElementKind {
    /// Default payload for a freshly created element of the given type.
    #[must_use]
    pub fn placeholder(ty: ElementType) -> Self {
        match ty {
            ElementType::Text => Self::Text {
                content: DEFAULT_TEXT_CONTENT.to_string(),
            },
            ElementType::Image => Self::Image {
                props: ImageProps::default(),
            },
            ElementType::Button => Self::Button {
                content: DEFAULT_BUTTON_LABEL.to_string(),
            },
            ElementType::Container => Self::Container {
                content: String::new(),
            },
        }
    }

    /// The type tag of this payload.
    #[must_use]
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::Text { .. } => ElementType::Text,
            Self::Image { .. } => ElementType::Image,
            Self::Button { .. } => ElementType::Button,
            Self::Container { .. } => ElementType::Container,
        }
    }

    /// Textual payload; empty for images.
    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            Self::Text { content } | Self::Button { content } | Self::Container { content } => {
                content
            }
            Self::Image { .. } => "",
        }
    }

    /// Image props, if this is an image.
    #[must_use]
    pub fn image_props(&self) -> Option<&ImageProps> {
        match self {
            Self::Image { props } => Some(props),
            _ => None,
        }
    }
}

/// CSS positioning scheme. The canvas is a free-positioning surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// Absolute positioning relative to the canvas origin.
    #[default]
    Absolute,
}

impl Position {
    /// CSS keyword.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Absolute => "absolute",
        }
    }
}

/// Font weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight.
    #[default]
    Normal,
    /// Bold weight.
    Bold,
}

impl FontWeight {
    /// CSS keyword.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Bold => "bold",
        }
    }
}

impl FromStr for FontWeight {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "bold" => Ok(Self::Bold),
            _ => Err(BuilderError::InvalidInput {
                field: "fontWeight",
                value: s.to_string(),
            }),
        }
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Left aligned.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Right aligned.
    Right,
}

impl TextAlign {
    /// CSS keyword.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

impl FromStr for TextAlign {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            _ => Err(BuilderError::InvalidInput {
                field: "textAlign",
                value: s.to_string(),
            }),
        }
    }
}

/// Presentation attributes of an element.
///
/// All lengths are in pixels. `height` is authoritative only for images;
/// other variants grow vertically and treat it as a minimum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Styles {
    /// Always absolute.
    pub position: Position,
    /// Offset from the canvas left edge.
    pub left: f32,
    /// Offset from the canvas top edge.
    pub top: f32,
    /// Box width.
    pub width: f32,
    /// Box height (minimum height for non-image variants).
    pub height: f32,
    /// Font size.
    pub font_size: f32,
    /// Text color.
    pub color: String,
    /// Background color.
    pub background_color: String,
    /// Inner padding.
    pub padding: f32,
    /// Corner radius.
    pub border_radius: f32,
    /// Font weight.
    pub font_weight: FontWeight,
    /// Text alignment.
    pub text_align: TextAlign,
    /// Stacking order; higher paints on top.
    pub z_index: i32,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            position: Position::Absolute,
            left: 0.0,
            top: 0.0,
            width: 200.0,
            height: 40.0,
            font_size: 16.0,
            color: "#000000".to_string(),
            background_color: "transparent".to_string(),
            padding: 8.0,
            border_radius: 0.0,
            font_weight: FontWeight::Normal,
            text_align: TextAlign::Left,
            z_index: 0,
        }
    }
}

impl Styles {
    /// Default styles for a new element of the given type.
    #[must_use]
    pub fn for_type(ty: ElementType) -> Self {
        let base = Self::default();
        match ty {
            ElementType::Text => base,
            ElementType::Image => Self {
                width: 200.0,
                height: 150.0,
                padding: 0.0,
                ..base
            },
            ElementType::Button => Self {
                width: 120.0,
                height: 40.0,
                color: "#ffffff".to_string(),
                background_color: "#3b82f6".to_string(),
                padding: 10.0,
                border_radius: 6.0,
                font_weight: FontWeight::Bold,
                text_align: TextAlign::Center,
                ..base
            },
            ElementType::Container => Self {
                width: 300.0,
                height: 200.0,
                color: "#111827".to_string(),
                background_color: "#f3f4f6".to_string(),
                padding: 16.0,
                border_radius: 8.0,
                ..base
            },
        }
    }
}

/// A positioned, styled node on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    id: ElementId,
    /// Variant payload (content / image props).
    #[serde(flatten)]
    pub kind: ElementKind,
    /// Presentation attributes.
    pub styles: Styles,
}

impl Element {
    /// Create a new element of the given type with its default payload and styles.
    #[must_use]
    pub fn new(ty: ElementType) -> Self {
        Self {
            id: ElementId::new(),
            kind: ElementKind::placeholder(ty),
            styles: Styles::for_type(ty),
        }
    }

    /// Rebuild an element that already has an identity (e.g. loaded from storage).
    #[must_use]
    pub fn with_id(id: ElementId, kind: ElementKind, styles: Styles) -> Self {
        Self { id, kind, styles }
    }

    /// Set the canvas position.
    #[must_use]
    pub fn at(mut self, left: f32, top: f32) -> Self {
        self.styles.left = left.max(0.0);
        self.styles.top = top.max(0.0);
        self
    }

    /// Set the stacking order.
    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.styles.z_index = z_index;
        self
    }

    /// Unique identifier. Never changes after creation.
    #[must_use]
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// The element's variant.
    #[must_use]
    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    /// Textual payload; empty for images.
    #[must_use]
    pub fn content(&self) -> &str {
        self.kind.content()
    }

    /// Check if a point (in canvas coordinates) is within this element.
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        let s = &self.styles;
        x >= s.left && x <= s.left + s.width && y >= s.top && y <= s.top + s.height
    }
}
