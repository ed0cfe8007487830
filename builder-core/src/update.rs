//! Partial element updates.
//!
//! An [`ElementUpdate`] carries only the fields that changed. Merging it into an
//! element keeps every invariant of the model: positions never go negative,
//! sizes stay positive, and non-finite numbers never reach the styles.

use serde::{Deserialize, Serialize};

use crate::{Element, ElementKind, FontWeight, Styles, TextAlign};

/// A partial update to an element's fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementUpdate {
    /// New text payload (ignored for images).
    pub content: Option<String>,
    /// New image source (images only).
    pub src: Option<String>,
    /// New image alt text (images only).
    pub alt: Option<String>,
    /// New left offset; negative values clamp to 0.
    pub left: Option<f32>,
    /// New top offset; negative values clamp to 0.
    pub top: Option<f32>,
    /// New width; must be positive.
    pub width: Option<f32>,
    /// New height; must be positive.
    pub height: Option<f32>,
    /// New font size; must be positive.
    pub font_size: Option<f32>,
    /// New text color.
    pub color: Option<String>,
    /// New background color.
    pub background_color: Option<String>,
    /// New padding; must not be negative.
    pub padding: Option<f32>,
    /// New corner radius; must not be negative.
    pub border_radius: Option<f32>,
    /// New font weight.
    pub font_weight: Option<FontWeight>,
    /// New text alignment.
    pub text_align: Option<TextAlign>,
    /// New stacking order.
    pub z_index: Option<i32>,
}

impl ElementUpdate {
    /// An update that moves an element.
    #[must_use]
    pub fn position(left: f32, top: f32) -> Self {
        Self {
            left: Some(left),
            top: Some(top),
            ..Self::default()
        }
    }

    /// An update that resizes an element.
    #[must_use]
    pub fn size(width: f32, height: f32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// An update that replaces the text payload.
    #[must_use]
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Whether the update carries no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge this update into `element`.
    ///
    /// Values that would break an invariant are skipped and the prior value
    /// is kept.
    pub fn apply_to(&self, element: &mut Element) {
        let id = element.id();
        match &mut element.kind {
            ElementKind::Text { content }
            | ElementKind::Button { content }
            | ElementKind::Container { content } => {
                if let Some(new) = &self.content {
                    content.clone_from(new);
                }
                if self.src.is_some() || self.alt.is_some() {
                    tracing::debug!("Ignoring image props on non-image element {id}");
                }
            }
            ElementKind::Image { props } => {
                if self.content.is_some() {
                    tracing::debug!("Ignoring content on image element {id}");
                }
                if let Some(src) = &self.src {
                    props.src.clone_from(src);
                }
                if let Some(alt) = &self.alt {
                    props.alt.clone_from(alt);
                }
            }
        }

        let styles = &mut element.styles;
        if let Some(left) = finite("left", self.left) {
            styles.left = left.max(0.0);
        }
        if let Some(top) = finite("top", self.top) {
            styles.top = top.max(0.0);
        }
        if let Some(width) = positive("width", self.width) {
            styles.width = width;
        }
        if let Some(height) = positive("height", self.height) {
            styles.height = height;
        }
        if let Some(font_size) = positive("fontSize", self.font_size) {
            styles.font_size = font_size;
        }
        if let Some(padding) = non_negative("padding", self.padding) {
            styles.padding = padding;
        }
        if let Some(radius) = non_negative("borderRadius", self.border_radius) {
            styles.border_radius = radius;
        }
        if let Some(color) = &self.color {
            styles.color.clone_from(color);
        }
        if let Some(background) = &self.background_color {
            styles.background_color.clone_from(background);
        }
        if let Some(weight) = self.font_weight {
            styles.font_weight = weight;
        }
        if let Some(align) = self.text_align {
            styles.text_align = align;
        }
        if let Some(z_index) = self.z_index {
            styles.z_index = z_index;
        }
    }
}

impl From<&Styles> for ElementUpdate {
    /// An update carrying every style field of `styles`.
    fn from(styles: &Styles) -> Self {
        Self {
            left: Some(styles.left),
            top: Some(styles.top),
            width: Some(styles.width),
            height: Some(styles.height),
            font_size: Some(styles.font_size),
            color: Some(styles.color.clone()),
            background_color: Some(styles.background_color.clone()),
            padding: Some(styles.padding),
            border_radius: Some(styles.border_radius),
            font_weight: Some(styles.font_weight),
            text_align: Some(styles.text_align),
            z_index: Some(styles.z_index),
            ..Self::default()
        }
    }
}

fn finite(field: &str, value: Option<f32>) -> Option<f32> {
    let value = value?;
    if value.is_finite() {
        Some(value)
    } else {
        tracing::warn!("Ignoring non-finite {field}: {value}");
        None
    }
}

fn positive(field: &str, value: Option<f32>) -> Option<f32> {
    let value = finite(field, value)?;
    if value > 0.0 {
        Some(value)
    } else {
        tracing::warn!("Ignoring non-positive {field}: {value}");
        None
    }
}

fn non_negative(field: &str, value: Option<f32>) -> Option<f32> {
    let value = finite(field, value)?;
    if value >= 0.0 {
        Some(value)
    } else {
        tracing::warn!("Ignoring negative {field}: {value}");
        None
    }
}
