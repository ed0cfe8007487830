//! Property editor for the selected element.
//!
//! Edits are applied live: every field change goes straight through
//! [`Canvas::update_element`]. There is no separate apply step.

use serde::Serialize;

use crate::{
    BuilderError, BuilderResult, Canvas, Element, ElementKind, ElementType, ElementUpdate,
    FontWeight, TextAlign,
};

/// An editable element field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)] // Variant names mirror the style keys.
pub enum Property {
    Content,
    Src,
    Alt,
    Left,
    Top,
    Width,
    Height,
    FontSize,
    Color,
    BackgroundColor,
    Padding,
    BorderRadius,
    FontWeight,
    TextAlign,
    ZIndex,
}

impl Property {
    /// Every property, in panel order.
    pub const ALL: [Self; 15] = [
        Self::Content,
        Self::Src,
        Self::Alt,
        Self::Left,
        Self::Top,
        Self::Width,
        Self::Height,
        Self::FontSize,
        Self::Color,
        Self::BackgroundColor,
        Self::Padding,
        Self::BorderRadius,
        Self::FontWeight,
        Self::TextAlign,
        Self::ZIndex,
    ];

    /// Style key as it appears in documents.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Src => "src",
            Self::Alt => "alt",
            Self::Left => "left",
            Self::Top => "top",
            Self::Width => "width",
            Self::Height => "height",
            Self::FontSize => "fontSize",
            Self::Color => "color",
            Self::BackgroundColor => "backgroundColor",
            Self::Padding => "padding",
            Self::BorderRadius => "borderRadius",
            Self::FontWeight => "fontWeight",
            Self::TextAlign => "textAlign",
            Self::ZIndex => "zIndex",
        }
    }

    /// Look up a property by its style key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }

    /// Human-readable label for the panel.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Content => "Content",
            Self::Src => "Image URL",
            Self::Alt => "Alt text",
            Self::Left => "X",
            Self::Top => "Y",
            Self::Width => "Width",
            Self::Height => "Height",
            Self::FontSize => "Font size",
            Self::Color => "Text color",
            Self::BackgroundColor => "Background",
            Self::Padding => "Padding",
            Self::BorderRadius => "Corner radius",
            Self::FontWeight => "Font weight",
            Self::TextAlign => "Alignment",
            Self::ZIndex => "Layer",
        }
    }

    /// Whether the field is shown for elements of `ty`.
    #[must_use]
    pub fn applies_to(self, ty: ElementType) -> bool {
        match self {
            Self::Content => ty != ElementType::Image,
            Self::Src | Self::Alt => ty == ElementType::Image,
            _ => true,
        }
    }

    /// Whether the field takes a number.
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Left
                | Self::Top
                | Self::Width
                | Self::Height
                | Self::FontSize
                | Self::Padding
                | Self::BorderRadius
                | Self::ZIndex
        )
    }

    /// Current value of this field on `element`, formatted for an input box.
    #[must_use]
    pub fn read(self, element: &Element) -> String {
        let s = &element.styles;
        match self {
            Self::Content => element.content().to_string(),
            Self::Src => element
                .kind
                .image_props()
                .map(|p| p.src.clone())
                .unwrap_or_default(),
            Self::Alt => element
                .kind
                .image_props()
                .map(|p| p.alt.clone())
                .unwrap_or_default(),
            Self::Left => s.left.to_string(),
            Self::Top => s.top.to_string(),
            Self::Width => s.width.to_string(),
            Self::Height => s.height.to_string(),
            Self::FontSize => s.font_size.to_string(),
            Self::Color => s.color.clone(),
            Self::BackgroundColor => s.background_color.clone(),
            Self::Padding => s.padding.to_string(),
            Self::BorderRadius => s.border_radius.to_string(),
            Self::FontWeight => s.font_weight.as_css().to_string(),
            Self::TextAlign => s.text_align.as_css().to_string(),
            Self::ZIndex => s.z_index.to_string(),
        }
    }

    /// Parse raw input into an update for this field.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidInput`] if the value does not parse,
    /// is not finite, or is out of range for the field.
    pub fn parse(self, raw: &str) -> BuilderResult<ElementUpdate> {
        let mut update = ElementUpdate::default();
        match self {
            Self::Content => update.content = Some(raw.to_string()),
            Self::Src => update.src = Some(raw.trim().to_string()),
            Self::Alt => update.alt = Some(raw.to_string()),
            Self::Color => update.color = Some(raw.trim().to_string()),
            Self::BackgroundColor => update.background_color = Some(raw.trim().to_string()),
            Self::FontWeight => update.font_weight = Some(raw.parse::<FontWeight>()?),
            Self::TextAlign => update.text_align = Some(raw.parse::<TextAlign>()?),
            Self::ZIndex => {
                update.z_index = Some(raw.trim().parse().map_err(|_| self.invalid(raw))?);
            }
            Self::Left => update.left = Some(self.number(raw, 0.0)?),
            Self::Top => update.top = Some(self.number(raw, 0.0)?),
            Self::Padding => update.padding = Some(self.number(raw, 0.0)?),
            Self::BorderRadius => update.border_radius = Some(self.number(raw, 0.0)?),
            Self::Width => update.width = Some(self.positive(raw)?),
            Self::Height => update.height = Some(self.positive(raw)?),
            Self::FontSize => update.font_size = Some(self.positive(raw)?),
        }
        Ok(update)
    }

    /// Parse a finite number; values below `floor` clamp up to it.
    fn number(self, raw: &str, floor: f32) -> BuilderResult<f32> {
        let value: f32 = raw.trim().parse().map_err(|_| self.invalid(raw))?;
        if !value.is_finite() {
            return Err(self.invalid(raw));
        }
        Ok(value.max(floor))
    }

    fn positive(self, raw: &str) -> BuilderResult<f32> {
        let value: f32 = raw.trim().parse().map_err(|_| self.invalid(raw))?;
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(self.invalid(raw))
        }
    }

    fn invalid(self, raw: &str) -> BuilderError {
        BuilderError::InvalidInput {
            field: self.key(),
            value: raw.to_string(),
        }
    }
}

/// One row of the property panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyField {
    /// Which field.
    pub property: Property,
    /// Panel label.
    pub label: &'static str,
    /// Current value as text.
    pub value: String,
    /// Whether the input should be numeric.
    pub numeric: bool,
}

/// Side panel bound to the canvas selection.
///
/// The editor holds no copy of the element; every read goes to the canvas, so
/// drags and other edits show up immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyEditor;

impl PropertyEditor {
    /// Create an editor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Whether the panel is open (an element is selected).
    #[must_use]
    pub fn is_open(&self, canvas: &Canvas) -> bool {
        canvas.selected_element().is_some()
    }

    /// Fields of the selected element, or `None` when nothing is selected.
    #[must_use]
    pub fn fields(&self, canvas: &Canvas) -> Option<Vec<PropertyField>> {
        let element = canvas.selected_element()?;
        let ty = element.element_type();
        Some(
            Property::ALL
                .into_iter()
                .filter(|p| p.applies_to(ty))
                .map(|property| PropertyField {
                    property,
                    label: property.label(),
                    value: property.read(element),
                    numeric: property.is_numeric(),
                })
                .collect(),
        )
    }

    /// Apply one input change to the selected element.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidInput`] for rejected values (the prior
    /// value stays) or a field the selected element does not have, and
    /// [`BuilderError::ElementNotFound`] when nothing is selected.
    pub fn set(&self, canvas: &mut Canvas, property: Property, raw: &str) -> BuilderResult<()> {
        let element = canvas
            .selected_element()
            .ok_or_else(|| BuilderError::ElementNotFound("no selection".to_string()))?;
        if !property.applies_to(element.element_type()) {
            return Err(property.invalid(raw));
        }
        let id = element.id();
        let update = property.parse(raw).inspect_err(|e| {
            tracing::warn!("Rejected property input: {e}");
        })?;
        canvas.update_element(id, &update)
    }

    /// Set the image source and alt text together (image picker result).
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidInput`] if the selection is not an image
    /// and [`BuilderError::ElementNotFound`] when nothing is selected.
    pub fn set_image(&self, canvas: &mut Canvas, src: &str, alt: &str) -> BuilderResult<()> {
        let element = canvas
            .selected_element()
            .ok_or_else(|| BuilderError::ElementNotFound("no selection".to_string()))?;
        if !matches!(element.kind, ElementKind::Image { .. }) {
            return Err(BuilderError::InvalidInput {
                field: "src",
                value: src.to_string(),
            });
        }
        let id = element.id();
        let update = ElementUpdate {
            src: Some(src.trim().to_string()),
            alt: Some(alt.to_string()),
            ..ElementUpdate::default()
        };
        canvas.update_element(id, &update)
    }

    /// Delete the selected element, which also closes the panel.
    ///
    /// Returns the removed element, or `None` if nothing was selected.
    pub fn delete_selected(&self, canvas: &mut Canvas) -> Option<Element> {
        let id = canvas.selected_id()?;
        let removed = canvas.delete_element(id).ok();
        canvas.select_element(None);
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(fields: &[PropertyField], property: Property) -> Option<&PropertyField> {
        fields.iter().find(|f| f.property == property)
    }

    #[test]
    fn test_from_key() {
        assert_eq!(Property::from_key("fontSize"), Some(Property::FontSize));
        assert_eq!(Property::from_key("zIndex"), Some(Property::ZIndex));
        assert_eq!(Property::from_key("font-size"), None);
    }

    #[test]
    fn test_no_selection_means_closed() {
        let mut canvas = Canvas::new();
        canvas.add_element(ElementType::Text);
        canvas.select_element(None);
        let editor = PropertyEditor::new();
        assert!(!editor.is_open(&canvas));
        assert!(editor.fields(&canvas).is_none());
    }

    #[test]
    fn test_fields_follow_element_type() {
        let mut canvas = Canvas::new();
        canvas.add_element(ElementType::Image);
        let fields = PropertyEditor::new().fields(&canvas).expect("selected");
        assert!(field(&fields, Property::Src).is_some());
        assert!(field(&fields, Property::Content).is_none());

        canvas.add_element(ElementType::Button);
        let fields = PropertyEditor::new().fields(&canvas).expect("selected");
        assert_eq!(
            field(&fields, Property::Content).map(|f| f.value.as_str()),
            Some("Click me")
        );
        assert!(field(&fields, Property::Alt).is_none());
        assert!(field(&fields, Property::Width).is_some_and(|f| f.numeric));
    }

    #[test]
    fn test_set_applies_immediately() {
        let mut canvas = Canvas::new();
        canvas.add_element(ElementType::Text);
        let editor = PropertyEditor::new();

        editor.set(&mut canvas, Property::Content, "Hello").expect("content");
        editor.set(&mut canvas, Property::FontSize, " 24 ").expect("font size");
        editor.set(&mut canvas, Property::FontWeight, "Bold").expect("weight");
        editor.set(&mut canvas, Property::TextAlign, "center").expect("align");

        let el = canvas.selected_element().expect("selected");
        assert_eq!(el.content(), "Hello");
        assert!((el.styles.font_size - 24.0).abs() < f32::EPSILON);
        assert_eq!(el.styles.font_weight, FontWeight::Bold);
        assert_eq!(el.styles.text_align, TextAlign::Center);
    }

    #[test]
    fn test_non_numeric_input_keeps_prior_value() {
        let mut canvas = Canvas::new();
        canvas.add_element(ElementType::Container);
        let editor = PropertyEditor::new();

        for (property, raw) in [
            (Property::Width, "wide"),
            (Property::Height, "NaN"),
            (Property::FontSize, "0"),
            (Property::Padding, "inf"),
            (Property::BorderRadius, ""),
            (Property::ZIndex, "1.5"),
        ] {
            let result = editor.set(&mut canvas, property, raw);
            assert!(
                matches!(result, Err(BuilderError::InvalidInput { .. })),
                "{property:?} accepted {raw:?}"
            );
        }

        let el = canvas.selected_element().expect("selected");
        assert!((el.styles.width - 300.0).abs() < f32::EPSILON);
        assert!((el.styles.height - 200.0).abs() < f32::EPSILON);
        assert!((el.styles.font_size - 16.0).abs() < f32::EPSILON);
        assert!((el.styles.padding - 16.0).abs() < f32::EPSILON);
        assert!((el.styles.border_radius - 8.0).abs() < f32::EPSILON);
        assert_eq!(el.styles.z_index, 1);
    }

    #[test]
    fn test_negative_position_input_clamps() {
        let mut canvas = Canvas::new();
        canvas.add_element(ElementType::Text);
        let editor = PropertyEditor::new();
        editor.set(&mut canvas, Property::Left, "-40").expect("left");
        let el = canvas.selected_element().expect("selected");
        assert!(el.styles.left.abs() < f32::EPSILON);
    }

    #[test]
    fn test_set_image_rejects_non_image() {
        let mut canvas = Canvas::new();
        canvas.add_element(ElementType::Text);
        let editor = PropertyEditor::new();
        assert!(editor.set_image(&mut canvas, "a.png", "a").is_err());

        canvas.add_element(ElementType::Image);
        editor
            .set_image(&mut canvas, " https://cdn.test/cat.jpg ", "A cat")
            .expect("image");
        let el = canvas.selected_element().expect("selected");
        assert_eq!(Property::Src.read(el), "https://cdn.test/cat.jpg");
        assert_eq!(Property::Alt.read(el), "A cat");
    }

    #[test]
    fn test_delete_closes_editor() {
        let mut canvas = Canvas::new();
        let keep = canvas.add_element(ElementType::Text).id();
        canvas.add_element(ElementType::Button);
        let editor = PropertyEditor::new();

        let removed = editor.delete_selected(&mut canvas).expect("removed");
        assert_eq!(removed.element_type(), ElementType::Button);
        assert!(!editor.is_open(&canvas));
        assert_eq!(canvas.len(), 1);
        assert!(canvas.get_element(keep).is_some());
        assert!(editor.delete_selected(&mut canvas).is_none());
    }

    #[test]
    fn test_set_without_selection_fails() {
        let mut canvas = Canvas::new();
        let result = PropertyEditor::new().set(&mut canvas, Property::Color, "#fff");
        assert!(matches!(result, Err(BuilderError::ElementNotFound(_))));
    }

    #[test]
    fn test_set_rejects_fields_the_element_lacks() {
        let mut canvas = Canvas::new();
        canvas.add_element(ElementType::Image);
        let editor = PropertyEditor::new();

        let err = editor
            .set(&mut canvas, Property::Content, "caption")
            .expect_err("images have no content");
        assert!(matches!(err, BuilderError::InvalidInput { field: "content", .. }));
        editor
            .set(&mut canvas, Property::Src, "a.png")
            .expect("images take a source");

        canvas.add_element(ElementType::Text);
        for property in [Property::Src, Property::Alt] {
            assert!(editor.set(&mut canvas, property, "x").is_err());
        }
        assert_eq!(
            canvas.selected_element().map(Element::content),
            Some(crate::element::DEFAULT_TEXT_CONTENT)
        );
    }
}
