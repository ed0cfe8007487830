//! Serialized page representation handed to and loaded from external stores.
//!
//! Records are deliberately loose (`type` is a plain string, styles are raw
//! JSON) so that documents written by other clients still load. Records that
//! cannot be turned into an [`Element`] are skipped, never fatal.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    BuilderError, BuilderResult, Canvas, Element, ElementId, ElementKind, ElementType,
    ElementUpdate, ImageProps, Styles,
};

/// Document-friendly element description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    /// Element identifier.
    pub id: String,
    /// Element type name.
    #[serde(rename = "type")]
    pub element_type: String,
    /// Textual payload.
    #[serde(default)]
    pub content: String,
    /// Style record.
    #[serde(default)]
    pub styles: serde_json::Value,
    /// Image props.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<ImageProps>,
}

impl From<&Element> for ElementRecord {
    fn from(element: &Element) -> Self {
        Self {
            id: element.id().to_string(),
            element_type: element.element_type().as_str().to_string(),
            content: element.content().to_string(),
            styles: serde_json::to_value(&element.styles).unwrap_or_default(),
            props: element.kind.image_props().cloned(),
        }
    }
}

impl ElementRecord {
    /// Convert the record to a runtime element.
    ///
    /// Missing style fields, and saved values an edit would reject (such as
    /// a negative width), take the defaults of the element's type. A
    /// malformed id is replaced with a fresh one.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::UnknownElementType`] for types outside the
    /// supported set and [`BuilderError::Serialization`] for malformed styles.
    pub fn to_element(&self) -> BuilderResult<Element> {
        let ty: ElementType = self.element_type.parse()?;
        let overrides = parse_styles(Styles::for_type(ty), &self.styles)?;
        let kind = match ty {
            ElementType::Text => ElementKind::Text {
                content: self.content.clone(),
            },
            ElementType::Image => ElementKind::Image {
                props: self.props.clone().unwrap_or_default(),
            },
            ElementType::Button => ElementKind::Button {
                content: self.content.clone(),
            },
            ElementType::Container => ElementKind::Container {
                content: self.content.clone(),
            },
        };
        let id = ElementId::parse(&self.id).unwrap_or_else(|_| {
            tracing::debug!("Record id {:?} is not a UUID, assigning a new one", self.id);
            ElementId::new()
        });

        // Saved values go through the same checks as edits; rejected ones
        // keep the type default.
        let mut element = Element::with_id(id, kind, Styles::for_type(ty));
        ElementUpdate::from(&overrides).apply_to(&mut element);
        Ok(element)
    }
}

/// Overlay the fields present in `raw` onto `base`.
fn parse_styles(base: Styles, raw: &serde_json::Value) -> BuilderResult<Styles> {
    let serde_json::Value::Object(overrides) = raw else {
        return Ok(base);
    };
    let mut merged = serde_json::to_value(base)?;
    if let serde_json::Value::Object(fields) = &mut merged {
        for (key, value) in overrides {
            fields.insert(key.clone(), value.clone());
        }
    }
    Ok(serde_json::from_value(merged)?)
}

/// A saved page: the element list plus identifying metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDocument {
    /// Page identifier within its store.
    pub page_id: String,
    /// Page title, used as the exported document title.
    #[serde(default)]
    pub title: String,
    /// Elements in list order.
    #[serde(default)]
    pub elements: Vec<ElementRecord>,
    /// Save time in milliseconds since the Unix epoch.
    #[serde(default)]
    pub updated_at: u64,
}

impl PageDocument {
    /// Build a document from a canvas.
    #[must_use]
    pub fn from_canvas(
        page_id: impl Into<String>,
        title: impl Into<String>,
        canvas: &Canvas,
        timestamp: u64,
    ) -> Self {
        Self {
            page_id: page_id.into(),
            title: title.into(),
            elements: canvas.elements().iter().map(ElementRecord::from).collect(),
            updated_at: timestamp,
        }
    }

    /// Runtime elements for every usable record, in list order.
    ///
    /// Unknown types and malformed records are skipped with a warning.
    /// Duplicate ids are re-minted so the result keeps ids unique.
    #[must_use]
    pub fn to_elements(&self) -> Vec<Element> {
        let mut seen = HashSet::new();
        self.elements
            .iter()
            .filter_map(|record| match record.to_element() {
                Ok(element) => Some(element),
                Err(e) => {
                    tracing::warn!("Skipping element {:?} in page {}: {e}", record.id, self.page_id);
                    None
                }
            })
            .map(|element| {
                if seen.insert(element.id()) {
                    element
                } else {
                    let fresh = ElementId::new();
                    seen.insert(fresh);
                    Element::with_id(fresh, element.kind, element.styles)
                }
            })
            .collect()
    }

    /// Materialize a canvas for editing. Nothing is selected.
    #[must_use]
    pub fn into_canvas(self) -> Canvas {
        Canvas::from_elements(self.to_elements())
    }

    /// Serialize the document to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> BuilderResult<String> {
        serde_json::to_string_pretty(self).map_err(BuilderError::Serialization)
    }

    /// Deserialize a document from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is not a page document.
    pub fn from_json(json: &str) -> BuilderResult<Self> {
        serde_json::from_str(json).map_err(BuilderError::Serialization)
    }
}
