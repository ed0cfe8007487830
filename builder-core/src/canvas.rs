//! Canvas state: the element list and the current selection.

use serde::{Deserialize, Serialize};

use crate::{BuilderError, BuilderResult, Element, ElementId, ElementType, ElementUpdate};

/// Where the toolbar drops new elements when no point is given.
pub const DEFAULT_DROP_POINT: (f32, f32) = (100.0, 100.0);

/// The authoritative element list for an editing session.
///
/// List order is insertion order and is what gets persisted and exported;
/// visual stacking is governed solely by each element's `z_index`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    /// All elements in insertion order.
    elements: Vec<Element>,
    /// Currently selected element, if any.
    selected: Option<ElementId>,
}

impl Canvas {
    /// Create a new empty canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a canvas from previously saved elements. Nothing is selected.
    #[must_use]
    pub fn from_elements(elements: Vec<Element>) -> Self {
        Self {
            elements,
            selected: None,
        }
    }

    /// Add a new element of `ty` at the toolbar drop point and select it.
    pub fn add_element(&mut self, ty: ElementType) -> &Element {
        let (left, top) = DEFAULT_DROP_POINT;
        self.add_element_at(ty, left, top)
    }

    /// Add a new element of `ty` at `(left, top)` and select it.
    ///
    /// The new element stacks above everything added before it.
    pub fn add_element_at(&mut self, ty: ElementType, left: f32, top: f32) -> &Element {
        let z_index = i32::try_from(self.elements.len() + 1).unwrap_or(i32::MAX);
        let element = Element::new(ty).at(left, top).with_z_index(z_index);
        let id = element.id();
        tracing::debug!("Adding {ty} element {id} at z-index {z_index}");
        self.elements.push(element);
        self.selected = Some(id);
        &self.elements[self.elements.len() - 1]
    }

    /// Add a new element by type name (as sent by a toolbar button).
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::UnknownElementType`] if `name` is not a
    /// supported type; the canvas is left untouched.
    pub fn add_element_named(&mut self, name: &str) -> BuilderResult<&Element> {
        let ty: ElementType = name.parse()?;
        Ok(self.add_element(ty))
    }

    /// Merge a partial update into the element with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::ElementNotFound`] if no element has `id`.
    pub fn update_element(&mut self, id: ElementId, update: &ElementUpdate) -> BuilderResult<()> {
        let element = self.get_element_mut(id).ok_or_else(|| {
            tracing::debug!("Update for unknown element {id}");
            BuilderError::ElementNotFound(id.to_string())
        })?;
        update.apply_to(element);
        Ok(())
    }

    /// Remove an element. Clears the selection if it pointed at it.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::ElementNotFound`] if no element has `id`.
    pub fn delete_element(&mut self, id: ElementId) -> BuilderResult<Element> {
        let index = self
            .elements
            .iter()
            .position(|e| e.id() == id)
            .ok_or_else(|| {
                tracing::debug!("Delete for unknown element {id}");
                BuilderError::ElementNotFound(id.to_string())
            })?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        Ok(self.elements.remove(index))
    }

    /// Set or clear the selection. An id not on the canvas deselects.
    pub fn select_element(&mut self, id: Option<ElementId>) {
        self.selected = id.filter(|id| self.contains(*id));
        if id.is_some() && self.selected.is_none() {
            tracing::debug!("Selecting unknown element, clearing selection");
        }
    }

    /// Id of the selected element.
    #[must_use]
    pub fn selected_id(&self) -> Option<ElementId> {
        self.selected
    }

    /// The selected element, read fresh from the list.
    #[must_use]
    pub fn selected_element(&self) -> Option<&Element> {
        self.selected.and_then(|id| self.get_element(id))
    }

    /// Whether `id` is the current selection.
    #[must_use]
    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected == Some(id)
    }

    /// Get an element by ID.
    #[must_use]
    pub fn get_element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    fn get_element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    /// Whether an element with `id` exists.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.get_element(id).is_some()
    }

    /// All elements in list order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Elements in paint order: lowest `z_index` first, ties in list order.
    #[must_use]
    pub fn elements_by_z(&self) -> Vec<&Element> {
        let mut ordered: Vec<_> = self.elements.iter().collect();
        ordered.sort_by_key(|e| e.styles.z_index);
        ordered
    }

    /// Find the topmost element at the given canvas coordinates.
    #[must_use]
    pub fn element_at(&self, x: f32, y: f32) -> Option<ElementId> {
        self.elements_by_z()
            .into_iter()
            .rev()
            .find(|e| e.contains_point(x, y))
            .map(Element::id)
    }

    /// Remove every element and clear the selection.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.selected = None;
    }

    /// Number of elements on the canvas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the canvas is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
