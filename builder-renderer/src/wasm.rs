//! WebAssembly bindings for the browser editor.
//!
//! [`WasmBuilder`] owns one page's canvas, drag surface and property panel.
//! The JavaScript host forwards DOM input, re-renders from
//! [`WasmBuilder::get_display_list_json`] after every call that reports a
//! change, and asks for HTML when the user exports.

use wasm_bindgen::prelude::*;

use builder_core::{
    Canvas, CanvasBounds, CanvasSurface, ElementId, ElementUpdate, PageDocument, PointerEvent,
    PointerPhase, PointerPosition, Property, PropertyEditor,
};

use crate::display::DisplayList;
use crate::export::{ExportConfig, HtmlExporter};

/// Initialize the builder WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// One editable page for the browser.
#[wasm_bindgen]
pub struct WasmBuilder {
    canvas: Canvas,
    surface: CanvasSurface,
    editor: PropertyEditor,
    page_id: String,
    title: String,
}

#[wasm_bindgen]
impl WasmBuilder {
    /// Create an empty page.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(page_id: String) -> Self {
        Self {
            canvas: Canvas::new(),
            surface: CanvasSurface::with_defaults(),
            editor: PropertyEditor::new(),
            page_id,
            title: String::new(),
        }
    }

    /// Page title used for export.
    #[wasm_bindgen(getter)]
    #[must_use]
    pub fn title(&self) -> String {
        self.title.clone()
    }

    /// Set the page title.
    #[wasm_bindgen(setter)]
    pub fn set_title(&mut self, title: String) {
        self.title = title;
    }

    // ---------------------------------------------------------------------
    // Elements
    // ---------------------------------------------------------------------

    /// Add an element from the toolbar. Returns the new element's id.
    ///
    /// # Errors
    ///
    /// Returns an error string for an unknown element type.
    #[wasm_bindgen(js_name = addElement)]
    pub fn add_element(&mut self, element_type: &str) -> Result<String, String> {
        let element = self
            .canvas
            .add_element_named(element_type)
            .map_err(|e| e.to_string())?;
        Ok(element.id().to_string())
    }

    /// Merge a JSON partial update into an element.
    ///
    /// # Errors
    ///
    /// Returns an error string for malformed JSON or an unknown id.
    #[wasm_bindgen(js_name = updateElement)]
    pub fn update_element(&mut self, id: &str, update_json: &str) -> Result<(), String> {
        let id = ElementId::parse(id).map_err(|e| e.to_string())?;
        let update: ElementUpdate =
            serde_json::from_str(update_json).map_err(|e| e.to_string())?;
        self.canvas
            .update_element(id, &update)
            .map_err(|e| e.to_string())
    }

    /// Remove an element.
    ///
    /// # Errors
    ///
    /// Returns an error string for a malformed or unknown id.
    #[wasm_bindgen(js_name = deleteElement)]
    pub fn delete_element(&mut self, id: &str) -> Result<(), String> {
        let id = ElementId::parse(id).map_err(|e| e.to_string())?;
        self.canvas
            .delete_element(id)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    /// Select an element by id, or clear the selection with `undefined`.
    ///
    /// Unknown or malformed ids clear the selection.
    #[wasm_bindgen(js_name = selectElement)]
    pub fn select_element(&mut self, id: Option<String>) {
        let id = id.and_then(|raw| ElementId::parse(&raw).ok());
        self.canvas.select_element(id);
    }

    /// Id of the selected element.
    #[wasm_bindgen(js_name = selectedId)]
    #[must_use]
    pub fn selected_id(&self) -> Option<String> {
        self.canvas.selected_id().map(|id| id.to_string())
    }

    /// All elements in list order as JSON.
    #[wasm_bindgen(js_name = getElementsJson)]
    #[must_use]
    pub fn get_elements_json(&self) -> String {
        serde_json::to_string(self.canvas.elements()).unwrap_or_default()
    }

    /// The live display list as JSON.
    #[wasm_bindgen(js_name = getDisplayListJson)]
    #[must_use]
    pub fn get_display_list_json(&self) -> String {
        let list = DisplayList::build(&self.canvas, self.surface.config().resize_handle_size);
        serde_json::to_string(&list).unwrap_or_default()
    }

    // ---------------------------------------------------------------------
    // Pointer input
    // ---------------------------------------------------------------------

    /// Set the canvas origin in client coordinates.
    #[wasm_bindgen(js_name = setBounds)]
    pub fn set_bounds(&mut self, left: f32, top: f32) {
        self.surface.set_bounds(CanvasBounds { left, top });
    }

    /// Read the canvas origin from its DOM node.
    #[wasm_bindgen(js_name = setBoundsFromElement)]
    #[allow(clippy::cast_possible_truncation)]
    pub fn set_bounds_from_element(&mut self, node: &web_sys::Element) {
        let rect = node.get_bounding_client_rect();
        self.set_bounds(rect.left() as f32, rect.top() as f32);
    }

    /// Pointer pressed; the target is found by hit testing.
    ///
    /// Prefer `pointerDownOn` when the DOM event target is known, since the
    /// rendered box of a text element can be taller than its stored height.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        self.surface
            .pointer_down(&mut self.canvas, PointerPosition::new(x, y))
    }

    /// Pointer pressed on the element with `id`.
    ///
    /// # Errors
    ///
    /// Returns an error string for a malformed id.
    #[wasm_bindgen(js_name = pointerDownOn)]
    pub fn pointer_down_on(&mut self, id: &str, x: f32, y: f32) -> Result<bool, String> {
        let id = ElementId::parse(id).map_err(|e| e.to_string())?;
        Ok(self
            .surface
            .pointer_down_on(&mut self.canvas, id, PointerPosition::new(x, y)))
    }

    /// Pointer moved.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.surface
            .pointer_move(&mut self.canvas, PointerPosition::new(x, y))
    }

    /// Pointer released.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) {
        self.surface.end_gesture();
    }

    /// Pointer left the canvas.
    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self) {
        self.surface.end_gesture();
    }

    /// Pointer input cancelled.
    #[wasm_bindgen(js_name = pointerCancel)]
    pub fn pointer_cancel(&mut self) {
        self.surface.end_gesture();
    }

    /// Forward a DOM mouse event.
    ///
    /// # Errors
    ///
    /// Returns an error string for an unknown phase.
    #[wasm_bindgen(js_name = mouseEvent)]
    #[allow(clippy::cast_precision_loss)]
    pub fn mouse_event(&mut self, phase: &str, event: &web_sys::MouseEvent) -> Result<bool, String> {
        let phase = parse_phase(phase)?;
        let position = PointerPosition::new(event.client_x() as f32, event.client_y() as f32);
        Ok(self.dispatch(phase, Some(position)))
    }

    /// Forward a DOM touch event. The first active touch drives the pointer.
    ///
    /// # Errors
    ///
    /// Returns an error string for an unknown phase.
    #[wasm_bindgen(js_name = touchEvent)]
    #[allow(clippy::cast_precision_loss)]
    pub fn touch_event(&mut self, phase: &str, event: &web_sys::TouchEvent) -> Result<bool, String> {
        let phase = parse_phase(phase)?;
        let position = event
            .touches()
            .get(0)
            .map(|touch| PointerPosition::new(touch.client_x() as f32, touch.client_y() as f32));
        Ok(self.dispatch(phase, position))
    }

    // ---------------------------------------------------------------------
    // Property panel
    // ---------------------------------------------------------------------

    /// Fields of the selected element as JSON, or `undefined` when the panel
    /// is closed.
    #[wasm_bindgen(js_name = getFieldsJson)]
    #[must_use]
    pub fn get_fields_json(&self) -> Option<String> {
        let fields = self.editor.fields(&self.canvas)?;
        serde_json::to_string(&fields).ok()
    }

    /// Apply one input change to the selected element.
    ///
    /// # Errors
    ///
    /// Returns an error string for an unknown key, a rejected value, or no
    /// selection.
    #[wasm_bindgen(js_name = setProperty)]
    pub fn set_property(&mut self, key: &str, value: &str) -> Result<(), String> {
        let property =
            Property::from_key(key).ok_or_else(|| format!("Unknown property: {key}"))?;
        self.editor
            .set(&mut self.canvas, property, value)
            .map_err(|e| e.to_string())
    }

    /// Set the selected image's source and alt text.
    ///
    /// # Errors
    ///
    /// Returns an error string if the selection is not an image.
    #[wasm_bindgen(js_name = setImage)]
    pub fn set_image(&mut self, src: &str, alt: &str) -> Result<(), String> {
        self.editor
            .set_image(&mut self.canvas, src, alt)
            .map_err(|e| e.to_string())
    }

    /// Delete the selected element. Returns whether anything was removed.
    #[wasm_bindgen(js_name = deleteSelected)]
    pub fn delete_selected(&mut self) -> bool {
        self.editor.delete_selected(&mut self.canvas).is_some()
    }

    // ---------------------------------------------------------------------
    // Documents and export
    // ---------------------------------------------------------------------

    /// Export the page as standalone HTML.
    ///
    /// `title` overrides the page title for this export.
    #[wasm_bindgen(js_name = exportHtml)]
    #[must_use]
    pub fn export_html(&self, title: Option<String>) -> String {
        let mut config = ExportConfig::default();
        if let Some(title) = title.or_else(|| Some(self.title.clone()).filter(|t| !t.is_empty())) {
            config.title = title;
        }
        HtmlExporter::new(config).export_canvas(&self.canvas)
    }

    /// Replace the page with a saved document.
    ///
    /// # Errors
    ///
    /// Returns an error string if `json` is not a page document.
    #[wasm_bindgen(js_name = loadDocument)]
    pub fn load_document(&mut self, json: &str) -> Result<(), String> {
        let document = PageDocument::from_json(json).map_err(|e| e.to_string())?;
        self.page_id.clone_from(&document.page_id);
        self.title.clone_from(&document.title);
        self.canvas = document.into_canvas();
        self.surface.end_gesture();
        Ok(())
    }

    /// Snapshot the page as a document. `timestamp` is milliseconds since
    /// the Unix epoch (`Date.now()`).
    ///
    /// # Errors
    ///
    /// Returns an error string if serialization fails.
    #[wasm_bindgen(js_name = toDocumentJson)]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_document_json(&self, timestamp: f64) -> Result<String, String> {
        PageDocument::from_canvas(
            self.page_id.clone(),
            self.title.clone(),
            &self.canvas,
            timestamp.max(0.0) as u64,
        )
        .to_json()
        .map_err(|e| e.to_string())
    }
}

impl WasmBuilder {
    fn dispatch(&mut self, phase: PointerPhase, position: Option<PointerPosition>) -> bool {
        match PointerEvent::from_phase(phase, position) {
            Some(event) => self.surface.handle(&mut self.canvas, event),
            None => false,
        }
    }
}

fn parse_phase(phase: &str) -> Result<PointerPhase, String> {
    match phase.to_ascii_lowercase().as_str() {
        "down" | "mousedown" | "touchstart" => Ok(PointerPhase::Down),
        "move" | "mousemove" | "touchmove" => Ok(PointerPhase::Move),
        "up" | "mouseup" | "touchend" => Ok(PointerPhase::Up),
        "leave" | "mouseleave" => Ok(PointerPhase::Leave),
        "cancel" | "touchcancel" => Ok(PointerPhase::Cancel),
        other => Err(format!("Unknown pointer phase: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_drag_element() {
        let mut builder = WasmBuilder::new("home".to_string());
        let id = builder.add_element("text").expect("add");
        assert_eq!(builder.selected_id(), Some(id.clone()));

        assert!(!builder.pointer_down(100.0, 100.0));
        assert!(builder.pointer_move(300.0, 250.0));
        builder.pointer_up();

        let elements: serde_json::Value =
            serde_json::from_str(&builder.get_elements_json()).expect("json");
        assert_eq!(elements[0]["id"], id);
        assert_eq!(elements[0]["styles"]["left"], 225.0);
        assert_eq!(elements[0]["styles"]["top"], 230.0);
    }

    #[test]
    fn test_unknown_type_is_an_error() {
        let mut builder = WasmBuilder::new("home".to_string());
        assert!(builder.add_element("video").is_err());
        assert_eq!(builder.get_elements_json(), "[]");
    }

    #[test]
    fn test_update_element_from_json() {
        let mut builder = WasmBuilder::new("home".to_string());
        let id = builder.add_element("button").expect("add");
        builder
            .update_element(&id, r#"{"content":"Buy","width":180}"#)
            .expect("update");
        assert!(builder.update_element(&id, "{ nope").is_err());
        assert!(builder
            .update_element(&ElementId::new().to_string(), "{}")
            .is_err());

        let html = builder.export_html(None);
        assert!(html.contains(">Buy</button>"));
        assert!(html.contains("width:180px;"));
    }

    #[test]
    fn test_property_panel_follows_selection() {
        let mut builder = WasmBuilder::new("home".to_string());
        builder.add_element("text").expect("add");
        assert!(builder.get_fields_json().is_some());

        builder.set_property("fontSize", "24").expect("set");
        assert!(builder.set_property("fontSize", "abc").is_err());
        assert!(builder.set_property("shadow", "1").is_err());

        builder.select_element(None);
        assert!(builder.get_fields_json().is_none());
        assert!(builder.set_property("fontSize", "30").is_err());
    }

    #[test]
    fn test_delete_selected() {
        let mut builder = WasmBuilder::new("home".to_string());
        builder.add_element("container").expect("add");
        assert!(builder.delete_selected());
        assert!(!builder.delete_selected());
        assert!(builder.selected_id().is_none());
    }

    #[test]
    fn test_document_round_trip_keeps_title() {
        let mut builder = WasmBuilder::new("home".to_string());
        builder.set_title("Landing".to_string());
        builder.add_element("image").expect("add");
        let json = builder.to_document_json(1_700_000_000_000.0).expect("json");

        let mut restored = WasmBuilder::new("other".to_string());
        restored.load_document(&json).expect("load");
        assert_eq!(restored.title(), "Landing");
        assert!(restored.selected_id().is_none());
        assert!(restored.export_html(None).contains("<title>Landing</title>"));
        assert!(restored
            .export_html(Some("Override".to_string()))
            .contains("<title>Override</title>"));
    }

    #[test]
    fn test_parse_phase() {
        assert_eq!(parse_phase("mousedown"), Ok(PointerPhase::Down));
        assert_eq!(parse_phase("touchend"), Ok(PointerPhase::Up));
        assert!(parse_phase("wheel").is_err());
    }
}
