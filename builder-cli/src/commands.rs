//! Subcommand implementations.

use std::fmt::Write;
use std::path::Path;

use anyhow::Context;
use builder_core::{Canvas, Element, PageDocument, PageStore};
use builder_renderer::HtmlExporter;

/// Spacing between scaffolded elements so they do not stack exactly.
const SCAFFOLD_STEP: f32 = 40.0;

/// Read a page document from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a page document.
pub fn read_document(path: &Path) -> anyhow::Result<PageDocument> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    PageDocument::from_json(&json)
        .with_context(|| format!("Invalid page document {}", path.display()))
}

/// Export the page at `input` as HTML.
///
/// `title` overrides the page title when given.
///
/// # Errors
///
/// Returns an error if the page cannot be read.
pub fn export(input: &Path, title: Option<&str>) -> anyhow::Result<String> {
    let mut document = read_document(input)?;
    if let Some(title) = title {
        document.title = title.to_string();
    }
    let html = HtmlExporter::with_defaults().export_document(&document);
    tracing::info!(
        "Exported page {} ({} records)",
        document.page_id,
        document.elements.len()
    );
    Ok(html)
}

/// One summary line per element, topmost last.
///
/// # Errors
///
/// Returns an error if the page cannot be read.
pub fn inspect(input: &Path) -> anyhow::Result<String> {
    let document = read_document(input)?;
    let records = document.elements.len();
    let page_id = document.page_id.clone();
    let canvas = document.into_canvas();

    let mut out = String::new();
    let _ = writeln!(out, "page {page_id}: {} elements", canvas.len());
    for element in canvas.elements_by_z() {
        let _ = writeln!(out, "{}", summary_line(element));
    }
    if canvas.len() < records {
        let _ = writeln!(out, "({} records skipped)", records - canvas.len());
    }
    Ok(out)
}

fn summary_line(element: &Element) -> String {
    let s = &element.styles;
    format!(
        "z={:<3} {:<9} at ({}, {}) size {}x{} {:?}",
        s.z_index,
        element.element_type().as_str(),
        s.left,
        s.top,
        s.width,
        s.height,
        element.content(),
    )
}

/// Create a page holding one element per entry of `types` and save it.
///
/// Elements are placed diagonally from the default drop point. Nothing is
/// saved if any type is unknown.
///
/// # Errors
///
/// Returns an error for an unknown element type or if the page cannot be
/// saved.
pub fn scaffold(
    store: &impl PageStore,
    page_id: &str,
    title: &str,
    types: &[String],
) -> anyhow::Result<PageDocument> {
    let mut canvas = Canvas::new();
    let (x, y) = builder_core::canvas::DEFAULT_DROP_POINT;
    for (step, name) in (0u16..).zip(types) {
        let ty = name
            .trim()
            .parse()
            .with_context(|| format!("Cannot place element {name:?}"))?;
        let offset = f32::from(step) * SCAFFOLD_STEP;
        canvas.add_element_at(ty, x + offset, y + offset);
    }
    canvas.select_element(None);

    let document = store
        .save_canvas(page_id, title, &canvas)
        .with_context(|| format!("Failed to save page {page_id}"))?;
    tracing::info!("Created page {page_id} with {} elements", canvas.len());
    Ok(document)
}
