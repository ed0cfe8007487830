//! Standalone HTML export.
//!
//! Serializes an element list into one self-contained HTML document that
//! reproduces the absolute-positioned canvas layout. Output depends only on
//! the elements and the [`ExportConfig`], so the same input always yields
//! byte-identical HTML.

use std::fmt::Write;

use builder_core::{Canvas, Element, ElementKind, PageDocument};

use crate::error::RenderResult;
use crate::style::{escape_html, inline_style, px, HeightRule};

/// Configuration for HTML export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    /// Document title.
    pub title: String,
    /// Value of the `lang` attribute.
    pub lang: String,
    /// Width of the positioning area in pixels.
    pub canvas_width: f32,
    /// Minimum height of the positioning area in pixels.
    pub canvas_height: f32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            title: "My Website".to_string(),
            lang: "en".to_string(),
            canvas_width: 1200.0,
            canvas_height: 800.0,
        }
    }
}

impl ExportConfig {
    /// Override the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Exports element lists to HTML.
#[derive(Debug, Clone, Default)]
pub struct HtmlExporter {
    config: ExportConfig,
}

impl HtmlExporter {
    /// Create a new exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Export `elements` (in list order) as a complete HTML document.
    #[must_use]
    pub fn export(&self, elements: &[Element]) -> String {
        self.render(&self.config.title, elements)
    }

    /// Export every element on `canvas`.
    #[must_use]
    pub fn export_canvas(&self, canvas: &Canvas) -> String {
        self.export(canvas.elements())
    }

    /// Export a saved page.
    ///
    /// The page title wins over the configured one when set. Records with an
    /// unknown type or malformed styles are left out.
    #[must_use]
    pub fn export_document(&self, document: &PageDocument) -> String {
        let title = if document.title.trim().is_empty() {
            &self.config.title
        } else {
            &document.title
        };
        self.render(title, &document.to_elements())
    }

    /// Export a page document given as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not a page document.
    pub fn export_json(&self, json: &str) -> RenderResult<String> {
        let document = PageDocument::from_json(json)?;
        Ok(self.export_document(&document))
    }

    fn render(&self, title: &str, elements: &[Element]) -> String {
        let mut html = String::with_capacity(1024 + elements.len() * 320);
        let _ = writeln!(html, "<!DOCTYPE html>");
        let _ = writeln!(html, "<html lang=\"{}\">", escape_html(&self.config.lang));
        html.push_str("<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n");
        html.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
        );
        let _ = writeln!(html, "<title>{}</title>", escape_html(title));
        html.push_str("<style>body{margin:0;}p{margin:0;}</style>\n");
        html.push_str("</head>\n<body>\n");
        let _ = writeln!(
            html,
            "<div style=\"position:relative;width:{};min-height:{};\">",
            px(self.config.canvas_width),
            px(self.config.canvas_height),
        );

        for element in elements {
            render_element_html(&mut html, element);
        }

        html.push_str("</div>\n</body>\n</html>\n");
        tracing::debug!("Exported {} elements ({} bytes)", elements.len(), html.len());
        html
    }
}

/// Render a single element as one tag.
fn render_element_html(html: &mut String, element: &Element) {
    let style = escape_html(&inline_style(&element.styles, HeightRule::Exact));

    match &element.kind {
        ElementKind::Text { content } => {
            let _ = writeln!(html, "<p style=\"{style}\">{}</p>", escape_html(content));
        }
        ElementKind::Image { props } => {
            let _ = writeln!(
                html,
                "<img src=\"{}\" alt=\"{}\" style=\"{style}\">",
                escape_html(&props.src),
                escape_html(&props.alt),
            );
        }
        ElementKind::Button { content } => {
            let _ = writeln!(
                html,
                "<button type=\"button\" style=\"{style}\">{}</button>",
                escape_html(content),
            );
        }
        ElementKind::Container { content } => {
            let _ = writeln!(html, "<div style=\"{style}\">{}</div>", escape_html(content));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use builder_core::{ElementType, ElementUpdate};

    #[test]
    fn test_skeleton() {
        let html = HtmlExporter::with_defaults().export(&[]);
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
        assert!(html.contains("<title>My Website</title>"));
        assert!(html.contains("<body>"));
        assert!(html.ends_with("</body>\n</html>\n"));
    }

    #[test]
    fn test_text_element() {
        let mut canvas = Canvas::new();
        let id = canvas.add_element(ElementType::Text).id();
        canvas
            .update_element(id, &ElementUpdate::content("Hello"))
            .expect("update");

        let html = HtmlExporter::with_defaults().export_canvas(&canvas);
        assert!(html.contains(">Hello</p>"));
        assert!(html.contains("z-index:1;"));
        assert!(html.contains("position:absolute;left:100px;top:100px;"));
    }

    #[test]
    fn test_tag_per_variant() {
        let mut canvas = Canvas::new();
        for ty in ElementType::ALL {
            canvas.add_element(ty);
        }
        let html = HtmlExporter::with_defaults().export_canvas(&canvas);
        assert!(html.contains("<p style="));
        assert!(html.contains("<img src=\"\" alt=\"\" style="));
        assert!(html.contains("<button type=\"button\" style="));
        assert!(html.contains(">Click me</button>"));
        // Canvas wrapper plus the container element.
        assert_eq!(html.matches("<div style=").count(), 2);
    }

    #[test]
    fn test_content_is_escaped() {
        let mut canvas = Canvas::new();
        let id = canvas.add_element(ElementType::Container).id();
        canvas
            .update_element(id, &ElementUpdate::content("<script>alert('x')</script>"))
            .expect("update");
        let html = HtmlExporter::with_defaults().export_canvas(&canvas);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    }

    #[test]
    fn test_title_is_an_explicit_parameter() {
        let exporter = HtmlExporter::new(ExportConfig::default().with_title("Tom & Jerry"));
        let html = exporter.export(&[]);
        assert!(html.contains("<title>Tom &amp; Jerry</title>"));
    }

    #[test]
    fn test_export_json_rejects_non_documents() {
        let exporter = HtmlExporter::with_defaults();
        assert!(exporter.export_json("[1, 2, 3]").is_err());
        let html = exporter
            .export_json(r#"{"page_id":"p","title":"Saved","elements":[]}"#)
            .expect("document");
        assert!(html.contains("<title>Saved</title>"));
    }
}
