//! Inline CSS generation shared by the live display list and the HTML export.

use std::fmt::Write;

use builder_core::Styles;

/// How the box height is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeightRule {
    /// `height:<h>px`.
    Exact,
    /// `min-height:<h>px`, letting content grow the box.
    Minimum,
}

/// Format a pixel length. Negative zero prints as `0`.
#[must_use]
pub fn px(value: f32) -> String {
    // Adding +0.0 normalizes -0.0.
    format!("{}px", value + 0.0)
}

/// Build the inline style string for an element.
///
/// Field order is fixed so output is byte-stable:
/// `position; left; top; width; height; font-size; color; background-color;
/// padding; border-radius; font-weight; text-align; z-index;`
#[must_use]
pub fn inline_style(styles: &Styles, height: HeightRule) -> String {
    let height_key = match height {
        HeightRule::Exact => "height",
        HeightRule::Minimum => "min-height",
    };
    let mut css = String::with_capacity(256);
    let _ = write!(
        css,
        "position:{};left:{};top:{};width:{};{height_key}:{};font-size:{};color:{};background-color:{};padding:{};border-radius:{};font-weight:{};text-align:{};z-index:{};",
        styles.position.as_css(),
        px(styles.left),
        px(styles.top),
        px(styles.width),
        px(styles.height),
        px(styles.font_size),
        css_value(&styles.color),
        css_value(&styles.background_color),
        px(styles.padding),
        px(styles.border_radius),
        styles.font_weight.as_css(),
        styles.text_align.as_css(),
        styles.z_index,
    );
    css
}

/// Strip characters that would end a declaration early.
fn css_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '<' | '>' | '"'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Escape special HTML characters.
#[must_use]
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px_formats_integers_without_fraction() {
        assert_eq!(px(225.0), "225px");
        assert_eq!(px(12.5), "12.5px");
        assert_eq!(px(-0.0), "0px");
    }

    #[test]
    fn test_inline_style_field_order() {
        let styles = Styles {
            z_index: 4,
            ..Styles::default()
        };
        assert_eq!(
            inline_style(&styles, HeightRule::Exact),
            "position:absolute;left:0px;top:0px;width:200px;height:40px;font-size:16px;color:#000000;background-color:transparent;padding:8px;border-radius:0px;font-weight:normal;text-align:left;z-index:4;"
        );
        assert!(inline_style(&styles, HeightRule::Minimum).contains(";min-height:40px;"));
    }

    #[test]
    fn test_css_values_cannot_break_out() {
        let styles = Styles {
            color: "red;}</style><script>".to_string(),
            ..Styles::default()
        };
        let css = inline_style(&styles, HeightRule::Exact);
        assert!(css.contains("color:red/stylescript;"));
        assert!(!css.contains('<'));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }
}
