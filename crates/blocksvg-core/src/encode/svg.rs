//! SVG document emission.
//!
//! Output layout, one element per line with two-space indentation:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 W H" width="W" height="H">
//!   <!-- comment -->
//!   <g fill="rgb(R,G,B)">
//!     <rect x="0" y="0" width="4" height="4"/>
//!   </g>
//! </svg>
//! ```
//!
//! Lines are joined with `\n` and there is no trailing newline.

use serde::{Deserialize, Serialize};

use crate::merge::ColorGroup;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Configuration options for SVG output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SvgOptions {
    /// Attribution comments emitted right after the opening `<svg>` tag
    pub comments: Vec<String>,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            comments: vec![format!("Generated by blocksvg {}", env!("CARGO_PKG_VERSION"))],
        }
    }
}

impl SvgOptions {
    /// Create options with the default attribution comment
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribution comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comments.push(comment.into());
        self
    }

    /// Drop all attribution comments
    pub fn without_comments(mut self) -> Self {
        self.comments.clear();
        self
    }
}

/// Merged color groups ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SvgDocument {
    /// Width of the sampled image in pixels
    pub width: u32,
    /// Height of the sampled image in pixels
    pub height: u32,
    /// Color groups in first-encountered order
    pub groups: Vec<ColorGroup>,
}

impl SvgDocument {
    /// Number of `<g>` elements.
    pub fn color_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of `<rect>` elements.
    pub fn rect_count(&self) -> usize {
        self.groups.iter().map(|g| g.rects.len()).sum()
    }

    /// Render the document as SVG text.
    pub fn render(&self, options: &SvgOptions) -> String {
        let capacity = 3 + options.comments.len() + self.groups.len() * 2 + self.rect_count();
        let mut lines: Vec<String> = Vec::with_capacity(capacity);

        lines.push(r#"<?xml version="1.0" encoding="UTF-8"?>"#.to_string());
        lines.push(format!(
            r#"<svg xmlns="{}" viewBox="0 0 {} {}" width="{}" height="{}">"#,
            SVG_NS, self.width, self.height, self.width, self.height
        ));

        for comment in &options.comments {
            lines.push(format!("  <!-- {} -->", sanitize_comment(comment)));
        }

        for group in &self.groups {
            lines.push(format!(r#"  <g fill="{}">"#, group.color));
            lines.extend(group.rects.iter().map(|r| {
                format!(
                    r#"    <rect x="{}" y="{}" width="{}" height="{}"/>"#,
                    r.x, r.y, r.width, r.height
                )
            }));
            lines.push("  </g>".to_string());
        }

        lines.push("</svg>".to_string());
        lines.join("\n")
    }
}

/// Make text safe inside `<!-- ... -->`.
///
/// Control characters become spaces and U+FFFE/U+FFFF are dropped. Every
/// `--` run is then broken up since XML forbids it inside a comment.
fn sanitize_comment(text: &str) -> String {
    let mut out: String = text
        .chars()
        .filter(|&c| !matches!(c, '\u{FFFE}' | '\u{FFFF}'))
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    while out.contains("--") {
        out = out.replace("--", "- -");
    }
    out
}
