//! Renderers for the feedback IR
//!
//! HTML for pages, plain text for terminals.

use tracing::debug;

use crate::ir::{Segment, SegmentParser};
use crate::typeset::{MathMlTypesetter, MathMode, Typesetter};

pub struct Renderer;

impl Renderer {
    /// Renders segments to an HTML fragment.
    ///
    /// Text is escaped and newlines become `<br />`. Math goes through the
    /// typesetter; a region that fails to typeset is shown as its escaped
    /// source, delimiters included.
    pub fn to_html(segments: &[Segment], typesetter: &dyn Typesetter) -> String {
        let mut output = String::new();
        for segment in segments {
            let typeset = match segment {
                Segment::Text(text) => {
                    push_text(&mut output, text);
                    continue;
                }
                Segment::InlineMath(latex) => typesetter.typeset(latex, MathMode::Inline),
                Segment::BlockMath(latex) => typesetter.typeset(latex, MathMode::Display),
            };
            match typeset {
                Ok(markup) => output.push_str(&markup),
                Err(e) => {
                    debug!(error = %e, "Math region left as source");
                    push_text(&mut output, &segment.source());
                }
            }
        }
        output
    }

    /// Renders segments for a terminal: text verbatim, inline math in `$`,
    /// display math on its own line.
    pub fn to_plain_text(segments: &[Segment]) -> String {
        let mut output = String::new();
        let mut after_block = false;
        for segment in segments {
            match segment {
                Segment::Text(text) => {
                    let text = if after_block {
                        text.strip_prefix('\n').unwrap_or(text)
                    } else {
                        text
                    };
                    output.push_str(text);
                    after_block = false;
                }
                Segment::InlineMath(latex) => {
                    output.push('$');
                    output.push_str(latex.trim());
                    output.push('$');
                    after_block = false;
                }
                Segment::BlockMath(latex) => {
                    if !output.is_empty() && !output.ends_with('\n') {
                        output.push('\n');
                    }
                    output.push_str("    ");
                    output.push_str(latex.trim());
                    output.push('\n');
                    after_block = true;
                }
            }
        }
        output
    }
}

/// Parse and render feedback text to HTML with the default MathML typesetter.
pub fn render_html(text: &str) -> String {
    Renderer::to_html(&SegmentParser::parse(text), &MathMlTypesetter::new())
}

/// Escape text for use in HTML element content or quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn push_text(output: &mut String, text: &str) {
    let normalized = text.replace("\r\n", "\n");
    output.push_str(&escape_html(&normalized).replace('\n', "<br />"));
}
