//! Math typesetting: LaTeX source to sanitized MathML.

use ammonia::Builder;
use latex2mathml::{latex_to_mathml, DisplayStyle};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathMode {
    Inline,
    Display,
}

#[derive(Debug, Error)]
pub enum TypesetError {
    #[error("invalid LaTeX `{latex}`: {message}")]
    Syntax { latex: String, message: String },

    #[error("typeset output for `{0}` was empty after sanitizing")]
    Rejected(String),
}

/// Turns one LaTeX expression into HTML-embeddable markup.
///
/// Implementations must return markup that is safe to insert into a page.
pub trait Typesetter: Send + Sync {
    fn typeset(&self, latex: &str, mode: MathMode) -> Result<String, TypesetError>;
}

const PARSE_ERROR_MARKER: &str = "[PARSE ERROR:";

static MATHML_TAGS: &[&str] = &[
    "math", "semantics", "annotation", "mrow", "mi", "mn", "mo", "ms", "mtext", "mspace",
    "msub", "msup", "msubsup", "munder", "mover", "munderover", "mfrac", "msqrt", "mroot",
    "mstyle", "mpadded", "mphantom", "menclose", "mtable", "mtr", "mtd", "mlabeledtr",
    "mmultiscripts", "mprescripts", "none",
];

static MATHML_ATTRIBUTES: &[&str] = &[
    "mathvariant", "stretchy", "fence", "separator", "lspace", "rspace", "accent",
    "accentunder", "columnalign", "rowalign", "columnspacing", "rowspacing", "displaystyle",
    "scriptlevel", "linethickness", "movablelimits", "largeop", "symmetric", "minsize",
    "maxsize", "width", "height", "depth", "notation", "form",
];

/// Typesets with `latex2mathml` and passes the result through an `ammonia`
/// allowlist of MathML elements and attributes.
pub struct MathMlTypesetter {
    sanitizer: Builder<'static>,
}

impl MathMlTypesetter {
    pub fn new() -> Self {
        let mut sanitizer = Builder::empty();
        sanitizer
            .add_tags(MATHML_TAGS.iter())
            .add_tag_attributes("math", &["display"])
            .add_generic_attributes(MATHML_ATTRIBUTES.iter());
        Self { sanitizer }
    }
}

impl Default for MathMlTypesetter {
    fn default() -> Self {
        Self::new()
    }
}

impl Typesetter for MathMlTypesetter {
    fn typeset(&self, latex: &str, mode: MathMode) -> Result<String, TypesetError> {
        let style = match mode {
            MathMode::Inline => DisplayStyle::Inline,
            MathMode::Display => DisplayStyle::Block,
        };
        let raw = latex_to_mathml(latex.trim(), style).map_err(|e| TypesetError::Syntax {
            latex: latex.to_string(),
            message: e.to_string(),
        })?;
        // latex2mathml reports many syntax errors inline instead of as `Err`.
        if let Some(at) = raw.find(PARSE_ERROR_MARKER) {
            let message = raw[at + PARSE_ERROR_MARKER.len()..]
                .split(']')
                .next()
                .unwrap_or_default()
                .trim()
                .to_string();
            return Err(TypesetError::Syntax {
                latex: latex.to_string(),
                message,
            });
        }

        let clean = self.sanitizer.clean(&raw).to_string();
        if !clean.contains("<math") {
            return Err(TypesetError::Rejected(latex.to_string()));
        }
        Ok(clean)
    }
}
