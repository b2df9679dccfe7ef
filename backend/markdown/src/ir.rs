//! Feedback Intermediate Representation
//!
//! Parses model output into a flat list of typed segments so each kind can
//! take its own safe rendering path.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    /// Contents of a `$...$` region, delimiters excluded.
    InlineMath(String),
    /// Contents of a `$$...$$` region, delimiters excluded.
    BlockMath(String),
}

impl Segment {
    /// The segment as it appeared in the source text, delimiters included.
    pub fn source(&self) -> String {
        match self {
            Segment::Text(text) => text.clone(),
            Segment::InlineMath(latex) => format!("${latex}$"),
            Segment::BlockMath(latex) => format!("$${latex}$$"),
        }
    }
}

pub struct SegmentParser;

impl SegmentParser {
    /// Splits text into segments.
    ///
    /// `$$` regions are taken first over the whole text; `$` regions are then
    /// searched only in what remains, so a display region is never read as
    /// two inline ones. An unclosed delimiter or a region with only
    /// whitespace inside stays literal text.
    pub fn parse(text: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        for piece in split_delimited(text, "$$") {
            match piece {
                Piece::Delimited(latex) => segments.push(Segment::BlockMath(latex.to_string())),
                Piece::Plain(plain) => {
                    for inner in split_delimited(plain, "$") {
                        match inner {
                            Piece::Delimited(latex) => {
                                segments.push(Segment::InlineMath(latex.to_string()))
                            }
                            Piece::Plain(text) => push_text(&mut segments, text),
                        }
                    }
                }
            }
        }
        segments
    }
}

enum Piece<'a> {
    Plain(&'a str),
    Delimited(&'a str),
}

fn split_delimited<'a>(text: &'a str, delim: &str) -> Vec<Piece<'a>> {
    let mut pieces = Vec::new();
    let mut rest = text;
    // Start of the not-yet-emitted plain run within `rest`.
    let mut plain_start = 0;

    loop {
        let Some(open) = rest[plain_start..].find(delim).map(|i| i + plain_start) else {
            break;
        };
        let body_start = open + delim.len();
        let Some(close) = rest[body_start..].find(delim).map(|i| i + body_start) else {
            break;
        };

        let body = &rest[body_start..close];
        if body.trim().is_empty() {
            // Keep the empty pair as text and continue after it.
            plain_start = close + delim.len();
            continue;
        }

        if open > 0 {
            pieces.push(Piece::Plain(&rest[..open]));
        }
        pieces.push(Piece::Delimited(body));
        rest = &rest[close + delim.len()..];
        plain_start = 0;
    }

    if !rest.is_empty() {
        pieces.push(Piece::Plain(rest));
    }
    pieces
}

fn push_text(segments: &mut Vec<Segment>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Segment::Text(last)) = segments.last_mut() {
        last.push_str(text);
    } else {
        segments.push(Segment::Text(text.to_string()));
    }
}
