//! Math-aware rendering for model feedback.
//!
//! Splits free text into plain, inline-math (`$...$`) and display-math
//! (`$$...$$`) segments, then renders them to sanitized HTML or terminal text.

pub mod ir;
pub mod renderer;
pub mod typeset;

pub use ir::{Segment, SegmentParser};
pub use renderer::{escape_html, render_html, Renderer};
pub use typeset::{MathMlTypesetter, MathMode, TypesetError, Typesetter};
