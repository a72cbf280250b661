//! Chart construction, independent of any UI toolkit.
//!
//! [`scene::render`] turns a dataset and a selected code into a
//! [`scene::RenderOutput`]; the egui painter and the SVG writer both draw
//! from that description.

pub mod format;
pub mod scale;
pub mod scene;
pub mod svg;
pub mod wrap;

pub use scene::{render, RenderOutput};
pub use wrap::TextMeasure;
#[cfg(test)]
pub use wrap::ApproxMeasure;
