//! # Artboard Render
//!
//! Turns a [`Design`](artboard_model::Design) into a serializable
//! virtual-DOM tree. Pure functions only: no I/O and no layout.
//!
//! ```text
//! Design ──▶ visible_on(face) ──▶ paint_order ──▶ per-kind renderer ──▶ VNode
//! ```
//!
//! The main artboard and the thumbnails share one visibility predicate
//! and one paint order, so the two can never disagree about what is on a face.

pub mod dispatcher;
pub mod preview;
pub mod shapes;
pub mod vdom;

pub use dispatcher::{render_artboard, render_element, render_elements, RenderContext, IMAGE_PLACEHOLDER};
pub use preview::{render_faces, render_thumbnail};
pub use vdom::VNode;
