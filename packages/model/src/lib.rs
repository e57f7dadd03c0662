//! # Artboard Model
//!
//! In-memory scene graph for two-faced artboard designs.
//!
//! ```text
//! Design
//!  ├── DesignMeta      project name, product + design identity
//!  ├── CanvasState     size, shape, background, active face, zoom
//!  └── Vec<DesignElement>
//!        └── ElementKind  text | image | graphic | icon | table | unsupported
//! ```
//!
//! Every color-bearing field is sanitized on the way in, so anything held
//! by these types is safe to hand to a renderer.

pub mod canvas;
pub mod design;
pub mod element;
pub mod id_generator;
pub mod layering;

pub use canvas::{Background, CanvasShape, CanvasSize, CanvasState, Face, ZOOM_MAX, ZOOM_MIN};
pub use design::{Design, DesignMeta};
pub use element::{
    DesignElement, ElementKind, ElementType, Flip, FlipAxis, GraphicProps, IconProps, ImageProps,
    ShapeType, StrokeStyle, TextAlign, TextProps,
};
pub use id_generator::IdGenerator;
pub use layering::{max_z_index, min_z_index, paint_order, visible_on};
