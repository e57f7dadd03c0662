//! Mini previews of each face for side panels and the save payload.
//!
//! Same visibility predicate and paint order as the main artboard, scaled
//! to fit a square of `max_px`. Selection and editing state never show here.

use crate::dispatcher::{px, render_elements, RenderContext};
use crate::vdom::VNode;
use artboard_model::{CanvasShape, Design, Face};

/// Scale that fits the canvas into a `max_px` square
pub fn thumbnail_scale(design: &Design, max_px: f64) -> f64 {
    let size = design.canvas.size;
    let longest = size.width.max(size.height);
    if longest <= 0.0 || !longest.is_finite() {
        return 1.0;
    }
    max_px / longest
}

pub fn render_thumbnail(design: &Design, face: Face, max_px: f64) -> VNode {
    let scale = thumbnail_scale(design, max_px);
    let size = design.canvas.size;
    let ctx = RenderContext::new(face);

    let mut inner = VNode::element("div")
        .with_style("position", "relative")
        .with_style("width", px(size.width))
        .with_style("height", px(size.height))
        .with_style("background", design.canvas.background().to_css())
        .with_style("transform", format!("scale({})", scale))
        .with_style("transform-origin", "top left")
        .with_children(render_elements(&design.elements, &ctx));

    if design.canvas.shape == CanvasShape::Circle {
        inner = inner.with_style("border-radius", "50%");
    }

    VNode::element("div")
        .with_attr("class", "thumbnail")
        .with_attr("data-face", format!("{:?}", face).to_lowercase())
        .with_style("overflow", "hidden")
        .with_style("width", px(size.width * scale))
        .with_style("height", px(size.height * scale))
        .with_child(inner)
}

/// Thumbnails for both faces, front first
pub fn render_faces(design: &Design, max_px: f64) -> Vec<(Face, VNode)> {
    [Face::Front, Face::Back]
        .into_iter()
        .map(|face| (face, render_thumbnail(design, face, max_px)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use artboard_model::{CanvasSize, CanvasState, DesignElement, ElementKind, ElementType};

    fn design() -> Design {
        let mut design = Design::new(
            "preview",
            CanvasState::new(
                CanvasSize {
                    width: 800.0,
                    height: 400.0,
                },
                CanvasShape::Rectangle,
            ),
        );
        design.elements = vec![
            DesignElement::new("front", ElementKind::with_defaults(ElementType::Text)).on_face(Face::Front),
            DesignElement::new("back", ElementKind::with_defaults(ElementType::Icon)).on_face(Face::Back),
            DesignElement::new("both", ElementKind::Table),
        ];
        design
    }

    #[test]
    fn test_thumbnail_size() {
        let node = render_thumbnail(&design(), Face::Front, 200.0);
        assert_eq!(node.style("width"), Some("200px"));
        assert_eq!(node.style("height"), Some("100px"));
    }

    #[test]
    fn test_faces_filter_like_the_artboard() {
        let faces = render_faces(&design(), 100.0);
        let keys = |node: &VNode| -> Vec<String> {
            node.children()[0]
                .children()
                .iter()
                .filter_map(|n| n.key().map(str::to_string))
                .collect()
        };
        assert_eq!(keys(&faces[0].1), vec!["front", "both"]);
        assert_eq!(keys(&faces[1].1), vec!["back", "both"]);
    }
}
