//! # Render Dispatcher
//!
//! Maps `(element, active face)` to a virtual-DOM subtree.
//!
//! ## Rules
//!
//! - Elements not visible on the active face render as nothing
//! - Visible elements are painted in ascending z-index, ties in insertion order
//! - Each kind has exactly one renderer; unknown kinds get a placeholder
//! - Geometry faults (non-finite bounds) become an inline error node
//!
//! The zoom transform is applied once, at the artboard root.

use crate::shapes::render_graphic;
use crate::vdom::VNode;
use artboard_model::{
    paint_order, visible_on, CanvasShape, Design, DesignElement, ElementKind, Face, IconProps,
    ImageProps, TextProps,
};
use std::collections::HashSet;

/// Shown in place of an image that is missing or failed to load
pub const IMAGE_PLACEHOLDER: &str = "data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><rect width='100' height='100' fill='%23e5e7eb'/><path d='M20 70 L40 45 L55 60 L70 40 L85 70 Z' fill='%239ca3af'/></svg>";

/// Icon glyph size relative to the smaller side of the element box
pub const ICON_SCALE: f64 = 0.8;

/// Everything outside the design that affects rendering
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    pub active_face: Face,
    pub selected: Option<String>,
    /// Element in inline text editing
    pub editing: Option<String>,
    /// Image URIs that failed to load
    pub failed_images: HashSet<String>,
}

impl RenderContext {
    pub fn new(active_face: Face) -> Self {
        Self {
            active_face,
            ..Self::default()
        }
    }

    pub fn for_design(design: &Design) -> Self {
        Self::new(design.canvas.active_face)
    }

    pub fn with_selected(mut self, id: Option<&str>) -> Self {
        self.selected = id.map(str::to_string);
        self
    }

    pub fn with_editing(mut self, id: Option<&str>) -> Self {
        self.editing = id.map(str::to_string);
        self
    }

    pub fn mark_image_failed(&mut self, uri: impl Into<String>) {
        self.failed_images.insert(uri.into());
    }
}

/// Root artboard node: sized, shaped, background and zoom applied
pub fn render_artboard(design: &Design, ctx: &RenderContext) -> VNode {
    let canvas = &design.canvas;
    let mut root = VNode::element("div")
        .with_attr("class", "artboard")
        .with_attr("data-face", face_name(ctx.active_face))
        .with_style("position", "relative")
        .with_style("overflow", "hidden")
        .with_style("width", px(canvas.size.width))
        .with_style("height", px(canvas.size.height))
        .with_style("background", canvas.background().to_css())
        .with_style("transform", format!("scale({})", canvas.zoom_scale()))
        .with_style("transform-origin", "top left");

    if canvas.shape == CanvasShape::Circle {
        root = root.with_style("border-radius", "50%");
    }

    root.with_children(render_elements(&design.elements, ctx))
}

/// Visible elements in paint order
pub fn render_elements(elements: &[DesignElement], ctx: &RenderContext) -> Vec<VNode> {
    paint_order(visible_on(elements, ctx.active_face))
        .into_iter()
        .filter_map(|element| render_element(element, ctx))
        .collect()
}

/// Render one element, or nothing if it is hidden on the active face
pub fn render_element(element: &DesignElement, ctx: &RenderContext) -> Option<VNode> {
    if !element.visible_on(ctx.active_face) {
        return None;
    }

    let geometry = [element.x, element.y, element.width, element.height, element.rotation];
    if geometry.iter().any(|v| !v.is_finite()) {
        tracing::warn!(id = %element.id, "element has non-finite geometry");
        return Some(VNode::error(
            "element geometry is not finite",
            Some(element.id.clone()),
        ));
    }

    let editing = ctx.editing.as_deref() == Some(element.id.as_str());
    let body = match &element.kind {
        ElementKind::Text(text) => render_text(&element.id, text, editing),
        ElementKind::Image(image) => render_image(image, &ctx.failed_images),
        ElementKind::Graphic(graphic) => render_graphic(graphic),
        ElementKind::Icon(icon) => render_icon(icon, element.width, element.height),
        ElementKind::Table => placeholder("table-placeholder", "Table"),
        ElementKind::Unsupported { kind, .. } => {
            let label = match kind {
                Some(kind) => format!("Unsupported element: {}", kind),
                None => "Unsupported element".to_string(),
            };
            placeholder("unsupported-element", label)
        }
    };

    let mut classes = vec!["design-element"];
    if ctx.selected.as_deref() == Some(element.id.as_str()) {
        classes.push("selected");
    }
    if element.locked {
        classes.push("locked");
    }

    let mut wrapper = VNode::element("div")
        .with_key(element.id.clone())
        .with_attr("class", classes.join(" "))
        .with_attr("data-element-id", element.id.clone())
        .with_attr("data-type", element.kind.type_name().unwrap_or("unknown"))
        .with_style("position", "absolute")
        .with_style("left", px(element.x))
        .with_style("top", px(element.y))
        .with_style("width", px(element.width))
        .with_style("height", px(element.height))
        .with_style("z-index", element.z_index.to_string());

    if element.rotation != 0.0 {
        wrapper = wrapper.with_style("transform", format!("rotate({}deg)", element.rotation));
    }
    if element.opacity < 1.0 {
        wrapper = wrapper.with_style("opacity", element.opacity.to_string());
    }

    Some(wrapper.with_child(body))
}

fn render_text(id: &str, text: &TextProps, editing: bool) -> VNode {
    let mut node = if text.is_curved {
        curved_text(id, text)
    } else {
        VNode::element("div")
            .with_attr("class", "text")
            .with_child(VNode::text(text.content.clone()))
    };

    node = node
        .with_style("font-family", text.font_family.clone())
        .with_style("font-size", px(text.font_size))
        .with_style("font-weight", text.font_weight.clone())
        .with_style("font-style", text.font_style.clone())
        .with_style("text-decoration", text.text_decoration.clone())
        .with_style("text-align", text_align(text))
        .with_style("color", text.color.clone())
        .with_style("width", "100%")
        .with_style("height", "100%");

    if let Some(background) = &text.background_color {
        node = node.with_style("background-color", background.clone());
    }
    if text.border_radius > 0.0 {
        node = node.with_style("border-radius", px(text.border_radius));
    }
    if let Some(stroke) = &text.stroke {
        if text.stroke_width > 0.0 {
            node = node.with_style(
                "-webkit-text-stroke",
                format!("{} {}", px(text.stroke_width), stroke),
            );
        }
    }

    if editing {
        node = node
            .with_attr("contenteditable", "true")
            .with_attr("class", "text editing");
    }
    node
}

fn curved_text(id: &str, text: &TextProps) -> VNode {
    let path_id = format!("curve-{}", id);
    VNode::element("svg")
        .with_attr("class", "text curved")
        .with_attr("viewBox", "0 0 100 100")
        .with_child(
            VNode::element("path")
                .with_attr("id", path_id.clone())
                .with_attr("d", "M 5,70 Q 50,10 95,70")
                .with_attr("fill", "none"),
        )
        .with_child(
            VNode::element("text").with_attr("text-anchor", "middle").with_child(
                VNode::element("textPath")
                    .with_attr("href", format!("#{}", path_id))
                    .with_attr("startOffset", "50%")
                    .with_child(VNode::text(text.content.clone())),
            ),
        )
}

fn text_align(text: &TextProps) -> &'static str {
    use artboard_model::TextAlign;
    match text.text_align {
        TextAlign::Left => "left",
        TextAlign::Center => "center",
        TextAlign::Right => "right",
        TextAlign::Justify => "justify",
    }
}

fn render_image(image: &ImageProps, failed: &HashSet<String>) -> VNode {
    if image.content.is_empty() || failed.contains(&image.content) {
        return VNode::element("img")
            .with_attr("class", "image-placeholder")
            .with_attr("src", IMAGE_PLACEHOLDER)
            .with_style("width", "100%")
            .with_style("height", "100%");
    }

    let mut node = VNode::element("img")
        .with_attr("src", image.content.clone())
        .with_attr("draggable", "false")
        .with_style("width", "100%")
        .with_style("height", "100%")
        .with_style("object-fit", "cover")
        .with_style("filter", image_filter(image));

    if image.border_radius > 0.0 {
        node = node.with_style("border-radius", px(image.border_radius));
    }
    node
}

/// Filter chain followed by the hue/saturation/brightness adjustments
fn image_filter(image: &ImageProps) -> String {
    let adjustments = format!(
        "hue-rotate({}deg) saturate({}%) brightness({}%)",
        image.hue, image.sat, image.br
    );
    match image.filter.trim() {
        "" | "none" => adjustments,
        chain => format!("{} {}", chain, adjustments),
    }
}

fn render_icon(icon: &IconProps, width: f64, height: f64) -> VNode {
    VNode::element("i")
        .with_attr("class", "icon")
        .with_attr("data-icon", icon.icon.clone())
        .with_style("font-size", px(width.min(height) * ICON_SCALE))
        .with_style("color", icon.color.clone())
        .with_style("display", "flex")
        .with_style("align-items", "center")
        .with_style("justify-content", "center")
        .with_style("width", "100%")
        .with_style("height", "100%")
}

fn placeholder(class: &str, label: impl Into<String>) -> VNode {
    VNode::element("div")
        .with_attr("class", format!("placeholder {}", class))
        .with_style("width", "100%")
        .with_style("height", "100%")
        .with_style("border", "1px dashed #9ca3af")
        .with_child(VNode::text(label))
}

fn face_name(face: Face) -> &'static str {
    match face {
        Face::Front => "front",
        Face::Back => "back",
    }
}

pub(crate) fn px(value: f64) -> String {
    format!("{}px", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use artboard_model::{ElementType, ShapeType};

    fn element(id: &str, element_type: ElementType) -> DesignElement {
        DesignElement::new(id, ElementKind::with_defaults(element_type))
    }

    #[test]
    fn test_hidden_face_renders_nothing() {
        let el = element("a", ElementType::Text).on_face(Face::Back);
        assert!(render_element(&el, &RenderContext::new(Face::Front)).is_none());
        assert!(render_element(&el, &RenderContext::new(Face::Back)).is_some());
    }

    #[test]
    fn test_unset_face_renders_on_both() {
        let el = element("a", ElementType::Icon);
        for face in [Face::Front, Face::Back] {
            assert!(render_element(&el, &RenderContext::new(face)).is_some());
        }
    }

    #[test]
    fn test_icon_size_tracks_smaller_side() {
        let el = element("i", ElementType::Icon).with_bounds(0.0, 0.0, 200.0, 50.0);
        let node = render_element(&el, &RenderContext::default()).unwrap();
        assert_eq!(node.children()[0].style("font-size"), Some("40px"));
    }

    #[test]
    fn test_failed_image_uses_placeholder() {
        let mut el = element("img", ElementType::Image);
        if let ElementKind::Image(image) = &mut el.kind {
            image.content = "https://cdn.example/a.png".to_string();
        }

        let mut ctx = RenderContext::default();
        let ok = render_element(&el, &ctx).unwrap();
        assert_eq!(ok.children()[0].attr("src"), Some("https://cdn.example/a.png"));

        ctx.mark_image_failed("https://cdn.example/a.png");
        let failed = render_element(&el, &ctx).unwrap();
        assert_eq!(failed.children()[0].attr("src"), Some(IMAGE_PLACEHOLDER));
    }

    #[test]
    fn test_unsupported_and_table_placeholders() {
        let unknown = DesignElement::new(
            "u",
            ElementKind::Unsupported {
                kind: Some("chart".to_string()),
                raw: serde_json::Map::new(),
            },
        );
        let node = render_element(&unknown, &RenderContext::default()).unwrap();
        assert!(node.children()[0].has_class("unsupported-element"));
        assert_eq!(node.text_content(), "Unsupported element: chart");

        let table = element("t", ElementType::Table);
        let node = render_element(&table, &RenderContext::default()).unwrap();
        assert!(node.children()[0].has_class("table-placeholder"));
    }

    #[test]
    fn test_editing_text_is_editable() {
        let el = element("t", ElementType::Text);
        let ctx = RenderContext::default().with_editing(Some("t"));
        let node = render_element(&el, &ctx).unwrap();
        assert_eq!(node.children()[0].attr("contenteditable"), Some("true"));
    }

    #[test]
    fn test_non_finite_geometry_becomes_error_node() {
        let el = element("g", ElementType::Graphic).with_bounds(f64::NAN, 0.0, 10.0, 10.0);
        let node = render_element(&el, &RenderContext::default()).unwrap();
        assert!(matches!(node, VNode::Error { .. }));
    }

    #[test]
    fn test_graphic_dispatch() {
        let mut el = element("g", ElementType::Graphic);
        if let ElementKind::Graphic(graphic) = &mut el.kind {
            graphic.shape_type = ShapeType::Star;
        }
        let node = render_element(&el, &RenderContext::default()).unwrap();
        assert_eq!(node.children()[0].attr("data-shape"), Some("star"));
    }
}
