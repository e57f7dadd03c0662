//! Graphic primitives in a normalized 0..100 box.
//!
//! The SVG is stretched to the element bounds with
//! `preserveAspectRatio="none"`, so every shape is authored once.

use crate::vdom::VNode;
use artboard_model::{GraphicProps, ShapeType, StrokeStyle};
use std::f64::consts::PI;

pub const VIEW_BOX: &str = "0 0 100 100";

/// Stroke width used for line and arrow when none is set
const MIN_LINE_WIDTH: f64 = 2.0;

/// SVG path data for a shape
pub fn shape_path(shape: ShapeType) -> String {
    match shape {
        ShapeType::Square => "M 0,0 L 100,0 L 100,100 L 0,100 Z".to_string(),
        ShapeType::Circle => "M 50,0 A 50,50 0 1 1 50,100 A 50,50 0 1 1 50,0 Z".to_string(),
        ShapeType::Triangle => "M 50,0 L 100,100 L 0,100 Z".to_string(),
        ShapeType::Diamond => "M 50,0 L 100,50 L 50,100 L 0,50 Z".to_string(),
        ShapeType::Star => star_path(5, 0.5),
        ShapeType::Pentagon => polygon_path(5),
        ShapeType::Hexagon => polygon_path(6),
        ShapeType::Line => "M 0,50 L 100,50".to_string(),
        ShapeType::Arrow => "M 0,50 L 100,50 M 85,40 L 100,50 L 85,60".to_string(),
    }
}

/// Star with `points` tips; `inner_ratio` is the inner radius over the outer
pub fn star_path(points: u32, inner_ratio: f64) -> String {
    let r_outer = 50.0;
    let r_inner = r_outer * inner_ratio;
    let vertices = (0..points * 2).map(|i| {
        let angle = (i as f64 * PI / points as f64) - (PI / 2.0);
        let r = if i % 2 == 0 { r_outer } else { r_inner };
        (50.0 + r * angle.cos(), 50.0 + r * angle.sin())
    });
    closed_path(vertices)
}

/// Regular polygon with a vertex at the top
pub fn polygon_path(sides: u32) -> String {
    let vertices = (0..sides).map(|i| {
        let angle = (i as f64 * 2.0 * PI / sides as f64) - (PI / 2.0);
        (50.0 + 50.0 * angle.cos(), 50.0 + 50.0 * angle.sin())
    });
    closed_path(vertices)
}

fn closed_path(vertices: impl Iterator<Item = (f64, f64)>) -> String {
    let mut path = String::new();
    for (i, (x, y)) in vertices.enumerate() {
        let command = if i == 0 { "M" } else { " L" };
        path.push_str(&format!("{} {},{}", command, fmt_coord(x), fmt_coord(y)));
    }
    path.push_str(" Z");
    path
}

/// Two decimals, trailing zeros dropped
fn fmt_coord(value: f64) -> String {
    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

fn dash_array(style: StrokeStyle, width: f64) -> Option<String> {
    match style {
        StrokeStyle::Solid => None,
        StrokeStyle::Dashed => Some(format!("{} {}", width * 4.0, width * 2.0)),
        StrokeStyle::Dotted => Some(format!("{} {}", width, width)),
    }
}

/// `<svg>` subtree for a graphic element
pub fn render_graphic(graphic: &GraphicProps) -> VNode {
    let stroke_only = graphic.shape_type.is_stroke_only();
    let stroke_width = if stroke_only {
        graphic.stroke_width.max(MIN_LINE_WIDTH)
    } else {
        graphic.stroke_width
    };

    let fill = if stroke_only {
        "none".to_string()
    } else {
        graphic.fill_color.clone()
    };

    let mut path = VNode::element("path")
        .with_attr("d", shape_path(graphic.shape_type))
        .with_attr("fill", fill)
        .with_attr("vector-effect", "non-scaling-stroke");

    if stroke_width > 0.0 {
        path = path
            .with_attr("stroke", graphic.stroke_color.clone())
            .with_attr("stroke-width", stroke_width.to_string());
        if let Some(dashes) = dash_array(graphic.stroke_style, stroke_width) {
            path = path.with_attr("stroke-dasharray", dashes);
        }
    }

    let mut svg = VNode::element("svg")
        .with_attr("viewBox", VIEW_BOX)
        .with_attr("preserveAspectRatio", "none")
        .with_attr("data-shape", shape_name(graphic.shape_type))
        .with_style("width", "100%")
        .with_style("height", "100%")
        .with_style("overflow", "visible");

    let (sx, sy) = graphic.flip.scale();
    if (sx, sy) != (1.0, 1.0) {
        svg = svg.with_style("transform", format!("scale({}, {})", sx, sy));
    }

    svg.with_child(path)
}

fn shape_name(shape: ShapeType) -> &'static str {
    match shape {
        ShapeType::Square => "square",
        ShapeType::Circle => "circle",
        ShapeType::Triangle => "triangle",
        ShapeType::Star => "star",
        ShapeType::Pentagon => "pentagon",
        ShapeType::Hexagon => "hexagon",
        ShapeType::Diamond => "diamond",
        ShapeType::Line => "line",
        ShapeType::Arrow => "arrow",
    }
}
