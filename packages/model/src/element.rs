//! # Design Elements
//!
//! A [`DesignElement`] is the common geometry shared by every element plus
//! an [`ElementKind`] carrying the variant-specific properties. Optional
//! properties get explicit defaults here, at construction, never at render
//! time.

use crate::canvas::Face;
use artboard_common::{sanitize, sanitize_opt};
use serde::{Deserialize, Serialize};

/// Discriminant of the supported element variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Text,
    Image,
    Graphic,
    Icon,
    Table,
}

impl ElementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Text => "text",
            ElementType::Image => "image",
            ElementType::Graphic => "graphic",
            ElementType::Icon => "icon",
            ElementType::Table => "table",
        }
    }

    pub fn parse(name: &str) -> Option<ElementType> {
        match name {
            "text" => Some(ElementType::Text),
            "image" => Some(ElementType::Image),
            "graphic" => Some(ElementType::Graphic),
            "icon" => Some(ElementType::Icon),
            "table" => Some(ElementType::Table),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    #[default]
    Square,
    Circle,
    Triangle,
    Star,
    Pentagon,
    Hexagon,
    Diamond,
    Line,
    Arrow,
}

impl ShapeType {
    /// Line and arrow primitives have no interior to fill
    pub fn is_stroke_only(&self) -> bool {
        matches!(self, ShapeType::Line | ShapeType::Arrow)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Flip {
    #[default]
    None,
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipAxis {
    Horizontal,
    Vertical,
}

impl Flip {
    /// Toggle along an axis: flipping the current axis again clears it
    pub fn toggled(self, axis: FlipAxis) -> Flip {
        match (self, axis) {
            (Flip::Horizontal, FlipAxis::Horizontal) => Flip::None,
            (Flip::Vertical, FlipAxis::Vertical) => Flip::None,
            (_, FlipAxis::Horizontal) => Flip::Horizontal,
            (_, FlipAxis::Vertical) => Flip::Vertical,
        }
    }

    /// (x-scale, y-scale) applied to the fill
    pub fn scale(self) -> (f64, f64) {
        match self {
            Flip::None => (1.0, 1.0),
            Flip::Horizontal => (-1.0, 1.0),
            Flip::Vertical => (1.0, -1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextProps {
    pub content: String,
    pub font_family: String,
    pub font_size: f64,
    pub font_weight: String,
    pub font_style: String,
    pub text_decoration: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    pub text_align: TextAlign,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    pub stroke_width: f64,
    pub border_radius: f64,
    pub is_curved: bool,
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            content: String::new(),
            font_family: "Arial".to_string(),
            font_size: 16.0,
            font_weight: "normal".to_string(),
            font_style: "normal".to_string(),
            text_decoration: "none".to_string(),
            color: "#000000".to_string(),
            background_color: None,
            text_align: TextAlign::Left,
            stroke: None,
            stroke_width: 0.0,
            border_radius: 0.0,
            is_curved: false,
        }
    }
}

impl TextProps {
    pub fn is_bold(&self) -> bool {
        match self.font_weight.as_str() {
            "bold" | "bolder" => true,
            weight => weight.parse::<u32>().map(|w| w >= 600).unwrap_or(false),
        }
    }

    pub fn is_italic(&self) -> bool {
        self.font_style == "italic" || self.font_style == "oblique"
    }

    pub fn is_underlined(&self) -> bool {
        self.text_decoration.split_whitespace().any(|d| d == "underline")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageProps {
    /// Object-store URL of the bitmap
    pub content: String,
    pub filter: String,
    pub hue: f64,
    pub sat: f64,
    pub br: f64,
    pub border_radius: f64,
}

impl Default for ImageProps {
    fn default() -> Self {
        Self {
            content: String::new(),
            filter: String::new(),
            hue: 0.0,
            sat: 100.0,
            br: 100.0,
            border_radius: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GraphicProps {
    pub shape_type: ShapeType,
    pub fill_color: String,
    pub stroke_color: String,
    pub stroke_width: f64,
    pub stroke_style: StrokeStyle,
    pub flip: Flip,
}

impl Default for GraphicProps {
    fn default() -> Self {
        Self {
            shape_type: ShapeType::Square,
            fill_color: "#000000".to_string(),
            stroke_color: "#000000".to_string(),
            stroke_width: 0.0,
            stroke_style: StrokeStyle::Solid,
            flip: Flip::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IconProps {
    /// Opaque key into the external icon catalog
    pub icon: String,
    pub color: String,
}

impl Default for IconProps {
    fn default() -> Self {
        Self {
            icon: String::new(),
            color: "#000000".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Text(TextProps),
    Image(ImageProps),
    Graphic(GraphicProps),
    Icon(IconProps),
    Table,
    /// Decoded from storage with a missing or unknown `type`. Raw properties
    /// are kept so the element survives a save untouched.
    Unsupported {
        kind: Option<String>,
        raw: serde_json::Map<String, serde_json::Value>,
    },
}

impl ElementKind {
    /// Variant with every property at its default
    pub fn with_defaults(element_type: ElementType) -> Self {
        match element_type {
            ElementType::Text => ElementKind::Text(TextProps::default()),
            ElementType::Image => ElementKind::Image(ImageProps::default()),
            ElementType::Graphic => ElementKind::Graphic(GraphicProps::default()),
            ElementType::Icon => ElementKind::Icon(IconProps::default()),
            ElementType::Table => ElementKind::Table,
        }
    }

    pub fn element_type(&self) -> Option<ElementType> {
        match self {
            ElementKind::Text(_) => Some(ElementType::Text),
            ElementKind::Image(_) => Some(ElementType::Image),
            ElementKind::Graphic(_) => Some(ElementType::Graphic),
            ElementKind::Icon(_) => Some(ElementType::Icon),
            ElementKind::Table => Some(ElementType::Table),
            ElementKind::Unsupported { .. } => None,
        }
    }

    /// Name written to the `type` field
    pub fn type_name(&self) -> Option<&str> {
        match self {
            ElementKind::Unsupported { kind, .. } => kind.as_deref(),
            other => other.element_type().map(|t| t.as_str()),
        }
    }

    /// Run every color-bearing field through the sanitizer
    pub fn sanitize_colors(&mut self) {
        match self {
            ElementKind::Text(text) => {
                text.color = sanitize(&text.color);
                text.background_color = sanitize_opt(text.background_color.as_deref());
                text.stroke = sanitize_opt(text.stroke.as_deref());
            }
            ElementKind::Graphic(graphic) => {
                graphic.fill_color = sanitize(&graphic.fill_color);
                graphic.stroke_color = sanitize(&graphic.stroke_color);
            }
            ElementKind::Icon(icon) => {
                icon.color = sanitize(&icon.color);
            }
            ElementKind::Image(_) | ElementKind::Table | ElementKind::Unsupported { .. } => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DesignElement {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees, visual only
    pub rotation: f64,
    pub z_index: i64,
    /// `None` shows the element on both faces
    pub face: Option<Face>,
    pub locked: bool,
    pub opacity: f64,
    pub kind: ElementKind,
}

impl DesignElement {
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
            rotation: 0.0,
            z_index: 0,
            face: None,
            locked: false,
            opacity: 1.0,
            kind,
        }
    }

    pub fn with_bounds(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
        self
    }

    pub fn on_face(mut self, face: Face) -> Self {
        self.face = Some(face);
        self
    }

    pub fn with_z_index(mut self, z_index: i64) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn element_type(&self) -> Option<ElementType> {
        self.kind.element_type()
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, ElementKind::Text(_))
    }

    /// Single face-visibility predicate shared by every renderer
    pub fn visible_on(&self, face: Face) -> bool {
        self.face.map_or(true, |f| f == face)
    }

    /// Canvas-space hit test against the unrotated bounding box
    pub fn contains_point(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    pub fn sanitize_colors(&mut self) {
        self.kind.sanitize_colors();
    }

    pub fn text(&self) -> Option<&TextProps> {
        match &self.kind {
            ElementKind::Text(text) => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_explicit() {
        let el = DesignElement::new("a", ElementKind::with_defaults(ElementType::Text));
        let text = el.text().unwrap();
        assert_eq!(text.font_size, 16.0);
        assert_eq!(text.color, "#000000");
        assert_eq!(el.opacity, 1.0);
        assert_eq!(el.face, None);
    }

    #[test]
    fn test_visible_on() {
        let both = DesignElement::new("a", ElementKind::Table);
        let front = DesignElement::new("b", ElementKind::Table).on_face(Face::Front);
        assert!(both.visible_on(Face::Front) && both.visible_on(Face::Back));
        assert!(front.visible_on(Face::Front));
        assert!(!front.visible_on(Face::Back));
    }

    #[test]
    fn test_sanitize_colors_covers_every_color_field() {
        let mut el = DesignElement::new(
            "t",
            ElementKind::Text(TextProps {
                color: "oklab(1 0 0)".to_string(),
                background_color: Some("lab(1 2 3)".to_string()),
                stroke: Some("#123".to_string()),
                ..TextProps::default()
            }),
        );
        el.sanitize_colors();
        let text = el.text().unwrap();
        assert_eq!(text.color, "#ffffff");
        assert_eq!(text.background_color.as_deref(), Some("#ffffff"));
        assert_eq!(text.stroke.as_deref(), Some("#123"));
    }

    #[test]
    fn test_flip_toggle() {
        assert_eq!(Flip::None.toggled(FlipAxis::Horizontal), Flip::Horizontal);
        assert_eq!(Flip::Horizontal.toggled(FlipAxis::Horizontal), Flip::None);
        assert_eq!(Flip::Horizontal.toggled(FlipAxis::Vertical), Flip::Vertical);
        assert_eq!(Flip::Vertical.scale(), (1.0, -1.0));
    }

    #[test]
    fn test_text_style_queries() {
        let mut text = TextProps::default();
        assert!(!text.is_bold());
        text.font_weight = "700".to_string();
        assert!(text.is_bold());
        text.text_decoration = "line-through underline".to_string();
        assert!(text.is_underlined());
    }
}
