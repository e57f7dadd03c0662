//! # Element Patches
//!
//! Partial updates merged into an element by identity. A field that does
//! not belong to the element's kind is ignored, so one patch type serves
//! every variant.

use artboard_common::sanitize;
use artboard_model::{
    DesignElement, ElementKind, ElementType, Face, Flip, ShapeType, StrokeStyle, TextAlign,
};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementPatch {
    // Common geometry
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub z_index: Option<i64>,
    /// `Some(None)` (JSON `null`) moves the element back onto both faces
    #[serde(
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub face: Option<Option<Face>>,
    pub locked: Option<bool>,
    pub opacity: Option<f64>,

    // Text content or image URI
    pub content: Option<String>,

    // Text
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<String>,
    pub font_style: Option<String>,
    pub text_decoration: Option<String>,
    pub text_align: Option<TextAlign>,
    pub background_color: Option<String>,
    pub stroke: Option<String>,
    pub is_curved: Option<bool>,

    // Text and icon
    pub color: Option<String>,

    // Text, image
    pub border_radius: Option<f64>,

    // Text, graphic
    pub stroke_width: Option<f64>,

    // Image
    pub filter: Option<String>,
    pub hue: Option<f64>,
    pub sat: Option<f64>,
    pub br: Option<f64>,

    // Graphic
    pub shape_type: Option<ShapeType>,
    pub fill_color: Option<String>,
    pub stroke_color: Option<String>,
    pub stroke_style: Option<StrokeStyle>,
    pub flip: Option<Flip>,

    // Icon
    pub icon: Option<String>,
}

impl ElementPatch {
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn bounds(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Sanitize every color field the patch carries
    pub fn sanitized(mut self) -> Self {
        for color in [
            &mut self.color,
            &mut self.background_color,
            &mut self.stroke,
            &mut self.fill_color,
            &mut self.stroke_color,
        ] {
            if let Some(value) = color.as_mut() {
                *value = sanitize(value);
            }
        }
        self
    }

    /// Name of the first non-finite numeric field, if any
    pub fn non_finite_field(&self) -> Option<&'static str> {
        let numbers = [
            ("x", self.x),
            ("y", self.y),
            ("width", self.width),
            ("height", self.height),
            ("rotation", self.rotation),
            ("opacity", self.opacity),
            ("fontSize", self.font_size),
            ("borderRadius", self.border_radius),
            ("strokeWidth", self.stroke_width),
            ("hue", self.hue),
            ("sat", self.sat),
            ("br", self.br),
        ];
        numbers
            .into_iter()
            .find(|(_, value)| value.map_or(false, |v| !v.is_finite()))
            .map(|(name, _)| name)
    }

    /// Merge into `element`. Colors are expected to be sanitized already.
    pub fn apply_to(&self, element: &mut DesignElement) {
        set(&mut element.x, self.x);
        set(&mut element.y, self.y);
        set(&mut element.width, self.width);
        set(&mut element.height, self.height);
        set(&mut element.rotation, self.rotation);
        set(&mut element.z_index, self.z_index);
        set(&mut element.locked, self.locked);
        if let Some(face) = self.face {
            element.face = face;
        }
        if let Some(opacity) = self.opacity {
            element.opacity = opacity.clamp(0.0, 1.0);
        }

        match &mut element.kind {
            ElementKind::Text(text) => {
                set(&mut text.content, self.content.clone());
                set(&mut text.font_family, self.font_family.clone());
                set(&mut text.font_size, self.font_size);
                set(&mut text.font_weight, self.font_weight.clone());
                set(&mut text.font_style, self.font_style.clone());
                set(&mut text.text_decoration, self.text_decoration.clone());
                set(&mut text.text_align, self.text_align);
                set(&mut text.color, self.color.clone());
                set(&mut text.stroke_width, self.stroke_width);
                set(&mut text.border_radius, self.border_radius);
                set(&mut text.is_curved, self.is_curved);
                if self.background_color.is_some() {
                    text.background_color = self.background_color.clone();
                }
                if self.stroke.is_some() {
                    text.stroke = self.stroke.clone();
                }
            }
            ElementKind::Image(image) => {
                set(&mut image.content, self.content.clone());
                set(&mut image.filter, self.filter.clone());
                set(&mut image.hue, self.hue);
                set(&mut image.sat, self.sat);
                set(&mut image.br, self.br);
                set(&mut image.border_radius, self.border_radius);
            }
            ElementKind::Graphic(graphic) => {
                set(&mut graphic.shape_type, self.shape_type);
                set(&mut graphic.fill_color, self.fill_color.clone());
                set(&mut graphic.stroke_color, self.stroke_color.clone());
                set(&mut graphic.stroke_width, self.stroke_width);
                set(&mut graphic.stroke_style, self.stroke_style);
                set(&mut graphic.flip, self.flip);
            }
            ElementKind::Icon(icon) => {
                set(&mut icon.icon, self.icon.clone());
                set(&mut icon.color, self.color.clone());
            }
            ElementKind::Table | ElementKind::Unsupported { .. } => {}
        }
    }
}

// Keeps an explicit `null` apart from an absent key
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Input to `addElement`: a type plus initial properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementDraft {
    #[serde(rename = "type")]
    pub element_type: Option<ElementType>,
    #[serde(flatten)]
    pub props: ElementPatch,
}

impl ElementDraft {
    pub fn new(element_type: ElementType) -> Self {
        Self {
            element_type: Some(element_type),
            props: ElementPatch::default(),
        }
    }

    pub fn at(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.props.x = Some(x);
        self.props.y = Some(y);
        self.props.width = Some(width);
        self.props.height = Some(height);
        self
    }

    pub fn with(mut self, props: ElementPatch) -> Self {
        let ElementPatch { x, y, width, height, .. } = self.props;
        self.props = ElementPatch {
            x: props.x.or(x),
            y: props.y.or(y),
            width: props.width.or(width),
            height: props.height.or(height),
            ..props
        };
        self
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::new(ElementType::Text).with(ElementPatch::content(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_face_can_be_cleared() {
        let mut element = DesignElement::new("t", ElementKind::with_defaults(ElementType::Text))
            .on_face(Face::Back);

        let untouched: ElementPatch = serde_json::from_str(r#"{"x": 5}"#).unwrap();
        assert_eq!(untouched.face, None);
        untouched.apply_to(&mut element);
        assert_eq!(element.face, Some(Face::Back));

        let cleared: ElementPatch = serde_json::from_str(r#"{"face": null}"#).unwrap();
        assert_eq!(cleared.face, Some(None));
        cleared.apply_to(&mut element);
        assert_eq!(element.face, None);

        let front: ElementPatch = serde_json::from_str(r#"{"face": "front"}"#).unwrap();
        front.apply_to(&mut element);
        assert_eq!(element.face, Some(Face::Front));
    }

    #[test]
    fn test_draft_keeps_explicit_null_face() {
        let draft: ElementDraft = serde_json::from_str(r#"{"type": "icon", "face": null}"#).unwrap();
        assert_eq!(draft.props.face, Some(None));
        assert_eq!(serde_json::to_value(&draft.props).unwrap()["face"], serde_json::Value::Null);
    }

    #[test]
    fn test_patch_ignores_foreign_fields() {
        let mut icon = DesignElement::new("i", ElementKind::with_defaults(ElementType::Icon));
        let patch = ElementPatch {
            font_size: Some(40.0),
            color: Some("#ff0000".to_string()),
            ..ElementPatch::default()
        };
        patch.apply_to(&mut icon);
        match &icon.kind {
            ElementKind::Icon(props) => assert_eq!(props.color, "#ff0000"),
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn test_sanitized_patch() {
        let patch = ElementPatch {
            fill_color: Some("oklch(1 2 3)".to_string()),
            stroke_color: Some("#000".to_string()),
            ..ElementPatch::default()
        }
        .sanitized();
        assert_eq!(patch.fill_color.as_deref(), Some("#ffffff"));
        assert_eq!(patch.stroke_color.as_deref(), Some("#000"));
    }

    #[test]
    fn test_draft_deserializes_type_and_props() {
        let draft: ElementDraft = serde_json::from_str(
            r##"{"type": "graphic", "x": 10, "shapeType": "star", "fillColor": "#f00"}"##,
        )
        .unwrap();
        assert_eq!(draft.element_type, Some(ElementType::Graphic));
        assert_eq!(draft.props.x, Some(10.0));
        assert_eq!(draft.props.shape_type, Some(ShapeType::Star));
    }

    #[test]
    fn test_draft_without_type() {
        let draft: ElementDraft = serde_json::from_str("{}").unwrap();
        assert_eq!(draft.element_type, None);
    }

    #[test]
    fn test_non_finite_detection() {
        let patch = ElementPatch {
            width: Some(f64::NAN),
            ..ElementPatch::default()
        };
        assert_eq!(patch.non_finite_field(), Some("width"));
        assert_eq!(ElementPatch::position(1.0, 2.0).non_finite_field(), None);
    }
}
