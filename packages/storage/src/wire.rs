//! # Wire Format
//!
//! `PersistedDesign` is the camelCase JSON document exchanged with the
//! design store. Nothing outside this module knows its shape.
//!
//! Decoding is lenient: a malformed color becomes `#ffffff`, an unknown
//! element type is kept as [`ElementKind::Unsupported`] with its raw
//! properties, and missing or duplicate ids are replaced. Every field is
//! decoded on its own, so a `null` or wrongly typed value falls back to
//! that field's default instead of failing the element or the document.
//! A document that loads always satisfies the model invariants.

use artboard_common::{sanitize, sanitize_value};
use artboard_model::{
    Background, CanvasShape, CanvasSize, CanvasState, Design, DesignElement, DesignMeta,
    ElementKind, ElementType, Face, IdGenerator,
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Property keys that hold colors, across every element kind
const COLOR_KEYS: [&str; 5] = ["color", "backgroundColor", "stroke", "fillColor", "strokeColor"];

/// Color keys where `null` means "no color" rather than a broken value
const OPTIONAL_COLOR_KEYS: [&str; 2] = ["backgroundColor", "stroke"];

/// `{ "data": ... }` wrapper used by every store response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedDesign {
    /// Store-assigned identity
    #[serde(
        rename = "_id",
        alias = "id",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub project_name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub canvas_shape: CanvasShape,
    #[serde(default, deserialize_with = "lenient")]
    pub canvas_size: CanvasSize,
    /// Kept raw so that a malformed background degrades instead of failing the load
    #[serde(default)]
    pub canvas_background: Value,
    #[serde(default, deserialize_with = "lenient_elements")]
    pub design_elements: Vec<WireElement>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub product_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireElement {
    #[serde(default, deserialize_with = "lenient")]
    pub id: String,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub x: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub y: f64,
    #[serde(default = "default_size", deserialize_with = "lenient_size")]
    pub width: f64,
    #[serde(default = "default_size", deserialize_with = "lenient_size")]
    pub height: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub rotation: f64,
    #[serde(default, deserialize_with = "lenient_z_index")]
    pub z_index: i64,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub face: Option<Face>,
    #[serde(default, deserialize_with = "lenient")]
    pub locked: bool,
    #[serde(default = "default_opacity", deserialize_with = "lenient_opacity")]
    pub opacity: f64,
    /// Variant-specific properties
    #[serde(flatten)]
    pub props: Map<String, Value>,
}

fn default_size() -> f64 {
    100.0
}

fn default_opacity() -> f64 {
    1.0
}

/// Any value that does not decode as `T`, `null` included, becomes `T::default()`
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn lenient_size<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Value::deserialize(deserializer)?
        .as_f64()
        .unwrap_or_else(default_size))
}

fn lenient_opacity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Value::deserialize(deserializer)?
        .as_f64()
        .unwrap_or_else(default_opacity))
}

// Fractional z-indexes from older editors are truncated
fn lenient_z_index<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let z_index = value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|z| z.is_finite())
            .map(|z| z as i64)
    });
    Ok(z_index.unwrap_or(0))
}

/// Non-object entries are dropped; every object decodes
fn lenient_elements<'de, D>(deserializer: D) -> Result<Vec<WireElement>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries,
        Value::Null => Vec::new(),
        other => {
            tracing::warn!(found = %other, "designElements is not an array");
            Vec::new()
        }
    };

    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(element) => Some(element),
            Err(err) => {
                tracing::warn!(index, error = %err, "dropped element entry");
                None
            }
        })
        .collect())
}

impl PersistedDesign {
    /// Snapshot a design for saving. Colors are sanitized on the way out too.
    pub fn from_design(design: &Design) -> Self {
        let background = design.canvas.background().sanitized();
        Self {
            id: design.meta.design_id.clone(),
            project_name: design.meta.project_name.clone(),
            canvas_shape: design.canvas.shape,
            canvas_size: design.canvas.size,
            canvas_background: serde_json::to_value(background).unwrap_or(Value::Null),
            design_elements: design
                .elements
                .iter()
                .map(|element| {
                    let mut element = element.clone();
                    element.sanitize_colors();
                    WireElement::from_element(&element)
                })
                .collect(),
            product_id: design.meta.product_id.clone(),
        }
    }

    /// Decode into a sanitized design with unique element ids
    pub fn into_design(self) -> Design {
        let mut canvas = CanvasState::new(self.canvas_size, self.canvas_shape);
        canvas.set_background(decode_background(&self.canvas_background));

        let mut ids = IdGenerator::new(&self.project_name);
        let mut elements: Vec<DesignElement> = self
            .design_elements
            .into_iter()
            .map(WireElement::into_element)
            .collect();
        ensure_unique_ids(&mut elements, &mut ids);

        Design {
            meta: DesignMeta {
                project_name: self.project_name,
                product_id: self.product_id,
                design_id: self.id,
            },
            canvas,
            elements,
        }
    }
}

/// Solid string, gradient object, or fallback for anything else
pub fn decode_background(value: &Value) -> Background {
    match value {
        Value::String(color) => Background::Solid(sanitize(color)),
        Value::Object(fields) => {
            let colors = fields
                .get("colors")
                .and_then(Value::as_array)
                .map(|stops| stops.iter().map(sanitize_value).collect::<Vec<_>>())
                .unwrap_or_default();
            if colors.is_empty() {
                return Background::default();
            }
            let angle = fields
                .get("angle")
                .and_then(Value::as_f64)
                .unwrap_or(0.0);
            Background::Gradient { colors, angle }
        }
        Value::Null => Background::default(),
        other => Background::Solid(sanitize_value(other)),
    }
}

fn ensure_unique_ids(elements: &mut [DesignElement], ids: &mut IdGenerator) {
    let mut seen: HashSet<String> = HashSet::new();
    let taken: Vec<String> = elements.iter().map(|e| e.id.clone()).collect();

    for element in elements.iter_mut() {
        if element.id.is_empty() || seen.contains(&element.id) {
            let fresh = ids.new_unique_id(taken.iter().chain(seen.iter()).map(String::as_str));
            tracing::debug!(old = %element.id, new = %fresh, "reassigned element id");
            element.id = fresh;
        }
        seen.insert(element.id.clone());
    }
}

impl WireElement {
    pub fn from_element(element: &DesignElement) -> Self {
        let props = match &element.kind {
            ElementKind::Text(text) => to_props(text),
            ElementKind::Image(image) => to_props(image),
            ElementKind::Graphic(graphic) => to_props(graphic),
            ElementKind::Icon(icon) => to_props(icon),
            ElementKind::Table => Map::new(),
            ElementKind::Unsupported { raw, .. } => raw.clone(),
        };

        Self {
            id: element.id.clone(),
            kind: element.kind.type_name().map(str::to_string),
            x: element.x,
            y: element.y,
            width: element.width,
            height: element.height,
            rotation: element.rotation,
            z_index: element.z_index,
            face: element.face,
            locked: element.locked,
            opacity: element.opacity,
            props,
        }
    }

    pub fn into_element(self) -> DesignElement {
        let mut props = self.props;
        sanitize_color_props(&mut props);

        let kind = match self.kind.as_deref().and_then(ElementType::parse) {
            Some(element_type) => decode_kind(element_type, &props),
            None => ElementKind::Unsupported {
                kind: self.kind.clone(),
                raw: props,
            },
        };

        let mut element = DesignElement::new(self.id, kind);
        element.x = finite_or(self.x, 0.0);
        element.y = finite_or(self.y, 0.0);
        element.width = finite_or(self.width, default_size());
        element.height = finite_or(self.height, default_size());
        element.rotation = finite_or(self.rotation, 0.0);
        element.z_index = self.z_index;
        element.face = self.face;
        element.locked = self.locked;
        element.opacity = finite_or(self.opacity, 1.0).clamp(0.0, 1.0);
        element
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Replace every color property with its sanitized string. `null` is kept
/// only where the color is optional.
fn sanitize_color_props(props: &mut Map<String, Value>) {
    for key in COLOR_KEYS {
        if let Some(value) = props.get_mut(key) {
            if value.is_null() && OPTIONAL_COLOR_KEYS.contains(&key) {
                continue;
            }
            *value = Value::String(sanitize_value(value));
        }
    }
}

fn decode_kind(element_type: ElementType, props: &Map<String, Value>) -> ElementKind {
    match element_type {
        ElementType::Text => ElementKind::Text(decode_props(props)),
        ElementType::Image => ElementKind::Image(decode_props(props)),
        ElementType::Graphic => ElementKind::Graphic(decode_props(props)),
        ElementType::Icon => ElementKind::Icon(decode_props(props)),
        ElementType::Table => ElementKind::Table,
    }
}

/// Merge stored properties over the kind's defaults one key at a time,
/// skipping any value that would not decode.
fn decode_props<T>(props: &Map<String, Value>) -> T
where
    T: Default + Serialize + DeserializeOwned,
{
    let mut merged = to_props(&T::default());
    for (key, value) in props {
        let previous = merged.insert(key.clone(), value.clone());
        if serde_json::from_value::<T>(Value::Object(merged.clone())).is_err() {
            tracing::debug!(%key, %value, "ignored undecodable property");
            match previous {
                Some(previous) => merged.insert(key.clone(), previous),
                None => merged.remove(key),
            };
        }
    }
    serde_json::from_value(Value::Object(merged)).unwrap_or_default()
}

fn to_props<T: Serialize>(value: &T) -> Map<String, Value> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artboard_model::ShapeType;
    use serde_json::json;

    #[test]
    fn test_decode_sanitizes_colors() {
        let persisted: PersistedDesign = serde_json::from_value(json!({
            "projectName": "tee",
            "canvasBackground": "oklab(0.5 0.1 0.1)",
            "designElements": [
                {"id": "a", "type": "text", "content": "Hi", "color": "lch(1 2 3)"},
                {"id": "b", "type": "icon", "color": 42}
            ]
        }))
        .unwrap();

        let design = persisted.into_design();
        assert_eq!(design.canvas.background(), &Background::Solid("#ffffff".to_string()));
        assert_eq!(design.elements[0].text().unwrap().color, "#ffffff");
        match &design.elements[1].kind {
            ElementKind::Icon(icon) => assert_eq!(icon.color, "#ffffff"),
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn test_unknown_type_is_preserved() {
        let wire: WireElement = serde_json::from_value(json!({
            "id": "c", "type": "chart", "series": [1, 2, 3], "x": 5
        }))
        .unwrap();

        let element = wire.clone().into_element();
        match &element.kind {
            ElementKind::Unsupported { kind, raw } => {
                assert_eq!(kind.as_deref(), Some("chart"));
                assert_eq!(raw.get("series"), Some(&json!([1, 2, 3])));
            }
            other => panic!("unexpected kind {other:?}"),
        }

        let back = WireElement::from_element(&element);
        assert_eq!(back.kind.as_deref(), Some("chart"));
        assert_eq!(back.props, wire.props);
    }

    #[test]
    fn test_missing_and_duplicate_ids_replaced() {
        let persisted: PersistedDesign = serde_json::from_value(json!({
            "projectName": "dup",
            "designElements": [
                {"id": "same", "type": "table"},
                {"id": "same", "type": "table"},
                {"type": "table"}
            ]
        }))
        .unwrap();

        let design = persisted.into_design();
        assert!(design.has_unique_ids());
        assert_eq!(design.elements[0].id, "same");
        assert!(design.elements.iter().all(|e| !e.id.is_empty()));
    }

    #[test]
    fn test_null_geometry_falls_back_per_field() {
        let persisted: PersistedDesign = serde_json::from_value(json!({
            "projectName": "nulls",
            "designElements": [
                {"id": "bad", "type": "text", "rotation": null, "x": "12", "width": null,
                 "zIndex": 2.7, "opacity": null, "face": "sideways", "locked": "yes"},
                {"id": "ok", "type": "table", "x": 4, "rotation": 15}
            ]
        }))
        .unwrap();

        let design = persisted.into_design();
        assert_eq!(design.elements.len(), 2);

        let bad = &design.elements[0];
        assert_eq!(bad.id, "bad");
        assert!(bad.text().is_some());
        assert_eq!(bad.rotation, 0.0);
        assert_eq!(bad.x, 0.0);
        assert_eq!(bad.width, 100.0);
        assert_eq!(bad.z_index, 2);
        assert_eq!(bad.opacity, 1.0);
        assert_eq!(bad.face, None);
        assert!(!bad.locked);

        let ok = &design.elements[1];
        assert_eq!(ok.x, 4.0);
        assert_eq!(ok.rotation, 15.0);
    }

    #[test]
    fn test_null_required_color_keeps_kind() {
        let persisted: PersistedDesign = serde_json::from_value(json!({
            "designElements": [
                {"id": "g", "type": "graphic", "shapeType": "star", "fillColor": null},
                {"id": "t", "type": "text", "color": null, "backgroundColor": null, "stroke": null}
            ]
        }))
        .unwrap();

        let design = persisted.into_design();
        match &design.elements[0].kind {
            ElementKind::Graphic(graphic) => {
                assert_eq!(graphic.shape_type, ShapeType::Star);
                assert_eq!(graphic.fill_color, "#ffffff");
            }
            other => panic!("unexpected kind {other:?}"),
        }

        let text = design.elements[1].text().unwrap();
        assert_eq!(text.color, "#ffffff");
        assert_eq!(text.background_color, None);
        assert_eq!(text.stroke, None);
    }

    #[test]
    fn test_wrong_typed_prop_uses_default() {
        let wire: WireElement = serde_json::from_value(json!({
            "id": "t", "type": "text", "content": "Sale", "fontSize": "16", "isCurved": 1
        }))
        .unwrap();

        let element = wire.into_element();
        let text = element.text().unwrap();
        assert_eq!(text.content, "Sale");
        assert_eq!(text.font_size, 16.0);
        assert!(!text.is_curved);
    }

    #[test]
    fn test_malformed_document_fields_degrade() {
        let persisted: PersistedDesign = serde_json::from_value(json!({
            "_id": null,
            "projectName": 7,
            "canvasShape": "hexagon",
            "canvasSize": null,
            "designElements": [null, {"id": null, "type": "icon", "color": "#123456"}]
        }))
        .unwrap();

        let design = persisted.into_design();
        assert_eq!(design.meta.design_id, None);
        assert_eq!(design.meta.project_name, "");
        assert_eq!(design.canvas.shape, CanvasShape::default());
        assert_eq!(design.canvas.size, CanvasSize::default());
        assert_eq!(design.elements.len(), 1);
        assert!(!design.elements[0].id.is_empty());
        match &design.elements[0].kind {
            ElementKind::Icon(icon) => assert_eq!(icon.color, "#123456"),
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn test_legacy_face_names_load() {
        let wire: WireElement =
            serde_json::from_value(json!({"id": "f", "type": "table", "face": "Back"})).unwrap();
        assert_eq!(wire.into_element().face, Some(Face::Back));
    }

    #[test]
    fn test_gradient_background() {
        let background = decode_background(&json!({"colors": ["#000", "color(srgb 1 0 0)"], "angle": 45}));
        assert_eq!(
            background,
            Background::Gradient {
                colors: vec!["#000".to_string(), "#ffffff".to_string()],
                angle: 45.0
            }
        );
        assert_eq!(decode_background(&json!(12)), Background::Solid("#ffffff".to_string()));
    }

    #[test]
    fn test_wire_shape_is_camel_case() {
        let mut design = Design::new("shape", CanvasState::default());
        design.elements.push(
            DesignElement::new("t", ElementKind::with_defaults(ElementType::Text))
                .with_z_index(2)
                .on_face(Face::Back),
        );

        let json = serde_json::to_value(PersistedDesign::from_design(&design)).unwrap();
        assert_eq!(json["projectName"], "shape");
        assert_eq!(json["canvasShape"], "rectangle");
        assert_eq!(json["canvasSize"]["width"], 800.0);
        assert_eq!(json["canvasBackground"], "#ffffff");
        let element = &json["designElements"][0];
        assert_eq!(element["type"], "text");
        assert_eq!(element["zIndex"], 2);
        assert_eq!(element["face"], "back");
        assert_eq!(element["fontFamily"], "Arial");
        assert!(json.get("_id").is_none());
    }
}
