//! Artboard-level settings: size, outline shape, background, faces, zoom.

use artboard_common::{sanitize, FALLBACK_COLOR};
use serde::{Deserialize, Serialize};

pub const ZOOM_MIN: u32 = 10;
pub const ZOOM_MAX: u32 = 300;
pub const ZOOM_DEFAULT: u32 = 100;

/// One of the two layout surfaces sharing a single element-identity space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    #[default]
    #[serde(alias = "Front")]
    Front,
    #[serde(alias = "Back")]
    Back,
}

impl Face {
    pub fn other(self) -> Face {
        match self {
            Face::Front => Face::Back,
            Face::Back => Face::Front,
        }
    }

    pub fn parse(name: &str) -> Option<Face> {
        match name.to_ascii_lowercase().as_str() {
            "front" => Some(Face::Front),
            "back" => Some(Face::Back),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CanvasShape {
    Square,
    #[default]
    Rectangle,
    Circle,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Solid fill or linear gradient behind every element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Background {
    Solid(String),
    Gradient { colors: Vec<String>, angle: f64 },
}

impl Default for Background {
    fn default() -> Self {
        Background::Solid(FALLBACK_COLOR.to_string())
    }
}

impl Background {
    pub fn solid(color: &str) -> Self {
        Background::Solid(sanitize(color))
    }

    pub fn gradient(colors: &[&str], angle: f64) -> Self {
        Background::Gradient {
            colors: colors.iter().map(|c| sanitize(c)).collect(),
            angle,
        }
    }

    /// Re-run every stop through the sanitizer
    pub fn sanitized(&self) -> Self {
        match self {
            Background::Solid(color) => Background::Solid(sanitize(color)),
            Background::Gradient { colors, angle } => Background::Gradient {
                colors: colors.iter().map(|c| sanitize(c)).collect(),
                angle: if angle.is_finite() { *angle } else { 0.0 },
            },
        }
    }

    /// CSS value suitable for a `background` style
    pub fn to_css(&self) -> String {
        match self {
            Background::Solid(color) => color.clone(),
            Background::Gradient { colors, angle } => {
                format!("linear-gradient({}deg, {})", angle, colors.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CanvasState {
    pub size: CanvasSize,
    pub shape: CanvasShape,
    background: Background,
    pub active_face: Face,
    zoom_percent: u32,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self::new(CanvasSize::default(), CanvasShape::default())
    }
}

impl CanvasState {
    pub fn new(size: CanvasSize, shape: CanvasShape) -> Self {
        Self {
            size,
            shape,
            background: Background::default(),
            active_face: Face::Front,
            zoom_percent: ZOOM_DEFAULT,
        }
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn set_background(&mut self, background: Background) {
        self.background = background.sanitized();
    }

    pub fn zoom_percent(&self) -> u32 {
        self.zoom_percent
    }

    /// Set zoom, clamped to [`ZOOM_MIN`, `ZOOM_MAX`]. Returns the stored value.
    pub fn set_zoom_percent(&mut self, percent: i64) -> u32 {
        self.zoom_percent = percent.clamp(ZOOM_MIN as i64, ZOOM_MAX as i64) as u32;
        self.zoom_percent
    }

    /// View-space scale factor applied once at the artboard root
    pub fn zoom_scale(&self) -> f64 {
        self.zoom_percent as f64 / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_wire_names() {
        assert_eq!(serde_json::to_string(&Face::Back).unwrap(), "\"back\"");
        let legacy: Face = serde_json::from_str("\"Front\"").unwrap();
        assert_eq!(legacy, Face::Front);
        let current: Face = serde_json::from_str("\"back\"").unwrap();
        assert_eq!(current, Face::Back);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut canvas = CanvasState::default();
        assert_eq!(canvas.set_zoom_percent(5), ZOOM_MIN);
        assert_eq!(canvas.set_zoom_percent(1000), ZOOM_MAX);
        assert_eq!(canvas.set_zoom_percent(150), 150);
        assert_eq!(canvas.zoom_scale(), 1.5);
    }

    #[test]
    fn test_background_is_sanitized_on_set() {
        let mut canvas = CanvasState::default();
        canvas.set_background(Background::Solid("oklab(0.5 0.1 0.1)".to_string()));
        assert_eq!(canvas.background(), &Background::Solid("#ffffff".to_string()));

        canvas.set_background(Background::Gradient {
            colors: vec!["#000".to_string(), "lch(1 2 3)".to_string()],
            angle: 45.0,
        });
        assert_eq!(
            canvas.background(),
            &Background::Gradient {
                colors: vec!["#000".to_string(), "#ffffff".to_string()],
                angle: 45.0,
            }
        );
    }

    #[test]
    fn test_gradient_css() {
        let bg = Background::gradient(&["#000", "#fff"], 90.0);
        assert_eq!(bg.to_css(), "linear-gradient(90deg, #000, #fff)");
    }

    #[test]
    fn test_face_parse() {
        assert_eq!(Face::parse("BACK"), Some(Face::Back));
        assert_eq!(Face::parse("side"), None);
        assert_eq!(Face::Front.other(), Face::Back);
    }
}
