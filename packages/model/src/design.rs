//! The full design document: identity, artboard settings and elements.

use crate::canvas::CanvasState;
use crate::element::DesignElement;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DesignMeta {
    pub project_name: String,
    pub product_id: Option<String>,
    /// Backend identity; `None` until the first successful save
    pub design_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Design {
    pub meta: DesignMeta,
    pub canvas: CanvasState,
    pub elements: Vec<DesignElement>,
}

impl Design {
    pub fn new(project_name: impl Into<String>, canvas: CanvasState) -> Self {
        Self {
            meta: DesignMeta {
                project_name: project_name.into(),
                ..DesignMeta::default()
            },
            canvas,
            elements: Vec::new(),
        }
    }

    pub fn find(&self, id: &str) -> Option<&DesignElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut DesignElement> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Sanitize the background and every element color in place
    pub fn sanitize_colors(&mut self) {
        let background = self.canvas.background().clone();
        self.canvas.set_background(background);
        for element in &mut self.elements {
            element.sanitize_colors();
        }
    }

    pub fn has_unique_ids(&self) -> bool {
        let mut seen = HashSet::new();
        self.elements.iter().all(|e| seen.insert(e.id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Background;
    use crate::element::{ElementKind, IconProps};

    fn icon(id: &str, color: &str) -> DesignElement {
        DesignElement::new(
            id,
            ElementKind::Icon(IconProps {
                icon: "star".to_string(),
                color: color.to_string(),
            }),
        )
    }

    #[test]
    fn test_sanitize_colors_reaches_background_and_elements() {
        let mut design = Design::new("mug", CanvasState::default());
        design.elements.push(icon("a", "color(display-p3 1 0 0)"));
        design.elements.push(icon("b", "#123"));
        design
            .canvas
            .set_background(Background::Gradient {
                colors: vec!["#000".to_string(), "#fff".to_string()],
                angle: 45.0,
            });

        design.sanitize_colors();

        let colors: Vec<_> = design
            .elements
            .iter()
            .map(|e| match &e.kind {
                ElementKind::Icon(icon) => icon.color.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(colors, vec!["#ffffff", "#123"]);
        assert_eq!(design.canvas.background().to_css(), "linear-gradient(45deg, #000, #fff)");
    }

    #[test]
    fn test_find_and_unique_ids() {
        let mut design = Design::new("mug", CanvasState::default());
        design.elements.push(icon("a", "#000"));
        design.elements.push(icon("b", "#000"));
        assert!(design.has_unique_ids());
        assert_eq!(design.find("b").map(|e| e.id.as_str()), Some("b"));
        assert!(design.find("c").is_none());

        if let Some(element) = design.find_mut("b") {
            element.id = "a".to_string();
        }
        assert!(!design.has_unique_ids());
    }
}
