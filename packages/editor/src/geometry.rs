//! # Geometry / Transform Engine
//!
//! All element geometry lives in unscaled canvas space. Zoom is a view-space
//! transform applied once at the artboard root, so clamping and hit-testing
//! never see zoomed coordinates.

use crate::patch::ElementPatch;
use artboard_model::{paint_order, CanvasSize, CanvasState, DesignElement, Face};
use serde::{Deserialize, Serialize};

pub const NUDGE_STEP: f64 = 5.0;
pub const NUDGE_STEP_LARGE: f64 = 10.0;
pub const ZOOM_STEP: i64 = 10;
pub const MIN_ELEMENT_SIZE: f64 = 1.0;

/// Clamp a position so the whole box stays on the canvas.
///
/// An element larger than the canvas is pinned to the origin on that axis.
pub fn clamp_position(x: f64, y: f64, width: f64, height: f64, canvas: CanvasSize) -> (f64, f64) {
    let max_x = canvas.width - width;
    let max_y = canvas.height - height;
    (x.min(max_x).max(0.0), y.min(max_y).max(0.0))
}

/// Patch moving `element` to (x, y), clamped to the canvas
pub fn move_to(element: &DesignElement, x: f64, y: f64, canvas: CanvasSize) -> ElementPatch {
    let (x, y) = clamp_position(x, y, element.width, element.height, canvas);
    ElementPatch::position(x, y)
}

/// Patch translating `element` by (dx, dy), clamped to the canvas
pub fn move_by(element: &DesignElement, dx: f64, dy: f64, canvas: CanvasSize) -> ElementPatch {
    move_to(element, element.x + dx, element.y + dy, canvas)
}

/// Final offsets reported by a resize handle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResizeEnd {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ResizeEnd {
    /// Taken as-is; the handle already keeps itself inside the artboard
    pub fn to_patch(self) -> ElementPatch {
        ElementPatch::bounds(
            self.x,
            self.y,
            self.width.max(MIN_ELEMENT_SIZE),
            self.height.max(MIN_ELEMENT_SIZE),
        )
    }
}

/// Degrees normalized into [0, 360)
pub fn normalize_rotation(degrees: f64) -> f64 {
    let normalized = degrees.rem_euclid(360.0);
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

pub fn rotate_to(degrees: f64) -> ElementPatch {
    ElementPatch {
        rotation: Some(normalize_rotation(degrees)),
        ..ElementPatch::default()
    }
}

/// Topmost element on `face` under a canvas-space point
pub fn hit_test(elements: &[DesignElement], face: Face, px: f64, py: f64) -> Option<&DesignElement> {
    paint_order(elements.iter().filter(|e| e.visible_on(face)))
        .into_iter()
        .rev()
        .find(|e| e.contains_point(px, py))
}

/// Mapping between canvas space and the zoomed view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    /// View-space position of the canvas origin
    pub origin_x: f64,
    pub origin_y: f64,
}

impl Viewport {
    pub fn for_canvas(canvas: &CanvasState) -> Self {
        Self {
            scale: canvas.zoom_scale(),
            origin_x: 0.0,
            origin_y: 0.0,
        }
    }

    pub fn with_origin(mut self, origin_x: f64, origin_y: f64) -> Self {
        self.origin_x = origin_x;
        self.origin_y = origin_y;
        self
    }

    pub fn view_to_canvas(&self, vx: f64, vy: f64) -> (f64, f64) {
        ((vx - self.origin_x) / self.scale, (vy - self.origin_y) / self.scale)
    }

    pub fn canvas_to_view(&self, cx: f64, cy: f64) -> (f64, f64) {
        (cx * self.scale + self.origin_x, cy * self.scale + self.origin_y)
    }

    /// View-space drag delta to canvas-space delta
    pub fn delta_to_canvas(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dx / self.scale, dy / self.scale)
    }
}

pub fn zoom_in(canvas: &mut CanvasState) -> u32 {
    let next = canvas.zoom_percent() as i64 + ZOOM_STEP;
    canvas.set_zoom_percent(next)
}

pub fn zoom_out(canvas: &mut CanvasState) -> u32 {
    let next = canvas.zoom_percent() as i64 - ZOOM_STEP;
    canvas.set_zoom_percent(next)
}

/// Largest zoom at which the canvas fits in a `view_width` x `view_height` area
pub fn zoom_to_fit(canvas: &mut CanvasState, view_width: f64, view_height: f64) -> u32 {
    let size = canvas.size;
    if size.width <= 0.0 || size.height <= 0.0 {
        return canvas.zoom_percent();
    }
    let scale = (view_width / size.width).min(view_height / size.height);
    canvas.set_zoom_percent((scale * 100.0).floor() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use artboard_model::{CanvasShape, ElementKind};

    fn canvas() -> CanvasSize {
        CanvasSize {
            width: 800.0,
            height: 600.0,
        }
    }

    #[test]
    fn test_clamp_left_edge() {
        let el = DesignElement::new("a", ElementKind::Table).with_bounds(50.0, 50.0, 200.0, 40.0);
        let patch = move_by(&el, -100.0, 0.0, canvas());
        assert_eq!((patch.x, patch.y), (Some(0.0), Some(50.0)));
    }

    #[test]
    fn test_clamp_right_and_bottom() {
        let (x, y) = clamp_position(790.0, 590.0, 100.0, 50.0, canvas());
        assert_eq!((x, y), (700.0, 550.0));
    }

    #[test]
    fn test_oversized_element_pins_to_origin() {
        let (x, _) = clamp_position(30.0, 0.0, 1000.0, 10.0, canvas());
        assert_eq!(x, 0.0);
    }

    #[test]
    fn test_resize_floors_size() {
        let patch = ResizeEnd { x: 5.0, y: 6.0, width: 0.0, height: 20.0 }.to_patch();
        assert_eq!(patch.width, Some(MIN_ELEMENT_SIZE));
        assert_eq!(patch.height, Some(20.0));
        assert_eq!(patch.x, Some(5.0));
    }

    #[test]
    fn test_rotation_normalization() {
        assert_eq!(normalize_rotation(370.0), 10.0);
        assert_eq!(normalize_rotation(-90.0), 270.0);
        assert_eq!(normalize_rotation(360.0), 0.0);
    }

    #[test]
    fn test_hit_test_prefers_topmost_visible() {
        let elements = vec![
            DesignElement::new("low", ElementKind::Table).with_bounds(0.0, 0.0, 100.0, 100.0).with_z_index(0),
            DesignElement::new("high", ElementKind::Table).with_bounds(0.0, 0.0, 100.0, 100.0).with_z_index(5),
            DesignElement::new("back", ElementKind::Table)
                .with_bounds(0.0, 0.0, 100.0, 100.0)
                .with_z_index(9)
                .on_face(Face::Back),
        ];
        assert_eq!(hit_test(&elements, Face::Front, 10.0, 10.0).map(|e| e.id.as_str()), Some("high"));
        assert_eq!(hit_test(&elements, Face::Back, 10.0, 10.0).map(|e| e.id.as_str()), Some("back"));
        assert!(hit_test(&elements, Face::Front, 500.0, 10.0).is_none());
    }

    #[test]
    fn test_viewport_round_trip() {
        let mut state = CanvasState::new(canvas(), CanvasShape::Rectangle);
        state.set_zoom_percent(200);
        let viewport = Viewport::for_canvas(&state).with_origin(10.0, 20.0);

        let (vx, vy) = viewport.canvas_to_view(50.0, 50.0);
        assert_eq!((vx, vy), (110.0, 120.0));
        assert_eq!(viewport.view_to_canvas(vx, vy), (50.0, 50.0));
        assert_eq!(viewport.delta_to_canvas(20.0, -10.0), (10.0, -5.0));
    }

    #[test]
    fn test_zoom_steps_stay_in_range() {
        let mut state = CanvasState::default();
        state.set_zoom_percent(295);
        assert_eq!(zoom_in(&mut state), 300);
        state.set_zoom_percent(15);
        assert_eq!(zoom_out(&mut state), 10);
    }

    #[test]
    fn test_zoom_to_fit() {
        let mut state = CanvasState::new(canvas(), CanvasShape::Rectangle);
        assert_eq!(zoom_to_fit(&mut state, 400.0, 600.0), 50);
    }
}
