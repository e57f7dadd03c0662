//! # Selection & Interaction
//!
//! Single-selection state machine driven by pointer and keyboard input.
//!
//! ```text
//!            click element               double-click unlocked text
//!   Idle ─────────────────────▶ Selected ───────────────────────────▶ Editing
//!    ▲  ◀───────────────────── │  ▲  ◀──────────────────────────────── │
//!    │    click background      │  │         blur (commit content)     │
//!    │    Delete (unlocked)     │  │                                   │
//!    └──────────── Escape ──────┴──┴───────────── Escape ──────────────┘
//! ```
//!
//! Transitions here never touch the element collection. Keyboard routing
//! returns an [`Intent`] that the session turns into mutations.

use crate::geometry::{NUDGE_STEP, NUDGE_STEP_LARGE};
use crate::patch::ElementPatch;
use artboard_model::{DesignElement, TextProps};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "id")]
pub enum InteractionState {
    #[default]
    Idle,
    Selected(String),
    Editing(String),
}

impl InteractionState {
    /// Id of the selected element, including one being edited
    pub fn selected_id(&self) -> Option<&str> {
        match self {
            InteractionState::Idle => None,
            InteractionState::Selected(id) | InteractionState::Editing(id) => Some(id),
        }
    }

    pub fn editing_id(&self) -> Option<&str> {
        match self {
            InteractionState::Editing(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, InteractionState::Editing(_))
    }

    pub fn click_element(&mut self, id: &str) {
        *self = InteractionState::Selected(id.to_string());
    }

    pub fn click_background(&mut self) {
        *self = InteractionState::Idle;
    }

    /// Enter inline editing for unlocked text; anything else just selects
    pub fn double_click(&mut self, element: &DesignElement) {
        *self = if element.is_text() && !element.locked {
            InteractionState::Editing(element.id.clone())
        } else {
            InteractionState::Selected(element.id.clone())
        };
    }

    /// Leave inline editing. Returns the id whose content must be committed.
    pub fn blur(&mut self) -> Option<String> {
        match std::mem::take(self) {
            InteractionState::Editing(id) => {
                *self = InteractionState::Selected(id.clone());
                Some(id)
            }
            other => {
                *self = other;
                None
            }
        }
    }

    pub fn escape(&mut self) {
        *self = InteractionState::Idle;
    }

    /// Drop the selection if it points at `id`
    pub fn forget(&mut self, id: &str) {
        if self.selected_id() == Some(id) {
            *self = InteractionState::Idle;
        }
    }

    /// Route a key command against the current selection.
    ///
    /// `element` is the selected element, if any. `input_focused` is true
    /// while any text input (inline editor or a side-panel field) has focus.
    pub fn route(
        &self,
        command: KeyCommand,
        element: Option<&DesignElement>,
        input_focused: bool,
    ) -> Intent {
        if command == KeyCommand::Escape {
            return Intent::Deselect;
        }

        let (InteractionState::Selected(id), Some(element)) = (self, element) else {
            return Intent::Ignore;
        };
        if element.id != *id {
            return Intent::Ignore;
        }

        match command {
            KeyCommand::Escape => Intent::Deselect,
            KeyCommand::Delete if !element.locked && !input_focused => {
                Intent::Delete { id: id.clone() }
            }
            KeyCommand::Nudge { dx, dy } if !element.locked && !input_focused => Intent::Move {
                id: id.clone(),
                dx,
                dy,
            },
            KeyCommand::ToggleStyle(style) => match element.text() {
                Some(text) => Intent::Update {
                    id: id.clone(),
                    patch: style.toggle(text),
                },
                None => Intent::Ignore,
            },
            _ => Intent::Ignore,
        }
    }
}

/// What the session should do in response to a key
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Ignore,
    Deselect,
    Delete { id: String },
    Move { id: String, dx: f64, dy: f64 },
    Update { id: String, patch: ElementPatch },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    /// Cmd on macOS
    pub meta: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        meta: false,
        alt: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    /// Ctrl, or Cmd on macOS
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextStyle {
    Bold,
    Italic,
    Underline,
}

impl TextStyle {
    /// Patch flipping this style on `text`
    pub fn toggle(self, text: &TextProps) -> ElementPatch {
        let mut patch = ElementPatch::default();
        match self {
            TextStyle::Bold => {
                let weight = if text.is_bold() { "normal" } else { "bold" };
                patch.font_weight = Some(weight.to_string());
            }
            TextStyle::Italic => {
                let style = if text.is_italic() { "normal" } else { "italic" };
                patch.font_style = Some(style.to_string());
            }
            TextStyle::Underline => {
                let decoration = if text.is_underlined() { "none" } else { "underline" };
                patch.text_decoration = Some(decoration.to_string());
            }
        }
        patch
    }
}

/// Keyboard input the editor understands
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyCommand {
    Escape,
    Delete,
    Nudge { dx: f64, dy: f64 },
    ToggleStyle(TextStyle),
}

impl KeyCommand {
    /// Map a DOM-style key name plus modifiers to a command
    pub fn from_key(key: &str, modifiers: Modifiers) -> Option<KeyCommand> {
        let step = if modifiers.shift {
            NUDGE_STEP_LARGE
        } else {
            NUDGE_STEP
        };

        let command = match key {
            "Escape" | "Esc" => KeyCommand::Escape,
            "Delete" | "Del" => KeyCommand::Delete,
            "ArrowUp" | "Up" => KeyCommand::Nudge { dx: 0.0, dy: -step },
            "ArrowDown" | "Down" => KeyCommand::Nudge { dx: 0.0, dy: step },
            "ArrowLeft" | "Left" => KeyCommand::Nudge { dx: -step, dy: 0.0 },
            "ArrowRight" | "Right" => KeyCommand::Nudge { dx: step, dy: 0.0 },
            _ if modifiers.command() => match key.to_ascii_lowercase().as_str() {
                "b" => KeyCommand::ToggleStyle(TextStyle::Bold),
                "i" => KeyCommand::ToggleStyle(TextStyle::Italic),
                "u" => KeyCommand::ToggleStyle(TextStyle::Underline),
                _ => return None,
            },
            _ => return None,
        };
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artboard_model::{ElementKind, ElementType};

    fn text(id: &str) -> DesignElement {
        DesignElement::new(id, ElementKind::with_defaults(ElementType::Text))
    }

    #[test]
    fn test_key_parsing() {
        assert_eq!(KeyCommand::from_key("Escape", Modifiers::NONE), Some(KeyCommand::Escape));
        assert_eq!(
            KeyCommand::from_key("ArrowLeft", Modifiers::shift()),
            Some(KeyCommand::Nudge { dx: -10.0, dy: 0.0 })
        );
        assert_eq!(
            KeyCommand::from_key("ArrowDown", Modifiers::NONE),
            Some(KeyCommand::Nudge { dx: 0.0, dy: 5.0 })
        );
        assert_eq!(
            KeyCommand::from_key("B", Modifiers::ctrl()),
            Some(KeyCommand::ToggleStyle(TextStyle::Bold))
        );
        assert_eq!(KeyCommand::from_key("b", Modifiers::NONE), None);
    }

    #[test]
    fn test_double_click_locked_text_only_selects() {
        let mut element = text("t");
        element.locked = true;
        let mut state = InteractionState::Idle;
        state.double_click(&element);
        assert_eq!(state, InteractionState::Selected("t".to_string()));

        element.locked = false;
        state.double_click(&element);
        assert_eq!(state, InteractionState::Editing("t".to_string()));
    }

    #[test]
    fn test_blur_commits_only_when_editing() {
        let mut state = InteractionState::Editing("t".to_string());
        assert_eq!(state.blur(), Some("t".to_string()));
        assert_eq!(state, InteractionState::Selected("t".to_string()));
        assert_eq!(state.blur(), None);
    }

    #[test]
    fn test_locked_element_ignores_delete_and_nudge() {
        let mut element = text("t");
        element.locked = true;
        let state = InteractionState::Selected("t".to_string());

        assert_eq!(state.route(KeyCommand::Delete, Some(&element), false), Intent::Ignore);
        assert_eq!(
            state.route(KeyCommand::Nudge { dx: 5.0, dy: 0.0 }, Some(&element), false),
            Intent::Ignore
        );
    }

    #[test]
    fn test_nudge_suppressed_while_input_focused() {
        let element = text("t");
        let state = InteractionState::Selected("t".to_string());
        let command = KeyCommand::Nudge { dx: 5.0, dy: 0.0 };

        assert_eq!(state.route(command, Some(&element), true), Intent::Ignore);
        assert!(matches!(state.route(command, Some(&element), false), Intent::Move { .. }));
    }

    #[test]
    fn test_toggle_bold() {
        let element = text("t");
        let state = InteractionState::Selected("t".to_string());
        let intent = state.route(KeyCommand::ToggleStyle(TextStyle::Bold), Some(&element), false);
        let Intent::Update { patch, .. } = intent else {
            panic!("expected update, got {intent:?}");
        };
        assert_eq!(patch.font_weight.as_deref(), Some("bold"));
    }

    #[test]
    fn test_escape_from_any_state() {
        for state in [
            InteractionState::Idle,
            InteractionState::Selected("a".to_string()),
            InteractionState::Editing("a".to_string()),
        ] {
            assert_eq!(state.route(KeyCommand::Escape, None, true), Intent::Deselect);
        }
    }
}
