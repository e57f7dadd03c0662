//! # Artboard Editor
//!
//! Design editing engine: mutations, undo history, selection and the
//! geometry of direct manipulation.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ UI gestures: pointer, keyboard, panels      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession                         │
//! │  - Interaction state machine (selection)    │
//! │  - Geometry (clamp, resize, rotate, zoom)   │
//! │  - Mutations with color sanitizing          │
//! │  - Snapshot history (undo/redo)             │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ render: Design → VNode tree                 │
//! │ storage: debounced save / load              │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Mutations are the only write path**: every change to the element
//!    collection is a [`Mutation`] value
//! 2. **Geometry stays in canvas space**: zoom is a view transform only
//! 3. **No partial mutation**: a rejected mutation leaves the design as it was
//! 4. **Explicit session**: no global editor state
//!
//! ## Usage
//!
//! ```rust
//! use artboard_editor::{EditSession, ElementDraft};
//! use artboard_model::{CanvasState, Design};
//!
//! let mut session = EditSession::new(Design::new("demo", CanvasState::default()));
//!
//! let id = session.add_element(ElementDraft::text("Hello").at(50.0, 50.0, 200.0, 40.0))?;
//! session.move_by(&id, -100.0, 0.0)?;
//!
//! assert_eq!(session.element(&id).map(|e| e.x), Some(0.0));
//! assert!(session.undo());
//! # Ok::<(), artboard_editor::EditorError>(())
//! ```

mod errors;
pub mod geometry;
mod history;
mod interaction;
mod mutations;
mod patch;
mod session;

pub use errors::{EditorError, EditorResult, MutationError};
pub use geometry::{ResizeEnd, Viewport};
pub use history::{History, Snapshot, DEFAULT_HISTORY_LIMIT};
pub use interaction::{Intent, InteractionState, KeyCommand, Modifiers, TextStyle};
pub use mutations::{LayerDirection, Mutation, MutationOutcome};
pub use patch::{ElementDraft, ElementPatch};
pub use session::EditSession;
