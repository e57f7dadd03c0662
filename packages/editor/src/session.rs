//! # Edit Session
//!
//! One user's editing context over a single design.
//!
//! The session owns the design, its undo history, the interaction state
//! and the id generator. Every gesture goes through here so that the
//! collection, history and selection stay consistent:
//!
//! 1. Apply the mutation (validation failures leave everything untouched)
//! 2. Record a snapshot if the collection actually changed
//! 3. Fix up the selection (select new elements, forget deleted ones)
//! 4. Bump the revision so autosave knows there is something to persist

use crate::errors::{EditorError, EditorResult, MutationError};
use crate::geometry::{self, ResizeEnd};
use crate::history::{History, DEFAULT_HISTORY_LIMIT};
use crate::interaction::{Intent, InteractionState, KeyCommand, Modifiers};
use crate::mutations::{LayerDirection, Mutation, MutationOutcome};
use crate::patch::{ElementDraft, ElementPatch};
use artboard_model::{
    Background, CanvasShape, CanvasSize, CanvasState, Design, DesignElement, Face, FlipAxis,
    IdGenerator,
};

pub struct EditSession {
    design: Design,
    history: History,
    interaction: InteractionState,
    ids: IdGenerator,
    /// Bumped on every change that should be persisted
    revision: u64,
}

impl EditSession {
    pub fn new(design: Design) -> Self {
        Self::with_history_limit(design, DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_history_limit(mut design: Design, limit: usize) -> Self {
        design.sanitize_colors();
        let ids = IdGenerator::new(&design.meta.project_name);
        let history = History::with_limit(design.elements.clone(), limit);
        Self {
            design,
            history,
            interaction: InteractionState::Idle,
            ids,
            revision: 0,
        }
    }

    pub fn design(&self) -> &Design {
        &self.design
    }

    pub fn elements(&self) -> &[DesignElement] {
        &self.design.elements
    }

    pub fn canvas(&self) -> &CanvasState {
        &self.design.canvas
    }

    pub fn element(&self, id: &str) -> Option<&DesignElement> {
        self.design.find(id)
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.interaction.selected_id()
    }

    pub fn selected(&self) -> Option<&DesignElement> {
        self.selected_id().and_then(|id| self.design.find(id))
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Replace the whole design, e.g. after a load. History restarts.
    pub fn replace_design(&mut self, mut design: Design) {
        design.sanitize_colors();
        self.ids = IdGenerator::new(&design.meta.project_name);
        self.history.reset(design.elements.clone());
        self.interaction = InteractionState::Idle;
        self.design = design;
        self.touch();
    }

    /// Record the backend identity assigned by the first save
    pub fn set_design_id(&mut self, design_id: impl Into<String>) {
        self.design.meta.design_id = Some(design_id.into());
    }

    // ---- mutations ---------------------------------------------------------

    pub fn apply(&mut self, mutation: Mutation) -> EditorResult<MutationOutcome> {
        let outcome = mutation.apply(&mut self.design.elements, &mut self.ids)?;

        if !outcome.is_effective() {
            return Ok(outcome);
        }

        self.history.record(&self.design.elements);
        match &outcome {
            MutationOutcome::Added { id } => self.interaction.click_element(id),
            MutationOutcome::Deleted { id } => self.interaction.forget(id),
            _ => {}
        }
        self.touch();

        Ok(outcome)
    }

    /// Add an element and select it. Returns the new id.
    pub fn add_element(&mut self, draft: ElementDraft) -> EditorResult<String> {
        match self.apply(Mutation::AddElement { draft })? {
            MutationOutcome::Added { id } => Ok(id),
            _ => Err(MutationError::UnsupportedElement.into()),
        }
    }

    pub fn update_element(&mut self, id: &str, patch: ElementPatch) -> EditorResult<MutationOutcome> {
        self.apply(Mutation::UpdateElement {
            id: id.to_string(),
            patch,
        })
    }

    pub fn delete_element(&mut self, id: &str) -> EditorResult<MutationOutcome> {
        self.apply(Mutation::DeleteElement { id: id.to_string() })
    }

    pub fn reorder_layer(&mut self, id: &str, direction: LayerDirection) -> EditorResult<MutationOutcome> {
        self.apply(Mutation::ReorderLayer {
            id: id.to_string(),
            direction,
        })
    }

    pub fn flip(&mut self, id: &str, axis: FlipAxis) -> EditorResult<MutationOutcome> {
        self.apply(Mutation::Flip {
            id: id.to_string(),
            axis,
        })
    }

    // ---- direct manipulation -----------------------------------------------

    fn unlocked(&self, id: &str) -> EditorResult<&DesignElement> {
        let element = self
            .design
            .find(id)
            .ok_or_else(|| EditorError::ElementNotFound(id.to_string()))?;
        if element.locked {
            return Err(EditorError::Locked(id.to_string()));
        }
        Ok(element)
    }

    /// Drag end: move to (x, y) clamped to the canvas
    pub fn move_to(&mut self, id: &str, x: f64, y: f64) -> EditorResult<MutationOutcome> {
        let patch = geometry::move_to(self.unlocked(id)?, x, y, self.design.canvas.size);
        self.update_element(id, patch)
    }

    pub fn move_by(&mut self, id: &str, dx: f64, dy: f64) -> EditorResult<MutationOutcome> {
        let patch = geometry::move_by(self.unlocked(id)?, dx, dy, self.design.canvas.size);
        self.update_element(id, patch)
    }

    pub fn resize(&mut self, id: &str, end: ResizeEnd) -> EditorResult<MutationOutcome> {
        self.unlocked(id)?;
        self.update_element(id, end.to_patch())
    }

    pub fn rotate(&mut self, id: &str, degrees: f64) -> EditorResult<MutationOutcome> {
        self.unlocked(id)?;
        self.update_element(id, geometry::rotate_to(degrees))
    }

    // ---- pointer & keyboard ------------------------------------------------

    pub fn click_element(&mut self, id: &str) {
        if self.design.find(id).is_some() {
            self.interaction.click_element(id);
        }
    }

    /// Click at a canvas-space point: select the topmost hit or clear
    pub fn click_at(&mut self, x: f64, y: f64) -> Option<String> {
        let face = self.design.canvas.active_face;
        let hit = geometry::hit_test(&self.design.elements, face, x, y).map(|e| e.id.clone());
        match &hit {
            Some(id) => self.interaction.click_element(id),
            None => self.interaction.click_background(),
        }
        hit
    }

    pub fn click_background(&mut self) {
        self.interaction.click_background();
    }

    pub fn double_click(&mut self, id: &str) {
        if let Some(element) = self.design.find(id) {
            self.interaction.double_click(element);
        }
    }

    /// Inline editor lost focus: commit `content` and fall back to Selected
    pub fn commit_inline_edit(&mut self, content: &str) -> EditorResult<Option<MutationOutcome>> {
        match self.interaction.blur() {
            Some(id) => self
                .update_element(&id, ElementPatch::content(content))
                .map(Some),
            None => Ok(None),
        }
    }

    pub fn escape(&mut self) {
        self.interaction.escape();
    }

    /// Handle a key press. Unknown keys are ignored.
    pub fn key_down(
        &mut self,
        key: &str,
        modifiers: Modifiers,
        input_focused: bool,
    ) -> EditorResult<Option<MutationOutcome>> {
        let Some(command) = KeyCommand::from_key(key, modifiers) else {
            return Ok(None);
        };

        let intent = self.interaction.route(command, self.selected(), input_focused);
        tracing::debug!(key, ?intent, "key routed");

        match intent {
            Intent::Ignore => Ok(None),
            Intent::Deselect => {
                self.interaction.escape();
                Ok(None)
            }
            Intent::Delete { id } => {
                let outcome = self.delete_element(&id)?;
                self.interaction.escape();
                Ok(Some(outcome))
            }
            Intent::Move { id, dx, dy } => self.move_by(&id, dx, dy).map(Some),
            Intent::Update { id, patch } => self.update_element(&id, patch).map(Some),
        }
    }

    // ---- history -----------------------------------------------------------

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.design.elements = snapshot.clone();
                self.after_restore();
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.design.elements = snapshot.clone();
                self.after_restore();
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn after_restore(&mut self) {
        if let Some(id) = self.interaction.selected_id() {
            if self.design.find(id).is_none() {
                self.interaction = InteractionState::Idle;
            }
        }
        self.touch();
    }

    // ---- canvas ------------------------------------------------------------

    /// Switch faces. A selection hidden on the new face is dropped.
    pub fn set_active_face(&mut self, face: Face) {
        if self.design.canvas.active_face == face {
            return;
        }
        self.design.canvas.active_face = face;

        if let Some(selected) = self.selected() {
            if !selected.visible_on(face) {
                self.interaction = InteractionState::Idle;
            }
        }
    }

    pub fn flip_face(&mut self) {
        let face = self.design.canvas.active_face.other();
        self.set_active_face(face);
    }

    pub fn set_zoom(&mut self, percent: i64) -> u32 {
        self.design.canvas.set_zoom_percent(percent)
    }

    pub fn zoom_in(&mut self) -> u32 {
        geometry::zoom_in(&mut self.design.canvas)
    }

    pub fn zoom_out(&mut self) -> u32 {
        geometry::zoom_out(&mut self.design.canvas)
    }

    pub fn set_background(&mut self, background: Background) {
        self.design.canvas.set_background(background);
        self.touch();
    }

    pub fn set_canvas_size(&mut self, size: CanvasSize) {
        self.design.canvas.size = size;
        self.touch();
    }

    pub fn set_canvas_shape(&mut self, shape: CanvasShape) {
        self.design.canvas.shape = shape;
        self.touch();
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}
