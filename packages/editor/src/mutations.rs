//! # Element Mutations
//!
//! The single write path for the element collection.
//!
//! ## Mutation Semantics
//!
//! ### AddElement
//! - Requires a `type`; without one the add is rejected and nothing changes
//! - Assigns a fresh unique id and sanitizes every color
//!
//! ### UpdateElement
//! - Merge by identity; colors sanitized first
//! - Missing id is a no-op, not an error
//!
//! ### DeleteElement
//! - Remove by identity; missing id is a no-op
//!
//! ### ReorderLayer
//! - Front: one above the global maximum z-index (both faces)
//! - Back: one below the global minimum z-index (both faces)
//!
//! ### Flip
//! - Graphic elements only; other kinds are a no-op

use crate::errors::MutationError;
use crate::patch::{ElementDraft, ElementPatch};
use artboard_model::{
    max_z_index, min_z_index, DesignElement, ElementKind, FlipAxis, IdGenerator,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerDirection {
    Front,
    Back,
}

/// Semantic operations over the element collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Mutation {
    AddElement {
        draft: ElementDraft,
    },
    UpdateElement {
        id: String,
        patch: ElementPatch,
    },
    DeleteElement {
        id: String,
    },
    ReorderLayer {
        id: String,
        direction: LayerDirection,
    },
    Flip {
        id: String,
        axis: FlipAxis,
    },
}

/// What a mutation did to the collection
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    Added { id: String },
    Updated { id: String },
    Deleted { id: String },
    /// Nothing changed (unknown id, same values, wrong kind)
    Noop { reason: &'static str },
}

impl MutationOutcome {
    pub fn is_effective(&self) -> bool {
        !matches!(self, MutationOutcome::Noop { .. })
    }
}

impl Mutation {
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddElement { .. } => "addElement",
            Mutation::UpdateElement { .. } => "updateElement",
            Mutation::DeleteElement { .. } => "deleteElement",
            Mutation::ReorderLayer { .. } => "reorderLayer",
            Mutation::Flip { .. } => "flip",
        }
    }

    /// Apply to the collection. On error the collection is untouched.
    pub fn apply(
        &self,
        elements: &mut Vec<DesignElement>,
        ids: &mut IdGenerator,
    ) -> Result<MutationOutcome, MutationError> {
        let outcome = match self {
            Mutation::AddElement { draft } => Self::apply_add(elements, ids, draft)?,
            Mutation::UpdateElement { id, patch } => Self::apply_update(elements, id, patch)?,
            Mutation::DeleteElement { id } => Self::apply_delete(elements, id),
            Mutation::ReorderLayer { id, direction } => {
                Self::apply_reorder(elements, id, *direction)
            }
            Mutation::Flip { id, axis } => Self::apply_flip(elements, id, *axis),
        };

        tracing::debug!(mutation = self.name(), ?outcome, "mutation applied");
        Ok(outcome)
    }

    fn apply_add(
        elements: &mut Vec<DesignElement>,
        ids: &mut IdGenerator,
        draft: &ElementDraft,
    ) -> Result<MutationOutcome, MutationError> {
        let element_type = draft
            .element_type
            .ok_or(MutationError::UnsupportedElement)?;

        if let Some(field) = draft.props.non_finite_field() {
            return Err(MutationError::NonFinite(field));
        }

        let id = ids.new_unique_id(elements.iter().map(|e| e.id.as_str()));
        let mut element = DesignElement::new(id.clone(), ElementKind::with_defaults(element_type));
        draft.props.clone().sanitized().apply_to(&mut element);

        elements.push(element);
        Ok(MutationOutcome::Added { id })
    }

    fn apply_update(
        elements: &mut [DesignElement],
        id: &str,
        patch: &ElementPatch,
    ) -> Result<MutationOutcome, MutationError> {
        if let Some(field) = patch.non_finite_field() {
            return Err(MutationError::NonFinite(field));
        }

        let Some(element) = elements.iter_mut().find(|e| e.id == id) else {
            return Ok(MutationOutcome::Noop { reason: "element not found" });
        };

        let mut updated = element.clone();
        patch.clone().sanitized().apply_to(&mut updated);

        if updated == *element {
            return Ok(MutationOutcome::Noop { reason: "unchanged" });
        }

        *element = updated;
        Ok(MutationOutcome::Updated { id: id.to_string() })
    }

    fn apply_delete(elements: &mut Vec<DesignElement>, id: &str) -> MutationOutcome {
        match elements.iter().position(|e| e.id == id) {
            Some(index) => {
                elements.remove(index);
                MutationOutcome::Deleted { id: id.to_string() }
            }
            None => MutationOutcome::Noop { reason: "element not found" },
        }
    }

    fn apply_reorder(
        elements: &mut [DesignElement],
        id: &str,
        direction: LayerDirection,
    ) -> MutationOutcome {
        let target = match direction {
            LayerDirection::Front => max_z_index(elements).map(|z| z + 1),
            LayerDirection::Back => min_z_index(elements).map(|z| z - 1),
        };

        match (elements.iter_mut().find(|e| e.id == id), target) {
            (Some(element), Some(z)) => {
                element.z_index = z;
                MutationOutcome::Updated { id: id.to_string() }
            }
            _ => MutationOutcome::Noop { reason: "element not found" },
        }
    }

    fn apply_flip(elements: &mut [DesignElement], id: &str, axis: FlipAxis) -> MutationOutcome {
        let Some(element) = elements.iter_mut().find(|e| e.id == id) else {
            return MutationOutcome::Noop { reason: "element not found" };
        };

        match &mut element.kind {
            ElementKind::Graphic(graphic) => {
                graphic.flip = graphic.flip.toggled(axis);
                MutationOutcome::Updated { id: id.to_string() }
            }
            _ => MutationOutcome::Noop { reason: "flip applies to graphics only" },
        }
    }
}
