//! Tests for mutation sequences through a session
//!
//! This tests:
//! - Undo/redo inverse laws
//! - canUndo/canRedo at both ends
//! - Redo tail discarded by a new mutation
//! - Collection integrity after mixed operations

use artboard_editor::{EditSession, ElementDraft, ElementPatch, LayerDirection};
use artboard_model::{CanvasState, Design, DesignElement, ElementType, FlipAxis};

fn session() -> EditSession {
    EditSession::new(Design::new("sequences", CanvasState::default()))
}

fn ids(session: &EditSession) -> Vec<String> {
    session.elements().iter().map(|e| e.id.clone()).collect()
}

#[test]
fn test_undo_then_redo_restores_state() {
    let mut session = session();
    let a = session.add_element(ElementDraft::text("a")).unwrap();
    session.move_by(&a, 30.0, 40.0).unwrap();
    session.flip_face();
    let after: Vec<DesignElement> = session.elements().to_vec();

    assert!(session.undo());
    assert_ne!(session.elements(), after.as_slice());
    assert!(session.redo());
    assert_eq!(session.elements(), after.as_slice());
}

#[test]
fn test_undo_all_the_way_back() {
    let mut session = session();
    let a = session.add_element(ElementDraft::new(ElementType::Icon)).unwrap();
    session.reorder_layer(&a, LayerDirection::Front).unwrap();
    session.delete_element(&a).unwrap();

    let mut steps = 0;
    while session.undo() {
        steps += 1;
    }
    assert_eq!(steps, 3);
    assert!(session.elements().is_empty());
    assert!(!session.can_undo());
    assert!(session.can_redo());

    while session.redo() {}
    assert!(session.elements().is_empty());
    assert!(!session.can_redo());
    assert!(session.can_undo());
}

#[test]
fn test_new_mutation_discards_redo() {
    let mut session = session();
    session.add_element(ElementDraft::text("a")).unwrap();
    session.add_element(ElementDraft::text("b")).unwrap();
    session.undo();
    assert!(session.can_redo());

    session.add_element(ElementDraft::text("c")).unwrap();
    assert!(!session.can_redo());
    assert_eq!(session.elements().len(), 2);
}

#[test]
fn test_noop_mutations_leave_history_alone() {
    let mut session = session();
    let a = session.add_element(ElementDraft::new(ElementType::Image)).unwrap();
    let len = session.history().len();

    session.update_element("ghost", ElementPatch::position(1.0, 1.0)).unwrap();
    session.flip(&a, FlipAxis::Vertical).unwrap();
    session.delete_element("ghost").unwrap();

    assert_eq!(session.history().len(), len);
}

#[test]
fn test_delete_middle_then_undo_preserves_order() {
    let mut session = session();
    for label in ["one", "two", "three"] {
        session.add_element(ElementDraft::text(label)).unwrap();
    }
    let before = ids(&session);

    session.delete_element(&before[1]).unwrap();
    assert_eq!(session.elements().len(), 2);

    session.undo();
    assert_eq!(ids(&session), before);
}

#[test]
fn test_redo_after_undo_keeps_ids_unique() {
    let mut session = session();
    let a = session.add_element(ElementDraft::text("a")).unwrap();
    session.undo();
    let b = session.add_element(ElementDraft::text("b")).unwrap();

    assert_ne!(a, b);
    assert!(session.design().has_unique_ids());
}
