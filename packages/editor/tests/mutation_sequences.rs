//! Comprehensive tests for complex mutation sequences
//!
//! This tests:
//! - Move + patch + delete chains
//! - Undo/redo sequences
//! - Batched mutations
//! - Document integrity after operations

use pagecraft_editor::{Document, Mutation, NodeId, Props, UndoStack};
use serde_json::json;

fn props(value: serde_json::Value) -> Props {
    value.as_object().cloned().unwrap()
}

fn add(parent: &NodeId, block_type: &str) -> Mutation {
    Mutation::AddNode {
        parent_id: parent.clone(),
        block_type: block_type.to_string(),
        index: None,
        props: None,
        node_id: None,
    }
}

fn created(stack: &mut UndoStack, doc: &mut Document, mutation: Mutation) -> NodeId {
    stack.apply(&mutation, doc).unwrap().node_id.unwrap()
}

#[test]
fn test_move_then_delete_sequence() {
    let mut doc = Document::new();
    let mut stack = UndoStack::new();
    let root = doc.root_id().clone();

    let child1 = created(&mut stack, &mut doc, add(&root, "Column"));
    let child2 = created(&mut stack, &mut doc, add(&root, "Column"));
    let text = created(&mut stack, &mut doc, add(&child2, "Text"));

    // Move child2 into child1
    stack
        .apply(
            &Mutation::MoveNode {
                node_id: child2.clone(),
                new_parent_id: child1.clone(),
                index: Some(0),
            },
            &mut doc,
        )
        .unwrap();
    assert_eq!(doc.children_of(&child1).unwrap(), &[child2.clone()]);

    // Delete child1 (should delete child2 and text too)
    stack
        .apply(&Mutation::DeleteNode { node_id: child1.clone() }, &mut doc)
        .unwrap();
    assert_eq!(doc.len(), 1);

    // Undo delete (should restore all three)
    stack.undo(&mut doc).unwrap();
    assert!(doc.contains(&child1));
    assert!(doc.contains(&child2));
    assert_eq!(doc.parent_of(&text).unwrap(), Some(&child2));

    // Undo move (child2 back under root, after child1)
    stack.undo(&mut doc).unwrap();
    assert_eq!(doc.children_of(&root).unwrap(), &[child1, child2]);
    assert!(doc.validate().is_ok());
}

#[test]
fn test_undo_everything_restores_initial_document() {
    let mut doc = Document::new();
    let initial = doc.clone();
    let mut stack = UndoStack::new();
    let root = doc.root_id().clone();

    let hero = created(&mut stack, &mut doc, add(&root, "Hero"));
    let button = created(&mut stack, &mut doc, add(&hero, "Button"));
    stack
        .apply(
            &Mutation::PatchProps {
                node_id: button.clone(),
                props: props(json!({ "text": "Book now" })),
            },
            &mut doc,
        )
        .unwrap();
    created(&mut stack, &mut doc, Mutation::DuplicateNode { node_id: hero.clone() });
    stack
        .apply(&Mutation::DeleteNode { node_id: hero }, &mut doc)
        .unwrap();

    while stack.can_undo() {
        stack.undo(&mut doc).unwrap();
    }

    assert_eq!(doc.iter().count(), 1);
    assert_eq!(doc.get(doc.root_id()), initial.get(initial.root_id()));
}

#[test]
fn test_redo_replays_identical_tree() {
    let mut doc = Document::new();
    let mut stack = UndoStack::new();
    let root = doc.root_id().clone();

    let column = created(&mut stack, &mut doc, add(&root, "Column"));
    created(&mut stack, &mut doc, add(&column, "Image"));
    let copy = created(&mut stack, &mut doc, Mutation::DuplicateNode { node_id: column });
    let done: Vec<_> = doc.iter().cloned().collect();

    for _ in 0..3 {
        stack.undo(&mut doc).unwrap();
    }
    assert_eq!(doc.len(), 1);
    for _ in 0..3 {
        stack.redo(&mut doc).unwrap();
    }

    let redone: Vec<_> = doc.iter().cloned().collect();
    assert_eq!(redone, done);
    assert!(doc.contains(&copy));
}

#[test]
fn test_batch_is_one_undo_step() {
    let mut doc = Document::new();
    let mut stack = UndoStack::new();
    let root = doc.root_id().clone();

    stack.begin_batch();
    stack.set_batch_description("Insert pricing section");
    let section = created(&mut stack, &mut doc, add(&root, "Container"));
    created(&mut stack, &mut doc, add(&section, "Text"));
    created(&mut stack, &mut doc, add(&section, "BookingForm"));
    stack.end_batch();

    assert_eq!(stack.undo_levels(), 1);
    assert_eq!(doc.len(), 4);

    stack.undo(&mut doc).unwrap();
    assert_eq!(doc.len(), 1);

    stack.redo(&mut doc).unwrap();
    assert_eq!(doc.len(), 4);
    assert_eq!(doc.children_of(&section).unwrap().len(), 2);
}

#[test]
fn test_rejected_mutation_leaves_history_alone() {
    let mut doc = Document::new();
    let mut stack = UndoStack::new();
    let root = doc.root_id().clone();

    let spacer = created(&mut stack, &mut doc, add(&root, "Spacer"));
    let before = doc.clone();

    assert!(stack.apply(&add(&spacer, "Text"), &mut doc).is_err());
    assert!(stack
        .apply(&Mutation::DeleteNode { node_id: root }, &mut doc)
        .is_err());

    assert_eq!(doc, before);
    assert_eq!(stack.undo_levels(), 1);
}

#[test]
fn test_undo_replace_props() {
    let mut doc = Document::new();
    let mut stack = UndoStack::new();
    let root = doc.root_id().clone();
    let slider = created(&mut stack, &mut doc, add(&root, "PartySlider"));
    let original = doc.node(&slider).unwrap().props.clone();

    stack
        .apply(
            &Mutation::ReplaceProps {
                node_id: slider.clone(),
                props: props(json!({ "images": ["a.jpg", "b.jpg"] })),
            },
            &mut doc,
        )
        .unwrap();
    assert_eq!(doc.node(&slider).unwrap().props.len(), 1);

    stack.undo(&mut doc).unwrap();
    assert_eq!(doc.node(&slider).unwrap().props, original);
}
