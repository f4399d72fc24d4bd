//! # Tree Mutations
//!
//! Editor intents as data. The toolbox, drag-and-drop layer and settings panel
//! each emit a [`Mutation`]; the document applies it or rejects it whole.
//!
//! ## Mutation Semantics
//!
//! ### AddNode
//! - Props are the block defaults with the given props merged over them
//! - Parent must be a canvas block
//!
//! ### MoveNode
//! - Atomic relocation of node to new parent
//! - Fails if the destination is the node itself or inside it
//!
//! ### DeleteNode
//! - Removes node and all descendants
//! - The root is never deleted
//!
//! ### PatchProps
//! - Shallow key overwrite, last write wins
//! - Nested lists (services, slides) are replaced whole

use crate::document::Document;
use crate::errors::DocumentError;
use crate::node::{Node, NodeId};
use pagecraft_blocks::Props;
use serde::{Deserialize, Serialize};

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Add a new block under a canvas node
    AddNode {
        parent_id: NodeId,
        block_type: String,
        #[serde(default)]
        index: Option<usize>,
        #[serde(default)]
        props: Option<Props>,
        /// Fixed id for the new node (redo); generated when absent
        #[serde(default)]
        node_id: Option<NodeId>,
    },

    /// Move a node to a new parent at index
    MoveNode {
        node_id: NodeId,
        new_parent_id: NodeId,
        #[serde(default)]
        index: Option<usize>,
    },

    /// Remove a node and its subtree
    DeleteNode { node_id: NodeId },

    /// Merge props into a node's props
    PatchProps { node_id: NodeId, props: Props },

    /// Replace a node's props wholesale
    ReplaceProps { node_id: NodeId, props: Props },

    /// Copy a subtree next to the original
    DuplicateNode { node_id: NodeId },

    /// Put back a subtree removed by DeleteNode
    RestoreSubtree {
        parent_id: NodeId,
        index: Option<usize>,
        nodes: Vec<Node>,
    },
}

/// Result of applying a mutation
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// New document version
    pub version: u64,

    /// Node created by the mutation (add, duplicate, restore)
    pub node_id: Option<NodeId>,
}

/// A mutation as it was applied, with what it takes to reverse it
#[derive(Debug, Clone)]
pub(crate) struct Recorded {
    /// Replays exactly the same change (ids fixed)
    pub redo: Mutation,
    pub inverse: Mutation,
    pub result: MutationResult,
}

impl Mutation {
    /// Apply mutation to the document with validation
    pub fn apply(&self, doc: &mut Document) -> Result<MutationResult, DocumentError> {
        let node_id = match self {
            Mutation::AddNode {
                parent_id,
                block_type,
                index,
                props,
                node_id,
            } => Some(doc.insert_node(parent_id, block_type, *index, props.as_ref(), node_id.clone())?),

            Mutation::MoveNode {
                node_id,
                new_parent_id,
                index,
            } => {
                doc.move_node(node_id, new_parent_id, *index)?;
                None
            }

            Mutation::DeleteNode { node_id } => {
                doc.delete_node(node_id)?;
                None
            }

            Mutation::PatchProps { node_id, props } => {
                doc.patch_props(node_id, props.clone())?;
                None
            }

            Mutation::ReplaceProps { node_id, props } => {
                doc.replace_props(node_id, props.clone())?;
                None
            }

            Mutation::DuplicateNode { node_id } => Some(doc.duplicate_node(node_id)?),

            Mutation::RestoreSubtree {
                parent_id,
                index,
                nodes,
            } => Some(doc.restore_subtree(parent_id, *index, nodes.clone())?),
        };

        Ok(MutationResult {
            version: doc.version(),
            node_id,
        })
    }

    /// Validate without applying
    pub fn validate(&self, doc: &Document) -> Result<(), DocumentError> {
        match self {
            Mutation::AddNode {
                parent_id,
                block_type,
                node_id,
                ..
            } => {
                doc.check_add(parent_id, block_type)?;
                match node_id {
                    Some(id) if doc.contains(id) => Err(DocumentError::DuplicateNodeId(id.clone())),
                    _ => Ok(()),
                }
            }

            Mutation::MoveNode {
                node_id,
                new_parent_id,
                ..
            } => doc.check_move(node_id, new_parent_id),

            Mutation::DeleteNode { node_id } => doc.check_delete(node_id),

            Mutation::PatchProps { node_id, .. } | Mutation::ReplaceProps { node_id, .. } => {
                doc.node(node_id).map(|_| ())
            }

            Mutation::DuplicateNode { node_id } => doc.check_duplicate(node_id),

            Mutation::RestoreSubtree { parent_id, nodes, .. } => {
                doc.check_restore(parent_id, nodes).map(|_| ())
            }
        }
    }

    /// Apply, and capture the replayable form plus the inverse for undo
    pub(crate) fn apply_recorded(&self, doc: &mut Document) -> Result<Recorded, DocumentError> {
        match self {
            Mutation::AddNode {
                parent_id,
                block_type,
                index,
                props,
                ..
            } => {
                let result = self.apply(doc)?;
                let created = created_id(&result)?;
                Ok(Recorded {
                    redo: Mutation::AddNode {
                        parent_id: parent_id.clone(),
                        block_type: block_type.clone(),
                        index: *index,
                        props: props.clone(),
                        node_id: Some(created.clone()),
                    },
                    inverse: Mutation::DeleteNode { node_id: created },
                    result,
                })
            }

            Mutation::MoveNode {
                node_id,
                new_parent_id,
                ..
            } => {
                doc.check_move(node_id, new_parent_id)?;
                // check_move rejects the root, so a movable node has a parent
                let Some((old_parent, old_index)) = doc.position_of(node_id)? else {
                    return Err(DocumentError::CyclicMove {
                        node_id: node_id.clone(),
                        target_id: new_parent_id.clone(),
                    });
                };
                let result = self.apply(doc)?;
                Ok(Recorded {
                    redo: self.clone(),
                    inverse: Mutation::MoveNode {
                        node_id: node_id.clone(),
                        new_parent_id: old_parent,
                        index: Some(old_index),
                    },
                    result,
                })
            }

            Mutation::DeleteNode { node_id } => {
                doc.check_delete(node_id)?;
                let Some((parent_id, index)) = doc.position_of(node_id)? else {
                    return Err(DocumentError::RootUndeletable);
                };
                let removed = doc.delete_node(node_id)?;
                Ok(Recorded {
                    redo: self.clone(),
                    inverse: Mutation::RestoreSubtree {
                        parent_id,
                        index: Some(index),
                        nodes: removed,
                    },
                    result: MutationResult {
                        version: doc.version(),
                        node_id: None,
                    },
                })
            }

            Mutation::PatchProps { node_id, .. } | Mutation::ReplaceProps { node_id, .. } => {
                let previous = doc.node(node_id)?.props.clone();
                let result = self.apply(doc)?;
                Ok(Recorded {
                    redo: self.clone(),
                    inverse: Mutation::ReplaceProps {
                        node_id: node_id.clone(),
                        props: previous,
                    },
                    result,
                })
            }

            Mutation::DuplicateNode { .. } => {
                let result = self.apply(doc)?;
                let copy_id = created_id(&result)?;
                let Some((parent_id, index)) = doc.position_of(&copy_id)? else {
                    return Err(DocumentError::RootImmutable);
                };
                let mut nodes = Vec::new();
                for id in std::iter::once(copy_id.clone()).chain(doc.descendants(&copy_id)?) {
                    nodes.push(doc.node(&id)?.clone());
                }
                Ok(Recorded {
                    redo: Mutation::RestoreSubtree {
                        parent_id,
                        index: Some(index),
                        nodes,
                    },
                    inverse: Mutation::DeleteNode { node_id: copy_id },
                    result,
                })
            }

            Mutation::RestoreSubtree { .. } => {
                let result = self.apply(doc)?;
                let restored = created_id(&result)?;
                Ok(Recorded {
                    redo: self.clone(),
                    inverse: Mutation::DeleteNode { node_id: restored },
                    result,
                })
            }
        }
    }

    /// Id of the node this mutation targets or creates under, for logging
    pub fn target(&self) -> &NodeId {
        match self {
            Mutation::AddNode { parent_id, .. } | Mutation::RestoreSubtree { parent_id, .. } => parent_id,
            Mutation::MoveNode { node_id, .. }
            | Mutation::DeleteNode { node_id }
            | Mutation::PatchProps { node_id, .. }
            | Mutation::ReplaceProps { node_id, .. }
            | Mutation::DuplicateNode { node_id } => node_id,
        }
    }
}

fn created_id(result: &MutationResult) -> Result<NodeId, DocumentError> {
    result
        .node_id
        .clone()
        .ok_or_else(|| DocumentError::MalformedDocument("mutation created no node".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::PatchProps {
            node_id: NodeId::from("text-123"),
            props: json!({ "text": "Hello World" }).as_object().cloned().unwrap(),
        };

        let json = serde_json::to_string(&mutation).unwrap();
        let deserialized: Mutation = serde_json::from_str(&json).unwrap();

        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_add_from_json_uses_defaults() {
        let mutation: Mutation = serde_json::from_value(json!({
            "AddNode": { "parent_id": "p", "block_type": "Text" }
        }))
        .unwrap();

        assert_eq!(
            mutation,
            Mutation::AddNode {
                parent_id: NodeId::from("p"),
                block_type: "Text".to_string(),
                index: None,
                props: None,
                node_id: None,
            }
        );
    }

    #[test]
    fn test_validation_rejects_unknown_ids() {
        let doc = Document::new();

        let mutation = Mutation::PatchProps {
            node_id: NodeId::from(""),
            props: Props::new(),
        };

        assert!(mutation.validate(&doc).is_err());
    }

    #[test]
    fn test_validate_does_not_touch_document() {
        let doc = Document::new();
        let before = doc.clone();

        let mutation = Mutation::AddNode {
            parent_id: doc.root_id().clone(),
            block_type: "Text".to_string(),
            index: None,
            props: None,
            node_id: None,
        };

        assert!(mutation.validate(&doc).is_ok());
        assert_eq!(doc, before);
    }

    #[test]
    fn test_apply_reports_created_node() {
        let mut doc = Document::new();
        let mutation = Mutation::AddNode {
            parent_id: doc.root_id().clone(),
            block_type: "Image".to_string(),
            index: None,
            props: None,
            node_id: Some(NodeId::from("hero-image")),
        };

        let result = mutation.apply(&mut doc).unwrap();
        assert_eq!(result.node_id, Some(NodeId::from("hero-image")));
        assert_eq!(result.version, 1);

        // Same fixed id twice is a collision
        assert_eq!(
            mutation.apply(&mut doc),
            Err(DocumentError::DuplicateNodeId(NodeId::from("hero-image")))
        );
    }

    #[test]
    fn test_inverse_of_move_restores_order() {
        let mut doc = Document::new();
        let root = doc.root_id().clone();
        let a = doc.add_node(&root, "Text", None, None).unwrap();
        let b = doc.add_node(&root, "Text", None, None).unwrap();

        let recorded = Mutation::MoveNode {
            node_id: b.clone(),
            new_parent_id: root.clone(),
            index: Some(0),
        }
        .apply_recorded(&mut doc)
        .unwrap();
        assert_eq!(doc.children_of(&root).unwrap(), &[b.clone(), a.clone()]);

        recorded.inverse.apply(&mut doc).unwrap();
        assert_eq!(doc.children_of(&root).unwrap(), &[a, b]);
    }
}
