//! Error types for the editor

use crate::node::NodeId;
use crate::storage::{PageKey, StorageError};
use pagecraft_blocks::BlockError;
use thiserror::Error;

/// Validation failures of tree operations and document loading.
///
/// An operation that returns one of these has left the document untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Node {0} does not accept children")]
    NotCanvas(NodeId),

    #[error("Cannot move {node_id} into itself or its descendant {target_id}")]
    CyclicMove { node_id: NodeId, target_id: NodeId },

    #[error("The root node cannot be deleted")]
    RootUndeletable,

    #[error("The root node cannot be duplicated")]
    RootImmutable,

    #[error("Nesting under {parent_id} would exceed {max} levels")]
    TooDeep { parent_id: NodeId, max: usize },

    #[error("Node id already in use: {0}")]
    DuplicateNodeId(NodeId),

    #[error("Malformed document: {0}")]
    MalformedDocument(String),
}

impl From<BlockError> for DocumentError {
    fn from(e: BlockError) -> Self {
        match e {
            BlockError::UnknownBlockType(name) => DocumentError::UnknownBlockType(name),
            BlockError::DuplicateBlockType(name) => {
                DocumentError::MalformedDocument(format!("block type registered twice: {}", name))
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Page not found: {0}")]
    PageNotFound(PageKey),
}
