//! # Persisted form
//!
//! Documents are stored as one nested JSON object per node:
//!
//! ```json
//! {
//!   "id": "3f2a-1",
//!   "blockType": "Container",
//!   "props": { "padding": 20 },
//!   "children": [
//!     { "id": "3f2a-2", "blockType": "Text", "props": { "text": "Hello" } }
//!   ]
//! }
//! ```
//!
//! `children` appears on canvas blocks only. `id` is optional: the public page
//! route does not need it, the editor keeps it so node ids survive a reload.

use crate::document::Document;
use crate::errors::DocumentError;
use crate::id_generator::IdGenerator;
use crate::node::{Node, NodeId};
use pagecraft_blocks::{BlockRegistry, Props};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};

/// One node of the persisted tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub block_type: String,

    #[serde(default)]
    pub props: Props,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<SerializedNode>>,
}

impl SerializedNode {
    pub fn new(block_type: impl Into<String>, props: Props) -> Self {
        Self {
            id: None,
            block_type: block_type.into(),
            props,
            children: None,
        }
    }

    pub fn with_children(mut self, children: Vec<SerializedNode>) -> Self {
        self.children = Some(children);
        self
    }

    fn children(&self) -> &[SerializedNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Number of nodes in this subtree
    pub fn count(&self) -> usize {
        1 + self.children().iter().map(SerializedNode::count).sum::<usize>()
    }
}

#[derive(Debug, Clone)]
pub struct SerializeOptions {
    /// Emit node ids
    pub include_ids: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self { include_ids: true }
    }
}

/// Convert a document into its nested persisted form
pub fn serialize(doc: &Document, options: &SerializeOptions) -> SerializedNode {
    serialize_node(doc, doc.root_id(), options)
}

fn serialize_node(doc: &Document, id: &NodeId, options: &SerializeOptions) -> SerializedNode {
    let node = doc
        .get(id)
        .expect("every child id of a valid document resolves to a node");

    let children = if doc.registry().is_canvas(&node.block_type) || !node.children.is_empty() {
        Some(
            node.children
                .iter()
                .map(|child| serialize_node(doc, child, options))
                .collect(),
        )
    } else {
        None
    };

    SerializedNode {
        id: options.include_ids.then(|| node.id.to_string()),
        block_type: node.block_type.clone(),
        props: node.props.clone(),
        children,
    }
}

/// Rebuild a document from its persisted form.
///
/// Ids are reused only when every node carries one and no two collide;
/// otherwise all nodes get fresh ids.
#[instrument(skip(serialized, registry), fields(nodes = serialized.count()))]
pub fn deserialize(
    serialized: &SerializedNode,
    registry: Arc<BlockRegistry>,
) -> Result<Document, DocumentError> {
    let mut seen = HashSet::new();
    let mut keep_ids = true;
    check_node(serialized, &registry, &mut seen, &mut keep_ids)?;
    debug!(keep_ids, "Validated persisted tree");

    let mut ids = IdGenerator::new("document");
    let mut nodes = Vec::with_capacity(serialized.count());
    let root = build_node(serialized, None, keep_ids, &seen, &mut ids, &mut nodes);

    let mut doc = Document::from_parts(registry, root, nodes)?;
    doc.set_id_generator(ids);
    Ok(doc)
}

fn check_node<'a>(
    node: &'a SerializedNode,
    registry: &BlockRegistry,
    seen: &mut HashSet<&'a str>,
    keep_ids: &mut bool,
) -> Result<(), DocumentError> {
    let block = registry.lookup(&node.block_type)?;
    if !block.is_canvas && !node.children().is_empty() {
        return Err(DocumentError::MalformedDocument(format!(
            "{} block cannot contain children",
            node.block_type
        )));
    }

    match &node.id {
        Some(id) if seen.insert(id.as_str()) => {}
        _ => *keep_ids = false,
    }

    for child in node.children() {
        check_node(child, registry, seen, keep_ids)?;
    }
    Ok(())
}

fn build_node(
    serialized: &SerializedNode,
    parent: Option<NodeId>,
    keep_ids: bool,
    persisted: &HashSet<&str>,
    ids: &mut IdGenerator,
    out: &mut Vec<Node>,
) -> NodeId {
    let id = match (&serialized.id, keep_ids) {
        (Some(id), true) => NodeId::new(id.clone()),
        _ => fresh_id(ids, persisted, keep_ids),
    };

    let slot = out.len();
    out.push(Node {
        id: id.clone(),
        block_type: serialized.block_type.clone(),
        props: serialized.props.clone(),
        parent,
        children: Vec::new(),
    });

    let children: Vec<NodeId> = serialized
        .children()
        .iter()
        .map(|child| build_node(child, Some(id.clone()), keep_ids, persisted, ids, out))
        .collect();
    out[slot].children = children;

    id
}

fn fresh_id(ids: &mut IdGenerator, persisted: &HashSet<&str>, keep_ids: bool) -> NodeId {
    loop {
        let id = ids.next_id();
        if !keep_ids || !persisted.contains(id.as_str()) {
            return NodeId::new(id);
        }
    }
}

pub fn to_json(doc: &Document, options: &SerializeOptions) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serialize(doc, options))
}

pub fn from_json(json: &str, registry: Arc<BlockRegistry>) -> Result<Document, DocumentError> {
    let serialized: SerializedNode = serde_json::from_str(json)
        .map_err(|e| DocumentError::MalformedDocument(e.to_string()))?;
    deserialize(&serialized, registry)
}
