//! # Document Tree
//!
//! The page builder's document: an id-indexed table of nodes plus one ordered
//! child list per node.
//!
//! ## Invariants
//!
//! - Walking `children` from the root visits every node exactly once
//! - A node's `parent` lists it exactly once among its `children`, and back
//! - Only canvas block types have children
//! - The root has no parent and is never deleted or re-parented
//! - No node is nested more than [`MAX_DEPTH`] levels below the root
//!
//! Every mutating method validates before it writes anything. An `Err` means
//! the document is exactly as it was.
//!
//! ## Lifecycle
//!
//! ```text
//! new / template / deserialize → add · move · delete · patch → serialize
//! ```

use crate::errors::DocumentError;
use crate::id_generator::IdGenerator;
use crate::node::{Node, NodeId};
use pagecraft_blocks::{merge_props, BlockRegistry, Props, ROOT_BLOCK};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

const DEFAULT_ID_SCOPE: &str = "document";

/// Deepest allowed node, counted in ancestors (the root is at depth 0).
///
/// Each level costs two levels of JSON nesting in the persisted form, and
/// props carry their own nesting on top. This keeps every document well
/// inside what `serde_json` will read back.
pub const MAX_DEPTH: usize = 32;

/// Editable page document
#[derive(Debug, Clone)]
pub struct Document {
    root: NodeId,
    nodes: HashMap<NodeId, Node>,

    version: u64,

    ids: IdGenerator,
    registry: Arc<BlockRegistry>,
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root && self.nodes == other.nodes && self.version == other.version
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding a single root Container (built-in registry)
    pub fn new() -> Self {
        Self::with_registry(BlockRegistry::builtin())
    }

    pub fn with_registry(registry: Arc<BlockRegistry>) -> Self {
        Self::create(registry, DEFAULT_ID_SCOPE)
    }

    /// Create an empty document whose generated ids are seeded from `id_scope`
    /// (usually "site/page")
    pub fn create(registry: Arc<BlockRegistry>, id_scope: &str) -> Self {
        let mut ids = IdGenerator::new(id_scope);
        let root = NodeId::new(ids.next_id());
        let props = registry
            .lookup(ROOT_BLOCK)
            .map(|block| block.defaults.clone())
            .unwrap_or_default();

        let mut nodes = HashMap::new();
        nodes.insert(root.clone(), Node::new(root.clone(), ROOT_BLOCK, props, None));

        Self {
            root,
            nodes,
            version: 0,
            ids,
            registry,
        }
    }

    /// Build a document from a flat node table, checking every invariant
    pub fn from_parts(
        registry: Arc<BlockRegistry>,
        root: NodeId,
        nodes: impl IntoIterator<Item = Node>,
    ) -> Result<Self, DocumentError> {
        let mut table = HashMap::new();
        for node in nodes {
            if table.contains_key(&node.id) {
                return Err(DocumentError::DuplicateNodeId(node.id));
            }
            table.insert(node.id.clone(), node);
        }

        let doc = Self {
            root,
            nodes: table,
            version: 0,
            ids: IdGenerator::new(DEFAULT_ID_SCOPE),
            registry,
        };
        doc.validate()?;
        Ok(doc)
    }

    /// Current version number (increments on each successful mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Mark the current state as the starting point (version 0)
    pub(crate) fn reset_version(&mut self) {
        self.version = 0;
    }

    pub fn root_id(&self) -> &NodeId {
        &self.root
    }

    pub fn registry(&self) -> &Arc<BlockRegistry> {
        &self.registry
    }

    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Like [`Document::get`], but a missing node is an error
    pub fn node(&self, id: &NodeId) -> Result<&Node, DocumentError> {
        self.nodes
            .get(id)
            .ok_or_else(|| DocumentError::NodeNotFound(id.clone()))
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn children_of(&self, id: &NodeId) -> Result<&[NodeId], DocumentError> {
        Ok(&self.node(id)?.children)
    }

    pub fn parent_of(&self, id: &NodeId) -> Result<Option<&NodeId>, DocumentError> {
        Ok(self.node(id)?.parent.as_ref())
    }

    pub fn is_canvas(&self, id: &NodeId) -> Result<bool, DocumentError> {
        Ok(self.registry.is_canvas(&self.node(id)?.block_type))
    }

    /// Parent and index of `id` within the parent's children (`None` for the root)
    pub fn position_of(&self, id: &NodeId) -> Result<Option<(NodeId, usize)>, DocumentError> {
        let node = self.node(id)?;
        let Some(parent_id) = &node.parent else {
            return Ok(None);
        };
        let index = self
            .node(parent_id)?
            .children
            .iter()
            .position(|c| c == id)
            .ok_or_else(|| {
                DocumentError::MalformedDocument(format!("{} is missing from its parent", id))
            })?;
        Ok(Some((parent_id.clone(), index)))
    }

    /// Ancestors of `id`, nearest first
    pub fn ancestors(&self, id: &NodeId) -> Result<Vec<NodeId>, DocumentError> {
        let mut ancestors = Vec::new();
        let mut current = self.node(id)?.parent.clone();
        while let Some(parent_id) = current {
            current = self.node(&parent_id)?.parent.clone();
            ancestors.push(parent_id);
        }
        Ok(ancestors)
    }

    /// Whether `candidate` lies strictly below `ancestor`
    pub fn is_descendant(&self, candidate: &NodeId, ancestor: &NodeId) -> bool {
        let mut current = self.nodes.get(candidate).and_then(|n| n.parent.as_ref());
        while let Some(parent_id) = current {
            if parent_id == ancestor {
                return true;
            }
            current = self.nodes.get(parent_id).and_then(|n| n.parent.as_ref());
        }
        false
    }

    /// Every node below `id`, in pre-order
    pub fn descendants(&self, id: &NodeId) -> Result<Vec<NodeId>, DocumentError> {
        let mut subtree = self.subtree(id)?;
        subtree.remove(0);
        Ok(subtree)
    }

    /// All nodes in pre-order, starting at the root
    pub fn iter(&self) -> impl Iterator<Item = &Node> + '_ {
        self.subtree(&self.root)
            .expect("every child id of a valid document resolves to a node")
            .into_iter()
            .map(move |id| &self.nodes[&id])
    }

    /// `id` followed by its descendants, in pre-order
    fn subtree(&self, id: &NodeId) -> Result<Vec<NodeId>, DocumentError> {
        let mut order = Vec::new();
        let mut stack = vec![id.clone()];
        while let Some(current) = stack.pop() {
            let node = self.node(&current)?;
            stack.extend(node.children.iter().rev().cloned());
            order.push(current);
        }
        Ok(order)
    }

    /// Check every structural invariant
    pub fn validate(&self) -> Result<(), DocumentError> {
        let root = self.nodes.get(&self.root).ok_or_else(|| {
            DocumentError::MalformedDocument(format!("root {} is not in the node table", self.root))
        })?;
        if root.parent.is_some() {
            return Err(DocumentError::MalformedDocument("root has a parent".to_string()));
        }

        let mut visited = HashSet::new();
        let mut stack = vec![(&self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            if !visited.insert(id) {
                return Err(DocumentError::MalformedDocument(format!(
                    "{} is reachable more than once",
                    id
                )));
            }
            let node = self.nodes.get(id).ok_or_else(|| {
                DocumentError::MalformedDocument(format!("dangling child reference {}", id))
            })?;
            if &node.id != id {
                return Err(DocumentError::MalformedDocument(format!(
                    "node stored under {} claims id {}",
                    id, node.id
                )));
            }
            let block = self.registry.lookup(&node.block_type)?;
            if !block.is_canvas && !node.children.is_empty() {
                return Err(DocumentError::MalformedDocument(format!(
                    "{} block {} has children",
                    node.block_type, id
                )));
            }
            if depth == MAX_DEPTH && !node.children.is_empty() {
                return Err(DocumentError::TooDeep {
                    parent_id: id.clone(),
                    max: MAX_DEPTH,
                });
            }
            for child_id in &node.children {
                let child = self.nodes.get(child_id).ok_or_else(|| {
                    DocumentError::MalformedDocument(format!("dangling child reference {}", child_id))
                })?;
                if child.parent.as_ref() != Some(id) {
                    return Err(DocumentError::MalformedDocument(format!(
                        "{} is listed under {} but points to another parent",
                        child_id, id
                    )));
                }
                stack.push((child_id, depth + 1));
            }
        }

        if visited.len() != self.nodes.len() {
            return Err(DocumentError::MalformedDocument(format!(
                "{} node(s) unreachable from the root",
                self.nodes.len() - visited.len()
            )));
        }

        Ok(())
    }

    // --- mutations ---------------------------------------------------------

    /// Add a `block_type` node under `parent_id` at `index` (default: end).
    ///
    /// Props are the block's defaults with `props` merged over them.
    pub fn add_node(
        &mut self,
        parent_id: &NodeId,
        block_type: &str,
        index: Option<usize>,
        props: Option<Props>,
    ) -> Result<NodeId, DocumentError> {
        self.insert_node(parent_id, block_type, index, props.as_ref(), None)
    }

    pub(crate) fn check_add(&self, parent_id: &NodeId, block_type: &str) -> Result<&Props, DocumentError> {
        let parent = self.node(parent_id)?;
        let block = self.registry.lookup(block_type)?;
        if !self.registry.is_canvas(&parent.block_type) {
            return Err(DocumentError::NotCanvas(parent_id.clone()));
        }
        self.check_depth(parent_id, 0)?;
        Ok(&block.defaults)
    }

    pub(crate) fn insert_node(
        &mut self,
        parent_id: &NodeId,
        block_type: &str,
        index: Option<usize>,
        overrides: Option<&Props>,
        id: Option<NodeId>,
    ) -> Result<NodeId, DocumentError> {
        let defaults = self.check_add(parent_id, block_type)?;
        let props = match overrides {
            Some(overrides) => merge_props(defaults, overrides),
            None => defaults.clone(),
        };

        let id = match id {
            Some(id) if self.nodes.contains_key(&id) => {
                return Err(DocumentError::DuplicateNodeId(id));
            }
            Some(id) => id,
            None => self.fresh_id(),
        };

        if let Some(parent) = self.nodes.get_mut(parent_id) {
            let at = clamp_index(index, parent.children.len());
            parent.children.insert(at, id.clone());
        }
        self.nodes.insert(
            id.clone(),
            Node::new(id.clone(), block_type, props, Some(parent_id.clone())),
        );
        self.version += 1;

        debug!(node_id = %id, parent_id = %parent_id, block_type, "Added node");
        Ok(id)
    }

    pub(crate) fn check_move(&self, node_id: &NodeId, new_parent_id: &NodeId) -> Result<(), DocumentError> {
        self.node(node_id)?;
        let target = self.node(new_parent_id)?;

        if node_id == new_parent_id || self.is_descendant(new_parent_id, node_id) {
            return Err(DocumentError::CyclicMove {
                node_id: node_id.clone(),
                target_id: new_parent_id.clone(),
            });
        }
        if !self.registry.is_canvas(&target.block_type) {
            return Err(DocumentError::NotCanvas(new_parent_id.clone()));
        }
        self.check_depth(new_parent_id, self.height(node_id)?)
    }

    /// Move `node_id` under `new_parent_id` at `index` (default: end).
    ///
    /// `index` addresses the destination's children after the node has been
    /// taken out of its old place. The root can never move: every node is the
    /// root or one of its descendants.
    pub fn move_node(
        &mut self,
        node_id: &NodeId,
        new_parent_id: &NodeId,
        index: Option<usize>,
    ) -> Result<(), DocumentError> {
        self.check_move(node_id, new_parent_id)?;

        let old_parent_id = self.node(node_id)?.parent.clone();
        if let Some(old_parent) = old_parent_id.as_ref().and_then(|p| self.nodes.get_mut(p)) {
            old_parent.children.retain(|c| c != node_id);
        }
        if let Some(new_parent) = self.nodes.get_mut(new_parent_id) {
            let at = clamp_index(index, new_parent.children.len());
            new_parent.children.insert(at, node_id.clone());
        }
        if let Some(node) = self.nodes.get_mut(node_id) {
            node.parent = Some(new_parent_id.clone());
        }
        self.version += 1;

        debug!(node_id = %node_id, new_parent_id = %new_parent_id, "Moved node");
        Ok(())
    }

    pub(crate) fn check_delete(&self, node_id: &NodeId) -> Result<(), DocumentError> {
        self.node(node_id)?;
        if node_id == &self.root {
            return Err(DocumentError::RootUndeletable);
        }
        Ok(())
    }

    /// Delete `node_id` and its whole subtree. Returns the removed nodes in
    /// pre-order (the deleted node first).
    pub fn delete_node(&mut self, node_id: &NodeId) -> Result<Vec<Node>, DocumentError> {
        self.check_delete(node_id)?;

        let subtree = self.subtree(node_id)?;
        let parent_id = self.node(node_id)?.parent.clone();
        if let Some(parent) = parent_id.as_ref().and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|c| c != node_id);
        }

        let removed: Vec<Node> = subtree
            .iter()
            .filter_map(|id| self.nodes.remove(id))
            .collect();
        self.version += 1;

        debug!(node_id = %node_id, removed = removed.len(), "Deleted node");
        Ok(removed)
    }

    /// Shallow-merge `props` into the node's props
    pub fn patch_props(&mut self, node_id: &NodeId, props: Props) -> Result<(), DocumentError> {
        let node = self
            .nodes
            .get_mut(node_id)
            .ok_or_else(|| DocumentError::NodeNotFound(node_id.clone()))?;
        for (key, value) in props {
            node.props.insert(key, value);
        }
        self.version += 1;

        debug!(node_id = %node_id, "Patched props");
        Ok(())
    }

    /// Replace the node's props wholesale, returning the previous ones
    pub fn replace_props(&mut self, node_id: &NodeId, props: Props) -> Result<Props, DocumentError> {
        let node = self
            .nodes
            .get_mut(node_id)
            .ok_or_else(|| DocumentError::NodeNotFound(node_id.clone()))?;
        let previous = std::mem::replace(&mut node.props, props);
        self.version += 1;

        debug!(node_id = %node_id, "Replaced props");
        Ok(previous)
    }

    pub(crate) fn check_duplicate(&self, node_id: &NodeId) -> Result<(), DocumentError> {
        self.node(node_id)?;
        if node_id == &self.root {
            return Err(DocumentError::RootImmutable);
        }
        Ok(())
    }

    /// Deep-copy `node_id` with fresh ids, placing the copy right after it
    pub fn duplicate_node(&mut self, node_id: &NodeId) -> Result<NodeId, DocumentError> {
        self.check_duplicate(node_id)?;
        let Some((parent_id, index)) = self.position_of(node_id)? else {
            return Err(DocumentError::RootImmutable);
        };

        let subtree = self.subtree(node_id)?;
        let mut renamed = HashMap::new();
        for id in &subtree {
            let fresh = self.fresh_id_excluding(&renamed);
            renamed.insert(id.clone(), fresh);
        }

        let mut copies = Vec::with_capacity(subtree.len());
        for id in &subtree {
            let original = self.node(id)?;
            let parent = match &original.parent {
                Some(p) if id != node_id => renamed.get(p).cloned(),
                _ => Some(parent_id.clone()),
            };
            copies.push(Node {
                id: renamed[id].clone(),
                block_type: original.block_type.clone(),
                props: original.props.clone(),
                parent,
                children: original.children.iter().map(|c| renamed[c].clone()).collect(),
            });
        }

        let copy_id = renamed[node_id].clone();
        for copy in copies {
            self.nodes.insert(copy.id.clone(), copy);
        }
        if let Some(parent) = self.nodes.get_mut(&parent_id) {
            parent.children.insert(index + 1, copy_id.clone());
        }
        self.version += 1;

        debug!(node_id = %node_id, copy_id = %copy_id, "Duplicated node");
        Ok(copy_id)
    }

    /// Re-insert a previously removed subtree, keeping its ids.
    ///
    /// `nodes` is in the shape [`Document::delete_node`] returns: the subtree
    /// root first, the remaining nodes in any order.
    pub fn restore_subtree(
        &mut self,
        parent_id: &NodeId,
        index: Option<usize>,
        nodes: Vec<Node>,
    ) -> Result<NodeId, DocumentError> {
        let subtree_root = self.check_restore(parent_id, &nodes)?;

        for mut node in nodes {
            if node.id == subtree_root {
                node.parent = Some(parent_id.clone());
            }
            self.nodes.insert(node.id.clone(), node);
        }
        if let Some(parent) = self.nodes.get_mut(parent_id) {
            let at = clamp_index(index, parent.children.len());
            parent.children.insert(at, subtree_root.clone());
        }
        self.version += 1;

        debug!(node_id = %subtree_root, parent_id = %parent_id, "Restored subtree");
        Ok(subtree_root)
    }

    pub(crate) fn check_restore(&self, parent_id: &NodeId, nodes: &[Node]) -> Result<NodeId, DocumentError> {
        let parent = self.node(parent_id)?;
        if !self.registry.is_canvas(&parent.block_type) {
            return Err(DocumentError::NotCanvas(parent_id.clone()));
        }
        let Some(first) = nodes.first() else {
            return Err(DocumentError::MalformedDocument("empty subtree".to_string()));
        };

        let mut table: HashMap<&NodeId, &Node> = HashMap::new();
        for node in nodes {
            if self.nodes.contains_key(&node.id) || table.insert(&node.id, node).is_some() {
                return Err(DocumentError::DuplicateNodeId(node.id.clone()));
            }
        }

        let mut seen = HashSet::new();
        let mut height = 0usize;
        let mut stack = vec![(&first.id, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            if !seen.insert(id) {
                return Err(DocumentError::MalformedDocument(format!("{} appears twice", id)));
            }
            height = height.max(depth);
            let node = table.get(id).ok_or_else(|| {
                DocumentError::MalformedDocument(format!("dangling child reference {}", id))
            })?;
            let block = self.registry.lookup(&node.block_type)?;
            if !block.is_canvas && !node.children.is_empty() {
                return Err(DocumentError::MalformedDocument(format!(
                    "{} block {} has children",
                    node.block_type, id
                )));
            }
            for child_id in &node.children {
                let parent_ok = table
                    .get(child_id)
                    .is_some_and(|child| child.parent.as_ref() == Some(id));
                if !parent_ok {
                    return Err(DocumentError::MalformedDocument(format!(
                        "{} does not point back to {}",
                        child_id, id
                    )));
                }
                stack.push((child_id, depth + 1));
            }
        }
        if seen.len() != nodes.len() {
            return Err(DocumentError::MalformedDocument(
                "subtree contains unreachable nodes".to_string(),
            ));
        }
        self.check_depth(parent_id, height)?;

        Ok(first.id.clone())
    }

    /// Fail if a subtree `height` levels tall cannot hang below `parent_id`
    fn check_depth(&self, parent_id: &NodeId, height: usize) -> Result<(), DocumentError> {
        let depth = self.ancestors(parent_id)?.len() + 1;
        if depth + height > MAX_DEPTH {
            return Err(DocumentError::TooDeep {
                parent_id: parent_id.clone(),
                max: MAX_DEPTH,
            });
        }
        Ok(())
    }

    /// Levels below `id` (0 for a node without children)
    fn height(&self, id: &NodeId) -> Result<usize, DocumentError> {
        let mut height = 0usize;
        let mut stack = vec![(id, 0usize)];
        while let Some((current, depth)) = stack.pop() {
            height = height.max(depth);
            for child in &self.node(current)?.children {
                stack.push((child, depth + 1));
            }
        }
        Ok(height)
    }

    fn fresh_id(&mut self) -> NodeId {
        self.fresh_id_excluding(&HashMap::new())
    }

    fn fresh_id_excluding(&mut self, reserved: &HashMap<NodeId, NodeId>) -> NodeId {
        loop {
            let id = NodeId::new(self.ids.next_id());
            if !self.nodes.contains_key(&id) && !reserved.values().any(|r| r == &id) {
                return id;
            }
        }
    }

    /// Reseed id generation (new ids look like `<seed>-<n>`)
    pub(crate) fn set_id_generator(&mut self, ids: IdGenerator) {
        self.ids = ids;
    }
}

/// Insertion point for `index` in a list of `len` items; past-the-end means append
fn clamp_index(index: Option<usize>, len: usize) -> usize {
    index.map_or(len, |i| i.min(len))
}
