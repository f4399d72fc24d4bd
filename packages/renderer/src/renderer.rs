//! Document → VNode.
//!
//! Rendering never touches the document. Children are always emitted in the
//! order the document stores them.

use crate::views::{generic_view, ViewRegistry};
use crate::vdom::VNode;
use pagecraft_blocks::BlockRegistry;
use pagecraft_editor::{Document, NodeId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{instrument, warn};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// A child reference with no node behind it. Documents built through the
    /// mutation API never get here.
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    /// Add `data-node-id` / `data-block` to every block's element, so the
    /// editor canvas can map clicks back to nodes
    #[serde(default)]
    pub annotate: bool,
}

/// A node that rendered as a placeholder because its block type is unknown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderSlot {
    pub node_id: NodeId,
    pub block_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    pub root: VNode,
    pub placeholders: Vec<PlaceholderSlot>,
}

pub struct Renderer {
    registry: Arc<BlockRegistry>,
    views: ViewRegistry,
    options: RenderOptions,
}

impl Renderer {
    pub fn new(registry: Arc<BlockRegistry>) -> Self {
        Self {
            registry,
            views: ViewRegistry::new(),
            options: RenderOptions::default(),
        }
    }

    pub fn with_views(mut self, views: ViewRegistry) -> Self {
        self.views = views;
        self
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &Arc<BlockRegistry> {
        &self.registry
    }

    /// Render the whole document, starting at its root
    pub fn render(&self, doc: &Document) -> Result<RenderOutput, RenderError> {
        self.render_from(doc, doc.root_id())
    }

    /// Render the subtree under `id` (block previews in the toolbox and
    /// settings panel)
    #[instrument(skip_all, fields(nodes = doc.len(), from = %id))]
    pub fn render_from(&self, doc: &Document, id: &NodeId) -> Result<RenderOutput, RenderError> {
        let mut placeholders = Vec::new();
        let root = self.render_node(doc, id, &mut placeholders)?;

        if !placeholders.is_empty() {
            warn!(count = placeholders.len(), "Rendered with placeholders");
        }
        Ok(RenderOutput { root, placeholders })
    }

    fn render_node(
        &self,
        doc: &Document,
        id: &NodeId,
        placeholders: &mut Vec<PlaceholderSlot>,
    ) -> Result<VNode, RenderError> {
        let node = doc
            .get(id)
            .ok_or_else(|| RenderError::NodeNotFound(id.clone()))?;

        let Ok(block) = self.registry.lookup(&node.block_type) else {
            warn!(node_id = %id, block_type = %node.block_type, "Unknown block type, rendering placeholder");
            placeholders.push(PlaceholderSlot {
                node_id: id.clone(),
                block_type: node.block_type.clone(),
            });
            return Ok(VNode::placeholder(node.block_type.as_str(), id.as_str()));
        };

        let mut children = Vec::with_capacity(node.children.len());
        if block.is_canvas {
            for child_id in &node.children {
                children.push(self.render_node(doc, child_id, placeholders)?);
            }
        }

        let element = match self.views.get(&node.block_type) {
            Some(view) => view.render(&node.props, children),
            None => generic_view(&node.block_type, children),
        };

        Ok(if self.options.annotate {
            element
                .with_attr("data-node-id", id.as_str())
                .with_attr("data-block", node.block_type.as_str())
        } else {
            element
        })
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("registry", &self.registry)
            .field("views", &self.views)
            .field("options", &self.options)
            .finish()
    }
}
