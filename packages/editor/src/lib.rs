//! # Pagecraft Editor
//!
//! Core document editing engine for Pagecraft pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ blocks: registry of block types + defaults  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + mutations      │
//! │  - Arena of nodes, ordered child lists      │
//! │  - Validated, all-or-nothing mutations      │
//! │  - Undo/redo history                        │
//! │  - Nested JSON persisted form               │
//! │  - Async page storage                       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer: Document → VNode → HTML           │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The node table is the source of truth**: JSON and HTML are derived
//! 2. **Fail before writing**: a rejected mutation leaves the document as it was
//! 3. **The registry decides shape**: only canvas blocks hold children
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::{Document, Mutation, serialize, SerializeOptions};
//!
//! let mut doc = Document::new();
//! let root = doc.root_id().clone();
//!
//! let text = doc.add_node(&root, "Text", None, None)?;
//! Mutation::PatchProps { node_id: text, props }.apply(&mut doc)?;
//!
//! let page = serialize(&doc, &SerializeOptions::default());
//! ```

mod document;
mod errors;
mod id_generator;
mod mutations;
mod node;
mod serializer;
mod session;
mod storage;
mod templates;
mod undo_stack;

pub use document::{Document, MAX_DEPTH};
pub use errors::{DocumentError, EditorError};
pub use id_generator::{scope_seed, IdGenerator};
pub use mutations::{Mutation, MutationResult};
pub use node::{Node, NodeId};
pub use serializer::{deserialize, from_json, serialize, to_json, SerializeOptions, SerializedNode};
pub use session::{EditSession, SaveRequest};
pub use storage::{FilePageStore, MemoryPageStore, PageKey, PageStore, StorageError};
pub use templates::Template;
pub use undo_stack::{MutationBatch, UndoStack};

// Re-export common types for convenience
pub use pagecraft_blocks::{BlockRegistry, Props};
