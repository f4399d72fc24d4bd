//! # Edit Session Management
//!
//! An EditSession is one user's editor tab: the document being edited, its
//! undo history, the current selection, and what was last saved.
//!
//! Saving copies the document into its persisted form before anything is
//! awaited, so edits made while a save is in flight never leak into it.
//! Reloading swaps the document only once the stored page has been fully
//! deserialized.

use crate::document::Document;
use crate::errors::EditorError;
use crate::mutations::{Mutation, MutationResult};
use crate::serializer::{deserialize, serialize, SerializeOptions, SerializedNode};
use crate::storage::{PageKey, PageStore, StorageError};
use crate::templates::Template;
use crate::undo_stack::UndoStack;
use pagecraft_blocks::BlockRegistry;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Single edit session on one page
pub struct EditSession {
    /// Page being edited
    pub key: PageKey,

    document: Document,
    history: UndoStack,

    /// Current selection (node ids)
    selected_nodes: Vec<crate::NodeId>,

    /// Document version at the last successful save or load
    saved_version: Option<u64>,
}

/// Snapshot of a session taken for saving
#[derive(Debug, Clone)]
pub struct SaveRequest {
    pub key: PageKey,
    pub version: u64,
    pub page: SerializedNode,
}

impl SaveRequest {
    /// Hand the snapshot to `store`; returns the saved version
    pub async fn send<S: PageStore>(self, store: &S) -> Result<u64, StorageError> {
        store.save(&self.key, &self.page).await?;
        Ok(self.version)
    }
}

impl EditSession {
    /// Create new edit session on an unsaved document
    pub fn new(key: PageKey, document: Document) -> Self {
        Self {
            key,
            document,
            history: UndoStack::new(),
            selected_nodes: Vec::new(),
            saved_version: None,
        }
    }

    /// Start a new page from a template
    pub fn from_template(
        key: PageKey,
        template: Template,
        registry: Arc<BlockRegistry>,
    ) -> Result<Self, EditorError> {
        let document = template.build(registry, &key.to_string())?;
        Ok(Self::new(key, document))
    }

    /// Load a stored page
    #[instrument(skip(store, registry), fields(key = %key))]
    pub async fn open<S: PageStore>(
        store: &S,
        key: PageKey,
        registry: Arc<BlockRegistry>,
    ) -> Result<Self, EditorError> {
        let document = fetch(store, &key, registry).await?;
        let version = document.version();

        info!(nodes = document.len(), "Opened page");
        let mut session = Self::new(key, document);
        session.saved_version = Some(version);
        Ok(session)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    /// Apply a mutation and record it for undo
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let result = self.history.apply(&mutation, &mut self.document)?;
        debug!(target_id = %mutation.target(), version = result.version, "Applied mutation");
        self.prune_selection();
        Ok(result)
    }

    /// Group the following mutations into one undo step
    pub fn begin_batch(&mut self, description: impl Into<String>) {
        self.history.begin_batch();
        self.history.set_batch_description(description);
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }

    pub fn undo(&mut self) -> Result<bool, EditorError> {
        let undone = self.history.undo(&mut self.document)?;
        self.prune_selection();
        Ok(undone)
    }

    pub fn redo(&mut self) -> Result<bool, EditorError> {
        let redone = self.history.redo(&mut self.document)?;
        self.prune_selection();
        Ok(redone)
    }

    /// Update selection; ids not in the document are ignored
    pub fn set_selection(&mut self, node_ids: Vec<crate::NodeId>) {
        self.selected_nodes = node_ids;
        self.prune_selection();
    }

    pub fn selection(&self) -> &[crate::NodeId] {
        &self.selected_nodes
    }

    fn prune_selection(&mut self) {
        let document = &self.document;
        self.selected_nodes.retain(|id| document.contains(id));
    }

    /// Whether the document changed since the last save or load
    pub fn is_dirty(&self) -> bool {
        self.saved_version != Some(self.document.version())
    }

    /// Take a snapshot to save. The snapshot is independent of the live
    /// document.
    pub fn begin_save(&self) -> SaveRequest {
        SaveRequest {
            key: self.key.clone(),
            version: self.document.version(),
            page: serialize(&self.document, &SerializeOptions::default()),
        }
    }

    /// Record that the snapshot taken at `version` reached storage
    pub fn mark_saved(&mut self, version: u64) {
        self.saved_version = Some(version);
    }

    /// Snapshot, store, and mark saved
    pub async fn save<S: PageStore>(&mut self, store: &S) -> Result<(), EditorError> {
        let request = self.begin_save();
        let version = request.send(store).await?;
        self.mark_saved(version);
        info!(key = %self.key, version, "Saved page");
        Ok(())
    }

    /// Replace the document with the stored page.
    ///
    /// On any failure the current document, history and selection are kept.
    pub async fn reload<S: PageStore>(&mut self, store: &S) -> Result<(), EditorError> {
        let registry = self.document.registry().clone();
        let document = fetch(store, &self.key, registry).await?;

        self.saved_version = Some(document.version());
        self.document = document;
        self.history.clear();
        self.prune_selection();
        info!(key = %self.key, "Reloaded page");
        Ok(())
    }
}

async fn fetch<S: PageStore>(
    store: &S,
    key: &PageKey,
    registry: Arc<BlockRegistry>,
) -> Result<Document, EditorError> {
    let page = store
        .load(key)
        .await?
        .ok_or_else(|| EditorError::PageNotFound(key.clone()))?;
    Ok(deserialize(&page, registry)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryPageStore;
    use crate::NodeId;

    fn add_text(parent: &NodeId) -> Mutation {
        Mutation::AddNode {
            parent_id: parent.clone(),
            block_type: "Text".to_string(),
            index: None,
            props: None,
            node_id: None,
        }
    }

    #[test]
    fn test_session_creation() {
        let session = EditSession::new(PageKey::new("acme", "home"), Document::new());

        assert_eq!(session.key.to_string(), "acme/home");
        assert!(session.selection().is_empty());
        assert!(session.is_dirty());
        assert!(!session.history().can_undo());
    }

    #[test]
    fn test_apply_and_undo() {
        let mut session = EditSession::new(PageKey::new("acme", "home"), Document::new());
        let root = session.document().root_id().clone();

        let result = session.apply(add_text(&root)).unwrap();
        let text = result.node_id.unwrap();
        assert!(session.document().contains(&text));

        assert!(session.undo().unwrap());
        assert!(!session.document().contains(&text));

        assert!(session.redo().unwrap());
        assert!(session.document().contains(&text));
    }

    #[test]
    fn test_failed_mutation_is_not_recorded() {
        let mut session = EditSession::new(PageKey::new("acme", "home"), Document::new());

        let result = session.apply(add_text(&NodeId::from("missing")));
        assert!(result.is_err());
        assert!(!session.history().can_undo());
        assert_eq!(session.document().version(), 0);
    }

    #[test]
    fn test_undo_while_batch_is_open() {
        let mut session = EditSession::new(PageKey::new("acme", "home"), Document::new());
        let root = session.document().root_id().clone();
        let text = session.apply(add_text(&root)).unwrap().node_id.unwrap();

        session.begin_batch("Restyle");
        session
            .apply(Mutation::PatchProps {
                node_id: text.clone(),
                props: serde_json::json!({ "color": "#f00" }).as_object().cloned().unwrap(),
            })
            .unwrap();
        assert!(session.undo().unwrap());
        session.end_batch();

        assert!(session.document().contains(&text));
        assert!(session.undo().unwrap());
        assert!(!session.document().contains(&text));
        assert!(!session.history().can_undo());
    }

    #[test]
    fn test_selection_drops_deleted_nodes() {
        let mut session = EditSession::new(PageKey::new("acme", "home"), Document::new());
        let root = session.document().root_id().clone();
        let text = session.apply(add_text(&root)).unwrap().node_id.unwrap();

        session.set_selection(vec![text.clone(), NodeId::from("ghost")]);
        assert_eq!(session.selection(), &[text.clone()]);

        session
            .apply(Mutation::DeleteNode { node_id: text })
            .unwrap();
        assert!(session.selection().is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_is_isolated_from_later_edits() {
        let store = MemoryPageStore::new();
        let mut session = EditSession::new(PageKey::new("acme", "home"), Document::new());
        let root = session.document().root_id().clone();
        session.apply(add_text(&root)).unwrap();

        let request = session.begin_save();
        // Edit while the save is "in flight"
        session.apply(add_text(&root)).unwrap();
        let saved = request.send(&store).await.unwrap();
        session.mark_saved(saved);

        let stored = store.load(&session.key).await.unwrap().unwrap();
        assert_eq!(stored.count(), 2);
        assert!(session.is_dirty());
    }

    #[tokio::test]
    async fn test_open_missing_page() {
        let store = MemoryPageStore::new();
        let result = EditSession::open(&store, PageKey::new("acme", "nope"), BlockRegistry::builtin()).await;

        assert!(matches!(result, Err(EditorError::PageNotFound(_))));
    }
}
