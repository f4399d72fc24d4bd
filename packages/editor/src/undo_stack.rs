//! # Undo/Redo Stack
//!
//! Tracks mutation history and enables undo/redo operations.
//!
//! ## Design
//!
//! - Each mutation is recorded together with its inverse as it is applied
//! - Undo applies the inverse and moves the entry to the redo stack
//! - Redo replays the recorded mutation, with the same node ids as the first time
//! - New mutations clear the redo stack
//! - Batches group several mutations into one undo step (a drag that
//!   re-parents and restyles, a template section insert)
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//! let mut doc = Document::new();
//!
//! stack.apply(&Mutation::AddNode { .. }, &mut doc)?;
//! stack.undo(&mut doc)?;
//! stack.redo(&mut doc)?;
//! ```

use crate::document::Document;
use crate::errors::DocumentError;
use crate::mutations::{Mutation, MutationResult};

/// A group of mutations that should be undone/redone together
#[derive(Debug, Clone)]
pub struct MutationBatch {
    /// The mutations in this batch (in application order)
    pub mutations: Vec<Mutation>,

    /// The inverse mutations (in reverse order for undo)
    pub inverses: Vec<Mutation>,

    /// Optional description of this batch
    pub description: Option<String>,
}

impl MutationBatch {
    fn empty() -> Self {
        Self {
            mutations: Vec::new(),
            inverses: Vec::new(),
            description: None,
        }
    }

    /// Create a single-mutation batch
    pub fn single(mutation: Mutation, inverse: Mutation) -> Self {
        Self {
            mutations: vec![mutation],
            inverses: vec![inverse],
            description: None,
        }
    }

    /// Add a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Undo/redo stack for document editing
#[derive(Debug)]
pub struct UndoStack {
    /// Stack of applied mutations (most recent last)
    undo_stack: Vec<MutationBatch>,

    /// Stack of undone mutations (most recent last)
    redo_stack: Vec<MutationBatch>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Currently building a batch
    current_batch: Option<MutationBatch>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    /// Create an undo stack with custom max levels
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Apply a mutation and record it for undo. A rejected mutation leaves
    /// both the document and the history untouched.
    pub fn apply(&mut self, mutation: &Mutation, doc: &mut Document) -> Result<MutationResult, DocumentError> {
        let recorded = mutation.apply_recorded(doc)?;

        if let Some(batch) = &mut self.current_batch {
            batch.mutations.push(recorded.redo);
            batch.inverses.insert(0, recorded.inverse);
        } else {
            self.push_batch(MutationBatch::single(recorded.redo, recorded.inverse));
        }

        Ok(recorded.result)
    }

    /// Start a batch of mutations (will be undone/redone together)
    pub fn begin_batch(&mut self) {
        self.current_batch = Some(MutationBatch::empty());
    }

    /// End the current batch and push to undo stack
    pub fn end_batch(&mut self) {
        if let Some(batch) = self.current_batch.take() {
            if !batch.mutations.is_empty() {
                self.push_batch(batch);
            }
        }
    }

    /// Set description for current batch (if batching)
    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(batch) = &mut self.current_batch {
            batch.description = Some(description.into());
        }
    }

    fn push_batch(&mut self, batch: MutationBatch) {
        self.undo_stack.push(batch);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // New action invalidates the redo future
        self.redo_stack.clear();
    }

    /// Undo the most recent mutation/batch.
    ///
    /// An open batch is closed first, so it is the step that gets undone.
    pub fn undo(&mut self, doc: &mut Document) -> Result<bool, DocumentError> {
        self.end_batch();
        let Some(batch) = self.undo_stack.pop() else {
            return Ok(false);
        };

        if let Err(e) = apply_all(&batch.inverses, doc) {
            self.undo_stack.push(batch);
            return Err(e);
        }
        self.redo_stack.push(batch);
        Ok(true)
    }

    /// Redo the most recently undone mutation/batch.
    ///
    /// A non-empty open batch is closed first, which clears the redo future.
    pub fn redo(&mut self, doc: &mut Document) -> Result<bool, DocumentError> {
        self.end_batch();
        let Some(batch) = self.redo_stack.pop() else {
            return Ok(false);
        };

        if let Err(e) = apply_all(&batch.mutations, doc) {
            self.redo_stack.push(batch);
            return Err(e);
        }
        self.undo_stack.push(batch);
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|batch| batch.description.as_deref())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|batch| batch.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply `mutations` in order, all or nothing
fn apply_all(mutations: &[Mutation], doc: &mut Document) -> Result<(), DocumentError> {
    let mut scratch = doc.clone();
    for mutation in mutations {
        mutation.apply(&mut scratch)?;
    }
    *doc = scratch;
    Ok(())
}
