//! In-memory document buffer with linear undo/redo history
//!
//! All positions are character indices, matching what the text widget
//! reports. Every content change bumps a revision counter; the session
//! compares revisions to decide whether the document is dirty.

use std::ops::Range;

use crate::core::error::EditorError;

/// A single recorded edit: at `at`, `removed` was replaced by `inserted`.
///
/// Inserts and deletes are splices with one empty side, which keeps the
/// undo/redo stacks to a single operation kind.
#[derive(Debug, Clone)]
struct Splice {
    at: usize,
    removed: String,
    inserted: String,
}

impl Splice {
    fn inverted(&self) -> Splice {
        Splice {
            at: self.at,
            removed: self.inserted.clone(),
            inserted: self.removed.clone(),
        }
    }
}

/// The document content plus its edit history.
#[derive(Debug, Default)]
pub struct TextBuffer {
    content: String,
    undo_stack: Vec<Splice>,
    redo_stack: Vec<Splice>,
    revision: u64,
}

impl TextBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// A read-only copy of the content, for save/export/playback.
    pub fn snapshot(&self) -> String {
        self.content.clone()
    }

    /// Content length in characters.
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    /// Monotonic counter bumped on every content change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the entire content and discard all history.
    ///
    /// Used by New and Open: reopening a document must not let undo
    /// resurrect the previous document's content.
    pub fn replace_all(&mut self, text: impl Into<String>) {
        self.content = text.into();
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.revision += 1;
    }

    /// Insert `text` at character index `at` (clamped to the end).
    pub fn insert(&mut self, at: usize, text: &str) {
        self.replace(at..at, text);
    }

    /// Insert `text` at the end of the buffer.
    pub fn append(&mut self, text: &str) {
        self.insert(self.char_len(), text);
    }

    /// Delete the characters in `range` (clamped to the content).
    pub fn delete(&mut self, range: Range<usize>) {
        self.replace(range, "");
    }

    /// Replace the characters in `range` with `text` as one undoable edit.
    pub fn replace(&mut self, range: Range<usize>, text: &str) {
        let len = self.char_len();
        let start = range.start.min(range.end).min(len);
        let end = range.end.max(range.start).min(len);
        if start == end && text.is_empty() {
            return;
        }
        let removed: String = self
            .content
            .chars()
            .skip(start)
            .take(end - start)
            .collect();
        self.edit(Splice {
            at: start,
            removed,
            inserted: text.to_string(),
        });
    }

    /// Record the difference between the current content and `new_text` as
    /// one undoable edit.
    ///
    /// The text widget hands back the whole edited string each frame; this
    /// reduces it to the minimal middle splice so history stays per-edit
    /// rather than per-document.
    pub fn reconcile(&mut self, new_text: &str) {
        if self.content == new_text {
            return;
        }

        let old: Vec<char> = self.content.chars().collect();
        let new: Vec<char> = new_text.chars().collect();

        let mut prefix = 0;
        while prefix < old.len() && prefix < new.len() && old[prefix] == new[prefix] {
            prefix += 1;
        }
        let max_suffix = old.len().min(new.len()) - prefix;
        let mut suffix = 0;
        while suffix < max_suffix && old[old.len() - 1 - suffix] == new[new.len() - 1 - suffix] {
            suffix += 1;
        }

        self.edit(Splice {
            at: prefix,
            removed: old[prefix..old.len() - suffix].iter().collect(),
            inserted: new[prefix..new.len() - suffix].iter().collect(),
        });
    }

    /// Revert the most recent edit.
    pub fn undo(&mut self) -> Result<(), EditorError> {
        let splice = self.undo_stack.pop().ok_or(EditorError::NothingToUndo)?;
        self.apply(&splice.inverted());
        self.redo_stack.push(splice);
        self.revision += 1;
        Ok(())
    }

    /// Re-apply the most recently undone edit.
    pub fn redo(&mut self) -> Result<(), EditorError> {
        let splice = self.redo_stack.pop().ok_or(EditorError::NothingToRedo)?;
        self.apply(&splice);
        self.undo_stack.push(splice);
        self.revision += 1;
        Ok(())
    }

    /// Apply a fresh edit: history is linear, so the redo stack goes away.
    fn edit(&mut self, splice: Splice) {
        self.apply(&splice);
        self.undo_stack.push(splice);
        self.redo_stack.clear();
        self.revision += 1;
    }

    fn apply(&mut self, splice: &Splice) {
        let start = self.byte_offset(splice.at);
        let end = self.byte_offset(splice.at + splice.removed.chars().count());
        debug_assert_eq!(&self.content[start..end], splice.removed);
        self.content.replace_range(start..end, &splice.inserted);
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }
}
