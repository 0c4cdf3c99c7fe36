//! Document persistence lifecycle
//!
//! One session exists for the process. It binds the text buffer to at most
//! one storage location and tracks whether the content differs from the
//! last successful open or save.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::buffer::TextBuffer;
use crate::core::error::EditorError;
use crate::export::PdfExporter;

/// The buffer plus its persistence state.
#[derive(Debug, Default)]
pub struct DocumentSession {
    /// The document content and edit history.
    pub buffer: TextBuffer,
    /// Bound storage location; `None` means untitled.
    location: Option<PathBuf>,
    /// Buffer revision at the last successful open or save.
    saved_revision: u64,
}

impl DocumentSession {
    /// Create a session with an empty, untitled, clean document.
    pub fn new() -> Self {
        Self::default()
    }

    /// The bound storage location, if any.
    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    /// Whether the content differs from the last persisted snapshot.
    pub fn is_dirty(&self) -> bool {
        self.buffer.revision() != self.saved_revision
    }

    /// Display name for the title bar: file stem or "Untitled".
    pub fn display_name(&self) -> String {
        self.location
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "Untitled".to_string())
    }

    /// Reset to an untitled empty document.
    ///
    /// Always succeeds and never prompts about unsaved changes.
    pub fn new_document(&mut self) {
        self.buffer.replace_all("");
        self.location = None;
        self.mark_clean();
    }

    /// Load `path` into the buffer and bind it.
    ///
    /// On read failure the session is left untouched.
    pub fn open(&mut self, path: &Path) -> Result<(), EditorError> {
        let content = fs::read_to_string(path).map_err(|e| EditorError::io(path, e))?;
        self.buffer.replace_all(content);
        self.location = Some(path.to_path_buf());
        self.mark_clean();
        tracing::info!("Opened document: {}", path.display());
        Ok(())
    }

    /// Write the snapshot to `path` and bind it.
    ///
    /// Serves both Save and Save As: saving a bound document rebinds the
    /// same path. On write failure the session stays dirty and keeps its
    /// previous binding.
    pub fn save_as(&mut self, path: &Path) -> Result<(), EditorError> {
        fs::write(path, self.buffer.content()).map_err(|e| EditorError::io(path, e))?;
        self.location = Some(path.to_path_buf());
        self.mark_clean();
        tracing::info!("Saved document: {}", path.display());
        Ok(())
    }

    /// Export the snapshot as a PDF. Read-only with respect to session
    /// state; the bound location and dirty flag are untouched.
    pub fn export_pdf(&self, path: &Path, exporter: &dyn PdfExporter) -> Result<(), EditorError> {
        let content = self.buffer.snapshot();
        if content.trim().is_empty() {
            return Err(EditorError::EmptyDocument);
        }
        exporter
            .render(path, &content)
            .map_err(|e| EditorError::Export(e.to_string()))?;
        tracing::info!("Exported PDF: {}", path.display());
        Ok(())
    }

    fn mark_clean(&mut self) {
        self.saved_revision = self.buffer.revision();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::SinglePagePdf;

    #[test]
    fn new_session_is_untitled_and_clean() {
        let session = DocumentSession::new();
        assert!(session.location().is_none());
        assert!(!session.is_dirty());
        assert_eq!(session.buffer.content(), "");
        assert_eq!(session.display_name(), "Untitled");
    }

    #[test]
    fn mutation_marks_dirty() {
        let mut session = DocumentSession::new();
        session.buffer.insert(0, "hi");
        assert!(session.is_dirty());
    }

    #[test]
    fn new_document_resets_regardless_of_prior_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "prior").unwrap();

        let mut session = DocumentSession::new();
        session.open(&path).unwrap();
        session.buffer.append(" more");
        session.new_document();
        assert!(session.location().is_none());
        assert!(!session.is_dirty());
        assert_eq!(session.buffer.content(), "");
    }

    #[test]
    fn open_binds_and_cleans() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, "file contents").unwrap();

        let mut session = DocumentSession::new();
        session.buffer.insert(0, "unsaved");
        session.open(&path).unwrap();
        assert_eq!(session.buffer.content(), "file contents");
        assert_eq!(session.location(), Some(path.as_path()));
        assert!(!session.is_dirty());
    }

    #[test]
    fn open_missing_file_leaves_state_unchanged() {
        let mut session = DocumentSession::new();
        session.buffer.insert(0, "kept");
        let err = session.open(Path::new("/nonexistent/doc.txt")).unwrap_err();
        assert!(matches!(err, EditorError::Io { .. }));
        assert_eq!(session.buffer.content(), "kept");
        assert!(session.location().is_none());
        assert!(session.is_dirty());
    }

    #[test]
    fn open_discards_undo_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, "loaded").unwrap();

        let mut session = DocumentSession::new();
        session.buffer.insert(0, "secret");
        session.open(&path).unwrap();
        assert!(session.buffer.undo().is_err());
        assert_eq!(session.buffer.content(), "loaded");
    }

    #[test]
    fn save_as_writes_binds_and_cleans() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        let mut session = DocumentSession::new();
        session.buffer.insert(0, "Hello");
        session.save_as(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Hello");
        assert_eq!(session.location(), Some(path.as_path()));
        assert!(!session.is_dirty());
    }

    #[test]
    fn save_failure_keeps_dirty_state() {
        let mut session = DocumentSession::new();
        session.buffer.insert(0, "data");
        let err = session
            .save_as(Path::new("/nonexistent/dir/out.txt"))
            .unwrap_err();
        assert!(matches!(err, EditorError::Io { .. }));
        assert!(session.is_dirty());
        assert!(session.location().is_none());
    }

    #[test]
    fn edit_save_undo_save_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");

        let mut session = DocumentSession::new();
        session.buffer.insert(0, "Hello");
        session.save_as(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Hello");
        assert!(!session.is_dirty());

        session.buffer.append(" world");
        assert!(session.is_dirty());
        session.buffer.undo().unwrap();
        assert_eq!(session.buffer.content(), "Hello");

        session.save_as(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Hello");
        assert!(!session.is_dirty());
    }

    #[test]
    fn export_whitespace_only_is_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");

        let mut session = DocumentSession::new();
        session.buffer.insert(0, "   \n\t  ");
        let err = session.export_pdf(&path, &SinglePagePdf).unwrap_err();
        assert!(matches!(err, EditorError::EmptyDocument));
        assert!(!path.exists());
    }

    #[test]
    fn export_does_not_touch_session_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");

        let mut session = DocumentSession::new();
        session.buffer.insert(0, "content");
        session.export_pdf(&path, &SinglePagePdf).unwrap();
        assert!(path.exists());
        assert!(session.location().is_none());
        assert!(session.is_dirty());
    }
}
