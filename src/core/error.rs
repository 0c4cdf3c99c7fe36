//! Error taxonomy for editor commands
//!
//! Every error here is caught at the command-handler boundary and shown to
//! the user as a blocking notice; none of them terminate the process.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by command handlers.
#[derive(Debug, Error)]
pub enum EditorError {
    /// File read/write failure during open, save, or save-as.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Export or playback attempted on empty/whitespace-only content.
    #[error("Text area is empty. Nothing to do.")]
    EmptyDocument,

    /// The speech recognizer captured audio but could not make out words.
    #[error("Could not understand the audio")]
    UnrecognizedSpeech,

    /// The speech recognition backend could not be reached or failed.
    #[error("Speech recognition service error: {0}")]
    ServiceUnavailable(String),

    /// The PDF backend rejected the export.
    #[error("PDF export failed: {0}")]
    Export(String),

    /// Any other speech failure, carrying the underlying message.
    #[error("{0}")]
    Speech(String),

    /// Undo requested with an empty undo history.
    #[error("Nothing to undo!")]
    NothingToUndo,

    /// Redo requested with an empty redo history.
    #[error("Nothing to redo!")]
    NothingToRedo,
}

impl EditorError {
    /// Whether this is a non-fatal notice rather than a failure.
    ///
    /// Warnings get a warning-level dialog; everything else an error dialog.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            EditorError::EmptyDocument
                | EditorError::NothingToUndo
                | EditorError::NothingToRedo
        )
    }

    /// Wrap an I/O failure with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EditorError::Io {
            path: path.into(),
            source,
        }
    }
}
