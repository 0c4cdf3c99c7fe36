//! Command surface and dispatch
//!
//! Every user-triggered action, whether from the menu bar, a keyboard
//! shortcut, or a test, goes through `CommandRegistry::dispatch`. Handlers
//! are stateless functions over `EditorState`; the registry is built once
//! at startup and never changes.

use std::collections::HashMap;
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::core::config::AppConfig;
use crate::core::error::EditorError;
use crate::core::session::DocumentSession;
use crate::export::{PdfExporter, SinglePagePdf};
use crate::speech::SpeechBridge;
use crate::ui::theme::ColorScheme;

/// Identifier for every action the shell can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    New,
    Open,
    Save,
    SaveAs,
    ExportPdf,
    Exit,
    Cut,
    Copy,
    Paste,
    Undo,
    Redo,
    Dictate,
    Speak,
    ToggleScheme,
    About,
}

impl CommandId {
    /// The full command surface, in menu order.
    pub const ALL: [CommandId; 15] = [
        CommandId::New,
        CommandId::Open,
        CommandId::Save,
        CommandId::SaveAs,
        CommandId::ExportPdf,
        CommandId::Exit,
        CommandId::Cut,
        CommandId::Copy,
        CommandId::Paste,
        CommandId::Undo,
        CommandId::Redo,
        CommandId::Dictate,
        CommandId::Speak,
        CommandId::ToggleScheme,
        CommandId::About,
    ];

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            CommandId::New => "New",
            CommandId::Open => "Open",
            CommandId::Save => "Save",
            CommandId::SaveAs => "Save As",
            CommandId::ExportPdf => "Export as PDF",
            CommandId::Exit => "Exit",
            CommandId::Cut => "Cut",
            CommandId::Copy => "Copy",
            CommandId::Paste => "Paste",
            CommandId::Undo => "Undo",
            CommandId::Redo => "Redo",
            CommandId::Dictate => "Voice-to-Text",
            CommandId::Speak => "Text-to-Speech",
            CommandId::ToggleScheme => "Toggle Dark Mode",
            CommandId::About => "About Voxpad",
        }
    }
}

/// What a successfully handled command asks of the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing further; the shell redraws.
    Done,
    /// Show an informational notice.
    Info(String),
    /// Terminate the process.
    Quit,
}

/// Path selection and notices, provided by the shell.
///
/// Handlers never build dialogs themselves; tests substitute a stub.
pub trait DialogService {
    /// Choose an existing text file to open. `None` means cancelled.
    fn pick_open(&self) -> Option<PathBuf>;
    /// Choose a destination for saving. `None` means cancelled.
    fn pick_save(&self) -> Option<PathBuf>;
    /// Choose a destination for PDF export. `None` means cancelled.
    fn pick_export(&self) -> Option<PathBuf>;
    /// Show a blocking informational notice.
    fn info(&self, title: &str, message: &str);
}

/// Everything the command handlers operate on.
///
/// The shell keeps a handle to this and feeds cursor/selection updates in;
/// it holds no document state of its own.
pub struct EditorState {
    pub session: DocumentSession,
    pub scheme: ColorScheme,
    pub clipboard: String,
    /// Current selection in character indices, endpoints in any order.
    pub selection: Option<Range<usize>>,
    /// Insertion point in character indices.
    pub cursor: usize,
    pub speech: SpeechBridge,
    pub exporter: Box<dyn PdfExporter>,
    pub dialogs: Box<dyn DialogService>,
}

impl EditorState {
    /// Build the state with the configured backends.
    pub fn new(config: &AppConfig, dialogs: Box<dyn DialogService>) -> Self {
        Self {
            session: DocumentSession::new(),
            scheme: ColorScheme::default(),
            clipboard: String::new(),
            selection: None,
            cursor: 0,
            speech: SpeechBridge::from_config(&config.speech),
            exporter: Box::new(SinglePagePdf),
            dialogs,
        }
    }

    /// Normalized, clamped, non-empty selection.
    fn selected_range(&self) -> Option<Range<usize>> {
        let raw = self.selection.clone()?;
        let len = self.session.buffer.char_len();
        let start = raw.start.min(raw.end).min(len);
        let end = raw.start.max(raw.end).min(len);
        (start < end).then_some(start..end)
    }

    fn selected_text(&self, range: &Range<usize>) -> String {
        self.session
            .buffer
            .content()
            .chars()
            .skip(range.start)
            .take(range.end - range.start)
            .collect()
    }

    /// Drop cursor and selection back to the start of the document.
    fn reset_edit_point(&mut self) {
        self.cursor = 0;
        self.selection = None;
    }

    /// Keep the edit point inside the document after a content change.
    fn clamp_edit_point(&mut self) {
        self.cursor = self.cursor.min(self.session.buffer.char_len());
        self.selection = None;
    }
}

type Handler = fn(&mut EditorState) -> Result<Outcome, EditorError>;

/// Fixed mapping from command ids to handlers.
pub struct CommandRegistry {
    handlers: HashMap<CommandId, Handler>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    /// Register the full command surface.
    pub fn new() -> Self {
        let mut handlers: HashMap<CommandId, Handler> = HashMap::new();
        handlers.insert(CommandId::New, handlers::new_document);
        handlers.insert(CommandId::Open, handlers::open);
        handlers.insert(CommandId::Save, handlers::save);
        handlers.insert(CommandId::SaveAs, handlers::save_as);
        handlers.insert(CommandId::ExportPdf, handlers::export_pdf);
        handlers.insert(CommandId::Exit, handlers::exit);
        handlers.insert(CommandId::Cut, handlers::cut);
        handlers.insert(CommandId::Copy, handlers::copy);
        handlers.insert(CommandId::Paste, handlers::paste);
        handlers.insert(CommandId::Undo, handlers::undo);
        handlers.insert(CommandId::Redo, handlers::redo);
        handlers.insert(CommandId::Dictate, handlers::dictate);
        handlers.insert(CommandId::Speak, handlers::speak);
        handlers.insert(CommandId::ToggleScheme, handlers::toggle_scheme);
        handlers.insert(CommandId::About, handlers::about);
        Self { handlers }
    }

    /// Look up and run the handler for `id` synchronously.
    ///
    /// A missing registration is a programming error, not a runtime
    /// condition: every id is registered in `new`.
    pub fn dispatch(&self, id: CommandId, state: &mut EditorState) -> Result<Outcome, EditorError> {
        tracing::debug!("Dispatching command: {id:?}");
        let handler = self
            .handlers
            .get(&id)
            .unwrap_or_else(|| panic!("command {id:?} has no registered handler"));
        handler(state)
    }
}

mod handlers {
    use super::*;

    pub(super) fn new_document(state: &mut EditorState) -> Result<Outcome, EditorError> {
        state.session.new_document();
        state.reset_edit_point();
        Ok(Outcome::Done)
    }

    pub(super) fn open(state: &mut EditorState) -> Result<Outcome, EditorError> {
        let Some(path) = state.dialogs.pick_open() else {
            return Ok(Outcome::Done);
        };
        state.session.open(&path)?;
        state.reset_edit_point();
        Ok(Outcome::Done)
    }

    pub(super) fn save(state: &mut EditorState) -> Result<Outcome, EditorError> {
        match state.session.location().map(Path::to_path_buf) {
            Some(path) => {
                state.session.save_as(&path)?;
                Ok(Outcome::Done)
            }
            None => save_as(state),
        }
    }

    pub(super) fn save_as(state: &mut EditorState) -> Result<Outcome, EditorError> {
        let Some(path) = state.dialogs.pick_save() else {
            return Ok(Outcome::Done);
        };
        state.session.save_as(&path)?;
        Ok(Outcome::Done)
    }

    pub(super) fn export_pdf(state: &mut EditorState) -> Result<Outcome, EditorError> {
        let Some(path) = state.dialogs.pick_export() else {
            return Ok(Outcome::Done);
        };
        state.session.export_pdf(&path, state.exporter.as_ref())?;
        Ok(Outcome::Info(format!("PDF saved at {}", path.display())))
    }

    pub(super) fn exit(_state: &mut EditorState) -> Result<Outcome, EditorError> {
        Ok(Outcome::Quit)
    }

    pub(super) fn cut(state: &mut EditorState) -> Result<Outcome, EditorError> {
        let Some(range) = state.selected_range() else {
            return Ok(Outcome::Done);
        };
        state.clipboard = state.selected_text(&range);
        state.session.buffer.delete(range.clone());
        state.cursor = range.start;
        state.selection = None;
        Ok(Outcome::Done)
    }

    pub(super) fn copy(state: &mut EditorState) -> Result<Outcome, EditorError> {
        if let Some(range) = state.selected_range() {
            state.clipboard = state.selected_text(&range);
        }
        Ok(Outcome::Done)
    }

    pub(super) fn paste(state: &mut EditorState) -> Result<Outcome, EditorError> {
        if state.clipboard.is_empty() {
            return Ok(Outcome::Done);
        }
        let clipboard = state.clipboard.clone();
        let at = match state.selected_range() {
            Some(range) => {
                state.session.buffer.replace(range.clone(), &clipboard);
                range.start
            }
            None => {
                let at = state.cursor.min(state.session.buffer.char_len());
                state.session.buffer.insert(at, &clipboard);
                at
            }
        };
        state.cursor = at + clipboard.chars().count();
        state.selection = None;
        Ok(Outcome::Done)
    }

    pub(super) fn undo(state: &mut EditorState) -> Result<Outcome, EditorError> {
        state.session.buffer.undo()?;
        state.clamp_edit_point();
        Ok(Outcome::Done)
    }

    pub(super) fn redo(state: &mut EditorState) -> Result<Outcome, EditorError> {
        state.session.buffer.redo()?;
        state.clamp_edit_point();
        Ok(Outcome::Done)
    }

    pub(super) fn dictate(state: &mut EditorState) -> Result<Outcome, EditorError> {
        state.dialogs.info("Voice Input", "Please speak now...");
        state.speech.dictate(&mut state.session.buffer)?;
        state.clamp_edit_point();
        Ok(Outcome::Done)
    }

    pub(super) fn speak(state: &mut EditorState) -> Result<Outcome, EditorError> {
        let content = state.session.buffer.snapshot();
        state.speech.speak(&content)?;
        Ok(Outcome::Done)
    }

    pub(super) fn toggle_scheme(state: &mut EditorState) -> Result<Outcome, EditorError> {
        state.scheme = state.scheme.toggled();
        Ok(Outcome::Done)
    }

    pub(super) fn about(_state: &mut EditorState) -> Result<Outcome, EditorError> {
        Ok(Outcome::Info(
            "Voxpad is a simple notepad with dictation, read-aloud, and PDF export.".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use crate::speech::{RecognizeError, SpeechToText, TextToSpeech};
    use crate::ui::theme;

    #[derive(Default)]
    struct StubDialogs {
        open: Option<PathBuf>,
        save: Option<PathBuf>,
        export: Option<PathBuf>,
        infos: Arc<Mutex<Vec<String>>>,
    }

    impl DialogService for StubDialogs {
        fn pick_open(&self) -> Option<PathBuf> {
            self.open.clone()
        }
        fn pick_save(&self) -> Option<PathBuf> {
            self.save.clone()
        }
        fn pick_export(&self) -> Option<PathBuf> {
            self.export.clone()
        }
        fn info(&self, title: &str, message: &str) {
            self.infos.lock().unwrap().push(format!("{title}: {message}"));
        }
    }

    struct FixedRecognizer(Result<&'static str, fn() -> RecognizeError>);

    impl SpeechToText for FixedRecognizer {
        fn recognize(&self, _timeout: Duration) -> Result<String, RecognizeError> {
            match &self.0 {
                Ok(text) => Ok((*text).to_string()),
                Err(make) => Err(make()),
            }
        }
    }

    struct SilentSynthesizer;

    impl TextToSpeech for SilentSynthesizer {
        fn speak(&self, _text: &str) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn state_with(dialogs: StubDialogs) -> EditorState {
        let mut state = EditorState::new(&AppConfig::default(), Box::new(dialogs));
        state.speech = SpeechBridge::new(
            Box::new(FixedRecognizer(Ok("test"))),
            Box::new(SilentSynthesizer),
            Duration::from_secs(10),
        );
        state
    }

    fn state() -> EditorState {
        state_with(StubDialogs::default())
    }

    #[test]
    fn every_command_has_a_handler() {
        let registry = CommandRegistry::new();
        for id in CommandId::ALL {
            assert!(registry.handlers.contains_key(&id), "{id:?} unregistered");
        }
    }

    #[test]
    fn new_resets_everything() {
        let registry = CommandRegistry::new();
        let mut state = state();
        state.session.buffer.insert(0, "text");
        state.cursor = 4;
        registry.dispatch(CommandId::New, &mut state).unwrap();
        assert_eq!(state.session.buffer.content(), "");
        assert!(state.session.location().is_none());
        assert!(!state.session.is_dirty());
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn save_while_unbound_delegates_to_save_as() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chosen.txt");
        let registry = CommandRegistry::new();
        let mut state = state_with(StubDialogs {
            save: Some(path.clone()),
            ..Default::default()
        });
        state.session.buffer.insert(0, "Hello");

        registry.dispatch(CommandId::Save, &mut state).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Hello");
        assert_eq!(state.session.location(), Some(path.as_path()));
        assert!(!state.session.is_dirty());
    }

    #[test]
    fn save_as_cancelled_is_a_noop() {
        let registry = CommandRegistry::new();
        let mut state = state();
        state.session.buffer.insert(0, "unsaved");
        let outcome = registry.dispatch(CommandId::SaveAs, &mut state).unwrap();
        assert_eq!(outcome, Outcome::Done);
        assert!(state.session.location().is_none());
        assert!(state.session.is_dirty());
    }

    #[test]
    fn save_bound_skips_the_dialog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bound.txt");
        std::fs::write(&path, "v1").unwrap();
        let registry = CommandRegistry::new();
        let mut state = state_with(StubDialogs {
            open: Some(path.clone()),
            ..Default::default()
        });

        registry.dispatch(CommandId::Open, &mut state).unwrap();
        state.session.buffer.append(" v2");
        registry.dispatch(CommandId::Save, &mut state).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "v1 v2");
    }

    #[test]
    fn open_missing_file_reports_io_error() {
        let registry = CommandRegistry::new();
        let mut state = state_with(StubDialogs {
            open: Some(PathBuf::from("/nonexistent/file.txt")),
            ..Default::default()
        });
        state.session.buffer.insert(0, "kept");
        let err = registry.dispatch(CommandId::Open, &mut state).unwrap_err();
        assert!(matches!(err, EditorError::Io { .. }));
        assert_eq!(state.session.buffer.content(), "kept");
    }

    #[test]
    fn cut_copies_then_deletes_selection() {
        let registry = CommandRegistry::new();
        let mut state = state();
        state.session.buffer.insert(0, "hello world");
        state.selection = Some(0..5);

        registry.dispatch(CommandId::Cut, &mut state).unwrap();
        assert_eq!(state.clipboard, "hello");
        assert_eq!(state.session.buffer.content(), " world");
        assert_eq!(state.cursor, 0);
        assert!(state.selection.is_none());
    }

    #[test]
    fn copy_leaves_content_alone() {
        let registry = CommandRegistry::new();
        let mut state = state();
        state.session.buffer.insert(0, "hello world");
        state.selection = Some(6..11);

        registry.dispatch(CommandId::Copy, &mut state).unwrap();
        assert_eq!(state.clipboard, "world");
        assert_eq!(state.session.buffer.content(), "hello world");
    }

    #[test]
    fn cut_without_selection_is_a_noop() {
        let registry = CommandRegistry::new();
        let mut state = state();
        state.session.buffer.insert(0, "text");
        registry.dispatch(CommandId::Cut, &mut state).unwrap();
        assert_eq!(state.session.buffer.content(), "text");
        assert_eq!(state.clipboard, "");
    }

    #[test]
    fn paste_inserts_at_cursor() {
        let registry = CommandRegistry::new();
        let mut state = state();
        state.session.buffer.insert(0, "ac");
        state.clipboard = "b".to_string();
        state.cursor = 1;

        registry.dispatch(CommandId::Paste, &mut state).unwrap();
        assert_eq!(state.session.buffer.content(), "abc");
        assert_eq!(state.cursor, 2);
    }

    #[test]
    fn paste_replaces_selection_in_one_undo_step() {
        let registry = CommandRegistry::new();
        let mut state = state();
        state.session.buffer.replace_all("hello world");
        state.clipboard = "there".to_string();
        state.selection = Some(6..11);

        registry.dispatch(CommandId::Paste, &mut state).unwrap();
        assert_eq!(state.session.buffer.content(), "hello there");
        registry.dispatch(CommandId::Undo, &mut state).unwrap();
        assert_eq!(state.session.buffer.content(), "hello world");
    }

    #[test]
    fn paste_with_empty_clipboard_is_a_noop() {
        let registry = CommandRegistry::new();
        let mut state = state();
        state.session.buffer.insert(0, "text");
        registry.dispatch(CommandId::Paste, &mut state).unwrap();
        assert_eq!(state.session.buffer.content(), "text");
    }

    #[test]
    fn undo_underflow_surfaces_as_warning() {
        let registry = CommandRegistry::new();
        let mut state = state();
        let err = registry.dispatch(CommandId::Undo, &mut state).unwrap_err();
        assert!(matches!(err, EditorError::NothingToUndo));
        assert!(err.is_warning());
    }

    #[test]
    fn dictation_notifies_then_appends() {
        let registry = CommandRegistry::new();
        let dialogs = StubDialogs::default();
        let infos = dialogs.infos.clone();
        let mut state = state_with(dialogs);

        registry.dispatch(CommandId::Dictate, &mut state).unwrap();
        assert_eq!(state.session.buffer.content(), "test ");
        let infos = infos.lock().unwrap();
        assert_eq!(infos.len(), 1);
        assert!(infos[0].contains("speak now"));
    }

    #[test]
    fn speak_on_empty_document_warns() {
        let registry = CommandRegistry::new();
        let mut state = state();
        let err = registry.dispatch(CommandId::Speak, &mut state).unwrap_err();
        assert!(matches!(err, EditorError::EmptyDocument));
    }

    #[test]
    fn export_writes_pdf_and_reports_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        let registry = CommandRegistry::new();
        let mut state = state_with(StubDialogs {
            export: Some(path.clone()),
            ..Default::default()
        });
        state.session.buffer.insert(0, "content");

        match registry.dispatch(CommandId::ExportPdf, &mut state).unwrap() {
            Outcome::Info(msg) => assert!(msg.contains("doc.pdf")),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(path.exists());
    }

    #[test]
    fn export_empty_document_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        let registry = CommandRegistry::new();
        let mut state = state_with(StubDialogs {
            export: Some(path.clone()),
            ..Default::default()
        });

        let err = registry
            .dispatch(CommandId::ExportPdf, &mut state)
            .unwrap_err();
        assert!(matches!(err, EditorError::EmptyDocument));
        assert!(!path.exists());
    }

    #[test]
    fn toggle_scheme_flips_and_returns() {
        let registry = CommandRegistry::new();
        let mut state = state();
        assert_eq!(state.scheme, theme::LIGHT);
        registry.dispatch(CommandId::ToggleScheme, &mut state).unwrap();
        assert_eq!(state.scheme, theme::DARK);
        registry.dispatch(CommandId::ToggleScheme, &mut state).unwrap();
        assert_eq!(state.scheme, theme::LIGHT);
    }

    #[test]
    fn exit_asks_the_shell_to_quit() {
        let registry = CommandRegistry::new();
        let mut state = state();
        let outcome = registry.dispatch(CommandId::Exit, &mut state).unwrap();
        assert_eq!(outcome, Outcome::Quit);
    }

    #[test]
    fn about_is_informational() {
        let registry = CommandRegistry::new();
        let mut state = state();
        assert!(matches!(
            registry.dispatch(CommandId::About, &mut state),
            Ok(Outcome::Info(_))
        ));
    }
}
