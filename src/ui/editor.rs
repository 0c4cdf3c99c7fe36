//! Text editor panel
//!
//! The widget edits a draft copy of the document; every change is
//! reconciled back into the buffer as a single undoable edit, so the
//! panel itself owns no document state.

use eframe::egui;

use crate::app::VoxpadApp;

/// Plain text editor panel
pub struct EditorPanel;

impl EditorPanel {
    /// Show the editor panel
    pub fn show(ui: &mut egui::Ui, app: &mut VoxpadApp) {
        // Commands may have rewritten the buffer since the last frame.
        if app.draft != app.state.session.buffer.content() {
            app.draft = app.state.session.buffer.content().to_string();
        }

        let font_size = app.config.editor.font_size;
        let scroll = if app.config.editor.word_wrap {
            egui::ScrollArea::vertical()
        } else {
            egui::ScrollArea::both()
        };

        scroll.id_salt("editor_scroll").show(ui, |ui| {
            let output = egui::TextEdit::multiline(&mut app.draft)
                .font(egui::FontId::monospace(font_size))
                .desired_width(f32::INFINITY)
                .desired_rows(30)
                .lock_focus(true)
                .show(ui);

            if output.response.changed() {
                app.state.session.buffer.reconcile(&app.draft);
            }

            // Feed the widget's caret back so clipboard commands know
            // where to act.
            match output.state.cursor.char_range() {
                Some(range) => {
                    app.state.cursor = range.primary.index;
                    app.state.selection = (range.primary.index != range.secondary.index)
                        .then(|| range.secondary.index..range.primary.index);
                }
                None => app.state.selection = None,
            }
        });
    }
}
