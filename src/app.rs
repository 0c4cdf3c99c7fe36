//! Main application state and UI coordination

use eframe::egui;

use crate::core::command::{CommandId, CommandRegistry, EditorState, Outcome};
use crate::core::config::AppConfig;
use crate::ui::dialogs::{self, NativeDialogs};
use crate::ui::editor::EditorPanel;

/// Main application state
pub struct VoxpadApp {
    /// Document, clipboard, scheme, and backend handles
    pub state: EditorState,
    /// All user-triggered actions dispatch through here
    pub registry: CommandRegistry,
    /// Application configuration
    pub config: AppConfig,
    /// Draft copy of the document the text widget edits
    pub draft: String,
}

impl VoxpadApp {
    /// Create a new application instance
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        // Load config or use defaults
        let config = AppConfig::load().unwrap_or_default();
        let state = EditorState::new(&config, Box::new(NativeDialogs));

        Self {
            state,
            registry: CommandRegistry::new(),
            config,
            draft: String::new(),
        }
    }

    /// Dispatch a command and surface its result to the user.
    ///
    /// Errors never escape past here; they become blocking notices.
    pub fn run_command(&mut self, ctx: &egui::Context, id: CommandId) {
        match self.registry.dispatch(id, &mut self.state) {
            Ok(Outcome::Done) => {}
            Ok(Outcome::Info(message)) => self.state.dialogs.info("Voxpad", &message),
            Ok(Outcome::Quit) => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            Err(err) => {
                let warning = err.is_warning();
                if warning {
                    tracing::warn!("Command {id:?}: {err}");
                } else {
                    tracing::error!("Command {id:?} failed: {err}");
                }
                let title = if warning { "Warning" } else { "Error" };
                dialogs::alert(title, &err.to_string(), warning);
            }
        }
    }

    fn menu_item(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, id: CommandId) {
        if ui.button(id.label()).clicked() {
            self.run_command(ctx, id);
            ui.close();
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    self.menu_item(ui, ctx, CommandId::New);
                    self.menu_item(ui, ctx, CommandId::Open);
                    self.menu_item(ui, ctx, CommandId::Save);
                    self.menu_item(ui, ctx, CommandId::SaveAs);
                    self.menu_item(ui, ctx, CommandId::ExportPdf);
                    ui.separator();
                    self.menu_item(ui, ctx, CommandId::Exit);
                });

                ui.menu_button("Edit", |ui| {
                    self.menu_item(ui, ctx, CommandId::Cut);
                    self.menu_item(ui, ctx, CommandId::Copy);
                    self.menu_item(ui, ctx, CommandId::Paste);
                    ui.separator();
                    self.menu_item(ui, ctx, CommandId::Undo);
                    self.menu_item(ui, ctx, CommandId::Redo);
                });

                ui.menu_button("Tools", |ui| {
                    self.menu_item(ui, ctx, CommandId::Dictate);
                    self.menu_item(ui, ctx, CommandId::Speak);
                });

                ui.menu_button("View", |ui| {
                    self.menu_item(ui, ctx, CommandId::ToggleScheme);
                });

                ui.menu_button("Help", |ui| {
                    self.menu_item(ui, ctx, CommandId::About);
                });
            });
        });
    }

    fn window_title(&self) -> String {
        let marker = if self.state.session.is_dirty() { "*" } else { "" };
        format!("{marker}{} - Voxpad", self.state.session.display_name())
    }
}

impl eframe::App for VoxpadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(self.state.scheme.visuals());
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(self.window_title()));

        // Handle keyboard shortcuts. Cut/copy/paste and undo inside the
        // text widget stay with the widget; the menu entries drive the
        // buffer history.
        let mut pending = Vec::new();
        ctx.input(|i| {
            if i.modifiers.ctrl && i.key_pressed(egui::Key::N) {
                pending.push(CommandId::New);
            }
            if i.modifiers.ctrl && i.key_pressed(egui::Key::O) {
                pending.push(CommandId::Open);
            }
            if i.modifiers.ctrl && i.key_pressed(egui::Key::S) {
                pending.push(CommandId::Save);
            }
            if i.modifiers.ctrl && i.key_pressed(egui::Key::D) {
                pending.push(CommandId::Dictate);
            }
        });
        for id in pending {
            self.run_command(ctx, id);
        }

        // Render menu bar
        self.render_menu_bar(ctx);

        // Render main content area
        egui::CentralPanel::default().show(ctx, |ui| {
            EditorPanel::show(ui, self);
        });
    }
}
