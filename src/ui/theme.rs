//! Light/dark color scheme toggle
//!
//! Exactly two schemes, each a fixed (background, foreground, cursor)
//! triple. Not persisted: every run starts light.

use egui::Color32;

/// A named display scheme for the text area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    pub name: &'static str,
    pub background: Color32,
    pub foreground: Color32,
    pub cursor: Color32,
}

pub const LIGHT: ColorScheme = ColorScheme {
    name: "light",
    background: Color32::WHITE,
    foreground: Color32::BLACK,
    cursor: Color32::BLACK,
};

pub const DARK: ColorScheme = ColorScheme {
    name: "dark",
    background: Color32::BLACK,
    foreground: Color32::WHITE,
    cursor: Color32::WHITE,
};

impl Default for ColorScheme {
    fn default() -> Self {
        LIGHT
    }
}

impl ColorScheme {
    /// The other scheme.
    pub fn toggled(self) -> Self {
        if self == LIGHT {
            DARK
        } else {
            LIGHT
        }
    }

    /// Project the scheme onto egui visuals for the shell.
    pub fn visuals(&self) -> egui::Visuals {
        let mut visuals = if *self == DARK {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        visuals.override_text_color = Some(self.foreground);
        visuals.extreme_bg_color = self.background;
        visuals.text_cursor.stroke.color = self.cursor;
        visuals
    }
}
