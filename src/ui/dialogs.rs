//! Native file and message dialogs
//!
//! The only place the shell talks to the platform dialog toolkit; the
//! command layer sees these through the `DialogService` trait.

use std::path::PathBuf;

use crate::core::command::DialogService;

/// `DialogService` backed by the platform's native dialogs.
pub struct NativeDialogs;

impl DialogService for NativeDialogs {
    fn pick_open(&self) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .add_filter("Text Files", &["txt"])
            .add_filter("All Files", &["*"])
            .pick_file()
    }

    fn pick_save(&self) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .add_filter("Text Files", &["txt"])
            .add_filter("All Files", &["*"])
            .set_file_name("untitled.txt")
            .save_file()
    }

    fn pick_export(&self) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .add_filter("PDF Files", &["pdf"])
            .set_file_name("untitled.pdf")
            .save_file()
    }

    fn info(&self, title: &str, message: &str) {
        rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Info)
            .set_title(title)
            .set_description(message)
            .show();
    }
}

/// Blocking warning or error notice.
pub fn alert(title: &str, message: &str, warning: bool) {
    let level = if warning {
        rfd::MessageLevel::Warning
    } else {
        rfd::MessageLevel::Error
    };
    rfd::MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(message)
        .show();
}
