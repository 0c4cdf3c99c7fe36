//! UI components for Voxpad

pub mod dialogs;
pub mod editor;
pub mod theme;
