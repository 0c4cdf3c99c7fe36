//! Document export backends

mod pdf;

pub use pdf::{PdfExporter, SinglePagePdf};
