//! Minimal PDF export backend
//!
//! Writes a single-page document with the text drawn starting at a fixed
//! origin. Pagination, wrapping, and font selection are this backend's
//! concern, and this implementation deliberately does none of them; a
//! fuller renderer can replace it behind the same trait.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Text origin on the page, in PDF points from the bottom-left corner.
const ORIGIN: (u32, u32) = (100, 750);
const FONT_SIZE: u32 = 12;
const LEADING: u32 = 14;

/// A destination for document export.
pub trait PdfExporter {
    /// Render `text` to a PDF at `path`.
    fn render(&self, path: &Path, text: &str) -> Result<()>;
}

/// Built-in exporter: one US-letter page, Helvetica, no wrapping.
#[derive(Debug, Default)]
pub struct SinglePagePdf;

impl PdfExporter for SinglePagePdf {
    fn render(&self, path: &Path, text: &str) -> Result<()> {
        let bytes = build_document(text);
        fs::write(path, bytes)
            .with_context(|| format!("Failed to write PDF: {}", path.display()))?;
        Ok(())
    }
}

fn build_document(text: &str) -> Vec<u8> {
    let mut doc = Vec::new();
    let mut offsets = Vec::new();
    doc.extend_from_slice(b"%PDF-1.4\n");

    let push_object = |doc: &mut Vec<u8>, offsets: &mut Vec<usize>, body: &str| {
        offsets.push(doc.len());
        let number = offsets.len();
        doc.extend_from_slice(format!("{number} 0 obj\n{body}\nendobj\n").as_bytes());
    };

    push_object(&mut doc, &mut offsets, "<< /Type /Catalog /Pages 2 0 R >>");
    push_object(
        &mut doc,
        &mut offsets,
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>",
    );
    push_object(
        &mut doc,
        &mut offsets,
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>",
    );
    push_object(
        &mut doc,
        &mut offsets,
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>",
    );

    let stream = content_stream(text);
    push_object(
        &mut doc,
        &mut offsets,
        &format!(
            "<< /Length {} >>\nstream\n{}endstream",
            stream.len(),
            stream
        ),
    );

    let xref_offset = doc.len();
    doc.extend_from_slice(format!("xref\n0 {}\n", offsets.len() + 1).as_bytes());
    doc.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        doc.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    doc.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            offsets.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );

    doc
}

fn content_stream(text: &str) -> String {
    let mut stream = format!(
        "BT\n/F1 {FONT_SIZE} Tf\n{LEADING} TL\n{} {} Td\n",
        ORIGIN.0, ORIGIN.1
    );
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            stream.push_str("T*\n");
        }
        stream.push('(');
        stream.push_str(&escape_pdf_string(line));
        stream.push_str(") Tj\n");
    }
    stream.push_str("ET\n");
    stream
}

/// Backslash-escape the delimiters of a literal PDF string.
fn escape_pdf_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            _ => out.push(c),
        }
    }
    out
}
