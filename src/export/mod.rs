//! Export module - PDF/PNG documents and the surfaces that receive them

mod pdf;
mod png;
mod surface;

pub use pdf::PdfExporter;
pub use png::PngExporter;
pub use surface::{ExportSurface, FileExportSurface};

use std::path::PathBuf;
use thiserror::Error;

pub const PDF_FILE_NAME: &str = "line_graph_results.pdf";
pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const PNG_FILE_NAME: &str = "line_graph_results.png";
pub const PNG_MIME_TYPE: &str = "image/png";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("PDF generation failed: {0}")]
    Pdf(String),
    #[error("PNG generation failed: {0}")]
    Png(String),
}

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Png,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Png => "png",
        }
    }

    pub fn filter_name(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "PDF Document",
            ExportFormat::Png => "PNG Image",
        }
    }
}

/// An encoded chart ready to be handed to an export surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedDocument {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ExportedDocument {
    pub fn pdf(bytes: Vec<u8>) -> Self {
        Self {
            file_name: PDF_FILE_NAME.to_string(),
            mime_type: PDF_MIME_TYPE.to_string(),
            bytes,
        }
    }

    pub fn png(bytes: Vec<u8>) -> Self {
        Self {
            file_name: PNG_FILE_NAME.to_string(),
            mime_type: PNG_MIME_TYPE.to_string(),
            bytes,
        }
    }
}
