//! Export Surfaces
//! Destinations for exported chart documents.

use super::{ExportError, ExportedDocument};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Receives an encoded chart and stores it somewhere.
pub trait ExportSurface {
    /// Store the document, returning where it ended up.
    fn export(&mut self, document: &ExportedDocument) -> Result<PathBuf, ExportError>;
}

/// Where a `FileExportSurface` writes.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportTarget {
    /// Write `<dir>/<document file name>`, creating the directory if needed
    Directory(PathBuf),
    /// Write exactly this path (e.g. picked in a save dialog)
    File(PathBuf),
}

/// Writes documents to the local filesystem.
pub struct FileExportSurface {
    target: ExportTarget,
    open_after_export: bool,
}

impl FileExportSurface {
    pub fn new(target: ExportTarget) -> Self {
        Self {
            target,
            open_after_export: false,
        }
    }

    pub fn directory(dir: impl Into<PathBuf>) -> Self {
        Self::new(ExportTarget::Directory(dir.into()))
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(ExportTarget::File(path.into()))
    }

    /// Open exported files with the system default app.
    pub fn with_open_after_export(mut self, open: bool) -> Self {
        self.open_after_export = open;
        self
    }

    fn resolve_path(&self, document: &ExportedDocument) -> Result<PathBuf, ExportError> {
        match &self.target {
            ExportTarget::Directory(dir) => {
                fs::create_dir_all(dir).map_err(|source| ExportError::Io {
                    path: dir.clone(),
                    source,
                })?;
                Ok(dir.join(&document.file_name))
            }
            ExportTarget::File(path) => Ok(path.clone()),
        }
    }

    fn open_exported(path: &Path) {
        if let Err(e) = open::that(path) {
            warn!(path = %path.display(), error = %e, "could not open exported file");
        }
    }
}

impl ExportSurface for FileExportSurface {
    fn export(&mut self, document: &ExportedDocument) -> Result<PathBuf, ExportError> {
        let path = self.resolve_path(document)?;

        fs::write(&path, &document.bytes).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;

        info!(
            path = %path.display(),
            mime = %document.mime_type,
            size = document.bytes.len(),
            "exported chart"
        );

        if self.open_after_export {
            Self::open_exported(&path);
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn document() -> ExportedDocument {
        ExportedDocument::pdf(b"%PDF-1.3 test".to_vec())
    }

    #[test]
    fn test_directory_target_uses_document_name() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("exports").join("charts");
        let mut surface = FileExportSurface::directory(&nested);

        let path = surface.export(&document()).unwrap();
        assert_eq!(path, nested.join("line_graph_results.pdf"));
        assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.3 test");
    }

    #[test]
    fn test_file_target_writes_exact_path() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("custom.pdf");
        let mut surface = FileExportSurface::file(&target);

        let path = surface.export(&document()).unwrap();
        assert_eq!(path, target);
        assert!(target.exists());
    }

    #[test]
    fn test_export_overwrites_previous_file() {
        let dir = TempDir::new().unwrap();
        let mut surface = FileExportSurface::directory(dir.path());

        surface.export(&document()).unwrap();
        let path = surface
            .export(&ExportedDocument::pdf(b"%PDF second".to_vec()))
            .unwrap();
        assert_eq!(fs::read(path).unwrap(), b"%PDF second");
    }

    #[test]
    fn test_write_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let missing_parent = dir.path().join("missing").join("out.pdf");
        let mut surface = FileExportSurface::file(&missing_parent);

        match surface.export(&document()) {
            Err(ExportError::Io { path, .. }) => assert_eq!(path, missing_parent),
            other => panic!("expected an I/O error, got {:?}", other),
        }
    }
}
