//! Document containers: `.docx` archives and flat XML packages

use crate::error::{EngineError, Result};
use crate::xml::PartLayout;
use log::debug;
use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{Cursor, Read, Seek, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Archive entry holding the main document part
pub const DOCUMENT_ENTRY: &str = "word/document.xml";

/// Supported container formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Office Open XML archive
    Docx,
    /// Word 2003 XML package, all parts inline
    FlatXml,
}

impl DocumentFormat {
    /// Detect the format from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("docx") => Ok(DocumentFormat::Docx),
            Some("xml") => Ok(DocumentFormat::FlatXml),
            _ => Err(EngineError::UnsupportedFormat),
        }
    }

    /// Where `w:document` sits in this format's document part
    pub fn layout(self) -> PartLayout {
        match self {
            DocumentFormat::Docx => PartLayout::Document,
            DocumentFormat::FlatXml => PartLayout::Package,
        }
    }

    /// Whether `path` has a supported extension
    pub fn is_supported(path: &Path) -> bool {
        Self::from_path(path).is_ok()
    }
}

/// A document loaded into memory
#[derive(Debug, Clone)]
pub struct DocumentSource {
    path: PathBuf,
    format: DocumentFormat,
    bytes: Vec<u8>,
}

impl DocumentSource {
    /// Load a document, checking that its main part can be reached
    pub fn open(path: &Path) -> Result<Self> {
        let format = DocumentFormat::from_path(path)?;
        let bytes = fs::read(path)?;
        let source = Self {
            path: path.to_path_buf(),
            format,
            bytes,
        };
        if format == DocumentFormat::Docx {
            let mut archive = source.archive()?;
            if archive.index_for_name(DOCUMENT_ENTRY).is_none() {
                return Err(EngineError::EntryNotFound(DOCUMENT_ENTRY.to_string()));
            }
            debug!("{}: {} archive entries", path.display(), archive.len());
            // touch the entry so a corrupt header is reported here
            archive.by_name(DOCUMENT_ENTRY)?;
        }
        Ok(source)
    }

    /// Path the document was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Container format
    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    fn archive(&self) -> Result<ZipArchive<Cursor<&[u8]>>> {
        ZipArchive::new(Cursor::new(self.bytes.as_slice()))
            .map_err(|e| EngineError::InvalidArchive(e.to_string()))
    }

    /// Raw XML of the part holding `w:document`
    ///
    /// For flat packages this is the whole file.
    pub fn document_part(&self) -> Result<Cow<'_, [u8]>> {
        match self.format {
            DocumentFormat::FlatXml => Ok(Cow::Borrowed(&self.bytes)),
            DocumentFormat::Docx => {
                let mut archive = self.archive()?;
                let mut entry = archive
                    .by_name(DOCUMENT_ENTRY)
                    .map_err(|_| EngineError::EntryNotFound(DOCUMENT_ENTRY.to_string()))?;
                let mut part = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
                entry.read_to_end(&mut part)?;
                Ok(Cow::Owned(part))
            }
        }
    }

    /// Write a copy of the document with its main part replaced by `part`
    ///
    /// Fails with [`EngineError::TargetExists`] if `target` exists and
    /// `overwrite` is off.
    pub fn save_as(&self, target: &Path, part: &[u8], overwrite: bool) -> Result<()> {
        let file = if overwrite {
            File::create(target)?
        } else {
            File::create_new(target).map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => {
                    EngineError::TargetExists(target.to_path_buf())
                }
                _ => EngineError::Io(e),
            })?
        };

        match self.format {
            DocumentFormat::FlatXml => {
                let mut file = file;
                file.write_all(part)?;
                file.flush()?;
            }
            DocumentFormat::Docx => {
                self.write_archive(file, part)?;
            }
        }
        debug!("wrote {}", target.display());
        Ok(())
    }

    /// Copy every entry raw except the document part, which is recompressed
    fn write_archive<W: Write + Seek>(&self, sink: W, part: &[u8]) -> Result<W> {
        let mut archive = self.archive()?;
        let mut writer = ZipWriter::new(sink);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for index in 0..archive.len() {
            let entry = archive.by_index_raw(index)?;
            if entry.name() == DOCUMENT_ENTRY {
                writer.start_file(DOCUMENT_ENTRY, options)?;
                writer.write_all(part)?;
            } else {
                writer.raw_copy_file(entry)?;
            }
        }

        Ok(writer.finish()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_docx(path: &Path, document: &str) {
        let file = File::create(path).unwrap();
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default();
        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(b"<Types/>").unwrap();
        zip.start_file(DOCUMENT_ENTRY, options).unwrap();
        zip.write_all(document.as_bytes()).unwrap();
        zip.start_file("word/styles.xml", options).unwrap();
        zip.write_all(b"<w:styles/>").unwrap();
        zip.finish().unwrap();
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("a/song.DOCX")).unwrap(),
            DocumentFormat::Docx
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("song.xml")).unwrap(),
            DocumentFormat::FlatXml
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("song.txt"))
                .unwrap_err()
                .to_string(),
            "file format not supported"
        );
        assert!(!DocumentFormat::is_supported(Path::new("README")));
    }

    #[test]
    fn test_docx_part_replaced_and_others_kept() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("song.docx");
        write_docx(&input, "<w:document/>");

        let source = DocumentSource::open(&input).unwrap();
        assert_eq!(source.document_part().unwrap().as_ref(), b"<w:document/>");

        let output = dir.path().join("song.C.docx");
        source
            .save_as(&output, b"<w:document>new</w:document>", false)
            .unwrap();

        let saved = DocumentSource::open(&output).unwrap();
        assert_eq!(
            saved.document_part().unwrap().as_ref(),
            b"<w:document>new</w:document>"
        );

        let mut archive = ZipArchive::new(File::open(&output).unwrap()).unwrap();
        let names: Vec<_> = archive.file_names().map(str::to_string).collect();
        assert_eq!(names.len(), 3);
        let mut styles = String::new();
        archive
            .by_name("word/styles.xml")
            .unwrap()
            .read_to_string(&mut styles)
            .unwrap();
        assert_eq!(styles, "<w:styles/>");
    }

    #[test]
    fn test_existing_target_not_overwritten() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("song.xml");
        fs::write(&input, "<pkg:package/>").unwrap();
        let target = dir.path().join("song.C.xml");
        fs::write(&target, "keep").unwrap();

        let source = DocumentSource::open(&input).unwrap();
        let err = source.save_as(&target, b"new", false).unwrap_err();
        assert!(matches!(err, EngineError::TargetExists(_)));
        assert_eq!(fs::read_to_string(&target).unwrap(), "keep");

        source.save_as(&target, b"new", true).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
    }

    #[test]
    fn test_invalid_archive() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("broken.docx");
        fs::write(&input, "not a zip").unwrap();

        let err = DocumentSource::open(&input).unwrap_err();
        assert!(matches!(err, EngineError::InvalidArchive(_)));
        assert!(err.to_string().starts_with(".docx is not a valid archive file"));
    }

    #[test]
    fn test_docx_without_document_entry() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("empty.docx");
        let mut zip = ZipWriter::new(File::create(&input).unwrap());
        zip.start_file("other.xml", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"<x/>").unwrap();
        zip.finish().unwrap();

        let err = DocumentSource::open(&input).unwrap_err();
        assert!(err.to_string().starts_with("the entry in zip not found"));
    }
}
