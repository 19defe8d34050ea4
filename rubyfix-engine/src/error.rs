//! Layered error types for document processing

use std::path::PathBuf;
use thiserror::Error;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// A required WordprocessingML element is absent
    #[error("XML not including {0}")]
    MissingElement(&'static str),

    /// Root of a flat XML file is not a package
    #[error("XML package format error")]
    PackageFormat,

    /// The package does not hold exactly one main document part
    #[error("XML object not existing")]
    DocumentPartNotFound,

    /// The main document part has no inline XML data
    #[error("XML data missing")]
    DocumentDataMissing,

    /// The archive lacks the main document entry
    #[error("the entry in zip not found: {0}")]
    EntryNotFound(String),

    /// The input is not a valid archive
    #[error(".docx is not a valid archive file: {0}")]
    InvalidArchive(String),

    /// The file extension is neither `.docx` nor `.xml`
    #[error("file format not supported")]
    UnsupportedFormat,

    /// Refusing to replace an existing output
    #[error("output already exists: {}", .0.display())]
    TargetExists(PathBuf),

    /// Invalid processing options
    #[error("configuration error: {0}")]
    Config(String),

    /// The document ended inside an element
    #[error("malformed XML: {0}")]
    Malformed(String),

    /// XML reader error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Archive error
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
