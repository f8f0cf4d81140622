//! Error types for the JBIG2-to-PDF wrapper.
//!
//! Fatal conditions abort the run before any output is written; per-page
//! conditions are reported and the page is skipped.

/// Result type alias for wrapper operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while assembling the output document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Shared symbol table could not be read (fatal: every page may depend on it)
    #[error("cannot read symbol table '{path}': {source}")]
    SymbolTable {
        /// Path of the symbol-table file
        path: String,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// A page file could not be read (recoverable: the page is skipped)
    #[error("cannot read page file '{path}': {source}")]
    PageRead {
        /// Path of the page file
        path: String,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// A page blob is too short to carry the fixed-offset header
    #[error("malformed page header in '{source_name}': {len} bytes, need at least 27")]
    PageHeader {
        /// Name of the page input
        source_name: String,
        /// Actual blob length
        len: usize,
    },

    /// No page produced a valid descriptor (fatal: an empty Pages tree is useless)
    #[error("no usable pages found")]
    NoPages,

    /// Invalid command-line arguments
    #[error("{0}")]
    Usage(String),

    /// IO error writing the finished document
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
