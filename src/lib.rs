// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::should_implement_trait)]

//! # jbig2pdf
//!
//! Wraps one or more JBIG2-encoded bitonal page streams (optionally sharing
//! a common symbol dictionary) into a single viewer-compatible PDF 1.4 file.
//!
//! The crate does not decode or validate JBIG2 data; every page and globals
//! blob is embedded verbatim as an opaque stream for the consuming viewer's
//! `JBIG2Decode` filter. What it does own is the PDF object graph and its
//! byte-exact serialization: dense identifier allocation, the minimal
//! catalog/outlines/pages graph with one image per page, and a classic
//! cross-reference table whose offsets are recorded from the actual render
//! pass.
//!
//! ## Quick Start
//!
//! ```
//! use jbig2pdf::{Document, PageDescriptor};
//!
//! # fn main() -> jbig2pdf::Result<()> {
//! # let mut blob = vec![0u8; 11];
//! # for v in [200u32, 300, 300, 300] { blob.extend_from_slice(&v.to_be_bytes()); }
//! let mut doc = Document::new();
//! let globals = doc.add_globals(std::fs::read("scan.sym").unwrap_or_default());
//! let page = PageDescriptor::parse("scan.001", blob)?;
//! doc.add_page(&page, Some(globals));
//! let pdf_bytes = doc.render()?;
//! # assert!(pdf_bytes.starts_with(b"%PDF-1.4"));
//! # Ok(())
//! # }
//! ```
//!
//! The `jbig2topdf` binary layers file discovery, argument handling and
//! stdout output on top of this API.

#![warn(missing_docs)]

// Error handling
pub mod error;

// PDF object model
pub mod object;

// Page input parsing
pub mod page;

// Document assembly and serialization
pub mod writer;

// Re-exports
pub use error::{Error, Result};
pub use object::{Dictionary, IdAllocator, IndirectObject, Value};
pub use page::{PageDescriptor, DEFAULT_DPI};
pub use writer::Document;

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name() {
        assert_eq!(NAME, "jbig2pdf");
    }
}
