//! PDF writing: document assembly and serialization.
//!
//! ```text
//! PageDescriptor[] (+ optional globals blob)
//!     ↓
//! [Document] (object graph: catalog, outlines, pages tree, page groups)
//!     ↓
//! [serializer] (single render pass with xref offset bookkeeping)
//!     ↓
//! PDF bytes
//! ```

mod document;
mod serializer;

pub use document::Document;
