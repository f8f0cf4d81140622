//! Single-pass document rendering with cross-reference bookkeeping.
//!
//! Byte offsets are recorded from the live output buffer immediately before
//! each object header line is emitted, so the xref table always matches the
//! bytes actually written. Any estimation here would corrupt the file.

use super::document::{Document, CATALOG_ID};
use crate::error::Result;
use std::io::Write;

pub(crate) fn render(doc: &Document) -> Result<Vec<u8>> {
    let mut out: Vec<u8> = Vec::new();
    let mut offsets: Vec<usize> = Vec::with_capacity(doc.object_count());

    writeln!(out, "%PDF-1.4")?;

    for obj in doc.objects() {
        offsets.push(out.len());
        writeln!(out, "{} 0 obj", obj.id())?;
        obj.write(&mut out)?;
    }

    let xref_start = out.len();
    writeln!(out, "xref")?;
    writeln!(out, "0 {}", offsets.len() + 1)?;
    // Free-list head; entries are a fixed 20 bytes including the newline.
    writeln!(out, "0000000000 65535 f ")?;
    for offset in &offsets {
        writeln!(out, "{:010} 00000 n ", offset)?;
    }

    writeln!(out, "trailer")?;
    writeln!(out, "<< /Size {}\n/Root {} 0 R >>", offsets.len() + 1, CATALOG_ID)?;
    writeln!(out, "startxref")?;
    writeln!(out, "{}", xref_start)?;
    writeln!(out, "%%EOF")?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_structure() {
        let doc = Document::new();
        let out = render(&doc).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("%PDF-1.4\n"));
        assert!(text.contains("1 0 obj\n"));
        assert!(text.contains("2 0 obj\n"));
        assert!(text.contains("3 0 obj\n"));
        assert!(text.contains("\nxref\n0 4\n0000000000 65535 f \n"));
        assert!(text.contains("/Size 4\n/Root 1 0 R"));
        assert!(text.ends_with("%%EOF\n"));
    }

    #[test]
    fn test_startxref_points_at_xref_keyword() {
        let doc = Document::new();
        let out = render(&doc).unwrap();
        let text = String::from_utf8(out).unwrap();

        let start_pos = text.find("startxref\n").unwrap() + "startxref\n".len();
        let end = text[start_pos..].find('\n').unwrap() + start_pos;
        let xref_start: usize = text[start_pos..end].parse().unwrap();

        assert!(text[xref_start..].starts_with("xref\n"));
    }
}
