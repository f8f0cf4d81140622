//! PDF object model.
//!
//! Typed values, insertion-ordered dictionaries, and indirect objects with
//! optional opaque stream payloads, serialized according to PDF
//! specification ISO 32000-1:2008 syntax rules.

use bytes::Bytes;
use indexmap::IndexMap;
use std::io::Write;

/// Allocator of indirect-object identifiers.
///
/// Hands out a dense sequence starting at 1. Identifiers follow object
/// construction order, so the fixed root objects always land at 1-3. One
/// allocator is owned per document build; nothing is process-wide.
#[derive(Debug)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    /// Create an allocator whose first identifier is 1.
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Allocate the next identifier.
    pub fn next(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// A PDF attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Name (rendered with a leading `/`)
    Name(String),
    /// Integer value
    Integer(i64),
    /// Real (floating-point) value
    Real(f64),
    /// Reference to an indirect object (generation number always 0)
    Reference(u32),
    /// Array of values
    Array(Vec<Value>),
    /// Nested dictionary (rendered inline)
    Dict(Dictionary),
}

impl Value {
    /// Create a Name value.
    pub fn name(s: &str) -> Value {
        Value::Name(s.to_string())
    }

    fn write<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        match self {
            Value::Name(n) => write!(w, "/{}", n),
            Value::Integer(i) => write!(w, "{}", i),
            Value::Real(r) => write!(w, "{}", fmt_real(*r)),
            Value::Reference(id) => write!(w, "{} 0 R", id),
            Value::Array(items) => {
                write!(w, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(w, " ")?;
                    }
                    item.write(w)?;
                }
                write!(w, "]")
            },
            Value::Dict(dict) => dict.write_inline(w),
        }
    }
}

/// Format a real number with appropriate precision.
///
/// PDF allows up to 5 decimal places for coordinates; trailing zeros are
/// trimmed and whole values render in integer form.
pub(crate) fn fmt_real(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        let formatted = format!("{:.5}", value);
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

/// An insertion-ordered PDF dictionary.
///
/// Entry order is preserved and emitted as inserted, keeping output
/// reproducible and diff-stable across runs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dictionary {
    entries: IndexMap<String, Value>,
}

impl Dictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary from a list of entries, preserving their order.
    pub fn from_entries(entries: Vec<(&str, Value)>) -> Self {
        let mut dict = Self::new();
        for (key, value) in entries {
            dict.set(key, value);
        }
        dict
    }

    /// Insert or overwrite an entry. Overwriting keeps the original position.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    /// Look up an entry by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Whether the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Write as a nested value: `<< /K1 V1 /K2 V2 >>`.
    fn write_inline<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        write!(w, "<<")?;
        for (key, value) in &self.entries {
            write!(w, " /{} ", key)?;
            value.write(w)?;
        }
        write!(w, " >>")
    }

    /// Write as an indirect object's attribute block, one entry per line.
    fn write_block<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        write!(w, "<< ")?;
        for (key, value) in &self.entries {
            write!(w, "/{} ", key)?;
            value.write(w)?;
            writeln!(w)?;
        }
        writeln!(w, ">>")
    }
}

/// One PDF indirect object: an attribute dictionary plus an optional
/// opaque stream payload.
#[derive(Debug, Clone)]
pub struct IndirectObject {
    id: u32,
    dict: Dictionary,
    stream: Option<Bytes>,
}

impl IndirectObject {
    /// Create an object with no stream.
    pub fn new(id: u32, dict: Dictionary) -> Self {
        Self {
            id,
            dict,
            stream: None,
        }
    }

    /// Create a streamed object.
    ///
    /// `Length` is set to the exact byte count of the payload, which is
    /// embedded verbatim with no re-encoding.
    pub fn with_stream(id: u32, mut dict: Dictionary, stream: Bytes) -> Self {
        dict.set("Length", Value::Integer(stream.len() as i64));
        Self {
            id,
            dict,
            stream: Some(stream),
        }
    }

    /// The object's identifier.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// The object's attribute dictionary.
    pub fn dict(&self) -> &Dictionary {
        &self.dict
    }

    /// Mutable access to the attribute dictionary.
    ///
    /// Only the Pages tree object is mutated after construction, to pick up
    /// `Count` and `Kids` as pages are added.
    pub fn dict_mut(&mut self) -> &mut Dictionary {
        &mut self.dict
    }

    /// The stream payload, if any.
    pub fn stream(&self) -> Option<&Bytes> {
        self.stream.as_ref()
    }

    /// Write the object body (attribute block, stream section, `endobj`).
    ///
    /// The `<id> 0 obj` header line is emitted by the document serializer,
    /// which records the byte offset it starts at.
    pub fn write<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        self.dict.write_block(w)?;
        if let Some(data) = &self.stream {
            w.write_all(b"stream\n")?;
            w.write_all(data)?;
            w.write_all(b"\nendstream\n")?;
        }
        w.write_all(b"endobj\n")
    }
}
