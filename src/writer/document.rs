//! Document assembly.
//!
//! Builds the minimal object graph for a set of JBIG2 pages: the three
//! fixed root objects, the optional shared globals stream, and one group of
//! image, content, resources and page objects per input page.

use crate::error::Result;
use crate::object::{fmt_real, Dictionary, IdAllocator, IndirectObject, Value};
use crate::page::PageDescriptor;
use bytes::Bytes;

use super::serializer;

/// Identifier of the Catalog object, the document root.
pub(crate) const CATALOG_ID: u32 = 1;
const OUTLINES_ID: u32 = 2;
const PAGES_ID: u32 = 3;

/// A PDF document under assembly.
///
/// Owns the ordered object list; insertion order is emission order in the
/// final file. [`Document::new`] pre-allocates Catalog, Outlines and Pages
/// as objects 1-3, so every later cross-reference to them is fixed.
pub struct Document {
    ids: IdAllocator,
    objects: Vec<IndirectObject>,
    kids: Vec<u32>,
}

impl Document {
    /// Create a document with its three root objects in place.
    pub fn new() -> Self {
        let mut doc = Self {
            ids: IdAllocator::new(),
            objects: Vec::new(),
            kids: Vec::new(),
        };

        doc.add(
            Dictionary::from_entries(vec![
                ("Type", Value::name("Catalog")),
                ("Outlines", Value::Reference(OUTLINES_ID)),
                ("Pages", Value::Reference(PAGES_ID)),
            ]),
            None,
        );
        doc.add(
            Dictionary::from_entries(vec![
                ("Type", Value::name("Outlines")),
                ("Count", Value::Integer(0)),
            ]),
            None,
        );
        // Count and Kids appear once the first page is added.
        doc.add(
            Dictionary::from_entries(vec![("Type", Value::name("Pages"))]),
            None,
        );

        doc
    }

    /// Append an object, allocating its identifier. Never rejects.
    fn add(&mut self, dict: Dictionary, stream: Option<Bytes>) -> u32 {
        let id = self.ids.next();
        let obj = match stream {
            Some(data) => IndirectObject::with_stream(id, dict, data),
            None => IndirectObject::new(id, dict),
        };
        self.objects.push(obj);
        id
    }

    /// Embed the shared JBIG2 symbol dictionary as a stream object.
    ///
    /// Returns its identifier, to be passed to [`Document::add_page`] so
    /// every page's image dictionary can reference it.
    pub fn add_globals(&mut self, data: impl Into<Bytes>) -> u32 {
        self.add(Dictionary::new(), Some(data.into()))
    }

    /// Add one page: image XObject, content stream, resource dictionary and
    /// page object, in that order.
    ///
    /// The Pages tree's `Count` and `Kids` are rewritten after every page,
    /// so a partially processed page set still yields a consistent tree.
    pub fn add_page(&mut self, page: &PageDescriptor, globals: Option<u32>) {
        let width_pt = page.width_points();
        let height_pt = page.height_points();

        let mut image = Dictionary::from_entries(vec![
            ("Type", Value::name("XObject")),
            ("Subtype", Value::name("Image")),
            ("Width", Value::Integer(page.width as i64)),
            ("Height", Value::Integer(page.height as i64)),
            ("ColorSpace", Value::name("DeviceGray")),
            ("BitsPerComponent", Value::Integer(1)),
            ("Filter", Value::name("JBIG2Decode")),
        ]);
        if let Some(globals_id) = globals {
            image.set(
                "DecodeParms",
                Value::Dict(Dictionary::from_entries(vec![(
                    "JBIG2Globals",
                    Value::Reference(globals_id),
                )])),
            );
        }
        let image_id = self.add(image, Some(page.data.clone()));

        // Scale the unit image square to the page's physical size in points.
        let content = format!(
            "q {} 0 0 {} 0 0 cm /Im1 Do Q",
            fmt_real(width_pt),
            fmt_real(height_pt)
        );
        let content_id = self.add(Dictionary::new(), Some(Bytes::from(content.into_bytes())));

        let resources_id = self.add(
            Dictionary::from_entries(vec![
                (
                    "ProcSet",
                    Value::Array(vec![Value::name("PDF"), Value::name("ImageB")]),
                ),
                (
                    "XObject",
                    Value::Dict(Dictionary::from_entries(vec![(
                        "Im1",
                        Value::Reference(image_id),
                    )])),
                ),
            ]),
            None,
        );

        let page_id = self.add(
            Dictionary::from_entries(vec![
                ("Type", Value::name("Page")),
                ("Parent", Value::Reference(PAGES_ID)),
                (
                    "MediaBox",
                    Value::Array(vec![
                        Value::Integer(0),
                        Value::Integer(0),
                        Value::Real(width_pt),
                        Value::Real(height_pt),
                    ]),
                ),
                ("Contents", Value::Reference(content_id)),
                ("Resources", Value::Reference(resources_id)),
            ]),
            None,
        );

        self.kids.push(page_id);
        self.refresh_pages_tree();
    }

    /// Rewrite the Pages object's `Count` and `Kids` to the running totals.
    fn refresh_pages_tree(&mut self) {
        let kids = Value::Array(self.kids.iter().map(|&id| Value::Reference(id)).collect());
        let pages = &mut self.objects[(PAGES_ID - 1) as usize];
        pages.dict_mut().set("Count", Value::Integer(self.kids.len() as i64));
        pages.dict_mut().set("Kids", kids);
    }

    /// Number of pages added so far.
    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// Number of objects in the document, roots included.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// The ordered object list, for the render pass.
    pub(crate) fn objects(&self) -> &[IndirectObject] {
        &self.objects
    }

    /// Serialize the document to its final byte stream.
    pub fn render(&self) -> Result<Vec<u8>> {
        serializer::render(self)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(width: u32, height: u32, xres: u32, yres: u32) -> PageDescriptor {
        let mut blob = vec![0u8; 11];
        blob.extend_from_slice(&width.to_be_bytes());
        blob.extend_from_slice(&height.to_be_bytes());
        blob.extend_from_slice(&xres.to_be_bytes());
        blob.extend_from_slice(&yres.to_be_bytes());
        blob.extend_from_slice(b"payload");
        PageDescriptor::parse("test-page", blob).unwrap()
    }

    #[test]
    fn test_roots_fixed_at_one_two_three() {
        let doc = Document::new();
        assert_eq!(doc.object_count(), 3);
        let objs = doc.objects();
        assert_eq!(objs[0].id(), 1);
        assert_eq!(objs[0].dict().get("Type"), Some(&Value::name("Catalog")));
        assert_eq!(objs[1].id(), 2);
        assert_eq!(objs[1].dict().get("Type"), Some(&Value::name("Outlines")));
        assert_eq!(objs[2].id(), 3);
        assert_eq!(objs[2].dict().get("Type"), Some(&Value::name("Pages")));
        // Count and Kids are absent until a page lands
        assert_eq!(objs[2].dict().get("Count"), None);
        assert_eq!(objs[2].dict().get("Kids"), None);
    }

    #[test]
    fn test_two_documents_both_number_from_one() {
        let a = Document::new();
        let b = Document::new();
        assert_eq!(a.objects()[0].id(), 1);
        assert_eq!(b.objects()[0].id(), 1);
    }

    #[test]
    fn test_page_group_order_and_count() {
        let mut doc = Document::new();
        let globals = doc.add_globals(b"globals".as_slice());
        assert_eq!(globals, 4);

        doc.add_page(&page(200, 300, 300, 300), Some(globals));
        doc.add_page(&page(400, 200, 0, 0), Some(globals));

        // 3 roots + globals + 2 * (image, content, resources, page)
        assert_eq!(doc.object_count(), 12);
        assert_eq!(doc.page_count(), 2);

        let objs = doc.objects();
        assert_eq!(objs[4].dict().get("Subtype"), Some(&Value::name("Image")));
        assert!(objs[5].stream().is_some()); // content
        assert!(objs[6].dict().get("XObject").is_some()); // resources
        assert_eq!(objs[7].dict().get("Type"), Some(&Value::name("Page")));
    }

    #[test]
    fn test_pages_tree_updated_after_each_page() {
        let mut doc = Document::new();
        doc.add_page(&page(8, 8, 0, 0), None);
        assert_eq!(
            doc.objects()[2].dict().get("Count"),
            Some(&Value::Integer(1))
        );

        doc.add_page(&page(8, 8, 0, 0), None);
        assert_eq!(
            doc.objects()[2].dict().get("Count"),
            Some(&Value::Integer(2))
        );
        assert_eq!(
            doc.objects()[2].dict().get("Kids"),
            Some(&Value::Array(vec![
                Value::Reference(7),
                Value::Reference(11)
            ]))
        );
    }

    #[test]
    fn test_standalone_mode_omits_decodeparms() {
        let mut doc = Document::new();
        doc.add_page(&page(8, 8, 0, 0), None);
        let image = &doc.objects()[3];
        assert_eq!(image.dict().get("Filter"), Some(&Value::name("JBIG2Decode")));
        assert_eq!(image.dict().get("DecodeParms"), None);
    }

    #[test]
    fn test_shared_mode_references_globals_from_every_image() {
        let mut doc = Document::new();
        let globals = doc.add_globals(b"sym".as_slice());
        doc.add_page(&page(8, 8, 0, 0), Some(globals));
        doc.add_page(&page(8, 8, 0, 0), Some(globals));

        for image_index in [4usize, 8] {
            let image = &doc.objects()[image_index];
            assert_eq!(
                image.dict().get("DecodeParms"),
                Some(&Value::Dict(Dictionary::from_entries(vec![(
                    "JBIG2Globals",
                    Value::Reference(globals)
                )])))
            );
        }
    }

    #[test]
    fn test_identifiers_dense_without_gaps() {
        let mut doc = Document::new();
        let globals = doc.add_globals(b"sym".as_slice());
        doc.add_page(&page(8, 8, 0, 0), Some(globals));
        doc.add_page(&page(8, 8, 0, 0), Some(globals));

        for (index, obj) in doc.objects().iter().enumerate() {
            assert_eq!(obj.id() as usize, index + 1);
        }
    }

    #[test]
    fn test_default_resolution_mediabox() {
        let mut doc = Document::new();
        doc.add_page(&page(400, 200, 0, 0), None);
        let page_obj = &doc.objects()[6];
        assert_eq!(
            page_obj.dict().get("MediaBox"),
            Some(&Value::Array(vec![
                Value::Integer(0),
                Value::Integer(0),
                Value::Real(400.0),
                Value::Real(200.0),
            ]))
        );
    }

    #[test]
    fn test_content_stream_scales_image() {
        let mut doc = Document::new();
        doc.add_page(&page(200, 300, 300, 300), None);
        let content = &doc.objects()[4];
        assert_eq!(
            content.stream().map(|b| b.as_ref()),
            Some(b"q 48 0 0 72 0 0 cm /Im1 Do Q".as_ref())
        );
    }
}
