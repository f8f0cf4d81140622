//! Page input parsing.
//!
//! Each page blob produced by the JBIG2 encoder carries four big-endian
//! 32-bit fields at a fixed byte offset: width, height, x-resolution and
//! y-resolution (pixels per inch, 0 meaning unspecified). Everything else
//! in the blob is opaque JBIG2 container data and is embedded verbatim.

use crate::error::{Error, Result};
use byteorder::{BigEndian, ByteOrder};
use bytes::Bytes;

/// Resolution substituted when a header field reads zero.
///
/// 72 is PDF's native units-per-inch, so an unspecified resolution renders
/// one image pixel per point.
pub const DEFAULT_DPI: u32 = 72;

// Width field starts at byte 11; four u32 fields follow.
const HEADER_OFFSET: usize = 11;
const MIN_LEN: usize = HEADER_OFFSET + 16;

/// One JBIG2 page input, parsed from its embedded header.
///
/// Constructed transiently per input file and consumed immediately by
/// [`crate::Document::add_page`].
#[derive(Debug, Clone)]
pub struct PageDescriptor {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Horizontal resolution in pixels per inch (0 = unspecified)
    pub xres: u32,
    /// Vertical resolution in pixels per inch (0 = unspecified)
    pub yres: u32,
    /// The complete page blob, header included, embedded as the image stream
    pub data: Bytes,
    /// Name of the page input, for diagnostics and ordering
    pub source: String,
}

impl PageDescriptor {
    /// Parse a page blob.
    ///
    /// Fails with [`Error::PageHeader`] when the blob is too short to carry
    /// the fixed-offset header fields.
    pub fn parse(source: impl Into<String>, data: impl Into<Bytes>) -> Result<Self> {
        let source = source.into();
        let data = data.into();
        if data.len() < MIN_LEN {
            return Err(Error::PageHeader {
                source_name: source,
                len: data.len(),
            });
        }

        let width = BigEndian::read_u32(&data[HEADER_OFFSET..HEADER_OFFSET + 4]);
        let height = BigEndian::read_u32(&data[HEADER_OFFSET + 4..HEADER_OFFSET + 8]);
        let xres = BigEndian::read_u32(&data[HEADER_OFFSET + 8..HEADER_OFFSET + 12]);
        let yres = BigEndian::read_u32(&data[HEADER_OFFSET + 12..HEADER_OFFSET + 16]);

        Ok(Self {
            width,
            height,
            xres,
            yres,
            data,
            source,
        })
    }

    /// Effective horizontal resolution, with the zero default applied.
    pub fn xres_effective(&self) -> u32 {
        if self.xres == 0 {
            DEFAULT_DPI
        } else {
            self.xres
        }
    }

    /// Effective vertical resolution, with the zero default applied.
    pub fn yres_effective(&self) -> u32 {
        if self.yres == 0 {
            DEFAULT_DPI
        } else {
            self.yres
        }
    }

    /// Physical page width in PDF points.
    pub fn width_points(&self) -> f64 {
        self.width as f64 * 72.0 / self.xres_effective() as f64
    }

    /// Physical page height in PDF points.
    pub fn height_points(&self) -> f64 {
        self.height as f64 * 72.0 / self.yres_effective() as f64
    }
}
