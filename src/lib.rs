//! Decoding of DDS texture files with packed RGB(A) and DXT1/DXT3/DXT5 data.
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut file = std::fs::File::open("texture.dds")?;
//! let image = dds_codec::decode(&mut file)?;
//! for (level, mipmap) in image.mipmaps().iter().enumerate() {
//!     println!("level {}: {}x{}", level, mipmap.width(), mipmap.height());
//! }
//! let [r, g, b, a] = image.main().at(0, 0);
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]

mod buffer;
pub mod decode;
mod detect;
mod error;
mod format;
pub mod header;
#[cfg(feature = "image")]
mod image_integration;
mod layout;
mod util;

use std::io::Read;

pub use buffer::*;
pub use error::*;
pub use format::*;
pub use header::Header;
pub use layout::*;

/// Additional options for the DDS decoder specifying how to read and interpret
/// the header.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Options {
    /// Whether magic bytes should be skipped when reading the header.
    ///
    /// DDS files typically start with the magic bytes `"DDS "`. By default, the
    /// decoder will check for these bytes and error if they are not present.
    ///
    /// If this is set to `true`, the decoder assumes that the magic bytes are
    /// not present and immediately starts reading the header.
    ///
    /// Defaults to `false`.
    pub skip_magic_bytes: bool,

    /// The maximum allowed number of mip levels.
    ///
    /// Since the mipmap count is defined by the file, a malicious or
    /// corrupted file may declare far more levels than any texture has.
    /// Levels are never smaller than 1x1, so such a file would otherwise
    /// produce a very long chain of 1x1 buffers.
    ///
    /// Defaults to `255`.
    pub max_mipmap_count: u32,

    /// The maximum number of bytes all mip levels together may occupy.
    ///
    /// The check happens after the header has been read and before any
    /// pixel buffer is allocated.
    ///
    /// Defaults to `usize::MAX`.
    pub memory_limit: usize,
}
impl Default for Options {
    fn default() -> Self {
        Self {
            skip_magic_bytes: false,
            max_mipmap_count: 255,
            memory_limit: usize::MAX,
        }
    }
}

/// Reads the magic bytes (unless skipped) and the header.
fn read_header<R: Read>(r: &mut R, options: &Options) -> Result<Header, HeaderError> {
    // magic bytes
    if !options.skip_magic_bytes {
        Header::read_magic(r)?;
    }

    // header
    let header = Header::read(r)?;
    log::debug!(
        "read DDS header: {}x{}, {} mip level(s), {:?}",
        header.width,
        header.height,
        header.mipmap_count,
        header.pixel_format.flags
    );
    Ok(header)
}

/// A DDS decoder that has read the header and knows the data layout.
#[derive(Debug)]
pub struct DdsDecoder {
    header: Header,
    format: PixelFormat,
    layout: DataLayout,
    options: Options,
}

impl DdsDecoder {
    /// Creates a new decoder by reading the header from the given reader.
    ///
    /// This is equivalent to calling `DdsDecoder::new_with(r, Options::default())`.
    /// See [`Self::new_with`] for more details.
    pub fn new<R: Read>(r: &mut R) -> Result<Self, DecodeError> {
        Self::new_with(r, Options::default())
    }
    /// Creates a new decoder with the given options by reading the header from the given reader.
    ///
    /// If this operations succeeds, the given reader will be positioned at the start of the data
    /// section. All offsets in [`DataLayout`] are relative to this position.
    pub fn new_with<R: Read>(r: &mut R, options: Options) -> Result<Self, DecodeError> {
        let header = read_header(r, &options)?;
        Self::from_header_with(header, options)
    }

    /// Creates a new decoder from an already parsed header, with default [`Options`].
    pub fn from_header(header: Header) -> Result<Self, DecodeError> {
        Self::from_header_with(header, Options::default())
    }
    /// Classifies the pixel format of `header` and computes the data layout.
    pub fn from_header_with(header: Header, options: Options) -> Result<Self, DecodeError> {
        // detect format
        let format = PixelFormat::from_header(&header)?;
        log::debug!("classified DDS pixel format as {:?}", format);

        // data layout
        let layout = DataLayout::from_header(&header, format, options.max_mipmap_count)?;

        Ok(Self {
            header,
            format,
            layout,
            options,
        })
    }

    /// The header read by this decoder.
    pub fn header(&self) -> &Header {
        &self.header
    }
    /// The pixel format of the data section.
    pub fn format(&self) -> PixelFormat {
        self.format
    }
    /// Sizes and offsets of all mip levels in the data section.
    pub fn layout(&self) -> &DataLayout {
        &self.layout
    }
    /// Dimensions, mip count and format, as [`probe`] would report them.
    pub fn info(&self) -> ImageInfo {
        ImageInfo {
            width: self.header.width,
            height: self.header.height,
            mipmap_count: self.header.mipmap_count,
            format: Some(self.format),
        }
    }

    /// Reads all mip levels from the reader.
    ///
    /// The reader is expected to be positioned at the start of the data
    /// section. Every level is read completely; if the reader runs out of
    /// data, [`DecodeError::TruncatedData`] is returned and all levels read
    /// so far are dropped.
    ///
    /// Memory is only allocated for bytes the reader actually delivers, so a
    /// header declaring huge dimensions without data fails cheaply.
    pub fn read_mipmaps<R: Read>(&self, r: &mut R) -> Result<Vec<PixelBuffer>, DecodeError> {
        if self.layout.data_len() > self.options.memory_limit as u64 {
            return Err(DecodeError::MemoryLimitExceeded);
        }

        let mut mipmaps = Vec::with_capacity(self.layout.mipmaps().len());
        for surface in self.layout.mipmaps() {
            // grows with the bytes actually read, not with the declared size
            let mut data = Vec::new();
            let read = r.by_ref().take(surface.len() as u64).read_to_end(&mut data)?;
            if read < surface.len() {
                return Err(DecodeError::TruncatedData {
                    mipmap_level: surface.level(),
                    expected: surface.len(),
                    read,
                });
            }
            log::trace!(
                "read mip level {} ({}x{}, {} bytes)",
                surface.level(),
                surface.width(),
                surface.height(),
                surface.len()
            );

            let rect = Rect::from_size(surface.width(), surface.height());
            let buffer = PixelBuffer::from_bytes(self.format, rect, data)
                .ok_or(LayoutError::DataLayoutTooBig)?;
            mipmaps.push(buffer);
        }

        Ok(mipmaps)
    }

    /// Reads all mip levels and returns them together with the header.
    pub fn decode<R: Read>(self, r: &mut R) -> Result<DdsImage, DecodeError> {
        let mipmaps = self.read_mipmaps(r)?;
        Ok(DdsImage {
            header: self.header,
            format: self.format,
            mipmaps,
        })
    }
}

/// A fully decoded DDS file: one [`PixelBuffer`] per mip level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdsImage {
    header: Header,
    format: PixelFormat,
    mipmaps: Vec<PixelBuffer>,
}
impl DdsImage {
    pub fn header(&self) -> &Header {
        &self.header
    }
    pub fn format(&self) -> PixelFormat {
        self.format
    }
    pub fn width(&self) -> u32 {
        self.header.width
    }
    pub fn height(&self) -> u32 {
        self.header.height
    }
    /// All mip levels, largest first. Never empty.
    pub fn mipmaps(&self) -> &[PixelBuffer] {
        &self.mipmaps
    }
    pub fn mipmap(&self, level: usize) -> Option<&PixelBuffer> {
        self.mipmaps.get(level)
    }
    /// The full-resolution image.
    pub fn main(&self) -> &PixelBuffer {
        &self.mipmaps[0]
    }
    pub fn into_mipmaps(self) -> Vec<PixelBuffer> {
        self.mipmaps
    }
}

/// The dimensions and format declared by a DDS header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub mipmap_count: u32,
    /// `None` if the pixel format of the header is not supported.
    pub format: Option<PixelFormat>,
}
impl ImageInfo {
    pub fn from_header(header: &Header) -> Self {
        Self {
            width: header.width,
            height: header.height,
            mipmap_count: header.mipmap_count,
            format: PixelFormat::from_header(header).ok(),
        }
    }

    pub fn color_model(&self) -> Option<ColorModel> {
        self.format.map(|f| f.color_model())
    }
}

/// Decodes a DDS file with default [`Options`].
///
/// A width or height of 0 fails with [`LayoutError::ZeroDimension`], even
/// though [`probe`] accepts the same header.
pub fn decode<R: Read>(r: &mut R) -> Result<DdsImage, DecodeError> {
    decode_with(r, Options::default())
}
/// Decodes a DDS file with the given options. See [`decode`].
pub fn decode_with<R: Read>(r: &mut R, options: Options) -> Result<DdsImage, DecodeError> {
    DdsDecoder::new_with(r, options)?.decode(r)
}

/// Reads only the magic bytes and the header of a DDS file.
///
/// No pixel data is read or allocated. Unlike [`decode`], this does not fail
/// if the pixel format is unsupported; [`ImageInfo::format`] is `None`
/// instead.
pub fn probe<R: Read>(r: &mut R) -> Result<ImageInfo, DecodeError> {
    probe_with(r, Options::default())
}
pub fn probe_with<R: Read>(r: &mut R, options: Options) -> Result<ImageInfo, DecodeError> {
    let header = read_header(r, &options)?;
    Ok(ImageInfo::from_header(&header))
}
