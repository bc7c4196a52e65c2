use crate::{Header, LayoutError, PixelFormat};

pub trait DataRegion {
    /// The number of bytes this object occupies in the data section of a DDS file.
    fn data_len(&self) -> u64;
    /// The byte offset of this object in the data section of a DDS file.
    fn data_offset(&self) -> u64;
    /// The byte offset of the byte after this object in the data section of a DDS file.
    ///
    /// This is equivalent to `self.data_offset() + self.data_len()`.
    fn data_end(&self) -> u64 {
        self.data_offset() + self.data_len()
    }
}

/// The position and size of one mip level in the data section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceDescriptor {
    level: u32,
    width: u32,
    height: u32,
    offset: u64,
    len: usize,
}
impl SurfaceDescriptor {
    /// The mip level. 0 is the full-resolution image.
    pub fn level(&self) -> u32 {
        self.level
    }
    pub fn width(&self) -> u32 {
        self.width
    }
    pub fn height(&self) -> u32 {
        self.height
    }
    /// The number of bytes of the surface as a `usize`.
    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
impl DataRegion for SurfaceDescriptor {
    fn data_len(&self) -> u64 {
        self.len as u64
    }
    fn data_offset(&self) -> u64 {
        self.offset
    }
}

/// The layout of all mip levels in the data section of a DDS file.
///
/// The data section starts right after the 128 bytes of magic and header.
/// Mip levels are stored back to back, largest first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataLayout {
    format: PixelFormat,
    mipmaps: Vec<SurfaceDescriptor>,
}

impl DataLayout {
    /// Computes the layout of the mip chain described by the header.
    ///
    /// Level `i` has the dimensions `max(1, width >> i)` by
    /// `max(1, height >> i)`, so a chain never contains an empty surface.
    pub fn from_header(
        header: &Header,
        format: PixelFormat,
        max_mipmap_count: u32,
    ) -> Result<Self, LayoutError> {
        if header.width == 0 || header.height == 0 {
            return Err(LayoutError::ZeroDimension);
        }
        let mipmap_count = header.mipmap_count.max(1);
        if mipmap_count > max_mipmap_count {
            return Err(LayoutError::TooManyMipMaps(mipmap_count));
        }

        let mut mipmaps = Vec::with_capacity(mipmap_count as usize);
        let mut offset: u64 = 0;
        for level in 0..mipmap_count {
            let width = mip_dimension(header.width, level);
            let height = mip_dimension(header.height, level);
            let len = format
                .surface_len(width, height)
                .ok_or(LayoutError::DataLayoutTooBig)?;

            mipmaps.push(SurfaceDescriptor {
                level,
                width,
                height,
                offset,
                len,
            });

            offset = offset
                .checked_add(len as u64)
                .ok_or(LayoutError::DataLayoutTooBig)?;
        }

        Ok(Self { format, mipmaps })
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }
    /// All mip levels, largest first. Never empty.
    pub fn mipmaps(&self) -> &[SurfaceDescriptor] {
        &self.mipmaps
    }
    /// The full-resolution surface.
    pub fn main(&self) -> SurfaceDescriptor {
        self.mipmaps[0]
    }
}
impl DataRegion for DataLayout {
    fn data_len(&self) -> u64 {
        self.mipmaps.last().map_or(0, |last| last.data_end())
    }
    fn data_offset(&self) -> u64 {
        0
    }
}

/// The size of a dimension at the given mip level.
pub fn mip_dimension(base: u32, level: u32) -> u32 {
    base.checked_shr(level).unwrap_or(0).max(1)
}
