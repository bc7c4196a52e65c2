use crate::{util::read_u32_le_array, HeaderError};
use bitflags::bitflags;
use std::io::Read;

/// The DDS header.
///
/// This structure contains parsed and validated data. A `Header` returned by
/// [`Header::read`] is guaranteed to have the `HEIGHT`, `WIDTH`, and
/// `PIXEL_FORMAT` flags set and to not announce a DX10 header extension.
///
/// https://learn.microsoft.com/en-us/windows/win32/direct3ddds/dds-header
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Header {
    /// Which of the fields below were filled in by the writer.
    pub flags: DdsFlags,
    /// Height of mip level 0 in pixels.
    pub height: u32,
    /// Width of mip level 0 in pixels.
    pub width: u32,
    /// The pitch or number of bytes per scan line in an uncompressed texture;
    /// the total number of bytes in the top level texture for a compressed
    /// texture.
    ///
    /// Informational only. Many writers fill this in incorrectly, so the
    /// decoder computes sizes from the pixel format instead.
    pub pitch_or_linear_size: u32,
    /// Depth of a volume texture (in pixels). `None` if the `DEPTH` flag is
    /// not set.
    pub depth: Option<u32>,
    /// Number of mip levels stored after the header.
    ///
    /// This is 1 if the `MIPMAP_COUNT` flag is absent, and never 0 after
    /// [`Header::read`].
    pub mipmap_count: u32,
    pub pixel_format: DdsPixelFormat,
    /// Surface complexity flags.
    pub caps: DdsCaps,
    /// Cube map and volume flags.
    pub caps2: DdsCaps2,
}

impl Header {
    /// The size of the header record in bytes, excluding the magic bytes.
    pub const SIZE: usize = 124;
    const INTS: usize = Self::SIZE / 4;

    /// `"DDS "`, the first 4 bytes of a DDS file.
    pub const MAGIC: [u8; 4] = *b"DDS ";

    /// Reads exactly 4 bytes and checks that they are [`Header::MAGIC`].
    ///
    /// Nothing past the magic bytes is consumed, even on failure.
    pub fn read_magic<R: Read>(reader: &mut R) -> Result<(), HeaderError> {
        let mut buffer = [0; 4];
        reader.read_exact(&mut buffer)?;

        if buffer != Self::MAGIC {
            return Err(HeaderError::InvalidMagicBytes(buffer));
        }

        Ok(())
    }

    /// Reads the 124-byte header record that follows the magic bytes.
    ///
    /// If the header is read successfully, the reader will be at the start of
    /// the pixel data.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self, HeaderError> {
        let buffer: [u32; Self::INTS] = read_u32_le_array(reader)?;
        Self::from_buffer(buffer)
    }

    fn from_buffer(buffer: [u32; Self::INTS]) -> Result<Self, HeaderError> {
        if buffer[0] != Self::SIZE as u32 {
            return Err(HeaderError::InvalidHeaderSize(buffer[0]));
        }

        // The FourCC field is checked even without the FOURCC flag.
        if FourCC(buffer[20]) == FourCC::DX10 {
            return Err(HeaderError::Dx10HeaderUnsupported);
        }

        let flags = DdsFlags::from_bits_retain(buffer[1]);
        if !flags.contains(DdsFlags::REQUIRED) {
            return Err(HeaderError::MissingRequiredFlags(
                DdsFlags::REQUIRED.difference(flags),
            ));
        }

        let height = buffer[2];
        let width = buffer[3];
        let pitch_or_linear_size = buffer[4];
        let depth = if flags.contains(DdsFlags::DEPTH) {
            Some(buffer[5])
        } else {
            None
        };
        let mipmap_count = if flags.contains(DdsFlags::MIPMAP_COUNT) {
            buffer[6].max(1)
        } else {
            1
        };

        let pixel_format = DdsPixelFormat::from_buffer([
            buffer[18], buffer[19], buffer[20], buffer[21], buffer[22], buffer[23], buffer[24],
            buffer[25],
        ]);

        let caps = DdsCaps::from_bits_retain(buffer[26]);
        let caps2 = DdsCaps2::from_bits_retain(buffer[27]);

        Ok(Self {
            flags,
            height,
            width,
            pitch_or_linear_size,
            depth,
            mipmap_count,
            pixel_format,
            caps,
            caps2,
        })
    }
}

/// The DDS_PIXELFORMAT structure describes the pixel format of the surface.
///
/// https://learn.microsoft.com/en-us/windows/win32/direct3ddds/dds-pixelformat
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DdsPixelFormat {
    /// Values which indicate what type of data is in the surface.
    pub flags: PixelFormatFlags,
    /// Four-character code for compressed formats, e.g. DXT1, DXT3, or DXT5.
    ///
    /// `None` unless `flags` contains [`PixelFormatFlags::FOURCC`].
    pub four_cc: Option<FourCC>,
    /// Number of bits in an RGB (possibly including alpha) format.
    pub rgb_bit_count: u32,
    /// Red mask for reading color data. E.g. `0x00ff0000` for A8R8G8B8.
    pub r_bit_mask: u32,
    /// Green mask for reading color data. E.g. `0x0000ff00` for A8R8G8B8.
    pub g_bit_mask: u32,
    /// Blue mask for reading color data. E.g. `0x000000ff` for A8R8G8B8.
    pub b_bit_mask: u32,
    /// Alpha mask for reading alpha data. E.g. `0xff000000` for A8R8G8B8.
    pub a_bit_mask: u32,
}
impl DdsPixelFormat {
    const SIZE: usize = 32;
    const INTS: usize = Self::SIZE / 4;

    fn from_buffer(buffer: [u32; Self::INTS]) -> Self {
        // buffer[0] is the structure size. Writers disagree on it, so it is
        // not validated.
        let flags = PixelFormatFlags::from_bits_retain(buffer[1]);
        let four_cc = if flags.contains(PixelFormatFlags::FOURCC) {
            Some(FourCC::from(buffer[2]))
        } else {
            None
        };

        Self {
            flags,
            four_cc,
            rgb_bit_count: buffer[3],
            r_bit_mask: buffer[4],
            g_bit_mask: buffer[5],
            b_bit_mask: buffer[6],
            a_bit_mask: buffer[7],
        }
    }

    /// The R, G, B, and A bit masks in that order.
    pub fn masks(&self) -> [u32; 4] {
        [
            self.r_bit_mask,
            self.g_bit_mask,
            self.b_bit_mask,
            self.a_bit_mask,
        ]
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DdsFlags: u32 {
        const CAPS = 0x1;
        const HEIGHT = 0x2;
        const WIDTH = 0x4;
        /// `pitch_or_linear_size` is the row pitch of a packed texture.
        const PITCH = 0x8;
        const PIXEL_FORMAT = 0x1000;
        /// `mipmap_count` is valid.
        const MIPMAP_COUNT = 0x20000;
        /// `pitch_or_linear_size` is the byte size of level 0 of a
        /// compressed texture.
        const LINEAR_SIZE = 0x80000;
        /// `depth` is valid.
        const DEPTH = 0x800000;

        /// The flags the decoder refuses to work without.
        ///
        /// `CAPS` is also required by the documentation, but enough writers
        /// omit it that it isn't enforced.
        const REQUIRED = Self::HEIGHT.bits()
            | Self::WIDTH.bits()
            | Self::PIXEL_FORMAT.bits();
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DdsCaps: u32 {
        /// The file holds more than one surface.
        const COMPLEX = 0x8;
        const MIPMAP = 0x400000;
        const TEXTURE = 0x1000;
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DdsCaps2: u32 {
        const CUBE_MAP = 0x200;
        const VOLUME = 0x200000;
    }

    /// How to interpret the rest of a [`DdsPixelFormat`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PixelFormatFlags: u32 {
        /// The alpha mask is valid.
        const ALPHAPIXELS = 0x1;
        /// Alpha-only data.
        const ALPHA = 0x2;
        /// The FourCC code selects a compressed format.
        const FOURCC = 0x4;
        /// The bit count and the R, G, B masks describe packed data.
        const RGB = 0x40;
        const RGBA = Self::RGB.bits() | Self::ALPHAPIXELS.bits();
        /// Packed YUV data.
        const YUV = 0x200;
        /// Packed single-channel data.
        const LUMINANCE = 0x20000;
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourCC(pub u32);

impl FourCC {
    pub const NONE: Self = FourCC(0);

    pub const DXT1: Self = FourCC(u32::from_le_bytes(*b"DXT1"));
    pub const DXT2: Self = FourCC(u32::from_le_bytes(*b"DXT2"));
    pub const DXT3: Self = FourCC(u32::from_le_bytes(*b"DXT3"));
    pub const DXT4: Self = FourCC(u32::from_le_bytes(*b"DXT4"));
    pub const DXT5: Self = FourCC(u32::from_le_bytes(*b"DXT5"));

    pub const DX10: Self = FourCC(u32::from_le_bytes(*b"DX10"));
}

impl From<u32> for FourCC {
    fn from(value: u32) -> Self {
        FourCC(value)
    }
}
impl From<FourCC> for u32 {
    fn from(value: FourCC) -> Self {
        value.0
    }
}

impl std::fmt::Debug for FourCC {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bytes = self.0.to_le_bytes();
        if bytes.iter().all(|&b| b.is_ascii_alphanumeric()) {
            write!(
                f,
                "FourCC(0x{:x}; {}{}{}{})",
                self.0, bytes[0] as char, bytes[1] as char, bytes[2] as char, bytes[3] as char
            )
        } else {
            write!(f, "FourCC(0x{:x})", self.0)
        }
    }
}
