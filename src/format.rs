use crate::decode::bc;
use crate::decode::packed::{Bgr565, Bgra4444, Bgra5551, Bgra8888, PackedColor, Rgb565};
use crate::header::{FourCC, Header, PixelFormatFlags};
use crate::{detect, FormatError};

/// The pixel representations this crate can decode.
///
/// A format is resolved once from the DDS header. After that, all sizing and
/// decoding is a `match` on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum PixelFormat {
    // packed formats
    /// 8 bits per channel, stored as B, G, R, A bytes.
    BGRA8888,
    /// 5/6/5-bit R/G/B in a 16-bit word. Opaque.
    BGR565,
    /// 5-bit R/G/B and 1-bit alpha in a 16-bit word.
    BGRA5551,
    /// 4 bits per channel in a 16-bit word.
    BGRA4444,
    /// 5/6/5-bit R/G/B in a 16-bit word, as used by DXT endpoints.
    ///
    /// Never selected from a DDS header, since its masks are identical to
    /// [`PixelFormat::BGR565`].
    RGB565,

    // block compression formats
    /// 4x4 blocks of 8 bytes: two 5/6/5 endpoints and 2-bit indexes.
    DXT1,
    /// 4x4 blocks of 16 bytes: explicit 4-bit alpha and a DXT1 color block.
    DXT3,
    /// 4x4 blocks of 16 bytes: interpolated alpha and a DXT1 color block.
    DXT5,
}

impl PixelFormat {
    /// Classifies the pixel format of a DDS header.
    ///
    /// - With the `FOURCC` flag, the FourCC code selects DXT1, DXT3, or DXT5.
    /// - With the `RGB` flag, the four bit masks must exactly match one of
    ///   the known packed formats. The `ALPHAPIXELS` flag selects between the
    ///   formats with and without alpha.
    pub fn from_header(header: &Header) -> Result<PixelFormat, FormatError> {
        let pf = &header.pixel_format;

        if pf.flags.contains(PixelFormatFlags::FOURCC) {
            let four_cc = pf.four_cc.unwrap_or(FourCC::NONE);
            return Self::from_four_cc(four_cc).ok_or_else(|| {
                log::debug!("rejecting DDS pixel format with {:?}", four_cc);
                FormatError::UnsupportedFourCC(four_cc)
            });
        }

        detect::masked_to_supported(pf).ok_or_else(|| {
            log::debug!("rejecting DDS pixel format {:?}", pf);
            FormatError::UnsupportedPixelFormat(pf.clone())
        })
    }
    /// Returns the block-compressed format of a FourCC code.
    ///
    /// `None` if the FourCC code is not supported for decoding.
    pub const fn from_four_cc(four_cc: FourCC) -> Option<PixelFormat> {
        detect::four_cc_to_supported(four_cc)
    }

    pub const fn is_block_compressed(&self) -> bool {
        matches!(self, Self::DXT1 | Self::DXT3 | Self::DXT5)
    }

    /// The width and height of one encoded unit in pixels.
    ///
    /// 1 for packed formats, 4 for DXT formats.
    pub const fn block_size(&self) -> u32 {
        if self.is_block_compressed() {
            4
        } else {
            1
        }
    }

    /// The number of bytes of one encoded unit, i.e. one pixel for packed
    /// formats and one 4x4 block for DXT formats.
    pub const fn bytes_per_unit(&self) -> usize {
        match self {
            Self::BGRA8888 => 4,
            Self::BGR565 | Self::BGRA5551 | Self::BGRA4444 | Self::RGB565 => 2,
            Self::DXT1 => 8,
            Self::DXT3 | Self::DXT5 => 16,
        }
    }

    /// The number of bytes per row of pixels (or row of blocks for DXT
    /// formats) for a surface of the given width.
    ///
    /// `None` if the result overflows `usize`.
    pub fn row_pitch(&self, width: u32) -> Option<usize> {
        let units = width.div_ceil(self.block_size()) as usize;
        units.checked_mul(self.bytes_per_unit())
    }

    /// The number of bytes of a surface with the given dimensions.
    ///
    /// `None` if the result overflows `usize`.
    pub fn surface_len(&self, width: u32, height: u32) -> Option<usize> {
        let rows = height.div_ceil(self.block_size()) as usize;
        self.row_pitch(width)?.checked_mul(rows)
    }

    /// The channels and their encoded bit depths.
    pub const fn color_model(&self) -> ColorModel {
        match self {
            Self::BGRA8888 => ColorModel::rgba([8, 8, 8, 8]),
            Self::BGR565 | Self::RGB565 | Self::DXT1 => ColorModel::rgb([5, 6, 5]),
            Self::BGRA5551 => ColorModel::rgba([5, 5, 5, 1]),
            Self::BGRA4444 => ColorModel::rgba([4, 4, 4, 4]),
            Self::DXT3 => ColorModel::rgba([5, 6, 5, 4]),
            Self::DXT5 => ColorModel::rgba([5, 6, 5, 8]),
        }
    }

    /// Decodes one pixel from an encoded unit.
    ///
    /// `unit` must be at least [`Self::bytes_per_unit`] bytes long. `x` and
    /// `y` are the position of the pixel within the unit and must be less
    /// than [`Self::block_size`].
    pub(crate) fn decode_pixel(&self, unit: &[u8], x: u32, y: u32) -> [u16; 4] {
        debug_assert!(unit.len() >= self.bytes_per_unit());
        debug_assert!(x < self.block_size() && y < self.block_size());

        match self {
            Self::BGRA8888 => Bgra8888::read(unit).decode(),
            Self::BGR565 => Bgr565::read(unit).decode(),
            Self::BGRA5551 => Bgra5551::read(unit).decode(),
            Self::BGRA4444 => Bgra4444::read(unit).decode(),
            Self::RGB565 => Rgb565::read(unit).decode(),
            Self::DXT1 => bc::dxt1_pixel(block(unit), x, y),
            Self::DXT3 => bc::dxt3_pixel(block(unit), x, y),
            Self::DXT5 => bc::dxt5_pixel(block(unit), x, y),
        }
    }

    /// Encodes one pixel into an encoded unit.
    ///
    /// Returns `false` and leaves `unit` untouched for block-compressed
    /// formats.
    pub(crate) fn encode_pixel(&self, unit: &mut [u8], rgba: [u16; 4]) -> bool {
        match self {
            Self::BGRA8888 => Bgra8888::encode(rgba).write(unit),
            Self::BGR565 => Bgr565::encode(rgba).write(unit),
            Self::BGRA5551 => Bgra5551::encode(rgba).write(unit),
            Self::BGRA4444 => Bgra4444::encode(rgba).write(unit),
            Self::RGB565 => Rgb565::encode(rgba).write(unit),
            Self::DXT1 | Self::DXT3 | Self::DXT5 => return false,
        }
        true
    }
}

fn block<const N: usize>(unit: &[u8]) -> [u8; N] {
    let mut block = [0; N];
    block.copy_from_slice(&unit[..N]);
    block
}

/// The number and semantics of the color channels of a format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channels {
    /// The format contains RGB values and is always opaque.
    Rgb,
    /// The format contains RGBA values.
    Rgba,
}
impl Channels {
    /// Returns the number of channels.
    pub const fn count(&self) -> u8 {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

/// Describes the color channels of a format and how many bits each channel
/// is encoded with.
///
/// Decoded samples always have 16 bits per channel, regardless of the
/// encoded bit depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorModel {
    pub channels: Channels,
    /// Encoded bits of the R, G, B, and A channels. The alpha depth is 0 for
    /// [`Channels::Rgb`].
    pub bit_depth: [u8; 4],
}
impl ColorModel {
    const fn rgb([r, g, b]: [u8; 3]) -> Self {
        Self {
            channels: Channels::Rgb,
            bit_depth: [r, g, b, 0],
        }
    }
    const fn rgba(bit_depth: [u8; 4]) -> Self {
        Self {
            channels: Channels::Rgba,
            bit_depth,
        }
    }

    /// The largest encoded bit depth of any channel.
    pub fn max_bit_depth(&self) -> u8 {
        self.bit_depth.into_iter().max().unwrap_or(0)
    }
}
