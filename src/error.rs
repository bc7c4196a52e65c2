use crate::header::{DdsFlags, DdsPixelFormat, FourCC, Header};

#[derive(Debug)]
#[non_exhaustive]
pub enum HeaderError {
    /// The stream does not start with `"DDS "`.
    InvalidMagicBytes([u8; 4]),
    /// The `size` field of the header is not 124.
    InvalidHeaderSize(u32),
    /// The stream ended before the magic bytes or the fixed-size header
    /// could be read completely.
    UnexpectedEof,
    /// The pixel format uses the `DX10` FourCC, which announces an extended
    /// header. The extended header is not supported.
    Dx10HeaderUnsupported,
    /// At least one of `HEIGHT`, `WIDTH`, or `PIXEL_FORMAT` is missing from
    /// the header flags. Contains the missing flags.
    MissingRequiredFlags(DdsFlags),

    Io(std::io::Error),
}

impl std::fmt::Display for HeaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeaderError::InvalidMagicBytes(bytes) => {
                write!(
                    f,
                    "Invalid magic bytes {:?}, expected {:?} (ASCII: 'DDS ')",
                    bytes,
                    Header::MAGIC
                )
            }
            HeaderError::InvalidHeaderSize(size) => {
                write!(f, "Invalid DDS header size of {}, expected 124", size)
            }
            HeaderError::UnexpectedEof => {
                write!(f, "Unexpected end of stream while reading the DDS header")
            }
            HeaderError::Dx10HeaderUnsupported => {
                write!(f, "The DX10 header extension is not supported")
            }
            HeaderError::MissingRequiredFlags(missing) => {
                write!(f, "DDS header is missing required flags {:?}", missing)
            }

            HeaderError::Io(error) => write!(f, "I/O error: {}", error),
        }
    }
}

impl From<std::io::Error> for HeaderError {
    fn from(error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::UnexpectedEof {
            HeaderError::UnexpectedEof
        } else {
            HeaderError::Io(error)
        }
    }
}
impl std::error::Error for HeaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HeaderError::Io(error) => Some(error),
            _ => None,
        }
    }
}

#[derive(Debug)]
#[non_exhaustive]
pub enum FormatError {
    UnsupportedFourCC(FourCC),
    /// The bit masks (or flags) of the pixel format do not describe any of
    /// the supported packed formats.
    UnsupportedPixelFormat(DdsPixelFormat),
}
impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatError::UnsupportedFourCC(four_cc) => {
                write!(f, "Unsupported {:?} in the DDS pixel format", four_cc)
            }
            FormatError::UnsupportedPixelFormat(pf) => {
                write!(
                    f,
                    "Unsupported pixel format in the DDS header: flags {:?}, masks R={:#x} G={:#x} B={:#x} A={:#x}",
                    pf.flags, pf.r_bit_mask, pf.g_bit_mask, pf.b_bit_mask, pf.a_bit_mask
                )
            }
        }
    }
}
impl std::error::Error for FormatError {}

#[derive(Debug)]
#[non_exhaustive]
pub enum LayoutError {
    /// The width or height of the texture is zero.
    ZeroDimension,
    /// The header declares more mipmaps than [`crate::Options::max_mipmap_count`].
    TooManyMipMaps(u32),
    /// The header of the DDS file describes a data section that is too large
    /// to be addressed.
    DataLayoutTooBig,
}
impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutError::ZeroDimension => {
                write!(f, "The width or height of the texture is zero")
            }
            LayoutError::TooManyMipMaps(mipmaps) => {
                write!(f, "Too many mipmaps ({})", mipmaps)
            }
            LayoutError::DataLayoutTooBig => {
                write!(f, "Data layout described by the header is too large")
            }
        }
    }
}
impl std::error::Error for LayoutError {}

#[derive(Debug)]
#[non_exhaustive]
pub enum DecodeError {
    /// The stream ended before all bytes of a mip level could be read.
    TruncatedData {
        mipmap_level: u32,
        expected: usize,
        read: usize,
    },
    /// The mip chain would need more memory than
    /// [`crate::Options::memory_limit`] allows.
    MemoryLimitExceeded,

    Header(HeaderError),
    Format(FormatError),
    Layout(LayoutError),
    Io(std::io::Error),
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::TruncatedData {
                mipmap_level,
                expected,
                read,
            } => {
                write!(
                    f,
                    "Truncated data in mip level {}: expected {} bytes, got {}",
                    mipmap_level, expected, read
                )
            }
            DecodeError::MemoryLimitExceeded => {
                write!(f, "Memory limit exceeded")
            }

            DecodeError::Header(error) => write!(f, "Header error: {}", error),
            DecodeError::Format(error) => write!(f, "{}", error),
            DecodeError::Layout(error) => write!(f, "{}", error),
            DecodeError::Io(error) => write!(f, "I/O error: {}", error),
        }
    }
}

impl From<HeaderError> for DecodeError {
    fn from(error: HeaderError) -> Self {
        DecodeError::Header(error)
    }
}
impl From<FormatError> for DecodeError {
    fn from(error: FormatError) -> Self {
        DecodeError::Format(error)
    }
}
impl From<LayoutError> for DecodeError {
    fn from(error: LayoutError) -> Self {
        DecodeError::Layout(error)
    }
}
impl From<std::io::Error> for DecodeError {
    fn from(error: std::io::Error) -> Self {
        DecodeError::Io(error)
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Header(error) => Some(error),
            DecodeError::Format(error) => Some(error),
            DecodeError::Layout(error) => Some(error),
            DecodeError::Io(error) => Some(error),
            _ => None,
        }
    }
}
